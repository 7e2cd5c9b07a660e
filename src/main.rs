//! Order Tracker - rolling acceptance-rate tracker
//!
//! Records accept/decline decisions and predicts when declines fall off.

use order_tracker::cli;

fn main() -> anyhow::Result<()> {
    // Initialize logging (WARN level by default, use RUST_LOG=order_tracker=debug for detail)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into())
        )
        .with_writer(std::io::stderr)
        .init();

    // Run CLI
    cli::run()
}
