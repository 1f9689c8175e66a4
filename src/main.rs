use shiftwatch::commands::Cli;
use shiftwatch::libs::messages::macros::is_debug_mode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();

    if is_debug_mode() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("shiftwatch=debug"));
        tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
    }

    Cli::menu().await
}
