use tracing::{info, warn};

use crate::cli::args::ServeArgs;
use crate::exit_codes::SUCCESS;

pub async fn run(args: ServeArgs) -> anyhow::Result<i32> {
    refine_server::serve(args.server_config(), shutdown_signal()).await?;
    Ok(SUCCESS)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler, run until killed.
        warn!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
