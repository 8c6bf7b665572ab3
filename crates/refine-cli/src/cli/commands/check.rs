use refine_client::ModelClient;

use crate::cli::args::ModelArgs;
use crate::exit_codes::{FAILED, SUCCESS};

pub async fn run(args: ModelArgs) -> anyhow::Result<i32> {
    let client = ModelClient::new(args.client_config())?;

    if client.is_reachable().await {
        println!(
            "Model server reachable at {} (model: {})",
            client.base_url(),
            client.config().model
        );
        Ok(SUCCESS)
    } else {
        println!("Model server not reachable at {}", client.base_url());
        Ok(FAILED)
    }
}
