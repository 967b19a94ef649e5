use std::process::ExitCode;

use anyhow::anyhow;
use clap::Parser;

use merge_coingecko::action::GithubActions;
use merge_coingecko::cli::Args;
use merge_coingecko::config::SyncConfig;
use merge_coingecko::http::CoingeckoHttp;
use merge_coingecko::logging::init_logging;
use merge_coingecko::pipeline;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    // Local runs may keep INPUT_COINGECKO_TOKEN in a .env file
    dotenvy::dotenv().ok();
    init_logging().map_err(|e| anyhow!("failed to initialise logging: {e}"))?;

    let config = SyncConfig::from(Args::parse());
    let ctx = GithubActions::from_env();

    let ok = pipeline::run(&config, &ctx, |token| {
        CoingeckoHttp::from_config(&config, token)
    })
    .await;

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
