//! Archives posts from Telegram channels to disk.
#[macro_use]
extern crate log;

use postkeeper::{
    bot,
    config::{Args, Config},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    postkeeper::init_logger();

    let args: Args = argh::from_env();
    let config = Config::from_env(args)?;

    info!("Starting postkeeper...");
    bot::run(config).await
}
