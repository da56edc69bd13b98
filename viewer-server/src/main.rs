use anyhow::{Context, Result};
use std::{env, net::SocketAddr, path::PathBuf, sync::Arc};
use structopt::StructOpt;
use tracing_subscriber::{filter::LevelFilter, prelude::*, EnvFilter};
use viewer_server::config::Config;

#[derive(Debug, Clone, StructOpt)]
/// Serve COCO annotation files and images to the viewer
struct Args {
    #[structopt(long)]
    /// configuration file
    pub config_file: Option<PathBuf>,
    #[structopt(long)]
    /// listening address, overriding the configuration file
    pub addr: Option<SocketAddr>,
    #[structopt(long)]
    /// image directory, overriding the configuration file
    pub image_dir: Option<PathBuf>,
}

#[tokio::main]
pub async fn main() -> Result<()> {
    // setup tracing
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true).compact();
    let filter_layer = {
        let filter = EnvFilter::from_default_env();
        let filter = if let Err(_) = env::var("RUST_LOG") {
            filter.add_directive(LevelFilter::INFO.into())
        } else {
            filter
        };
        filter
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    // parse arguments
    let Args {
        config_file,
        addr,
        image_dir,
    } = Args::from_args();
    let mut config = match config_file {
        Some(config_file) => Config::open(&config_file).with_context(|| {
            format!("failed to load config file '{}'", config_file.display())
        })?,
        None => Config::default(),
    };
    if let Some(addr) = addr {
        config.server.addr = addr;
    }
    if let Some(image_dir) = image_dir {
        config.images.dir = Some(image_dir);
    }
    config.validate()?;

    // start server
    viewer_server::start(Arc::new(config)).await?;

    Ok(())
}
