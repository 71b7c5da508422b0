use anyhow::Result;
use clap::Parser as ClapParser;
use log::info;
use nestview_cli::commands;
use nestview_cli::config::CliConfig;
use nestview_cli::io;
use nestview_cli::io::cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config = CliConfig::load(args.config_file.as_deref())?;
    info!("using {config:?}");

    match args.command {
        Command::Render(render_args) => commands::render(&render_args, &config),
        Command::Allocate(allocate_args) => commands::allocate(&allocate_args).map(|_| ()),
        Command::Fetch(fetch_args) => commands::fetch(&fetch_args, &config).await,
    }
}
