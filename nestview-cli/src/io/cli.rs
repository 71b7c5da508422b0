use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,
    #[arg(
        short,
        long,
        value_name = "[off, error, warn, info, debug, trace]",
        default_value = "info",
        global = true
    )]
    pub log_level: LevelFilter,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Renders a layout to SVG
    Render(RenderArgs),
    /// Checks a two-autoclave allocation plan against the capacities of both autoclaves
    Allocate(AllocateArgs),
    /// Requests a layout from the nesting backend and renders it to SVG
    Fetch(FetchArgs),
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    #[arg(short, long, value_name = "FILE")]
    pub input_file: PathBuf,
    #[arg(short, long, value_name = "FILE")]
    pub output_file: PathBuf,
    /// Zoom factor applied on top of the scale that fits the layout to the canvas
    /// (on top of scale 1.0 if `fit_to_canvas` is disabled)
    #[arg(long)]
    pub zoom: Option<f32>,
    /// Id of the item to draw as selected
    #[arg(long)]
    pub select: Option<u64>,
    /// Id of the item to draw as hovered
    #[arg(long)]
    pub hover: Option<u64>,
}

#[derive(Args, Debug)]
pub struct AllocateArgs {
    #[arg(short, long, value_name = "FILE")]
    pub input_file: PathBuf,
    /// Writes the allocation report as JSON
    #[arg(short, long, value_name = "FILE")]
    pub output_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct FetchArgs {
    #[arg(long, value_name = "URL")]
    pub base_url: String,
    /// JSON layout request
    #[arg(short, long, value_name = "FILE")]
    pub request_file: PathBuf,
    #[arg(short, long, value_name = "FILE")]
    pub output_file: PathBuf,
}
