use std::path::Path;

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

use nestview::io::svg::svg_util::SvgDrawOptions;
use nestview::render::CanvasSize;
use nestview::viewer::ViewerConfig;

/// Configuration of the command line tool
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct CliConfig {
    /// Viewport and rendering settings
    pub viewer: ViewerConfig,
    pub svg_draw_options: SvgDrawOptions,
    /// Size (px) of the canvas layouts are rendered on
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Scale the layout to fit the canvas before applying `--zoom`
    pub fit_to_canvas: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            viewer: ViewerConfig::default(),
            svg_draw_options: SvgDrawOptions::default(),
            canvas_width: 1200,
            canvas_height: 800,
            fit_to_canvas: true,
        }
    }
}

impl CliConfig {
    /// Reads the config file if one is given, the defaults otherwise.
    /// Fields missing from the file keep their default value.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => crate::io::read_json(path).context("incorrect config file format"),
            None => {
                warn!("no config file provided, using defaults (see --config-file)");
                Ok(CliConfig::default())
            }
        }
    }

    pub fn canvas(&self) -> CanvasSize {
        CanvasSize::new(self.canvas_width, self.canvas_height)
    }
}
