mod style;

#[doc(inline)]
pub use style::{Color, RenderTheme, VisualState, item_color};

use anyhow::{Context, Result, ensure};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::entities::{Layout, PlacedItem};
use crate::geometry::Rect;
use crate::interaction::Tooltip;
use crate::viewport::Viewport;

/// Size of the drawing surface in px
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        CanvasSize { width, height }
    }
}

/// Configuration of the [`Renderer`]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Items narrower than this (px) are drawn without text
    pub label_min_width_px: f32,
    /// Items lower than this (px) are drawn without text
    pub label_min_height_px: f32,
    pub theme: RenderTheme,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            label_min_width_px: 40.0,
            label_min_height_px: 20.0,
            theme: RenderTheme::default(),
        }
    }
}

/// Which items are currently selected and hovered
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Focus {
    pub selected: Option<u64>,
    pub hovered: Option<u64>,
}

/// One fully drawn frame
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// Draw commands in painting order
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn items(&self) -> impl Iterator<Item = &ItemDraw> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Item(item) => Some(item),
            _ => None,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear {
        background: Color,
    },
    Container {
        id: u64,
        rect: Rect,
        fill: Color,
        stroke: Color,
        stroke_width: f32,
    },
    Item(ItemDraw),
}

/// A placed item drawn as a filled, outlined rectangle
#[derive(Clone, Debug, PartialEq)]
pub struct ItemDraw {
    pub id: u64,
    pub rect: Rect,
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f32,
    pub shadow: bool,
    pub state: VisualState,
    /// Id and label, only present if the item is large enough on screen
    pub text: Option<[String; 2]>,
    pub tooltip: Tooltip,
}

/// Stages of the rendering pipeline, in order
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RenderStage {
    Setup,
    Clear,
    Transform,
    Container,
    Items,
    Done,
}

impl RenderStage {
    pub fn label(&self) -> &'static str {
        match self {
            RenderStage::Setup => "preparing canvas",
            RenderStage::Clear => "clearing canvas",
            RenderStage::Transform => "computing transform",
            RenderStage::Container => "drawing container",
            RenderStage::Items => "drawing items",
            RenderStage::Done => "done",
        }
    }

    /// Progress (%) reached once the stage completes. The item stage spans 40..=100.
    fn progress(&self) -> u8 {
        match self {
            RenderStage::Setup => 10,
            RenderStage::Clear => 20,
            RenderStage::Transform => 30,
            RenderStage::Container => 40,
            RenderStage::Items | RenderStage::Done => 100,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RenderStatus {
    Idle,
    Rendering { stage: RenderStage, progress: u8 },
    Ready,
    Failed { message: String },
}

impl Display for RenderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderStatus::Idle => write!(f, "idle"),
            RenderStatus::Rendering { stage, progress } => {
                write!(f, "{} ({progress}%)", stage.label())
            }
            RenderStatus::Ready => write!(f, "ready"),
            RenderStatus::Failed { message } => write!(f, "failed: {message}"),
        }
    }
}

/// Draws layouts into [`Frame`]s, reporting progress along the way.
#[derive(Clone, Debug)]
pub struct Renderer {
    config: RenderConfig,
    status: RenderStatus,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Renderer {
            config,
            status: RenderStatus::Idle,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn status(&self) -> &RenderStatus {
        &self.status
    }

    /// Renders `layout` as seen through `viewport`.
    /// `progress` is called with a non-decreasing percentage, ending at 100 on success.
    /// On failure the status becomes [`RenderStatus::Failed`] and no frame is produced.
    pub fn render(
        &mut self,
        layout: &Layout,
        viewport: &Viewport,
        focus: Focus,
        canvas: CanvasSize,
        mut progress: impl FnMut(RenderStage, u8),
    ) -> Result<Frame> {
        match self.draw(layout, viewport, focus, canvas, &mut progress) {
            Ok(frame) => {
                self.status = RenderStatus::Ready;
                Ok(frame)
            }
            Err(err) => {
                warn!("rendering of container {} failed: {err:#}", layout.container().id);
                self.status = RenderStatus::Failed {
                    message: format!("{err:#}"),
                };
                Err(err)
            }
        }
    }

    fn draw(
        &mut self,
        layout: &Layout,
        viewport: &Viewport,
        focus: Focus,
        canvas: CanvasSize,
        progress: &mut impl FnMut(RenderStage, u8),
    ) -> Result<Frame> {
        let theme = self.config.theme;

        ensure!(
            canvas.width > 0 && canvas.height > 0,
            "canvas {}x{} has no drawable surface",
            canvas.width,
            canvas.height
        );
        self.advance(RenderStage::Setup, RenderStage::Setup.progress(), progress);

        let mut commands = Vec::with_capacity(layout.len() + 2);
        commands.push(DrawCommand::Clear {
            background: theme.background,
        });
        self.advance(RenderStage::Clear, RenderStage::Clear.progress(), progress);

        let container_rect = viewport
            .container_rect(layout.container())
            .context("container cannot be mapped onto the canvas")?;
        self.advance(
            RenderStage::Transform,
            RenderStage::Transform.progress(),
            progress,
        );

        commands.push(DrawCommand::Container {
            id: layout.container().id,
            rect: container_rect,
            fill: theme.container_fill,
            stroke: theme.container_stroke,
            stroke_width: 2.0 * theme.stroke_width_multiplier,
        });
        self.advance(
            RenderStage::Container,
            RenderStage::Container.progress(),
            progress,
        );

        let n_items = layout.len();
        let base = RenderStage::Container.progress() as usize;
        for (i, item) in layout.items().iter().enumerate() {
            commands.push(DrawCommand::Item(self.draw_item(item, viewport, focus)?));
            let pct = base + (100 - base) * (i + 1) / n_items;
            self.advance(RenderStage::Items, pct as u8, progress);
        }
        self.advance(RenderStage::Done, RenderStage::Done.progress(), progress);

        debug!(
            "rendered container {} with {} items at scale {:.3}",
            layout.container().id,
            n_items,
            viewport.scale()
        );

        Ok(Frame {
            width: canvas.width,
            height: canvas.height,
            commands,
        })
    }

    fn draw_item(&self, item: &PlacedItem, viewport: &Viewport, focus: Focus) -> Result<ItemDraw> {
        let theme = &self.config.theme;
        let rect = viewport
            .model_rect(item.bbox())
            .with_context(|| format!("item {} cannot be mapped onto the canvas", item.id))?;
        let state = VisualState::resolve(item.id, focus.selected, focus.hovered);

        let text = match rect.width() > self.config.label_min_width_px
            && rect.height() > self.config.label_min_height_px
        {
            true => Some([format!("#{}", item.id), item.label.clone()]),
            false => None,
        };

        Ok(ItemDraw {
            id: item.id,
            rect,
            fill: item_color(item.id),
            stroke: theme.stroke_for(state),
            stroke_width: state.stroke_width() * theme.stroke_width_multiplier,
            shadow: state.has_shadow(),
            state,
            text,
            tooltip: Tooltip::for_item(item),
        })
    }

    fn advance(
        &mut self,
        stage: RenderStage,
        pct: u8,
        progress: &mut impl FnMut(RenderStage, u8),
    ) {
        self.status = RenderStatus::Rendering {
            stage,
            progress: pct,
        };
        progress(stage, pct);
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::new(RenderConfig::default())
    }
}
