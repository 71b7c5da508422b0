use anyhow::Result;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::entities::Layout;
use crate::events::HostEvents;
use crate::geometry::Point;
use crate::interaction::{Interaction, Response};
use crate::render::{CanvasSize, Focus, Frame, RenderConfig, RenderStatus, Renderer};
use crate::viewport::{Viewport, ViewportConfig};

/// Configuration of a [`LayoutViewer`]
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub viewport: ViewportConfig,
    pub render: RenderConfig,
}

/// Errors surfaced to the user by the viewer. None of them propagate to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewerError {
    /// Drawing failed, nothing is shown until a retry succeeds
    Render { message: String },
    /// Fetching a layout failed, the last good layout stays visible
    Fetch { message: String },
}

impl Display for ViewerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewerError::Render { message } => write!(f, "could not draw the layout: {message}"),
            ViewerError::Fetch { message } => write!(f, "could not load the layout: {message}"),
        }
    }
}

/// What the viewer currently shows
#[derive(Debug, PartialEq)]
pub enum ViewerView<'a> {
    /// No layout has been loaded yet
    Empty,
    /// The current frame, possibly accompanied by a (non-blocking) fetch error banner
    Frame {
        frame: &'a Frame,
        banner: Option<&'a ViewerError>,
    },
    /// Blocking error panel with a retry action
    Failed(&'a ViewerError),
}

/// Interactive viewer of a single [`Layout`].
///
/// The frame is invalidated by any change of layout, scale, offset, selection or hover and
/// redrawn lazily when [`LayoutViewer::view`] is called.
pub struct LayoutViewer<E: HostEvents> {
    layout: Option<Layout>,
    viewport: Viewport,
    interaction: Interaction,
    renderer: Renderer,
    canvas: CanvasSize,
    frame: Option<Frame>,
    dirty: bool,
    render_error: Option<ViewerError>,
    fetch_error: Option<ViewerError>,
    last_progress: u8,
    events: E,
}

impl<E: HostEvents> LayoutViewer<E> {
    pub fn try_new(config: ViewerConfig, canvas: CanvasSize, events: E) -> Result<Self> {
        Ok(LayoutViewer {
            layout: None,
            viewport: Viewport::try_new(config.viewport)?,
            interaction: Interaction::new(),
            renderer: Renderer::new(config.render),
            canvas,
            frame: None,
            dirty: true,
            render_error: None,
            fetch_error: None,
            last_progress: 0,
            events,
        })
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn render_status(&self) -> &RenderStatus {
        self.renderer.status()
    }

    /// Progress (%) reached by the most recent render
    pub fn last_progress(&self) -> u8 {
        self.last_progress
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Replaces the displayed layout entirely. Selection and hover are reset.
    pub fn set_layout(&mut self, layout: Layout) {
        info!(
            "showing layout for container {} with {} items (efficiency {:.1}%)",
            layout.container().id,
            layout.len(),
            layout.metrics().efficiency * 100.0
        );
        let response = self.interaction.clear();
        if response.selection_changed {
            self.events.on_item_selected(None);
        }
        self.layout = Some(layout);
        self.fetch_error = None;
        self.render_error = None;
        self.dirty = true;
    }

    /// Records a failed fetch. The last successfully loaded layout remains visible.
    pub fn report_fetch_error(&mut self, err: &anyhow::Error) {
        warn!("layout fetch failed: {err:#}");
        self.fetch_error = Some(ViewerError::Fetch {
            message: format!("{err:#}"),
        });
    }

    pub fn fetch_error(&self) -> Option<&ViewerError> {
        self.fetch_error.as_ref()
    }

    pub fn dismiss_fetch_error(&mut self) {
        self.fetch_error = None;
    }

    /// Clears a render error so that the next [`LayoutViewer::view`] draws again.
    pub fn retry_render(&mut self) {
        self.render_error = None;
        self.dirty = true;
    }

    pub fn resize(&mut self, canvas: CanvasSize) {
        if canvas != self.canvas {
            self.canvas = canvas;
            self.dirty = true;
        }
    }

    pub fn zoom_in(&mut self) {
        let changed = self.viewport.zoom_in();
        self.invalidate_if(changed);
    }

    pub fn zoom_out(&mut self) {
        let changed = self.viewport.zoom_out();
        self.invalidate_if(changed);
    }

    pub fn reset_view(&mut self) {
        let changed = self.viewport.reset();
        self.invalidate_if(changed);
    }

    /// Scales the viewport so the container fits the canvas.
    pub fn fit_to_canvas(&mut self) -> Result<()> {
        if let Some(layout) = &self.layout {
            self.viewport.fit_to(layout.container(), self.canvas)?;
            self.dirty = true;
        }
        Ok(())
    }

    pub fn select(&mut self, item_id: Option<u64>) {
        let item_id = item_id
            .filter(|id| self.layout.as_ref().is_some_and(|l| l.item(*id).is_some()));
        let response = Response {
            selection_changed: self.interaction.select(item_id),
            ..Response::default()
        };
        self.apply(response);
    }

    pub fn pointer_down(&mut self, pointer: Point) {
        self.interaction.pointer_down(pointer, &self.viewport);
    }

    pub fn pointer_move(&mut self, pointer: Point) {
        let response =
            self.interaction
                .pointer_move(pointer, self.layout.as_ref(), &mut self.viewport);
        self.apply(response);
    }

    pub fn pointer_up(&mut self, pointer: Point) {
        let response =
            self.interaction
                .pointer_up(pointer, self.layout.as_ref(), &mut self.viewport);
        self.apply(response);
    }

    pub fn pointer_leave(&mut self) {
        let response = self.interaction.pointer_leave();
        self.apply(response);
    }

    /// Returns what should be displayed, redrawing first if the frame is out of date.
    pub fn view(&mut self) -> ViewerView<'_> {
        if self.dirty && self.render_error.is_none() {
            self.redraw();
        }
        if let Some(err) = &self.render_error {
            return ViewerView::Failed(err);
        }
        match &self.frame {
            Some(frame) => ViewerView::Frame {
                frame,
                banner: self.fetch_error.as_ref(),
            },
            None => match &self.fetch_error {
                Some(err) => ViewerView::Failed(err),
                None => ViewerView::Empty,
            },
        }
    }

    fn redraw(&mut self) {
        self.dirty = false;
        let Some(layout) = &self.layout else {
            self.frame = None;
            return;
        };
        let focus = Focus {
            selected: self.interaction.selected(),
            hovered: self.interaction.hovered(),
        };
        let mut last_progress = 0;
        let result = self.renderer.render(
            layout,
            &self.viewport,
            focus,
            self.canvas,
            |_, pct| last_progress = pct,
        );
        self.last_progress = last_progress;
        match result {
            Ok(frame) => self.frame = Some(frame),
            Err(err) => {
                self.frame = None;
                self.render_error = Some(ViewerError::Render {
                    message: format!("{err:#}"),
                });
            }
        }
    }

    fn apply(&mut self, response: Response) {
        if response.selection_changed {
            self.events.on_item_selected(self.interaction.selected());
        }
        self.invalidate_if(response.needs_redraw());
    }

    fn invalidate_if(&mut self, changed: bool) {
        self.dirty |= changed;
    }
}
