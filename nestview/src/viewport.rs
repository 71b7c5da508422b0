//! Conversion between model coordinates (mm, relative to the container origin) and canvas
//! coordinates (px). Manages zoom and pan.
//!
//! ```text
//! px = mm * base_scale * scale + padding + offset
//! mm = (px - padding - offset) / (base_scale * scale)
//! ```

use anyhow::{Context, Result, ensure};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::entities::Container;
use crate::geometry::{Point, Rect};
use crate::render::CanvasSize;
use crate::util::units;

/// Configuration of a [`Viewport`]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Pixels per millimeter at a user scale of 1.0
    pub base_scale: f32,
    /// Margin (px) between the canvas border and the container origin
    pub padding_px: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    /// Factor applied on every zoom step
    pub zoom_step: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            base_scale: 0.2,
            padding_px: 20.0,
            min_scale: 0.25,
            max_scale: 5.0,
            zoom_step: 1.2,
        }
    }
}

impl ViewportConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.base_scale.is_finite() && self.base_scale > 0.0,
            "base scale must be positive, got {}",
            self.base_scale
        );
        ensure!(
            self.padding_px.is_finite() && self.padding_px >= 0.0,
            "padding must be non-negative, got {}",
            self.padding_px
        );
        ensure!(
            self.min_scale.is_finite()
                && self.max_scale.is_finite()
                && self.min_scale > 0.0
                && self.min_scale <= self.max_scale,
            "invalid scale range [{}, {}]",
            self.min_scale,
            self.max_scale
        );
        ensure!(
            self.zoom_step.is_finite() && self.zoom_step > 1.0,
            "zoom step must be greater than 1, got {}",
            self.zoom_step
        );
        Ok(())
    }
}

/// Pointer position and pan offset at the start of a drag, see [`Viewport::begin_pan`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanAnchor {
    pub pointer: Point,
    pub offset: Point,
}

/// Represents the viewport transformation state (user scale and pan offset).
/// Purely a presentation concern, never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    config: ViewportConfig,
    scale: f32,
    offset: Point,
}

impl Viewport {
    pub fn try_new(config: ViewportConfig) -> Result<Self> {
        config.validate().context("invalid viewport configuration")?;
        let mut viewport = Viewport {
            config,
            scale: 1.0,
            offset: Point(0.0, 0.0),
        };
        viewport.reset();
        Ok(viewport)
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// Current user scale (1.0 = 100%)
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Current pan offset in px
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Effective number of pixels per millimeter
    pub fn px_per_mm(&self) -> f32 {
        self.config.base_scale * self.scale
    }

    /// Maps a model-space point (mm) to canvas space (px).
    pub fn to_screen(&self, model: Point) -> Point {
        let k = self.px_per_mm();
        let pad = self.config.padding_px;
        Point(
            units::mm_to_px(model.0, k) + pad + self.offset.0,
            units::mm_to_px(model.1, k) + pad + self.offset.1,
        )
    }

    /// Maps a canvas-space point (px) back to model space (mm). Inverse of [`Viewport::to_screen`].
    pub fn to_model(&self, screen: Point) -> Point {
        let k = self.px_per_mm();
        let pad = self.config.padding_px;
        Point(
            units::px_to_mm(screen.0 - pad - self.offset.0, k),
            units::px_to_mm(screen.1 - pad - self.offset.1, k),
        )
    }

    /// Sets the user scale, clamped to the configured range.
    /// Returns true if the scale changed. Non-finite values are ignored.
    pub fn set_scale(&mut self, scale: f32) -> bool {
        if !scale.is_finite() {
            debug!("ignoring non-finite scale {scale}");
            return false;
        }
        let clamped = scale.clamp(self.config.min_scale, self.config.max_scale);
        let changed = clamped != self.scale;
        self.scale = clamped;
        changed
    }

    pub fn zoom_in(&mut self) -> bool {
        self.set_scale(self.scale * self.config.zoom_step)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.set_scale(self.scale / self.config.zoom_step)
    }

    /// Restores scale 1.0 (clamped to the configured range) and a zero offset.
    pub fn reset(&mut self) -> bool {
        let before = (self.scale, self.offset);
        self.scale = 1.0_f32.clamp(self.config.min_scale, self.config.max_scale);
        self.offset = Point(0.0, 0.0);
        before != (self.scale, self.offset)
    }

    /// Sets the pan offset. Non-finite offsets are ignored.
    pub fn set_offset(&mut self, offset: Point) -> bool {
        if !offset.is_finite() {
            debug!("ignoring non-finite offset {offset}");
            return false;
        }
        let changed = offset != self.offset;
        self.offset = offset;
        changed
    }

    /// Pans by a delta amount (px). Does not alter the scale.
    pub fn pan_by(&mut self, dx: f32, dy: f32) -> bool {
        self.set_offset(Point(self.offset.0 + dx, self.offset.1 + dy))
    }

    /// Anchors a drag at `pointer` (px). The offset is not changed until [`Viewport::pan_to`].
    pub fn begin_pan(&self, pointer: Point) -> PanAnchor {
        PanAnchor {
            pointer,
            offset: self.offset,
        }
    }

    /// Moves the offset to the anchored offset plus the pointer travel since the anchor.
    pub fn pan_to(&mut self, anchor: PanAnchor, pointer: Point) -> bool {
        self.set_offset(Point(
            anchor.offset.0 + pointer.0 - anchor.pointer.0,
            anchor.offset.1 + pointer.1 - anchor.pointer.1,
        ))
    }

    /// The on-screen rectangle of a container.
    /// Fails if the rectangle would be degenerate or not finite, in which case nothing should be drawn.
    pub fn container_rect(&self, container: &Container) -> Result<Rect> {
        let bbox = container.bbox();
        self.model_rect(bbox)
            .with_context(|| format!("container {} has no drawable extent", container.id))
    }

    /// The on-screen rectangle of a model-space rectangle
    pub fn model_rect(&self, rect: Rect) -> Result<Rect> {
        let top_left = self.to_screen(Point(rect.x_min, rect.y_min));
        let bottom_right = self.to_screen(Point(rect.x_max, rect.y_max));
        Rect::from_diagonal_corners(top_left, bottom_right)
    }

    /// Picks the (clamped) scale at which the container fits the canvas and clears the offset.
    pub fn fit_to(&mut self, container: &Container, canvas: CanvasSize) -> Result<()> {
        let pad = self.config.padding_px;
        let avail_w = canvas.width as f32 - 2.0 * pad;
        let avail_h = canvas.height as f32 - 2.0 * pad;
        ensure!(
            avail_w > 0.0 && avail_h > 0.0,
            "canvas {}x{} leaves no room after padding of {pad}px",
            canvas.width,
            canvas.height
        );
        let scale_x = avail_w / (container.length_mm * self.config.base_scale);
        let scale_y = avail_h / (container.width_mm * self.config.base_scale);
        let scale = f32::min(scale_x, scale_y);
        ensure!(scale.is_finite(), "container {} cannot be fitted", container.id);

        self.set_scale(scale);
        self.offset = Point(0.0, 0.0);
        Ok(())
    }
}

impl Default for Viewport {
    fn default() -> Self {
        let config = ViewportConfig::default();
        Viewport {
            config,
            scale: 1.0,
            offset: Point(0.0, 0.0),
        }
    }
}
