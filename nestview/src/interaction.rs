use log::trace;
use std::fmt::{Display, Formatter};

use crate::entities::{Layout, PlacedItem};
use crate::geometry::Point;
use crate::util::units;
use crate::viewport::{PanAnchor, Viewport};

/// Maximum pointer travel (px) between press and release for it to count as a click rather than a pan
pub const CLICK_TOLERANCE_PX: f32 = 3.0;

/// Returns the item under the pointer (canvas coordinates), if any.
/// Items are tested in layout order: if several overlap at the pointer, the first one wins.
pub fn hit_test<'a>(
    layout: &'a Layout,
    viewport: &Viewport,
    pointer: Point,
) -> Option<&'a PlacedItem> {
    let model = viewport.to_model(pointer);
    if !model.is_finite() {
        return None;
    }
    layout.items().iter().find(|pi| pi.bbox().contains(model))
}

/// What changed as a consequence of a pointer event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Response {
    pub selection_changed: bool,
    pub hover_changed: bool,
    pub viewport_changed: bool,
}

impl Response {
    pub fn needs_redraw(&self) -> bool {
        self.selection_changed || self.hover_changed || self.viewport_changed
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Drag {
    anchor: PanAnchor,
    panning: bool,
}

/// Pointer interaction state: at most one selected item, at most one hovered item and an optional drag.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Interaction {
    selected: Option<u64>,
    hovered: Option<u64>,
    drag: Option<Drag>,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<u64> {
        self.selected
    }

    pub fn hovered(&self) -> Option<u64> {
        self.hovered
    }

    pub fn is_panning(&self) -> bool {
        self.drag.is_some_and(|d| d.panning)
    }

    /// Sets the single selected item, `None` clears the selection. Returns true if it changed.
    pub fn select(&mut self, item_id: Option<u64>) -> bool {
        let changed = self.selected != item_id;
        self.selected = item_id;
        changed
    }

    /// Forgets selection, hover and any ongoing drag, e.g. when a new layout replaces the old one.
    pub fn clear(&mut self) -> Response {
        let response = Response {
            selection_changed: self.selected.is_some(),
            hover_changed: self.hovered.is_some(),
            viewport_changed: false,
        };
        *self = Interaction::default();
        response
    }

    pub fn pointer_down(&mut self, pointer: Point, viewport: &Viewport) {
        self.drag = Some(Drag {
            anchor: viewport.begin_pan(pointer),
            panning: false,
        });
    }

    /// Pans the viewport if a drag is active and keeps the hovered item current.
    pub fn pointer_move(
        &mut self,
        pointer: Point,
        layout: Option<&Layout>,
        viewport: &mut Viewport,
    ) -> Response {
        let mut response = Response::default();

        if let Some(drag) = self.drag.as_mut() {
            if !drag.panning && pointer.distance(drag.anchor.pointer) > CLICK_TOLERANCE_PX {
                drag.panning = true;
            }
            if drag.panning {
                response.viewport_changed = viewport.pan_to(drag.anchor, pointer);
            }
        }

        response.hover_changed = self.update_hover(pointer, layout, viewport);
        response
    }

    /// Ends a drag. If the pointer barely moved, this is a click selecting the item under it
    /// (or clearing the selection when clicking the background), otherwise the pan is completed.
    pub fn pointer_up(
        &mut self,
        pointer: Point,
        layout: Option<&Layout>,
        viewport: &mut Viewport,
    ) -> Response {
        let mut response = Response::default();
        match self.drag.take() {
            Some(drag)
                if !drag.panning && pointer.distance(drag.anchor.pointer) <= CLICK_TOLERANCE_PX =>
            {
                let hit = layout
                    .and_then(|l| hit_test(l, viewport, pointer))
                    .map(|pi| pi.id);
                trace!("click at {pointer} hit {hit:?}");
                response.selection_changed = self.select(hit);
            }
            Some(drag) => {
                response.viewport_changed = viewport.pan_to(drag.anchor, pointer);
            }
            None => {}
        }
        response.hover_changed = self.update_hover(pointer, layout, viewport);
        response
    }

    /// The pointer left the canvas: hover is cleared and any drag is abandoned.
    pub fn pointer_leave(&mut self) -> Response {
        self.drag = None;
        Response {
            hover_changed: self.hovered.take().is_some(),
            ..Response::default()
        }
    }

    fn update_hover(
        &mut self,
        pointer: Point,
        layout: Option<&Layout>,
        viewport: &Viewport,
    ) -> bool {
        let hovered = layout
            .and_then(|l| hit_test(l, viewport, pointer))
            .map(|pi| pi.id);
        let changed = hovered != self.hovered;
        self.hovered = hovered;
        changed
    }
}

/// Lines of text shown when hovering an item
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tooltip {
    pub lines: Vec<String>,
}

impl Tooltip {
    pub fn for_item(item: &PlacedItem) -> Self {
        let mut lines = vec![
            format!("{} (#{})", item.label, item.id),
            format!("{:.0} x {:.0} mm", item.length_mm, item.width_mm),
            format!("mass: {:.1} kg", item.mass_kg),
            format!("area: {:.3} m²", units::mm2_to_m2(item.area_mm2)),
            format!("vacuum lines: {}", item.resource_units),
            format!("priority: {}", item.priority.label()),
        ];
        if let Some(cycle) = &item.cure_cycle {
            lines.push(format!("cure cycle: {cycle}"));
        }
        Tooltip { lines }
    }
}

impl Display for Tooltip {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}
