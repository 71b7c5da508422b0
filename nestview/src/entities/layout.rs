use anyhow::{Result, ensure};
use itertools::Itertools;
use log::warn;

use crate::entities::{Container, PlacedItem};
use crate::util::assertions;

/// A [`Layout`] is an immutable snapshot of items placed in a container, as computed by the nesting backend.
/// Layouts are never merged or diffed, a new layout replaces the previous one entirely.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    container: Container,
    /// The placed items, in the order they were received
    items: Vec<PlacedItem>,
    metrics: LayoutMetrics,
}

/// Aggregate metrics derived from the items of a [`Layout`]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LayoutMetrics {
    pub utilized_area_mm2: f32,
    pub utilized_resource_units: u64,
    /// Ratio of the utilized area to the usable area of the container
    pub efficiency: f32,
}

impl Layout {
    pub fn try_new(container: Container, items: Vec<PlacedItem>) -> Result<Self> {
        container.validate()?;
        for item in &items {
            item.validate()?;
        }
        let duplicates = items.iter().map(|pi| pi.id).duplicates().collect_vec();
        ensure!(
            duplicates.is_empty(),
            "layout contains duplicate item ids: {duplicates:?}"
        );

        let bounds = container.bbox();
        for item in &items {
            let bbox = item.bbox();
            if bbox.x_min < bounds.x_min
                || bbox.y_min < bounds.y_min
                || bbox.x_max > bounds.x_max
                || bbox.y_max > bounds.y_max
            {
                warn!(
                    "item {} ({}) extends beyond container {} ({})",
                    item.id, item.label, container.id, container.name
                );
            }
        }

        let metrics = LayoutMetrics::compute(&container, &items);
        let layout = Layout {
            container,
            items,
            metrics,
        };
        debug_assert!(assertions::layout_metrics_are_fresh(&layout));
        Ok(layout)
    }

    /// The container used for this layout
    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn items(&self) -> &[PlacedItem] {
        &self.items
    }

    pub fn item(&self, id: u64) -> Option<&PlacedItem> {
        self.items.iter().find(|pi| pi.id == id)
    }

    pub fn metrics(&self) -> LayoutMetrics {
        self.metrics
    }

    /// True if no items are placed
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl LayoutMetrics {
    fn compute(container: &Container, items: &[PlacedItem]) -> Self {
        let utilized_area_mm2 = items.iter().map(|pi| pi.area_mm2).sum::<f32>();
        let utilized_resource_units = items
            .iter()
            .map(|pi| u64::from(pi.resource_units))
            .sum::<u64>();
        let efficiency = match container.usable_area_mm2 > 0.0 {
            true => utilized_area_mm2 / container.usable_area_mm2,
            false => 0.0,
        };
        LayoutMetrics {
            utilized_area_mm2,
            utilized_resource_units,
            efficiency,
        }
    }
}
