use anyhow::{Result, ensure};

use crate::entities::Priority;
use crate::geometry::Rect;

/// Represents a work item (a tool carrying parts) positioned inside a container.
/// Position and extent are axis-aligned and expressed in mm, rotation is not modeled.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedItem {
    /// Stable identifier, also used to derive the item's color
    pub id: u64,
    pub x_mm: f32,
    pub y_mm: f32,
    pub length_mm: f32,
    pub width_mm: f32,
    /// Human-readable label, typically the tool code
    pub label: String,
    /// Number of resource units (vacuum lines) the item requires
    pub resource_units: u32,
    pub priority: Priority,
    pub mass_kg: f32,
    /// Footprint of the item, not necessarily equal to `length_mm * width_mm`
    pub area_mm2: f32,
    /// Curing cycle the parts on this item require
    pub cure_cycle: Option<String>,
}

impl PlacedItem {
    /// Creates an item with the footprint of its bounding box and neutral domain attributes.
    pub fn try_new(
        id: u64,
        x_mm: f32,
        y_mm: f32,
        length_mm: f32,
        width_mm: f32,
        label: impl Into<String>,
    ) -> Result<Self> {
        let item = PlacedItem {
            id,
            x_mm,
            y_mm,
            length_mm,
            width_mm,
            label: label.into(),
            resource_units: 0,
            priority: Priority::default(),
            mass_kg: 0.0,
            area_mm2: length_mm * width_mm,
            cure_cycle: None,
        };
        item.validate()?;
        Ok(item)
    }

    pub fn with_mass(mut self, mass_kg: f32) -> Self {
        self.mass_kg = mass_kg;
        self
    }

    pub fn with_area(mut self, area_mm2: f32) -> Self {
        self.area_mm2 = area_mm2;
        self
    }

    pub fn with_resource_units(mut self, resource_units: u32) -> Self {
        self.resource_units = resource_units;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_cure_cycle(mut self, cure_cycle: impl Into<String>) -> Self {
        self.cure_cycle = Some(cure_cycle.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.x_mm.is_finite() && self.y_mm.is_finite(),
            "item {} has a non-finite position: ({}, {})",
            self.id,
            self.x_mm,
            self.y_mm
        );
        ensure!(
            self.length_mm.is_finite()
                && self.width_mm.is_finite()
                && self.length_mm > 0.0
                && self.width_mm > 0.0,
            "item {} has an invalid extent: {} x {}",
            self.id,
            self.length_mm,
            self.width_mm
        );
        ensure!(
            self.mass_kg.is_finite() && self.mass_kg >= 0.0,
            "item {} has an invalid mass: {}",
            self.id,
            self.mass_kg
        );
        ensure!(
            self.area_mm2.is_finite() && self.area_mm2 >= 0.0,
            "item {} has an invalid area: {}",
            self.id,
            self.area_mm2
        );
        Ok(())
    }

    /// The axis-aligned bounding box of the item in model space
    pub fn bbox(&self) -> Rect {
        Rect {
            x_min: self.x_mm,
            y_min: self.y_mm,
            x_max: self.x_mm + self.length_mm,
            y_max: self.y_mm + self.width_mm,
        }
    }
}
