use anyhow::{Result, ensure};

use crate::geometry::Rect;
use crate::util::units;

/// A [`Container`] is the bounded surface (an autoclave bed) in which items are placed.
/// Besides its surface, it limits the total mass it can carry and the number of vacuum lines
/// (resource units) it offers.
#[derive(Clone, Debug, PartialEq)]
pub struct Container {
    pub id: u64,
    pub name: String,
    /// Extent along the x-axis
    pub length_mm: f32,
    /// Extent along the y-axis
    pub width_mm: f32,
    /// Usable surface, can be smaller than `length_mm * width_mm`
    pub usable_area_mm2: f32,
    /// Number of resource units (vacuum lines) available
    pub resource_capacity: u32,
    pub max_mass_kg: f32,
}

impl Container {
    /// Creates a new container. If no usable area is given, the full rectangular surface is usable.
    pub fn try_new(
        id: u64,
        name: impl Into<String>,
        length_mm: f32,
        width_mm: f32,
        usable_area_mm2: Option<f32>,
        resource_capacity: u32,
        max_mass_kg: f32,
    ) -> Result<Self> {
        let container = Container {
            id,
            name: name.into(),
            length_mm,
            width_mm,
            usable_area_mm2: usable_area_mm2.unwrap_or(length_mm * width_mm),
            resource_capacity,
            max_mass_kg,
        };
        container.validate()?;
        Ok(container)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.length_mm.is_finite() && self.length_mm > 0.0,
            "container {} has an invalid length: {}",
            self.id,
            self.length_mm
        );
        ensure!(
            self.width_mm.is_finite() && self.width_mm > 0.0,
            "container {} has an invalid width: {}",
            self.id,
            self.width_mm
        );
        ensure!(
            self.usable_area_mm2.is_finite() && self.usable_area_mm2 > 0.0,
            "container {} has an invalid usable area: {}",
            self.id,
            self.usable_area_mm2
        );
        ensure!(
            self.resource_capacity > 0,
            "container {} offers no resource units",
            self.id
        );
        ensure!(
            self.max_mass_kg.is_finite() && self.max_mass_kg > 0.0,
            "container {} has an invalid mass capacity: {}",
            self.id,
            self.max_mass_kg
        );
        Ok(())
    }

    /// The surface of the container in model space, with its origin at (0, 0)
    pub fn bbox(&self) -> Rect {
        Rect {
            x_min: 0.0,
            y_min: 0.0,
            x_max: self.length_mm,
            y_max: self.width_mm,
        }
    }

    pub fn area_m2(&self) -> f32 {
        units::mm2_to_m2(self.usable_area_mm2)
    }
}
