use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::allocation::Zone;
use crate::entities::{Container, PlacedItem};
use crate::util::units;

/// Capacity limits of one container in an allocation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capacity {
    pub max_mass_kg: f32,
    pub area_mm2: f32,
    pub resource_units: u32,
}

impl Capacity {
    pub fn try_new(max_mass_kg: f32, area_mm2: f32, resource_units: u32) -> Result<Self> {
        let capacity = Capacity {
            max_mass_kg,
            area_mm2,
            resource_units,
        };
        capacity.validate()?;
        Ok(capacity)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.max_mass_kg.is_finite() && self.max_mass_kg > 0.0,
            "invalid mass capacity: {}",
            self.max_mass_kg
        );
        ensure!(
            self.area_mm2.is_finite() && self.area_mm2 > 0.0,
            "invalid area capacity: {}",
            self.area_mm2
        );
        ensure!(self.resource_units > 0, "resource unit capacity must be positive");
        Ok(())
    }
}

impl From<&Container> for Capacity {
    fn from(container: &Container) -> Self {
        Capacity {
            max_mass_kg: container.max_mass_kg,
            area_mm2: container.usable_area_mm2,
            resource_units: container.resource_capacity,
        }
    }
}

/// Aggregate load of the items assigned to one container
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneLoad {
    pub count: usize,
    pub mass_kg: f32,
    pub area_mm2: f32,
    /// Summed in `u64`, the demand of many items can exceed the per-item `u32` range
    pub resource_units: u64,
}

impl ZoneLoad {
    pub fn of<'a>(items: impl IntoIterator<Item = &'a PlacedItem>) -> Self {
        items.into_iter().fold(ZoneLoad::default(), |load, pi| ZoneLoad {
            count: load.count + 1,
            mass_kg: load.mass_kg + pi.mass_kg,
            area_mm2: load.area_mm2 + pi.area_mm2,
            resource_units: load.resource_units + u64::from(pi.resource_units),
        })
    }
}

/// The three independent capacity dimensions of a container
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    Mass,
    Area,
    ResourceUnits,
}

impl Constraint {
    pub const ALL: [Constraint; 3] = [
        Constraint::Mass,
        Constraint::Area,
        Constraint::ResourceUnits,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Constraint::Mass => "mass",
            Constraint::Area => "area",
            Constraint::ResourceUnits => "vacuum lines",
        }
    }
}

/// Load and utilization of one container, together with the capacity dimensions it exceeds
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneReport {
    pub zone: Zone,
    pub load: ZoneLoad,
    pub capacity: Capacity,
    pub mass_pct: f32,
    pub area_pct: f32,
    pub resource_pct: f32,
    pub violations: Vec<Constraint>,
}

impl ZoneReport {
    pub fn evaluate(zone: Zone, load: ZoneLoad, capacity: Capacity) -> Self {
        let violations = Constraint::ALL
            .into_iter()
            .filter(|c| match c {
                Constraint::Mass => load.mass_kg > capacity.max_mass_kg,
                Constraint::Area => load.area_mm2 > capacity.area_mm2,
                Constraint::ResourceUnits => {
                    load.resource_units > u64::from(capacity.resource_units)
                }
            })
            .collect();

        ZoneReport {
            zone,
            load,
            capacity,
            mass_pct: units::percentage(load.mass_kg, capacity.max_mass_kg),
            area_pct: units::percentage(load.area_mm2, capacity.area_mm2),
            resource_pct: units::percentage(
                load.resource_units as f32,
                capacity.resource_units as f32,
            ),
            violations,
        }
    }

    pub fn is_within_capacity(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.load.count == 0
    }

    pub fn utilization(&self, constraint: Constraint) -> f32 {
        match constraint {
            Constraint::Mass => self.mass_pct,
            Constraint::Area => self.area_pct,
            Constraint::ResourceUnits => self.resource_pct,
        }
    }
}

/// A single exceeded capacity dimension, shown to the user as a warning
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub zone: Zone,
    pub constraint: Constraint,
    pub utilization_pct: f32,
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} exceeds its {} capacity ({:.1}%)",
            self.zone.label(),
            self.constraint.label(),
            self.utilization_pct
        )
    }
}

/// Result of validating a two-container allocation
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationReport {
    pub a: ZoneReport,
    pub b: ZoneReport,
    /// Both containers are within all of their capacities
    pub valid: bool,
    /// Valid and at least one container holds an item
    pub confirmable: bool,
}

impl AllocationReport {
    pub fn evaluate(a: ZoneReport, b: ZoneReport) -> Self {
        let valid = a.is_within_capacity() && b.is_within_capacity();
        let confirmable = valid && !(a.is_empty() && b.is_empty());
        AllocationReport {
            a,
            b,
            valid,
            confirmable,
        }
    }

    pub fn zone(&self, zone: Zone) -> Option<&ZoneReport> {
        match zone {
            Zone::A => Some(&self.a),
            Zone::B => Some(&self.b),
            Zone::Pool => None,
        }
    }

    /// One entry per violated dimension per container
    pub fn violations(&self) -> Vec<Violation> {
        [&self.a, &self.b]
            .into_iter()
            .flat_map(|zr| {
                zr.violations.iter().map(|c| Violation {
                    zone: zr.zone,
                    constraint: *c,
                    utilization_pct: zr.utilization(*c),
                })
            })
            .collect()
    }
}
