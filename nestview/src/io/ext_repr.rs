use serde::{Deserialize, Serialize};

use crate::allocation::Zone;
use crate::entities::Priority;

/// External representation of a [`Container`](crate::entities::Container).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtContainer {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub length_mm: f32,
    pub width_mm: f32,
    /// Full rectangular surface if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usable_area_mm2: Option<f32>,
    /// Number of vacuum lines
    #[serde(alias = "vacuumLines")]
    pub resource_capacity: u32,
    pub max_mass_kg: f32,
}

/// External representation of a [`PlacedItem`](crate::entities::PlacedItem).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtPlacedItem {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub length: f32,
    pub width: f32,
    #[serde(alias = "toolCode")]
    pub label: String,
    #[serde(default, alias = "vacuumLines")]
    pub resource_units: u32,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub mass_kg: f32,
    /// Area of the bounding box if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_mm2: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cure_cycle: Option<String>,
}

/// Metrics reported alongside a layout. They are informative only: on import, metrics are recomputed
/// from the items.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtLayoutMetrics {
    pub utilized_area_mm2: f32,
    pub utilized_resource_units: u64,
    pub efficiency: f32,
}

/// External representation of a [`Layout`](crate::entities::Layout).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtLayout {
    pub container: ExtContainer,
    pub items: Vec<ExtPlacedItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<ExtLayoutMetrics>,
}

/// Zone an item starts in when an allocation plan is loaded
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtAssignment {
    pub item_id: u64,
    pub zone: Zone,
}

/// External representation of an [`AllocationSession`](crate::allocation::AllocationSession):
/// two containers, the candidate items and an optional starting assignment.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtAllocationPlan {
    pub session_id: String,
    pub container_a: ExtContainer,
    pub container_b: ExtContainer,
    pub items: Vec<ExtPlacedItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignment: Vec<ExtAssignment>,
}
