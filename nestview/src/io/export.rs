use crate::entities::{Container, Layout, PlacedItem};
use crate::io::ext_repr::{ExtContainer, ExtLayout, ExtLayoutMetrics, ExtPlacedItem};

pub fn export_container(container: &Container) -> ExtContainer {
    ExtContainer {
        id: container.id,
        name: container.name.clone(),
        length_mm: container.length_mm,
        width_mm: container.width_mm,
        usable_area_mm2: Some(container.usable_area_mm2),
        resource_capacity: container.resource_capacity,
        max_mass_kg: container.max_mass_kg,
    }
}

pub fn export_item(item: &PlacedItem) -> ExtPlacedItem {
    ExtPlacedItem {
        id: item.id,
        x: item.x_mm,
        y: item.y_mm,
        length: item.length_mm,
        width: item.width_mm,
        label: item.label.clone(),
        resource_units: item.resource_units,
        priority: item.priority,
        mass_kg: item.mass_kg,
        area_mm2: Some(item.area_mm2),
        cure_cycle: item.cure_cycle.clone(),
    }
}

pub fn export_layout(layout: &Layout) -> ExtLayout {
    let metrics = layout.metrics();
    ExtLayout {
        container: export_container(layout.container()),
        items: layout.items().iter().map(export_item).collect(),
        metrics: Some(ExtLayoutMetrics {
            utilized_area_mm2: metrics.utilized_area_mm2,
            utilized_resource_units: metrics.utilized_resource_units,
            efficiency: metrics.efficiency,
        }),
    }
}
