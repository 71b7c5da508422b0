use anyhow::{Context, Result};
use log::debug;

use crate::allocation::{AllocationSession, Capacity};
use crate::entities::{Container, Layout, PlacedItem};
use crate::io::ext_repr::{ExtAllocationPlan, ExtContainer, ExtLayout, ExtPlacedItem};

pub fn import_container(ext: &ExtContainer) -> Result<Container> {
    Container::try_new(
        ext.id,
        ext.name.clone(),
        ext.length_mm,
        ext.width_mm,
        ext.usable_area_mm2,
        ext.resource_capacity,
        ext.max_mass_kg,
    )
}

pub fn import_item(ext: &ExtPlacedItem) -> Result<PlacedItem> {
    let mut item = PlacedItem::try_new(ext.id, ext.x, ext.y, ext.length, ext.width, &ext.label)?
        .with_resource_units(ext.resource_units)
        .with_priority(ext.priority)
        .with_mass(ext.mass_kg);
    if let Some(area) = ext.area_mm2 {
        item = item.with_area(area);
    }
    if let Some(cycle) = &ext.cure_cycle {
        item = item.with_cure_cycle(cycle);
    }
    item.validate()?;
    Ok(item)
}

pub fn import_layout(ext: &ExtLayout) -> Result<Layout> {
    let container = import_container(&ext.container).context("invalid container")?;
    let items = ext
        .items
        .iter()
        .map(|ext_item| {
            import_item(ext_item).with_context(|| format!("invalid item {}", ext_item.id))
        })
        .collect::<Result<Vec<_>>>()?;
    let layout = Layout::try_new(container, items)?;
    debug!(
        "imported layout: container {}, {} items",
        layout.container().id,
        layout.len()
    );
    Ok(layout)
}

pub fn import_allocation_plan(ext: &ExtAllocationPlan) -> Result<AllocationSession> {
    let container_a = import_container(&ext.container_a).context("invalid container A")?;
    let container_b = import_container(&ext.container_b).context("invalid container B")?;
    let items = ext
        .items
        .iter()
        .map(|ext_item| {
            import_item(ext_item).with_context(|| format!("invalid item {}", ext_item.id))
        })
        .collect::<Result<Vec<_>>>()?;

    AllocationSession::new(
        ext.session_id.clone(),
        items,
        Capacity::from(&container_a),
        Capacity::from(&container_b),
    )?
    .with_assignment(ext.assignment.iter().map(|a| (a.item_id, a.zone)))
    .with_context(|| format!("invalid starting assignment of session {}", ext.session_id))
}
