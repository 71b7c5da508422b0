use std::collections::HashSet;

use itertools::Itertools;

use crate::allocation::{AllocationSession, Zone};
use crate::entities::Layout;

/// Every candidate of the session belongs to exactly one zone.
pub fn session_is_exact_partition(session: &AllocationSession) -> bool {
    let members = Zone::ALL
        .iter()
        .flat_map(|z| session.zone(*z).iter().copied())
        .collect_vec();
    let unique = members.iter().copied().collect::<HashSet<u64>>();
    let candidates = session
        .candidates()
        .iter()
        .map(|pi| pi.id)
        .collect::<HashSet<u64>>();

    members.len() == unique.len() && unique == candidates
}

/// The cached metrics of a layout correspond to its items.
pub fn layout_metrics_are_fresh(layout: &Layout) -> bool {
    let area = layout.items().iter().map(|pi| pi.area_mm2).sum::<f32>();
    let units = layout
        .items()
        .iter()
        .map(|pi| u64::from(pi.resource_units))
        .sum::<u64>();
    float_cmp::approx_eq!(f32, area, layout.metrics().utilized_area_mm2, ulps = 8)
        && units == layout.metrics().utilized_resource_units
}
