use anyhow::{Result, bail, ensure};
use itertools::Itertools;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use crate::allocation::{AllocationReport, Capacity, ZoneLoad, ZoneReport};
use crate::entities::PlacedItem;
use crate::util::assertions;

/// The three disjoint sets an item can belong to during a manual allocation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    /// Not assigned to any container yet
    Pool,
    A,
    B,
}

impl Zone {
    pub const ALL: [Zone; 3] = [Zone::Pool, Zone::A, Zone::B];

    pub fn label(&self) -> &'static str {
        match self {
            Zone::Pool => "unassigned",
            Zone::A => "container A",
            Zone::B => "container B",
        }
    }

    fn index(&self) -> usize {
        match self {
            Zone::Pool => 0,
            Zone::A => 1,
            Zone::B => 2,
        }
    }
}

impl Display for Zone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// What gets submitted to the backend once a manual split is confirmed
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationConfirmation {
    pub session_id: String,
    pub container_a: Vec<u64>,
    pub container_b: Vec<u64>,
}

/// Manual distribution of candidate items over two containers.
///
/// Every candidate belongs to exactly one [`Zone`] at all times. Moving an item removes it from its
/// zone and appends it to the destination in a single step, after which the [`AllocationReport`]
/// is recomputed.
#[derive(Clone, Debug)]
pub struct AllocationSession {
    id: String,
    /// All candidates, in their original order
    candidates: Vec<PlacedItem>,
    /// Item id to index in `candidates`
    index: HashMap<u64, usize>,
    /// Item ids per zone, in insertion order
    members: [Vec<u64>; 3],
    /// Membership the session started from, restored on cancel
    initial: [Vec<u64>; 3],
    capacity_a: Capacity,
    capacity_b: Capacity,
    report: AllocationReport,
}

impl AllocationSession {
    /// Creates a session with every candidate in the unassigned pool.
    pub fn new(
        id: impl Into<String>,
        candidates: Vec<PlacedItem>,
        capacity_a: Capacity,
        capacity_b: Capacity,
    ) -> Result<Self> {
        let id = id.into();
        capacity_a.validate()?;
        capacity_b.validate()?;
        for pi in &candidates {
            pi.validate()?;
        }
        let duplicates = candidates.iter().map(|pi| pi.id).duplicates().collect_vec();
        ensure!(
            duplicates.is_empty(),
            "allocation session {id} contains duplicate item ids: {duplicates:?}"
        );

        let index = candidates
            .iter()
            .enumerate()
            .map(|(i, pi)| (pi.id, i))
            .collect::<HashMap<_, _>>();
        let pool = candidates.iter().map(|pi| pi.id).collect_vec();
        let members = [pool, vec![], vec![]];

        let report = Self::evaluate(&candidates, &index, &members, capacity_a, capacity_b);
        let session = AllocationSession {
            id,
            candidates,
            index,
            initial: members.clone(),
            members,
            capacity_a,
            capacity_b,
            report,
        };
        debug_assert!(assertions::session_is_exact_partition(&session));
        Ok(session)
    }

    /// Applies a starting assignment (e.g. the split proposed by the backend).
    /// Items not mentioned stay in the pool. The result becomes the state restored by [`AllocationSession::cancel`].
    pub fn with_assignment(
        mut self,
        assignment: impl IntoIterator<Item = (u64, Zone)>,
    ) -> Result<Self> {
        for (item_id, zone) in assignment {
            self.transfer(item_id, zone)?;
        }
        self.initial = self.members.clone();
        Ok(self)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn candidates(&self) -> &[PlacedItem] {
        &self.candidates
    }

    pub fn item(&self, item_id: u64) -> Option<&PlacedItem> {
        self.index.get(&item_id).map(|i| &self.candidates[*i])
    }

    pub fn capacity(&self, zone: Zone) -> Option<Capacity> {
        match zone {
            Zone::A => Some(self.capacity_a),
            Zone::B => Some(self.capacity_b),
            Zone::Pool => None,
        }
    }

    /// Ids of the items currently in `zone`, in the order they were added
    pub fn zone(&self, zone: Zone) -> &[u64] {
        &self.members[zone.index()]
    }

    pub fn zone_items(&self, zone: Zone) -> impl Iterator<Item = &PlacedItem> {
        self.members[zone.index()]
            .iter()
            .map(|id| &self.candidates[self.index[id]])
    }

    pub fn zone_of(&self, item_id: u64) -> Option<Zone> {
        Zone::ALL
            .into_iter()
            .find(|z| self.members[z.index()].contains(&item_id))
    }

    pub fn report(&self) -> &AllocationReport {
        &self.report
    }

    pub fn can_confirm(&self) -> bool {
        self.report.confirmable
    }

    /// Moves an item to `to`. Returns false if it already was there (nothing changes).
    pub fn transfer(&mut self, item_id: u64, to: Zone) -> Result<bool> {
        let Some((from, pos)) = Zone::ALL.into_iter().find_map(|z| {
            self.members[z.index()]
                .iter()
                .position(|id| *id == item_id)
                .map(|pos| (z, pos))
        }) else {
            bail!("item {item_id} is not part of allocation session {}", self.id);
        };
        if from == to {
            return Ok(false);
        }

        self.members[from.index()].remove(pos);
        self.members[to.index()].push(item_id);

        self.refresh_report();
        debug!(
            "session {}: moved item {item_id} from {from} to {to}, valid: {}",
            self.id, self.report.valid
        );
        debug_assert!(assertions::session_is_exact_partition(self));
        Ok(true)
    }

    /// Produces the confirmation to submit, only if the allocation is within capacity and not empty.
    pub fn confirm(&self) -> Result<AllocationConfirmation> {
        ensure!(
            self.report.valid,
            "allocation session {} exceeds capacity: {}",
            self.id,
            self.report.violations().iter().join("; ")
        );
        ensure!(
            self.report.confirmable,
            "allocation session {} has no items assigned to either container",
            self.id
        );
        info!(
            "session {}: confirming {} items in A, {} items in B",
            self.id,
            self.zone(Zone::A).len(),
            self.zone(Zone::B).len()
        );
        Ok(AllocationConfirmation {
            session_id: self.id.clone(),
            container_a: self.zone(Zone::A).to_vec(),
            container_b: self.zone(Zone::B).to_vec(),
        })
    }

    /// Discards all manual moves, restoring the starting assignment.
    pub fn cancel(&mut self) {
        self.members = self.initial.clone();
        self.refresh_report();
        debug_assert!(assertions::session_is_exact_partition(self));
    }

    fn refresh_report(&mut self) {
        self.report = Self::evaluate(
            &self.candidates,
            &self.index,
            &self.members,
            self.capacity_a,
            self.capacity_b,
        );
    }

    fn evaluate(
        candidates: &[PlacedItem],
        index: &HashMap<u64, usize>,
        members: &[Vec<u64>; 3],
        capacity_a: Capacity,
        capacity_b: Capacity,
    ) -> AllocationReport {
        let load = |zone: Zone| {
            ZoneLoad::of(
                members[zone.index()]
                    .iter()
                    .map(|id| &candidates[index[id]]),
            )
        };
        AllocationReport::evaluate(
            ZoneReport::evaluate(Zone::A, load(Zone::A), capacity_a),
            ZoneReport::evaluate(Zone::B, load(Zone::B), capacity_b),
        )
    }
}
