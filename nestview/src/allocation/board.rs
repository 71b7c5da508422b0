use anyhow::Result;

use crate::allocation::{AllocationConfirmation, AllocationReport, AllocationSession, Zone};
use crate::events::HostEvents;

/// Drag-and-drop front of an [`AllocationSession`]: every effective move, confirmation and
/// cancellation is forwarded to the host.
pub struct AllocationBoard<E: HostEvents> {
    session: AllocationSession,
    events: E,
}

impl<E: HostEvents> AllocationBoard<E> {
    pub fn new(session: AllocationSession, events: E) -> Self {
        AllocationBoard { session, events }
    }

    pub fn session(&self) -> &AllocationSession {
        &self.session
    }

    pub fn report(&self) -> &AllocationReport {
        self.session.report()
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    /// Drops an item onto `target`.
    pub fn drop_item(&mut self, item_id: u64, target: Zone) -> Result<bool> {
        let moved = self.session.transfer(item_id, target)?;
        if moved {
            self.events.on_layout_modified(&self.session);
        }
        Ok(moved)
    }

    /// Confirms the allocation if the confirm gate allows it.
    pub fn confirm(&mut self) -> Result<AllocationConfirmation> {
        let confirmation = self.session.confirm()?;
        self.events.on_confirm(&confirmation);
        Ok(confirmation)
    }

    pub fn cancel(&mut self) {
        self.session.cancel();
        self.events.on_cancel();
    }

    pub fn into_parts(self) -> (AllocationSession, E) {
        (self.session, self.events)
    }
}
