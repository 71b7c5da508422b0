use crate::allocation::{AllocationConfirmation, AllocationSession};

/// Callbacks a host application can implement to follow what happens in a viewer or allocation board.
/// All methods default to doing nothing.
pub trait HostEvents {
    /// An item was clicked (`Some`) or the selection was cleared (`None`)
    fn on_item_selected(&mut self, _item_id: Option<u64>) {}

    /// An item was moved to another container or back to the pool
    fn on_layout_modified(&mut self, _session: &AllocationSession) {}

    /// The user confirmed a valid allocation
    fn on_confirm(&mut self, _confirmation: &AllocationConfirmation) {}

    /// The user abandoned the current session
    fn on_cancel(&mut self) {}
}

/// Ignores every event
#[derive(Clone, Copy, Debug, Default)]
pub struct NoEvents;

impl HostEvents for NoEvents {}
