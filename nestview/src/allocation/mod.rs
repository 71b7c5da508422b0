mod board;
mod report;
mod session;

#[doc(inline)]
pub use board::AllocationBoard;

#[doc(inline)]
pub use report::{AllocationReport, Capacity, Constraint, Violation, ZoneLoad, ZoneReport};

#[doc(inline)]
pub use session::{AllocationConfirmation, AllocationSession, Zone};
