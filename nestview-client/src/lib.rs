//! Access to the nesting backend: fetching freshly computed layouts, confirming manual
//! allocations and round-tripping optimizer parameters.

/// Request and response types, and the [`NestingApi`](api::NestingApi) trait
pub mod api;

/// [`NestingApi`](api::NestingApi) over HTTP/JSON
pub mod http;

/// Loading layouts without letting stale responses overwrite newer ones
pub mod loader;

mod submit;

pub use api::{Ack, LayoutRequest, NestingApi, OptimizerParameters};
pub use http::HttpNestingApi;
pub use loader::{LayoutLoader, LoadOutcome};
pub use submit::submit_allocation;
