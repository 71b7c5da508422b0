use anyhow::Result;
use async_trait::async_trait;
use nestview::allocation::AllocationConfirmation;
use nestview::entities::Layout;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Asks the backend to compute a layout for a set of work orders on one autoclave
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRequest {
    pub autoclave_id: u64,
    #[serde(default)]
    pub work_order_ids: Vec<u64>,
    /// Overrides the stored optimizer parameters for this request only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<OptimizerParameters>,
}

/// Weighting parameters of the nesting optimizer.
/// They are not interpreted here: fields unknown to this version are kept and sent back
/// as they were received.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct OptimizerParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cure_cycle_weight: Option<f64>,
    /// Minimal spacing between items (mm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing_mm: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Acknowledgment of a write request
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Ack {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// The operations of the nesting backend this crate consumes
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NestingApi: Send + Sync {
    /// Requests a freshly computed layout
    async fn fetch_layout(&self, request: &LayoutRequest) -> Result<Layout>;

    /// Persists a manually adjusted two-container split
    async fn confirm_allocation(&self, confirmation: &AllocationConfirmation) -> Result<Ack>;

    async fn get_optimizer_parameters(&self) -> Result<OptimizerParameters>;

    async fn update_optimizer_parameters(&self, parameters: &OptimizerParameters) -> Result<Ack>;
}
