//! REST collaborator boundary

mod decode;
mod http;

pub use http::PortalClient;

use crate::error::BackendError;
use crate::model::{Campaign, CampaignSummary, Employee, EmployeeGroup, Evaluator, Factor, FactorType, ItemId};
use crate::selection::SavePayload;
use async_trait::async_trait;

/// Backend calls the setup wizard depends on
#[async_trait]
pub trait PortalBackend: Send + Sync {
    async fn list_campaigns(&self) -> Result<Vec<CampaignSummary>, BackendError>;

    async fn get_campaign(&self, id: &ItemId) -> Result<Campaign, BackendError>;

    /// The persisted campaign, when the backend echoes it back
    async fn create_campaign(
        &self,
        payload: &SavePayload,
    ) -> Result<Option<Campaign>, BackendError>;

    async fn update_campaign(
        &self,
        id: &ItemId,
        payload: &SavePayload,
    ) -> Result<Option<Campaign>, BackendError>;

    async fn list_employees(&self, group: EmployeeGroup) -> Result<Vec<Employee>, BackendError>;

    async fn list_evaluators(&self) -> Result<Vec<Evaluator>, BackendError>;

    /// `None` lists every factor regardless of type
    async fn list_factors(&self, kind: Option<FactorType>) -> Result<Vec<Factor>, BackendError>;
}
