use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::decode;
use super::PortalBackend;
use crate::config::BackendConfig;
use crate::error::BackendError;
use crate::model::{
    Campaign, CampaignSummary, Employee, EmployeeGroup, Evaluator, Factor, FactorBody, FactorType,
    Grade, GradeUpdate, ItemId, NewCampaign, NewGrade, NewTarget, Target,
};
use crate::selection::SavePayload;

/// HTTP client for the portal REST API
#[derive(Clone)]
pub struct PortalClient {
    http: reqwest::Client,
    base: Url,
}

impl PortalClient {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let base = Url::parse(&config.base_url).map_err(|e| BackendError::Url(e.to_string()))?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self { http, base })
    }

    fn url(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| BackendError::Url(format!("{} cannot be a base URL", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!("{} {}", method, url);
        self.http.request(method, url)
    }

    /// Send and return the body of a successful response
    async fn execute(&self, request: RequestBuilder) -> Result<String, BackendError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = decode::error_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });
            debug!("Request failed with {}: {}", status, message);
            return Err(BackendError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        url: Url,
        what: &str,
    ) -> Result<Vec<T>, BackendError> {
        let body = self.execute(self.request(Method::GET, url)).await?;
        Ok(decode::list(&body, what)?)
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: &B,
    ) -> Result<String, BackendError> {
        self.execute(self.request(method, url).json(body)).await
    }

    // Campaign registry screen

    pub async fn register_campaign(
        &self,
        campaign: &NewCampaign,
    ) -> Result<Option<CampaignSummary>, BackendError> {
        let body = self
            .send_json(Method::POST, self.url(&["campaigns"])?, campaign)
            .await?;
        Ok(decode::optional_record(&body))
    }

    pub async fn revise_campaign(
        &self,
        id: &ItemId,
        campaign: &NewCampaign,
    ) -> Result<(), BackendError> {
        let id = id.to_string();
        self.send_json(Method::PUT, self.url(&["campaigns", &id])?, campaign)
            .await?;
        Ok(())
    }

    pub async fn delete_campaign(&self, id: &ItemId) -> Result<(), BackendError> {
        let id = id.to_string();
        let url = self.url(&["campaigns", &id])?;
        self.execute(self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    // Factor catalog screen

    pub async fn create_factor(&self, factor: &FactorBody) -> Result<Option<Factor>, BackendError> {
        let body = self
            .send_json(Method::POST, self.url(&["factors"])?, factor)
            .await?;
        Ok(decode::optional_record(&body))
    }

    pub async fn update_factor(&self, id: &ItemId, factor: &FactorBody) -> Result<(), BackendError> {
        let id = id.to_string();
        self.send_json(Method::PUT, self.url(&["factors", &id])?, factor)
            .await?;
        Ok(())
    }

    pub async fn delete_factor(&self, id: &ItemId) -> Result<(), BackendError> {
        let id = id.to_string();
        let url = self.url(&["factors", &id])?;
        self.execute(self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    // Grade scale screen

    pub async fn list_grades(&self) -> Result<Vec<Grade>, BackendError> {
        self.get_list(self.url(&["grades"])?, "grades").await
    }

    pub async fn create_grade(&self, grade: &NewGrade) -> Result<(), BackendError> {
        self.send_json(Method::POST, self.url(&["grades"])?, grade)
            .await?;
        Ok(())
    }

    pub async fn update_grade(&self, grade: &GradeUpdate) -> Result<(), BackendError> {
        let id = grade.id.to_string();
        self.send_json(Method::PUT, self.url(&["grades", &id])?, grade)
            .await?;
        Ok(())
    }

    /// Grades are deleted by their label
    pub async fn delete_grade(&self, grade: &str) -> Result<(), BackendError> {
        let url = self.url(&["grades", grade])?;
        self.execute(self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    // Target entry screen

    pub async fn list_targets(&self) -> Result<Vec<Target>, BackendError> {
        self.get_list(self.url(&["targets"])?, "targets").await
    }

    pub async fn create_target(&self, target: &NewTarget) -> Result<Option<Target>, BackendError> {
        let body = self
            .send_json(Method::POST, self.url(&["targets"])?, target)
            .await?;
        Ok(decode::optional_record(&body))
    }
}

#[async_trait]
impl PortalBackend for PortalClient {
    async fn list_campaigns(&self) -> Result<Vec<CampaignSummary>, BackendError> {
        self.get_list(self.url(&["campaigns"])?, "campaigns").await
    }

    async fn get_campaign(&self, id: &ItemId) -> Result<Campaign, BackendError> {
        let id = id.to_string();
        let url = self.url(&["campaigns", &id])?;
        let body = self.execute(self.request(Method::GET, url)).await?;
        Ok(decode::record(&body)?)
    }

    async fn create_campaign(
        &self,
        payload: &SavePayload,
    ) -> Result<Option<Campaign>, BackendError> {
        let body = self
            .send_json(Method::POST, self.url(&["campaigns"])?, payload)
            .await?;
        Ok(decode::optional_record(&body))
    }

    async fn update_campaign(
        &self,
        id: &ItemId,
        payload: &SavePayload,
    ) -> Result<Option<Campaign>, BackendError> {
        let id = id.to_string();
        let body = self
            .send_json(Method::PUT, self.url(&["campaigns", &id])?, payload)
            .await?;
        Ok(decode::optional_record(&body))
    }

    async fn list_employees(&self, group: EmployeeGroup) -> Result<Vec<Employee>, BackendError> {
        let mut url = self.url(&["employees"])?;
        url.query_pairs_mut().append_pair("group", group.as_str());
        self.get_list(url, "employees").await
    }

    async fn list_evaluators(&self) -> Result<Vec<Evaluator>, BackendError> {
        self.get_list(self.url(&["evaluators"])?, "evaluators").await
    }

    async fn list_factors(&self, kind: Option<FactorType>) -> Result<Vec<Factor>, BackendError> {
        let mut url = self.url(&["factors"])?;
        if let Some(kind) = kind {
            url.query_pairs_mut().append_pair("type", kind.as_str());
        }
        self.get_list(url, "factors").await
    }
}
