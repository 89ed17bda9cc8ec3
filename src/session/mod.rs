//! Async side of the setup wizard: catalog loads, campaign loads and saves
//! around the pure reducer in `selection::wizard`.

mod generation;

pub use generation::{Generation, Ticket};

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::backend::PortalBackend;
use crate::error::BackendError;
use crate::model::{
    Campaign, CampaignSummary, Employee, EmployeeGroup, Evaluator, Factor, FactorType, ItemId,
};
use crate::notify::{Notification, Notifier};
use crate::selection::{reduce, WizardAction, WizardState};

/// Master lists the pickers choose from
#[derive(Debug, Default)]
pub struct Catalogs {
    pub campaigns: Vec<CampaignSummary>,
    pub employees: Vec<Employee>,
    pub evaluators: Vec<Evaluator>,
    pub factors: BTreeMap<FactorType, Vec<Factor>>,
}

impl Catalogs {
    /// Employees of the loaded group with the given ids, plus ids not found
    pub fn pick_employees(&self, ids: &[ItemId]) -> (Vec<Employee>, Vec<ItemId>) {
        pick(&self.employees, ids, |e| &e.id)
    }

    pub fn pick_evaluators(&self, ids: &[ItemId]) -> (Vec<Evaluator>, Vec<ItemId>) {
        pick(&self.evaluators, ids, |e| &e.id)
    }

    pub fn find_factor(&self, kind: FactorType, id: &ItemId) -> Option<&Factor> {
        self.factors.get(&kind)?.iter().find(|f| &f.id == id)
    }
}

fn pick<T: Clone>(
    items: &[T],
    ids: &[ItemId],
    id_of: impl Fn(&T) -> &ItemId,
) -> (Vec<T>, Vec<ItemId>) {
    let mut found = Vec::new();
    let mut missing = Vec::new();
    for id in ids {
        match items.iter().find(|item| id_of(*item) == id) {
            Some(item) => found.push(item.clone()),
            None => missing.push(id.clone()),
        }
    }
    (found, missing)
}

#[derive(Debug, Default)]
struct Generations {
    campaign: Generation,
    employees: Generation,
    factors: Generation,
}

pub struct WizardSession {
    state: WizardState,
    catalogs: Catalogs,
    backend: Arc<dyn PortalBackend>,
    notifier: Arc<dyn Notifier>,
    generations: Generations,
    campaign_before_load: Option<ItemId>,
}

impl WizardSession {
    pub fn new(
        backend: Arc<dyn PortalBackend>,
        notifier: Arc<dyn Notifier>,
        group: EmployeeGroup,
    ) -> Self {
        Self {
            state: WizardState::new(group),
            catalogs: Catalogs::default(),
            backend,
            notifier,
            generations: Generations::default(),
            campaign_before_load: None,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    /// Run the reducer and forward its notices. Returns true when the action
    /// was accepted without complaint.
    pub fn dispatch(&mut self, action: WizardAction) -> bool {
        let transition = reduce(&self.state, action);
        self.state = transition.state;
        let accepted = transition.notices.is_empty();
        for notice in transition.notices {
            self.notifier.notify(notice);
        }
        accepted
    }

    pub async fn mount(&mut self) {
        let (campaigns, evaluators) = futures::join!(
            self.backend.list_campaigns(),
            self.backend.list_evaluators()
        );

        match campaigns {
            Ok(campaigns) => self.catalogs.campaigns = campaigns,
            Err(e) => self.report("Failed to load campaigns", &e),
        }
        match evaluators {
            Ok(evaluators) => self.catalogs.evaluators = evaluators,
            Err(e) => self.report("Failed to load evaluators", &e),
        }

        self.reload_employees().await;
        self.load_factor_catalog(self.state.factor_view).await;

        info!(
            "Wizard ready: {} campaigns, {} employees, {} evaluators",
            self.catalogs.campaigns.len(),
            self.catalogs.employees.len(),
            self.catalogs.evaluators.len()
        );
    }

    pub async fn change_group(&mut self, group: EmployeeGroup) {
        self.dispatch(WizardAction::ChangeGroup(group));
        self.reload_employees().await;
    }

    pub async fn view_factor_type(&mut self, kind: FactorType) {
        self.dispatch(WizardAction::ViewFactorType(kind));
        self.load_factor_catalog(kind).await;
    }

    /// Select and fetch a campaign. A failed fetch puts the previous
    /// selection back.
    pub async fn select_campaign(&mut self, id: ItemId) {
        let ticket = self.begin_campaign_load();
        self.dispatch(WizardAction::SelectCampaign(Some(id.clone())));
        let result = self.backend.get_campaign(&id).await;
        let group_before = self.state.group;
        if self.finish_campaign_load(ticket, result) && self.state.group != group_before {
            self.reload_employees().await;
        }
    }

    /// Start a campaign load, remembering the selection to fall back to
    pub fn begin_campaign_load(&mut self) -> Ticket {
        self.campaign_before_load = self.state.campaign.clone();
        self.generations.campaign.issue()
    }

    /// Apply a campaign response if no newer load was started since. Returns
    /// true when the response was applied.
    pub fn finish_campaign_load(
        &mut self,
        ticket: Ticket,
        result: Result<Campaign, BackendError>,
    ) -> bool {
        if !self.generations.campaign.is_current(ticket) {
            debug!("Discarding superseded campaign response");
            return false;
        }
        match result {
            Ok(campaign) => {
                self.campaign_before_load = None;
                debug!("Loaded campaign '{}'", campaign.name);
                self.dispatch(WizardAction::LoadCampaign(campaign));
                true
            }
            Err(e) => {
                let previous = self.campaign_before_load.take();
                if previous != self.state.campaign {
                    debug!("Restoring campaign selection {:?}", previous);
                    self.dispatch(WizardAction::SelectCampaign(previous));
                }
                self.report("Failed to load campaign", &e);
                false
            }
        }
    }

    pub async fn reload_employees(&mut self) {
        let ticket = self.begin_employee_load();
        let result = self.backend.list_employees(self.state.group).await;
        self.finish_employee_load(ticket, result);
    }

    pub fn begin_employee_load(&mut self) -> Ticket {
        self.generations.employees.issue()
    }

    pub fn finish_employee_load(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<Employee>, BackendError>,
    ) -> bool {
        if !self.generations.employees.is_current(ticket) {
            debug!("Discarding superseded employee list");
            return false;
        }
        match result {
            Ok(employees) => {
                self.catalogs.employees = employees;
                true
            }
            Err(e) => {
                self.report("Failed to load employees", &e);
                false
            }
        }
    }

    pub async fn load_factor_catalog(&mut self, kind: FactorType) {
        let ticket = self.begin_factor_load();
        let result = self.backend.list_factors(Some(kind)).await;
        self.finish_factor_load(ticket, kind, result);
    }

    pub fn begin_factor_load(&mut self) -> Ticket {
        self.generations.factors.issue()
    }

    pub fn finish_factor_load(
        &mut self,
        ticket: Ticket,
        kind: FactorType,
        result: Result<Vec<Factor>, BackendError>,
    ) -> bool {
        if !self.generations.factors.is_current(ticket) {
            debug!("Discarding superseded {} factor list", kind);
            return false;
        }
        match result {
            Ok(factors) => {
                self.catalogs.factors.insert(kind, factors);
                true
            }
            Err(e) => {
                self.report("Failed to load factors", &e);
                false
            }
        }
    }

    /// Persist the selections: update when a campaign is selected, create
    /// otherwise. State is left untouched on failure.
    pub async fn save(&mut self) -> bool {
        let payload = self.state.payload();
        let result = match &self.state.campaign {
            Some(id) => self.backend.update_campaign(id, &payload).await,
            None => self.backend.create_campaign(&payload).await,
        };

        if let Err(e) = result {
            self.report("Failed to save campaign", &e);
            return false;
        }

        let created = !self.state.is_editing();
        self.notifier.notify(Notification::success(if created {
            "Campaign created successfully!"
        } else {
            "Campaign updated successfully!"
        }));

        match self.backend.list_campaigns().await {
            Ok(campaigns) => self.catalogs.campaigns = campaigns,
            Err(e) => self.report("Failed to refresh campaigns", &e),
        }

        if created {
            self.dispatch(WizardAction::Reset);
        }
        true
    }

    pub fn reset(&mut self) {
        self.dispatch(WizardAction::Reset);
    }

    fn report(&self, context: &str, error: &BackendError) {
        debug!("{}: {}", context, error);
        self.notifier
            .notify(Notification::error(format!("{}: {}", context, error.user_message())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Numeric;
    use crate::notify::{MemoryNotifier, NotificationKind};
    use crate::selection::{SavePayload, WizardStep};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeBackend {
        campaigns: Vec<CampaignSummary>,
        records: Vec<Campaign>,
        employees: Vec<Employee>,
        evaluators: Vec<Evaluator>,
        factors: Vec<Factor>,
        fail_campaign_list: bool,
        fail_save: bool,
        saved: Mutex<Vec<(Option<ItemId>, SavePayload)>>,
        employee_groups: Mutex<Vec<EmployeeGroup>>,
    }

    fn unavailable() -> BackendError {
        BackendError::Status {
            status: 500,
            message: "Database unavailable".to_string(),
        }
    }

    #[async_trait]
    impl PortalBackend for FakeBackend {
        async fn list_campaigns(&self) -> Result<Vec<CampaignSummary>, BackendError> {
            if self.fail_campaign_list {
                return Err(unavailable());
            }
            Ok(self.campaigns.clone())
        }

        async fn get_campaign(&self, id: &ItemId) -> Result<Campaign, BackendError> {
            self.records
                .iter()
                .find(|c| c.id.as_ref() == Some(id))
                .cloned()
                .ok_or_else(|| BackendError::Status {
                    status: 404,
                    message: "Campaign not found".to_string(),
                })
        }

        async fn create_campaign(
            &self,
            payload: &SavePayload,
        ) -> Result<Option<Campaign>, BackendError> {
            if self.fail_save {
                return Err(unavailable());
            }
            self.saved.lock().unwrap().push((None, payload.clone()));
            Ok(None)
        }

        async fn update_campaign(
            &self,
            id: &ItemId,
            payload: &SavePayload,
        ) -> Result<Option<Campaign>, BackendError> {
            if self.fail_save {
                return Err(unavailable());
            }
            self.saved
                .lock()
                .unwrap()
                .push((Some(id.clone()), payload.clone()));
            Ok(None)
        }

        async fn list_employees(&self, group: EmployeeGroup) -> Result<Vec<Employee>, BackendError> {
            self.employee_groups.lock().unwrap().push(group);
            Ok(self.employees.clone())
        }

        async fn list_evaluators(&self) -> Result<Vec<Evaluator>, BackendError> {
            Ok(self.evaluators.clone())
        }

        async fn list_factors(&self, kind: Option<FactorType>) -> Result<Vec<Factor>, BackendError> {
            Ok(self
                .factors
                .iter()
                .filter(|f| kind.is_none() || f.kind == kind)
                .cloned()
                .collect())
        }
    }

    fn annual_review() -> Campaign {
        let mut campaign = Campaign::new(1, "Annual Review 2025");
        campaign.group = Some(EmployeeGroup::Staff);
        campaign
    }

    fn fixture() -> FakeBackend {
        FakeBackend {
            campaigns: vec![CampaignSummary::new(1, "Annual Review 2025")],
            records: vec![annual_review()],
            employees: vec![Employee::new(10, "Asha")],
            evaluators: vec![Evaluator::new(20, "Bilal")],
            factors: vec![Factor::new(30, "Teamwork").of_kind(FactorType::Qualitative)],
            ..Default::default()
        }
    }

    fn session(backend: FakeBackend) -> (WizardSession, Arc<FakeBackend>, Arc<MemoryNotifier>) {
        let backend = Arc::new(backend);
        let notifier = Arc::new(MemoryNotifier::default());
        let session = WizardSession::new(backend.clone(), notifier.clone(), EmployeeGroup::Staff);
        (session, backend, notifier)
    }

    #[tokio::test]
    async fn test_mount_loads_catalogs() {
        let (mut session, _, notifier) = session(fixture());
        session.mount().await;

        assert_eq!(session.catalogs().campaigns.len(), 1);
        assert_eq!(session.catalogs().employees.len(), 1);
        assert_eq!(session.catalogs().evaluators.len(), 1);
        assert!(session
            .catalogs()
            .find_factor(FactorType::Qualitative, &ItemId::from(30))
            .is_some());
        assert!(notifier.take().is_empty());
    }

    #[tokio::test]
    async fn test_mount_reports_failed_list_and_continues() {
        let (mut session, _, notifier) = session(FakeBackend {
            fail_campaign_list: true,
            ..fixture()
        });
        session.mount().await;

        assert!(session.catalogs().campaigns.is_empty());
        assert_eq!(session.catalogs().evaluators.len(), 1);
        let notices = notifier.take();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NotificationKind::Error);
        assert!(notices[0].message.contains("Database unavailable"));
    }

    #[tokio::test]
    async fn test_change_group_reloads_employees() {
        let (mut session, backend, _) = session(fixture());
        session.change_group(EmployeeGroup::Officer).await;

        assert_eq!(session.state().group, EmployeeGroup::Officer);
        assert_eq!(
            *backend.employee_groups.lock().unwrap(),
            vec![EmployeeGroup::Officer]
        );
    }

    #[test]
    fn test_superseded_campaign_response_is_discarded() {
        let (mut session, _, _) = session(fixture());
        let first = session.begin_campaign_load();
        let second = session.begin_campaign_load();

        assert!(session.finish_campaign_load(second, Ok(Campaign::new(2, "Mid-Year"))));
        assert!(!session.finish_campaign_load(first, Ok(annual_review())));
        assert_eq!(session.state().campaign, Some(ItemId::from(2)));
    }

    #[test]
    fn test_superseded_employee_list_is_discarded() {
        let (mut session, _, _) = session(fixture());
        let stale = session.begin_employee_load();
        let fresh = session.begin_employee_load();

        assert!(session.finish_employee_load(fresh, Ok(vec![Employee::new(11, "Chen")])));
        assert!(!session.finish_employee_load(stale, Ok(vec![Employee::new(10, "Asha")])));
        assert_eq!(session.catalogs().employees[0].id, ItemId::from(11));
    }

    #[tokio::test]
    async fn test_wizard_scenario_saves_update() {
        let (mut session, backend, notifier) = session(fixture());
        session.mount().await;
        session.select_campaign(ItemId::from(1)).await;

        let (employees, missing) = session.catalogs().pick_employees(&[ItemId::from(10)]);
        assert!(missing.is_empty());
        assert!(session.dispatch(WizardAction::ConfirmEmployees(employees)));

        let (evaluators, _) = session.catalogs().pick_evaluators(&[ItemId::from(20)]);
        assert!(session.dispatch(WizardAction::ConfirmEvaluators(evaluators)));
        assert!(session.dispatch(WizardAction::SetEvaluatorLevel {
            id: ItemId::from(20),
            level: Numeric::from("4"),
        }));

        let factor = session
            .catalogs()
            .find_factor(FactorType::Qualitative, &ItemId::from(30))
            .cloned()
            .expect("catalog factor");
        assert!(session.dispatch(WizardAction::ToggleFactor {
            kind: FactorType::Qualitative,
            factor,
        }));
        assert!(session.dispatch(WizardAction::JumpTo(WizardStep::Campaign)));

        assert!(session.save().await);

        let saved = backend.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].0, Some(ItemId::from(1)));
        assert_eq!(
            serde_json::to_value(&saved[0].1).unwrap(),
            serde_json::json!({
                "id": 1,
                "employees": [{"id": 10}],
                "evaluators": [{"id": 20, "level": 4}],
                "factors": [{"id": 30}]
            })
        );
        let notices = notifier.take();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].message, "Campaign updated successfully!");
        // editing keeps the selections in place
        assert_eq!(session.state().counts().employees, 1);
    }

    #[tokio::test]
    async fn test_create_resets_after_success() {
        let (mut session, backend, notifier) = session(fixture());
        session.dispatch(WizardAction::Next);

        assert!(session.save().await);

        assert_eq!(backend.saved.lock().unwrap()[0].0, None);
        assert_eq!(session.state().active_step, WizardStep::Campaign);
        assert_eq!(session.catalogs().campaigns.len(), 1);
        assert_eq!(notifier.take()[0].message, "Campaign created successfully!");
    }

    #[tokio::test]
    async fn test_failed_save_leaves_state_and_notifies_once() {
        let (mut session, _, notifier) = session(FakeBackend {
            fail_save: true,
            ..fixture()
        });
        session.select_campaign(ItemId::from(1)).await;
        session.dispatch(WizardAction::ConfirmEmployees(vec![Employee::new(10, "Asha")]));
        notifier.take();
        let before = session.state().clone();

        assert!(!session.save().await);

        assert_eq!(session.state(), &before);
        let notices = notifier.take();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NotificationKind::Error);
        assert_eq!(notices[0].message, "Failed to save campaign: Database unavailable");
    }

    #[tokio::test]
    async fn test_missing_campaign_restores_previous_selection() {
        let (mut session, _, notifier) = session(fixture());
        session.select_campaign(ItemId::from(99)).await;

        assert_eq!(session.state().campaign, None);
        assert!(session.state().selections.employees.is_empty());
        assert_eq!(notifier.take()[0].message, "Failed to load campaign: Campaign not found");
    }

    #[tokio::test]
    async fn test_failed_campaign_switch_saves_under_loaded_campaign() {
        let (mut session, backend, notifier) = session(fixture());
        session.select_campaign(ItemId::from(1)).await;
        assert!(session.dispatch(WizardAction::ConfirmEmployees(vec![Employee::new(10, "Asha")])));

        session.select_campaign(ItemId::from(2)).await;

        assert_eq!(session.state().campaign, Some(ItemId::from(1)));
        assert_eq!(session.state().selections.employees[0].id, ItemId::from(10));
        assert_eq!(notifier.take().len(), 1);

        assert!(session.save().await);
        let saved = backend.saved.lock().unwrap();
        assert_eq!(saved[0].0, Some(ItemId::from(1)));
        assert_eq!(saved[0].1.id, Some(ItemId::from(1)));
    }

    #[test]
    fn test_superseded_factor_list_is_discarded() {
        let (mut session, _, _) = session(fixture());
        let stale = session.begin_factor_load();
        let fresh = session.begin_factor_load();

        let fresh_list = vec![Factor::new(31, "Sales volume")];
        assert!(session.finish_factor_load(fresh, FactorType::Quantitative, Ok(fresh_list)));
        let stale_list = vec![Factor::new(30, "Teamwork")];
        assert!(!session.finish_factor_load(stale, FactorType::Qualitative, Ok(stale_list)));

        assert!(session.catalogs().factors.get(&FactorType::Qualitative).is_none());
        assert!(session
            .catalogs()
            .find_factor(FactorType::Quantitative, &ItemId::from(31))
            .is_some());
    }
}
