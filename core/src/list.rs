//! View-model behind the todo list page.
//!
//! # Design
//! Filtering happens in two stages. Owner and status go to the server; every
//! change to them issues a fresh fetch. Body and category are applied locally
//! to the last server result, so changing them never touches the network.
//!
//! Fetches are not awaited inside the view-model. Each one is described by a
//! `FetchTicket` carrying a per-instance sequence number; the host runs
//! `TodoService::list_todos` and hands the outcome back through
//! [`TodoListViewModel::complete`]. Only the most recently issued ticket is
//! accepted, so a slow earlier response can never overwrite a newer one.

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::ApiError;
use crate::filter::filter_todos;
use crate::notice::Notice;
use crate::service::TodoService;
use crate::types::{LocalFilters, ServerFilters, Todo};

pub const FETCH_FAILED_MESSAGE: &str = "Problem contacting the server – try again";
const FETCH_FAILED_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewType {
    #[default]
    Card,
    List,
}

/// One issued list fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    filters: ServerFilters,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// The server-side filters this fetch must be issued with.
    pub fn filters(&self) -> &ServerFilters {
        &self.filters
    }
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The result became the new server-filtered set.
    Applied { fetched: usize, displayed: usize },
    /// A newer fetch was issued, or the view-model was torn down.
    Discarded,
    /// The fetch failed; previously displayed todos are kept.
    Failed(Notice),
}

#[derive(Debug, Default)]
pub struct TodoListViewModel {
    server_filters: ServerFilters,
    local_filters: LocalFilters,
    server_filtered: Option<Vec<Todo>>,
    displayed: Option<Vec<Todo>>,
    view_type: ViewType,
    last_issued: u64,
    pending: Option<u64>,
}

impl TodoListViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial load.
    pub fn init(&mut self) -> FetchTicket {
        self.issue_fetch()
    }

    pub fn set_owner(&mut self, owner: Option<String>) -> FetchTicket {
        self.server_filters.owner = owner.filter(|o| !o.is_empty());
        self.issue_fetch()
    }

    pub fn set_status(&mut self, status: Option<bool>) -> FetchTicket {
        self.server_filters.status = status;
        self.issue_fetch()
    }

    pub fn set_body(&mut self, body: Option<String>) {
        self.local_filters.body = body;
        self.update_filter();
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.local_filters.category = category;
        self.update_filter();
    }

    pub fn set_view_type(&mut self, view_type: ViewType) {
        self.view_type = view_type;
    }

    /// Supersede any in-flight fetch with a new one using the current filters.
    pub fn issue_fetch(&mut self) -> FetchTicket {
        self.last_issued += 1;
        self.pending = Some(self.last_issued);
        debug!(seq = self.last_issued, filters = ?self.server_filters, "issuing todo fetch");
        FetchTicket {
            seq: self.last_issued,
            filters: self.server_filters.clone(),
        }
    }

    /// Deliver the result of the fetch described by `ticket`.
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<Todo>, ApiError>,
    ) -> FetchOutcome {
        if self.pending != Some(ticket.seq) {
            debug!(seq = ticket.seq, latest = self.last_issued, "discarding stale todo fetch");
            return FetchOutcome::Discarded;
        }
        self.pending = None;

        match result {
            Ok(todos) => {
                let fetched = todos.len();
                self.server_filtered = Some(todos);
                self.update_filter();
                FetchOutcome::Applied {
                    fetched,
                    displayed: self.displayed.as_ref().map_or(0, Vec::len),
                }
            }
            Err(err) => {
                warn!(error = %err, "couldn't get the list of todos; the server might be down");
                FetchOutcome::Failed(Notice::error(FETCH_FAILED_MESSAGE, FETCH_FAILED_DURATION))
            }
        }
    }

    /// Run the fetch for `ticket` against `service` and apply its result.
    pub async fn load<S: TodoService>(&mut self, service: &S, ticket: FetchTicket) -> FetchOutcome {
        let result = service.list_todos(ticket.filters()).await;
        self.complete(&ticket, result)
    }

    /// Teardown: any fetch still in flight is ignored when it completes.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// The last server result, before local filtering.
    pub fn server_filtered(&self) -> Option<&[Todo]> {
        self.server_filtered.as_deref()
    }

    /// What the view renders. `None` until a fetch has succeeded.
    pub fn displayed(&self) -> Option<&[Todo]> {
        self.displayed.as_deref()
    }

    pub fn server_filters(&self) -> &ServerFilters {
        &self.server_filters
    }

    pub fn local_filters(&self) -> &LocalFilters {
        &self.local_filters
    }

    pub fn view_type(&self) -> ViewType {
        self.view_type
    }

    fn update_filter(&mut self) {
        if let Some(todos) = &self.server_filtered {
            self.displayed = Some(filter_todos(todos, &self.local_filters));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{InMemoryTodoService, ServiceCall};

    fn todos() -> Vec<Todo> {
        vec![
            Todo::persisted("chris_id", "Chris", true, "Ipsum esse est ullamco magna", "homework"),
            Todo::persisted("pat_id", "Pat", false, "Laboris exercitation", "groceries"),
            Todo::persisted("jamie_id", "Jamie", true, "Magna duis", "software design"),
        ]
    }

    fn owners(todos: Option<&[Todo]>) -> Vec<&str> {
        todos
            .unwrap_or_default()
            .iter()
            .map(|t| t.owner.as_str())
            .collect()
    }

    #[test]
    fn nothing_displayed_before_first_fetch() {
        let vm = TodoListViewModel::new();
        assert!(vm.displayed().is_none());
        assert_eq!(vm.view_type(), ViewType::Card);
    }

    #[test]
    fn view_type_switch_keeps_data() {
        let mut vm = TodoListViewModel::new();
        let ticket = vm.init();
        vm.complete(&ticket, Ok(todos()));
        vm.set_view_type(ViewType::List);
        assert_eq!(vm.view_type(), ViewType::List);
        assert_eq!(vm.displayed().map(<[Todo]>::len), Some(3));
    }

    #[test]
    fn applied_fetch_populates_both_sets() {
        let mut vm = TodoListViewModel::new();
        let ticket = vm.init();
        assert!(vm.is_loading());
        let outcome = vm.complete(&ticket, Ok(todos()));
        assert_eq!(outcome, FetchOutcome::Applied { fetched: 3, displayed: 3 });
        assert!(!vm.is_loading());
        assert_eq!(vm.server_filtered().map(<[Todo]>::len), Some(3));
    }

    #[test]
    fn local_filters_rederive_without_fetching() {
        let mut vm = TodoListViewModel::new();
        let ticket = vm.init();
        vm.complete(&ticket, Ok(todos()));

        vm.set_body(Some("agna".to_string()));
        assert_eq!(owners(vm.displayed()), vec!["Chris", "Jamie"]);
        assert!(!vm.is_loading());

        vm.set_category(Some("home".to_string()));
        assert_eq!(owners(vm.displayed()), vec!["Chris"]);

        vm.set_body(None);
        vm.set_category(None);
        assert_eq!(owners(vm.displayed()), vec!["Chris", "Pat", "Jamie"]);
    }

    #[test]
    fn local_filters_apply_to_the_next_result() {
        let mut vm = TodoListViewModel::new();
        vm.set_category(Some("groceries".to_string()));
        let ticket = vm.init();
        vm.complete(&ticket, Ok(todos()));
        assert_eq!(owners(vm.displayed()), vec!["Pat"]);
        assert_eq!(vm.server_filtered().map(<[Todo]>::len), Some(3));
    }

    #[test]
    fn server_filter_change_issues_new_ticket() {
        let mut vm = TodoListViewModel::new();
        let first = vm.init();
        let second = vm.set_status(Some(true));
        assert!(second.seq() > first.seq());
        assert_eq!(second.filters(), &ServerFilters::default().status(true));

        let third = vm.set_owner(Some(String::new()));
        assert_eq!(third.filters().owner, None);
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut vm = TodoListViewModel::new();
        let slow = vm.init();
        let fast = vm.set_owner(Some("Pat".to_string()));

        let pat_only = vec![todos().remove(1)];
        assert!(matches!(vm.complete(&fast, Ok(pat_only)), FetchOutcome::Applied { .. }));
        assert_eq!(vm.complete(&slow, Ok(todos())), FetchOutcome::Discarded);
        assert_eq!(owners(vm.displayed()), vec!["Pat"]);
    }

    #[test]
    fn superseded_response_arriving_first_is_discarded() {
        let mut vm = TodoListViewModel::new();
        let first = vm.init();
        let second = vm.set_status(Some(false));

        assert_eq!(vm.complete(&first, Ok(todos())), FetchOutcome::Discarded);
        assert!(vm.displayed().is_none());
        assert!(matches!(vm.complete(&second, Ok(Vec::new())), FetchOutcome::Applied { .. }));
        assert_eq!(vm.displayed().map(<[Todo]>::len), Some(0));
    }

    #[test]
    fn cancelled_view_model_ignores_completion() {
        let mut vm = TodoListViewModel::new();
        let ticket = vm.init();
        vm.cancel();
        assert_eq!(vm.complete(&ticket, Ok(todos())), FetchOutcome::Discarded);
        assert!(vm.displayed().is_none());
    }

    #[test]
    fn failure_keeps_previous_display() {
        let mut vm = TodoListViewModel::new();
        let ticket = vm.init();
        vm.complete(&ticket, Ok(todos()));

        let ticket = vm.set_status(Some(true));
        let outcome = vm.complete(&ticket, Err(ApiError::Transport("refused".to_string())));
        match outcome {
            FetchOutcome::Failed(notice) => {
                assert_eq!(notice.message, FETCH_FAILED_MESSAGE);
                assert_eq!(notice.duration, Duration::from_secs(3));
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(owners(vm.displayed()), vec!["Chris", "Pat", "Jamie"]);
    }

    #[test]
    fn failure_without_previous_result_leaves_nothing_displayed() {
        let mut vm = TodoListViewModel::new();
        let ticket = vm.init();
        let outcome = vm.complete(&ticket, Err(ApiError::Transport("refused".to_string())));
        assert!(matches!(outcome, FetchOutcome::Failed(_)));
        assert!(vm.displayed().is_none());
    }

    #[tokio::test]
    async fn load_runs_fetch_through_service() {
        let service = InMemoryTodoService::with_todos(todos());
        let mut vm = TodoListViewModel::new();

        let ticket = vm.set_status(Some(true));
        vm.load(&service, ticket).await;
        assert_eq!(owners(vm.displayed()), vec!["Chris", "Jamie"]);

        vm.set_body(Some("duis".to_string()));
        assert_eq!(owners(vm.displayed()), vec!["Jamie"]);

        assert_eq!(
            service.calls(),
            vec![ServiceCall::List(ServerFilters::default().status(true))]
        );
    }
}
