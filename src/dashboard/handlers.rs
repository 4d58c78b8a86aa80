//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - Route handlers for mounting, loading, sorting and disposing a view
//! - HTML view functions for rendering the listing page and its content

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    AppState, Error,
    api::{ApiClient, ApiError, Balance},
    dashboard::{
        cards::balance_cards,
        registry::{LoadStep, ViewId, ViewRegistry, ViewState},
        sort::{SortColumn, SortState},
        table::transactions_table,
    },
    endpoints::{self, format_endpoint},
    html::{HeadElement, LINK_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
};

/// How long a request for a view that is being loaded by another request
/// waits before asking again.
const LOADING_RETRY_DELAY: &str = "1s";

/// The state needed for the listing page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The client for fetching transactions.
    pub api_client: ApiClient,
    /// The views mounted across all browsers.
    pub views: ViewRegistry,
    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api_client: state.api_client.clone(),
            views: state.views.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Mount a new dashboard view and display the listing page.
///
/// The page loads its balances and transactions with a follow-up request as
/// soon as it is shown.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let view_id = state.views.mount()?;

    Ok(dashboard_view(view_id, &state.local_timezone).into_response())
}

/// Fetch the transactions of a view if it has not been loaded yet and
/// display its balance cards and transactions table.
pub async fn get_dashboard_content(
    State(state): State<DashboardState>,
    Path(view_id): Path<ViewId>,
) -> Response {
    let step = match state.views.begin_load(view_id) {
        Ok(step) => step,
        Err(error) => return error.into_alert_response(),
    };

    let view_state = match step {
        LoadStep::Fetch(ticket) => {
            let result = state.api_client.get_transactions().await.inspect_err(|error| {
                tracing::error!("could not load transactions for view {view_id}: {error}")
            });

            match ticket.finish(result) {
                Ok(view_state) => view_state,
                Err(error) => return error.into_alert_response(),
            }
        }
        LoadStep::Render(view_state) => view_state,
    };

    dashboard_content(view_id, &view_state, &state.local_timezone).into_response()
}

/// Sort the transactions of a view by a column and display the updated table.
pub async fn sort_transactions(
    State(state): State<DashboardState>,
    Path((view_id, column)): Path<(ViewId, SortColumn)>,
) -> Response {
    match state.views.sort(view_id, column) {
        Ok(view_state) => table_for(view_id, &view_state, &state.local_timezone).into_response(),
        Err(error) => error.into_alert_response(),
    }
}

/// Drop the state of a view once its page has been closed.
///
/// Disposing a view that does not exist succeeds, the page may have been
/// closed after the view was evicted.
pub async fn dispose_view(
    State(state): State<DashboardState>,
    Path(view_id): Path<ViewId>,
) -> Response {
    match state.views.dispose(view_id) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error.into_alert_response(),
    }
}

/// Tells the server to drop the view when the page is closed or navigated away from.
fn dispose_script(view_id: ViewId) -> HeadElement {
    let dispose_endpoint = format_endpoint(endpoints::DISPOSE_VIEW, view_id);

    HeadElement::ScriptSource(PreEscaped(format!(
        r#"window.addEventListener("pagehide", () => navigator.sendBeacon("{dispose_endpoint}"));"#
    )))
}

fn dashboard_view(view_id: ViewId, local_timezone: &str) -> Markup {
    let nav_bar = NavBar::new(endpoints::ROOT).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-xl"
            {
                (dashboard_content(view_id, &ViewState::Pending, local_timezone))
            }
        }
    );

    base("Listagem", &[dispose_script(view_id)], &content)
}

/// The balance cards and transactions table of a view.
///
/// Until the view is loaded, the content asks the server for the loaded
/// version of itself and replaces itself with the response.
fn dashboard_content(view_id: ViewId, view_state: &ViewState, local_timezone: &str) -> Markup {
    let content_endpoint = format_endpoint(endpoints::DASHBOARD_CONTENT, view_id);
    let load_trigger = match view_state {
        ViewState::Pending => Some("load".to_owned()),
        ViewState::Loading => Some(format!("load delay:{LOADING_RETRY_DELAY}")),
        ViewState::Ready(_) | ViewState::Failed(_) => None,
    };
    let balance = match view_state {
        ViewState::Ready(dashboard) => dashboard.balance,
        _ => Balance::default(),
    };

    html!(
        div
            id="dashboard-content"
            data-view-id=(view_id)
            class="flex flex-col gap-8"
            hx-get=[load_trigger.is_some().then_some(&content_endpoint)]
            hx-trigger=[load_trigger]
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
        {
            (balance_cards(&balance))

            @if let ViewState::Failed(error) = view_state {
                (load_error_view(error))
            }

            (table_for(view_id, view_state, local_timezone))
        }
    )
}

fn table_for(view_id: ViewId, view_state: &ViewState, local_timezone: &str) -> Markup {
    match view_state {
        ViewState::Ready(dashboard) => transactions_table(
            view_id,
            &dashboard.transactions,
            dashboard.sort,
            local_timezone,
            false,
        ),
        ViewState::Pending | ViewState::Loading => {
            transactions_table(view_id, &[], SortState::default(), local_timezone, true)
        }
        ViewState::Failed(_) => {
            transactions_table(view_id, &[], SortState::default(), local_timezone, false)
        }
    }
}

fn load_error_view(error: &ApiError) -> Markup {
    let details = match error {
        ApiError::Network(_) => "Não foi possível falar com a API de transações.".to_owned(),
        ApiError::Status(status) => {
            format!("A API de transações respondeu com o status {status}.")
        }
        ApiError::MalformedResponse(_) => {
            "A API de transações enviou uma resposta inesperada.".to_owned()
        }
    };

    html!(
        div
            role="alert"
            data-load-error
            class="p-4 text-sm text-red-800 rounded-lg bg-red-50 dark:bg-gray-800 dark:text-red-400"
        {
            span class="font-medium" { "Não foi possível carregar as transações." }
            p class="mt-1" { (details) }
            a href=(endpoints::ROOT) class=(LINK_STYLE) { "Tentar novamente" }
        }
    )
}
