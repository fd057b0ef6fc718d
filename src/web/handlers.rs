//! HTTP request handlers

use super::screens::Screen;
use super::state::AppState;
use crate::autocomplete::FieldConfig;
use crate::forms::SubmitError;
use crate::listing::{ListParams, Pagination};
use crate::lookup::{fetch_options, AutocompleteOption, LookupError, LookupSource};
use crate::network::TOTAL_COUNT_HEADER;
use crate::notify::RecordingNotifier;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use futures::future::join_all;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tera::Context;
use tracing::{error, info, warn};

/// Id of the "new record" detail page
const NEW_RECORD_ID: &str = "nova";

const HOME_PATH: &str = "/pagina-inicial";

#[derive(Debug, Serialize)]
struct OptionView {
    id: String,
    label: String,
    selected: bool,
}

#[derive(Debug, Serialize)]
struct InputView {
    name: String,
    label: String,
    kind: &'static str,
    /// Lookup source queried by the picker's search box
    source: &'static str,
    value: String,
    error: Option<String>,
    options: Vec<OptionView>,
}

fn render(state: &AppState, template: &str, ctx: &Context, status: StatusCode) -> Response {
    match state.templates.render_with_context(template, ctx) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!("Template error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

fn base_context(state: &AppState) -> Context {
    let mut ctx = Context::new();
    ctx.insert("instance_name", state.instance_name());
    ctx
}

/// `/` and unknown paths land on the dashboard
pub async fn root() -> Redirect {
    Redirect::to(HOME_PATH)
}

/// Dashboard handler
pub async fn dashboard(State(state): State<AppState>) -> Response {
    render(&state, "dashboard.html", &base_context(&state), StatusCode::OK)
}

pub async fn entities_list(state: State<AppState>, params: Query<ListParams>) -> Response {
    list_page(Screen::Entities, state, params).await
}

pub async fn work_orders_list(state: State<AppState>, params: Query<ListParams>) -> Response {
    list_page(Screen::WorkOrders, state, params).await
}

async fn list_page(
    screen: Screen,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Response {
    let filter = params.filter();
    let page_size = state.page_size();

    let mut ctx = base_context(&state);
    ctx.insert("title", screen.title());
    ctx.insert("list_path", screen.list_path());
    ctx.insert("new_path", &screen.new_path());
    ctx.insert("columns", screen.columns());
    if params.criado.is_some() {
        if let Some(notice) = screen.created_message() {
            ctx.insert("notice", notice);
        }
    }
    ctx.insert("busca", &filter);
    ctx.insert(
        "query_suffix",
        &if filter.is_empty() {
            String::new()
        } else {
            format!("&busca={}", urlencoding::encode(&filter))
        },
    );

    let listed = screen
        .rows(&state.client, params.page(), &filter, page_size)
        .await;
    let (rows, total, status) = match listed {
        Ok(page) => (page.data, page.total_count, StatusCode::OK),
        Err(e) => {
            warn!("Could not list {}: {}", screen.list_path(), e);
            ctx.insert("message", &e.to_string());
            (Vec::new(), 0, StatusCode::BAD_GATEWAY)
        }
    };

    let pagination = Pagination::new(params.page(), page_size, total);
    ctx.insert("rows", &rows);
    ctx.insert("total", &total);
    ctx.insert("page", &pagination.page);
    ctx.insert("pages", &pagination.pages());
    ctx.insert("show_pagination", &pagination.show_pagination());
    ctx.insert("has_previous", &pagination.has_previous());
    ctx.insert("has_next", &pagination.has_next());
    ctx.insert("previous_page", &pagination.page.saturating_sub(1));
    ctx.insert("next_page", &pagination.page.saturating_add(1));
    if pagination.is_empty() {
        ctx.insert("empty_message", &state.settings.ui.empty_listing_message);
    }

    render(&state, "list.html", &ctx, status)
}

pub async fn entity_detail(state: State<AppState>, id: Path<String>) -> Response {
    detail_page(Screen::Entities, state, id).await
}

pub async fn work_order_detail(state: State<AppState>, id: Path<String>) -> Response {
    detail_page(Screen::WorkOrders, state, id).await
}

pub async fn entity_submit(
    state: State<AppState>,
    id: Path<String>,
    form: Form<BTreeMap<String, String>>,
) -> Response {
    detail_submit(Screen::Entities, state, id, form).await
}

pub async fn work_order_submit(
    state: State<AppState>,
    id: Path<String>,
    form: Form<BTreeMap<String, String>>,
) -> Response {
    detail_submit(Screen::WorkOrders, state, id, form).await
}

async fn detail_page(screen: Screen, State(state): State<AppState>, Path(id): Path<String>) -> Response {
    if id != NEW_RECORD_ID {
        return Redirect::to(screen.list_path()).into_response();
    }
    render_detail(&state, screen, &BTreeMap::new(), &BTreeMap::new(), None, StatusCode::OK).await
}

async fn detail_submit(
    screen: Screen,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(values): Form<BTreeMap<String, String>>,
) -> Response {
    if id != NEW_RECORD_ID {
        return Redirect::to(screen.list_path()).into_response();
    }

    let notifier = Arc::new(RecordingNotifier::new());
    let ctx = state.field_context(notifier.clone());

    match screen.submit(&state.client, &ctx, &values).await {
        Ok(id) => {
            info!("Created record {} from {}", id, screen.new_path());
            Redirect::to(&format!("{}?criado={}", screen.list_path(), id)).into_response()
        }
        Err(SubmitError::Validation(errors)) => {
            let errors = errors.into_map();
            render_detail(&state, screen, &values, &errors, None, StatusCode::BAD_REQUEST).await
        }
        Err(SubmitError::Api(e)) => {
            let alerts = notifier.take();
            let message = if alerts.is_empty() {
                e.to_string()
            } else {
                alerts.join(" ")
            };
            let no_errors = BTreeMap::new();
            render_detail(
                &state,
                screen,
                &values,
                &no_errors,
                Some(&message),
                StatusCode::BAD_GATEWAY,
            )
            .await
        }
    }
}

/// Render a detail form, fetching every picker's first options concurrently.
///
/// A posted value missing from those options stays selectable so that the
/// next submit sends it again.
async fn render_detail(
    state: &AppState,
    screen: Screen,
    values: &BTreeMap<String, String>,
    errors: &BTreeMap<String, String>,
    message: Option<&str>,
    status: StatusCode,
) -> Response {
    let pickers = screen.pickers();
    let fetched = join_all(pickers.iter().map(|picker| initial_options(state, picker))).await;

    let text_inputs = screen.text_inputs().iter().map(|input| InputView {
        name: input.name.to_string(),
        label: input.label.to_string(),
        kind: "text",
        source: "",
        value: values.get(input.name).cloned().unwrap_or_default(),
        error: errors.get(input.name).cloned(),
        options: Vec::new(),
    });

    let picker_inputs = pickers.into_iter().zip(fetched).map(|(picker, options)| {
        let value = values.get(&picker.name).cloned().unwrap_or_default();
        let mut options: Vec<OptionView> = options
            .into_iter()
            .map(|option| OptionView {
                selected: option.id == value,
                id: option.id,
                label: option.label,
            })
            .collect();
        if !value.is_empty() && !options.iter().any(|option| option.selected) {
            options.insert(
                0,
                OptionView {
                    id: value.clone(),
                    label: value.clone(),
                    selected: true,
                },
            );
        }
        InputView {
            options,
            error: errors.get(&picker.name).cloned(),
            kind: "select",
            source: picker.source.as_str(),
            label: picker.label,
            name: picker.name,
            value,
        }
    });

    let inputs: Vec<InputView> = text_inputs.chain(picker_inputs).collect();

    let mut ctx = base_context(state);
    ctx.insert("title", screen.detail_title());
    ctx.insert("list_path", screen.list_path());
    ctx.insert("action", &screen.new_path());
    ctx.insert("inputs", &inputs);
    ctx.insert("debounce_ms", &state.settings.ui.debounce_ms);
    if let Some(message) = message {
        ctx.insert("message", message);
    }

    render(state, "detail.html", &ctx, status)
}

async fn initial_options(state: &AppState, picker: &FieldConfig) -> Vec<AutocompleteOption> {
    match fetch_options(state.lookup.as_ref(), picker.source, 1, "").await {
        Ok(page) => page.data,
        Err(e) => {
            warn!("Could not load options for {}: {}", picker.name, e);
            Vec::new()
        }
    }
}

/// JSON options of one lookup source, as queried by the autocomplete inputs
pub async fn lookup_options(
    State(state): State<AppState>,
    Path(source): Path<String>,
    Query(params): Query<ListParams>,
) -> Response {
    let source: LookupSource = match source.parse() {
        Ok(source) => source,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    };

    match fetch_options(state.lookup.as_ref(), source, params.page(), &params.filter()).await {
        Ok(page) => (
            [(TOTAL_COUNT_HEADER, page.total_count.to_string())],
            Json(page.data),
        )
            .into_response(),
        Err(e) => {
            let status = match e {
                LookupError::UnknownSource(_) => StatusCode::BAD_REQUEST,
                LookupError::Api(_) => StatusCode::BAD_GATEWAY,
            };
            warn!("Lookup {} failed: {}", source, e);
            (status, Json(serde_json::json!({ "error": e.to_string() }))).into_response()
        }
    }
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}
