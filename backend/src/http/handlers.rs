//! HTTP handlers for the REST API.
//!
//! Each handler resolves its date parameter, delegates to the service
//! layer and wraps the result in a pagination envelope.

use axum::{
    extract::{Query, State},
    Json,
};

use super::dto::{HealthResponse, StatusPage, StatusQuery, SummaryPage, SummaryQuery, SummaryView};
use super::error::AppError;
use super::state::AppState;
use crate::models::DateStamp;
use crate::services::{summary, sync_status, vitals};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Resolves an optional `YYYY-MM-DD` query value, rejecting malformed
/// input with a 400 and defaulting to today's UTC date.
fn resolve_date(raw: Option<&str>) -> Result<DateStamp, AppError> {
    match raw {
        Some(s) => Ok(DateStamp::parse(s)?),
        None => Ok(DateStamp::today_utc()),
    }
}

/// Slices one page out of `items` and returns it with the page count.
fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> (Vec<T>, usize) {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let total_pages = items.len().div_ceil(page_size);
    let start = (page - 1) * page_size;
    let slice = items
        .iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();
    (slice, total_pages)
}

/// GET /health
///
/// Verifies the service is running and the store is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let store_status = match state.store.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: store_status,
    }))
}

/// GET /api/sync-status
///
/// Per-user tier availability matrix for a single date.
pub async fn sync_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> HandlerResult<StatusPage> {
    let date = resolve_date(query.date.as_deref())?;
    let table = sync_status::availability_matrix(state.store.as_ref(), &date).await;

    let total_users = table.rows.len();
    let (data, total_pages) = paginate(&table.rows, query.page, query.page_size);

    Ok(Json(StatusPage {
        date: date.to_string(),
        data,
        columns: table.columns,
        total_users,
        total_pages,
        page: query.page,
        page_size: query.page_size,
    }))
}

/// GET /api/user-vitals
///
/// Per-user vital-signal coverage in bronze for a single date.
pub async fn user_vitals(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> HandlerResult<StatusPage> {
    let date = resolve_date(query.date.as_deref())?;
    let table = vitals::vitals_coverage(state.store.as_ref(), &date).await;

    let total_users = table.rows.len();
    let (data, total_pages) = paginate(&table.rows, query.page, query.page_size);

    Ok(Json(StatusPage {
        date: date.to_string(),
        data,
        columns: table.columns,
        total_users,
        total_pages,
        page: query.page,
        page_size: query.page_size,
    }))
}

/// GET /api/summary
///
/// Reconciliation summary for the daily, weekly or monthly window
/// anchored at the given date. The user list inside the summary is
/// paginated in place.
pub async fn reconciliation_summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> HandlerResult<SummaryPage> {
    let date = resolve_date(query.date.as_deref())?;
    let store = state.store.as_ref();

    let mut summary = match query.view {
        SummaryView::Daily => summary::daily_summary(store, date, &state.summary).await,
        SummaryView::Weekly => summary::weekly_summary(store, date, &state.summary).await,
        SummaryView::Monthly => summary::monthly_summary(store, date, &state.summary).await,
    };

    let (users, total_pages) = paginate(&summary.users, query.page, query.page_size);
    summary.users = users;

    Ok(Json(SummaryPage {
        summary,
        total_pages,
        page: query.page,
        page_size: query.page_size,
    }))
}
