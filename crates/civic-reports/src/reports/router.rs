use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::domain::{CategoryFilter, Report, ReportId, ReportSubmission, StatusFilter};
use super::listing::{run_listing, EmptyState, ListingPage, ListingQuery, SortDirection, SortField};
use super::repository::ReportRepository;
use super::stats::ReportStats;
use super::store::ReportStore;
use crate::error::AppError;

/// Router builder exposing report submission and listing endpoints.
pub fn report_router<R>(store: Arc<ReportStore<R>>) -> Router
where
    R: ReportRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/reports",
            get(list_handler::<R>).post(create_handler::<R>),
        )
        .route("/api/v1/reports/stats", get(stats_handler::<R>))
        .route(
            "/api/v1/reports/category/:category",
            get(category_handler::<R>),
        )
        .route("/api/v1/reports/:report_id", get(report_handler::<R>))
        .with_state(store)
}

/// Query string accepted by the listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListingParams {
    #[serde(default)]
    pub category: CategoryFilter,
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default)]
    pub sort: SortField,
    #[serde(default)]
    pub direction: SortDirection,
    #[serde(default)]
    pub page: Option<usize>,
}

impl ListingParams {
    pub fn listing_query(&self) -> ListingQuery {
        ListingQuery::default()
            .with_search(self.q.clone())
            .with_status(self.status)
            .with_sort(self.sort, self.direction)
            .with_page(self.page.unwrap_or(1))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    #[serde(flatten)]
    pub page: ListingPage,
    pub category: &'static str,
    pub empty_state: Option<EmptyState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

pub(crate) async fn create_handler<R>(
    State(store): State<Arc<ReportStore<R>>>,
    Json(submission): Json<ReportSubmission>,
) -> Result<(StatusCode, Json<Report>), AppError>
where
    R: ReportRepository + 'static,
{
    let report = store.create(submission).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

pub(crate) async fn list_handler<R>(
    State(store): State<Arc<ReportStore<R>>>,
    Query(params): Query<ListingParams>,
) -> Result<Json<ListingResponse>, AppError>
where
    R: ReportRepository + 'static,
{
    let snapshot = store.list_by_category(params.category).await?;

    let query = params.listing_query();
    let page = run_listing(&snapshot, &query, store.page_size());
    let empty_state = page.empty_state(&query, params.category);

    Ok(Json(ListingResponse {
        page,
        category: params.category.label(),
        empty_state,
        empty_message: empty_state.map(|state| state.message(params.category)),
    }))
}

pub(crate) async fn category_handler<R>(
    State(store): State<Arc<ReportStore<R>>>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Report>>, AppError>
where
    R: ReportRepository + 'static,
{
    let filter: CategoryFilter = category.parse()?;
    let reports = store.list_by_category(filter).await?;
    Ok(Json(reports))
}

pub(crate) async fn stats_handler<R>(
    State(store): State<Arc<ReportStore<R>>>,
) -> Result<Json<ReportStats>, AppError>
where
    R: ReportRepository + 'static,
{
    let reports = store.list_all().await?;
    Ok(Json(ReportStats::from_reports(&reports)))
}

pub(crate) async fn report_handler<R>(
    State(store): State<Arc<ReportStore<R>>>,
    Path(report_id): Path<String>,
) -> Result<Json<Report>, AppError>
where
    R: ReportRepository + 'static,
{
    let report = store.get(&ReportId(report_id)).await?;
    Ok(Json(report))
}
