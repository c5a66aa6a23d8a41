use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Html;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::analysis::TransactionFilter;
use crate::core::constants::limits;
use crate::core::types::Granularity;
use crate::reporting::{DashboardData, DashboardSummary, HtmlDashboard};
use crate::server::AppState;
use crate::server::error::ApiError;

/// Query string of `/` and `/api/summary`. Blank values are treated as absent.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub start: Option<String>,
    pub end: Option<String>,
    pub category: Option<String>,
    pub region: Option<String>,
    pub granularity: Option<String>,
    pub top: Option<String>,
}

/// Validated view of a [`DashboardQuery`]
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardRequest {
    pub filter: TransactionFilter,
    pub granularity: Granularity,
    pub top: usize,
}

impl DashboardQuery {
    pub fn resolve(&self, state: &AppState) -> Result<DashboardRequest, ApiError> {
        let start = parse_date("start", self.start.as_deref())?;
        let end = parse_date("end", self.end.as_deref())?;
        let filter =
            TransactionFilter::from_parts(start, end, self.category.as_deref(), self.region.as_deref())?;

        let granularity = match non_blank(self.granularity.as_deref()) {
            Some(raw) => raw.parse()?,
            None => state.default_granularity,
        };

        let top = match non_blank(self.top.as_deref()) {
            Some(raw) => {
                let top: usize = raw.parse().map_err(|_| top_error(raw))?;
                if !(limits::DASHBOARD_TOP_MIN..=limits::DASHBOARD_TOP_MAX).contains(&top) {
                    return Err(top_error(raw));
                }
                top
            }
            None => state.default_top,
        };

        Ok(DashboardRequest {
            filter,
            granularity,
            top,
        })
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_date(field: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    non_blank(raw)
        .map(|value| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
                ApiError::BadRequest(format!(
                    "Invalid {field} date '{value}'. Expected YYYY-MM-DD."
                ))
            })
        })
        .transpose()
}

fn top_error(raw: &str) -> ApiError {
    ApiError::BadRequest(format!(
        "Invalid top value '{raw}'. Expected a number between {}-{}.",
        limits::DASHBOARD_TOP_MIN,
        limits::DASHBOARD_TOP_MAX
    ))
}

fn build_summary(state: &AppState, request: &DashboardRequest) -> DashboardSummary {
    DashboardSummary::build(
        &state.dataset,
        &request.filter,
        request.granularity,
        request.top,
    )
}

/// `GET /`
pub async fn dashboard_page(
    State(state): State<AppState>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> Result<Html<String>, ApiError> {
    let Query(query) = query?;
    let request = query.resolve(&state)?;
    let data = DashboardData {
        summary: build_summary(&state, &request),
        options: Some(state.options.as_ref().clone()),
        data_source: state.data_source.to_string(),
        timestamp: Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    };
    let html = HtmlDashboard::render(&data)?;
    Ok(Html(html))
}

/// `GET /api/summary`
pub async fn summary_json(
    State(state): State<AppState>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> Result<Json<DashboardSummary>, ApiError> {
    let Query(query) = query?;
    let request = query.resolve(&state)?;
    Ok(Json(build_summary(&state, &request)))
}

/// `GET /health`
pub async fn health() -> &'static str {
    "ok"
}
