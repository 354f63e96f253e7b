//! JSON API handlers for the web dashboard.
//!
//! Each handler corresponds to an API endpoint and returns a [`Reply`]
//! carrying a JSON body. Errors are [`ApiError`]s, mapped to a status code
//! by the router.

use serde::{Deserialize, Serialize};

use crate::dataset::PayloadBounds;
use crate::error::FilterError;
use crate::filter::{ALL_SITES, ALL_SITES_LABEL, FilterState};
use crate::presentation::DashboardViews;

use super::{DashboardServer, Reply};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A failed API call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The filter event was rejected; the session is unchanged.
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error("unknown session {0}")]
    UnknownSession(u64),
    #[error("invalid request: {0}")]
    BadRequest(String),
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> u16 {
        match self {
            Self::Filter(_) | Self::BadRequest(_) => 400,
            Self::UnknownSession(_) | Self::NotFound => 404,
            Self::Internal(_) => 500,
        }
    }
}

// ---------------------------------------------------------------------------
// JSON request / response types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SiteOption<'a> {
    id: &'a str,
    label: &'a str,
    records: usize,
}

/// Everything the page needs to build its controls.
#[derive(Serialize)]
struct MetaResponse<'a> {
    title: &'a str,
    all_sites: SiteOption<'a>,
    sites: Vec<SiteOption<'a>>,
    payload_bounds: PayloadBounds,
    slider_step_kg: f64,
}

/// Current filter and freshly derived views of one session.
#[derive(Serialize)]
struct SessionResponse<'a> {
    session_id: u64,
    filter: &'a FilterState,
    views: DashboardViews,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    records: usize,
    sites: usize,
    sessions: usize,
}

#[derive(Debug, Deserialize)]
struct SiteRequest {
    site: String,
}

#[derive(Debug, Deserialize)]
struct RangeRequest {
    low: f64,
    high: f64,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_body<'de, T: Deserialize<'de>>(body: Option<&'de str>) -> Result<T, ApiError> {
    let body = body.ok_or_else(|| ApiError::BadRequest("missing JSON body".to_string()))?;
    serde_json::from_str(body).map_err(|e| ApiError::BadRequest(e.to_string()))
}

fn session_reply(server: &DashboardServer<'_>, id: u64) -> Result<Reply, ApiError> {
    let session = server.sessions.get(&id).ok_or(ApiError::UnknownSession(id))?;
    Reply::json(
        200,
        &SessionResponse {
            session_id: id,
            filter: session.filter(),
            views: session.views(),
        },
    )
}

// ---------------------------------------------------------------------------
// API Handlers
// ---------------------------------------------------------------------------

/// `GET /api/meta`: title, site options, payload bounds, slider step.
pub fn get_meta(server: &DashboardServer<'_>) -> Result<Reply, ApiError> {
    let dashboard = &server.config.dashboard;
    let sites = server
        .dataset
        .known_sites()
        .iter()
        .map(|site| SiteOption {
            id: site,
            label: dashboard.site_label(site),
            records: server.dataset.records_at(site).count(),
        })
        .collect();

    Reply::json(
        200,
        &MetaResponse {
            title: &dashboard.title,
            all_sites: SiteOption {
                id: ALL_SITES,
                label: ALL_SITES_LABEL,
                records: server.dataset.len(),
            },
            sites,
            payload_bounds: server.dataset.payload_bounds(),
            slider_step_kg: dashboard.slider_step_kg,
        },
    )
}

/// `POST /api/sessions`: open a session with default selections.
pub fn post_session(server: &mut DashboardServer<'_>) -> Result<Reply, ApiError> {
    let id = server.open_session();
    let reply = session_reply(server, id)?;
    Ok(reply.with_status(201))
}

/// `GET /api/sessions/{id}`: current filter and views.
pub fn get_session(server: &DashboardServer<'_>, id: u64) -> Result<Reply, ApiError> {
    session_reply(server, id)
}

/// `PUT /api/sessions/{id}/site`: body `{"site": "ALL" | "<site id>"}`.
pub fn put_site(
    server: &mut DashboardServer<'_>,
    id: u64,
    body: Option<&str>,
) -> Result<Reply, ApiError> {
    let req: SiteRequest = parse_body(body)?;
    let session = server
        .sessions
        .get_mut(&id)
        .ok_or(ApiError::UnknownSession(id))?;
    session.on_site_selected(&req.site)?;
    session_reply(server, id)
}

/// `PUT /api/sessions/{id}/range`: body `{"low": kg, "high": kg}`.
pub fn put_range(
    server: &mut DashboardServer<'_>,
    id: u64,
    body: Option<&str>,
) -> Result<Reply, ApiError> {
    let req: RangeRequest = parse_body(body)?;
    let session = server
        .sessions
        .get_mut(&id)
        .ok_or(ApiError::UnknownSession(id))?;
    session.on_payload_range_changed(req.low, req.high)?;
    session_reply(server, id)
}

/// `POST /api/sessions/{id}/reset`: back to default selections.
pub fn post_reset(server: &mut DashboardServer<'_>, id: u64) -> Result<Reply, ApiError> {
    let session = server
        .sessions
        .get_mut(&id)
        .ok_or(ApiError::UnknownSession(id))?;
    session.reset();
    session_reply(server, id)
}

/// `DELETE /api/sessions/{id}`: drop a session.
pub fn delete_session(server: &mut DashboardServer<'_>, id: u64) -> Result<Reply, ApiError> {
    server
        .sessions
        .remove(&id)
        .ok_or(ApiError::UnknownSession(id))?;
    Reply::json(200, &serde_json::json!({ "closed": id }))
}

/// `GET /api/health`: dataset and session summary.
pub fn get_health(server: &DashboardServer<'_>) -> Result<Reply, ApiError> {
    Reply::json(
        200,
        &HealthResponse {
            status: "ok",
            records: server.dataset.len(),
            sites: server.dataset.known_sites().len(),
            sessions: server.sessions.len(),
        },
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_statuses() {
        assert_eq!(ApiError::Filter(FilterError::InvalidSite("x".into())).status(), 400);
        assert_eq!(ApiError::BadRequest("x".into()).status(), 400);
        assert_eq!(ApiError::UnknownSession(3).status(), 404);
        assert_eq!(ApiError::NotFound.status(), 404);
        assert_eq!(ApiError::Internal(anyhow::anyhow!("boom")).status(), 500);
    }

    #[test]
    fn parse_body_requires_body() {
        let err = parse_body::<SiteRequest>(None).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn parse_body_reports_malformed_json() {
        let err = parse_body::<RangeRequest>(Some(r#"{"low": "a"}"#)).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn range_request_deserializes() {
        let req: RangeRequest = parse_body(Some(r#"{"low": 0, "high": 2500.5}"#)).unwrap();
        assert_eq!(req.low, 0.0);
        assert_eq!(req.high, 2500.5);
    }
}
