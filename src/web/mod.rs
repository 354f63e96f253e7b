//! Embedded web dashboard for launchdash.
//!
//! Provides a lightweight HTTP server (sync, via `tiny_http`) that serves:
//! - A single-page dashboard: site selector, success pie chart, payload
//!   range slider and payload/outcome scatter chart
//! - JSON API endpoints that own one [`Session`] per open page
//!
//! Launched via `launchdash serve` (default: `http://127.0.0.1:8050`).
//!
//! Requests are handled one at a time on the calling thread. The dataset is
//! borrowed read-only by every session; each session's filter is private.

mod api;
mod frontend;

use std::collections::BTreeMap;
use std::io::{self, Cursor, Read};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tiny_http::{Header, Method, Response, Server, StatusCode};
use tracing::{debug, info, warn};

use crate::config::DashConfig;
use crate::dataset::Dataset;
use crate::session::Session;

pub use api::ApiError;

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the web dashboard on `config.server.addr`.
///
/// Blocks the current thread. Per-request failures are answered with an
/// error status and never stop the server.
pub fn serve(dataset: &Dataset, config: &DashConfig) -> Result<()> {
    let addr = config.server.addr.as_str();
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    let url = format!("http://{addr}");
    info!(%url, records = dataset.len(), "dashboard listening");
    println!("launchdash dashboard running at {url}");
    println!("Press Ctrl+C to stop.\n");

    if config.server.open_browser
        && let Err(e) = open_browser(&url)
    {
        warn!("could not open browser: {e:#}");
    }

    let mut app = DashboardServer::new(dataset, config);

    for mut request in server.incoming_requests() {
        let started = Instant::now();
        let method = request.method().clone();
        let url = request.url().to_string();

        let reply = match read_body(&method, request.as_reader()) {
            Ok(body) => app.handle(&method, &url, body.as_deref()),
            Err(e) => {
                warn!(%method, %url, "failed to read request body: {e}");
                Reply::error(400, UNREADABLE_BODY)
            }
        };
        let status = reply.status;

        if let Err(e) = request.respond(reply.into_response()) {
            warn!(%method, %url, "failed to send response: {e}");
        }

        info!(
            %method,
            %url,
            status,
            elapsed_us = started.elapsed().as_micros() as u64,
            "request"
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Server state
// ---------------------------------------------------------------------------

/// Router plus the live sessions of all open pages.
pub struct DashboardServer<'a> {
    dataset: &'a Dataset,
    config: &'a DashConfig,
    sessions: BTreeMap<u64, Session<'a>>,
    next_id: u64,
}

impl<'a> DashboardServer<'a> {
    pub fn new(dataset: &'a Dataset, config: &'a DashConfig) -> Self {
        Self {
            dataset,
            config,
            sessions: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Register a new session, evicting the oldest ones beyond the cap.
    fn open_session(&mut self) -> u64 {
        let cap = self.config.server.max_sessions.max(1);
        while self.sessions.len() >= cap {
            if let Some((evicted, _)) = self.sessions.pop_first() {
                debug!(session = evicted, "session evicted");
            }
        }

        let id = self.next_id;
        self.next_id += 1;
        self.sessions.insert(id, Session::new(self.dataset));
        info!(session = id, live = self.sessions.len(), "session opened");
        id
    }

    /// Answer one request. Errors become JSON error replies.
    pub fn handle(&mut self, method: &Method, url: &str, body: Option<&str>) -> Reply {
        match self.dispatch(method, url, body) {
            Ok(reply) => reply,
            Err(e) => {
                let status = e.status();
                if let ApiError::Filter(reason) = &e {
                    info!(%url, "filter event rejected: {reason}");
                } else if status >= 500 {
                    warn!(%method, %url, "request failed: {e:#}");
                }
                Reply::error(status, &e.to_string())
            }
        }
    }

    // -----------------------------------------------------------------------
    // Router
    // -----------------------------------------------------------------------

    fn dispatch(&mut self, method: &Method, url: &str, body: Option<&str>) -> Result<Reply, ApiError> {
        // Strip query string for path matching
        let path = url.split('?').next().unwrap_or(url);
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

        match (method, segments.as_slice()) {
            // Frontend
            (&Method::Get, [""]) | (&Method::Get, ["index.html"]) => Ok(Reply::html(frontend::INDEX_HTML)),

            // API: dataset metadata
            (&Method::Get, ["api", "meta"]) => api::get_meta(self),
            (&Method::Get, ["api", "health"]) => api::get_health(self),

            // API: sessions
            (&Method::Post, ["api", "sessions"]) => api::post_session(self),
            (&Method::Get, ["api", "sessions", id]) => api::get_session(self, parse_id(id)?),
            (&Method::Delete, ["api", "sessions", id]) => api::delete_session(self, parse_id(id)?),
            (&Method::Put, ["api", "sessions", id, "site"]) => {
                api::put_site(self, parse_id(id)?, body)
            }
            (&Method::Put, ["api", "sessions", id, "range"]) => {
                api::put_range(self, parse_id(id)?, body)
            }
            (&Method::Post, ["api", "sessions", id, "reset"]) => api::post_reset(self, parse_id(id)?),

            _ => Err(ApiError::NotFound),
        }
    }
}

const UNREADABLE_BODY: &str = "unreadable request body";

/// Read the body up-front for methods that carry one. A body that cannot be
/// read as UTF-8 is an error, never an empty string.
fn read_body<R: Read + ?Sized>(method: &Method, reader: &mut R) -> io::Result<Option<String>> {
    if !matches!(method, Method::Put | Method::Post | Method::Patch) {
        return Ok(None);
    }
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    Ok(Some(buf))
}

fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid session id '{raw}'")))
}

// ---------------------------------------------------------------------------
// Replies
// ---------------------------------------------------------------------------

/// A response independent of the transport, convertible to `tiny_http`.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Reply {
    /// JSON reply with the given status.
    pub fn json<T: Serialize>(status: u16, data: &T) -> Result<Self, ApiError> {
        let body = serde_json::to_vec(data).context("failed to serialize JSON response")?;
        Ok(Self {
            status,
            content_type: "application/json; charset=utf-8",
            body,
        })
    }

    /// `{"error": message}` with the given status.
    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            content_type: "application/json; charset=utf-8",
            body: serde_json::json!({ "error": message }).to_string().into_bytes(),
        }
    }

    /// The embedded single-page frontend.
    pub fn html(html: &str) -> Self {
        Self {
            status: 200,
            content_type: "text/html; charset=utf-8",
            body: html.as_bytes().to_vec(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Body parsed as JSON, for callers that inspect replies.
    pub fn json_body(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_slice(&self.body)
    }

    fn into_response(self) -> Response<Cursor<Vec<u8>>> {
        let response = Response::from_data(self.body).with_status_code(StatusCode(self.status));
        match Header::from_bytes("Content-Type", self.content_type) {
            Ok(header) => response.with_header(header),
            Err(()) => response,
        }
    }
}

// ---------------------------------------------------------------------------
// Browser
// ---------------------------------------------------------------------------

/// Attempt to open a URL in the system default browser.
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
