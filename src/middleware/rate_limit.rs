use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::{header, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

const WINDOW: Duration = Duration::from_secs(1);
/// Stale windows are dropped once this many clients are tracked.
const MAX_TRACKED_CLIENTS: usize = 4096;

#[derive(Debug, Clone, Copy)]
struct Window {
    start: Instant,
    count: u32,
}

/// Fixed one-second window per client address. Requests without a known
/// peer address share a single window.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    rps: u32,
    windows: Arc<Mutex<HashMap<Option<IpAddr>, Window>>>,
}

impl RateLimiter {
    pub fn new(rps: u32) -> Self {
        Self {
            rps: rps.max(1),
            windows: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn allow_at(&self, client: Option<IpAddr>, now: Instant) -> bool {
        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if windows.len() >= MAX_TRACKED_CLIENTS {
            windows.retain(|_, w| now.duration_since(w.start) < WINDOW);
        }

        let window = windows.entry(client).or_insert(Window {
            start: now,
            count: 0,
        });
        if now.duration_since(window.start) >= WINDOW {
            *window = Window {
                start: now,
                count: 0,
            };
        }
        if window.count < self.rps {
            window.count += 1;
            true
        } else {
            false
        }
    }

    pub fn allow(&self, client: Option<IpAddr>) -> bool {
        self.allow_at(client, Instant::now())
    }
}

pub async fn rps_middleware(
    State(limiter): State<RateLimiter>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let client = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    if !limiter.allow(client) {
        tracing::warn!(client = ?client, path = %req.uri().path(), "rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            [(header::RETRY_AFTER, "1")],
            Json(json!({ "error": "Too many requests, please try again later" })),
        )
            .into_response();
    }
    next.run(req).await
}
