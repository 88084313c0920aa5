//! Per-client-IP token buckets.
//!
//! Identities live for the whole process, so every anonymous visit to `/`
//! costs memory. The limiter sits in front of every route to keep a single
//! client from minting identities (or hammering the store) without bound.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Sustained request rate and the burst a fresh client may spend up front.
#[derive(Debug, Clone, Copy)]
struct Quota {
    per_sec: f64,
    burst: f64,
}

/// Request allowance for one client address.
#[derive(Debug)]
struct Allowance {
    remaining: f64,
    seen: Instant,
}

impl Allowance {
    fn full(quota: Quota, now: Instant) -> Self {
        Self {
            remaining: quota.burst,
            seen: now,
        }
    }

    /// Credit the time since the last request, then spend one request.
    fn spend(&mut self, quota: Quota, now: Instant) -> bool {
        let earned = now.saturating_duration_since(self.seen).as_secs_f64() * quota.per_sec;
        self.remaining = (self.remaining + earned).min(quota.burst);
        self.seen = now;

        let admitted = self.remaining >= 1.0;
        if admitted {
            self.remaining -= 1.0;
        }
        admitted
    }
}

#[derive(Clone)]
pub struct RateLimiter {
    clients: Arc<Mutex<HashMap<IpAddr, Allowance>>>,
    quota: Quota,
    trust_proxy_headers: bool,
}

impl RateLimiter {
    pub fn new(per_sec: f64, burst: f64) -> Self {
        Self {
            clients: Arc::new(Mutex::new(HashMap::new())),
            quota: Quota { per_sec, burst },
            trust_proxy_headers: false,
        }
    }

    /// Read the client address from proxy headers before the socket address.
    pub fn trusting_proxy_headers(mut self, trust: bool) -> Self {
        self.trust_proxy_headers = trust;
        self
    }

    /// Whether `ip` may make another request right now.
    pub async fn admit(&self, ip: IpAddr) -> bool {
        let now = Instant::now();
        let mut clients = self.clients.lock().await;
        clients
            .entry(ip)
            .or_insert_with(|| Allowance::full(self.quota, now))
            .spend(self.quota, now)
    }

    /// Drop clients that have not made a request for `idle`.
    pub async fn forget_idle(&self, idle: Duration) {
        let now = Instant::now();
        let mut clients = self.clients.lock().await;
        let before = clients.len();
        clients.retain(|_, allowance| now.saturating_duration_since(allowance.seen) < idle);

        let forgotten = before - clients.len();
        if forgotten > 0 {
            debug!(forgotten, remaining = clients.len(), "Forgot idle rate limit clients");
        }
    }

    fn client_ip<B>(&self, req: &Request<B>) -> Option<IpAddr> {
        let socket = || {
            req.extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|info| info.0.ip())
        };

        if self.trust_proxy_headers {
            forwarded_ip(req).or_else(socket)
        } else {
            socket()
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(20.0, 60.0)
    }
}

pub async fn rate_limit_middleware(
    State(limiter): State<RateLimiter>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if let Some(ip) = limiter.client_ip(&req) {
        if !limiter.admit(ip).await {
            warn!(ip = %ip, path = %req.uri().path(), "Rate limit exceeded");
            return Err(StatusCode::TOO_MANY_REQUESTS);
        }
    }

    Ok(next.run(req).await)
}

/// First address in `X-Forwarded-For`, else `X-Real-IP`.
fn forwarded_ip<B>(req: &Request<B>) -> Option<IpAddr> {
    let header = |name: &str| req.headers().get(name).and_then(|v| v.to_str().ok());

    header("x-forwarded-for")
        .and_then(|value| value.split(',').next())
        .and_then(|first| first.trim().parse().ok())
        .or_else(|| header("x-real-ip").and_then(|value| value.trim().parse().ok()))
}
