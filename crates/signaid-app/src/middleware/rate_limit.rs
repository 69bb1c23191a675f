use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tokio::sync::Mutex;

use crate::error::ApiError;

/// Stale windows are swept once the table grows past this many clients, at
/// most once per window length
const PRUNE_THRESHOLD: usize = 1024;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Fixed-window request counter keyed by client address
#[derive(Debug)]
pub struct RateLimiter {
    limit: u32,
    window: Duration,
    clients: Mutex<Clients>,
}

#[derive(Debug)]
struct Clients {
    windows: HashMap<IpAddr, Window>,
    last_prune: Instant,
}

impl Clients {
    fn prune(&mut self, now: Instant, window: Duration) {
        if self.windows.len() < PRUNE_THRESHOLD || now.duration_since(self.last_prune) < window {
            return;
        }

        self.windows.retain(|_, w| now.duration_since(w.started) < window);
        self.last_prune = now;
        tracing::trace!("Rate limiter tracking {} clients after prune", self.windows.len());
    }
}

impl RateLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            clients: Mutex::new(Clients {
                windows: HashMap::new(),
                last_prune: Instant::now(),
            }),
        }
    }

    pub fn per_minute(limit: u32) -> Self {
        Self::new(limit, Duration::from_secs(60))
    }

    /// Count one request from `client`. Over the limit, returns how long until
    /// the client's window resets.
    pub async fn check(&self, client: IpAddr) -> Result<(), Duration> {
        let now = Instant::now();
        let mut clients = self.clients.lock().await;

        clients.prune(now, self.window);

        let window = clients.windows.entry(client).or_insert(Window {
            started: now,
            count: 0,
        });

        let elapsed = now.duration_since(window.started);
        if elapsed >= self.window {
            *window = Window {
                started: now,
                count: 0,
            };
        }

        if window.count >= self.limit {
            return Err(self.window.saturating_sub(now.duration_since(window.started)));
        }

        window.count += 1;
        Ok(())
    }
}

/// Middleware rejecting clients over the limiter's budget with 429
pub async fn enforce_rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    match limiter.check(client).await {
        Ok(()) => Ok(next.run(request).await),
        Err(wait) => {
            tracing::debug!("Rate limited {} on {}", client, request.uri().path());
            Err(ApiError::RateLimited {
                retry_after_secs: retry_after_secs(wait),
            })
        }
    }
}

/// Whole seconds, rounded up, never zero
fn retry_after_secs(wait: Duration) -> u64 {
    let secs = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
    secs.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(last: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))
    }

    #[tokio::test]
    async fn test_limit_per_client() {
        let limiter = RateLimiter::per_minute(2);

        assert!(limiter.check(ip(1)).await.is_ok());
        assert!(limiter.check(ip(1)).await.is_ok());
        let wait = limiter.check(ip(1)).await.unwrap_err();
        assert!(wait <= Duration::from_secs(60));

        assert!(limiter.check(ip(2)).await.is_ok());
    }

    #[tokio::test]
    async fn test_window_resets() {
        let limiter = RateLimiter::new(1, Duration::from_millis(20));

        assert!(limiter.check(ip(1)).await.is_ok());
        assert!(limiter.check(ip(1)).await.is_err());
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(limiter.check(ip(1)).await.is_ok());
    }

    #[tokio::test]
    async fn test_stale_clients_pruned() {
        let limiter = RateLimiter::new(5, Duration::from_millis(10));
        for n in 0..PRUNE_THRESHOLD {
            let addr = IpAddr::V6(std::net::Ipv6Addr::from(n as u128));
            limiter.check(addr).await.unwrap();
        }
        tokio::time::sleep(Duration::from_millis(20)).await;

        limiter.check(ip(1)).await.unwrap();
        assert_eq!(limiter.clients.lock().await.windows.len(), 1);
    }

    #[tokio::test]
    async fn test_full_table_of_live_clients_not_rescanned() {
        let limiter = RateLimiter::per_minute(5);
        let started = limiter.clients.lock().await.last_prune;

        for n in 0..PRUNE_THRESHOLD + 10 {
            let addr = IpAddr::V6(std::net::Ipv6Addr::from(n as u128));
            limiter.check(addr).await.unwrap();
        }

        let clients = limiter.clients.lock().await;
        assert_eq!(clients.windows.len(), PRUNE_THRESHOLD + 10);
        assert_eq!(clients.last_prune, started);
    }

    #[test]
    fn test_retry_after_rounds_up() {
        assert_eq!(retry_after_secs(Duration::from_millis(1500)), 2);
        assert_eq!(retry_after_secs(Duration::from_secs(3)), 3);
        assert_eq!(retry_after_secs(Duration::ZERO), 1);
    }
}
