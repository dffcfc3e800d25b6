use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

#[derive(Clone, Copy, Debug)]
struct WindowRule {
    window: Duration,
    max: u32,
    message: &'static str,
}

#[derive(Clone, Copy, Debug)]
struct WindowState {
    start: Instant,
    count: u32,
}

/// Per-client-IP limiter with three stacked windows (minute, hour, day), in
/// the shape of express-rate-limit: each window resets once its span
/// elapses, and a breach of any window blocks the request.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    rules: [WindowRule; 3],
    clients: Arc<Mutex<HashMap<IpAddr, [WindowState; 3]>>>,
}

impl RateLimiter {
    pub fn new(per_minute: u32, per_hour: u32, per_day: u32) -> Self {
        Self {
            rules: [
                WindowRule {
                    window: Duration::from_secs(60),
                    max: per_minute.max(1),
                    message: "Too many requests, please try again later.",
                },
                WindowRule {
                    window: Duration::from_secs(60 * 60),
                    max: per_hour.max(1),
                    message: "Hourly request limit exceeded. Try again later.",
                },
                WindowRule {
                    window: Duration::from_secs(24 * 60 * 60),
                    max: per_day.max(1),
                    message: "Daily request limit exceeded. Come back tomorrow.",
                },
            ],
            clients: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns the breached window's message, or None when the request is
    /// admitted (counting it against every window).
    fn check(&self, ip: IpAddr) -> Option<&'static str> {
        self.check_at(ip, Instant::now())
    }

    fn check_at(&self, ip: IpAddr, now: Instant) -> Option<&'static str> {
        let mut guard = self.clients.lock().expect("rate limiter mutex poisoned");

        // A client whose day window has lapsed holds no live counts in any
        // window, so its entry can be dropped. Keeps the map bounded by the
        // set of IPs seen within the last day.
        let day = self.rules[2].window;
        guard.retain(|_, windows| now.duration_since(windows[2].start) < day);

        let windows = guard.entry(ip).or_insert_with(|| {
            [WindowState {
                start: now,
                count: 0,
            }; 3]
        });

        for (state, rule) in windows.iter_mut().zip(self.rules.iter()) {
            if now.duration_since(state.start) >= rule.window {
                state.start = now;
                state.count = 0;
            }
            if state.count >= rule.max {
                return Some(rule.message);
            }
        }
        for state in windows.iter_mut() {
            state.count += 1;
        }
        None
    }
}

pub async fn rate_limit_middleware(
    State(limiter): State<RateLimiter>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(message) = limiter.check(addr.ip()) {
        tracing::warn!(ip = %addr.ip(), route = %req.uri().path(), "rate limit exceeded");
        return (
            StatusCode::NON_AUTHORITATIVE_INFORMATION,
            Json(json!({ "message": message, "limitReached": true })),
        )
            .into_response();
    }
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(last: u8) -> IpAddr {
        IpAddr::from([127, 0, 0, last])
    }

    #[test]
    fn blocks_after_minute_limit() {
        let limiter = RateLimiter::new(3, 250, 500);
        for _ in 0..3 {
            assert_eq!(limiter.check(ip(1)), None);
        }
        assert_eq!(
            limiter.check(ip(1)),
            Some("Too many requests, please try again later.")
        );
    }

    #[test]
    fn limits_are_tracked_per_ip() {
        let limiter = RateLimiter::new(1, 250, 500);
        assert_eq!(limiter.check(ip(1)), None);
        assert!(limiter.check(ip(1)).is_some());
        assert_eq!(limiter.check(ip(2)), None);
    }

    #[test]
    fn drops_clients_whose_day_window_has_lapsed() {
        let limiter = RateLimiter::new(15, 250, 500);
        let t0 = Instant::now();
        assert_eq!(limiter.check_at(ip(1), t0), None);

        let next_day = t0 + Duration::from_secs(25 * 60 * 60);
        assert_eq!(limiter.check_at(ip(2), next_day), None);

        let guard = limiter.clients.lock().unwrap();
        assert!(!guard.contains_key(&ip(1)));
        assert!(guard.contains_key(&ip(2)));
    }

    #[test]
    fn hour_window_breach_reports_hourly_message() {
        let limiter = RateLimiter::new(100, 2, 500);
        assert_eq!(limiter.check(ip(1)), None);
        assert_eq!(limiter.check(ip(1)), None);
        assert_eq!(
            limiter.check(ip(1)),
            Some("Hourly request limit exceeded. Try again later.")
        );
    }
}
