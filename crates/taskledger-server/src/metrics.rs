// SPDX-License-Identifier: Apache-2.0

use axum::http::StatusCode;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, Default)]
struct RouteStats {
    count: u64,
    total_micros: u128,
}

/// Per-route, per-status request counters, rendered as plaintext on
/// `/metrics`.
#[derive(Debug, Default)]
pub struct RequestMetrics {
    routes: Mutex<BTreeMap<(String, u16), RouteStats>>,
}

impl RequestMetrics {
    pub async fn observe_request(&self, route: &str, status: StatusCode, elapsed: Duration) {
        let mut routes = self.routes.lock().await;
        let stats = routes
            .entry((route.to_string(), status.as_u16()))
            .or_default();
        stats.count += 1;
        stats.total_micros += elapsed.as_micros();
    }

    pub async fn render(&self) -> String {
        let routes = self.routes.lock().await;
        let mut out = String::new();
        for ((route, status), stats) in routes.iter() {
            let _ = writeln!(
                out,
                "taskledger_requests_total{{route=\"{route}\",status=\"{status}\"}} {}",
                stats.count
            );
            let _ = writeln!(
                out,
                "taskledger_request_duration_micros_total{{route=\"{route}\",status=\"{status}\"}} {}",
                stats.total_micros
            );
        }
        out
    }
}
