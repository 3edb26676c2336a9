//! File server hit counter.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Process-wide count of requests served under `/app/`.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    file_server_hits: Arc<AtomicU64>,
}

impl Metrics {
    pub fn record_hit(&self) {
        self.file_server_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> u64 {
        self.file_server_hits.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.file_server_hits.store(0, Ordering::Relaxed);
    }

    /// The admin metrics page.
    pub fn render(&self) -> String {
        format!(
            "<html>\n  <body>\n    <h1>Welcome, Chirpy Admin</h1>\n    <p>Chirpy has been visited {} times!</p>\n  </body>\n</html>\n",
            self.hits()
        )
    }
}

/// Counts every request that reaches the wrapped routes.
pub async fn mw_count_hits(State(metrics): State<Metrics>, req: Request, next: Next) -> Response {
    metrics.record_hit();
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_counter() {
        let metrics = Metrics::default();
        let other = metrics.clone();

        metrics.record_hit();
        other.record_hit();
        assert_eq!(metrics.hits(), 2);

        other.reset();
        assert_eq!(metrics.hits(), 0);
    }

    #[test]
    fn page_reports_the_count() {
        let metrics = Metrics::default();
        for _ in 0..3 {
            metrics.record_hit();
        }
        assert!(metrics.render().contains("Chirpy has been visited 3 times!"));
    }
}
