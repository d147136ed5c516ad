use std::sync::Arc;

use crate::planner::TripPlanner;
use crate::ratelimit::RateLimiter;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<TripPlanner>,
    /// `None` disables rate limiting
    pub limiter: Option<Arc<RateLimiter>>,
}

impl AppState {
    pub fn new(planner: Arc<TripPlanner>) -> Self {
        Self { planner, limiter: None }
    }

    pub fn with_rate_limiter(mut self, limiter: RateLimiter) -> Self {
        self.limiter = Some(Arc::new(limiter));
        self
    }
}
