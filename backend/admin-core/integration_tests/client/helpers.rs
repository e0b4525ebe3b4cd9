use admin_core::client::{ApiClient, RetryPolicy};
use admin_core::credentials::{SessionTokenStore, TokenProvider};

use std::sync::Arc;
use std::time::Duration;

/// The production schedule compressed 50x (20ms, 40ms, 80ms) so a
/// persistently failing operation costs the suite 140ms instead of 7s.
/// Bound and multiplier match the defaults.
pub fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        max_retries: 3,
        initial_delay: Duration::from_millis(20),
        multiplier: 2.0,
        max_delay: Duration::from_millis(80),
    }
}

pub fn client_for(base_url: &str, tokens: Arc<dyn TokenProvider>) -> ApiClient {
    ApiClient::with_policy(base_url, tokens, fast_policy(), Duration::from_secs(5))
        .expect("client should build")
}

/// A client with no token set - requests go out unauthenticated.
pub fn anonymous_client(base_url: &str) -> ApiClient {
    client_for(base_url, Arc::new(SessionTokenStore::new()))
}
