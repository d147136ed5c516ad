//! PlacesClient trait definition

use async_trait::async_trait;

use super::{MapsError, NearbyQuery, PlaceDetails, PlaceSummary};
use crate::domain::Coordinates;

/// Geocoding and places search against a maps provider
///
/// Each call is stateless from the caller's side. Implementations bound
/// every request with their own timeout.
#[async_trait]
pub trait PlacesClient: Send + Sync {
    /// Best-match coordinates for a place name; `None` when nothing matched
    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>, MapsError>;

    /// Places near a point, in provider ranking order
    async fn nearby_search(&self, query: &NearbyQuery) -> Result<Vec<PlaceSummary>, MapsError>;

    /// Rating, address, contacts, reviews and hours for one place
    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, MapsError>;

    /// Fetchable URL for a photo reference
    fn photo_url(&self, photo_reference: &str) -> String;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tracing::debug;

    /// Mock places client for unit tests
    ///
    /// Unknown addresses geocode to `None`; unknown place ids fail details.
    #[derive(Default)]
    pub struct MockPlacesClient {
        locations: HashMap<String, Coordinates>,
        geocode_fails: bool,
        geocode_delay: Option<Duration>,
        nearby: HashMap<String, Vec<PlaceSummary>>,
        nearby_fails: bool,
        details: HashMap<String, PlaceDetails>,
        details_quota_failures: AtomicUsize,
        geocode_calls: AtomicUsize,
        nearby_calls: AtomicUsize,
        details_calls: AtomicUsize,
    }

    impl MockPlacesClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_location(mut self, address: &str, coords: Coordinates) -> Self {
            self.locations.insert(address.to_string(), coords);
            self
        }

        pub fn failing_geocode(mut self) -> Self {
            self.geocode_fails = true;
            self
        }

        /// Stall every geocode call, for timeout tests
        pub fn with_geocode_delay(mut self, delay: Duration) -> Self {
            self.geocode_delay = Some(delay);
            self
        }

        pub fn with_nearby(mut self, place_type: &str, places: Vec<PlaceSummary>) -> Self {
            self.nearby.insert(place_type.to_string(), places);
            self
        }

        pub fn failing_nearby(mut self) -> Self {
            self.nearby_fails = true;
            self
        }

        pub fn with_details(mut self, place_id: &str, details: PlaceDetails) -> Self {
            self.details.insert(place_id.to_string(), details);
            self
        }

        /// Reject the next `count` details calls with `OVER_QUERY_LIMIT`
        pub fn with_details_quota_failures(self, count: usize) -> Self {
            self.details_quota_failures.store(count, Ordering::SeqCst);
            self
        }

        pub fn geocode_calls(&self) -> usize {
            self.geocode_calls.load(Ordering::SeqCst)
        }

        pub fn nearby_calls(&self) -> usize {
            self.nearby_calls.load(Ordering::SeqCst)
        }

        pub fn details_calls(&self) -> usize {
            self.details_calls.load(Ordering::SeqCst)
        }

        pub fn total_calls(&self) -> usize {
            self.geocode_calls() + self.nearby_calls() + self.details_calls()
        }
    }

    #[async_trait]
    impl PlacesClient for MockPlacesClient {
        async fn geocode(&self, address: &str) -> Result<Option<Coordinates>, MapsError> {
            debug!(%address, "MockPlacesClient::geocode: called");
            self.geocode_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.geocode_delay {
                tokio::time::sleep(delay).await;
            }
            if self.geocode_fails {
                return Err(MapsError::Http(503));
            }
            Ok(self.locations.get(address).copied())
        }

        async fn nearby_search(&self, query: &NearbyQuery) -> Result<Vec<PlaceSummary>, MapsError> {
            debug!(place_type = %query.place_type, "MockPlacesClient::nearby_search: called");
            self.nearby_calls.fetch_add(1, Ordering::SeqCst);
            if self.nearby_fails {
                return Err(MapsError::Api {
                    status: "OVER_QUERY_LIMIT".to_string(),
                    message: "mock quota".to_string(),
                });
            }
            Ok(self.nearby.get(&query.place_type).cloned().unwrap_or_default())
        }

        async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, MapsError> {
            self.details_calls.fetch_add(1, Ordering::SeqCst);
            let over_quota = self
                .details_quota_failures
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if over_quota {
                return Err(MapsError::Api {
                    status: "OVER_QUERY_LIMIT".to_string(),
                    message: "mock quota".to_string(),
                });
            }
            self.details
                .get(place_id)
                .cloned()
                .ok_or_else(|| MapsError::InvalidResponse(format!("no details for {}", place_id)))
        }

        fn photo_url(&self, photo_reference: &str) -> String {
            format!("https://photos.test/{}", photo_reference)
        }
    }
}
