//! Destination lookups built on a [`PlacesClient`]
//!
//! Shapes raw places results into coordinates, hotel listings and landmark
//! photo URLs. Successful results are cached per destination when a cache
//! TTL is configured.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, warn};

use super::{MapsError, NearbyQuery, PlaceDetails, PlaceSummary, PlacesClient};
use crate::cache::{TtlCache, normalize_key};
use crate::config::MapsConfig;
use crate::domain::{Coordinates, HotelListing};

const HOTEL_PLACE_TYPE: &str = "lodging";
const HOTEL_KEYWORD: &str = "hotel";
const LANDMARK_PLACE_TYPE: &str = "tourist_attraction";
const LANDMARK_KEYWORD: &str = "landmarks";

/// Photos and reviews kept per hotel
const HOTEL_MEDIA_LIMIT: usize = 3;

struct LookupCache {
    coordinates: TtlCache<String, Coordinates>,
    hotels: TtlCache<String, Vec<HotelListing>>,
    photos: TtlCache<String, Vec<String>>,
}

impl LookupCache {
    fn new(ttl: Duration) -> Self {
        Self {
            coordinates: TtlCache::new(ttl),
            hotels: TtlCache::new(ttl),
            photos: TtlCache::new(ttl),
        }
    }
}

/// Coordinates, hotels and photos for a destination
pub struct PlacesLookup {
    client: Arc<dyn PlacesClient>,
    radius_m: u32,
    max_hotels: usize,
    max_landmarks: usize,
    cache: Option<LookupCache>,
}

impl PlacesLookup {
    pub fn new(client: Arc<dyn PlacesClient>, config: &MapsConfig) -> Self {
        Self {
            client,
            radius_m: config.radius_m,
            max_hotels: config.max_hotels,
            max_landmarks: config.max_landmarks,
            cache: None,
        }
    }

    /// Cache successful lookups for `ttl`
    pub fn with_cache(mut self, ttl: Duration) -> Self {
        debug!(?ttl, "PlacesLookup::with_cache: called");
        self.cache = Some(LookupCache::new(ttl));
        self
    }

    pub fn client(&self) -> &Arc<dyn PlacesClient> {
        &self.client
    }

    /// Geocode a destination; `None` when the provider has no match
    pub async fn coordinates(&self, destination: &str) -> Result<Option<Coordinates>, MapsError> {
        debug!(%destination, "PlacesLookup::coordinates: called");
        let key = normalize_key(destination);
        if let Some(hit) = self.cache.as_ref().and_then(|c| c.coordinates.get(&key)) {
            debug!(%destination, "PlacesLookup::coordinates: cache hit");
            return Ok(Some(hit));
        }

        let coords = self.client.geocode(destination).await?;
        if let (Some(cache), Some(coords)) = (&self.cache, coords) {
            cache.coordinates.insert(key, coords);
        }
        Ok(coords)
    }

    /// Geocode with the (0, 0) fallback, logging the cause
    pub async fn coordinates_or_zero(&self, destination: &str) -> Coordinates {
        match self.coordinates(destination).await {
            Ok(Some(coords)) => coords,
            Ok(None) => {
                warn!(%destination, "No geocoding result, using (0, 0)");
                Coordinates::zero()
            }
            Err(e) => {
                warn!(%destination, error = %e, "Geocoding failed, using (0, 0)");
                Coordinates::zero()
            }
        }
    }

    /// Hotels near the destination, in provider ranking order
    ///
    /// A destination that does not geocode has no hotels. A failing details
    /// call drops only that hotel.
    pub async fn hotels(&self, destination: &str) -> Result<Vec<HotelListing>, MapsError> {
        debug!(%destination, "PlacesLookup::hotels: called");
        let key = normalize_key(destination);
        if let Some(hit) = self.cache.as_ref().and_then(|c| c.hotels.get(&key)) {
            debug!(%destination, "PlacesLookup::hotels: cache hit");
            return Ok(hit);
        }

        let Some(location) = self.coordinates(destination).await? else {
            debug!(%destination, "PlacesLookup::hotels: destination not found");
            return Ok(Vec::new());
        };

        let query = NearbyQuery::new(location, self.radius_m, HOTEL_PLACE_TYPE, HOTEL_KEYWORD);
        let mut places = self.client.nearby_search(&query).await?;
        places.truncate(self.max_hotels);

        let details = join_all(places.iter().map(|p| self.client.place_details(&p.place_id))).await;
        let mut complete = true;
        let mut hotels = Vec::with_capacity(places.len());
        for (place, result) in places.iter().zip(details) {
            match result {
                Ok(details) => hotels.push(self.hotel_listing(place, details)),
                Err(e) => {
                    warn!(place_id = %place.place_id, error = %e, "Skipping hotel without details");
                    complete = false;
                }
            }
        }

        // a partial list is returned but never cached
        match &self.cache {
            Some(cache) if complete => cache.hotels.insert(key, hotels.clone()),
            Some(_) => debug!(%destination, "PlacesLookup::hotels: details incomplete, not caching"),
            None => {}
        }
        Ok(hotels)
    }

    /// First photo of each nearby landmark
    pub async fn landmark_photos(&self, destination: &str) -> Result<Vec<String>, MapsError> {
        debug!(%destination, "PlacesLookup::landmark_photos: called");
        let key = normalize_key(destination);
        if let Some(hit) = self.cache.as_ref().and_then(|c| c.photos.get(&key)) {
            debug!(%destination, "PlacesLookup::landmark_photos: cache hit");
            return Ok(hit);
        }

        let Some(location) = self.coordinates(destination).await? else {
            debug!(%destination, "PlacesLookup::landmark_photos: destination not found");
            return Ok(Vec::new());
        };

        let query = NearbyQuery::new(location, self.radius_m, LANDMARK_PLACE_TYPE, LANDMARK_KEYWORD);
        let places = self.client.nearby_search(&query).await?;
        let photos: Vec<String> = places
            .iter()
            .take(self.max_landmarks)
            .filter_map(|p| p.photo_references.first())
            .map(|r| self.client.photo_url(r))
            .collect();

        if let Some(cache) = &self.cache {
            cache.photos.insert(key, photos.clone());
        }
        Ok(photos)
    }

    fn hotel_listing(&self, place: &PlaceSummary, details: PlaceDetails) -> HotelListing {
        HotelListing {
            name: details.name.unwrap_or_else(|| "Unknown Hotel".to_string()),
            rating: details.rating,
            address: details
                .formatted_address
                .unwrap_or_else(|| "Address not available".to_string()),
            price_level: price_symbols(details.price_level),
            phone: details
                .formatted_phone_number
                .unwrap_or_else(|| "Phone not available".to_string()),
            website: details.website.unwrap_or_default(),
            photos: place
                .photo_references
                .iter()
                .take(HOTEL_MEDIA_LIMIT)
                .map(|r| self.client.photo_url(r))
                .collect(),
            reviews: details.reviews.into_iter().take(HOTEL_MEDIA_LIMIT).collect(),
            opening_hours: details.weekday_text,
        }
    }
}

/// Price tier as repeated euro signs, never fewer than one
fn price_symbols(level: Option<u8>) -> String {
    "€".repeat(usize::from(level.unwrap_or(1).max(1)))
}
