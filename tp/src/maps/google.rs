//! Google Maps web services client
//!
//! Implements PlacesClient over the Geocoding, Nearby Search, Place Details
//! and Place Photo endpoints.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::{MapsError, NearbyQuery, PlaceDetails, PlaceSummary, PlacesClient};
use crate::config::MapsConfig;
use crate::domain::{Coordinates, Review};

/// Fields requested from Place Details
const DETAIL_FIELDS: &str =
    "name,rating,formatted_address,price_level,website,formatted_phone_number,reviews,opening_hours,photo";

/// Google Maps API client
pub struct GoogleMapsClient {
    api_key: String,
    base_url: String,
    http: Client,
    photo_max_width: u32,
    timeout: Duration,
}

impl GoogleMapsClient {
    /// Create a new client from configuration
    ///
    /// Reads the API key from the environment variable named in config.
    pub fn from_config(config: &MapsConfig) -> Result<Self, MapsError> {
        debug!(base_url = %config.base_url, "GoogleMapsClient::from_config: called");
        let api_key = config.get_api_key().map_err(|e| MapsError::Config(e.to_string()))?;
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| MapsError::Config(format!("Invalid maps base-url '{}': {}", base_url, e)))?;

        let timeout = config.timeout();
        let http = Client::builder().timeout(timeout).build().map_err(MapsError::Network)?;

        Ok(Self {
            api_key,
            base_url,
            http,
            photo_max_width: config.photo_max_width,
            timeout,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/maps/api/{}", self.base_url, path)
    }

    /// GET a JSON endpoint with the API key appended
    async fn get_json<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> Result<T, MapsError> {
        debug!(%path, "get_json: called");
        let response = self
            .http
            .get(self.endpoint(path))
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MapsError::Timeout(self.timeout)
                } else {
                    MapsError::Network(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, %path, "get_json: HTTP error");
            return Err(MapsError::Http(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| MapsError::InvalidResponse(e.to_string()))
    }
}

/// `OK` and `ZERO_RESULTS` are both successful answers
fn check_status(status: &str, error_message: Option<String>) -> Result<(), MapsError> {
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        other => Err(MapsError::Api {
            status: other.to_string(),
            message: error_message.unwrap_or_default(),
        }),
    }
}

fn geocode_result(response: GeocodeResponse) -> Result<Option<Coordinates>, MapsError> {
    check_status(&response.status, response.error_message)?;
    Ok(response
        .results
        .into_iter()
        .next()
        .map(|r| Coordinates::new(r.geometry.location.lat, r.geometry.location.lng)))
}

fn nearby_result(response: NearbyResponse) -> Result<Vec<PlaceSummary>, MapsError> {
    check_status(&response.status, response.error_message)?;
    Ok(response
        .results
        .into_iter()
        .map(|p| PlaceSummary {
            place_id: p.place_id,
            name: p.name.unwrap_or_default(),
            photo_references: p.photos.into_iter().filter_map(|ph| ph.photo_reference).collect(),
        })
        .collect())
}

fn details_result(response: DetailsResponse) -> Result<PlaceDetails, MapsError> {
    if response.status != "OK" {
        return Err(MapsError::Api {
            status: response.status,
            message: response.error_message.unwrap_or_default(),
        });
    }
    let result = response
        .result
        .ok_or_else(|| MapsError::InvalidResponse("details response without result".to_string()))?;

    Ok(PlaceDetails {
        name: result.name,
        rating: result.rating,
        formatted_address: result.formatted_address,
        price_level: result.price_level,
        website: result.website,
        formatted_phone_number: result.formatted_phone_number,
        reviews: result.reviews,
        weekday_text: result.opening_hours.map(|h| h.weekday_text).unwrap_or_default(),
    })
}

#[async_trait]
impl PlacesClient for GoogleMapsClient {
    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>, MapsError> {
        debug!(%address, "geocode: called");
        let response: GeocodeResponse = self
            .get_json("geocode/json", &[("address", address.to_string())])
            .await?;
        geocode_result(response)
    }

    async fn nearby_search(&self, query: &NearbyQuery) -> Result<Vec<PlaceSummary>, MapsError> {
        debug!(place_type = %query.place_type, radius_m = query.radius_m, "nearby_search: called");
        let mut params = vec![
            (
                "location",
                format!("{},{}", query.location.latitude, query.location.longitude),
            ),
            ("radius", query.radius_m.to_string()),
            ("type", query.place_type.clone()),
        ];
        if let Some(keyword) = &query.keyword {
            params.push(("keyword", keyword.clone()));
        }

        let response: NearbyResponse = self.get_json("place/nearbysearch/json", &params).await?;
        nearby_result(response)
    }

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, MapsError> {
        debug!(%place_id, "place_details: called");
        let response: DetailsResponse = self
            .get_json(
                "place/details/json",
                &[("place_id", place_id.to_string()), ("fields", DETAIL_FIELDS.to_string())],
            )
            .await?;
        details_result(response)
    }

    fn photo_url(&self, photo_reference: &str) -> String {
        let width = self.photo_max_width.to_string();
        let params = [
            ("maxwidth", width.as_str()),
            ("photoreference", photo_reference),
            ("key", self.api_key.as_str()),
        ];
        match Url::parse_with_params(&self.endpoint("place/photo"), &params) {
            Ok(url) => url.to_string(),
            // base_url was validated in from_config, so this only guards odd references
            Err(_) => format!(
                "{}?maxwidth={}&photoreference={}&key={}",
                self.endpoint("place/photo"),
                width,
                photo_reference,
                self.api_key
            ),
        }
    }
}

// Google Maps API response types

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct NearbyResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<NearbyPlace>,
}

#[derive(Debug, Deserialize)]
struct NearbyPlace {
    place_id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    photos: Vec<PhotoRef>,
}

#[derive(Debug, Deserialize)]
struct PhotoRef {
    #[serde(default)]
    photo_reference: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    result: Option<DetailsBody>,
}

#[derive(Debug, Deserialize)]
struct DetailsBody {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default)]
    price_level: Option<u8>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    formatted_phone_number: Option<String>,
    #[serde(default)]
    reviews: Vec<Review>,
    #[serde(default)]
    opening_hours: Option<OpeningHours>,
}

#[derive(Debug, Deserialize)]
struct OpeningHours {
    #[serde(default)]
    weekday_text: Vec<String>,
}
