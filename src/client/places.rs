// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client for the external places/geocoding provider.
//!
//! The provider is an opaque collaborator: responses are carried as
//! `PlaceRecord`s whose only contractually significant field is `place_id`.
//! The base URL is overridable for tests.

use crate::client::api::ClientError;
use crate::models::PlaceRecord;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// A latitude/longitude pair from geocoding.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Deserialize)]
struct SearchEnvelope {
    status: String,
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct DetailsEnvelope {
    status: String,
    #[serde(default)]
    result: serde_json::Value,
}

#[derive(Deserialize)]
struct GeocodeEnvelope {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Deserialize)]
struct GeocodeResult {
    geometry: GeocodeGeometry,
}

#[derive(Deserialize)]
struct GeocodeGeometry {
    location: LatLng,
}

/// Places provider client.
#[derive(Clone)]
pub struct PlacesClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PlacesClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Override the provider base URL (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Search for places of one category around a point.
    pub async fn search_nearby(
        &self,
        lat: f64,
        lng: f64,
        radius_m: u32,
        category: &str,
    ) -> Result<Vec<PlaceRecord>, ClientError> {
        let url = format!("{}/place/nearbysearch/json", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("location", format!("{},{}", lat, lng)),
                ("radius", radius_m.to_string()),
                ("type", category.to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await?;

        let envelope: SearchEnvelope = response.json().await?;
        check_status(&envelope.status)?;
        Ok(parse_places(envelope.results))
    }

    /// Search several categories and return the de-duplicated union,
    /// keeping first-seen order (the home screen's interest feed).
    pub async fn search_nearby_many(
        &self,
        lat: f64,
        lng: f64,
        radius_m: u32,
        categories: &[&str],
    ) -> Result<Vec<PlaceRecord>, ClientError> {
        let mut all = Vec::new();
        for category in categories {
            match self.search_nearby(lat, lng, radius_m, category).await {
                Ok(places) => all.extend(places),
                Err(err) => {
                    tracing::warn!(category = %category, error = %err, "Nearby search failed for category");
                }
            }
        }
        Ok(dedup_by_place_id(all))
    }

    /// Fetch details for one place, limited to the given fields.
    pub async fn get_details(
        &self,
        place_id: &str,
        fields: &[&str],
    ) -> Result<PlaceRecord, ClientError> {
        let url = format!("{}/place/details/json", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("place_id", place_id.to_string()),
                ("fields", fields.join(",")),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await?;

        let envelope: DetailsEnvelope = response.json().await?;
        check_status(&envelope.status)?;

        serde_json::from_value(envelope.result)
            .map_err(|_| ClientError::Api("Malformed place details".to_string()))
    }

    /// URL for a provider-hosted photo.
    pub fn photo_url(&self, photo_reference: &str, max_width: u32) -> String {
        format!(
            "{}/place/photo?maxwidth={}&photo_reference={}&key={}",
            self.base_url,
            max_width,
            urlencoding::encode(photo_reference),
            self.api_key
        )
    }

    /// Resolve free-form address text to coordinates.
    pub async fn geocode(&self, address: &str) -> Result<LatLng, ClientError> {
        let url = format!("{}/geocode/json", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("address", address.to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await?;

        let envelope: GeocodeEnvelope = response.json().await?;
        check_status(&envelope.status)?;

        envelope
            .results
            .into_iter()
            .next()
            .map(|r| r.geometry.location)
            .ok_or_else(|| ClientError::Api("Could not find location".to_string()))
    }
}

fn check_status(status: &str) -> Result<(), ClientError> {
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        other => Err(ClientError::Api(format!("API error: {}", other))),
    }
}

/// Parse provider results, skipping records without a usable `place_id`.
fn parse_places(results: Vec<serde_json::Value>) -> Vec<PlaceRecord> {
    results
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect()
}

/// Keep the first occurrence of each `place_id`.
fn dedup_by_place_id(places: Vec<PlaceRecord>) -> Vec<PlaceRecord> {
    let mut seen = std::collections::HashSet::new();
    places
        .into_iter()
        .filter(|p| seen.insert(p.place_id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let places = vec![
            PlaceRecord::new("p1", "Cafe X"),
            PlaceRecord::new("p2", "Museum"),
            PlaceRecord::new("p1", "Cafe X again"),
        ];

        let deduped = dedup_by_place_id(places);

        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].name, "Cafe X");
        assert_eq!(deduped[1].place_id, "p2");
    }

    #[test]
    fn test_parse_places_skips_malformed_records() {
        let results = vec![
            json!({ "place_id": "p1", "name": "Cafe X" }),
            json!({ "name": "no id" }),
        ];

        let places = parse_places(results);

        assert_eq!(places.len(), 1);
        assert_eq!(places[0].place_id, "p1");
    }

    #[test]
    fn test_photo_url_encodes_reference() {
        let client = PlacesClient::new("key123").with_base_url("http://example.test");
        let url = client.photo_url("ref/with spaces", 400);

        assert!(url.starts_with("http://example.test/place/photo?maxwidth=400"));
        assert!(url.contains("photo_reference=ref%2Fwith%20spaces"));
        assert!(url.ends_with("key=key123"));
    }

    #[test]
    fn test_check_status_accepts_zero_results() {
        assert!(check_status("OK").is_ok());
        assert!(check_status("ZERO_RESULTS").is_ok());
        assert!(check_status("REQUEST_DENIED").is_err());
    }
}
