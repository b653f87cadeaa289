//! Place name to coordinates.

use async_trait::async_trait;
use jyotipath_config::GeocoderSettings;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub lat: f64,
    pub lon: f64,
    pub display_name: String,
}

#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("Place not found")]
    NotFound,
    #[error("geocoder returned an unreadable coordinate: {0}")]
    BadCoordinate(String),
    #[error("geocoder request failed: {0}")]
    Request(#[from] reqwest::Error),
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, place: &str) -> Result<GeocodeResult, GeocodeError>;
}

/// One entry of a Nominatim `format=json` search result.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

/// Geocoder backed by the OpenStreetMap Nominatim search API.
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new(settings: &GeocoderSettings) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, place: &str) -> Result<GeocodeResult, GeocodeError> {
        let places: Vec<NominatimPlace> = self
            .client
            .get(&self.base_url)
            .query(&[("q", place), ("format", "json"), ("limit", "1")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        first_place(places, place)
    }
}

fn first_place(places: Vec<NominatimPlace>, query: &str) -> Result<GeocodeResult, GeocodeError> {
    let found = places.into_iter().next().ok_or(GeocodeError::NotFound)?;
    let lat = parse_coordinate(&found.lat)?;
    let lon = parse_coordinate(&found.lon)?;
    Ok(GeocodeResult {
        lat,
        lon,
        display_name: found.display_name.unwrap_or_else(|| query.to_string()),
    })
}

fn parse_coordinate(raw: &str) -> Result<f64, GeocodeError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| GeocodeError::BadCoordinate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Vec<NominatimPlace> {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn takes_first_result() {
        let places = parse(
            r#"[{"place_id": 1, "lat": "28.6138954", "lon": "77.2090057",
                 "display_name": "New Delhi, Delhi, India", "importance": 0.8}]"#,
        );
        let found = first_place(places, "new delhi").unwrap();
        assert_eq!(found.lat, 28.6138954);
        assert_eq!(found.lon, 77.2090057);
        assert_eq!(found.display_name, "New Delhi, Delhi, India");
    }

    #[test]
    fn display_name_falls_back_to_query() {
        let places = parse(r#"[{"lat": "51.5", "lon": "-0.12"}]"#);
        let found = first_place(places, "London").unwrap();
        assert_eq!(found.display_name, "London");
        assert_eq!(found.lon, -0.12);
    }

    #[test]
    fn empty_result_is_not_found() {
        let err = first_place(Vec::new(), "Atlantis").unwrap_err();
        assert!(matches!(err, GeocodeError::NotFound));
        assert_eq!(err.to_string(), "Place not found");
    }

    #[test]
    fn garbage_coordinate_is_rejected() {
        let places = parse(r#"[{"lat": "north", "lon": "1.0"}]"#);
        assert!(matches!(first_place(places, "x"), Err(GeocodeError::BadCoordinate(_))));
    }
}
