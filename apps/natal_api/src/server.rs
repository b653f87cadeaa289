use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use jyotish::chart::PlanetLongitudes;
use jyotish::{
    compute_natal_chart, parse_birth_datetime, BirthDetails, DashaOptions, DashaTimeline, Ephemeris, GeoLocation,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::ApiError;
use crate::geocode::Geocoder;
use crate::timezone::TimezoneResolver;

pub const BANNER: &str = "JyotiPath Swiss Ephemeris API running.";

#[derive(Clone)]
pub struct AppState {
    pub geocoder: Arc<dyn Geocoder>,
    pub timezones: Arc<dyn TimezoneResolver>,
    /// Swiss Ephemeris keeps global state, so calls are serialized.
    pub ephemeris: Arc<Mutex<Box<dyn Ephemeris>>>,
    pub dasha_options: DashaOptions,
}

#[derive(Debug, Default, Deserialize)]
struct NatalRequest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    time: Option<String>,
    #[serde(default)]
    place: Option<String>,
}

impl NatalRequest {
    fn required<'a>(&'a self) -> Result<(&'a str, &'a str, &'a str), ApiError> {
        let field = |v: &'a Option<String>| -> Option<&'a str> { v.as_deref().map(str::trim).filter(|s| !s.is_empty()) };
        match (field(&self.date), field(&self.time), field(&self.place)) {
            (Some(date), Some(time), Some(place)) => Ok((date, time, place)),
            _ => Err(ApiError::MissingFields),
        }
    }
}

#[derive(Debug, Serialize)]
struct InputReceived {
    name: String,
    place_name: String,
    timezone: String,
    tz_offset_hours: f64,
}

#[derive(Debug, Serialize)]
struct NatalResponse {
    input_received: InputReceived,
    planets: PlanetLongitudes,
    dasha: DashaTimeline,
    ayanamsha: String,
    julian_day: f64,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/compute_natal", post(compute_natal))
        .with_state(state)
}

pub async fn run_server(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn home() -> &'static str {
    BANNER
}

async fn compute_natal(State(state): State<AppState>, body: Bytes) -> Result<Json<NatalResponse>, ApiError> {
    // Bodies are read as JSON whatever the Content-Type; unreadable ones count as empty
    let request: NatalRequest = serde_json::from_slice(&body).unwrap_or_default();
    let (date, time, place) = request.required()?;

    let local = parse_birth_datetime(date, time).map_err(|e| ApiError::BadDateTime(e.to_string()))?;

    let found = state.geocoder.geocode(place).await.map_err(|e| {
        log::warn!("Geocoding {place:?} failed: {e}");
        ApiError::GeocodeFailed(e.to_string())
    })?;
    log::info!("{place:?} resolved to {} ({}, {})", found.display_name, found.lat, found.lon);

    let zone = state
        .timezones
        .resolve(found.lat, found.lon, local)
        .map_err(|e| {
            log::warn!("No timezone for ({}, {}): {e}", found.lat, found.lon);
            ApiError::TimezoneFailed(e.to_string())
        })?;

    let birth = BirthDetails {
        local,
        utc_offset_seconds: zone.offset_seconds,
        location: GeoLocation {
            lat: found.lat,
            lon: found.lon,
        },
    };
    let now = Utc::now().naive_utc();
    let chart = {
        let mut ephemeris = state.ephemeris.lock().await;
        compute_natal_chart(&mut **ephemeris, &birth, state.dasha_options, now)
    }
    .map_err(|e| {
        log::error!("Natal chart for {local} at {}: {e}", zone.name);
        ApiError::from(e)
    })?;

    Ok(Json(NatalResponse {
        input_received: InputReceived {
            name: request.name.clone().unwrap_or_else(|| "Unknown".to_string()),
            place_name: found.display_name,
            tz_offset_hours: zone.offset_hours(),
            timezone: zone.name,
        },
        planets: chart.planets,
        dasha: chart.dasha,
        ayanamsha: chart.ayanamsha,
        julian_day: chart.julian_day,
    }))
}
