mod error;
mod geocode;
mod server;
mod timezone;

use anyhow::Context;
use jyotish::{Ephemeris, SwissEphemerisAdapter};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::geocode::NominatimGeocoder;
use crate::server::AppState;
use crate::timezone::TzfResolver;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = jyotipath_config::load_config()?;
    let addr = config.bind_addr()?;

    let adapter = SwissEphemerisAdapter::new(&config.ephemeris).context("Failed to initialize Swiss Ephemeris")?;
    log::info!(
        "Ephemeris ready: ayanamsa {}, data path {:?}, dasha horizon {}",
        adapter.ayanamsa().name(),
        adapter.ephemeris_path(),
        config.dasha.horizon_year
    );
    let ephemeris: Box<dyn Ephemeris> = Box::new(adapter);

    let geocoder = NominatimGeocoder::new(&config.geocoder).context("Failed to build geocoder client")?;

    let state = AppState {
        geocoder: Arc::new(geocoder),
        timezones: Arc::new(TzfResolver::new()),
        ephemeris: Arc::new(Mutex::new(ephemeris)),
        dasha_options: config.dasha.options(),
    };

    server::run_server(state, addr).await
}
