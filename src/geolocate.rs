use crate::location::Coordinates;
use log::{info, warn};
use serde::Deserialize;
use std::time::Duration;
use tokio::time::timeout;

const GEO_URL: &str = "http://ip-api.com/json";
/// Bounded wait for the whole position lookup
const GEO_TIMEOUT: Duration = Duration::from_secs(5);

/// ip-api.com reports failures in-band, with `status` = "fail"
#[derive(Debug, Deserialize)]
struct GeoResponse {
    status: String,
    #[serde(default)]
    lat: f64,
    #[serde(default)]
    lon: f64,
}

/// One-shot position lookup via IP geolocation. `None` means the lookup
/// failed, timed out, or the service refused; callers fall back to the
/// default city and the session keeps no position.
pub async fn current_position() -> Option<Coordinates> {
    position_from(GEO_URL, GEO_TIMEOUT).await
}

async fn position_from(url: &str, limit: Duration) -> Option<Coordinates> {
    match timeout(limit, lookup(url)).await {
        Ok(position) => position,
        Err(_) => {
            warn!("Geolocation timed out after {limit:?}");
            None
        }
    }
}

async fn lookup(url: &str) -> Option<Coordinates> {
    let response = match reqwest::get(url).await {
        Ok(response) => response,
        Err(err) => {
            warn!("Geolocation request failed: {err}");
            return None;
        }
    };
    if !response.status().is_success() {
        warn!("Geolocation service returned {}", response.status());
        return None;
    }
    let geo: GeoResponse = match response.json().await {
        Ok(geo) => geo,
        Err(err) => {
            warn!("Error parsing geolocation response: {err}");
            return None;
        }
    };
    if geo.status != "success" {
        warn!("Geolocation lookup refused: status={}", geo.status);
        return None;
    }
    info!("Geolocated to ({:.4}, {:.4})", geo.lat, geo.lon);
    Some(Coordinates {
        latitude: geo.lat,
        longitude: geo.lon,
    })
}
