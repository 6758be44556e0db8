use serde::{Deserialize, Serialize};
use servicechat_catalog::locations::{Coordinates, LocationKind, ServiceLocation, directory};
use url::Url;

use crate::error::ConversationError;

const MAPS_SEARCH: &str = "https://www.google.com/maps/search/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyLocation {
    pub location: ServiceLocation,
    /// Unknown when the user's position is not shared.
    pub distance_km: Option<f64>,
}

/// Offices of one kind, nearest first when the user's position is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationFinder {
    pub kind: LocationKind,
    pub origin: Option<Coordinates>,
    entries: Vec<NearbyLocation>,
}

impl LocationFinder {
    pub fn new(kind: LocationKind, origin: Option<Coordinates>) -> Self {
        Self {
            kind,
            origin,
            entries: nearby(kind, origin),
        }
    }

    pub fn entries(&self) -> &[NearbyLocation] {
        &self.entries
    }

    /// Case-insensitive match on name, suburb or address. An empty query
    /// matches everything.
    pub fn search(&self, query: &str) -> Vec<&NearbyLocation> {
        let needle = query.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|e| {
                needle.is_empty()
                    || [&e.location.name, &e.location.suburb, &e.location.address]
                        .iter()
                        .any(|s| s.to_lowercase().contains(&needle))
            })
            .collect()
    }
}

/// Directory entries for `kind`, with distances from `origin` if given.
pub fn nearby(kind: LocationKind, origin: Option<Coordinates>) -> Vec<NearbyLocation> {
    let mut entries: Vec<NearbyLocation> = directory(kind)
        .iter()
        .map(|location| NearbyLocation {
            distance_km: origin.map(|o| o.distance_km(&location.coordinates)),
            location: location.clone(),
        })
        .collect();
    if origin.is_some() {
        entries.sort_by(|a, b| a.distance_km.unwrap_or(f64::MAX).total_cmp(&b.distance_km.unwrap_or(f64::MAX)));
    }
    entries
}

/// A maps search link for the office.
pub fn maps_url(location: &ServiceLocation) -> Result<Url, ConversationError> {
    let query = format!("{}, {}, {}", location.name, location.address, location.suburb);
    Ok(Url::parse_with_params(MAPS_SEARCH, &[("api", "1"), ("query", query.as_str())])?)
}

/// Parse `"lat,lng"` as typed by the user.
pub fn parse_coordinates(s: &str) -> Option<Coordinates> {
    let (lat, lng) = s.split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lng: f64 = lng.trim().parse().ok()?;
    ((-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng)).then_some(Coordinates { lat, lng })
}
