//! Directory of in-person service locations.
//!
//! Offline roadmap steps name a [`LocationKind`]; the directory lists the
//! offices of that kind. Kinds without a directory (e.g. "Various Government
//! Agencies") return an empty slice.

use std::sync::LazyLock;

use jiff::civil::Weekday;
use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    ServiceNswCentre,
    MedicareServiceCentre,
    BankBranch,
    LocalCouncilOrRedCross,
    VariousGovernmentAgencies,
}

impl LocationKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::ServiceNswCentre => "Service NSW Centre",
            Self::MedicareServiceCentre => "Medicare Service Centre",
            Self::BankBranch => "Bank Branch",
            Self::LocalCouncilOrRedCross => "Local Council or Red Cross",
            Self::VariousGovernmentAgencies => "Various Government Agencies",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Great-circle distance in kilometres (haversine).
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        let (lat1, lat2) = (self.lat.to_radians(), other.lat.to_radians());
        let dlat = (other.lat - self.lat).to_radians();
        let dlng = (other.lng - self.lng).to_radians();
        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
    }
}

/// Opening hours, Monday first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours(pub [String; 7]);

impl OpeningHours {
    pub fn on(&self, day: Weekday) -> &str {
        &self.0[day.to_monday_zero_offset() as usize]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLocation {
    pub id: String,
    pub name: String,
    pub address: String,
    pub suburb: String,
    pub postcode: String,
    pub phone: String,
    pub opening_hours: OpeningHours,
    pub services: Vec<String>,
    pub wait_time: String,
    pub coordinates: Coordinates,
}

struct LocationSpec<'a> {
    id: &'a str,
    name: &'a str,
    address: &'a str,
    suburb: &'a str,
    postcode: &'a str,
    phone: &'a str,
    hours: [&'a str; 7],
    services: &'a [&'a str],
    wait_time: &'a str,
    lat: f64,
    lng: f64,
}

impl From<LocationSpec<'_>> for ServiceLocation {
    fn from(s: LocationSpec<'_>) -> Self {
        Self {
            id: s.id.to_string(),
            name: s.name.to_string(),
            address: s.address.to_string(),
            suburb: s.suburb.to_string(),
            postcode: s.postcode.to_string(),
            phone: s.phone.to_string(),
            opening_hours: OpeningHours(s.hours.map(String::from)),
            services: s.services.iter().map(|x| x.to_string()).collect(),
            wait_time: s.wait_time.to_string(),
            coordinates: Coordinates { lat: s.lat, lng: s.lng },
        }
    }
}

const SERVICE_NSW_HOURS: [&str; 7] = [
    "8:30am - 5:00pm",
    "8:30am - 5:00pm",
    "8:30am - 5:00pm",
    "8:30am - 5:00pm",
    "8:30am - 5:00pm",
    "9:00am - 4:00pm",
    "Closed",
];

const BANK_HOURS: [&str; 7] = [
    "9:30am - 4:00pm",
    "9:30am - 4:00pm",
    "9:30am - 4:00pm",
    "9:30am - 5:00pm",
    "9:30am - 4:00pm",
    "Closed",
    "Closed",
];

static SERVICE_NSW: LazyLock<Vec<ServiceLocation>> = LazyLock::new(|| {
    vec![
        LocationSpec {
            id: "sydney-cbd",
            name: "Service NSW Sydney CBD",
            address: "Level 1, 2-24 Rawson Place",
            suburb: "Sydney",
            postcode: "2000",
            phone: "13 77 88",
            hours: SERVICE_NSW_HOURS,
            services: &[
                "Driver License",
                "Vehicle Registration",
                "Birth Certificates",
                "Working with Children Check",
            ],
            wait_time: "15-30 minutes",
            lat: -33.8688,
            lng: 151.2093,
        }
        .into(),
        LocationSpec {
            id: "parramatta",
            name: "Service NSW Parramatta",
            address: "Ground Floor, 255 Church Street",
            suburb: "Parramatta",
            postcode: "2150",
            phone: "13 77 88",
            hours: SERVICE_NSW_HOURS,
            services: &[
                "Driver License",
                "Vehicle Registration",
                "Birth Certificates",
                "Business Registration",
            ],
            wait_time: "20-35 minutes",
            lat: -33.815,
            lng: 151.0,
        }
        .into(),
        LocationSpec {
            id: "bondi-junction",
            name: "Service NSW Bondi Junction",
            address: "Level 1, 500 Oxford Street",
            suburb: "Bondi Junction",
            postcode: "2022",
            phone: "13 77 88",
            hours: SERVICE_NSW_HOURS,
            services: &["Driver License", "Vehicle Registration", "Birth Certificates"],
            wait_time: "10-25 minutes",
            lat: -33.8915,
            lng: 151.2477,
        }
        .into(),
    ]
});

static MEDICARE: LazyLock<Vec<ServiceLocation>> = LazyLock::new(|| {
    vec![
        LocationSpec {
            id: "medicare-sydney",
            name: "Medicare Service Centre Sydney",
            address: "Level 2, 388 George Street",
            suburb: "Sydney",
            postcode: "2000",
            phone: "132 011",
            hours: [
                "8:30am - 4:30pm",
                "8:30am - 4:30pm",
                "8:30am - 4:30pm",
                "8:30am - 4:30pm",
                "8:30am - 4:30pm",
                "Closed",
                "Closed",
            ],
            services: &[
                "Medicare Enrollment",
                "Medicare Card Replacement",
                "Newborn Enrollment",
            ],
            wait_time: "25-40 minutes",
            lat: -33.8688,
            lng: 151.2073,
        }
        .into(),
        LocationSpec {
            id: "medicare-parramatta",
            name: "Medicare Service Centre Parramatta",
            address: "Shop 4019, Level 4, Westfield Parramatta",
            suburb: "Parramatta",
            postcode: "2150",
            phone: "132 011",
            hours: [
                "9:00am - 5:30pm",
                "9:00am - 5:30pm",
                "9:00am - 5:30pm",
                "9:00am - 9:00pm",
                "9:00am - 5:30pm",
                "9:00am - 5:00pm",
                "10:00am - 4:00pm",
            ],
            services: &[
                "Medicare Enrollment",
                "Medicare Card Replacement",
                "Newborn Enrollment",
            ],
            wait_time: "30-45 minutes",
            lat: -33.815,
            lng: 151.002,
        }
        .into(),
    ]
});

static BANKS: LazyLock<Vec<ServiceLocation>> = LazyLock::new(|| {
    vec![
        LocationSpec {
            id: "cba-sydney",
            name: "Commonwealth Bank Sydney CBD",
            address: "341 George Street",
            suburb: "Sydney",
            postcode: "2000",
            phone: "13 2221",
            hours: BANK_HOURS,
            services: &[
                "Account Opening",
                "Home Loans",
                "Business Banking",
                "International Services",
            ],
            wait_time: "15-30 minutes",
            lat: -33.8688,
            lng: 151.2063,
        }
        .into(),
        LocationSpec {
            id: "anz-sydney",
            name: "ANZ Sydney CBD",
            address: "20 Martin Place",
            suburb: "Sydney",
            postcode: "2000",
            phone: "13 1314",
            hours: BANK_HOURS,
            services: &[
                "Account Opening",
                "Home Loans",
                "Business Banking",
                "International Services",
            ],
            wait_time: "20-35 minutes",
            lat: -33.8688,
            lng: 151.2103,
        }
        .into(),
    ]
});

/// All offices of a kind, in directory order.
pub fn directory(kind: LocationKind) -> &'static [ServiceLocation] {
    match kind {
        LocationKind::ServiceNswCentre => &SERVICE_NSW,
        LocationKind::MedicareServiceCentre => &MEDICARE,
        LocationKind::BankBranch => &BANKS,
        LocationKind::LocalCouncilOrRedCross | LocationKind::VariousGovernmentAgencies => &[],
    }
}
