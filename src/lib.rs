//! SatoshiGo - pots of sats scattered over a map
//!
//! Core modules:
//! - `hunt`: Pot tiers, area generation and proximity lookup
//! - `records`: Games, fundings, players and their sessions
//! - `persistence`: Typed record store over `sled`
//! - `accounts`: Accounts/wallet service boundary
//! - `settings`: File-backed configuration

pub mod accounts;
pub mod error;
pub mod hunt;
pub mod persistence;
pub mod records;
pub mod settings;

pub use error::{Error, Result};
pub use persistence::Store;
pub use settings::Settings;

use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Arc minutes per degree (one nautical mile per minute)
    pub const MINUTES_PER_DEGREE: f64 = 60.0;
    /// Statute miles per nautical mile
    pub const MILES_PER_NAUTICAL_MILE: f64 = 1.1515;
    /// Kilometres per statute mile
    pub const KM_PER_MILE: f64 = 1.609344;
    pub const METERS_PER_KM: f64 = 1000.0;

    /// Proximity queries never return more rows than this
    pub const MAX_NEARBY_AREAS: usize = 100;

    /// Render PIN range (inclusive)
    pub const RENDER_PIN_MIN: u32 = 999;
    pub const RENDER_PIN_MAX: u32 = 9999;

    /// Label given to the wallet created for every new player
    pub const PLAYER_WALLET_LABEL: &str = "satsgo";
}

/// A point on the map, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Funded rectangle, given by two opposite corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top_left: LonLat,
    pub bottom_right: LonLat,
}

impl BoundingBox {
    pub const fn new(top_left: LonLat, bottom_right: LonLat) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// Closed containment check, independent of corner order
    pub fn contains(&self, p: LonLat) -> bool {
        let (lon_lo, lon_hi) = ordered(self.top_left.lon, self.bottom_right.lon);
        let (lat_lo, lat_hi) = ordered(self.top_left.lat, self.bottom_right.lat);
        (lon_lo..=lon_hi).contains(&p.lon) && (lat_lo..=lat_hi).contains(&p.lat)
    }

    /// Midpoint of the rectangle
    pub fn center(&self) -> LonLat {
        LonLat::new(
            (self.top_left.lon + self.bottom_right.lon) / 2.0,
            (self.top_left.lat + self.bottom_right.lat) / 2.0,
        )
    }
}

#[inline]
fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Degrees to radians, as `deg * π / 180`
#[inline]
pub fn radians(deg: f64) -> f64 {
    deg * std::f64::consts::PI / 180.0
}

/// Radians to degrees, as `rad * 180 / π`
#[inline]
pub fn degrees(rad: f64) -> f64 {
    rad * 180.0 / std::f64::consts::PI
}
