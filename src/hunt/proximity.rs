//! Proximity lookup over stored pots
//!
//! Distance uses the spherical law of cosines, evaluated in this order:
//!
//! ```text
//! acos(sin(φq)·sin(φp) + cos(φq)·cos(φp)·cos(λq − λp))
//!     · 180/π · 60 · 1.1515 · 1.609344 · 1000
//! ```
//!
//! The acos argument is clamped to [-1, 1] so rounding near identical
//! points cannot produce NaN. There is no spatial index: every lookup is a
//! full scan of the areas table, stopping at `MAX_NEARBY_AREAS` hits.

use super::area::Area;
use crate::consts::*;
use crate::error::Result;
use crate::persistence::Store;
use crate::{LonLat, degrees, radians};

/// Great-circle distance in meters
pub fn distance_meters(from: LonLat, to: LonLat) -> f64 {
    if from == to {
        return 0.0;
    }

    let (lat_q, lat_p) = (radians(from.lat), radians(to.lat));
    let cos_angle = lat_q.sin() * lat_p.sin()
        + lat_q.cos() * lat_p.cos() * radians(from.lon - to.lon).cos();
    let angle = cos_angle.clamp(-1.0, 1.0).acos();

    degrees(angle) * MINUTES_PER_DEGREE * MILES_PER_NAUTICAL_MILE * KM_PER_MILE * METERS_PER_KM
}

/// Pots within `radius_m` meters of `at`, at most `MAX_NEARBY_AREAS`
pub fn find_areas_near(store: &Store, at: LonLat, radius_m: f64) -> Result<Vec<Area>> {
    let mut found = Vec::new();
    for area in store.scan::<Area>()? {
        let area = area?;
        if distance_meters(at, area.position()) <= radius_m {
            found.push(area);
            if found.len() == MAX_NEARBY_AREAS {
                break;
            }
        }
    }
    log::debug!(
        "{} pots within {}m of ({}, {})",
        found.len(),
        radius_m,
        at.lon,
        at.lat
    );
    Ok(found)
}
