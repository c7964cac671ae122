//! Pot records ("areas" table)

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::LonLat;
use crate::error::Result;
use crate::persistence::{Record, Store, Table, short_id};

/// A collectible pot at a fixed spot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub id: String,
    pub lon: f64,
    pub lat: f64,
    /// Value in currency units
    pub pot: u64,
}

impl Area {
    pub fn position(&self) -> LonLat {
        LonLat::new(self.lon, self.lat)
    }
}

impl Record for Area {
    const TABLE: Table = Table::Areas;

    fn key(&self) -> &str {
        &self.id
    }
}

/// Store a single pot and return its id
pub fn create_area<R: Rng + ?Sized>(
    store: &Store,
    rng: &mut R,
    at: LonLat,
    pot: u64,
) -> Result<String> {
    let area = Area {
        id: short_id(rng),
        lon: at.lon,
        lat: at.lat,
        pot,
    };
    store.execute(&area)?;
    Ok(area.id)
}

pub fn get_area(store: &Store, area_id: &str) -> Result<Option<Area>> {
    store.fetch_one(area_id)
}

/// Remove a pot once a player has picked it up.
/// Returns the pot if it was still there.
pub fn collect_area(store: &Store, area_id: &str) -> Result<Option<Area>> {
    let Some(area) = store.fetch_one::<Area>(area_id)? else {
        return Ok(None);
    };
    if !store.delete::<Area>(area_id)? {
        // Someone else got there between the read and the delete
        return Ok(None);
    }
    log::info!("Collected pot {} worth {}", area.id, area.pot);
    Ok(Some(area))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_create_get_collect() {
        let store = Store::temporary().unwrap();
        let mut rng = Pcg32::seed_from_u64(3);

        let id = create_area(&store, &mut rng, LonLat::new(-0.1278, 51.5074), 20).unwrap();
        let area = get_area(&store, &id).unwrap().unwrap();
        assert_eq!(area.pot, 20);
        assert_eq!(area.position(), LonLat::new(-0.1278, 51.5074));

        let collected = collect_area(&store, &id).unwrap();
        assert_eq!(collected, Some(area));
        assert!(get_area(&store, &id).unwrap().is_none());
        assert!(collect_area(&store, &id).unwrap().is_none());
    }
}
