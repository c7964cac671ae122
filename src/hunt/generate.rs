//! Area generation: scatter pots over a funded rectangle

use rand::Rng;

use super::area::create_area;
use super::tier::pot_denomination;
use crate::error::Result;
use crate::persistence::Store;
use crate::{BoundingBox, LonLat};

/// How a funding amount splits into pots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PotPlan {
    /// Value of each pot (0 when the amount is below every tier)
    pub denomination: u64,
    /// Number of pots, `amount / denomination`
    pub count: u64,
}

impl PotPlan {
    pub fn for_amount(amount: u64) -> Self {
        let denomination = pot_denomination(amount);
        let count = amount.checked_div(denomination).unwrap_or(0);
        Self {
            denomination,
            count,
        }
    }

    /// Total value placed on the map (the remainder stays unallocated)
    pub fn total(&self) -> u64 {
        self.denomination * self.count
    }
}

/// Uniform draw between `a` and `b` in either order
#[inline]
pub fn uniform_between<R: Rng + ?Sized>(rng: &mut R, a: f64, b: f64) -> f64 {
    a + (b - a) * rng.random::<f64>()
}

/// Random point inside `area`. Longitude and latitude are drawn independently.
pub fn random_point<R: Rng + ?Sized>(rng: &mut R, area: &BoundingBox) -> LonLat {
    let lon = uniform_between(rng, area.top_left.lon, area.bottom_right.lon);
    let lat = uniform_between(rng, area.top_left.lat, area.bottom_right.lat);
    LonLat::new(lon, lat)
}

/// Turn `amount` into pots scattered over `area` and store them.
///
/// Pots are written one at a time. If a write fails the error is returned
/// and the pots already written stay in the store.
pub fn generate_areas<R: Rng + ?Sized>(
    store: &Store,
    rng: &mut R,
    amount: u64,
    area: &BoundingBox,
) -> Result<()> {
    scatter_pots(rng, amount, area, |rng, at, pot| {
        create_area(store, rng, at, pot).map(|_| ())
    })
}

/// Plan the pots for `amount` and hand each one to `write`, stopping at the
/// first error.
pub fn scatter_pots<R, W>(
    rng: &mut R,
    amount: u64,
    area: &BoundingBox,
    mut write: W,
) -> Result<()>
where
    R: Rng + ?Sized,
    W: FnMut(&mut R, LonLat, u64) -> Result<()>,
{
    let plan = PotPlan::for_amount(amount);
    if plan.count == 0 {
        log::warn!("Amount {} is below the smallest tier, no pots generated", amount);
        return Ok(());
    }

    log::info!(
        "Generating {} pots of {} over {:?}",
        plan.count,
        plan.denomination,
        area
    );

    for written in 0..plan.count {
        let at = random_point(rng, area);
        if let Err(e) = write(rng, at, plan.denomination) {
            log::warn!("Pot generation stopped after {} of {} pots", written, plan.count);
            return Err(e);
        }
    }

    log::debug!("Pot generation done ({} unallocated)", amount - plan.total());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::hunt::area::Area;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn london() -> BoundingBox {
        BoundingBox::new(LonLat::new(-0.20, 51.55), LonLat::new(-0.05, 51.45))
    }

    #[test]
    fn test_plan() {
        assert_eq!(PotPlan::for_amount(5), PotPlan { denomination: 0, count: 0 });
        assert_eq!(PotPlan::for_amount(19), PotPlan { denomination: 1, count: 19 });
        assert_eq!(PotPlan::for_amount(20), PotPlan { denomination: 4, count: 5 });
        assert_eq!(PotPlan::for_amount(99), PotPlan { denomination: 10, count: 9 });
        assert_eq!(PotPlan::for_amount(250_000), PotPlan { denomination: 500, count: 500 });
        assert_eq!(PotPlan::for_amount(99).total(), 90);
    }

    #[test]
    fn test_generate_count_and_value() {
        for amount in [10, 23, 77, 450, 1234, 7000] {
            let store = Store::temporary().unwrap();
            let mut rng = Pcg32::seed_from_u64(amount);
            generate_areas(&store, &mut rng, amount, &london()).unwrap();

            let plan = PotPlan::for_amount(amount);
            let pots: Vec<Area> = store.fetch_all().unwrap();
            assert_eq!(pots.len() as u64, amount / plan.denomination, "amount {}", amount);
            assert!(pots.iter().all(|p| p.pot == plan.denomination));
        }
    }

    #[test]
    fn test_generate_below_minimum_is_empty() {
        let store = Store::temporary().unwrap();
        let mut rng = Pcg32::seed_from_u64(1);
        generate_areas(&store, &mut rng, 9, &london()).unwrap();
        generate_areas(&store, &mut rng, 0, &london()).unwrap();
        assert_eq!(store.count::<Area>().unwrap(), 0);
    }

    #[test]
    fn test_points_stay_inside_box() {
        let mut rng = Pcg32::seed_from_u64(42);
        let area = london();
        for _ in 0..10_000 {
            assert!(area.contains(random_point(&mut rng, &area)));
        }

        // Corner order does not matter
        let flipped = BoundingBox::new(area.bottom_right, area.top_left);
        for _ in 0..1_000 {
            assert!(area.contains(random_point(&mut rng, &flipped)));
        }
    }

    #[test]
    fn test_points_spread_over_box() {
        let mut rng = Pcg32::seed_from_u64(9);
        let area = london();
        let center = area.center();
        let (mut west, mut north) = (0, 0);
        let n = 4_000;
        for _ in 0..n {
            let p = random_point(&mut rng, &area);
            if p.lon < center.lon {
                west += 1;
            }
            if p.lat > center.lat {
                north += 1;
            }
        }
        // Loose bound: each half should get roughly half the points
        assert!((1_600..2_400).contains(&west), "west {}", west);
        assert!((1_600..2_400).contains(&north), "north {}", north);
    }

    #[test]
    fn test_failed_write_keeps_earlier_pots() {
        let store = Store::temporary().unwrap();
        let mut rng = Pcg32::seed_from_u64(21);
        let mut calls = 0;

        // 100 sats -> 5 pots of 20; the fourth write fails
        let result = scatter_pots(&mut rng, 100, &london(), |rng, at, pot| {
            calls += 1;
            if calls == 4 {
                return Err(Error::Io(std::io::Error::other("disk full")));
            }
            create_area(&store, rng, at, pot).map(|_| ())
        });

        assert!(matches!(result, Err(Error::Io(_))));
        assert_eq!(calls, 4);
        let pots: Vec<Area> = store.fetch_all().unwrap();
        assert_eq!(pots.len(), 3);
        assert!(pots.iter().all(|p| p.pot == 20));
    }

    #[test]
    fn test_generation_is_reproducible() {
        let a = Store::temporary().unwrap();
        let b = Store::temporary().unwrap();
        generate_areas(&a, &mut Pcg32::seed_from_u64(5), 300, &london()).unwrap();
        generate_areas(&b, &mut Pcg32::seed_from_u64(5), 300, &london()).unwrap();
        assert_eq!(a.fetch_all::<Area>().unwrap(), b.fetch_all::<Area>().unwrap());
    }
}
