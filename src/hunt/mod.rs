//! Treasure hunt core
//!
//! - Tiers turn a funding amount into a pot denomination
//! - Generation scatters pots over a funded rectangle (seeded RNG only)
//! - Proximity answers "which pots are within R meters of me"

pub mod area;
pub mod generate;
pub mod proximity;
pub mod tier;

pub use area::{Area, collect_area, create_area, get_area};
pub use generate::{PotPlan, generate_areas, random_point, scatter_pots};
pub use proximity::{distance_meters, find_areas_near};
pub use tier::{TIERS, Tier, pot_denomination};
