//! Pot denomination tiers
//!
//! Each tier covers an inclusive amount range. Neighbouring ranges share
//! their boundary value (20 falls in both [10,20] and [20,50]). When more
//! than one tier matches, the highest one wins, so 20 resolves to 4.

/// A denomination bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    /// Lowest amount in the bracket (inclusive)
    pub floor: u64,
    /// Highest amount in the bracket (inclusive), `None` for open-ended
    pub ceiling: Option<u64>,
    /// Value of every pot funded from this bracket
    pub pot: u64,
}

impl Tier {
    const fn new(floor: u64, ceiling: Option<u64>, pot: u64) -> Self {
        Self { floor, ceiling, pot }
    }

    pub fn matches(&self, amount: u64) -> bool {
        amount >= self.floor && self.ceiling.is_none_or(|c| amount <= c)
    }
}

/// Tiers in ascending order
pub const TIERS: [Tier; 9] = [
    Tier::new(10, Some(20), 1),
    Tier::new(20, Some(50), 4),
    Tier::new(50, Some(100), 10),
    Tier::new(100, Some(500), 20),
    Tier::new(500, Some(1000), 30),
    Tier::new(1000, Some(5000), 50),
    Tier::new(5000, Some(10000), 100),
    Tier::new(10000, Some(100000), 300),
    Tier::new(100000, None, 500),
];

/// Smallest amount that funds anything
pub const MIN_FUNDING: u64 = TIERS[0].floor;

/// Tier for `amount`, or `None` below the smallest floor
pub fn tier_for(amount: u64) -> Option<&'static Tier> {
    TIERS.iter().rev().find(|t| t.matches(amount))
}

/// Pot value for `amount`. Zero when no tier matches.
pub fn pot_denomination(amount: u64) -> u64 {
    tier_for(amount).map(|t| t.pot).unwrap_or(0)
}
