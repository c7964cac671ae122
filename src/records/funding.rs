//! Funding events ("funding" table)
//!
//! A funding is created unconfirmed when an invoice is issued. Once the
//! payment settles it is confirmed, which credits the game and scatters
//! pots over the funded rectangle.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::game::{GamePatch, get_game, update_game};
use crate::BoundingBox;
use crate::error::{Error, Result};
use crate::hunt::generate_areas;
use crate::persistence::{Record, Store, Table, short_id};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Funding {
    pub id: String,
    pub game_id: String,
    /// Wallet that paid
    pub wallet: String,
    pub area: BoundingBox,
    pub amount: u64,
    pub payment_hash: String,
    pub confirmed: bool,
}

impl Record for Funding {
    const TABLE: Table = Table::Funding;

    fn key(&self) -> &str {
        &self.id
    }
}

/// Everything needed to open a funding event
#[derive(Debug, Clone, PartialEq)]
pub struct NewFunding {
    pub game_id: String,
    pub wallet: String,
    pub area: BoundingBox,
    pub amount: u64,
    pub payment_hash: String,
}

/// Fields a funding update may change. Confirmation is not one of them:
/// only `confirm_funding` settles a funding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FundingPatch {
    wallet: Option<String>,
    area: Option<BoundingBox>,
    amount: Option<u64>,
}

impl FundingPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wallet(mut self, wallet: impl Into<String>) -> Self {
        self.wallet = Some(wallet.into());
        self
    }

    pub fn area(mut self, area: BoundingBox) -> Self {
        self.area = Some(area);
        self
    }

    pub fn amount(mut self, amount: u64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Whether the patch touches what the pots were generated from
    pub fn changes_pots(&self) -> bool {
        self.area.is_some() || self.amount.is_some()
    }

    pub fn apply(self, funding: &mut Funding) {
        if let Some(v) = self.wallet {
            funding.wallet = v;
        }
        if let Some(v) = self.area {
            funding.area = v;
        }
        if let Some(v) = self.amount {
            funding.amount = v;
        }
    }
}

pub fn create_funding<R: Rng + ?Sized>(
    store: &Store,
    rng: &mut R,
    new: NewFunding,
) -> Result<Funding> {
    let funding = Funding {
        id: short_id(rng),
        game_id: new.game_id,
        wallet: new.wallet,
        area: new.area,
        amount: new.amount,
        payment_hash: new.payment_hash,
        confirmed: false,
    };
    store.execute(&funding)?;
    log::info!(
        "Funding {} opened for game {} ({} sats)",
        funding.id,
        funding.game_id,
        funding.amount
    );
    store.fetch_written(&funding.id)
}

pub fn get_funding(store: &Store, funding_id: &str) -> Result<Option<Funding>> {
    store.fetch_one(funding_id)
}

pub fn get_funding_by_payment_hash(store: &Store, payment_hash: &str) -> Result<Option<Funding>> {
    store.fetch_first_where(|f: &Funding| f.payment_hash == payment_hash)
}

/// All funding events of a game
pub fn list_fundings(store: &Store, game_id: &str) -> Result<Vec<Funding>> {
    store.fetch_where(|f: &Funding| f.game_id == game_id)
}

/// Patch the funding paid by `payment_hash`.
///
/// Amount and area are frozen once the funding is confirmed.
pub fn update_funding(
    store: &Store,
    payment_hash: &str,
    patch: FundingPatch,
) -> Result<Option<Funding>> {
    let Some(mut funding) = get_funding_by_payment_hash(store, payment_hash)? else {
        return Ok(None);
    };
    if funding.confirmed && patch.changes_pots() {
        return Err(Error::FundingSettled(funding.id));
    }
    patch.apply(&mut funding);
    store.execute(&funding)?;
    Ok(Some(funding))
}

/// Mark the funding paid by `payment_hash` as settled, credit its game and
/// generate its pots. Confirming twice does nothing the second time.
pub fn confirm_funding<R: Rng + ?Sized>(
    store: &Store,
    rng: &mut R,
    payment_hash: &str,
) -> Result<Option<Funding>> {
    let Some(funding) = get_funding_by_payment_hash(store, payment_hash)? else {
        log::warn!("No funding for payment {}", payment_hash);
        return Ok(None);
    };
    if funding.confirmed {
        log::debug!("Funding {} already confirmed", funding.id);
        return Ok(Some(funding));
    }

    let funding = Funding {
        confirmed: true,
        ..funding
    };
    store.execute(&funding)?;

    match get_game(store, &funding.game_id)? {
        Some(game) => {
            let total = game.amount.saturating_add(funding.amount);
            update_game(store, &game.id, GamePatch::new().amount(total))?;
        }
        None => log::warn!(
            "Funding {} confirmed for unknown game {}",
            funding.id,
            funding.game_id
        ),
    }

    generate_areas(store, rng, funding.amount, &funding.area)?;
    Ok(Some(funding))
}
