//! Games ("game" table)

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{RENDER_PIN_MAX, RENDER_PIN_MIN};
use crate::error::Result;
use crate::persistence::{Record, Store, Table, short_id};

/// A treasure hunt owned by one wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    /// Owning wallet id
    pub wallet: String,
    pub wallet_key: String,
    pub title: String,
    /// Coins collected so far
    pub coins: u64,
    /// Total funded amount
    pub amount: u64,
    /// PIN required to render the game map
    pub render_pin: u32,
}

impl Record for Game {
    const TABLE: Table = Table::Game;

    fn key(&self) -> &str {
        &self.id
    }
}

/// Fields a game update may change. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GamePatch {
    wallet: Option<String>,
    wallet_key: Option<String>,
    title: Option<String>,
    coins: Option<u64>,
    amount: Option<u64>,
    render_pin: Option<u32>,
}

impl GamePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wallet(mut self, wallet: impl Into<String>) -> Self {
        self.wallet = Some(wallet.into());
        self
    }

    pub fn wallet_key(mut self, key: impl Into<String>) -> Self {
        self.wallet_key = Some(key.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn coins(mut self, coins: u64) -> Self {
        self.coins = Some(coins);
        self
    }

    pub fn amount(mut self, amount: u64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn render_pin(mut self, pin: u32) -> Self {
        self.render_pin = Some(pin);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(self, game: &mut Game) {
        if let Some(v) = self.wallet {
            game.wallet = v;
        }
        if let Some(v) = self.wallet_key {
            game.wallet_key = v;
        }
        if let Some(v) = self.title {
            game.title = v;
        }
        if let Some(v) = self.coins {
            game.coins = v;
        }
        if let Some(v) = self.amount {
            game.amount = v;
        }
        if let Some(v) = self.render_pin {
            game.render_pin = v;
        }
    }
}

pub fn create_game<R: Rng + ?Sized>(
    store: &Store,
    rng: &mut R,
    wallet: &str,
    wallet_key: &str,
    title: &str,
) -> Result<Game> {
    let game = Game {
        id: short_id(rng),
        wallet: wallet.to_string(),
        wallet_key: wallet_key.to_string(),
        title: title.to_string(),
        coins: 0,
        amount: 0,
        render_pin: rng.random_range(RENDER_PIN_MIN..=RENDER_PIN_MAX),
    };
    store.execute(&game)?;
    log::info!("Created game {} ({})", game.id, game.title);
    store.fetch_written(&game.id)
}

pub fn get_game(store: &Store, game_id: &str) -> Result<Option<Game>> {
    store.fetch_one(game_id)
}

pub fn list_games(store: &Store) -> Result<Vec<Game>> {
    store.fetch_all()
}

/// Games owned by any of `wallet_ids`
pub fn list_games_for_wallets<S: AsRef<str>>(store: &Store, wallet_ids: &[S]) -> Result<Vec<Game>> {
    store.fetch_where(|g: &Game| wallet_ids.iter().any(|w| w.as_ref() == g.wallet))
}

/// Apply `patch` and return the updated game, or `None` if it does not exist
pub fn update_game(store: &Store, game_id: &str, patch: GamePatch) -> Result<Option<Game>> {
    let Some(mut game) = get_game(store, game_id)? else {
        return Ok(None);
    };
    if patch.is_empty() {
        return Ok(Some(game));
    }
    patch.apply(&mut game);
    store.execute(&game)?;
    Ok(Some(game))
}

/// Returns whether the game existed
pub fn delete_game(store: &Store, game_id: &str) -> Result<bool> {
    let existed = store.delete::<Game>(game_id)?;
    if existed {
        log::info!("Deleted game {}", game_id);
    }
    Ok(existed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_create_then_get() {
        let store = Store::temporary().unwrap();
        let mut rng = Pcg32::seed_from_u64(1);
        let game = create_game(&store, &mut rng, "w1", "key1", "Hyde Park hunt").unwrap();

        assert_eq!(game.coins, 0);
        assert_eq!(game.amount, 0);
        assert!((RENDER_PIN_MIN..=RENDER_PIN_MAX).contains(&game.render_pin));
        assert_eq!(get_game(&store, &game.id).unwrap(), Some(game));
        assert!(get_game(&store, "missing").unwrap().is_none());
    }

    #[test]
    fn test_partial_update_keeps_other_fields() {
        let store = Store::temporary().unwrap();
        let mut rng = Pcg32::seed_from_u64(2);
        let game = create_game(&store, &mut rng, "w1", "key1", "old title").unwrap();

        let patch = GamePatch::new().title("new title").coins(7);
        let updated = update_game(&store, &game.id, patch).unwrap().unwrap();

        assert_eq!(updated.title, "new title");
        assert_eq!(updated.coins, 7);
        assert_eq!(updated.wallet, game.wallet);
        assert_eq!(updated.wallet_key, game.wallet_key);
        assert_eq!(updated.amount, game.amount);
        assert_eq!(updated.render_pin, game.render_pin);
        assert_eq!(get_game(&store, &game.id).unwrap(), Some(updated));
    }

    #[test]
    fn test_update_missing_game() {
        let store = Store::temporary().unwrap();
        let patch = GamePatch::new().amount(5);
        assert!(update_game(&store, "nope", patch).unwrap().is_none());
    }

    #[test]
    fn test_list_and_delete() {
        let store = Store::temporary().unwrap();
        let mut rng = Pcg32::seed_from_u64(3);
        let a = create_game(&store, &mut rng, "w1", "k", "a").unwrap();
        let b = create_game(&store, &mut rng, "w2", "k", "b").unwrap();
        create_game(&store, &mut rng, "w3", "k", "c").unwrap();

        assert_eq!(list_games(&store).unwrap().len(), 3);

        let mut mine = list_games_for_wallets(&store, &["w1", "w2"]).unwrap();
        mine.sort_by(|x, y| x.title.cmp(&y.title));
        assert_eq!(mine, vec![a.clone(), b]);

        assert!(delete_game(&store, &a.id).unwrap());
        assert!(!delete_game(&store, &a.id).unwrap());
        assert_eq!(list_games(&store).unwrap().len(), 2);
    }
}
