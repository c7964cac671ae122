//! Players ("player" table)

use serde::{Deserialize, Serialize};

use crate::accounts::Accounts;
use crate::consts::PLAYER_WALLET_LABEL;
use crate::error::{Error, Result};
use crate::persistence::{Record, Store, Table};

/// A player, keyed by their accounts-service user id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub user_name: String,
    pub wallet_id: String,
    pub admin_key: String,
    /// Read key, also the player's session key
    pub in_key: String,
}

impl Record for Player {
    const TABLE: Table = Table::Player;

    fn key(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerPatch {
    user_name: Option<String>,
}

impl PlayerPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_name(mut self, name: impl Into<String>) -> Self {
        self.user_name = Some(name.into());
        self
    }

    pub fn apply(self, player: &mut Player) {
        if let Some(v) = self.user_name {
            player.user_name = v;
        }
    }
}

/// Open an account and wallet for a new player and store them
pub fn create_player<A: Accounts + ?Sized>(
    store: &Store,
    accounts: &A,
    user_name: &str,
) -> Result<Player> {
    let account = accounts.create_account()?;
    let user = accounts
        .get_user(&account.id)?
        .ok_or_else(|| Error::Accounts(format!("account {} vanished after creation", account.id)))?;
    let wallet = accounts.create_wallet(&user.id, PLAYER_WALLET_LABEL)?;

    let player = Player {
        id: user.id,
        user_name: user_name.to_string(),
        wallet_id: wallet.id,
        admin_key: wallet.admin_key,
        in_key: wallet.in_key,
    };
    store.execute(&player)?;
    log::info!("Created player {} ({})", player.id, player.user_name);
    store.fetch_written(&player.id)
}

pub fn get_player(store: &Store, user_id: &str) -> Result<Option<Player>> {
    store.fetch_one(user_id)
}

pub fn get_player_by_in_key(store: &Store, in_key: &str) -> Result<Option<Player>> {
    store.fetch_first_where(|p: &Player| p.in_key == in_key)
}

pub fn update_player(store: &Store, user_id: &str, patch: PlayerPatch) -> Result<Option<Player>> {
    let Some(mut player) = get_player(store, user_id)? else {
        return Ok(None);
    };
    patch.apply(&mut player);
    store.execute(&player)?;
    Ok(Some(player))
}
