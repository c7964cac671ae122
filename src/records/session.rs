//! Player sessions ("players" table)
//!
//! Tracks which game each player is currently hunting in, keyed by the
//! player's read key.

use serde::{Deserialize, Serialize};

use super::player::get_player_by_in_key;
use crate::error::{Error, Result};
use crate::persistence::{Record, Store, Table};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSession {
    pub in_key: String,
    pub game_id: String,
    /// Copied from the player on first registration
    pub user_name: String,
}

impl Record for PlayerSession {
    const TABLE: Table = Table::Players;

    fn key(&self) -> &str {
        &self.in_key
    }
}

/// Put the player holding `in_key` into `game_id`.
///
/// First registration copies the player's name. Later ones only move the
/// player to the new game.
pub fn register_session(store: &Store, in_key: &str, game_id: &str) -> Result<PlayerSession> {
    let session = match get_session(store, in_key)? {
        Some(mut session) => {
            session.game_id = game_id.to_string();
            session
        }
        None => {
            let player = get_player_by_in_key(store, in_key)?
                .ok_or_else(|| Error::UnknownPlayer(in_key.to_string()))?;
            PlayerSession {
                in_key: in_key.to_string(),
                game_id: game_id.to_string(),
                user_name: player.user_name,
            }
        }
    };
    store.execute(&session)?;
    log::debug!("{} is now playing {}", session.user_name, session.game_id);
    store.fetch_written(in_key)
}

pub fn get_session(store: &Store, in_key: &str) -> Result<Option<PlayerSession>> {
    store.fetch_one(in_key)
}

/// Everyone currently playing `game_id`
pub fn list_sessions(store: &Store, game_id: &str) -> Result<Vec<PlayerSession>> {
    store.fetch_where(|s: &PlayerSession| s.game_id == game_id)
}
