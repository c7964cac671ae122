//! Game bookkeeping records
//!
//! Plain create/read/update/delete over the record store. Updates take a
//! typed patch listing exactly the fields that may change.

pub mod funding;
pub mod game;
pub mod player;
pub mod session;

pub use funding::{
    Funding, FundingPatch, NewFunding, confirm_funding, create_funding, get_funding,
    get_funding_by_payment_hash, list_fundings, update_funding,
};
pub use game::{
    Game, GamePatch, create_game, delete_game, get_game, list_games, list_games_for_wallets,
    update_game,
};
pub use player::{
    Player, PlayerPatch, create_player, get_player, get_player_by_in_key, update_player,
};
pub use session::{PlayerSession, get_session, list_sessions, register_session};
