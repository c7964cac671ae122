//! Crate-wide error type

use crate::persistence::Table;

/// Everything that can go wrong talking to the record store or accounts service
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("record store: {0}")]
    Store(#[from] sled::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("record encoding: {0}")]
    Codec(#[from] serde_json::Error),

    /// A row that was just written could not be read back
    #[error("{table} record {id} missing right after it was written")]
    Missing { table: Table, id: String },

    /// No player holds this read key
    #[error("no player registered for read key {0}")]
    UnknownPlayer(String),

    /// Amount or area change on a funding whose pots already exist
    #[error("funding {0} is confirmed, its amount and area are fixed")]
    FundingSettled(String),

    #[error("accounts service: {0}")]
    Accounts(String),
}

pub type Result<T> = std::result::Result<T, Error>;
