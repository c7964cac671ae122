//! Accounts/wallet service boundary
//!
//! The real service lives outside this crate. `LocalAccounts` is an
//! in-process ledger good enough for tests and the CLI demo.

use std::collections::HashMap;
use std::sync::Mutex;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::persistence::short_id;

/// Freshly created account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
}

/// A user and the ids of the wallets they own
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub wallets: Vec<String>,
}

/// A wallet with its spend (admin) and read (in) keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub admin_key: String,
    pub in_key: String,
}

/// What the game needs from the accounts service
pub trait Accounts {
    fn create_account(&self) -> Result<Account>;

    fn get_user(&self, user_id: &str) -> Result<Option<User>>;

    fn create_wallet(&self, user_id: &str, name: &str) -> Result<Wallet>;
}

#[derive(Default)]
struct Ledger {
    users: HashMap<String, User>,
    wallets: HashMap<String, Wallet>,
}

/// In-memory accounts service with deterministic ids
pub struct LocalAccounts {
    rng: Mutex<Pcg32>,
    ledger: Mutex<Ledger>,
}

impl LocalAccounts {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(Pcg32::seed_from_u64(seed)),
            ledger: Mutex::new(Ledger::default()),
        }
    }

    fn next_id(&self) -> Result<String> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| Error::Accounts("id generator lock poisoned".into()))?;
        Ok(short_id(&mut *rng))
    }

    fn with_ledger<T>(&self, f: impl FnOnce(&mut Ledger) -> Result<T>) -> Result<T> {
        let mut ledger = self
            .ledger
            .lock()
            .map_err(|_| Error::Accounts("ledger lock poisoned".into()))?;
        f(&mut ledger)
    }

    /// Look up a wallet by id
    pub fn wallet(&self, wallet_id: &str) -> Result<Option<Wallet>> {
        self.with_ledger(|ledger| Ok(ledger.wallets.get(wallet_id).cloned()))
    }
}

impl Accounts for LocalAccounts {
    fn create_account(&self) -> Result<Account> {
        let id = self.next_id()?;
        self.with_ledger(|ledger| {
            ledger.users.insert(
                id.clone(),
                User {
                    id: id.clone(),
                    wallets: Vec::new(),
                },
            );
            Ok(())
        })?;
        log::debug!("Created account {}", id);
        Ok(Account { id })
    }

    fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        self.with_ledger(|ledger| Ok(ledger.users.get(user_id).cloned()))
    }

    fn create_wallet(&self, user_id: &str, name: &str) -> Result<Wallet> {
        let wallet = Wallet {
            id: self.next_id()?,
            user_id: user_id.to_string(),
            name: name.to_string(),
            admin_key: self.next_id()?,
            in_key: self.next_id()?,
        };
        self.with_ledger(|ledger| {
            let user = ledger
                .users
                .get_mut(user_id)
                .ok_or_else(|| Error::Accounts(format!("unknown user {}", user_id)))?;
            user.wallets.push(wallet.id.clone());
            ledger.wallets.insert(wallet.id.clone(), wallet.clone());
            Ok(())
        })?;
        log::debug!("Created wallet {} ({}) for user {}", wallet.id, name, user_id);
        Ok(wallet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_then_wallet() {
        let accounts = LocalAccounts::new(1);
        let account = accounts.create_account().unwrap();
        let wallet = accounts.create_wallet(&account.id, "satsgo").unwrap();

        let user = accounts.get_user(&account.id).unwrap().unwrap();
        assert_eq!(user.wallets, vec![wallet.id.clone()]);
        assert_ne!(wallet.admin_key, wallet.in_key);
        assert_eq!(accounts.wallet(&wallet.id).unwrap(), Some(wallet));
    }

    #[test]
    fn test_wallet_for_unknown_user() {
        let accounts = LocalAccounts::new(1);
        let err = accounts.create_wallet("ghost", "satsgo").unwrap_err();
        assert!(matches!(err, Error::Accounts(_)));
        assert!(accounts.get_user("ghost").unwrap().is_none());
    }
}
