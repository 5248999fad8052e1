//! Scoped reentrancy lock for entry points that move funds.

use soroban_sdk::Env;

use crate::types::{DataKey, Error};

/// Holds the marketplace lock for as long as it is alive.
///
/// The flag lives in instance storage so a nested invocation of any guarded
/// entry point sees it. Dropping the guard clears the flag on every exit path,
/// including early `?` returns.
pub struct ReentrancyGuard<'a> {
    env: &'a Env,
}

impl<'a> ReentrancyGuard<'a> {
    pub fn acquire(env: &'a Env) -> Result<Self, Error> {
        let storage = env.storage().instance();
        if storage.get(&DataKey::Locked).unwrap_or(false) {
            return Err(Error::ReentrantCall);
        }
        storage.set(&DataKey::Locked, &true);
        Ok(ReentrancyGuard { env })
    }
}

impl Drop for ReentrancyGuard<'_> {
    fn drop(&mut self) {
        self.env.storage().instance().remove(&DataKey::Locked);
    }
}
