use soroban_sdk::Env;

use crate::errors::BondError;
use crate::types::DataKey;

pub fn is_paused(e: &Env) -> bool {
    e.storage().instance().get(&DataKey::Paused).unwrap_or(false)
}

/// Gates create and release. Queries and admin operations stay available
/// while paused.
pub fn require_not_paused(e: &Env) -> Result<(), BondError> {
    if is_paused(e) {
        return Err(BondError::Paused);
    }
    Ok(())
}

pub fn set_paused(e: &Env, paused: bool) {
    e.storage().instance().set(&DataKey::Paused, &paused);
}
