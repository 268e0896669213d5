//! Per-account bond records.
//!
//! One record per (pairable token, account), persistent storage. An absent
//! record reads as the zeroed default, so callers never observe a partial
//! state: a bond either exists with `liquidity_amount > 0` or is fully
//! cleared.

use soroban_sdk::{Address, Env};

use crate::types::{BondRecord, DataKey};

pub fn get_bond(e: &Env, token: &Address, account: &Address) -> BondRecord {
    e.storage()
        .persistent()
        .get(&DataKey::Bond(token.clone(), account.clone()))
        .unwrap_or_else(BondRecord::zeroed)
}

pub fn set_bond(e: &Env, token: &Address, account: &Address, record: &BondRecord) {
    e.storage()
        .persistent()
        .set(&DataKey::Bond(token.clone(), account.clone()), record);
}

pub fn clear_bond(e: &Env, token: &Address, account: &Address) {
    e.storage()
        .persistent()
        .remove(&DataKey::Bond(token.clone(), account.clone()));
}
