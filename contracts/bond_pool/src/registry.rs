//! Pair configuration storage.
//!
//! Configs live in persistent storage keyed by the pairable token address.
//! Validation happens here so every write path shares the same rules.

use soroban_sdk::{Address, Env};

use crate::errors::BondError;
use crate::math::FEE_SCALE;
use crate::types::{DataKey, PairConfig, PairParams};

pub fn get_pair(e: &Env, token: &Address) -> Option<PairConfig> {
    e.storage().persistent().get(&DataKey::Pair(token.clone()))
}

pub fn require_pair(e: &Env, token: &Address) -> Result<PairConfig, BondError> {
    get_pair(e, token).ok_or(BondError::InvalidConfig)
}

pub fn set_pair(e: &Env, token: &Address, config: &PairConfig) {
    e.storage()
        .persistent()
        .set(&DataKey::Pair(token.clone()), config);
}

/// Admin-input rules shared by create and update:
/// positive cap, floor within the cap, fee rates within the scale.
pub fn validate_params(params: &PairParams) -> Result<(), BondError> {
    if params.max_stake <= 0 {
        return Err(BondError::InvalidConfig);
    }
    if params.min_bond < 0 || params.min_bond > params.max_stake {
        return Err(BondError::InvalidConfig);
    }
    if params.entry_fee_rate > FEE_SCALE || params.exit_fee_rate > FEE_SCALE {
        return Err(BondError::InvalidConfig);
    }
    Ok(())
}
