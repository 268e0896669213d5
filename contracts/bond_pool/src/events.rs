use soroban_sdk::{Address, Env, Symbol};

use crate::types::PairParams;

/// Emitted when a pair configuration is created or replaced.
///
/// # Topics
/// * `Symbol` - "pair_configured"
/// * `Address` - The pairable token
///
/// # Data
/// * `PairParams` - The new tunable parameters
/// * `i128` - Reward token pulled into custody alongside the update
pub fn emit_pair_configured(e: &Env, token: &Address, params: &PairParams, reward_top_up: i128) {
    let topics = (Symbol::new(e, "pair_configured"), token.clone());
    let data = (params.clone(), reward_top_up);
    e.events().publish(topics, data);
}

/// Emitted when a bond is created or accumulated onto.
///
/// # Topics
/// * `Symbol` - "bond_created"
/// * `Address` - The pairable token
/// * `Address` - The bonding account
///
/// # Data
/// * `i128` - Reward token staked into the position
/// * `i128` - Pairable token staked into the position
/// * `i128` - Liquidity minted by the AMM
/// * `u64` - The (new) release date
pub fn emit_bond_created(
    e: &Env,
    token: &Address,
    account: &Address,
    reward_staked: i128,
    principal_staked: i128,
    liquidity_minted: i128,
    release_date: u64,
) {
    let topics = (Symbol::new(e, "bond_created"), token.clone(), account.clone());
    let data = (reward_staked, principal_staked, liquidity_minted, release_date);
    e.events().publish(topics, data);
}

/// Emitted when a matured bond is released.
///
/// # Topics
/// * `Symbol` - "bond_released"
/// * `Address` - The pairable token
/// * `Address` - The releasing account
///
/// # Data
/// * `i128` - Gross reward token returned by the AMM
/// * `i128` - Gross pairable token returned by the AMM
/// * `i128` - Liquidity burned
/// * `i128` - Reward-side exit fee forwarded to the treasury
/// * `i128` - Principal-side exit fee forwarded to the treasury
#[allow(clippy::too_many_arguments)]
pub fn emit_bond_released(
    e: &Env,
    token: &Address,
    account: &Address,
    reward_released: i128,
    principal_released: i128,
    liquidity_burned: i128,
    reward_fee: i128,
    principal_fee: i128,
) {
    let topics = (
        Symbol::new(e, "bond_released"),
        token.clone(),
        account.clone(),
    );
    let data = (
        reward_released,
        principal_released,
        liquidity_burned,
        reward_fee,
        principal_fee,
    );
    e.events().publish(topics, data);
}

/// Emitted once when a predecessor deployment's record is imported.
///
/// # Topics
/// * `Symbol` - "bond_migrated"
/// * `Address` - The pairable token
/// * `Address` - The beneficiary account
///
/// # Data
/// * `i128` - Liquidity transferred in directly
/// * `u64` - The imported release date
pub fn emit_bond_migrated(
    e: &Env,
    token: &Address,
    beneficiary: &Address,
    liquidity: i128,
    release_date: u64,
) {
    let topics = (
        Symbol::new(e, "bond_migrated"),
        token.clone(),
        beneficiary.clone(),
    );
    e.events().publish(topics, (liquidity, release_date));
}

/// Emitted when the treasury account changes.
///
/// # Topics
/// * `Symbol` - "treasury_changed"
///
/// # Data
/// * `Address` - Previous treasury
/// * `Address` - New treasury
pub fn emit_treasury_changed(e: &Env, old: &Address, new: &Address) {
    let topics = (Symbol::new(e, "treasury_changed"),);
    e.events().publish(topics, (old.clone(), new.clone()));
}

/// Emitted when the reward-token reference changes.
pub fn emit_reward_token_changed(e: &Env, old: &Address, new: &Address) {
    let topics = (Symbol::new(e, "reward_token_changed"),);
    e.events().publish(topics, (old.clone(), new.clone()));
}

/// Emitted when the AMM gateway reference changes.
pub fn emit_gateway_changed(e: &Env, old: &Address, new: &Address) {
    let topics = (Symbol::new(e, "gateway_changed"),);
    e.events().publish(topics, (old.clone(), new.clone()));
}

/// Emitted on pause / unpause.
pub fn emit_pause_state(e: &Env, paused: bool) {
    let name = if paused { "paused" } else { "unpaused" };
    e.events().publish((Symbol::new(e, name),), paused);
}
