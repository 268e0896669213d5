//! Liquidity Bond Pool Contract
//!
//! Lets a holder of a pairable token lock it together with the protocol
//! reward token into a liquidity position on an external AMM, in exchange
//! for a delayed, fee-adjusted return of that position. The contract owns
//! the pair configuration registry, the per-account bond ledger, the
//! fee/quote math, and the create/release state machine wrapping the AMM.
//!
//! ## Key design decisions
//!
//! - **One bond per account × token**: repeated `create_bond` calls
//!   accumulate onto the single record and reset its lock; they never
//!   create a second position.
//! - **Snapshot fee terms**: the exit fee is captured at creation time, so
//!   later registry edits cannot retroactively change locked positions.
//! - **Checks-Effects-Interactions**: every validation runs before the
//!   first transfer; on release the ledger entry is cleared *before* the
//!   external AMM call so it cannot be replayed.
//! - **Explicit reentrancy guard**: a storage lock held for the duration
//!   of each state-mutating call is the backstop against the untrusted AMM
//!   calling back mid-operation.
//! - **Checked arithmetic everywhere**: amounts use `i128` with checked
//!   mul/add; overflow surfaces as `ArithmeticOverflow`, never wraps.

#![no_std]

mod errors;
mod events;
mod gateway;
mod ledger;
mod math;
mod pausable;
mod registry;
mod types;

pub use errors::BondError;
pub use gateway::{AmmGateway, AmmGatewayClient};
pub use math::FEE_SCALE;
pub use types::{BondPreview, BondRecord, PairConfig, PairParams};

use soroban_sdk::{contract, contractimpl, token::TokenClient, Address, Env};
use types::DataKey;






#[cfg(test)]
mod test_release_bond;


#[cfg(test)]
mod test_migration;


/// Deadline slack handed to the AMM on release; bounds how long a
/// caller's funds can be stuck mid-removal.
const RELEASE_GRACE_SECS: u64 = 300;

/// Ledger TTL for gateway spend approvals.
const ALLOWANCE_TTL_LEDGERS: u32 = 1_000;

// ─── Helpers ───────────────────────────────────────────────────────────────

fn require_admin(e: &Env, caller: &Address) -> Result<(), BondError> {
    caller.require_auth();
    let stored: Address = e
        .storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(BondError::NotInitialized)?;
    if stored != *caller {
        return Err(BondError::Unauthorized);
    }
    Ok(())
}

fn reward_token_addr(e: &Env) -> Result<Address, BondError> {
    e.storage()
        .instance()
        .get(&DataKey::RewardToken)
        .ok_or(BondError::NotInitialized)
}

fn gateway_addr(e: &Env) -> Result<Address, BondError> {
    e.storage()
        .instance()
        .get(&DataKey::AmmGateway)
        .ok_or(BondError::NotInitialized)
}

fn treasury_addr(e: &Env) -> Result<Address, BondError> {
    e.storage()
        .instance()
        .get(&DataKey::Treasury)
        .ok_or(BondError::NotInitialized)
}

fn guard_enter(e: &Env) -> Result<(), BondError> {
    let locked: bool = e.storage().instance().get(&DataKey::Guard).unwrap_or(false);
    if locked {
        return Err(BondError::ReentrantCall);
    }
    e.storage().instance().set(&DataKey::Guard, &true);
    Ok(())
}

fn guard_exit(e: &Env) {
    e.storage().instance().set(&DataKey::Guard, &false);
}

/// Pull `amount` of `token` from `from` into contract custody.
/// Requires a prior allowance from `from` to this contract.
fn pull(e: &Env, token: &Address, from: &Address, amount: i128) -> Result<(), BondError> {
    let contract = e.current_contract_address();
    match TokenClient::new(e, token).try_transfer_from(&contract, from, &contract, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(BondError::TransferFailed),
    }
}

/// Push `amount` of `token` out of contract custody to `to`.
fn push(e: &Env, token: &Address, to: &Address, amount: i128) -> Result<(), BondError> {
    let contract = e.current_contract_address();
    match TokenClient::new(e, token).try_transfer(&contract, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(BondError::TransferFailed),
    }
}

/// Grant `spender` a bounded-TTL allowance over `amount` of `token` held
/// by the contract.
fn approve(e: &Env, token: &Address, spender: &Address, amount: i128) -> Result<(), BondError> {
    let contract = e.current_contract_address();
    let expiry = e
        .ledger()
        .sequence()
        .saturating_add(ALLOWANCE_TTL_LEDGERS);
    match TokenClient::new(e, token).try_approve(&contract, spender, &amount, &expiry) {
        Ok(Ok(())) => Ok(()),
        _ => Err(BondError::TransferFailed),
    }
}

fn bump_instance_total(e: &Env, key: DataKey, delta: i128) -> Result<(), BondError> {
    let current: i128 = e.storage().instance().get(&key).unwrap_or(0);
    e.storage().instance().set(&key, &math::add(current, delta)?);
    Ok(())
}

// ─── Contract ──────────────────────────────────────────────────────────────

#[contract]
pub struct BondPool;

#[contractimpl]
impl BondPool {
    // ── Setup ──────────────────────────────────────────────────────────────

    /// One-time initialization: controlling authority, reward token,
    /// AMM gateway, and treasury.
    pub fn initialize(
        e: Env,
        admin: Address,
        reward_token: Address,
        amm_gateway: Address,
        treasury: Address,
    ) -> Result<(), BondError> {
        if e.storage().instance().has(&DataKey::Admin) {
            return Err(BondError::AlreadyInitialized);
        }
        admin.require_auth();

        e.storage().instance().set(&DataKey::Admin, &admin);
        e.storage().instance().set(&DataKey::RewardToken, &reward_token);
        e.storage().instance().set(&DataKey::AmmGateway, &amm_gateway);
        e.storage().instance().set(&DataKey::Treasury, &treasury);
        e.storage().instance().set(&DataKey::Paused, &false);
        e.storage().instance().set(&DataKey::Guard, &false);
        e.storage().instance().set(&DataKey::TotalRewardPaired, &0_i128);
        e.storage()
            .instance()
            .set(&DataKey::TotalRewardAllocated, &0_i128);
        e.storage().instance().set(&DataKey::MigrationDone, &false);
        Ok(())
    }

    // ── Pair registry ──────────────────────────────────────────────────────

    /// Create or fully replace a token's pair configuration. Running
    /// aggregates are preserved on update and zeroed on first creation.
    /// A positive `reward_top_up` is pulled from the admin into custody
    /// (admin must have approved the contract) before the config write.
    pub fn upsert_pair(
        e: Env,
        admin: Address,
        token: Address,
        params: PairParams,
        reward_top_up: i128,
    ) -> Result<PairConfig, BondError> {
        require_admin(&e, &admin)?;
        guard_enter(&e)?;
        let result = Self::do_upsert_pair(&e, &admin, &token, params, reward_top_up);
        guard_exit(&e);
        result
    }

    fn do_upsert_pair(
        e: &Env,
        admin: &Address,
        token: &Address,
        params: PairParams,
        reward_top_up: i128,
    ) -> Result<PairConfig, BondError> {
        registry::validate_params(&params)?;
        if reward_top_up < 0 {
            return Err(BondError::InvalidAmount);
        }

        let existing = registry::get_pair(e, token);
        if let Some(current) = &existing {
            // Lowering the cap below what is already locked would break the
            // cap invariant for every future call.
            if params.max_stake < current.total_locked {
                return Err(BondError::InvalidConfig);
            }
        }

        if reward_top_up > 0 {
            let reward = reward_token_addr(e)?;
            pull(e, &reward, admin, reward_top_up)?;
            bump_instance_total(e, DataKey::TotalRewardAllocated, reward_top_up)?;
        }

        let (total_locked, total_paired_reward, total_liquidity) = match &existing {
            Some(c) => (c.total_locked, c.total_paired_reward, c.total_liquidity),
            None => (0, 0, 0),
        };
        let config = PairConfig {
            display_name: params.display_name.clone(),
            max_stake: params.max_stake,
            min_bond: params.min_bond,
            entry_fee_rate: params.entry_fee_rate,
            exit_fee_rate: params.exit_fee_rate,
            locking_period: params.locking_period,
            total_locked,
            total_paired_reward,
            total_liquidity,
        };
        registry::set_pair(e, token, &config);

        events::emit_pair_configured(e, token, &params, reward_top_up);
        Ok(config)
    }

    // ── Bond lifecycle ─────────────────────────────────────────────────────

    /// Lock `principal_in` of the pairable token together with up to
    /// `reward_desired` of the reward token into an AMM position.
    ///
    /// Requirements (checked before any transfer):
    /// - `token` has a pair configuration
    /// - `principal_in >= min_bond` and would not push `total_locked`
    ///   past `max_stake`
    /// - `reward_desired > 0` and the pool holds at least that much reward
    /// - the caller has approved the contract for `principal_in`
    ///
    /// Accumulates onto any existing record and resets its `release_date`
    /// to `now + locking_period`.
    pub fn create_bond(
        e: Env,
        account: Address,
        token: Address,
        principal_in: i128,
        reward_desired: i128,
        min_reward_accepted: i128,
        deadline: u64,
    ) -> Result<BondRecord, BondError> {
        account.require_auth();
        pausable::require_not_paused(&e)?;
        guard_enter(&e)?;
        let result = Self::do_create_bond(
            &e,
            &account,
            &token,
            principal_in,
            reward_desired,
            min_reward_accepted,
            deadline,
        );
        guard_exit(&e);
        result
    }

    fn do_create_bond(
        e: &Env,
        account: &Address,
        token: &Address,
        principal_in: i128,
        reward_desired: i128,
        min_reward_accepted: i128,
        deadline: u64,
    ) -> Result<BondRecord, BondError> {
        let mut config = registry::require_pair(e, token)?;

        if principal_in <= 0 || principal_in < config.min_bond {
            return Err(BondError::InvalidAmount);
        }
        if math::add(config.total_locked, principal_in)? > config.max_stake {
            return Err(BondError::InvalidAmount);
        }
        if reward_desired <= 0 {
            return Err(BondError::InvalidAmount);
        }

        let contract = e.current_contract_address();
        let reward = reward_token_addr(e)?;
        if TokenClient::new(e, token).allowance(account, &contract) < principal_in {
            return Err(BondError::InsufficientApproval);
        }
        if TokenClient::new(e, &reward).balance(&contract) < reward_desired {
            return Err(BondError::InsufficientReserves);
        }

        let (entry_fee, net_principal) = math::split(principal_in, config.entry_fee_rate)?;

        pull(e, token, account, principal_in)?;

        let gateway = gateway_addr(e)?;
        approve(e, &reward, &gateway, reward_desired)?;
        approve(e, token, &gateway, net_principal)?;
        let (reward_used, token_used, liquidity_minted) = gateway::add_liquidity(
            e,
            &gateway,
            &reward,
            token,
            reward_desired,
            net_principal,
            min_reward_accepted,
            net_principal,
            &contract,
            deadline,
        )?;

        let now = e.ledger().timestamp();
        let mut record = ledger::get_bond(e, token, account);
        record.release_date = now
            .checked_add(config.locking_period)
            .ok_or(BondError::ArithmeticOverflow)?;
        record.exit_fee_snapshot = config.exit_fee_rate;
        record.reward_amount = math::add(record.reward_amount, reward_used)?;
        record.principal_amount = math::add(record.principal_amount, token_used)?;
        record.liquidity_amount = math::add(record.liquidity_amount, liquidity_minted)?;
        ledger::set_bond(e, token, account, &record);

        config.total_locked = math::add(config.total_locked, net_principal)?;
        config.total_paired_reward = math::add(config.total_paired_reward, reward_used)?;
        config.total_liquidity = math::add(config.total_liquidity, liquidity_minted)?;
        registry::set_pair(e, token, &config);
        bump_instance_total(e, DataKey::TotalRewardPaired, reward_used)?;

        if entry_fee > 0 {
            push(e, token, &treasury_addr(e)?, entry_fee)?;
        }

        events::emit_bond_created(
            e,
            token,
            account,
            reward_used,
            token_used,
            liquidity_minted,
            record.release_date,
        );
        Ok(record)
    }

    /// Release a matured bond: burn its AMM liquidity and return the
    /// proceeds, minus the exit fee snapshotted at creation time.
    ///
    /// Returns the record as it stood at release; storage is zeroed.
    pub fn release_bond(e: Env, account: Address, token: Address) -> Result<BondRecord, BondError> {
        account.require_auth();
        pausable::require_not_paused(&e)?;
        guard_enter(&e)?;
        let result = Self::do_release_bond(&e, &account, &token);
        guard_exit(&e);
        result
    }

    fn do_release_bond(e: &Env, account: &Address, token: &Address) -> Result<BondRecord, BondError> {
        let mut config = registry::require_pair(e, token)?;
        let record = ledger::get_bond(e, token, account);
        if !record.is_active() {
            return Err(BondError::NothingToRelease);
        }
        let now = e.ledger().timestamp();
        if now < record.release_date {
            return Err(BondError::NotYetMatured);
        }

        // CEI: the record is cleared before the external call so the AMM
        // cannot replay it through a callback.
        ledger::clear_bond(e, token, account);
        config.total_liquidity = config.total_liquidity.saturating_sub(record.liquidity_amount);
        registry::set_pair(e, token, &config);

        let contract = e.current_contract_address();
        let reward = reward_token_addr(e)?;
        let gateway = gateway_addr(e)?;
        let lp_token = gateway::pair_token(e, &gateway, &reward, token)?;
        approve(e, &lp_token, &gateway, record.liquidity_amount)?;
        let deadline = now
            .checked_add(RELEASE_GRACE_SECS)
            .ok_or(BondError::ArithmeticOverflow)?;
        let (reward_out, token_out) = gateway::remove_liquidity(
            e,
            &gateway,
            &reward,
            token,
            record.liquidity_amount,
            0,
            0,
            &contract,
            deadline,
        )?;

        // The exit fee applies to the AMM proceeds, not the original
        // principal, so it reflects gains or losses accrued while locked.
        let (reward_fee, reward_net) = math::split(reward_out, record.exit_fee_snapshot)?;
        let (token_fee, token_net) = math::split(token_out, record.exit_fee_snapshot)?;

        if reward_net > 0 {
            push(e, &reward, account, reward_net)?;
        }
        if token_net > 0 {
            push(e, token, account, token_net)?;
        }
        if reward_fee > 0 || token_fee > 0 {
            let treasury = treasury_addr(e)?;
            if reward_fee > 0 {
                push(e, &reward, &treasury, reward_fee)?;
            }
            if token_fee > 0 {
                push(e, token, &treasury, token_fee)?;
            }
        }

        events::emit_bond_released(
            e,
            token,
            account,
            reward_out,
            token_out,
            record.liquidity_amount,
            reward_fee,
            token_fee,
        );
        Ok(record)
    }

    // ── Migration ──────────────────────────────────────────────────────────

    /// One-time import of a predecessor deployment's bond record for
    /// `beneficiary`. The liquidity token is pulled directly from `source`
    /// (which must have approved the contract); no AMM liquidity call is
    /// made. The imported principal is subject to the pair's stake cap and
    /// the record must carry a non-zero release date. Permanently disabled
    /// after the first successful import.
    #[allow(clippy::too_many_arguments)]
    pub fn migrate_bond(
        e: Env,
        admin: Address,
        source: Address,
        beneficiary: Address,
        token: Address,
        reward_amount: i128,
        principal_amount: i128,
        liquidity_amount: i128,
        release_date: u64,
    ) -> Result<BondRecord, BondError> {
        require_admin(&e, &admin)?;
        guard_enter(&e)?;
        let result = Self::do_migrate_bond(
            &e,
            &source,
            &beneficiary,
            &token,
            reward_amount,
            principal_amount,
            liquidity_amount,
            release_date,
        );
        guard_exit(&e);
        result
    }

    #[allow(clippy::too_many_arguments)]
    fn do_migrate_bond(
        e: &Env,
        source: &Address,
        beneficiary: &Address,
        token: &Address,
        reward_amount: i128,
        principal_amount: i128,
        liquidity_amount: i128,
        release_date: u64,
    ) -> Result<BondRecord, BondError> {
        let done: bool = e
            .storage()
            .instance()
            .get(&DataKey::MigrationDone)
            .unwrap_or(false);
        if done {
            return Err(BondError::AlreadyMigrated);
        }

        let mut config = registry::require_pair(e, token)?;
        if liquidity_amount <= 0 || reward_amount < 0 || principal_amount < 0 {
            return Err(BondError::InvalidAmount);
        }
        if release_date == 0 {
            return Err(BondError::InvalidAmount);
        }
        // Imported principal counts against the same cap as fresh bonds.
        if math::add(config.total_locked, principal_amount)? > config.max_stake {
            return Err(BondError::InvalidAmount);
        }

        let reward = reward_token_addr(e)?;
        let gateway = gateway_addr(e)?;
        let lp_token = gateway::pair_token(e, &gateway, &reward, token)?;
        pull(e, &lp_token, source, liquidity_amount)?;

        let mut record = ledger::get_bond(e, token, beneficiary);
        record.release_date = release_date;
        record.exit_fee_snapshot = config.exit_fee_rate;
        record.reward_amount = math::add(record.reward_amount, reward_amount)?;
        record.principal_amount = math::add(record.principal_amount, principal_amount)?;
        record.liquidity_amount = math::add(record.liquidity_amount, liquidity_amount)?;
        ledger::set_bond(e, token, beneficiary, &record);

        config.total_locked = math::add(config.total_locked, principal_amount)?;
        config.total_paired_reward = math::add(config.total_paired_reward, reward_amount)?;
        config.total_liquidity = math::add(config.total_liquidity, liquidity_amount)?;
        registry::set_pair(e, token, &config);
        bump_instance_total(e, DataKey::TotalRewardPaired, reward_amount)?;

        e.storage().instance().set(&DataKey::MigrationDone, &true);
        events::emit_bond_migrated(e, token, beneficiary, liquidity_amount, release_date);
        Ok(record)
    }

    // ── Admin ──────────────────────────────────────────────────────────────

    /// Change the fee-receiving treasury. The new account must differ from
    /// the current one.
    pub fn set_treasury(e: Env, admin: Address, new_treasury: Address) -> Result<(), BondError> {
        require_admin(&e, &admin)?;
        let old = treasury_addr(&e)?;
        if old == new_treasury {
            return Err(BondError::InvalidConfig);
        }
        e.storage().instance().set(&DataKey::Treasury, &new_treasury);
        events::emit_treasury_changed(&e, &old, &new_treasury);
        Ok(())
    }

    /// Change the reward-token reference.
    pub fn set_reward_token(e: Env, admin: Address, new_token: Address) -> Result<(), BondError> {
        require_admin(&e, &admin)?;
        let old = reward_token_addr(&e)?;
        e.storage().instance().set(&DataKey::RewardToken, &new_token);
        events::emit_reward_token_changed(&e, &old, &new_token);
        Ok(())
    }

    /// Change the AMM gateway reference.
    pub fn set_amm_gateway(e: Env, admin: Address, new_gateway: Address) -> Result<(), BondError> {
        require_admin(&e, &admin)?;
        let old = gateway_addr(&e)?;
        e.storage().instance().set(&DataKey::AmmGateway, &new_gateway);
        events::emit_gateway_changed(&e, &old, &new_gateway);
        Ok(())
    }

    /// Pause create and release. Queries remain available.
    pub fn pause(e: Env, admin: Address) -> Result<(), BondError> {
        require_admin(&e, &admin)?;
        pausable::set_paused(&e, true);
        events::emit_pause_state(&e, true);
        Ok(())
    }

    /// Resume create and release.
    pub fn unpause(e: Env, admin: Address) -> Result<(), BondError> {
        require_admin(&e, &admin)?;
        pausable::set_paused(&e, false);
        events::emit_pause_state(&e, false);
        Ok(())
    }

    // ── Queries ────────────────────────────────────────────────────────────

    /// Pair configuration and running aggregates for `token`.
    pub fn get_pool_info(e: Env, token: Address) -> Result<PairConfig, BondError> {
        registry::require_pair(&e, &token)
    }

    /// The account's bond record; zeroed default when no bond exists.
    pub fn get_account_bond(e: Env, token: Address, account: Address) -> BondRecord {
        ledger::get_bond(&e, &token, &account)
    }

    /// Reward token required to pair `principal_in` at the AMM's current
    /// spot ratio. Returns `(reward_required, net_principal)`.
    pub fn quote_required_reward(
        e: Env,
        token: Address,
        principal_in: i128,
    ) -> Result<(i128, i128), BondError> {
        Self::do_quote(&e, &token, principal_in)
    }

    fn do_quote(e: &Env, token: &Address, principal_in: i128) -> Result<(i128, i128), BondError> {
        let config = registry::require_pair(e, token)?;
        if principal_in <= 0 {
            return Err(BondError::InvalidAmount);
        }
        let (_, net_principal) = math::split(principal_in, config.entry_fee_rate)?;
        let reward = reward_token_addr(e)?;
        let gateway = gateway_addr(e)?;
        let (reward_reserve, token_reserve) = gateway::reserves(e, &gateway, &reward, token)?;
        if token_reserve <= 0 {
            return Err(BondError::InsufficientReserves);
        }
        let required = math::mul_div(net_principal, reward_reserve, token_reserve)?;
        Ok((required, net_principal))
    }

    /// Read-only preview of a prospective `create_bond` call.
    pub fn get_create_bond_preview(
        e: Env,
        account: Address,
        token: Address,
        principal_in: i128,
        reward_in: i128,
    ) -> Result<BondPreview, BondError> {
        let config = registry::require_pair(&e, &token)?;
        let (entry_fee, net_principal) = math::split(principal_in, config.entry_fee_rate)?;
        let (reward_required, _) = Self::do_quote(&e, &token, principal_in)?;
        let reward_shortfall = if reward_in >= reward_required {
            0
        } else {
            reward_required - reward_in
        };
        let release_date = e
            .ledger()
            .timestamp()
            .checked_add(config.locking_period)
            .ok_or(BondError::ArithmeticOverflow)?;
        let record = ledger::get_bond(&e, &token, &account);
        Ok(BondPreview {
            locking_period: config.locking_period,
            entry_fee,
            net_principal,
            reward_required,
            reward_shortfall,
            release_date,
            has_active_bond: record.is_active(),
        })
    }

    /// Controlling authority.
    pub fn get_admin(e: Env) -> Result<Address, BondError> {
        e.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(BondError::NotInitialized)
    }

    /// Fee-receiving treasury account.
    pub fn get_treasury(e: Env) -> Result<Address, BondError> {
        treasury_addr(&e)
    }

    /// Protocol reward token.
    pub fn get_reward_token(e: Env) -> Result<Address, BondError> {
        reward_token_addr(&e)
    }

    /// External AMM gateway.
    pub fn get_amm_gateway(e: Env) -> Result<Address, BondError> {
        gateway_addr(&e)
    }

    /// Reward token ever paired across all pools.
    pub fn get_total_reward_paired(e: Env) -> i128 {
        e.storage()
            .instance()
            .get(&DataKey::TotalRewardPaired)
            .unwrap_or(0)
    }

    /// Reward token pulled into custody via pair top-ups.
    pub fn get_total_reward_allocated(e: Env) -> i128 {
        e.storage()
            .instance()
            .get(&DataKey::TotalRewardAllocated)
            .unwrap_or(0)
    }

    /// Whether create and release are paused.
    pub fn is_paused(e: Env) -> bool {
        pausable::is_paused(&e)
    }

    /// Whether the one-time migration has been performed.
    pub fn is_migration_done(e: Env) -> bool {
        e.storage()
            .instance()
            .get(&DataKey::MigrationDone)
            .unwrap_or(false)
    }
}
