use soroban_sdk::{contracttype, Address, String};

// ─── Pair configuration ────────────────────────────────────────────────────

/// Per-pairable-token configuration plus running aggregates.
///
/// The aggregates are owned by the engine: `upsert_pair` preserves them on
/// update and zeroes them on first creation. Edits to the tunable fields
/// never retroactively affect bonds created earlier (the exit fee is
/// snapshotted into each [`BondRecord`]).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PairConfig {
    /// Free-text label for the pairable token.
    pub display_name: String,
    /// Inclusive cap on `total_locked`, denominated in the pairable token.
    pub max_stake: i128,
    /// Inclusive floor on the principal of a single `create_bond` call.
    pub min_bond: i128,
    /// Entry fee on principal, on the 1_000_000 scale.
    pub entry_fee_rate: u32,
    /// Exit fee on released proceeds, on the 1_000_000 scale.
    pub exit_fee_rate: u32,
    /// Seconds a new bond must remain locked.
    pub locking_period: u64,
    /// Net principal ever locked against this token.
    pub total_locked: i128,
    /// Reward token ever paired against this token.
    pub total_paired_reward: i128,
    /// Liquidity currently held for outstanding bonds of this token.
    pub total_liquidity: i128,
}

/// Admin-supplied subset of [`PairConfig`]. Keeping the aggregates out of
/// the upsert argument means the admin can never forge them.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PairParams {
    pub display_name: String,
    pub max_stake: i128,
    pub min_bond: i128,
    pub entry_fee_rate: u32,
    pub exit_fee_rate: u32,
    pub locking_period: u64,
}

// ─── Bond ledger ───────────────────────────────────────────────────────────

/// One bond per account × pairable token. Amounts accumulate across
/// repeated `create_bond` calls before release; release zeroes everything
/// atomically. `liquidity_amount > 0` iff the bond is active.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BondRecord {
    /// Absolute timestamp after which release is permitted; 0 = no bond.
    pub release_date: u64,
    /// Exit-fee rate captured at creation, immune to later registry edits.
    pub exit_fee_snapshot: u32,
    /// Accumulated reward token contributed to the position.
    pub reward_amount: i128,
    /// Accumulated pairable token contributed to the position.
    pub principal_amount: i128,
    /// Accumulated AMM liquidity held for this bond.
    pub liquidity_amount: i128,
}

impl BondRecord {
    pub fn zeroed() -> Self {
        BondRecord {
            release_date: 0,
            exit_fee_snapshot: 0,
            reward_amount: 0,
            principal_amount: 0,
            liquidity_amount: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.liquidity_amount > 0
    }
}

// ─── Query results ─────────────────────────────────────────────────────────

/// Read-only preview of a prospective `create_bond` call.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BondPreview {
    /// Seconds the new bond would stay locked.
    pub locking_period: u64,
    /// Entry fee that would be taken from the principal.
    pub entry_fee: i128,
    /// Principal that would reach the AMM after the entry fee.
    pub net_principal: i128,
    /// Reward token the AMM spot ratio currently requires for the net.
    pub reward_required: i128,
    /// How much the supplied reward falls short of `reward_required` (0 if
    /// it covers it).
    pub reward_shortfall: i128,
    /// `release_date` the bond would get if created now.
    pub release_date: u64,
    /// Whether the account already holds an active bond that the call
    /// would accumulate onto (resetting its lock).
    pub has_active_bond: bool,
}

// ─── Storage keys ──────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Controlling authority.
    Admin,
    /// Protocol reward token contract.
    RewardToken,
    /// External AMM gateway contract.
    AmmGateway,
    /// Account receiving entry/exit fee proceeds.
    Treasury,
    /// Create/release pause flag.
    Paused,
    /// Reentrancy lock held for the duration of a guarded call.
    Guard,
    /// Reward token ever paired across all pools.
    TotalRewardPaired,
    /// Reward token pulled into custody via `upsert_pair` top-ups.
    TotalRewardAllocated,
    /// One-time migration flag.
    MigrationDone,
    /// Per-pairable-token configuration.
    Pair(Address),
    /// Per (token, account) bond record.
    Bond(Address, Address),
}
