use soroban_sdk::contracterror;

/// Canonical error enum for the bond pool contract.
///
/// Codes are wire-stable and grouped by domain so off-chain consumers can
/// switch on ranges first, then on the specific code. Never renumber a
/// variant after deployment; append new variants at the end of their block.
///
/// Error Code Layout:
///   1  -  99  : Initialization
///   100 - 199 : Authorization / call flow
///   200 - 299 : Validation
///   300 - 399 : Bond lifecycle
///   400 - 499 : External boundaries
///   500 - 599 : Arithmetic
#[contracterror]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum BondError {
    // --- Initialization (1-99) ---
    /// Contract has not been initialized yet.
    NotInitialized = 1,
    /// Contract has already been initialized and cannot be re-initialized.
    AlreadyInitialized = 2,

    // --- Authorization / call flow (100-199) ---
    /// Caller is not the controlling authority.
    Unauthorized = 100,
    /// Create and release are paused.
    Paused = 101,
    /// A guarded entry point was re-entered from an external call chain.
    ReentrantCall = 102,

    // --- Validation (200-299) ---
    /// Admin supplied a bad pair configuration, or the pair is unknown.
    InvalidConfig = 200,
    /// Zero, under-floor, or over-cap principal or reward amount, or a
    /// malformed migration import.
    InvalidAmount = 201,
    /// Caller has not pre-authorized enough of the pairable token.
    InsufficientApproval = 202,
    /// The pool lacks reward-token balance (or AMM reserves) for the request.
    InsufficientReserves = 203,

    // --- Bond lifecycle (300-399) ---
    /// The bond's locking period has not elapsed yet.
    NotYetMatured = 300,
    /// No active bond exists for this account and token.
    NothingToRelease = 301,
    /// The one-time migration has already been performed.
    AlreadyMigrated = 302,

    // --- External boundaries (400-499) ---
    /// A token transfer, pull, or approval failed.
    TransferFailed = 400,
    /// The AMM gateway rejected or failed an add/remove-liquidity call.
    LiquidityProvisionFailed = 401,

    // --- Arithmetic (500-599) ---
    /// A checked computation overflowed instead of wrapping.
    ArithmeticOverflow = 500,
}
