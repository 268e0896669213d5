//! Thin adapter over the external AMM.
//!
//! The venue is untrusted: every call goes through the `try_` client so a
//! deadline, slippage, or venue failure surfaces as
//! [`BondError::LiquidityProvisionFailed`] and aborts the whole operation
//! instead of leaving a partial add/remove behind.

use soroban_sdk::{contractclient, Address, Env};

use crate::errors::BondError;

/// Interface the external AMM venue must expose.
#[contractclient(name = "AmmGatewayClient")]
pub trait AmmGateway {
    /// Current spot reserves of the `(token_a, token_b)` pair.
    fn get_reserves(env: Env, token_a: Address, token_b: Address) -> (i128, i128);

    /// Address of the liquidity token issued for the pair.
    fn pair_token(env: Env, token_a: Address, token_b: Address) -> Address;

    /// Pulls up to the desired amounts from `to` (which must have approved
    /// the venue) and returns `(used_a, used_b, liquidity_minted)`.
    #[allow(clippy::too_many_arguments)]
    fn add_liquidity(
        env: Env,
        token_a: Address,
        token_b: Address,
        amount_a_desired: i128,
        amount_b_desired: i128,
        amount_a_min: i128,
        amount_b_min: i128,
        to: Address,
        deadline: u64,
    ) -> (i128, i128, i128);

    /// Burns `liquidity` pulled from `to` and returns `(out_a, out_b)`.
    #[allow(clippy::too_many_arguments)]
    fn remove_liquidity(
        env: Env,
        token_a: Address,
        token_b: Address,
        liquidity: i128,
        amount_a_min: i128,
        amount_b_min: i128,
        to: Address,
        deadline: u64,
    ) -> (i128, i128);
}

pub fn reserves(
    e: &Env,
    gateway: &Address,
    token_a: &Address,
    token_b: &Address,
) -> Result<(i128, i128), BondError> {
    match AmmGatewayClient::new(e, gateway).try_get_reserves(token_a, token_b) {
        Ok(Ok(r)) => Ok(r),
        _ => Err(BondError::LiquidityProvisionFailed),
    }
}

pub fn pair_token(
    e: &Env,
    gateway: &Address,
    token_a: &Address,
    token_b: &Address,
) -> Result<Address, BondError> {
    match AmmGatewayClient::new(e, gateway).try_pair_token(token_a, token_b) {
        Ok(Ok(addr)) => Ok(addr),
        _ => Err(BondError::LiquidityProvisionFailed),
    }
}

#[allow(clippy::too_many_arguments)]
pub fn add_liquidity(
    e: &Env,
    gateway: &Address,
    token_a: &Address,
    token_b: &Address,
    amount_a_desired: i128,
    amount_b_desired: i128,
    amount_a_min: i128,
    amount_b_min: i128,
    to: &Address,
    deadline: u64,
) -> Result<(i128, i128, i128), BondError> {
    match AmmGatewayClient::new(e, gateway).try_add_liquidity(
        token_a,
        token_b,
        &amount_a_desired,
        &amount_b_desired,
        &amount_a_min,
        &amount_b_min,
        to,
        &deadline,
    ) {
        Ok(Ok(res)) => Ok(res),
        _ => Err(BondError::LiquidityProvisionFailed),
    }
}

#[allow(clippy::too_many_arguments)]
pub fn remove_liquidity(
    e: &Env,
    gateway: &Address,
    token_a: &Address,
    token_b: &Address,
    liquidity: i128,
    amount_a_min: i128,
    amount_b_min: i128,
    to: &Address,
    deadline: u64,
) -> Result<(i128, i128), BondError> {
    match AmmGatewayClient::new(e, gateway).try_remove_liquidity(
        token_a,
        token_b,
        &liquidity,
        &amount_a_min,
        &amount_b_min,
        to,
        &deadline,
    ) {
        Ok(Ok(res)) => Ok(res),
        _ => Err(BondError::LiquidityProvisionFailed),
    }
}
