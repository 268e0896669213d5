//! Tests for `release_bond`.

#![cfg(test)]

use soroban_sdk::testutils::Ledger;
use soroban_sdk::token::TokenClient;
use soroban_sdk::Env;

use crate::test_helpers::*;
use crate::BondError;

fn bond_100(t: &TestCtx) {
    t.client
        .create_bond(&t.user, &t.pair_token, &100, &98, &0, &300);
}

#[test]
fn release_before_maturity_fails() {
    let e = Env::default();
    let t = setup_with_pair(&e);
    bond_100(&t);

    e.ledger().with_mut(|li| li.timestamp = ONE_DAY - 1);
    assert_eq!(
        t.client.try_release_bond(&t.user, &t.pair_token),
        Err(Ok(BondError::NotYetMatured))
    );
}

#[test]
fn release_at_maturity_returns_full_proceeds_with_zero_exit_fee() {
    let e = Env::default();
    let t = setup_with_pair(&e);
    bond_100(&t);

    e.ledger().with_mut(|li| li.timestamp = ONE_DAY);
    let released = t.client.release_bond(&t.user, &t.pair_token);
    assert_eq!(released.liquidity_amount, 98);

    let pair = TokenClient::new(&e, &t.pair_token);
    let reward = TokenClient::new(&e, &t.reward_token);
    // Full AMM-returned amounts go to the caller; treasury only holds the
    // entry fee from creation.
    assert_eq!(pair.balance(&t.user), DEFAULT_MINT - 100 + 98);
    assert_eq!(reward.balance(&t.user), 98);
    assert_eq!(pair.balance(&t.treasury), 2);
    assert_eq!(reward.balance(&t.treasury), 0);

    // Record zeroed, aggregate liquidity drained.
    let record = t.client.get_account_bond(&t.pair_token, &t.user);
    assert!(!record.is_active());
    assert_eq!(record.release_date, 0);
    assert_eq!(record.reward_amount, 0);
    assert_eq!(record.principal_amount, 0);
    assert_eq!(t.client.get_pool_info(&t.pair_token).total_liquidity, 0);
}

#[test]
fn release_splits_proceeds_at_snapshotted_exit_fee() {
    let e = Env::default();
    let t = setup(&e);
    let mut params = default_params(&e);
    params.exit_fee_rate = 100_000; // 10%
    t.client
        .upsert_pair(&t.admin, &t.pair_token, &params, &0);
    bond_100(&t);

    e.ledger().with_mut(|li| li.timestamp = ONE_DAY);
    t.client.release_bond(&t.user, &t.pair_token);

    let pair = TokenClient::new(&e, &t.pair_token);
    let reward = TokenClient::new(&e, &t.reward_token);
    // 98 released on each side: fee 9 (floor of 9.8), net 89.
    assert_eq!(pair.balance(&t.user), DEFAULT_MINT - 100 + 89);
    assert_eq!(reward.balance(&t.user), 89);
    assert_eq!(pair.balance(&t.treasury), 2 + 9);
    assert_eq!(reward.balance(&t.treasury), 9);
}

#[test]
fn exit_fee_snapshot_is_immune_to_later_config_edits() {
    let e = Env::default();
    let t = setup_with_pair(&e);
    bond_100(&t);

    // Admin raises the exit fee after the bond was created.
    let mut params = default_params(&e);
    params.exit_fee_rate = 500_000;
    t.client
        .upsert_pair(&t.admin, &t.pair_token, &params, &0);

    e.ledger().with_mut(|li| li.timestamp = ONE_DAY);
    t.client.release_bond(&t.user, &t.pair_token);

    let reward = TokenClient::new(&e, &t.reward_token);
    assert_eq!(reward.balance(&t.user), 98);
    assert_eq!(reward.balance(&t.treasury), 0);
}

#[test]
fn second_release_finds_nothing() {
    let e = Env::default();
    let t = setup_with_pair(&e);
    bond_100(&t);

    e.ledger().with_mut(|li| li.timestamp = ONE_DAY);
    t.client.release_bond(&t.user, &t.pair_token);

    let pair = TokenClient::new(&e, &t.pair_token);
    let balance_after_first = pair.balance(&t.user);
    assert_eq!(
        t.client.try_release_bond(&t.user, &t.pair_token),
        Err(Ok(BondError::NothingToRelease))
    );
    assert_eq!(pair.balance(&t.user), balance_after_first);
}

#[test]
fn release_without_bond_finds_nothing() {
    let e = Env::default();
    let t = setup_with_pair(&e);
    assert_eq!(
        t.client.try_release_bond(&t.user, &t.pair_token),
        Err(Ok(BondError::NothingToRelease))
    );
}

#[test]
fn release_while_paused_is_rejected() {
    let e = Env::default();
    let t = setup_with_pair(&e);
    bond_100(&t);
    e.ledger().with_mut(|li| li.timestamp = ONE_DAY);
    t.client.pause(&t.admin);
    assert_eq!(
        t.client.try_release_bond(&t.user, &t.pair_token),
        Err(Ok(BondError::Paused))
    );
}

#[test]
fn venue_failure_on_release_keeps_the_bond() {
    let e = Env::default();
    let t = setup_with_pair(&e);
    bond_100(&t);
    e.ledger().with_mut(|li| li.timestamp = ONE_DAY);
    t.amm_client.set_fail(&true);

    assert_eq!(
        t.client.try_release_bond(&t.user, &t.pair_token),
        Err(Ok(BondError::LiquidityProvisionFailed))
    );

    // The whole call reverted; the bond is still releasable.
    assert!(t.client.get_account_bond(&t.pair_token, &t.user).is_active());
    t.amm_client.set_fail(&false);
    t.client.release_bond(&t.user, &t.pair_token);
    assert!(!t.client.get_account_bond(&t.pair_token, &t.user).is_active());
}
