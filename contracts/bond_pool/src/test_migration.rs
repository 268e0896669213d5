//! Tests for the one-time predecessor migration.

#![cfg(test)]

use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{Address, Env};

use crate::test_helpers::*;
use crate::BondError;

/// Stands in for the predecessor deployment: holds LP tokens and has
/// approved the pool to pull them.
fn funded_source(e: &Env, t: &TestCtx, amount: i128) -> Address {
    let source = Address::generate(e);
    StellarAssetClient::new(e, &t.lp_token).mint(&source, &amount);
    let expiry = e.ledger().sequence().saturating_add(10_000);
    TokenClient::new(e, &t.lp_token).approve(&source, &t.contract_id, &amount, &expiry);
    source
}

#[test]
fn migration_imports_a_record_without_touching_the_venue() {
    let e = Env::default();
    let t = setup_with_pair(&e);
    let source = funded_source(&e, &t, 50);
    let beneficiary = Address::generate(&e);

    let record = t.client.migrate_bond(
        &t.admin,
        &source,
        &beneficiary,
        &t.pair_token,
        &50,
        &50,
        &50,
        &ONE_DAY,
    );

    assert_eq!(record.release_date, ONE_DAY);
    assert_eq!(record.reward_amount, 50);
    assert_eq!(record.principal_amount, 50);
    assert_eq!(record.liquidity_amount, 50);
    assert_eq!(
        t.client.get_account_bond(&t.pair_token, &beneficiary),
        record
    );

    // LP moved directly from the source into custody.
    let lp = TokenClient::new(&e, &t.lp_token);
    assert_eq!(lp.balance(&t.contract_id), 50);
    assert_eq!(lp.balance(&source), 0);

    let info = t.client.get_pool_info(&t.pair_token);
    assert_eq!(info.total_locked, 50);
    assert_eq!(info.total_paired_reward, 50);
    assert_eq!(info.total_liquidity, 50);
    assert_eq!(t.client.get_total_reward_paired(), 50);
    assert!(t.client.is_migration_done());
}

#[test]
fn migration_is_single_use() {
    let e = Env::default();
    let t = setup_with_pair(&e);
    let source = funded_source(&e, &t, 100);
    let beneficiary = Address::generate(&e);

    t.client.migrate_bond(
        &t.admin,
        &source,
        &beneficiary,
        &t.pair_token,
        &50,
        &50,
        &50,
        &ONE_DAY,
    );
    assert_eq!(
        t.client.try_migrate_bond(
            &t.admin,
            &source,
            &beneficiary,
            &t.pair_token,
            &50,
            &50,
            &50,
            &ONE_DAY,
        ),
        Err(Ok(BondError::AlreadyMigrated))
    );
}

#[test]
fn migration_by_non_admin_is_unauthorized() {
    let e = Env::default();
    let t = setup_with_pair(&e);
    let source = funded_source(&e, &t, 50);
    assert_eq!(
        t.client.try_migrate_bond(
            &t.user,
            &source,
            &t.user,
            &t.pair_token,
            &50,
            &50,
            &50,
            &ONE_DAY,
        ),
        Err(Ok(BondError::Unauthorized))
    );
}

#[test]
fn migration_requires_a_configured_pair_and_liquidity() {
    let e = Env::default();
    let t = setup(&e);
    let source = funded_source(&e, &t, 50);

    assert_eq!(
        t.client.try_migrate_bond(
            &t.admin,
            &source,
            &t.user,
            &t.pair_token,
            &50,
            &50,
            &50,
            &ONE_DAY,
        ),
        Err(Ok(BondError::InvalidConfig))
    );

    t.client
        .upsert_pair(&t.admin, &t.pair_token, &default_params(&e), &0);
    assert_eq!(
        t.client.try_migrate_bond(
            &t.admin,
            &source,
            &t.user,
            &t.pair_token,
            &50,
            &50,
            &0,
            &ONE_DAY,
        ),
        Err(Ok(BondError::InvalidAmount))
    );
}

#[test]
fn migration_cannot_exceed_the_stake_cap() {
    let e = Env::default();
    let t = setup_with_pair(&e);
    let source = funded_source(&e, &t, 5_000);
    let beneficiary = Address::generate(&e);

    // Default pair caps total_locked at 1_000.
    assert_eq!(
        t.client.try_migrate_bond(
            &t.admin,
            &source,
            &beneficiary,
            &t.pair_token,
            &5_000,
            &5_000,
            &5_000,
            &ONE_DAY,
        ),
        Err(Ok(BondError::InvalidAmount))
    );

    let info = t.client.get_pool_info(&t.pair_token);
    assert_eq!(info.total_locked, 0);
    assert_eq!(TokenClient::new(&e, &t.lp_token).balance(&source), 5_000);
    assert!(!t.client.is_migration_done());
}

#[test]
fn migration_rejects_a_zero_release_date() {
    let e = Env::default();
    let t = setup_with_pair(&e);
    let source = funded_source(&e, &t, 50);

    assert_eq!(
        t.client.try_migrate_bond(
            &t.admin,
            &source,
            &t.user,
            &t.pair_token,
            &50,
            &50,
            &50,
            &0,
        ),
        Err(Ok(BondError::InvalidAmount))
    );
}

#[test]
fn migrated_bond_releases_like_any_other() {
    let e = Env::default();
    let t = setup_with_pair(&e);
    let source = funded_source(&e, &t, 50);
    let beneficiary = Address::generate(&e);

    t.client.migrate_bond(
        &t.admin,
        &source,
        &beneficiary,
        &t.pair_token,
        &50,
        &50,
        &50,
        &ONE_DAY,
    );

    e.ledger().with_mut(|li| li.timestamp = ONE_DAY);
    t.client.release_bond(&beneficiary, &t.pair_token);

    assert_eq!(TokenClient::new(&e, &t.pair_token).balance(&beneficiary), 50);
    assert_eq!(
        TokenClient::new(&e, &t.reward_token).balance(&beneficiary),
        50
    );
    assert!(!t
        .client
        .get_account_bond(&t.pair_token, &beneficiary)
        .is_active());
}

#[test]
fn pause_gates_lifecycle_only_not_migration() {
    let e = Env::default();
    let t = setup_with_pair(&e);
    let source = funded_source(&e, &t, 50);
    t.client.pause(&t.admin);

    let record = t.client.migrate_bond(
        &t.admin,
        &source,
        &t.user,
        &t.pair_token,
        &50,
        &50,
        &50,
        &ONE_DAY,
    );
    assert_eq!(record.liquidity_amount, 50);
}
