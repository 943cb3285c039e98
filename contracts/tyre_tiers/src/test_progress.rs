//! Tests for progress-to-next-tier arithmetic.

#![cfg(test)]

use crate::engine::{self, stock_tiers, PROGRESS_DENOM_BPS};
use crate::types::TierDefinition;
use crate::{TyreTiers, TyreTiersClient};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{vec, Address, Env, String, Vec};

fn tier(e: &Env, threshold: i128) -> TierDefinition {
    TierDefinition {
        threshold,
        label: String::from_str(e, "Tier"),
        reward: String::from_str(e, "reward"),
        discount_value: threshold,
    }
}

#[test]
fn test_progress_mid_tier() {
    let e = Env::default();
    let table = stock_tiers(&e);
    // (8 - 5) / (10 - 5) = 60%.
    let p = engine::progress(8, &table);
    assert_eq!(p.current_tier.threshold, 5);
    assert_eq!(p.next_tier.unwrap().threshold, 10);
    assert_eq!(p.points_to_next, 2);
    assert_eq!(p.progress_bps, 6_000);
}

#[test]
fn test_progress_at_zero_balance() {
    let e = Env::default();
    let table = stock_tiers(&e);
    let p = engine::progress(0, &table);
    assert_eq!(p.current_tier.threshold, 0);
    assert_eq!(p.next_tier.unwrap().threshold, 5);
    assert_eq!(p.progress_bps, 0);
    assert_eq!(p.points_to_next, 5);
}

#[test]
fn test_progress_resets_at_exact_threshold() {
    let e = Env::default();
    let table = stock_tiers(&e);
    let p = engine::progress(10, &table);
    assert_eq!(p.current_tier.threshold, 10);
    assert_eq!(p.next_tier.unwrap().threshold, 15);
    assert_eq!(p.progress_bps, 0);
    assert_eq!(p.points_to_next, 5);
}

#[test]
fn test_progress_one_point_short() {
    let e = Env::default();
    let table = stock_tiers(&e);
    let p = engine::progress(9, &table);
    assert_eq!(p.progress_bps, 8_000);
    assert_eq!(p.points_to_next, 1);
}

#[test]
fn test_progress_at_top_tier() {
    let e = Env::default();
    let table = stock_tiers(&e);
    for balance in [50_i128, 75, 10_000] {
        let p = engine::progress(balance, &table);
        assert_eq!(p.current_tier.threshold, 50);
        assert_eq!(p.next_tier, None);
        assert_eq!(p.progress_bps, PROGRESS_DENOM_BPS);
        assert_eq!(p.points_to_next, 0);
    }
}

#[test]
fn test_progress_bps_truncates_toward_zero() {
    let e = Env::default();
    // Span of 3: one point in is 33.33%, two points in is 66.66%.
    let table: Vec<TierDefinition> = vec![&e, tier(&e, 0), tier(&e, 3)];
    assert_eq!(engine::progress(1, &table).progress_bps, 3_333);
    assert_eq!(engine::progress(2, &table).progress_bps, 6_666);
}

#[test]
fn test_progress_bps_bounds() {
    let e = Env::default();
    let table = stock_tiers(&e);
    for balance in 0..=60_i128 {
        let p = engine::progress(balance, &table);
        assert!(p.progress_bps <= PROGRESS_DENOM_BPS);
        // Full progress exactly when there is no next tier.
        assert_eq!(p.progress_bps == PROGRESS_DENOM_BPS, p.next_tier.is_none());
        if p.next_tier.is_some() {
            assert!(p.points_to_next >= 1);
        } else {
            assert_eq!(p.points_to_next, 0);
        }
    }
}

#[test]
fn test_progress_via_contract() {
    let e = Env::default();
    e.mock_all_auths();
    let contract_id = e.register(TyreTiers, ());
    let client = TyreTiersClient::new(&e, &contract_id);
    let admin = Address::generate(&e);
    client.initialize(&admin, &stock_tiers(&e), &5, &1);

    let p = client.progress(&8);
    assert_eq!(p.current_tier.threshold, 5);
    assert_eq!(p.progress_bps, 6_000);
    assert_eq!(p.points_to_next, 2);
}
