//! Tier arithmetic over the static tier table.
//!
//! Pure functions: no storage access, no events, no mutable state. The table
//! is validated once at initialize and trusted by every lookup afterwards,
//! so any number of callers may query concurrently without coordination.

use soroban_sdk::{vec, Env, String, Vec};

use crate::types::{AdjustmentKind, RedemptionEligibility, TierDefinition, TierProgress};
use crate::Error;

/// One tyre per whole pound spent; sub-pound remainders earn nothing.
pub const PENCE_PER_TYRE: i128 = 100;

/// Progress to the next tier is reported in basis points of the span.
pub const PROGRESS_DENOM_BPS: u32 = 10_000;

/// Ceiling on a single Earned adjustment, against fat-finger admin entry.
pub const MAX_SINGLE_AWARD: i128 = 1_000;

/// Check the tier-table invariants: non-empty, opens at threshold 0,
/// thresholds strictly ascending (which also rules out duplicates), and
/// discount values non-negative and non-decreasing.
pub fn validate_table(table: &Vec<TierDefinition>) -> Result<(), Error> {
    let first = match table.get(0) {
        Some(t) => t,
        None => return Err(Error::MalformedTierTable),
    };
    if first.threshold != 0 || first.discount_value < 0 {
        return Err(Error::MalformedTierTable);
    }
    let mut prev = first;
    for i in 1..table.len() {
        let tier = table.get_unchecked(i);
        if tier.threshold <= prev.threshold || tier.discount_value < prev.discount_value {
            return Err(Error::MalformedTierTable);
        }
        prev = tier;
    }
    Ok(())
}

/// Index of the highest tier whose threshold is <= balance. A balance
/// exactly on a threshold holds that tier, not the one below. Total for any
/// non-negative balance because the table opens at threshold 0.
pub fn current_tier_index(balance: i128, table: &Vec<TierDefinition>) -> u32 {
    for i in (0..table.len()).rev() {
        if table.get_unchecked(i).threshold <= balance {
            return i;
        }
    }
    0
}

pub fn current_tier(balance: i128, table: &Vec<TierDefinition>) -> TierDefinition {
    table.get_unchecked(current_tier_index(balance, table))
}

/// The tier immediately above the current one, or None at the top of the
/// table.
pub fn next_tier(balance: i128, table: &Vec<TierDefinition>) -> Option<TierDefinition> {
    table.get(current_tier_index(balance, table) + 1)
}

/// Where the balance sits between its current tier and the next.
pub fn progress(balance: i128, table: &Vec<TierDefinition>) -> TierProgress {
    let cur = current_tier(balance, table);
    match next_tier(balance, table) {
        None => TierProgress {
            current_tier: cur,
            next_tier: None,
            progress_bps: PROGRESS_DENOM_BPS,
            points_to_next: 0,
        },
        Some(nxt) => {
            // span > 0 and balance < nxt.threshold by construction of the
            // current/next pair over a strictly ascending table.
            let span = nxt.threshold - cur.threshold;
            let advanced = balance - cur.threshold;
            let bps = advanced * i128::from(PROGRESS_DENOM_BPS) / span;
            let bps = if bps > i128::from(PROGRESS_DENOM_BPS) {
                PROGRESS_DENOM_BPS
            } else {
                bps as u32
            };
            TierProgress {
                current_tier: cur,
                points_to_next: nxt.threshold - balance,
                next_tier: Some(nxt),
                progress_bps: bps,
            }
        }
    }
}

/// Credit value and minimum-redemption standing for a balance. The minimum
/// is an explicit configuration constant, independent of the tier table.
pub fn redemption_eligibility(
    balance: i128,
    min_redemption: i128,
    exchange_rate: i128,
) -> RedemptionEligibility {
    let can_redeem = balance >= min_redemption;
    RedemptionEligibility {
        credit_value: balance
            .checked_mul(exchange_rate)
            .expect("credit value overflow"),
        can_redeem,
        points_to_minimum: if can_redeem { 0 } else { min_redemption - balance },
    }
}

/// Every redemption tier the balance has already unlocked (the entry tier
/// at threshold 0 is not a redemption).
pub fn available_redemptions(
    e: &Env,
    balance: i128,
    table: &Vec<TierDefinition>,
) -> Vec<TierDefinition> {
    let mut out = vec![e];
    for tier in table.iter() {
        if tier.threshold > 0 && tier.threshold <= balance {
            out.push_back(tier);
        }
    }
    out
}

/// Whole points earned from a spend in pence. Non-positive spend is a
/// validation error, never a negative award.
pub fn points_from_spend(amount_pence: i128) -> Result<i128, Error> {
    if amount_pence <= 0 {
        return Err(Error::InvalidAmount);
    }
    Ok(amount_pence / PENCE_PER_TYRE)
}

/// Validate a point adjustment before it is committed to a balance store.
pub fn validate_adjustment(
    amount: i128,
    kind: AdjustmentKind,
    min_redemption: i128,
) -> Result<(), Error> {
    if amount <= 0 {
        return Err(Error::InvalidAmount);
    }
    match kind {
        AdjustmentKind::Earned if amount > MAX_SINGLE_AWARD => Err(Error::AmountTooLarge),
        AdjustmentKind::Redeemed if amount < min_redemption => {
            Err(Error::BelowMinimumRedemption)
        }
        _ => Ok(()),
    }
}

/// The production table from the tyre points programme: an entry tier plus
/// five redemption milestones.
pub fn stock_tiers(e: &Env) -> Vec<TierDefinition> {
    vec![
        e,
        tier(e, 0, "Starter", "Collect tyres with every service", 0),
        tier(e, 5, "Bronze", "£5 off service", 5),
        tier(e, 10, "Silver", "£12 off service + free check", 12),
        tier(e, 15, "Gold", "£20 off service + priority booking", 20),
        tier(e, 25, "Platinum", "£35 off service + free MOT", 35),
        tier(e, 50, "Elite", "£75 off service + VIP benefits", 75),
    ]
}

fn tier(e: &Env, threshold: i128, label: &str, reward: &str, discount_value: i128) -> TierDefinition {
    TierDefinition {
        threshold,
        label: String::from_str(e, label),
        reward: String::from_str(e, reward),
        discount_value,
    }
}
