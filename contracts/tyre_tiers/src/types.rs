use soroban_sdk::{contracttype, String};

/// A reward level unlocked at a point threshold.
///
/// Tables of these are strictly ascending by `threshold` and always open
/// with a `threshold == 0` entry tier, so every non-negative balance maps
/// to exactly one tier.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TierDefinition {
    /// Minimum point balance required to hold this tier.
    pub threshold: i128,
    /// Short display name, e.g. "Bronze".
    pub label: String,
    /// Benefit unlocked at this tier, e.g. "£5 off service".
    pub reward: String,
    /// Discount value in pounds. Non-decreasing as thresholds rise.
    pub discount_value: i128,
}

/// Position of a balance between its current tier and the next one up.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TierProgress {
    pub current_tier: TierDefinition,
    /// Absent when the current tier is the top of the table.
    pub next_tier: Option<TierDefinition>,
    /// Basis points of the span to the next tier, 0..=10_000.
    /// Exactly 10_000 when there is no next tier.
    pub progress_bps: u32,
    /// Points still needed to reach the next tier; 0 at the top.
    pub points_to_next: i128,
}

/// Whether a balance clears the minimum redemption threshold, and what it
/// is worth in currency.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RedemptionEligibility {
    /// Currency value of the balance under the configured exchange rate.
    pub credit_value: i128,
    pub can_redeem: bool,
    /// Points short of the minimum; 0 when eligible.
    pub points_to_minimum: i128,
}

/// Direction of a point adjustment.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AdjustmentKind {
    Earned = 0,
    Redeemed = 1,
}
