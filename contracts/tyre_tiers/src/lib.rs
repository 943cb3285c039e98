#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, Address, Env, Symbol, Vec,
};

pub mod engine;
pub mod types;

use crate::types::{AdjustmentKind, RedemptionEligibility, TierDefinition, TierProgress};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    /// The supplied tier table is empty, lacks a zero-threshold entry, is
    /// not strictly ascending, or has decreasing discount values.
    MalformedTierTable = 3,
    NegativeBalance = 4,
    InvalidAmount = 5,
    AmountTooLarge = 6,
    BelowMinimumRedemption = 7,
}

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Admin,
    TierTable,
    MinRedemption,
    ExchangeRate,
}

#[contract]
pub struct TyreTiers;

#[contractimpl]
impl TyreTiers {
    /// Load the tier configuration. The table is validated here and trusted
    /// by every operation afterwards; it is never mutated at runtime. The
    /// minimum redemption threshold and exchange rate (pounds per tyre) are
    /// explicit constants, not derived from the table.
    pub fn initialize(
        e: Env,
        admin: Address,
        tiers: Vec<TierDefinition>,
        min_redemption: i128,
        exchange_rate: i128,
    ) -> Result<(), Error> {
        admin.require_auth();
        if e.storage().instance().has(&DataKey::Admin) {
            return Err(Error::AlreadyInitialized);
        }
        engine::validate_table(&tiers)?;
        if min_redemption <= 0 || exchange_rate <= 0 {
            return Err(Error::InvalidAmount);
        }
        e.storage().instance().set(&DataKey::Admin, &admin);
        e.storage().instance().set(&DataKey::TierTable, &tiers);
        e.storage()
            .instance()
            .set(&DataKey::MinRedemption, &min_redemption);
        e.storage()
            .instance()
            .set(&DataKey::ExchangeRate, &exchange_rate);
        e.events().publish(
            (Symbol::new(&e, "tiers_initialized"),),
            (admin, tiers.len(), min_redemption),
        );
        Ok(())
    }

    /// Highest tier whose threshold the balance meets (inclusive bound).
    pub fn current_tier(e: Env, balance: i128) -> Result<TierDefinition, Error> {
        check_balance(balance)?;
        let table = read_table(&e)?;
        Ok(engine::current_tier(balance, &table))
    }

    /// The tier above the current one, or None at the top of the table.
    pub fn next_tier(e: Env, balance: i128) -> Result<Option<TierDefinition>, Error> {
        check_balance(balance)?;
        let table = read_table(&e)?;
        Ok(engine::next_tier(balance, &table))
    }

    /// Current tier, next tier, progress in basis points, and points still
    /// needed, for progress bars and tier badges.
    pub fn progress(e: Env, balance: i128) -> Result<TierProgress, Error> {
        check_balance(balance)?;
        let table = read_table(&e)?;
        Ok(engine::progress(balance, &table))
    }

    /// Credit value and minimum-redemption standing of a balance.
    pub fn redemption_eligibility(
        e: Env,
        balance: i128,
    ) -> Result<RedemptionEligibility, Error> {
        check_balance(balance)?;
        let min = read_min_redemption(&e)?;
        let rate = read_exchange_rate(&e)?;
        Ok(engine::redemption_eligibility(balance, min, rate))
    }

    /// Redemption tiers already unlocked by the balance.
    pub fn available_redemptions(
        e: Env,
        balance: i128,
    ) -> Result<Vec<TierDefinition>, Error> {
        check_balance(balance)?;
        let table = read_table(&e)?;
        Ok(engine::available_redemptions(&e, balance, &table))
    }

    /// Whole points earned from a spend in pence. Independent of the tier
    /// table; rejects non-positive spend.
    pub fn points_from_spend(_e: Env, amount_pence: i128) -> Result<i128, Error> {
        engine::points_from_spend(amount_pence)
    }

    /// Validate a manual point adjustment before it is committed to a user
    /// record. Positive awards are capped; redemptions must meet the
    /// configured minimum.
    pub fn validate_adjustment(
        e: Env,
        amount: i128,
        kind: AdjustmentKind,
    ) -> Result<(), Error> {
        let min = read_min_redemption(&e)?;
        engine::validate_adjustment(amount, kind, min)
    }

    pub fn get_tiers(e: Env) -> Result<Vec<TierDefinition>, Error> {
        read_table(&e)
    }

    pub fn get_min_redemption(e: Env) -> Result<i128, Error> {
        read_min_redemption(&e)
    }

    pub fn get_exchange_rate(e: Env) -> Result<i128, Error> {
        read_exchange_rate(&e)
    }

    pub fn get_admin(e: Env) -> Result<Address, Error> {
        e.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }
}

fn check_balance(balance: i128) -> Result<(), Error> {
    if balance < 0 {
        return Err(Error::NegativeBalance);
    }
    Ok(())
}

fn read_table(e: &Env) -> Result<Vec<TierDefinition>, Error> {
    e.storage()
        .instance()
        .get(&DataKey::TierTable)
        .ok_or(Error::NotInitialized)
}

fn read_min_redemption(e: &Env) -> Result<i128, Error> {
    e.storage()
        .instance()
        .get(&DataKey::MinRedemption)
        .ok_or(Error::NotInitialized)
}

fn read_exchange_rate(e: &Env) -> Result<i128, Error> {
    e.storage()
        .instance()
        .get(&DataKey::ExchangeRate)
        .ok_or(Error::NotInitialized)
}



#[cfg(test)]
mod test_progress;
