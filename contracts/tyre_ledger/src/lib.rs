//! # Tyre Points Ledger Contract
//!
//! Tracks per-user point balances and an append-only transaction log with
//! human-readable reasons. Points are earned from recorded spend (one tyre
//! per whole pound), redeemed against the configured minimum, or adjusted
//! manually by the admin with a signed delta.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, Address, Env, String, Symbol,
};

/// One tyre per whole pound spent.
pub const PENCE_PER_TYRE: i128 = 100;

/// Ceiling on a single Earned entry, against fat-finger admin input.
pub const MAX_SINGLE_AWARD: i128 = 1_000;

/// Direction of a point transaction.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AdjustmentKind {
    Earned = 0,
    Redeemed = 1,
}

/// One entry in the append-only log. `amount` is always positive; `kind`
/// carries the direction.
#[contracttype]
#[derive(Clone, Debug)]
pub struct PointTransaction {
    pub id: u64,
    pub user: Address,
    pub amount: i128,
    pub kind: AdjustmentKind,
    /// Human-readable reason, e.g. "Tyre fitting" or "Goodwill credit".
    pub reason: String,
    /// Who committed the entry: a recorder, the user (redemptions), or the
    /// admin (manual adjustments).
    pub recorded_by: Address,
    /// Ledger timestamp at commit.
    pub recorded_at: u64,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    InvalidAmount = 4,
    AmountTooLarge = 5,
    BelowMinimumRedemption = 6,
    InsufficientBalance = 7,
    TransactionNotFound = 8,
}

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Admin,
    /// Minimum points per redemption.
    MinRedemption,
    /// Authorized spend recorders (e.g. point-of-sale), besides the admin.
    Recorder(Address),
    /// Point balance per user. Missing key means zero.
    Balance(Address),
    /// Last assigned transaction id.
    TxCounter,
    /// Transaction by id.
    Transaction(u64),
}

#[contract]
pub struct TyreLedger;

#[contractimpl]
impl TyreLedger {
    /// Initialize the ledger with an admin and the minimum redemption size.
    pub fn initialize(e: Env, admin: Address, min_redemption: i128) -> Result<(), Error> {
        admin.require_auth();
        if e.storage().instance().has(&DataKey::Admin) {
            return Err(Error::AlreadyInitialized);
        }
        if min_redemption <= 0 {
            return Err(Error::InvalidAmount);
        }
        e.storage().instance().set(&DataKey::Admin, &admin);
        e.storage()
            .instance()
            .set(&DataKey::MinRedemption, &min_redemption);
        e.storage().instance().set(&DataKey::TxCounter, &0_u64);
        e.events()
            .publish((Symbol::new(&e, "ledger_initialized"),), admin);
        Ok(())
    }

    /// Allow an address to record spend on users' behalf.
    pub fn add_recorder(e: Env, recorder: Address) -> Result<(), Error> {
        let admin = read_admin(&e)?;
        admin.require_auth();
        let already: bool = e
            .storage()
            .instance()
            .get(&DataKey::Recorder(recorder.clone()))
            .unwrap_or(false);
        if already {
            return Ok(());
        }
        e.storage()
            .instance()
            .set(&DataKey::Recorder(recorder.clone()), &true);
        e.events()
            .publish((Symbol::new(&e, "recorder_added"),), recorder);
        Ok(())
    }

    pub fn remove_recorder(e: Env, recorder: Address) -> Result<(), Error> {
        let admin = read_admin(&e)?;
        admin.require_auth();
        e.storage()
            .instance()
            .remove(&DataKey::Recorder(recorder.clone()));
        e.events()
            .publish((Symbol::new(&e, "recorder_removed"),), recorder);
        Ok(())
    }

    /// Credit a user with points earned from a spend in pence and log the
    /// transaction. A spend under one pound earns nothing and records no
    /// entry. Returns the points awarded.
    pub fn record_spend(
        e: Env,
        recorder: Address,
        user: Address,
        amount_pence: i128,
        reason: String,
    ) -> Result<i128, Error> {
        recorder.require_auth();
        let admin = read_admin(&e)?;
        let is_recorder: bool = e
            .storage()
            .instance()
            .get(&DataKey::Recorder(recorder.clone()))
            .unwrap_or(false);
        if recorder != admin && !is_recorder {
            return Err(Error::Unauthorized);
        }
        if amount_pence <= 0 {
            return Err(Error::InvalidAmount);
        }
        let points = amount_pence / PENCE_PER_TYRE;
        if points == 0 {
            return Ok(0);
        }
        if points > MAX_SINGLE_AWARD {
            return Err(Error::AmountTooLarge);
        }
        let balance = read_balance(&e, &user);
        let new_balance = balance.checked_add(points).expect("balance overflow");
        e.storage()
            .instance()
            .set(&DataKey::Balance(user.clone()), &new_balance);
        let id = append_transaction(&e, &user, points, AdjustmentKind::Earned, &reason, &recorder);
        e.events().publish(
            (Symbol::new(&e, "points_earned"), user),
            (points, new_balance, id),
        );
        Ok(points)
    }

    /// Redeem points against a reward. The user authorizes the debit; the
    /// amount must meet the configured minimum and fit the balance. Returns
    /// the new balance.
    pub fn redeem(e: Env, user: Address, amount: i128, reason: String) -> Result<i128, Error> {
        user.require_auth();
        let min = read_min_redemption(&e)?;
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        if amount < min {
            return Err(Error::BelowMinimumRedemption);
        }
        let balance = read_balance(&e, &user);
        if amount > balance {
            return Err(Error::InsufficientBalance);
        }
        let new_balance = balance - amount;
        e.storage()
            .instance()
            .set(&DataKey::Balance(user.clone()), &new_balance);
        let id = append_transaction(&e, &user, amount, AdjustmentKind::Redeemed, &reason, &user);
        e.events().publish(
            (Symbol::new(&e, "points_redeemed"), user),
            (amount, new_balance, id),
        );
        Ok(new_balance)
    }

    /// Manually adjust a user's balance. Positive delta awards points under
    /// the single-award ceiling; negative delta deducts under the redemption
    /// minimum rule. Deductions clamp the balance at zero rather than going
    /// negative. Returns the new balance.
    pub fn adjust_balance(
        e: Env,
        user: Address,
        delta: i128,
        reason: String,
    ) -> Result<i128, Error> {
        let admin = read_admin(&e)?;
        admin.require_auth();
        if delta == 0 {
            return Err(Error::InvalidAmount);
        }
        let balance = read_balance(&e, &user);
        let (amount, kind, new_balance) = if delta > 0 {
            if delta > MAX_SINGLE_AWARD {
                return Err(Error::AmountTooLarge);
            }
            let next = balance.checked_add(delta).expect("balance overflow");
            (delta, AdjustmentKind::Earned, next)
        } else {
            let amount = -delta;
            let min = read_min_redemption(&e)?;
            if amount < min {
                return Err(Error::BelowMinimumRedemption);
            }
            let next = balance - amount;
            (amount, AdjustmentKind::Redeemed, if next < 0 { 0 } else { next })
        };
        e.storage()
            .instance()
            .set(&DataKey::Balance(user.clone()), &new_balance);
        let id = append_transaction(&e, &user, amount, kind, &reason, &admin);
        e.events().publish(
            (Symbol::new(&e, "balance_adjusted"), user),
            (delta, new_balance, id),
        );
        Ok(new_balance)
    }

    /// Current balance; zero for users with no history.
    pub fn get_balance(e: Env, user: Address) -> i128 {
        read_balance(&e, &user)
    }

    pub fn get_transaction(e: Env, id: u64) -> Result<PointTransaction, Error> {
        e.storage()
            .instance()
            .get(&DataKey::Transaction(id))
            .ok_or(Error::TransactionNotFound)
    }

    /// Number of transactions ever recorded. Ids run from 1 to this value.
    pub fn get_transaction_count(e: Env) -> u64 {
        e.storage()
            .instance()
            .get(&DataKey::TxCounter)
            .unwrap_or(0)
    }

    pub fn get_min_redemption(e: Env) -> Result<i128, Error> {
        read_min_redemption(&e)
    }

    pub fn get_admin(e: Env) -> Result<Address, Error> {
        read_admin(&e)
    }

    pub fn is_recorder(e: Env, address: Address) -> bool {
        e.storage()
            .instance()
            .get(&DataKey::Recorder(address))
            .unwrap_or(false)
    }
}

fn read_admin(e: &Env) -> Result<Address, Error> {
    e.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(Error::NotInitialized)
}

fn read_min_redemption(e: &Env) -> Result<i128, Error> {
    e.storage()
        .instance()
        .get(&DataKey::MinRedemption)
        .ok_or(Error::NotInitialized)
}

fn read_balance(e: &Env, user: &Address) -> i128 {
    e.storage()
        .instance()
        .get(&DataKey::Balance(user.clone()))
        .unwrap_or(0)
}

fn append_transaction(
    e: &Env,
    user: &Address,
    amount: i128,
    kind: AdjustmentKind,
    reason: &String,
    recorded_by: &Address,
) -> u64 {
    let counter: u64 = e
        .storage()
        .instance()
        .get(&DataKey::TxCounter)
        .unwrap_or(0);
    let id = counter.checked_add(1).expect("transaction counter overflow");
    let tx = PointTransaction {
        id,
        user: user.clone(),
        amount,
        kind,
        reason: reason.clone(),
        recorded_by: recorded_by.clone(),
        recorded_at: e.ledger().timestamp(),
    };
    e.storage().instance().set(&DataKey::Transaction(id), &tx);
    e.storage().instance().set(&DataKey::TxCounter, &id);
    id
}
