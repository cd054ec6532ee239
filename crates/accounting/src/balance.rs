//! Running per-account balances.
//!
//! Two calling conventions share one algorithm: the mutable accumulator
//! ([`BalanceMap::add_posting`] / [`BalanceMap::add_transaction`]) and the
//! fold step [`reduce_balance`]. Both go through [`Apply`].

use std::collections::HashMap;

use ledgerkit_core::decimal::checked_sum;
use ledgerkit_core::{AccountId, Decimal, DomainResult, Entity};

use crate::account::Account;
use crate::posting::Posting;
use crate::transaction::Transaction;

/// Cumulative balance per account, enumerated in first-seen order.
///
/// Entries are never removed, only updated.
#[derive(Debug, Clone, Default)]
pub struct BalanceMap {
    entries: Vec<(Account, Decimal)>,
    index: HashMap<AccountId, usize>,
}

impl BalanceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current balance, or zero for an account never recorded. Never inserts.
    pub fn get(&self, account: &Account) -> Decimal {
        self.index
            .get(account.id())
            .map(|&i| self.entries[i].1)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn has(&self, account: &Account) -> bool {
        self.index.contains_key(account.id())
    }

    /// Upsert; a first-time account is appended to the enumeration order.
    pub fn set(&mut self, account: &Account, value: Decimal) {
        match self.index.get(account.id()) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index.insert(account.account_id(), self.entries.len());
                self.entries.push((account.clone(), value));
            }
        }
    }

    /// `balance[posting.account] += posting.amount`.
    pub fn add_posting(&mut self, posting: &Posting) -> DomainResult<()> {
        let next = checked_sum(self.get(posting.account()), posting.amount())?;
        self.set(posting.account(), next);
        Ok(())
    }

    /// Apply every posting in order.
    ///
    /// All-or-nothing: if any running balance would overflow, nothing is applied.
    pub fn add_transaction(&mut self, transaction: &Transaction) -> DomainResult<()> {
        let mut staged: Vec<(&Account, Decimal)> = Vec::with_capacity(transaction.postings().len());
        let mut pending: HashMap<AccountId, Decimal> = HashMap::new();

        for posting in transaction.postings() {
            let id = posting.account().account_id();
            let current = pending
                .get(&id)
                .copied()
                .unwrap_or_else(|| self.get(posting.account()));
            let next = checked_sum(current, posting.amount())?;
            pending.insert(id, next);
            staged.push((posting.account(), next));
        }

        for (account, value) in staged {
            self.set(account, value);
        }

        tracing::debug!(
            postings = transaction.postings().len(),
            accounts = self.len(),
            "applied transaction to balances"
        );
        Ok(())
    }

    /// Apply a sequence of postings or transactions, stopping at the first error.
    pub fn apply_all<'a, T>(&mut self, items: impl IntoIterator<Item = &'a T>) -> DomainResult<()>
    where
        T: Apply + ?Sized + 'a,
    {
        for item in items {
            item.apply_to(self)?;
        }
        Ok(())
    }

    /// Accounts and balances in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&Account, Decimal)> + '_ {
        self.entries.iter().map(|(account, value)| (account, *value))
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> + '_ {
        self.entries.iter().map(|(account, _)| account)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact sum over every balance. Unchanged by applying a valid transaction.
    pub fn total(&self) -> DomainResult<Decimal> {
        self.entries
            .iter()
            .try_fold(Decimal::ZERO, |sum, (_, value)| checked_sum(sum, *value))
    }
}

impl PartialEq for BalanceMap {
    /// Same accounts with equal balances; enumeration order is not compared.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(account, value)| other.has(account) && other.get(account) == value)
    }
}

/// Something that can be folded into a [`BalanceMap`].
pub trait Apply {
    fn apply_to(&self, balances: &mut BalanceMap) -> DomainResult<()>;
}

impl Apply for Posting {
    fn apply_to(&self, balances: &mut BalanceMap) -> DomainResult<()> {
        balances.add_posting(self)
    }
}

impl Apply for Transaction {
    fn apply_to(&self, balances: &mut BalanceMap) -> DomainResult<()> {
        balances.add_transaction(self)
    }
}

/// Fold step: take the balances so far (or none), return them with `item` applied.
///
/// ```ignore
/// let balances = postings
///     .iter()
///     .try_fold(None, |acc, p| reduce_balance(acc, p).map(Some))?;
/// ```
pub fn reduce_balance<T>(balances: Option<BalanceMap>, item: &T) -> DomainResult<BalanceMap>
where
    T: Apply + ?Sized,
{
    let mut balances = balances.unwrap_or_default();
    item.apply_to(&mut balances)?;
    Ok(balances)
}
