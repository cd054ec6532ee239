use chrono::NaiveDate;

use ledgerkit_core::decimal::{checked_sum, is_exact_zero};
use ledgerkit_core::{Annotations, Decimal, DomainError, DomainResult};

use crate::account::Account;
use crate::posting::Posting;

/// A dated group of postings meant to sum to exactly zero.
///
/// Postings are append-only. Nothing enforces the zero-sum rule while the
/// transaction is being built; call [`Transaction::valid`] (or
/// [`Transaction::validate`]) once all legs are in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transaction {
    date: Option<NaiveDate>,
    payee: Option<String>,
    note: Option<String>,
    postings: Vec<Posting>,
    annotations: Annotations,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_payee(mut self, payee: impl Into<String>) -> Self {
        self.payee = Some(payee.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn payee(&self) -> Option<&str> {
        self.payee.as_deref()
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn postings(&self) -> &[Posting] {
        &self.postings
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    /// Append a single posting (hand-built multi-leg entries).
    pub fn push(&mut self, posting: Posting) -> &mut Self {
        self.postings.push(posting);
        self
    }

    /// Move `amount` from `from` to `to`.
    ///
    /// Appends `(from, -amount)` then `(to, +amount)`. Both postings receive the
    /// same `annotations` handle: a later write through one leg is visible on the
    /// other. Pass `annotations.detached()` for independent legs.
    pub fn transfer(
        &mut self,
        from: &Account,
        to: &Account,
        amount: Decimal,
        annotations: Annotations,
    ) -> &mut Self {
        tracing::trace!(from = from.name(), to = to.name(), %amount, "transfer");
        self.postings
            .push(Posting::with_annotations(from, -amount, annotations.clone()));
        self.postings
            .push(Posting::with_annotations(to, amount, annotations));
        self
    }

    /// Exact sum of all posting amounts.
    pub fn imbalance(&self) -> DomainResult<Decimal> {
        self.postings
            .iter()
            .try_fold(Decimal::ZERO, |sum, posting| checked_sum(sum, posting.amount()))
    }

    /// Whether the postings sum to exactly zero.
    ///
    /// An unbalanced transaction is a normal outcome, not an error. A sum that
    /// cannot be represented counts as unbalanced.
    pub fn valid(&self) -> bool {
        matches!(self.imbalance(), Ok(sum) if is_exact_zero(&sum))
    }

    /// Like [`Transaction::valid`], for callers that want to propagate with `?`.
    pub fn validate(&self) -> DomainResult<()> {
        let imbalance = self.imbalance()?;
        if is_exact_zero(&imbalance) {
            Ok(())
        } else {
            Err(DomainError::Unbalanced { imbalance })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn transfer_appends_balanced_pair() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let foo = Account::new("foo");
        let bar = Account::new("bar");
        let mut transaction = Transaction::new().with_date(date);

        transaction.transfer(&foo, &bar, dec!(5), Annotations::with_note("bla"));

        assert!(transaction.valid());
        assert_eq!(transaction.date(), Some(date));

        let postings = transaction.postings();
        assert_eq!(postings.len(), 2);
        assert_eq!(postings[0].account(), &foo);
        assert_eq!(postings[0].amount(), dec!(-5));
        assert_eq!(postings[0].note().as_deref(), Some("bla"));
        assert_eq!(postings[1].account(), &bar);
        assert_eq!(postings[1].amount(), dec!(5));
        assert_eq!(postings[1].note().as_deref(), Some("bla"));
    }

    #[test]
    fn transfer_legs_share_annotations() {
        let foo = Account::new("foo");
        let bar = Account::new("bar");
        let mut transaction = Transaction::new();
        transaction.transfer(&foo, &bar, dec!(1), Annotations::new());

        transaction.postings()[0]
            .annotations()
            .insert("cleared", json!(true));

        assert_eq!(
            transaction.postings()[1].annotations().get("cleared"),
            Some(json!(true))
        );
    }

    #[test]
    fn transfers_chain() {
        let a = Account::new("a");
        let b = Account::new("b");
        let c = Account::new("c");
        let mut transaction = Transaction::new();
        transaction
            .transfer(&a, &b, dec!(3.0), Annotations::new())
            .transfer(&b, &c, dec!(1.0), Annotations::new());
        assert_eq!(transaction.postings().len(), 4);
        assert!(transaction.valid());
    }

    #[test]
    fn empty_transaction_is_valid() {
        assert!(Transaction::new().valid());
    }

    #[test]
    fn unbalanced_is_a_normal_outcome() {
        let foo = Account::new("foo");
        let mut transaction = Transaction::new();
        transaction.push(Posting::new(&foo, dec!(10)));
        assert!(!transaction.valid());
        assert_eq!(transaction.imbalance(), Ok(dec!(10)));
        assert_eq!(
            transaction.validate(),
            Err(DomainError::Unbalanced { imbalance: dec!(10) })
        );
    }

    #[test]
    fn multi_leg_entry_balances_after_last_leg() {
        let cash = Account::new("assets:cash");
        let food = Account::new("expenses:food");
        let tip = Account::new("expenses:tip");
        let mut transaction = Transaction::new();
        transaction.push(Posting::new(&food, dec!(12.50)));
        transaction.push(Posting::new(&tip, dec!(2.50)));
        assert!(!transaction.valid());
        transaction.push(Posting::new(&cash, dec!(-15.00)));
        assert!(transaction.valid());
        assert_eq!(transaction.validate(), Ok(()));
    }

    #[test]
    fn overflowing_sum_is_not_valid() {
        let a = Account::new("a");
        let mut transaction = Transaction::new();
        transaction.push(Posting::new(&a, Decimal::MAX));
        transaction.push(Posting::new(&a, Decimal::MAX));
        assert!(!transaction.valid());
        assert!(matches!(transaction.validate(), Err(DomainError::Overflow(_))));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: a transfer of any amount between two accounts balances.
        #[test]
        fn any_transfer_is_valid(mantissa in any::<i64>(), scale in 0u32..=10) {
            let amount = Decimal::new(mantissa, scale);
            let mut transaction = Transaction::new();
            transaction.transfer(&Account::new("a"), &Account::new("b"), amount, Annotations::new());
            prop_assert!(transaction.valid());
        }
    }
}
