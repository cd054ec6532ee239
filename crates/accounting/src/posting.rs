use ledgerkit_core::{Annotations, Decimal, NOTE_KEY};

use crate::account::Account;

/// One signed leg of a transaction.
///
/// The posting references its account (a shared handle), it does not own it.
/// Source legs are negative, destination legs positive.
#[derive(Debug, Clone, PartialEq)]
pub struct Posting {
    account: Account,
    amount: Decimal,
    annotations: Annotations,
}

impl Posting {
    pub fn new(account: &Account, amount: Decimal) -> Self {
        Self::with_annotations(account, amount, Annotations::new())
    }

    pub fn with_annotations(account: &Account, amount: Decimal, annotations: Annotations) -> Self {
        Self {
            account: account.clone(),
            amount,
            annotations,
        }
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    /// The `note` annotation, when it is a string.
    pub fn note(&self) -> Option<String> {
        self.annotations.get_str(NOTE_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn keeps_account_amount_and_note() {
        let account = Account::new("foobar");
        let posting = Posting::with_annotations(&account, dec!(0.3), Annotations::with_note("a note"));

        assert_eq!(posting.account(), &account);
        assert_eq!(posting.amount(), dec!(0.3));
        assert_eq!(posting.note().as_deref(), Some("a note"));
    }

    #[test]
    fn no_note_by_default() {
        let posting = Posting::new(&Account::new("foo"), dec!(1));
        assert_eq!(posting.note(), None);
        assert!(posting.annotations().is_empty());
    }
}
