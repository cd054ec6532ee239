//! Plain-text ledger rendering.
//!
//! ```text
//! 2000-01-01 foo bar    ; note
//!     foo                                          -5.00
//!     bar                                           5.00  ; leg note
//! ```
//!
//! Preconditions (date, payee, account-name grammar) are only checked here,
//! at render time.

use ledgerkit_core::decimal::to_fixed;
use ledgerkit_core::{DomainError, DomainResult};

use crate::config::LedgerStyle;
use crate::posting::Posting;
use crate::transaction::Transaction;

const HEADER_NOTE_SEPARATOR: &str = "    ; ";
const POSTING_NOTE_SEPARATOR: &str = "  ; ";
/// Minimum blank columns between account name and amount.
const MIN_AMOUNT_GAP: usize = 2;

/// Check an account name against the ledger grammar.
///
/// Runs of word characters (`A-Z a-z 0-9 _`) and `: . @ -`, separated by single
/// spaces. No leading, trailing or doubled spaces; not empty.
pub fn validate_account_name(name: &str) -> DomainResult<()> {
    let mut after_space = true;
    for c in name.chars() {
        if c == ' ' {
            if after_space {
                return Err(DomainError::invalid_account_name(name));
            }
            after_space = true;
        } else if is_name_char(c) {
            after_space = false;
        } else {
            return Err(DomainError::invalid_account_name(name));
        }
    }
    if after_space {
        return Err(DomainError::invalid_account_name(name));
    }
    Ok(())
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '.' | '@' | '-')
}

fn non_empty(note: Option<&str>) -> Option<&str> {
    note.filter(|n| !n.is_empty())
}

impl Posting {
    /// Render with the default [`LedgerStyle`].
    pub fn to_ledger(&self) -> DomainResult<String> {
        self.to_ledger_with(&LedgerStyle::default())
    }

    pub fn to_ledger_with(&self, style: &LedgerStyle) -> DomainResult<String> {
        let name = self.account().name();
        validate_account_name(name)?;

        let amount = to_fixed(&self.amount(), style.min_scale);
        let mut line = format!("{name:<width$}", width = style.account_width);
        let padded_amount = format!("{amount:>width$}", width = style.amount_width);

        let gap = (line.chars().count() - name.chars().count())
            + (padded_amount.chars().count() - amount.chars().count());
        for _ in gap..MIN_AMOUNT_GAP {
            line.push(' ');
        }
        line.push_str(&padded_amount);

        if let Some(note) = non_empty(self.note().as_deref()) {
            line.push_str(POSTING_NOTE_SEPARATOR);
            line.push_str(note);
        }
        Ok(line)
    }
}

impl Transaction {
    /// Render with the default [`LedgerStyle`].
    pub fn to_ledger(&self) -> DomainResult<String> {
        self.to_ledger_with(&LedgerStyle::default())
    }

    pub fn to_ledger_with(&self, style: &LedgerStyle) -> DomainResult<String> {
        let date = self.date().ok_or(DomainError::MissingDate)?;
        let payee = self
            .payee()
            .filter(|p| !p.is_empty())
            .ok_or(DomainError::MissingPayee)?;

        let mut out = format!("{} {}", date.format("%Y-%m-%d"), payee);
        if let Some(note) = non_empty(self.note()) {
            out.push_str(HEADER_NOTE_SEPARATOR);
            out.push_str(note);
        }

        let indent = " ".repeat(style.indent);
        for posting in self.postings() {
            out.push('\n');
            out.push_str(&indent);
            out.push_str(&posting.to_ledger_with(style)?);
        }
        Ok(out)
    }
}

/// Render transactions as a journal: entries separated by a blank line.
pub fn render_journal(transactions: &[Transaction]) -> DomainResult<String> {
    render_journal_with(transactions, &LedgerStyle::default())
}

pub fn render_journal_with(transactions: &[Transaction], style: &LedgerStyle) -> DomainResult<String> {
    let mut out = String::new();
    for (i, transaction) in transactions.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&transaction.to_ledger_with(style)?);
        out.push('\n');
    }
    Ok(out)
}
