//! Balance snapshots: a flat JSON object of account name -> exact decimal string.
//!
//! ```json
//! { "assets:cash": "-7.0", "expenses:food": "7.0" }
//! ```
//!
//! No nesting, no type tags, no version field. Keys are written in first-seen
//! order for readability only.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use ledgerkit_core::decimal::{parse_exact, to_exact_string};
use ledgerkit_core::{DomainError, DomainResult};

use crate::account::Account;
use crate::balance::BalanceMap;

impl BalanceMap {
    /// Flat snapshot in first-seen order.
    ///
    /// Distinct accounts sharing a name collapse into one key (the later
    /// balance wins, the first position is kept).
    pub fn to_json(&self) -> Value {
        let mut out = Map::with_capacity(self.len());
        for (account, balance) in self.iter() {
            out.insert(account.name().to_string(), Value::String(to_exact_string(&balance)));
        }
        Value::Object(out)
    }

    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }

    /// Rebuild balances from a snapshot, resolving names through `lookup`.
    ///
    /// Entries are applied in the snapshot's key order. Fails on a non-object
    /// snapshot, a non-string or inexact value, or a name `lookup` cannot resolve.
    pub fn from_json<F>(json: &Value, mut lookup: F) -> DomainResult<Self>
    where
        F: FnMut(&str) -> Option<Account>,
    {
        let object = json
            .as_object()
            .ok_or_else(|| DomainError::malformed_snapshot("expected a JSON object"))?;

        let mut balances = BalanceMap::new();
        for (name, value) in object {
            let text = value.as_str().ok_or_else(|| {
                DomainError::malformed_snapshot(format!("balance of {name:?} is not a string"))
            })?;
            let balance = parse_exact(text)?;
            let account = lookup(name).ok_or_else(|| DomainError::unknown_account(name.as_str()))?;
            balances.set(&account, balance);
        }

        tracing::debug!(accounts = balances.len(), "restored balances from snapshot");
        Ok(balances)
    }

    pub fn from_json_str<F>(text: &str, lookup: F) -> DomainResult<Self>
    where
        F: FnMut(&str) -> Option<Account>,
    {
        let json: Value = serde_json::from_str(text)
            .map_err(|e| DomainError::malformed_snapshot(e.to_string()))?;
        Self::from_json(&json, lookup)
    }
}

impl Serialize for BalanceMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
