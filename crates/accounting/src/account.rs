use std::sync::Arc;

use ledgerkit_core::{AccountId, Annotations, Entity};

/// A ledger account.
///
/// `Account` is a cheap handle: clones refer to the same account (same id,
/// same annotation map). Identity is the id, so two accounts created with the
/// same name are different accounts. The name is fixed at construction and is
/// only checked against the account-name grammar when rendered.
#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    name: Arc<str>,
    annotations: Annotations,
}

impl Account {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_annotations(name, Annotations::new())
    }

    pub fn with_annotations(name: impl Into<String>, annotations: Annotations) -> Self {
        Self {
            id: AccountId::new(),
            name: Arc::from(name.into()),
            annotations,
        }
    }

    pub fn account_id(&self) -> AccountId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mutable through the shared handle; the name is not.
    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }
}

impl Entity for Account {
    type Id = AccountId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Account {}

impl core::hash::Hash for Account {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl core::fmt::Display for Account {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.name)
    }
}
