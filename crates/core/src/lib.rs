//! `ledgerkit-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no infrastructure).

pub mod annotations;
pub mod decimal;
pub mod entity;
pub mod error;
pub mod id;

pub use annotations::{Annotations, NOTE_KEY};
pub use decimal::Decimal;
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::AccountId;
