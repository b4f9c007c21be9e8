//! # giftmatch-types
//!
//! Shared types, errors, and configuration for the **GiftMatch** engine.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Identifiers**: [`ParticipantId`], [`ExchangeId`]
//! - **Constraints**: [`ExclusionPair`]
//! - **Results**: [`Assignment`], [`Pairing`]
//! - **Lifecycle**: [`ExchangeStatus`], [`ParticipantStatus`]
//! - **Configuration**: [`MatcherConfig`]
//! - **Errors**: [`GiftmatchError`] with `GM_ERR_` prefix codes, [`FailureKind`]
//! - **Constants**: system-wide limits and defaults

pub mod assignment;
pub mod config;
pub mod constants;
pub mod error;
pub mod exchange;
pub mod exclusion;
pub mod ids;

pub use assignment::*;
pub use config::*;
pub use error::*;
pub use exchange::*;
pub use exclusion::*;
pub use ids::*;

// Constants are accessed via `giftmatch_types::constants::FOO`
// (not re-exported to avoid name collisions).
