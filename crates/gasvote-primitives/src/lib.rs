//! # gasvote-primitives
//!
//! Primitive types shared by the gas schedule crates.
//!
//! This crate provides the numeric and chain types used throughout the system.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod epoch;
mod error;
mod u256;

pub use epoch::{Epoch, EPOCH_LENGTH};
pub use error::PrimitiveError;
pub use u256::parse_u256;

#[cfg(feature = "serde")]
pub use u256::serde_u256;

// Re-export primitive-types for U256
pub use primitive_types::U256;

/// Block height type
pub type BlockHeight = u64;
