//! Chart of accounts and normal-balance rules.
//!
//! This module defines the account registry domain:
//! - Account types and the normal balance derived from them
//! - Validated four-digit account codes
//! - The GL account record
//! - The default seed chart for a print farm

pub mod account;
pub mod chart;
pub mod error;

pub use account::{AccountCode, AccountType, GlAccount, NormalBalance};
pub use chart::{codes, default_chart};
pub use error::AccountError;
