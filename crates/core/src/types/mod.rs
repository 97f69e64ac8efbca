//! Core types for Rocket Shoes.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod locale;
pub mod price;

pub use id::*;
pub use locale::{Locale, LocaleError};
pub use price::{CurrencyCode, Price};
