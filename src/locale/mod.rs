//! Localized message lookup.
//!
//! The skill adapter resolves every spoken string through a
//! `MessageCatalog`. The turn engine never sees locales.

pub mod catalog;
mod strings;

pub use catalog::{Locale, MessageCatalog, MessageKey, MessageTable};
