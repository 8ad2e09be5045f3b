//! Shared types and domain logic for growing-recs
//!
//! Everything in this crate is pure: no network, no console. The CLI crate
//! feeds decoded Growstuff records in and renders the reports that come out.

pub mod models;
pub mod slug;

pub use models::*;
pub use slug::*;
