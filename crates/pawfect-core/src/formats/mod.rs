//! # Formats Module
//!
//! Serialized page descriptions.

pub mod fixture;

pub use fixture::{MAX_FIXTURE_DEPTH, NodeFixture, PageFixture, sample_contact_page};
