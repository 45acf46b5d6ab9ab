//! Storage contracts.

pub mod flags;
