//! Data models shared by several API sections.

pub mod common;
pub mod serde_helpers;

pub use common::*;
