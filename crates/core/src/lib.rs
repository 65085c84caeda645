//! Core types for the discord relay message store.
//!
//! Everything here is pure: the record model and its validation, the
//! store-neutral attribute model and codec, and the traits backends implement.

pub mod message;
pub mod storage;
