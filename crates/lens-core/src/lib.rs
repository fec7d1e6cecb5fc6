//! Core primitives for stocklens
//!
//! This crate defines the types shared by every other stocklens crate: the
//! normalized [`Ticker`] symbol and the error type used at the assistant
//! boundary.

pub mod error;
pub mod ticker;

pub use error::{Error, Result};
pub use ticker::Ticker;
