//! Assistant surface for stocklens
//!
//! An external assistant interacts with the dashboard through two kinds of
//! registered handles:
//!
//! - [`AssistantAction`]: a named, schema-described operation the assistant
//!   may invoke (e.g. running a ticker search).
//! - [`ContextProvider`]: a named, read-only snapshot of live view state the
//!   assistant may query before answering.
//!
//! Both are collected on an [`AssistantSurface`], which owns name lookup,
//! invocation, and bulk snapshotting.

pub mod action;
pub mod context;
pub mod surface;

pub use action::{ActionSpec, AssistantAction};
pub use context::ContextProvider;
pub use surface::AssistantSurface;
