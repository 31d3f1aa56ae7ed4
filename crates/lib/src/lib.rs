//! binstubs-lib: Core types and logic for binstubs
//!
//! A binstub is a tiny executable script that runs the platform client scoped to
//! one app. This crate provides:
//! - `codec`: the self-describing binstub file format
//! - `resolve`: deriving binstub names from an app inventory or Git remotes
//! - `store`: writing, scanning and deleting binstubs in a directory
//! - `inventory`: the app and remote sources the CLI plugs in

pub mod codec;
pub mod config;
pub mod consts;
pub mod inventory;
pub mod resolve;
pub mod store;
pub mod types;

pub use codec::ShimFormat;
pub use store::{Binstub, BinstubStore, StoreError, WriteOutcome};
pub use types::{AppName, NameError, Naming, ShimName, StubTarget};
