// SPDX-License-Identifier: GPL-3.0-only

//! Core of a PokéApi browser: a cached API client, the list page
//! filter/sort/paginate pipeline, its view state and url synchronisation,
//! and the type-effectiveness calculator.

pub mod api;
pub mod config;
pub mod entities;
pub mod error;
pub mod layout;
pub mod logging;
pub mod pipeline;
pub mod query;
pub mod snapshot;
pub mod source;
pub mod store;
pub mod type_effectiveness;
pub mod url_sync;
mod utils;

#[cfg(test)]
mod testing;

pub use api::DexApi;
pub use config::{DexConfig, TypeFilteringMode};
pub use error::{DexError, Result};
pub use snapshot::Snapshot;
pub use store::{ViewAction, ViewState, ViewStore};
pub use type_effectiveness::Effectiveness;
pub use url_sync::ViewController;
