//! Plugin manifest feed
//!
//! The manifest is a JSON array of plugin records, each owning the list of
//! published releases (newest first). Every release names the Jellyfin ABI it
//! targets; only the two newest ABIs are kept in the feed.
//!
//! # Modules
//!
//! - [`types`]: `PluginRecord`, `ReleaseEntry` and the dispatch payload
//! - [`registry`]: insertion, validation and ABI-based pruning
//! - [`store`]: reading and writing the manifest file
//! - [`error`]: Error type for manifest operations

pub mod error;
pub mod registry;
pub mod store;
pub mod types;
