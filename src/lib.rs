//! # Reviewkit
//!
//! One-off migration utilities for a review dataset stored in MongoDB.
//! Each utility scans a collection once and drives a single side effect:
//! a line-delimited JSON file, a JSON-array file, or a new collection.
//!
//! ## Usage
//!
//! ```bash
//! reviewkit merge [--restaurants NAME] [--reviews NAME] [-o FILE]
//! reviewkit reviews [-o FILE]
//! reviewkit sample --size 4000
//! reviewkit backfill [--source NAME] [--target NAME]
//! ```
//!
//! ## Modules
//!
//! - `config` - Connection settings for the source store
//! - `error` - Typed failures shared by every procedure
//! - `export` - The four migration procedures
//! - `models` - Output record shapes
//! - `store` - Document-store seam with MongoDB and in-memory backends
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod store;
