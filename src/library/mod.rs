//! Music library data model.
//!
//! Listings come from the player API one directory at a time. This module
//! holds the shapes of those listings, percent-decoding of the paths they
//! contain, and the [`SkipRule`] that prunes paths from recursive collection.

pub mod skip;
pub mod types;

pub use skip::{SkipRule, DEFAULT_EXCLUDED_SUBSTRING};
pub use types::{decode_path, Directory, File, Folder};
