//! User-chosen aliases, stored in `<base>/aliases.json`.
//!
//! Maps an alias name to an identity. Names are opaque; setting an existing
//! alias replaces it.

use crate::store::ConfigStore;

/// Aliases store filename.
pub const ALIASES_FILE: &str = "aliases.json";

pub type Aliases = ConfigStore<String>;
