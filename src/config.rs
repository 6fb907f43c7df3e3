//! Host-facing configuration surface.
//!
//! This crate doesn't read files or environment variables itself — that's
//! CLI territory per the top-level docs — but it owns the typed shape of the
//! options a host needs to drive an `Emitter`, the way
//! `freddiehaddad-oxidized`'s `core-config` owns a small serde-backed struct
//! for its own host to load from TOML rather than leaving the field names
//! and defaults implicit.

use serde::{Deserialize, Serialize};

use crate::tables::Game;

/// Run-time options for an `Emitter` call. A host typically loads this from
/// a TOML config file or CLI flags and passes it straight through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitOptions {
    pub game: Game,
    /// Whether the listing/assembly writer prints a stack dump per instruction.
    #[serde(default)]
    pub print_stack: bool,
    /// Whether the DOT writer prefixes each node's label with its control tags.
    #[serde(default)]
    pub print_control_types: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            game: Game::Nwn,
            print_stack: false,
            print_control_types: false,
        }
    }
}
