//! Developer tooling: read-only world inspection and entity message formatting.
//!
//! # Invariants
//! - Tools never mutate a world; they only read through the kernel's accessors.

mod inspector;
mod petition;

pub use inspector::{EntityInfo, WorldInspector, WorldSummary};
pub use petition::form_petition;

pub fn crate_info() -> &'static str {
    "cosmos-tools v0.1.0"
}
