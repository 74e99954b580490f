//! Example consumer of a generated retainer table.
//!
//! `build.rs` reads `hierarchy.toml` and `keepsake.toml` and generates the
//! table included in [`table`]. Subclasses without retainers of their own,
//! such as `demo.ui.Button`, resolve to their nearest ancestor's retainer.

pub mod retainers;

/// Generated from `hierarchy.toml`.
pub mod table {
	include!(concat!(env!("OUT_DIR"), "/retainer_table.rs"));
}
