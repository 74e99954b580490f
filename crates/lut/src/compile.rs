//! Build-script integration.
//!
//! ```ignore
//! // build.rs
//! use keepsake_lut::compile::BuildCtx;
//!
//! fn main() -> Result<(), keepsake_lut::LutError> {
//!     let ctx = BuildCtx::from_env()?;
//!     let manifest = ctx.load_manifest("hierarchy.toml")?;
//!     let config = ctx.load_config("keepsake.toml")?;
//!     let table = keepsake_lut::generate_from_manifest(&manifest, &config)?;
//!     ctx.write_table("retainer_table.rs", &table)?;
//!     Ok(())
//! }
//! ```
//!
//! The crate then includes the table with
//! `include!(concat!(env!("OUT_DIR"), "/retainer_table.rs"));`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::LutConfig;
use crate::emit::GeneratedTable;
use crate::error::{LutError, Result};
use crate::hierarchy::Manifest;

pub struct BuildCtx {
	pub manifest_dir: PathBuf,
	pub out_dir: PathBuf,
}

impl BuildCtx {
	pub fn new(manifest_dir: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
		Self {
			manifest_dir: manifest_dir.into(),
			out_dir: out_dir.into(),
		}
	}

	/// Reads `CARGO_MANIFEST_DIR` and `OUT_DIR` as set by cargo for build scripts.
	pub fn from_env() -> Result<Self> {
		let manifest_dir =
			std::env::var_os("CARGO_MANIFEST_DIR").ok_or(LutError::MissingEnv("CARGO_MANIFEST_DIR"))?;
		let out_dir = std::env::var_os("OUT_DIR").ok_or(LutError::MissingEnv("OUT_DIR"))?;
		Ok(Self::new(manifest_dir, out_dir))
	}

	pub fn asset(&self, rel: &str) -> PathBuf {
		self.manifest_dir.join(rel)
	}

	pub fn rerun_if_changed(&self, path: &Path) {
		println!("cargo:rerun-if-changed={}", path.display());
	}

	pub fn load_manifest(&self, rel: &str) -> Result<Manifest> {
		let path = self.asset(rel);
		self.rerun_if_changed(&path);
		Ok(Manifest::load(&path)?)
	}

	pub fn load_config(&self, rel: &str) -> Result<LutConfig> {
		let path = self.asset(rel);
		self.rerun_if_changed(&path);
		Ok(LutConfig::load(&path)?)
	}

	/// Writes `table` to `OUT_DIR/filename`, leaving the file untouched when
	/// its content is already current.
	pub fn write_table(&self, filename: &str, table: &GeneratedTable) -> Result<PathBuf> {
		let path = self.out_dir.join(filename);
		if fs::read_to_string(&path).is_ok_and(|existing| existing == table.source) {
			debug!(path = %path.display(), "retainer table unchanged");
			return Ok(path);
		}
		fs::write(&path, &table.source).map_err(|error| LutError::Io {
			path: path.clone(),
			error,
		})?;
		debug!(path = %path.display(), bytes = table.source.len(), "wrote retainer table");
		Ok(path)
	}
}
