//! # Breeze Configuration Library
//!
//! Loads the declarative build configuration of a utility-CSS generator and
//! merges it onto built-in defaults.
//!
//! ## Features
//!
//! - TOML, JSON and YAML sources (`toml` and `yaml` features, on by default)
//! - `{palette:…}` and `{file:…}` default-value references
//! - Theme resolution: wholesale overrides, `colors` replacement and per-key
//!   `theme.extend`
//! - Variant resolution: per-group union with `variants.extend`
//! - Errors that name the file and the line, column or key at fault
//! - Test utilities behind the `test-utils` feature
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use breeze_config::ConfigDocument;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let doc = ConfigDocument::load("breeze.config.toml")?;
//!     let theme = doc.resolve_theme();
//!     let variants = doc.resolve_variants();
//!     println!("{} categories, {} groups", theme.len(), variants.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod content;
mod defaults;
mod document;
mod error;
mod format;
mod loader;
pub mod palette;
mod plugins;
mod references;
mod schema;
mod theme;
mod variants;

// Include test_utils when test-utils feature is enabled
#[cfg(feature = "test-utils")]
mod test_utils;

pub use content::ContentGlobs;
pub use defaults::{ThemeDefaults, VariantDefaults};
pub use document::{ConfigDocument, DarkMode};
pub use error::{ConfigError, ConfigResult, SourceLocation};
pub use format::SourceFormat;
pub use loader::{find_config_file, ConfigLoader, UnknownKeyPolicy, CONFIG_FILE_STEM};
pub use plugins::PluginRef;
pub use references::resolve_include_path;
pub use schema::schema;
pub use theme::{ThemeSettings, ThemeTable, TokenMap, TokenValue, COLORS};
pub use variants::{UnknownVariant, Variant, VariantSet, VariantSettings, VariantTable};

// Export test utilities when feature is enabled
#[cfg(feature = "test-utils")]
pub use test_utils::*;
