//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → CodecConfig (validated, immutable)
//!     → ConverterOptions::from → HttpConverter::new
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; a converter never changes its options
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::CodecConfig;
