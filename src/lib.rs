//! recase - selection-aware case conversion
//!
//! This crate converts text inside editable surfaces to Title Case,
//! UPPERCASE or lowercase, leaving configured tokens (such as "LLC")
//! exactly as the user wrote them.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod convert;
pub mod converter;
pub mod editable;
pub mod messages;
pub mod settings;
pub mod settings_watcher;
pub mod surface;
pub mod tracing;
pub mod tree;

// Re-export commonly used types
pub use config::RecaseConfig;
pub use convert::{ConversionMode, IgnoreList, IgnoreListCache};
pub use converter::{ConvertCommand, ConvertOutcome, Converter, SurfaceRegistry};
pub use messages::Msg;
pub use surface::{Surface, SurfaceId};
