//! Shared types, error model, and configuration for the advisor workspace.
//!
//! This crate is the foundation depended on by all other advisor crates.
//! It provides:
//! - [`AdvisorError`]: the unified error type
//! - Domain types ([`Program`], [`CourseRecord`], [`CurriculumStore`], [`DocumentLinkSet`])
//! - JSON artifact I/O ([`load_link_set`], [`load_curricula`], [`write_json`])
//! - Configuration ([`AppConfig`], config loading, bot token lookup)

pub mod artifacts;
pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use artifacts::{load_curricula, load_link_set, write_json};
pub use config::{
    AppConfig, HttpConfig, PathsConfig, ProgramsConfig, TelegramConfig, config_dir,
    config_file_path, init_config, load_config, load_config_from, resolve_bot_token,
};
pub use error::{AdvisorError, Result};
pub use types::{CourseRecord, CurriculumStore, DocumentCourses, DocumentLinkSet, Program};
