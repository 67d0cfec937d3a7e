//! Builder configuration
//!
//! Defaults reproduce the plain construction protocol: title mentions only,
//! sequential scan. A versioned YAML file can switch on journal-mention
//! propagation and the parallel drug scan.
//!
//! ```yaml
//! version: 1
//! mentions:
//!   propagate_to_journals: true
//!   parallel: true
//!   min_parallel_drugs: 256
//! ```

pub mod builder_config;
pub mod error;
pub mod io;

pub use builder_config::{BuilderConfig, MentionConfig};
pub use error::{ConfigError, ConfigResult};
pub use io::ConfigFileV1;
