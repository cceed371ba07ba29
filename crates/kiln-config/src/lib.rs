//! Build-configuration resolution for front-end asset pipelines.
//!
//! Given an [`Environment`] and a declarative [`RuleTable`], [`resolve`]
//! produces an immutable [`OutputManifest`]: output naming, an ordered
//! processing chain per asset type, the optimization policy, static copies and
//! plugin wiring. The manifest is what an external bundling engine consumes.
//!
//! ```
//! use kiln_config::{resolve, Environment, RuleTable, StepKind};
//! use std::path::Path;
//!
//! let manifest = resolve(Environment::Development, &RuleTable::standard()).unwrap();
//! let chain = manifest.chain_for(Path::new("styles/app.scss")).unwrap();
//! assert_eq!(
//!     chain.kinds(),
//!     vec![StepKind::Compile, StepKind::Extract, StepKind::Transform]
//! );
//! assert!(manifest.chain_for(Path::new("data.xyz")).is_err());
//! ```

pub mod chain;
pub mod config;
pub mod dev;
pub mod discovery;
pub mod environment;
pub mod error;
pub mod manifest;
pub mod naming;
pub mod optimization;
pub mod plugins;
pub mod project;
pub mod resolver;
pub mod rules;
pub mod types;
pub mod validation;

// Re-export main types
pub use chain::*;
pub use config::*;
pub use dev::*;
pub use environment::*;
pub use error::*;
pub use manifest::*;
pub use naming::*;
pub use optimization::*;
pub use plugins::*;
pub use project::*;
pub use resolver::*;
pub use rules::*;
pub use types::*;

// Re-export discovery and validation
pub use discovery::{CONFIG_FILE, ConfigDiscovery, PACKAGE_JSON_FIELD, discover, load_value_from};
pub use validation::{ConfigValidator, FsValidator, SchemaValidator, validate_fs, validate_schema};
