//! CLI command implementations.
//!
//! - **analyze**: discover Python files and write the analysis JSON
//! - **risks**: turn a saved analysis into a risk map
//! - **targets**: list the functions a test generator should cover first
//! - **init**: write a default configuration file

pub mod analyze;
pub mod init;
pub mod risks;
pub mod targets;

pub use analyze::{analyze_project, handle_analyze, AnalyzeConfig};
pub use init::init_config;
pub use risks::{handle_risks, RisksConfig};
pub use targets::{handle_targets, TargetsConfig};
