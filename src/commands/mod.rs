//! CLI command implementations.
//!
//! - **plan**: Build a campaign plan from collected keyword records
//! - **init**: Write a default `semplan.toml`

pub mod init;
pub mod plan;

pub use init::init_config;
pub use plan::{handle_plan, PlanConfig};
