//! CLI commands
//!
//! Command implementations for the `clu` binary.

mod auth;
mod pr;
mod style;
mod update;

pub use auth::{run_auth_setup, run_auth_test};
pub use pr::{run_pr_close, run_pr_create, run_pr_list};
pub use update::run_update;
