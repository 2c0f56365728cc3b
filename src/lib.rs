//! # sia-refs
//!
//! Keeps a Redmine wiki page of academic references up to date from
//! Semantic Scholar search results.
//!
//! ## Modules
//!
//! - [`semanticscholar`] - Semantic Scholar paper search
//! - [`markdown`] - Markdown rendering of the results
//! - [`redmine`] - Redmine wiki page publisher
//! - [`pipeline`] - Runs the three stages in order
//! - [`config`] - Run configuration
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sia_refs::{config::Config, pipeline};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let outcome = pipeline::run(&config, false).await;
//!     println!("success: {}", outcome.is_success());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod markdown;
pub mod pipeline;
pub mod redmine;
pub mod semanticscholar;

pub use config::Config;
pub use error::{RefsError, Result};
pub use pipeline::{run, RunOutcome};
