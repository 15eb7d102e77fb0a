//! domain_hosts library: resolves domain lists into hosts files
//!
//! This library resolves a list of domains concurrently against several DNS
//! backends (the system resolver, Google Public DNS, Cloudflare), falls back
//! to similar domains and alternate TLDs when a domain fails everywhere, and
//! renders the successful results as a sorted, deduplicated hosts file.
//!
//! # Example
//!
//! ```no_run
//! use domain_hosts::{run_generate, Config};
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     file: Some(PathBuf::from("general.txt")),
//!     worker_count: Some(20),
//!     ..Default::default()
//! };
//!
//! let report = run_generate(config).await?;
//! println!("Resolved {} of {} domains", report.resolved, report.total);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod app;
pub mod config;
pub mod dns;
pub mod domain;
pub mod error_handling;
pub mod fallback;
pub mod hosts;
pub mod initialization;
pub mod resolve;
mod run;

// Re-export public API
pub use config::{BackendKind, Config, LogFormat, LogLevel};
pub use dns::Resolve;
pub use domain::Domain;
pub use error_handling::{FailureKind, GenerateError};
pub use resolve::{resolve_all, ResolutionReport, ResolutionResult, ResolveContext, ResolveOptions};
pub use run::{run_generate, run_generate_with_backends, select_input_file, GenerateReport};
