//! # CLI Module
//!
//! Command-line front end for the coercion engine.
//!
//! ## Commands
//!
//! ### `coerce`
//!
//! Coerce a single raw value:
//!
//! ```bash
//! brrtcoerce coerce --type '[number]' --delimiters ',|' '1,2|3'
//! # [1,2,3]
//! ```
//!
//! ### `invoke`
//!
//! Build the argument map for a method from a simulated request:
//!
//! ```bash
//! brrtcoerce invoke --schema methods.yaml --method find \
//!     --path '/items?ids=1,2&verbose=true' --header 'X-Tenant: 0042'
//! ```
//!
//! ### `check`
//!
//! Load a schema file and print every method with its resolved argument types:
//!
//! ```bash
//! brrtcoerce check --schema methods.yaml
//! ```
//!
//! `--schema` falls back to `BRRTC_SCHEMA`. Logging is configured through the
//! `BRRTC_LOG_*` variables (see [`crate::telemetry::LogConfig::from_env`]).

mod commands;

pub use commands::{parse_header, parse_key_value, run, run_cli, Cli, Commands};
