//! # Context Module
//!
//! Builds the argument map for one method invocation.
//!
//! ## Flow
//!
//! 1. An [`InputSupplier`] hands over the raw value for each declared argument,
//!    read from the argument's [`ArgumentSource`](crate::spec::ArgumentSource)
//! 2. The argument's spec coerces it (see [`crate::coerce`])
//! 3. [`InvocationContext`] collects the results into [`Arguments`]
//!
//! [`ParsedRequest`] is the HTTP-shaped supplier: it holds headers, cookies,
//! query and path parameters and a JSON body, with no tie to a particular
//! server. `serde_json::Map` is a supplier too, for callers that already have
//! named parameters.

#[allow(clippy::module_inception)]
mod context;
mod request;

pub use context::{Arguments, ContextError, InvocationContext};
pub use request::{parse_cookies, parse_query_params, InputSupplier, ParsedRequest};
