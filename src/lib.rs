//! # brrtcoerce
//!
//! **brrtcoerce** turns raw request parameters into typed method arguments for a
//! remote method invocation layer.
//!
//! ## Overview
//!
//! Every remotely callable method declares the arguments it accepts: a name, a
//! declared type (`string`, `number`, `boolean`, `date`, `object`, `any`, or an
//! array of one of those), and optionally an enum of allowed values and a set of
//! delimiter characters for splitting array text. Given that declaration and
//! whatever the transport handed over (query string text, a path segment, a
//! header, or an already decoded JSON body field), the engine produces the typed
//! value. When a value does not parse it is passed through unchanged; coercion
//! never fails on input data.
//!
//! ## Architecture
//!
//! - **[`spec`]** - Type descriptors, argument and method specs, schema file loading
//! - **[`coerce`]** - Scalar coercion and the array decision list
//! - **[`context`]** - Raw value extraction from requests and argument map assembly
//! - **[`registry`]** - In-memory method schema lookup
//! - **[`telemetry`]** - `tracing` subscriber setup
//! - **[`cli`]** - The `brrtcoerce` command-line tool
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller as Invocation layer
//!     participant Ctx as InvocationContext
//!     participant Req as InputSupplier
//!     participant Spec as ArgumentSpec
//!     participant Co as coerce
//!
//!     Caller->>Ctx: build_for(registry, "find", &request)
//!     loop every declared argument
//!         Ctx->>Req: raw_value(name, source)
//!         Req-->>Ctx: Absent | Text | Json
//!         Ctx->>Spec: coerce(&raw)
//!         Spec->>Co: coerce_value(descriptor, raw, delimiters, enum)
//!         Co-->>Ctx: serde_json::Value
//!     end
//!     Ctx-->>Caller: Arguments
//! ```
//!
//! ## Example
//!
//! ```rust
//! use brrtcoerce::context::{InvocationContext, ParsedRequest};
//! use brrtcoerce::spec::{ArgumentSource, ArgumentSpecBuilder, MethodSpec};
//! use serde_json::json;
//!
//! let find = MethodSpec::new(
//!     "find",
//!     vec![
//!         ArgumentSpecBuilder::new("ids")
//!             .declared_type(json!(["number"]))
//!             .source(ArgumentSource::Query)
//!             .delimiters(&[",", "|"])
//!             .build()
//!             .unwrap(),
//!         ArgumentSpecBuilder::new("account").build().unwrap(),
//!     ],
//! )
//! .unwrap();
//!
//! let request = ParsedRequest::from_parts(
//!     "GET",
//!     "/find?ids=1,2|3&account=000123",
//!     Vec::<(&str, &str)>::new(),
//!     None,
//! );
//! let ctx = InvocationContext::build(&find, &request);
//! assert_eq!(ctx.arg("ids"), Some(&json!([1, 2, 3])));
//! assert_eq!(ctx.arg("account"), Some(&json!("000123")));
//! ```

pub mod cli;
pub mod coerce;
pub mod context;
pub mod registry;
pub mod spec;
pub mod telemetry;

pub use coerce::{coerce_value, RawValue};
pub use context::{Arguments, ContextError, InputSupplier, InvocationContext, ParsedRequest};
pub use registry::{MethodRegistry, SchemaSource};
pub use spec::{
    load_schema, ArgumentSource, ArgumentSpec, ArgumentSpecBuilder, BaseKind, MethodSpec,
    SpecError, TypeDescriptor,
};
