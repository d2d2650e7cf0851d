//! # Spec Module
//!
//! Argument schemas: what a method accepts and how each argument is typed.
//!
//! - [`TypeDescriptor`] folds a loosely declared type (`"string"`, `["number"]`,
//!   `"any"`) into a base kind plus an array flag
//! - [`ArgumentSpec`] carries the descriptor together with the argument's source,
//!   enum constraint and array item delimiters
//! - [`MethodSpec`] groups the arguments of one method in declaration order
//! - [`load_schema`] reads method declarations from a YAML or JSON file
//!
//! Specs are validated once at construction; see [`SpecError`].

mod build;
mod error;
mod load;
mod types;

pub use build::*;
pub use error::*;
pub use load::*;
pub use types::*;
