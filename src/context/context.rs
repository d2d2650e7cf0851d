use super::request::InputSupplier;
use crate::registry::SchemaSource;
use crate::spec::MethodSpec;
use serde_json::{Map, Value};
use std::fmt;
use tracing::{debug, trace};

/// Coerced arguments keyed by argument name, ready for method invocation.
pub type Arguments = Map<String, Value>;

/// Error raised while assembling an invocation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// No schema is registered for the requested method
    UnknownMethod {
        /// The requested method name
        method: String,
    },
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextError::UnknownMethod { method } => {
                write!(f, "no argument schema registered for method '{}'", method)
            }
        }
    }
}

impl std::error::Error for ContextError {}

/// Arguments for one invocation of one method.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationContext {
    pub method: String,
    pub args: Arguments,
}

impl InvocationContext {
    /// Read, coerce and collect every argument `method` declares.
    ///
    /// Arguments the supplier reports as absent are left out of
    /// [`args`](Self::args); deciding whether that is an error belongs to the
    /// invocation layer.
    pub fn build<S: InputSupplier + ?Sized>(method: &MethodSpec, supplier: &S) -> Self {
        let mut args = Arguments::new();
        let mut absent = 0usize;

        for spec in &method.accepts {
            let raw = supplier.raw_value(&spec.name, spec.source);
            match spec.coerce(&raw) {
                Some(value) => {
                    if !spec.declared_type.is_array && !spec.allows(&value) {
                        trace!(
                            method = %method.name,
                            argument = %spec.name,
                            "Argument value outside declared enum"
                        );
                    }
                    args.insert(spec.name.clone(), value);
                }
                None => absent += 1,
            }
        }

        debug!(
            method = %method.name,
            argument_count = method.accepts.len(),
            absent_count = absent,
            "Invocation arguments coerced"
        );

        Self {
            method: method.name.clone(),
            args,
        }
    }

    /// Look up `method` in `schemas`, then [`build`](Self::build).
    ///
    /// # Errors
    ///
    /// [`ContextError::UnknownMethod`] when the method is not registered.
    pub fn build_for<R, S>(schemas: &R, method: &str, supplier: &S) -> Result<Self, ContextError>
    where
        R: SchemaSource + ?Sized,
        S: InputSupplier + ?Sized,
    {
        let spec = schemas
            .method(method)
            .ok_or_else(|| ContextError::UnknownMethod {
                method: method.to_string(),
            })?;
        Ok(Self::build(&spec, supplier))
    }

    pub fn arg(&self, name: &str) -> Option<&Value> {
        self.args.get(name)
    }

    pub fn into_args(self) -> Arguments {
        self.args
    }
}
