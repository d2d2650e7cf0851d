//! In-memory method registry.
//!
//! Specs are registered once at startup and then only read, so lookups hand out
//! `Arc<MethodSpec>` clones that can cross threads freely.

use crate::spec::{MethodSpec, SpecError};
use std::collections::HashMap;
use std::sync::Arc;

/// Lookup seam between the invocation context and wherever method schemas live.
pub trait SchemaSource {
    /// Schema for `method`, or `None` when the method is not registered.
    fn method(&self, method: &str) -> Option<Arc<MethodSpec>>;
}

/// Method schemas keyed by method name.
#[derive(Debug, Clone, Default)]
pub struct MethodRegistry {
    methods: HashMap<String, Arc<MethodSpec>>,
    order: Vec<String>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a method.
    ///
    /// # Errors
    ///
    /// [`SpecError::DuplicateMethod`] when a method with the same name exists.
    pub fn register(&mut self, spec: MethodSpec) -> Result<(), SpecError> {
        if self.methods.contains_key(&spec.name) {
            return Err(SpecError::DuplicateMethod { method: spec.name });
        }
        self.order.push(spec.name.clone());
        self.methods.insert(spec.name.clone(), Arc::new(spec));
        Ok(())
    }

    pub fn get(&self, method: &str) -> Option<Arc<MethodSpec>> {
        self.methods.get(method).map(Arc::clone)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Registered methods in registration order
    pub fn methods(&self) -> impl Iterator<Item = &MethodSpec> + '_ {
        self.order
            .iter()
            .filter_map(move |name| self.methods.get(name).map(|m| m.as_ref()))
    }
}

impl SchemaSource for MethodRegistry {
    fn method(&self, method: &str) -> Option<Arc<MethodSpec>> {
        self.get(method)
    }
}
