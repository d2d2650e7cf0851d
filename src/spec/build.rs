use super::error::SpecError;
use super::types::{ArgumentSource, ArgumentSpec, DelimiterSet, TypeDescriptor};
use serde_json::Value;
use std::collections::HashSet;

/// Builder for creating an [`ArgumentSpec`] with a fluent API
///
/// Declared types and delimiters are accepted in their loose registration
/// form and validated once in [`build()`](Self::build).
///
/// # Example
///
/// ```rust
/// use brrtcoerce::spec::ArgumentSpecBuilder;
/// use serde_json::json;
///
/// let ids = ArgumentSpecBuilder::new("ids")
///     .declared_type(json!(["number"]))
///     .delimiters(&[",", "|"])
///     .build()
///     .unwrap();
/// assert!(ids.declared_type.is_array);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArgumentSpecBuilder {
    name: String,
    declared_type: Option<Value>,
    source: ArgumentSource,
    enum_values: Option<Vec<Value>>,
    delimiters: Vec<String>,
}

impl ArgumentSpecBuilder {
    /// Start a spec for the argument called `name`.
    ///
    /// Defaults: type `any`, source `auto`, no enum, no delimiters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the declared type (`"string"`, `["number"]`, ...)
    pub fn declared_type(mut self, declared: Value) -> Self {
        self.declared_type = Some(declared);
        self
    }

    pub fn source(mut self, source: ArgumentSource) -> Self {
        self.source = source;
        self
    }

    /// Restrict the argument to an ordered list of allowed raw values
    pub fn enum_values(mut self, allowed: Vec<Value>) -> Self {
        self.enum_values = Some(allowed);
        self
    }

    /// Set the array item delimiters
    ///
    /// Each entry must be exactly one character; anything else is rejected by
    /// [`build()`](Self::build).
    pub fn delimiters<S: AsRef<str>>(mut self, delimiters: &[S]) -> Self {
        self.delimiters = delimiters.iter().map(|d| d.as_ref().to_string()).collect();
        self
    }

    /// Set the array item delimiters from already validated characters
    pub fn delimiter_chars(mut self, delimiters: impl IntoIterator<Item = char>) -> Self {
        self.delimiters = delimiters.into_iter().map(String::from).collect();
        self
    }

    /// Validate and build the spec.
    ///
    /// # Errors
    ///
    /// - [`SpecError::EmptyArgumentName`] when the name is blank
    /// - [`SpecError::InvalidDelimiter`] when a delimiter is not a single character
    pub fn build(self) -> Result<ArgumentSpec, SpecError> {
        if self.name.trim().is_empty() {
            return Err(SpecError::EmptyArgumentName { method: None });
        }

        let mut delimiters = DelimiterSet::new();
        for delimiter in &self.delimiters {
            let mut chars = delimiter.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    if !delimiters.contains(&c) {
                        delimiters.push(c);
                    }
                }
                _ => {
                    return Err(SpecError::InvalidDelimiter {
                        argument: self.name,
                        delimiter: delimiter.clone(),
                    })
                }
            }
        }

        Ok(ArgumentSpec {
            declared_type: TypeDescriptor::resolve(self.declared_type.as_ref()),
            name: self.name,
            source: self.source,
            enum_values: self.enum_values,
            array_item_delimiters: delimiters,
        })
    }
}

/// A remotely invocable method and the arguments it accepts, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSpec {
    pub name: String,
    pub accepts: Vec<ArgumentSpec>,
}

impl MethodSpec {
    /// Create a method spec.
    ///
    /// # Errors
    ///
    /// - [`SpecError::EmptyMethodName`] when `name` is blank
    /// - [`SpecError::DuplicateArgument`] when two arguments share a name
    pub fn new(name: impl Into<String>, accepts: Vec<ArgumentSpec>) -> Result<Self, SpecError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SpecError::EmptyMethodName);
        }
        let mut seen = HashSet::with_capacity(accepts.len());
        for arg in &accepts {
            if !seen.insert(arg.name.as_str()) {
                return Err(SpecError::DuplicateArgument {
                    method: name,
                    argument: arg.name.clone(),
                });
            }
        }
        Ok(Self { name, accepts })
    }

    pub fn argument(&self, name: &str) -> Option<&ArgumentSpec> {
        self.accepts.iter().find(|a| a.name == name)
    }
}
