use super::build::{ArgumentSpecBuilder, MethodSpec};
use super::error::SpecError;
use super::types::ArgumentSource;
use crate::registry::MethodRegistry;
use anyhow::Context;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

/// On-disk encoding of a schema file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    Yaml,
    Json,
}

impl SchemaFormat {
    /// `.yaml` / `.yml` are YAML, everything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                SchemaFormat::Yaml
            }
            _ => SchemaFormat::Json,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SchemaFile {
    /// Default for arguments that declare no delimiters of their own
    #[serde(default)]
    array_item_delimiters: Vec<String>,
    #[serde(default)]
    methods: Vec<MethodDecl>,
}

#[derive(Debug, Deserialize)]
struct MethodDecl {
    name: String,
    #[serde(default)]
    accepts: Vec<ArgumentDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArgumentDecl {
    arg: String,
    #[serde(rename = "type", default)]
    declared_type: Option<Value>,
    #[serde(default)]
    source: ArgumentSource,
    #[serde(rename = "enum", default)]
    enum_values: Option<Vec<Value>>,
    #[serde(default)]
    array_item_delimiters: Option<Vec<String>>,
}

/// Load a method schema file (YAML or JSON) into a registry.
///
/// # Example
///
/// ```yaml
/// arrayItemDelimiters: [",", "|"]
/// methods:
///   - name: find
///     accepts:
///       - arg: ids
///         type: [number]
///         source: query
/// ```
///
/// # Errors
///
/// Fails when the file cannot be read or parsed, or when a declaration is
/// rejected with a [`SpecError`].
pub fn load_schema(path: impl AsRef<Path>) -> anyhow::Result<MethodRegistry> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema file {}", path.display()))?;
    let registry = load_schema_str(&content, SchemaFormat::from_path(path))
        .with_context(|| format!("Invalid schema file {}", path.display()))?;
    info!(
        path = %path.display(),
        method_count = registry.len(),
        "Method schema loaded"
    );
    Ok(registry)
}

/// Parse schema content that is already in memory.
pub fn load_schema_str(content: &str, format: SchemaFormat) -> anyhow::Result<MethodRegistry> {
    let file: SchemaFile = match format {
        SchemaFormat::Yaml => serde_yaml::from_str(content)?,
        SchemaFormat::Json => serde_json::from_str(content)?,
    };

    let mut registry = MethodRegistry::new();
    for method in file.methods {
        let spec = build_method(method, &file.array_item_delimiters)?;
        debug!(
            method = %spec.name,
            argument_count = spec.accepts.len(),
            "Method declaration parsed"
        );
        registry.register(spec)?;
    }
    Ok(registry)
}

fn build_method(decl: MethodDecl, default_delimiters: &[String]) -> Result<MethodSpec, SpecError> {
    let mut accepts = Vec::with_capacity(decl.accepts.len());
    for arg in decl.accepts {
        let mut builder = ArgumentSpecBuilder::new(arg.arg).source(arg.source);
        if let Some(declared) = arg.declared_type {
            builder = builder.declared_type(declared);
        }
        if let Some(allowed) = arg.enum_values {
            builder = builder.enum_values(allowed);
        }
        builder = match &arg.array_item_delimiters {
            Some(own) => builder.delimiters(own.as_slice()),
            None => builder.delimiters(default_delimiters),
        };
        let spec = builder.build().map_err(|err| match err {
            SpecError::EmptyArgumentName { .. } => SpecError::EmptyArgumentName {
                method: Some(decl.name.clone()),
            },
            other => other,
        })?;
        accepts.push(spec);
    }
    MethodSpec::new(decl.name, accepts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{BaseKind, TypeDescriptor};
    use serde_json::json;

    const SCHEMA: &str = r#"
arrayItemDelimiters: [",", "|"]
methods:
  - name: find
    accepts:
      - arg: ids
        type: [number]
        source: query
      - arg: tags
        type: [string]
        enum: [a, b, c]
        arrayItemDelimiters: [";"]
      - arg: filter
"#;

    #[test]
    fn test_schema_format_from_path() {
        assert_eq!(SchemaFormat::from_path(Path::new("m.yaml")), SchemaFormat::Yaml);
        assert_eq!(SchemaFormat::from_path(Path::new("m.YML")), SchemaFormat::Yaml);
        assert_eq!(SchemaFormat::from_path(Path::new("m.json")), SchemaFormat::Json);
    }

    #[test]
    fn test_file_default_delimiters_apply_per_argument() {
        let registry = load_schema_str(SCHEMA, SchemaFormat::Yaml).unwrap();
        let find = registry.get("find").unwrap();

        let ids = find.argument("ids").unwrap();
        assert_eq!(ids.declared_type, TypeDescriptor::array_of(BaseKind::Number));
        assert_eq!(ids.source, ArgumentSource::Query);
        assert_eq!(ids.array_item_delimiters.as_slice(), &[',', '|']);

        let tags = find.argument("tags").unwrap();
        assert_eq!(tags.array_item_delimiters.as_slice(), &[';']);
        assert_eq!(tags.enum_values, Some(vec![json!("a"), json!("b"), json!("c")]));

        let filter = find.argument("filter").unwrap();
        assert_eq!(filter.declared_type, TypeDescriptor::ANY);
        assert_eq!(filter.source, ArgumentSource::Auto);
    }

    #[test]
    fn test_empty_argument_name_reports_method() {
        let schema = r#"{"methods":[{"name":"m","accepts":[{"arg":""}]}]}"#;
        let err = load_schema_str(schema, SchemaFormat::Json).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SpecError>(),
            Some(&SpecError::EmptyArgumentName {
                method: Some("m".into())
            })
        );
    }

    #[test]
    fn test_duplicate_method_rejected() {
        let schema = r#"{"methods":[{"name":"m"},{"name":"m"}]}"#;
        let err = load_schema_str(schema, SchemaFormat::Json).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SpecError>(),
            Some(&SpecError::DuplicateMethod { method: "m".into() })
        );
    }
}
