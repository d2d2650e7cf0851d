use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;
use std::str::FromStr;

/// Inline capacity for per-argument delimiter sets
pub const MAX_INLINE_DELIMITERS: usize = 4;

/// Characters used to split a single string into array items
pub type DelimiterSet = SmallVec<[char; MAX_INLINE_DELIMITERS]>;

/// Scalar kind an argument is declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseKind {
    String,
    Number,
    Boolean,
    Date,
    Object,
    Any,
}

impl BaseKind {
    /// Look up a kind by its declared name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "string" => Some(BaseKind::String),
            "number" => Some(BaseKind::Number),
            "boolean" => Some(BaseKind::Boolean),
            "date" => Some(BaseKind::Date),
            "object" => Some(BaseKind::Object),
            "any" => Some(BaseKind::Any),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BaseKind::String => "string",
            BaseKind::Number => "number",
            BaseKind::Boolean => "boolean",
            BaseKind::Date => "date",
            BaseKind::Object => "object",
            BaseKind::Any => "any",
        }
    }
}

impl std::fmt::Display for BaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical shape of a declared argument type.
///
/// Declared types arrive from registration metadata as loosely shaped JSON:
/// `"string"`, `["number"]`, `"any"` or nothing at all. [`TypeDescriptor::resolve`]
/// folds every accepted shape into a base kind plus an array flag so the
/// coercer only ever matches on two fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    pub base_kind: BaseKind,
    pub is_array: bool,
}

impl TypeDescriptor {
    pub const ANY: TypeDescriptor = TypeDescriptor {
        base_kind: BaseKind::Any,
        is_array: false,
    };

    pub const fn scalar(base_kind: BaseKind) -> Self {
        Self {
            base_kind,
            is_array: false,
        }
    }

    pub const fn array_of(base_kind: BaseKind) -> Self {
        Self {
            base_kind,
            is_array: true,
        }
    }

    /// Resolve a declared type into its canonical descriptor.
    ///
    /// | declared | descriptor |
    /// |---|---|
    /// | absent, `null`, `"any"` | `any` |
    /// | `"number"` | `number` |
    /// | `["number"]` | `[number]` |
    /// | `"array"`, `[]` | `[any]` |
    /// | anything else | `any` |
    ///
    /// Never fails: an unrecognized declaration degrades to `any`.
    pub fn resolve(declared: Option<&Value>) -> Self {
        match declared {
            None | Some(Value::Null) => Self::ANY,
            Some(Value::String(name)) => Self::resolve_name(name),
            Some(Value::Array(items)) => match items.as_slice() {
                [] => Self::array_of(BaseKind::Any),
                [Value::String(name)] => match BaseKind::from_name(name) {
                    Some(kind) => Self::array_of(kind),
                    None => Self::ANY,
                },
                _ => Self::ANY,
            },
            Some(_) => Self::ANY,
        }
    }

    fn resolve_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("array") {
            return Self::array_of(BaseKind::Any);
        }
        BaseKind::from_name(name)
            .map(Self::scalar)
            .unwrap_or(Self::ANY)
    }
}

impl Default for TypeDescriptor {
    fn default() -> Self {
        Self::ANY
    }
}

impl std::fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_array {
            write!(f, "[{}]", self.base_kind)
        } else {
            write!(f, "{}", self.base_kind)
        }
    }
}

impl FromStr for TypeDescriptor {
    type Err = std::convert::Infallible;

    /// Parse the compact notation used on the command line: `number`, `[number]`.
    ///
    /// JSON notation (`["number"]`) is accepted as well.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(value) = serde_json::from_str::<Value>(s) {
            return Ok(Self::resolve(Some(&value)));
        }
        if let Some(inner) = s.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
            let inner = inner.trim();
            if inner.is_empty() {
                return Ok(Self::array_of(BaseKind::Any));
            }
            return Ok(match BaseKind::from_name(inner) {
                Some(kind) => Self::array_of(kind),
                None => Self::ANY,
            });
        }
        Ok(Self::resolve_name(s))
    }
}

/// Where the raw value for an argument is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentSource {
    /// Path parameter, then body field, then query parameter
    #[default]
    Auto,
    Query,
    Path,
    /// Named field of a JSON object body
    Form,
    /// The whole request body
    Body,
    Header,
    Cookie,
}

impl std::fmt::Display for ArgumentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ArgumentSource::Auto => "auto",
            ArgumentSource::Query => "query",
            ArgumentSource::Path => "path",
            ArgumentSource::Form => "form",
            ArgumentSource::Body => "body",
            ArgumentSource::Header => "header",
            ArgumentSource::Cookie => "cookie",
        };
        f.write_str(s)
    }
}

/// Declared metadata for one named method argument.
///
/// Built once per method registration (see [`ArgumentSpecBuilder`](super::ArgumentSpecBuilder))
/// and shared read-only across invocations.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentSpec {
    pub name: String,
    pub declared_type: TypeDescriptor,
    pub source: ArgumentSource,
    pub enum_values: Option<Vec<Value>>,
    pub array_item_delimiters: DelimiterSet,
}

impl ArgumentSpec {
    /// Whether `value` is a member of the declared enum.
    ///
    /// Arguments without an enum accept everything.
    pub fn allows(&self, value: &Value) -> bool {
        match &self.enum_values {
            Some(allowed) => enum_contains(allowed, value),
            None => true,
        }
    }
}

/// Enum membership test shared by the array splitter and [`ArgumentSpec::allows`].
///
/// Values match when they are equal JSON, or when one side is a string whose
/// text equals the other side's scalar text (`"1"` matches `1`).
pub fn enum_contains(allowed: &[Value], value: &Value) -> bool {
    allowed.iter().any(|candidate| same_literal(candidate, value))
}

fn same_literal(a: &Value, b: &Value) -> bool {
    if a == b {
        return true;
    }
    match (a, b) {
        (Value::String(s), other) | (other, Value::String(s)) => match other {
            Value::Number(n) => n.to_string() == *s,
            Value::Bool(flag) => flag.to_string() == *s,
            _ => false,
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_bare_kinds() {
        assert_eq!(
            TypeDescriptor::resolve(Some(&json!("string"))),
            TypeDescriptor::scalar(BaseKind::String)
        );
        assert_eq!(
            TypeDescriptor::resolve(Some(&json!("Number"))),
            TypeDescriptor::scalar(BaseKind::Number)
        );
        assert_eq!(TypeDescriptor::resolve(Some(&json!("any"))), TypeDescriptor::ANY);
    }

    #[test]
    fn test_resolve_absent_and_unknown() {
        assert_eq!(TypeDescriptor::resolve(None), TypeDescriptor::ANY);
        assert_eq!(TypeDescriptor::resolve(Some(&Value::Null)), TypeDescriptor::ANY);
        assert_eq!(TypeDescriptor::resolve(Some(&json!("uuid"))), TypeDescriptor::ANY);
        assert_eq!(TypeDescriptor::resolve(Some(&json!(42))), TypeDescriptor::ANY);
        assert_eq!(
            TypeDescriptor::resolve(Some(&json!(["string", "number"]))),
            TypeDescriptor::ANY
        );
        assert_eq!(TypeDescriptor::resolve(Some(&json!([["number"]]))), TypeDescriptor::ANY);
    }

    #[test]
    fn test_resolve_arrays() {
        assert_eq!(
            TypeDescriptor::resolve(Some(&json!(["number"]))),
            TypeDescriptor::array_of(BaseKind::Number)
        );
        assert_eq!(
            TypeDescriptor::resolve(Some(&json!(["any"]))),
            TypeDescriptor::array_of(BaseKind::Any)
        );
        assert_eq!(
            TypeDescriptor::resolve(Some(&json!([]))),
            TypeDescriptor::array_of(BaseKind::Any)
        );
        assert_eq!(
            TypeDescriptor::resolve(Some(&json!("array"))),
            TypeDescriptor::array_of(BaseKind::Any)
        );
    }

    #[test]
    fn test_from_str_notations() {
        let parse = |s: &str| s.parse::<TypeDescriptor>().unwrap();
        assert_eq!(parse("number"), TypeDescriptor::scalar(BaseKind::Number));
        assert_eq!(parse("[string]"), TypeDescriptor::array_of(BaseKind::String));
        assert_eq!(parse(r#"["boolean"]"#), TypeDescriptor::array_of(BaseKind::Boolean));
        assert_eq!(parse("[]"), TypeDescriptor::array_of(BaseKind::Any));
        assert_eq!(parse("nonsense"), TypeDescriptor::ANY);
    }

    #[test]
    fn test_display_round_trips_notation() {
        assert_eq!(TypeDescriptor::array_of(BaseKind::Date).to_string(), "[date]");
        assert_eq!(TypeDescriptor::ANY.to_string(), "any");
    }

    #[test]
    fn test_enum_contains_text_forms() {
        let allowed = vec![json!(1), json!("a"), json!(true)];
        assert!(enum_contains(&allowed, &json!("1")));
        assert!(enum_contains(&allowed, &json!("a")));
        assert!(enum_contains(&allowed, &json!("true")));
        assert!(!enum_contains(&allowed, &json!("a,b")));
        assert!(!enum_contains(&allowed, &json!(2)));
    }
}
