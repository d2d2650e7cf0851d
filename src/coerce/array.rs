use super::scalar::coerce_scalar;
use crate::spec::{enum_contains, BaseKind};
use serde_json::Value;
use tracing::trace;

/// The rule of the array decision list that produced the items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayStep {
    /// Raw value was already a decoded JSON array (or null)
    Structured,
    /// Raw value was a decoded non-array native, wrapped as one item
    PromotedNative,
    /// Raw value was the empty string
    Blank,
    /// Raw string parsed as a JSON array accepted by the enum
    JsonArray,
    /// JSON array kept because splitting would only yield values outside the enum
    EnumGuardedJson,
    /// Raw string split on the configured delimiters
    Delimited,
    /// No delimiters configured: the whole string is the single item
    Single,
}

/// Raw array items, before per-item scalar coercion
#[derive(Debug, Clone, PartialEq)]
pub struct ArraySplit {
    pub step: ArrayStep,
    pub items: Vec<Value>,
}

impl ArraySplit {
    fn new(step: ArrayStep, items: Vec<Value>) -> Self {
        Self { step, items }
    }
}

struct SplitInput<'a> {
    text: &'a str,
    delimiters: &'a [char],
    enum_values: Option<&'a [Value]>,
    json: Option<Vec<Value>>,
}

type Rule = fn(&SplitInput<'_>) -> Option<Vec<Value>>;

/// String rules in precedence order; the first rule that yields items wins.
/// When none applies the string is promoted to a one-item array.
const TEXT_RULES: [(ArrayStep, Rule); 4] = [
    (ArrayStep::Blank, blank),
    (ArrayStep::JsonArray, json_array),
    (ArrayStep::EnumGuardedJson, enum_guarded_json),
    (ArrayStep::Delimited, delimited),
];

/// Turn a raw value declared as an array into its raw items.
pub fn split_array(raw: &Value, delimiters: &[char], enum_values: Option<&[Value]>) -> ArraySplit {
    let text = match raw {
        Value::String(text) => text.as_str(),
        Value::Array(items) => return ArraySplit::new(ArrayStep::Structured, items.clone()),
        Value::Null => return ArraySplit::new(ArrayStep::Structured, Vec::new()),
        native => return ArraySplit::new(ArrayStep::PromotedNative, vec![native.clone()]),
    };

    let input = SplitInput {
        text,
        delimiters,
        enum_values,
        json: json_candidate(text),
    };

    TEXT_RULES
        .iter()
        .find_map(|(step, rule)| rule(&input).map(|items| ArraySplit::new(*step, items)))
        .unwrap_or_else(|| ArraySplit::new(ArrayStep::Single, vec![Value::String(text.to_string())]))
}

/// Coerce a raw value declared as `[item_kind]` into a JSON array.
pub fn coerce_array(
    item_kind: BaseKind,
    raw: &Value,
    delimiters: &[char],
    enum_values: Option<&[Value]>,
) -> Value {
    let split = split_array(raw, delimiters, enum_values);
    trace!(step = ?split.step, item_count = split.items.len(), "Array items resolved");
    Value::Array(
        split
            .items
            .iter()
            .map(|item| coerce_scalar(item_kind, item))
            .collect(),
    )
}

fn json_candidate(text: &str) -> Option<Vec<Value>> {
    let trimmed = text.trim();
    if !trimmed.starts_with('[') {
        return None;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Array(items)) => Some(items),
        _ => None,
    }
}

fn all_allowed(allowed: &[Value], items: &[Value]) -> bool {
    items.iter().all(|item| enum_contains(allowed, item))
}

fn split_on_delimiters(text: &str, delimiters: &[char]) -> Vec<Value> {
    text.split(|c: char| delimiters.contains(&c))
        .filter(|fragment| !fragment.is_empty())
        .map(|fragment| Value::String(fragment.to_string()))
        .collect()
}

fn blank(input: &SplitInput<'_>) -> Option<Vec<Value>> {
    input.text.is_empty().then(Vec::new)
}

fn json_array(input: &SplitInput<'_>) -> Option<Vec<Value>> {
    let items = input.json.as_ref()?;
    match input.enum_values {
        Some(allowed) if !all_allowed(allowed, items) => {
            trace!(raw = %input.text, "JSON array rejected by enum");
            None
        }
        _ => Some(items.clone()),
    }
}

fn enum_guarded_json(input: &SplitInput<'_>) -> Option<Vec<Value>> {
    let allowed = input.enum_values?;
    let items = input.json.as_ref()?;
    if input.delimiters.is_empty() {
        return None;
    }
    let fragments = split_on_delimiters(input.text, input.delimiters);
    (!all_allowed(allowed, &fragments)).then(|| items.clone())
}

fn delimited(input: &SplitInput<'_>) -> Option<Vec<Value>> {
    if input.delimiters.is_empty() {
        return None;
    }
    Some(split_on_delimiters(input.text, input.delimiters))
}
