use crate::spec::BaseKind;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Number, Value};
use tracing::trace;

// ASCII digits only; `\d` would also accept other Unicode decimal digits.
#[allow(clippy::expect_used)]
static NUMERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]+)?|\.[0-9]+)$").expect("valid numeral pattern")
});

#[allow(clippy::expect_used)]
static LEADING_ZERO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?0[0-9]").expect("valid leading zero pattern"));

/// Full signed integer or decimal numeral: `12`, `-3.5`, `+.5`, `000123`.
///
/// No exponent, no surrounding whitespace.
pub fn is_numeral(s: &str) -> bool {
    NUMERAL.is_match(s)
}

/// A numeral that can be turned into a number without losing meaning.
///
/// `000123` is a numeral but not a safe one: a leading zero followed by more
/// digits marks an identifier, and renumbering it would drop the zeros.
/// `0`, `0.5` and `-0.25` are safe.
pub fn is_safe_numeral(s: &str) -> bool {
    is_numeral(s) && !LEADING_ZERO.is_match(s)
}

/// Parse a numeral into a JSON number.
///
/// Integral text that fits `i64` or `u64` stays integral; everything else goes
/// through `f64`. Returns `None` for non-numerals and non-finite results.
pub fn parse_numeral(s: &str) -> Option<Value> {
    if !is_numeral(s) {
        return None;
    }
    if !s.contains('.') {
        if let Ok(i) = s.parse::<i64>() {
            return Some(Value::from(i));
        }
        if let Ok(u) = s.parse::<u64>() {
            return Some(Value::from(u));
        }
    }
    s.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

/// Coerce one scalar to `kind`.
///
/// Strings go through [`coerce_text`]. Values that arrived already decoded are
/// only adjusted where the declared kind asks for it (a number declared as
/// `string` becomes its text); otherwise they pass through untouched.
pub fn coerce_scalar(kind: BaseKind, raw: &Value) -> Value {
    match raw {
        Value::String(text) => coerce_text(kind, text),
        native => coerce_native(kind, native),
    }
}

/// Coerce a raw string to `kind`, returning the string unchanged when it does
/// not parse.
pub fn coerce_text(kind: BaseKind, text: &str) -> Value {
    let coerced = match kind {
        BaseKind::String => return Value::String(text.to_string()),
        BaseKind::Number => parse_numeral(text),
        BaseKind::Boolean => parse_boolean(text),
        BaseKind::Date => parse_date(text),
        BaseKind::Object => parse_object(text),
        BaseKind::Any => infer(text),
    };

    coerced.unwrap_or_else(|| {
        if kind != BaseKind::Any {
            trace!(kind = %kind, raw = %text, "Unparsable scalar passed through");
        }
        Value::String(text.to_string())
    })
}

fn coerce_native(kind: BaseKind, native: &Value) -> Value {
    match (kind, native) {
        (BaseKind::String, Value::Number(n)) => Value::String(n.to_string()),
        (BaseKind::String, Value::Bool(b)) => Value::String(b.to_string()),
        (BaseKind::Date, Value::Number(n)) => n
            .as_i64()
            .and_then(date_from_millis)
            .unwrap_or_else(|| native.clone()),
        _ => native.clone(),
    }
}

/// Inference for undeclared (`any`) strings.
fn infer(text: &str) -> Option<Value> {
    match text {
        "true" => Some(Value::Bool(true)),
        "false" => Some(Value::Bool(false)),
        "null" => Some(Value::Null),
        _ if is_safe_numeral(text) => parse_numeral(text),
        _ => None,
    }
}

fn parse_boolean(text: &str) -> Option<Value> {
    if text.eq_ignore_ascii_case("true") {
        Some(Value::Bool(true))
    } else if text.eq_ignore_ascii_case("false") {
        Some(Value::Bool(false))
    } else {
        None
    }
}

fn parse_object(text: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(text.trim()) {
        Ok(value @ Value::Object(_)) => Some(value),
        _ => None,
    }
}

/// RFC 3339 timestamps, `YYYY-MM-DD` dates and integer epoch milliseconds,
/// rendered as RFC 3339 UTC with millisecond precision.
fn parse_date(text: &str) -> Option<Value> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(render_date(dt.with_timezone(&Utc)));
    }
    if let Ok(day) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return day.and_hms_opt(0, 0, 0).map(|dt| render_date(dt.and_utc()));
    }
    if is_numeral(text) && !text.contains('.') {
        return text.parse::<i64>().ok().and_then(date_from_millis);
    }
    None
}

fn date_from_millis(millis: i64) -> Option<Value> {
    DateTime::<Utc>::from_timestamp_millis(millis).map(render_date)
}

fn render_date(dt: DateTime<Utc>) -> Value {
    Value::String(dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}
