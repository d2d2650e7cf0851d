use brrtcoerce::context::{InvocationContext, ParsedRequest};
use brrtcoerce::spec::{ArgumentSource, ArgumentSpecBuilder, MethodSpec};
use serde_json::{json, Map, Value};

const DELIMITERS: [&str; 2] = [",", "|"];

struct Case<'a> {
    declared: Value,
    input: &'a str,
    enum_values: Option<Value>,
    delimiters: &'a [&'a str],
}

impl<'a> Case<'a> {
    fn new(declared: Value, input: &'a str) -> Self {
        Self {
            declared,
            input,
            enum_values: None,
            delimiters: &[],
        }
    }

    fn delimited(mut self) -> Self {
        self.delimiters = &DELIMITERS;
        self
    }

    fn with_enum(mut self, allowed: Value) -> Self {
        self.enum_values = Some(allowed);
        self
    }

    fn method(&self) -> MethodSpec {
        let mut builder = ArgumentSpecBuilder::new("testArg")
            .declared_type(self.declared.clone())
            .delimiters(self.delimiters);
        if let Some(Value::Array(allowed)) = &self.enum_values {
            builder = builder.enum_values(allowed.clone());
        }
        MethodSpec::new("testMethod", vec![builder.build().unwrap()]).unwrap()
    }

    /// Sends the input as `?testArg=<input>` the way a browser would.
    fn via_query(&self) -> Option<Value> {
        let query: String =
            url::form_urlencoded::Serializer::new(String::new())
                .append_pair("testArg", self.input)
                .finish();
        let request = ParsedRequest::from_parts(
            "GET",
            &format!("/?{query}"),
            Vec::<(&str, &str)>::new(),
            None,
        );
        InvocationContext::build(&self.method(), &request)
            .arg("testArg")
            .cloned()
    }
}

fn expect_arg(case: Case<'_>, expected: Value) {
    assert_eq!(
        case.via_query(),
        Some(expected),
        "declared {} input {:?}",
        case.declared,
        case.input
    );
}

// Arguments with a declared type

#[test]
fn test_named_string_arg() {
    expect_arg(Case::new(json!("string"), "foobar"), json!("foobar"));
}

#[test]
fn test_integer_strings_become_numbers() {
    expect_arg(Case::new(json!("number"), "123456"), json!(123456));
}

#[test]
fn test_float_strings_become_numbers() {
    expect_arg(Case::new(json!("number"), "0.123456"), json!(0.123456));
}

#[test]
fn test_leading_zero_numbers_parse_when_declared_number() {
    expect_arg(Case::new(json!("number"), "000123"), json!(123));
}

#[test]
fn test_null_string_stays_string_when_declared_string() {
    expect_arg(Case::new(json!("string"), "null"), json!("null"));
}

#[test]
fn test_string_declared_is_identity() {
    for input in ["true", "123", "000123", "0.5", "", "[1]"] {
        expect_arg(Case::new(json!("string"), input), json!(input));
    }
}

#[test]
fn test_array_type_with_non_array_native_input() {
    let method = Case::new(json!(["string"]), "").method();
    let mut params = Map::new();
    params.insert("testArg".into(), json!(123));
    let ctx = InvocationContext::build(&method, &params);
    assert_eq!(ctx.arg("testArg"), Some(&json!(["123"])));
}

#[test]
fn test_array_type_with_numeric_looking_text() {
    expect_arg(Case::new(json!(["string"]), "123"), json!(["123"]));
}

// Arguments without a declared type (or `any`)

#[test]
fn test_any_boolean_strings() {
    expect_arg(Case::new(json!("any"), "true"), json!(true));
    expect_arg(Case::new(json!("any"), "false"), json!(false));
}

#[test]
fn test_any_integer_and_float_strings() {
    expect_arg(Case::new(json!("any"), "123456"), json!(123456));
    expect_arg(Case::new(json!("any"), "0.123456"), json!(0.123456));
    expect_arg(Case::new(json!("any"), "123"), json!(123));
}

#[test]
fn test_any_null_string() {
    expect_arg(Case::new(json!("any"), "null"), Value::Null);
}

#[test]
fn test_any_leading_zero_stays_string() {
    expect_arg(Case::new(json!("any"), "000123"), json!("000123"));
}

#[test]
fn test_undeclared_type_behaves_as_any() {
    expect_arg(Case::new(Value::Null, "true"), json!(true));
    expect_arg(Case::new(json!("uuid"), "000123"), json!("000123"));
}

// Delimited values

#[test]
fn test_blank_string_array_arg() {
    expect_arg(Case::new(json!(["string"]), "").delimited(), json!([]));
}

#[test]
fn test_string_array_arg() {
    expect_arg(Case::new(json!(["string"]), "a,b|c").delimited(), json!(["a", "b", "c"]));
}

#[test]
fn test_number_array_arg() {
    expect_arg(Case::new(json!(["number"]), "1,2|3").delimited(), json!([1, 2, 3]));
}

#[test]
fn test_json_for_number_array_arg() {
    expect_arg(
        Case::new(json!(["number"]), r#"["1","2","3"]"#).delimited(),
        json!([1, 2, 3]),
    );
}

#[test]
fn test_json_for_string_array_arg_with_enum() {
    expect_arg(
        Case::new(json!(["string"]), r#"["a,b,c"]"#)
            .delimited()
            .with_enum(json!(["a", "b", "c"])),
        json!(["a,b,c"]),
    );
}

#[test]
fn test_json_array_within_enum_is_used() {
    expect_arg(
        Case::new(json!(["string"]), r#"["a","c"]"#)
            .delimited()
            .with_enum(json!(["a", "b", "c"])),
        json!(["a", "c"]),
    );
}

#[test]
fn test_structured_body_array_is_coerced_element_wise() {
    let method = MethodSpec::new(
        "m",
        vec![ArgumentSpecBuilder::new("ids")
            .declared_type(json!(["number"]))
            .source(ArgumentSource::Form)
            .build()
            .unwrap()],
    )
    .unwrap();
    let request = ParsedRequest::from_parts(
        "POST",
        "/",
        [("content-type", "application/json")],
        Some(r#"{"ids": ["1", 2, "x"]}"#),
    );
    let ctx = InvocationContext::build(&method, &request);
    assert_eq!(ctx.arg("ids"), Some(&json!([1, 2, "x"])));
}
