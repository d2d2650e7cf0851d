use crate::coerce::RawValue;
use crate::spec::ArgumentSource;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{debug, info};

/// Supplies the raw value of a named argument from some transport.
///
/// Implementations must not interpret the value: strings stay strings and
/// decoded JSON stays decoded. Coercion happens afterwards.
pub trait InputSupplier {
    fn raw_value(&self, name: &str, source: ArgumentSource) -> RawValue;
}

/// Transport-agnostic view of an HTTP request.
///
/// Contains everything an argument can be read from: headers, cookies, query
/// parameters, path parameters matched by the router, and the JSON body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRequest {
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Request path without the query string
    pub path: String,
    /// HTTP headers (lowercase keys)
    pub headers: HashMap<String, String>,
    /// Parsed cookies from Cookie header
    pub cookies: HashMap<String, String>,
    /// Parsed query string parameters, every value of a repeated name kept in order
    pub query_params: HashMap<String, Vec<String>>,
    /// Path parameters extracted by the router
    pub path_params: HashMap<String, String>,
    /// Parsed JSON body, if one was sent and it was valid JSON
    pub body: Option<Value>,
}

/// Parse the `Cookie` header (lowercase key) into name/value pairs.
pub fn parse_cookies(headers: &HashMap<String, String>) -> HashMap<String, String> {
    headers
        .get("cookie")
        .map(|c| {
            c.split(';')
                .filter_map(|pair| {
                    let mut parts = pair.trim().splitn(2, '=');
                    let name = parts.next()?.trim().to_string();
                    if name.is_empty() {
                        return None;
                    }
                    let value = parts.next().unwrap_or("").trim().to_string();
                    Some((name, value))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Parse query string parameters from a URL path
///
/// Extracts everything after the `?` character and URL-decodes parameter names
/// and values. A name that repeats (`?id=1&id=2`) keeps all of its values.
///
/// # Arguments
///
/// * `path` - The full URL path (e.g., `/users?limit=10&offset=20`)
pub fn parse_query_params(path: &str) -> HashMap<String, Vec<String>> {
    let mut params: HashMap<String, Vec<String>> = HashMap::new();
    if let Some(pos) = path.find('?') {
        let query_str = &path[pos + 1..];
        for (k, v) in url::form_urlencoded::parse(query_str.as_bytes()) {
            params.entry(k.into_owned()).or_default().push(v.into_owned());
        }
    }
    params
}

impl ParsedRequest {
    /// Assemble a request from the pieces a transport hands over.
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method
    /// * `raw_path` - Path including the query string
    /// * `headers` - Header name/value pairs; names are lowercased
    /// * `body` - Raw body text; parsed as JSON when non-empty
    pub fn from_parts<I, K, V>(method: &str, raw_path: &str, headers: I, body: Option<&str>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let path = raw_path.split('?').next().unwrap_or("/").to_string();

        let headers: HashMap<String, String> = headers
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_ascii_lowercase(), v.into()))
            .collect();
        debug!(
            header_count = headers.len(),
            header_names = ?headers.keys().take(20).collect::<Vec<_>>(),
            "Headers extracted"
        );

        let cookies = parse_cookies(&headers);
        debug!(
            cookie_count = cookies.len(),
            cookie_names = ?cookies.keys().collect::<Vec<_>>(),
            "Cookies extracted"
        );

        let query_params = parse_query_params(raw_path);
        debug!(
            param_count = query_params.len(),
            query_params = ?query_params,
            "Query params parsed"
        );

        let body = match body.map(str::trim) {
            Some(text) if !text.is_empty() => match serde_json::from_str::<Value>(text) {
                Ok(json) => {
                    debug!(
                        body_size_bytes = text.len(),
                        body_fields = json.as_object().map(|o| o.len()),
                        "JSON body parsed"
                    );
                    Some(json)
                }
                Err(err) => {
                    debug!(
                        body_size_bytes = text.len(),
                        error = %err,
                        "JSON body parse attempted"
                    );
                    None
                }
            },
            _ => None,
        };

        info!(
            method = %method,
            path = %path,
            headers_count = headers.len(),
            "HTTP request parsed"
        );

        ParsedRequest {
            method: method.to_string(),
            path,
            headers,
            cookies,
            query_params,
            path_params: HashMap::new(),
            body,
        }
    }

    /// Attach path parameters matched by the router.
    pub fn with_path_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.path_params = params
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    fn body_field(&self, name: &str) -> RawValue {
        self.body
            .as_ref()
            .and_then(|body| body.get(name))
            .cloned()
            .into()
    }
}

fn text_of(map: &HashMap<String, String>, name: &str) -> RawValue {
    map.get(name).map(String::as_str).into()
}

/// A single occurrence stays text; repeats arrive as an already structured array.
fn query_value(map: &HashMap<String, Vec<String>>, name: &str) -> RawValue {
    match map.get(name).map(Vec::as_slice) {
        None | Some([]) => RawValue::Absent,
        Some([single]) => RawValue::from(single.as_str()),
        Some(values) => RawValue::Json(Value::Array(
            values.iter().cloned().map(Value::String).collect(),
        )),
    }
}

impl InputSupplier for ParsedRequest {
    fn raw_value(&self, name: &str, source: ArgumentSource) -> RawValue {
        match source {
            ArgumentSource::Query => query_value(&self.query_params, name),
            ArgumentSource::Path => text_of(&self.path_params, name),
            ArgumentSource::Header => text_of(&self.headers, &name.to_ascii_lowercase()),
            ArgumentSource::Cookie => text_of(&self.cookies, name),
            ArgumentSource::Form => self.body_field(name),
            ArgumentSource::Body => self.body.clone().into(),
            ArgumentSource::Auto => [ArgumentSource::Path, ArgumentSource::Form, ArgumentSource::Query]
                .into_iter()
                .map(|source| self.raw_value(name, source))
                .find(|raw| !raw.is_absent())
                .unwrap_or_default(),
        }
    }
}

/// Named-parameter maps (JSON-RPC `params`, decoded form bodies).
///
/// Every source reads the same map, except `body`, which yields the whole map.
impl InputSupplier for Map<String, Value> {
    fn raw_value(&self, name: &str, source: ArgumentSource) -> RawValue {
        match source {
            ArgumentSource::Body => RawValue::Json(Value::Object(self.clone())),
            _ => self.get(name).cloned().into(),
        }
    }
}
