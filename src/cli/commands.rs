use crate::context::{InvocationContext, ParsedRequest};
use crate::coerce::RawValue;
use crate::spec::{load_schema, ArgumentSpecBuilder, TypeDescriptor};
use crate::telemetry::{init_logging_with_config, LogConfig};
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::fmt::Write as _;
use std::path::PathBuf;

/// Command-line interface for brrtcoerce
///
/// Runs the coercion engine outside a server: coerce a single value, build the
/// argument map for a method from a simulated request, or check a schema file.
#[derive(Parser)]
#[command(name = "brrtcoerce")]
#[command(about = "Coerce raw request parameters into typed method arguments", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Coerce one raw value against a declared type
    Coerce {
        /// Declared type: `string`, `number`, `[number]`, `["string"]`, ...
        #[arg(short = 't', long = "type", default_value = "any")]
        declared_type: String,

        /// Array item delimiter characters, e.g. ",|"
        #[arg(short, long, default_value = "")]
        delimiters: String,

        /// Allowed values (comma-separated or repeated)
        #[arg(short = 'e', long = "enum", value_delimiter = ',')]
        enum_values: Vec<String>,

        /// Treat VALUE as already decoded JSON instead of wire text
        #[arg(long, default_value_t = false)]
        json: bool,

        /// The raw value (signed numerals such as `-5` are accepted as-is)
        #[arg(allow_negative_numbers = true)]
        value: String,
    },
    /// Coerce the arguments of a method from a simulated request
    Invoke {
        /// Path to the method schema file (YAML or JSON)
        #[arg(short, long, env = "BRRTC_SCHEMA")]
        schema: PathBuf,

        /// Method to build arguments for
        #[arg(short, long)]
        method: String,

        /// Request path, including any query string
        #[arg(long, default_value = "/")]
        path: String,

        /// Path parameter as NAME=VALUE (repeatable)
        #[arg(long = "param", value_parser = parse_key_value)]
        params: Vec<(String, String)>,

        /// Header as NAME:VALUE (repeatable)
        #[arg(long = "header", value_parser = parse_header)]
        headers: Vec<(String, String)>,

        /// JSON request body
        #[arg(long)]
        body: Option<String>,
    },
    /// Load a schema file and list its methods with resolved argument types
    Check {
        /// Path to the method schema file (YAML or JSON)
        #[arg(short, long, env = "BRRTC_SCHEMA")]
        schema: PathBuf,
    },
}

/// Parse `NAME=VALUE`
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))
}

/// Parse `NAME:VALUE`
pub fn parse_header(s: &str) -> Result<(String, String), String> {
    s.split_once(':')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected NAME:VALUE, got '{s}'"))
}

/// Execute a command and return what it prints.
pub fn run(command: &Commands) -> anyhow::Result<String> {
    match command {
        Commands::Coerce {
            declared_type,
            delimiters,
            enum_values,
            json,
            value,
        } => {
            let mut builder = ArgumentSpecBuilder::new("value")
                .declared_type(type_value(declared_type))
                .delimiter_chars(delimiters.chars());
            if !enum_values.is_empty() {
                builder = builder.enum_values(
                    enum_values.iter().map(|v| Value::String(v.clone())).collect(),
                );
            }
            let spec = builder.build()?;

            let raw: RawValue = if *json {
                serde_json::from_str::<Value>(value)
                    .context("VALUE is not valid JSON")?
                    .into()
            } else {
                value.as_str().into()
            };
            let coerced = spec.coerce(&raw).unwrap_or(Value::Null);
            Ok(serde_json::to_string(&coerced)?)
        }
        Commands::Invoke {
            schema,
            method,
            path,
            params,
            headers,
            body,
        } => {
            let registry = load_schema(schema)?;
            let request = ParsedRequest::from_parts(
                "POST",
                path,
                headers.iter().map(|(k, v)| (k.as_str(), v.clone())),
                body.as_deref(),
            )
            .with_path_params(params.iter().cloned());
            let ctx = InvocationContext::build_for(&registry, method, &request)?;
            Ok(serde_json::to_string_pretty(&ctx.into_args())?)
        }
        Commands::Check { schema } => {
            let registry = load_schema(schema)?;
            let mut out = String::new();
            for method in registry.methods() {
                writeln!(out, "{}", method.name)?;
                for arg in &method.accepts {
                    write!(out, "  {}: {} ({})", arg.name, arg.declared_type, arg.source)?;
                    if let Some(allowed) = &arg.enum_values {
                        write!(out, " enum={}", Value::Array(allowed.clone()))?;
                    }
                    if !arg.array_item_delimiters.is_empty() {
                        let delimiters: String = arg.array_item_delimiters.iter().collect();
                        write!(out, " delimiters={:?}", delimiters)?;
                    }
                    writeln!(out)?;
                }
            }
            writeln!(out, "{} method(s) OK", registry.len())?;
            Ok(out)
        }
    }
}

/// Declared type in the JSON form the spec builder expects.
fn type_value(declared: &str) -> Value {
    let descriptor: TypeDescriptor = match declared.parse() {
        Ok(descriptor) => descriptor,
        Err(never) => match never {},
    };
    let kind = Value::String(descriptor.base_kind.to_string());
    if descriptor.is_array {
        Value::Array(vec![kind])
    } else {
        kind
    }
}

/// Parse arguments, set up logging and run the selected command.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging_with_config(&LogConfig::from_env())?;
    let output = run(&cli.command)?;
    println!("{}", output.trim_end());
    Ok(())
}
