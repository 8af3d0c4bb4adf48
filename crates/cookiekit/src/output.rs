use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use cookiekit_core::{CookieRegistry, CookieValues};
use serde::Serialize;
use serde_json::Value;

const SCHEMA_BASE: &str = "https://schemas.3leaps.dev/cookiekit/cli/v1";

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

pub fn schema_id(name: &str) -> String {
    format!("{SCHEMA_BASE}/{name}.schema.json")
}

pub fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn print_raw(data: &str) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data.as_bytes());
    let _ = out.write_all(b"\n");
    let _ = out.flush();
}

/// Render a decoded value for humans: strings unquoted, everything else as JSON.
pub fn value_preview(value: Option<&Value>) -> String {
    match value {
        None => "-".to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

#[derive(Serialize)]
struct InspectOutput<'a> {
    schema_id: String,
    size: usize,
    cookies: &'a CookieValues,
}

pub fn print_values(
    registry: &CookieRegistry,
    values: &CookieValues,
    size: usize,
    format: OutputFormat,
) {
    match format {
        OutputFormat::Json => print_json(&InspectOutput {
            schema_id: schema_id("cookie-values"),
            size,
            cookies: values,
        }),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["KEY", "CATEGORY", "TYPE", "VALUE"]);
            for (key, value) in values.iter() {
                let (category, representation) = describe(registry, key);
                table.add_row(vec![
                    key.to_string(),
                    category,
                    representation,
                    value_preview(value),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for (key, value) in values.iter() {
                let (category, representation) = describe(registry, key);
                println!(
                    "{key} ({category}, {representation}) = {}",
                    value_preview(value)
                );
            }
        }
        OutputFormat::Raw => {
            print_raw(&serde_json::to_string(values).unwrap_or_else(|_| "{}".to_string()));
        }
    }
}

#[derive(Serialize)]
struct JarOutput<'a> {
    schema_id: String,
    size: usize,
    header: &'a str,
}

/// Print the jar after a write, as a `Cookie` header line.
pub fn print_jar(header: &str, size: usize, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&JarOutput {
            schema_id: schema_id("jar-state"),
            size,
            header,
        }),
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("Cookie: {header}");
            println!("({size} cookies)");
        }
        OutputFormat::Raw => print_raw(header),
    }
}

fn describe(registry: &CookieRegistry, key: &str) -> (String, String) {
    registry
        .definition_for(key)
        .map(|definition| {
            (
                definition.category().to_string(),
                definition.representation().to_string(),
            )
        })
        .unwrap_or_else(|| ("-".to_string(), "-".to_string()))
}
