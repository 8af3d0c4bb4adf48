use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

use crate::cmd::CategoriesArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_json, schema_id, OutputFormat};

#[derive(Serialize)]
struct CategoryEntry<'a> {
    name: &'a str,
    keys: Vec<&'a str>,
}

#[derive(Serialize)]
struct CategoriesOutput<'a> {
    schema_id: String,
    categories: Vec<CategoryEntry<'a>>,
}

pub fn run(args: CategoriesArgs, format: OutputFormat) -> CliResult<i32> {
    let registry = args.manifest.load()?;
    let categories: Vec<CategoryEntry<'_>> = registry
        .categories()
        .into_iter()
        .map(|name| CategoryEntry {
            name,
            keys: registry.keys_in_category(name).collect(),
        })
        .collect();

    match format {
        OutputFormat::Json => print_json(&CategoriesOutput {
            schema_id: schema_id("categories"),
            categories,
        }),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["CATEGORY", "KEYS"]);
            for entry in &categories {
                table.add_row(vec![entry.name.to_string(), entry.keys.join(", ")]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for entry in &categories {
                println!("{}:", entry.name);
                for key in &entry.keys {
                    println!("  {key}");
                }
            }
        }
        OutputFormat::Raw => {
            for entry in &categories {
                println!("{}", entry.name);
            }
        }
    }
    Ok(SUCCESS)
}
