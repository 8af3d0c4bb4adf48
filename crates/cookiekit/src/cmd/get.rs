use serde::Serialize;
use serde_json::Value;

use crate::cmd::GetArgs;
use crate::exit::{cookie_error, CliResult, SUCCESS};
use crate::output::{print_json, print_raw, schema_id, value_preview, OutputFormat};

#[derive(Serialize)]
struct GetOutput<'a> {
    schema_id: String,
    key: &'a str,
    present: bool,
    value: Option<&'a Value>,
}

pub fn run(args: GetArgs, format: OutputFormat) -> CliResult<i32> {
    let cookies = args.jar.open()?;
    let value = cookies
        .get(&args.key)
        .map_err(|err| cookie_error(&format!("get {} failed", args.key), err))?;

    match format {
        OutputFormat::Json => print_json(&GetOutput {
            schema_id: schema_id("cookie-value"),
            key: &args.key,
            present: value.is_some(),
            value: value.as_ref(),
        }),
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("{} = {}", args.key, value_preview(value.as_ref()));
        }
        // Absent cookies print an empty line so scripts can test for it.
        OutputFormat::Raw => match &value {
            Some(value) => print_raw(&value_preview(Some(value))),
            None => print_raw(""),
        },
    }
    Ok(SUCCESS)
}
