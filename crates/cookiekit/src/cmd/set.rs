use serde_json::Value;

use crate::cmd::SetArgs;
use crate::exit::{cookie_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_jar, OutputFormat};

pub fn run(args: SetArgs, format: OutputFormat) -> CliResult<i32> {
    let value = parse_value(&args.value, args.json)?;

    let mut cookies = args.jar.open()?;
    cookies
        .set(&args.key, value)
        .map_err(|err| cookie_error(&format!("set {} failed", args.key), err))?;

    print_jar(&cookies.to_string(), cookies.size(), format);
    Ok(SUCCESS)
}

fn parse_value(input: &str, json: bool) -> CliResult<Value> {
    if !json {
        return Ok(Value::String(input.to_string()));
    }
    serde_json::from_str(input)
        .map_err(|err| CliError::new(USAGE, format!("invalid JSON value: {err}")))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn plain_values_stay_strings() {
        assert_eq!(parse_value("42", false).unwrap(), json!("42"));
    }

    #[test]
    fn json_values_are_parsed() {
        assert_eq!(parse_value("42", true).unwrap(), json!(42));
        assert_eq!(
            parse_value(r#"{"theme":"dark"}"#, true).unwrap(),
            json!({"theme": "dark"})
        );
    }

    #[test]
    fn malformed_json_is_usage_error() {
        let err = parse_value("{nope", true).unwrap_err();
        assert_eq!(err.code, USAGE);
    }
}
