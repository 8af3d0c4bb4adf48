use serde::Serialize;

use crate::cmd::CheckArgs;
use crate::exit::{CliResult, DATA_INVALID, SUCCESS};
use crate::output::{schema_id, OutputFormat};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Pass,
    Absent,
    Fail,
}

impl CheckStatus {
    fn label(self) -> &'static str {
        match self {
            CheckStatus::Pass => "PASS",
            CheckStatus::Absent => "ABSENT",
            CheckStatus::Fail => "FAIL",
        }
    }
}

#[derive(Debug, Serialize)]
struct CheckResult {
    key: String,
    status: CheckStatus,
    detail: String,
}

#[derive(Debug, Serialize)]
struct CheckOutput {
    schema_id: String,
    checks: Vec<CheckResult>,
    unmanaged: Vec<String>,
    overall: &'static str,
}

pub fn run(args: CheckArgs, format: OutputFormat) -> CliResult<i32> {
    let cookies = args.jar.open()?;

    let checks: Vec<CheckResult> = cookies
        .registry()
        .keys()
        .map(|key| match cookies.get(key) {
            Ok(Some(_)) => CheckResult {
                key: key.to_string(),
                status: CheckStatus::Pass,
                detail: "valid".to_string(),
            },
            Ok(None) => CheckResult {
                key: key.to_string(),
                status: CheckStatus::Absent,
                detail: "not in jar".to_string(),
            },
            Err(err) => CheckResult {
                key: key.to_string(),
                status: CheckStatus::Fail,
                detail: err.to_string(),
            },
        })
        .collect();

    let unmanaged = cookies
        .jar()
        .iter()
        .filter(|(name, _)| !cookies.registry().contains(name))
        .map(|(name, _)| name.to_string())
        .collect();

    let has_fail = checks.iter().any(|c| c.status == CheckStatus::Fail);
    let output = CheckOutput {
        schema_id: schema_id("check-report"),
        checks,
        unmanaged,
        overall: if has_fail { "fail" } else { "pass" },
    };
    print_check(&output, format);

    if has_fail {
        Ok(DATA_INVALID)
    } else {
        Ok(SUCCESS)
    }
}

fn print_check(output: &CheckOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => crate::output::print_json(output),
        OutputFormat::Table | OutputFormat::Pretty => {
            for c in &output.checks {
                println!("  [{:6}] {}: {}", c.status.label(), c.key, c.detail);
            }
            if !output.unmanaged.is_empty() {
                println!("  unmanaged: {}", output.unmanaged.join(", "));
            }
            println!("\noverall: {}", output.overall);
        }
        OutputFormat::Raw => println!("{}", output.overall),
    }
}
