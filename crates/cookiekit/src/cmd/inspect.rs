use crate::cmd::InspectArgs;
use crate::exit::{cookie_error, CliResult, SUCCESS};
use crate::output::{print_values, OutputFormat};

pub fn run(args: InspectArgs, format: OutputFormat) -> CliResult<i32> {
    let cookies = args.jar.open()?;
    let values = cookies
        .get_all()
        .map_err(|err| cookie_error("inspect failed", err))?;

    print_values(cookies.registry(), &values, cookies.size(), format);
    Ok(SUCCESS)
}
