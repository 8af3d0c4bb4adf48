use crate::cmd::DeleteArgs;
use crate::exit::{cookie_error, CliResult, SUCCESS};
use crate::output::{print_jar, OutputFormat};

pub fn run(args: DeleteArgs, format: OutputFormat) -> CliResult<i32> {
    let mut cookies = args.jar.open()?;
    cookies
        .delete(&args.key)
        .map_err(|err| cookie_error(&format!("delete {} failed", args.key), err))?;

    print_jar(&cookies.to_string(), cookies.size(), format);
    Ok(SUCCESS)
}
