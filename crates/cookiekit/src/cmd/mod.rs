use std::path::PathBuf;

use clap::{Args, Subcommand};
use cookiekit_core::{load_manifest, CookieFactory, CookieRegistry, Cookies};
use cookiekit_jar::{HeaderSource, MemoryJar};

use crate::exit::{cookie_error, io_error, manifest_error, CliResult};
use crate::output::OutputFormat;

pub mod categories;
pub mod check;
pub mod delete;
pub mod get;
pub mod inspect;
pub mod set;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode and print every registry cookie.
    Inspect(InspectArgs),
    /// Decode and print one cookie.
    Get(GetArgs),
    /// Write one cookie and print the resulting jar.
    Set(SetArgs),
    /// Remove one cookie and print the resulting jar.
    Delete(DeleteArgs),
    /// Validate every registry cookie present in the jar.
    Check(CheckArgs),
    /// List registry keys grouped by category.
    Categories(CategoriesArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Inspect(args) => inspect::run(args, format),
        Command::Get(args) => get::run(args, format),
        Command::Set(args) => set::run(args, format),
        Command::Delete(args) => delete::run(args, format),
        Command::Check(args) => check::run(args, format),
        Command::Categories(args) => categories::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct ManifestArgs {
    /// Registry manifest (JSON).
    #[arg(long, short = 'm', value_name = "FILE", env = "COOKIEKIT_MANIFEST")]
    pub manifest: PathBuf,
}

impl ManifestArgs {
    pub fn load(&self) -> CliResult<CookieRegistry> {
        load_manifest(&self.manifest).map_err(|err| manifest_error("manifest load failed", err))
    }
}

#[derive(Args, Debug)]
pub struct JarArgs {
    #[command(flatten)]
    pub manifest: ManifestArgs,
    /// Cookie request header, e.g. "session=abc; pref=%7B%7D".
    #[arg(long, conflicts_with = "header_file")]
    pub header: Option<String>,
    /// Read the cookie request header from a file.
    #[arg(long, value_name = "FILE", conflicts_with = "header")]
    pub header_file: Option<PathBuf>,
}

impl JarArgs {
    /// Load the registry and bind it to a jar parsed from the header.
    pub fn open(&self) -> CliResult<Cookies<MemoryJar>> {
        let factory = CookieFactory::new(self.manifest.load()?);
        let source = HeaderSource::new(self.read_header()?);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .map_err(|err| io_error("runtime start failed", err))?;
        runtime
            .block_on(factory.acquire(&source))
            .map_err(|err| cookie_error("jar acquire failed", err))
    }

    fn read_header(&self) -> CliResult<String> {
        if let Some(path) = &self.header_file {
            let content = std::fs::read_to_string(path)
                .map_err(|err| io_error(&format!("failed reading {}", path.display()), err))?;
            return Ok(content.trim_end_matches(['\r', '\n']).to_string());
        }
        Ok(self.header.clone().unwrap_or_default())
    }
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub jar: JarArgs,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    #[command(flatten)]
    pub jar: JarArgs,
    /// Registry key to read.
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    #[command(flatten)]
    pub jar: JarArgs,
    /// Registry key to write.
    pub key: String,
    /// Value to store. Taken as a string unless --json is given.
    pub value: String,
    /// Parse VALUE as JSON before storing.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub jar: JarArgs,
    /// Registry key to remove.
    pub key: String,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub jar: JarArgs,
}

#[derive(Args, Debug)]
pub struct CategoriesArgs {
    #[command(flatten)]
    pub manifest: ManifestArgs,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
