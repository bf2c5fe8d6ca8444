use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use wasm_udf_sql::create_function_sql;

const USAGE: &str =
    "make-create-function-sql [OPTIONS] <UDF_NAME> [WASM_EXPORT_NAME] <WASM_FILENAME>";

const AFTER_HELP: &str =
    "Arguments starting with '-' must follow '--', e.g. `add_two -- -add.wasm`.";

#[derive(Parser)]
#[command(name = "make-create-function-sql")]
#[command(version, about = "Print the CREATE FUNCTION statement registering a WASM UDF")]
#[command(override_usage = USAGE, after_help = AFTER_HELP)]
struct Cli {
    /// Name of the SQL function to create
    udf_name: String,

    /// Export to invoke, or the .wasm path when only two arguments are
    /// given. An empty export name selects UDF_NAME, same as omitting it.
    #[arg(value_name = "WASM_EXPORT_NAME|WASM_FILENAME")]
    export_or_file: String,

    /// Path to the compiled .wasm module
    #[arg(value_name = "WASM_FILENAME")]
    wasm_filename: Option<PathBuf>,

    /// Path to write the SQL to (prints to stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Cli {
    /// Split the trailing positionals into `(export_name, wasm_filename)`.
    fn export_and_file(&self) -> (Option<&str>, PathBuf) {
        match &self.wasm_filename {
            Some(path) => {
                let export = Some(self.export_or_file.as_str()).filter(|name| !name.is_empty());
                (export, path.clone())
            }
            None => (None, PathBuf::from(&self.export_or_file)),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _r = env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .format_target(false)
        .format_timestamp(None)
        .try_init();

    let (export_name, wasm_filename) = cli.export_and_file();
    let sql = create_function_sql(&cli.udf_name, export_name, &wasm_filename)?;

    match &cli.output {
        Some(path) => {
            fs::write(path, format!("{sql}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("CREATE FUNCTION {} written to {}", cli.udf_name, path.display());
        }
        None => {
            println!("{sql}");
        }
    }

    Ok(())
}
