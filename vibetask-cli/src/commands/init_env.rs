//! `.env` template generator

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

/// Every setting `AppConfig::from_env` reads, at its default value
pub const ENV_TEMPLATE: &str = "\
# PostgreSQL connection (DATABASE_URL, if set, overrides these)
DB_HOST=localhost
DB_PORT=5432
DB_NAME=vibetask_db
DB_USER=postgres
DB_PASSWORD=

# HTTP server
HOST=127.0.0.1
PORT=3000
APP_ENV=development
STATIC_DIR=public
";

/// Arguments for the init-env command
#[derive(Parser, Debug)]
pub struct InitEnvArgs {
    /// Where to write the file
    #[arg(long, short = 'o', default_value = ".env")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Write the template
pub fn run_init_env(args: InitEnvArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            args.output.display()
        );
    }

    std::fs::write(&args.output, ENV_TEMPLATE)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!("Wrote {}", args.output.display());
    println!("Set DB_PASSWORD before starting the server.");
    Ok(())
}
