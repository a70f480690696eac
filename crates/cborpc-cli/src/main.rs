//! cborpc command line front end.
//!
//! Batch, single-shot, stateless: read one schema file, write generated
//! artifacts (or report why not), exit.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use cborpc_compiler::{check, compile, hash, CompileOptions};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cborpc",
    version,
    about = "RPC interface compiler: schema to caller/dispatcher artifacts"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate both artifacts from a schema file.
    Gen {
        /// Schema file: a JSON object mapping function names to tag lists.
        #[arg(long)]
        schema: PathBuf,
        /// Directory the artifacts are written into.
        #[arg(long)]
        out_dir: PathBuf,
        /// Stem for artifact file names.
        #[arg(long, default_value = cborpc_codegen::DEFAULT_STEM)]
        stem: String,
    },
    /// Parse and validate a schema without generating anything.
    Check {
        #[arg(long)]
        schema: PathBuf,
    },
    /// Print the schema hash.
    Hash {
        #[arg(long)]
        schema: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Gen {
            schema,
            out_dir,
            stem,
        } => {
            let text = read_schema(&schema)?;
            let output = compile(&text, &CompileOptions { stem })?;
            fs::create_dir_all(&out_dir)
                .with_context(|| format!("create output directory {}", out_dir.display()))?;
            for artifact in &output.artifacts {
                let path = out_dir.join(&artifact.file_name);
                fs::write(&path, &artifact.contents)
                    .with_context(|| format!("write {}", path.display()))?;
                println!("wrote {} ({})", path.display(), artifact.name);
            }
            println!("schema hash: {}", output.schema_hash);
            Ok(())
        }
        Command::Check { schema } => {
            let text = read_schema(&schema)?;
            let validated = check(&text)?;
            println!("ok: {} function(s)", validated.len());
            Ok(())
        }
        Command::Hash { schema } => {
            let text = read_schema(&schema)?;
            let validated = check(&text)?;
            println!("{}", hash::schema_hash(&validated));
            Ok(())
        }
    }
}

fn read_schema(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read schema {}", path.display()))
}
