//! protoc-gen-xservice - Twirp-style Go RPC stubs from protobuf services
//!
//! Modes:
//! - no arguments: protoc plugin, a `CodeGeneratorRequest` on stdin and a
//!   `CodeGeneratorResponse` on stdout
//! - `--descriptor-set <FILE> --out <DIR>`: generate from a serialized
//!   `FileDescriptorSet` without protoc

use clap::Parser;
use std::io;
use std::path::PathBuf;
use xservice_core::LogLevel;

mod offline;
mod plugin;

#[derive(Parser)]
#[command(name = "protoc-gen-xservice")]
#[command(author, version, about = "protoc plugin generating Twirp-style Go RPC stubs", long_about = None)]
struct Cli {
    /// Serialized FileDescriptorSet to generate from instead of a plugin request
    #[arg(long, value_name = "FILE", requires = "out")]
    descriptor_set: Option<PathBuf>,

    /// Output directory for generated files
    #[arg(long, value_name = "DIR", requires = "descriptor_set")]
    out: Option<PathBuf>,

    /// Schema file to generate, repeatable (default: every file of the set)
    #[arg(long = "file", value_name = "NAME", requires = "descriptor_set")]
    files: Vec<String>,

    /// Generator options in `--xservice_opt` form, e.g. mode=server,log_level=debug
    #[arg(long, requires = "descriptor_set")]
    parameter: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    xservice_logging::init_logging(LogLevel::Warn);

    match (cli.descriptor_set, cli.out) {
        (Some(descriptor_set), Some(out)) => {
            let written = offline::run(&descriptor_set, &out, cli.files, cli.parameter)?;
            for path in written {
                println!("Wrote {}", path.display());
            }
        }
        _ => {
            let mut stdin = io::stdin().lock();
            let mut stdout = io::stdout().lock();
            plugin::run(&mut stdin, &mut stdout)?;
        }
    }

    Ok(())
}
