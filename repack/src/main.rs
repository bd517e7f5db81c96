use std::{path::PathBuf, process};

use clap::{Parser, Subcommand};
use repack::{common::Config, pack_format, CompileConfig, CompileError};
use tracing::error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Compiles RePack sources into an optifine cit resource pack
#[derive(Parser)]
#[command(name = "repack", version)]
struct Cli {
    /// Print debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile every source file of a directory into a resource pack
    Compile {
        /// The directory that contains the source files and assets
        input: PathBuf,
        /// The directory the resource pack is written to
        output: PathBuf,
        /// Generate a pack.mcmeta for this minecraft version
        #[arg(long)]
        mc_version: Option<String>,
        /// The description of the pack.mcmeta
        #[arg(long)]
        description: Option<String>,
        /// Do not delete the output directory before writing the pack
        #[arg(long)]
        keep_output: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        true => "repack=debug",
        false => "repack=info",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let code = match cli.command {
        Commands::Compile {
            input,
            output,
            mc_version,
            description,
            keep_output,
        } => compile(input, output, mc_version, description, keep_output),
    };
    process::exit(code);
}

fn compile(
    input: PathBuf,
    output: PathBuf,
    mc_version: Option<String>,
    description: Option<String>,
    keep_output: bool,
) -> i32 {
    let mut config = Config {
        clean_output: !keep_output,
        ..Config::default()
    };
    if let Some(description) = description {
        config.pack_description = description;
    }
    if let Some(version) = mc_version {
        match pack_format(&version) {
            Ok(format) => config.pack_format = Some(format),
            Err(err) => {
                error!("{err}");
                return 1;
            }
        }
    }

    let mut compile_config = CompileConfig::new(config);
    match compile_config.compile_to(&input, &output) {
        Ok(warnings) => {
            if !warnings.is_empty() {
                eprintln!("{}", compile_config.format_diagnostics(&warnings));
            }
            0
        }
        Err(CompileError::Failed(diagnostics)) => {
            eprintln!("{}", compile_config.format_diagnostics(&diagnostics));
            error!("Compilation failed with {} error(s)", diagnostics.errors().count());
            1
        }
        Err(err) => {
            error!("{err}");
            1
        }
    }
}
