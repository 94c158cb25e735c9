use std::env;
use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

use develop_core::{BuildConfig, BuildType, Jobs, Os, PlatformStrategy};

mod cmd;

/// develop - configure and drive native builds of the viewer
#[derive(Parser)]
#[command(name = "develop")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Build type: "Release", "RelWithDebInfo" or "Debug"
    #[arg(short = 't', long = "type", global = true, value_name = "NAME")]
    build_type: Option<String>,

    /// Generator name.
    /// Windows: "vs2022" or "vs2022-clang";
    /// Mac OS X: "Xcode" (default) or "Unix Makefiles";
    /// Linux: "Unix Makefiles" (default) or "Ninja"
    #[arg(short = 'G', long, global = true, value_name = "NAME")]
    generator: Option<String>,

    /// Build against available system libs instead of prebuilt libs
    #[arg(long, global = true)]
    systemlibs: bool,

    /// Disable use of distcc
    #[arg(short = 'N', long = "no-distcc", global = true)]
    no_distcc: bool,

    /// Overrides the root project name (does not affect makefiles)
    #[arg(short = 'p', long, global = true, value_name = "NAME")]
    project: Option<String>,

    /// Number of parallel build jobs (default: estimated from the machine
    /// and the distcc cluster)
    #[arg(short = 'j', long = "jobs", global = true, value_name = "N")]
    jobs: Option<u32>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure the project by running the generator (default if no
    /// command given)
    Configure {
        /// Extra options passed verbatim to the generator, e.g.
        /// -DNO_FATAL_WARNINGS:BOOL=TRUE
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        opts: Vec<String>,
    },

    /// Configure, then build the default targets (Linux only)
    Build {
        /// Option forwarded to the build tool (repeatable)
        #[arg(short = 'o', long = "option", value_name = "OPT")]
        options: Vec<String>,

        /// Targets to build (default: all)
        targets: Vec<String>,
    },

    /// Delete all build directories; does not affect sources
    Clean,

    /// Print the build directories that will be used
    PrintBuildDirs {
        /// Print as a JSON array
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .without_time()
        .init();

    // Force English on cmake and compiler messages (easier to search on
    // the web for the error messages that could arise).
    // SAFETY: no other threads have been started yet.
    unsafe { env::set_var("LANG", "C") };

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => {
            let _ = err.print();
            std::process::exit(1);
        }
        Err(err) => {
            // --help / --version
            let _ = err.print();
            std::process::exit(0);
        }
    };

    if let Err(err) = run(cli) {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    locate_source_tree()?;

    let os = Os::current();
    let mut config = BuildConfig::for_os(os);
    if let Some(name) = &cli.build_type {
        config.build_type = name.parse::<BuildType>()?;
    }
    if let Some(generator) = cli.generator {
        config.generator = generator;
    }
    if cli.systemlibs {
        config.systemlibs = true;
    }
    if cli.no_distcc {
        config.distcc = false;
    }
    if let Some(project) = cli.project {
        config.project_name = project;
    }
    config.jobs = Jobs::from(cli.jobs);

    let strategy = PlatformStrategy::current(config);
    match cli.command.unwrap_or(Commands::Configure { opts: Vec::new() }) {
        Commands::Configure { opts } => cmd::cmd_configure(&strategy, &opts),
        Commands::Build { options, targets } => cmd::cmd_build(&strategy, &options, &targets),
        Commands::Clean => cmd::cmd_clean(&strategy),
        Commands::PrintBuildDirs { json } => cmd::cmd_print_build_dirs(&strategy, json),
    }
}

/// Move into the source directory.
///
/// The driver may be invoked from the checkout root (which contains
/// `indra/`), from its sibling `scripts/` directory, or from inside the
/// source directory itself (recognizable by `newview/`).
fn locate_source_tree() -> Result<()> {
    for candidate in ["indra", "../indra"] {
        if Path::new(candidate).is_dir() {
            let dir = dunce::canonicalize(candidate)?;
            env::set_current_dir(&dir)?;
            return Ok(());
        }
    }
    if Path::new("newview").is_dir() {
        return Ok(());
    }
    anyhow::bail!("cannot find the \"indra\" sub-directory")
}
