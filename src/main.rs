use anyhow::Result;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use vcs::areas::repository::Repository;
use vcs::artifacts::staging::add_target::AddTarget;

/// Environment variable holding the log filter directives
const LOG_ENV: &str = "VCS_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser)]
#[command(
    name = "vcs",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A minimal content-addressed version control tool",
    long_about = "Stages files into a content-addressed object store and snapshots \
    the staged state as immutable, self-contained commits.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "add",
        about = "Stage files for the next commit",
        long_about = "This command stores the content of the given files as blobs and records them as staged. \
        Directories stage every file below them; `*`, `-A` or `--all` stage the whole working tree."
    )]
    Add {
        #[arg(short = 'A', long, help = "Stage every discoverable file")]
        all: bool,
        #[arg(
            index = 1,
            required_unless_present = "all",
            help = "The files or directories to stage"
        )]
        paths: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command snapshots the staged state of the repository with the specified commit message."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "status",
        about = "Show the working tree status",
        long_about = "This command reconciles the index with the working tree and lists untracked, staged and unstaged files."
    )]
    Status,
    #[command(
        name = "hash-object",
        about = "Hash a file and optionally write it to the object database",
        long_about = "This command hashes a file and can write it to the object database as a blob. \
        It requires the path to the file to be specified."
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints the content of a blob, or the message and index of a commit. \
        It requires the digest of the object to be specified."
    )]
    CatFile {
        #[arg(short = 'p', long, help = "The object digest to print")]
        sha: String,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_repository(path: Option<&str>) -> Result<Repository> {
    let path = match path {
        Some(path) => PathBuf::from(path),
        None => std::env::current_dir()?,
    };

    Ok(Repository::new(path, Box::new(std::io::stdout()))?)
}

fn main() -> ExitCode {
    init_logging();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    match &cli.command {
        Commands::Init { path } => open_repository(path.as_deref())?.init()?,
        Commands::Add { all, paths } => {
            let target = if *all {
                AddTarget::All
            } else {
                AddTarget::from_specifiers(paths.clone())
            };

            let report = open_repository(None)?.add(target)?;
            if !report.is_complete() {
                for failure in report.failures() {
                    eprintln!("error: {failure}");
                }
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Commit { message } => {
            open_repository(None)?.commit(message)?;
        }
        Commands::Status => {
            open_repository(None)?.status()?;
        }
        Commands::HashObject { write, file } => {
            open_repository(None)?.hash_object(file, *write)?;
        }
        Commands::CatFile { sha } => {
            open_repository(None)?.cat_file(sha)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
