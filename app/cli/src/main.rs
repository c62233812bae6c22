//! vexec - run agent shell commands against a virtual filesystem.

mod workspace;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::Subcommand;
use vexec_config::AppConfig;
use vexec_config::BackendKind;
use vexec_file_store::DEFAULT_READ_LIMIT;
use vexec_file_store::FileInfo;
use vexec_utils_common::LoggingConfig;

use crate::workspace::bootstrap;

#[derive(Parser)]
#[command(name = "vexec")]
#[command(about = "Run agent shell commands against a virtual filesystem")]
#[command(version)]
struct Cli {
    /// Path to config file (default: ./vexec.toml, or $VEXEC_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging for vexec crates
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Execute a shell command through the configured backend
    Exec {
        /// Shell command, using virtual paths such as /data/x.csv
        command: String,
        /// Backend override (local or docker)
        #[arg(long)]
        backend: Option<BackendKind>,
        /// Timeout override in seconds
        #[arg(long)]
        timeout: Option<u64>,
        /// Print the full response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a command with its virtual paths rewritten to physical ones
    Rewrite {
        command: String,
    },

    /// Print the physical path for a virtual path
    Resolve {
        path: String,
    },

    /// Print the skill catalog prompt
    Skills,

    /// List a directory
    Ls {
        #[arg(default_value = "/")]
        path: String,
    },

    /// Read a file with line numbers
    Read {
        path: String,
        /// 0-based line to start from
        #[arg(long, default_value_t = 0)]
        offset: usize,
        /// Maximum number of lines
        #[arg(long, default_value_t = DEFAULT_READ_LIMIT)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // The configured subscriber needs the config, so loading logs through a
    // scoped default one.
    let startup_logging = effective_logging(&LoggingConfig::default(), cli.verbose);
    let mut config = vexec_utils_common::with_scoped_logging(&startup_logging, || {
        vexec_config::load_config(cli.config.as_deref())
    })?;
    vexec_utils_common::init_logging(&effective_logging(&config.logging, cli.verbose));

    match cli.command {
        Command::Exec {
            command,
            backend,
            timeout,
            json,
        } => {
            apply_exec_overrides(&mut config, backend, timeout)?;
            let workspace = bootstrap(&config).await?;
            let response = workspace.executor.execute(&command).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print!("{}", response.output);
                if !response.output.is_empty() && !response.output.ends_with('\n') {
                    println!();
                }
            }
            Ok(ExitCode::from(exit_status(response.exit_code)))
        }
        Command::Rewrite { command } => {
            let resolver = config.resolver()?;
            println!("{}", resolver.rewrite_command(&command));
            Ok(ExitCode::SUCCESS)
        }
        Command::Resolve { path } => {
            let resolver = config.resolver()?;
            match resolver.resolve(&path) {
                Some(physical) => {
                    println!("{}", physical.display());
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    eprintln!("no mount covers {path}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Skills => {
            let workspace = bootstrap(&config).await?;
            print!("{}", vexec_skill::format_skills_prompt(&workspace.skills));
            Ok(ExitCode::SUCCESS)
        }
        Command::Ls { path } => {
            let workspace = bootstrap(&config).await?;
            for entry in workspace.files.ls(&path).await? {
                println!("{}", format_entry(&entry));
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Read {
            path,
            offset,
            limit,
        } => {
            let workspace = bootstrap(&config).await?;
            let content = workspace.files.read(&path, offset, limit).await?;
            println!("{content}");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn effective_logging(logging: &LoggingConfig, verbose: bool) -> LoggingConfig {
    if verbose {
        LoggingConfig {
            level: "info,vexec=debug".to_string(),
            ..logging.clone()
        }
    } else {
        logging.clone()
    }
}

fn apply_exec_overrides(
    config: &mut AppConfig,
    backend: Option<BackendKind>,
    timeout: Option<u64>,
) -> anyhow::Result<()> {
    if let Some(backend) = backend {
        config.backend = backend;
    }
    if let Some(timeout) = timeout {
        config.timeout_secs = timeout;
    }
    config.validate()?;
    Ok(())
}

/// Shell exit statuses are 0..=255; anything else reports a generic failure.
fn exit_status(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}

fn format_entry(entry: &FileInfo) -> String {
    if entry.is_dir {
        format!("{}/", entry.path.trim_end_matches('/'))
    } else {
        format!("{}\t{}", entry.path, entry.size)
    }
}

#[cfg(test)]
#[path = "main.test.rs"]
mod tests;
