use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for blendview")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: fmt, clippy, tests, doc
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates, warnings denied
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the entire workspace
    Build,
    /// Play the bundled walkthrough script through the CLI
    Demo {
        /// Print frames as JSON
        #[arg(long)]
        json: bool,
    },
}

const FMT: &[&str] = &["fmt", "--all", "--", "--check"];
const CLIPPY: &[&str] = &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"];
const TEST: &[&str] = &["test", "--workspace"];
const DOC: &[&str] = &["doc", "--workspace", "--no-deps"];
const BUILD: &[&str] = &["build", "--workspace"];
const DEMO: &[&str] = &[
    "run",
    "-p",
    "blendview-cli",
    "--",
    "--config",
    "demos/config.yaml",
    "simulate",
    "--script",
    "demos/walkthrough.yaml",
];

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            for args in [FMT, CLIPPY, TEST, DOC] {
                cargo(args)?;
            }
        }
        Commands::Fmt => cargo(FMT)?,
        Commands::Clippy => cargo(CLIPPY)?,
        Commands::Test => cargo(TEST)?,
        Commands::Doc => cargo(DOC)?,
        Commands::Build => cargo(BUILD)?,
        Commands::Demo { json } => {
            let mut args = DEMO.to_vec();
            if json {
                args.push("--json");
            }
            cargo(&args)?;
        }
    }

    Ok(())
}

/// Run `cargo <args>` in the current directory and fail if it fails.
fn cargo(args: &[&str]) -> Result<()> {
    let line = args.join(" ");
    println!("==> Running cargo {line}");
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("cargo {line} failed");
    }
    Ok(())
}
