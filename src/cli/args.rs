//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Devstation - Provision a local C and Python development toolchain.
#[derive(Debug, Parser)]
#[command(name = "devstation")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .devstation/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Whether the command prints machine-readable output on stdout.
    pub fn wants_json(&self) -> bool {
        match &self.command {
            Commands::Setup(args) => args.json,
            Commands::Plans(args) => args.json,
            Commands::Status(_) | Commands::Upgrade(_) => false,
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install a development toolchain
    Setup(SetupArgs),

    /// Show which plan packages are installed
    Status(StatusArgs),

    /// Upgrade every package in a plan
    Upgrade(UpgradeArgs),

    /// List available install plans
    Plans(PlansArgs),
}

/// Toolchains `setup` can install.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SetupTarget {
    /// Python interpreter, tools, and common packages
    Python,
    /// C compiler and build tools
    C,
    /// Python, then C
    All,
}

impl SetupTarget {
    /// System plans to run, in order.
    pub fn environments(&self) -> &'static [&'static str] {
        match self {
            Self::Python => &["python"],
            Self::C => &["c"],
            Self::All => &["python", "c"],
        }
    }
}

/// Arguments for the `setup` command.
#[derive(Debug, Clone, clap::Args)]
pub struct SetupArgs {
    /// Toolchain to install
    #[arg(value_enum)]
    pub target: SetupTarget,

    /// Print the orchestration reports as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Environment to check (default: all system environments)
    pub environment: Option<String>,
}

/// Arguments for the `upgrade` command.
#[derive(Debug, Clone, clap::Args)]
pub struct UpgradeArgs {
    /// Environment whose packages to upgrade
    pub environment: String,
}

/// Arguments for the `plans` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct PlansArgs {
    /// Print plans as JSON
    #[arg(long)]
    pub json: bool,
}
