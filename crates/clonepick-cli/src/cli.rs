use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "clonepick")]
#[command(bin_name = "clonepick")]
#[command(version)]
#[command(
    about = "Pick a GitHub repository to clone and guard pushes against oversized files"
)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        help = "Write a diagnostics log next to the config file"
    )]
    pub diagnostics: bool,
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Config file to use instead of ~/.config/clonepick/config.toml"
    )]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(
        about = "Choose a repository to clone and print its url and local path"
    )]
    Pick(PickArgs),
    #[command(about = "Warn about files too large to push and cancel the push")]
    CheckPush(CheckPushArgs),
    #[command(about = "Run environment and configuration checks")]
    Doctor,
}

#[derive(Debug, Args)]
pub struct PickArgs {
    #[arg(
        long,
        value_name = "LOGIN",
        help = "Configured account to list repositories for"
    )]
    pub account: Option<String>,
    #[arg(long, value_name = "DIR", help = "Local path to clone into")]
    pub path: Option<String>,
    #[arg(
        long,
        value_name = "JSON",
        help = "Read repositories from a JSON array instead of calling gh"
    )]
    pub repos_file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CheckPushArgs {
    #[arg(
        long,
        value_name = "MB",
        help = "Largest allowed file size in megabytes"
    )]
    pub limit_mb: Option<u64>,
    #[arg(
        long,
        help = "Print oversized files instead of showing the warning dialog"
    )]
    pub no_tui: bool,
    #[arg(
        required = true,
        value_name = "PATH",
        help = "Files or directories to scan"
    )]
    pub paths: Vec<PathBuf>,
}
