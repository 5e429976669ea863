mod commands;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use markdown_sections_config::Config;
use std::path::PathBuf;

use commands::Workspace;

#[derive(Debug, Parser)]
#[command(
    name = "markdown-sections",
    version,
    about = "Inspect and edit heading-structured markdown documents"
)]
struct Cli {
    /// Config file to use instead of ~/.config/markdown-sections/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the section outline
    Tree {
        file: String,
        /// Print full section paths instead of an indented outline
        #[arg(long)]
        paths: bool,
    },

    /// Print the canonical rendering, or rewrite the file with it
    Render {
        file: String,
        /// Insert a table of contents
        #[arg(long)]
        toc: bool,
        /// Overwrite the file instead of printing
        #[arg(long)]
        write: bool,
    },

    /// Add a section under an existing one
    Add(AddArgs),

    /// Delete a section and everything nested under it
    Delete { file: String, name: String },

    /// Insert or refresh the table of contents and save
    Toc { file: String },

    /// Verify that the file survives a render and re-parse unchanged
    Check { file: String },

    /// Convert the file with an external converter
    Export {
        file: String,
        /// Target format; defaults to the configured one
        #[arg(long)]
        format: Option<String>,
        /// Output path; defaults to the file with the format as extension
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
pub struct AddArgs {
    pub file: String,

    /// Parent section name
    #[arg(long)]
    pub under: String,

    /// Name of the new section
    #[arg(long)]
    pub name: String,

    /// Section content
    #[arg(long, conflicts_with = "content_file")]
    pub content: Option<String>,

    /// Read section content from a file
    #[arg(long)]
    pub content_file: Option<PathBuf>,

    /// Replace an existing section with the same name
    #[arg(long)]
    pub replace: bool,

    /// Turn headings inside the content into bold text
    #[arg(long)]
    pub demote: bool,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn load_config(explicit: Option<&PathBuf>) -> Result<Config> {
    let config_path = explicit.cloned().unwrap_or_else(Config::config_path);
    log::debug!("Config path: {}", config_path.display());
    match Config::load_from_path(&config_path)? {
        Some(config) => Ok(config),
        None if explicit.is_some() => {
            anyhow::bail!("config file not found: {}", config_path.display())
        }
        None => Ok(Config::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_ref())?;
    let workspace = Workspace::new(config);

    match cli.command {
        Commands::Tree { file, paths } => print!("{}", workspace.tree(&file, paths)?),
        Commands::Render { file, toc, write } => {
            let text = workspace.render(&file, toc, write)?;
            if !write {
                print!("{text}");
            }
        }
        Commands::Add(args) => {
            let content = match &args.content_file {
                Some(path) => std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?,
                None => args.content.clone().unwrap_or_default(),
            };
            let path = workspace.add(&args, &content)?;
            println!("added {path}");
        }
        Commands::Delete { file, name } => {
            if workspace.delete(&file, &name)? {
                println!("deleted {name}");
            } else {
                println!("no section named {name}");
            }
        }
        Commands::Toc { file } => workspace.toc(&file)?,
        Commands::Check { file } => println!("{}", workspace.check(&file)?),
        Commands::Export {
            file,
            format,
            output,
        } => {
            let output = workspace.export(&file, format.as_deref(), output)?;
            println!("wrote {}", output.display());
        }
    }
    Ok(())
}
