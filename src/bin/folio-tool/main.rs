use std::path::PathBuf;

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use spdlog::warn;

use folio::config::open_config;
use folio::logger::configure_logger;

use crate::post::post_cmd;
use crate::publications::{bibtex_cmd, orcid_cmd};
use crate::status::status_cmd;

mod post;
mod publications;
mod status;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long = "config")]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Creates a new draft post
    Post(PostArgs),
    /// Shows which posts are publishable and which are drafts
    Status,
    /// Converts a BibTeX file into the publications JSON file
    Bibtex(BibtexArgs),
    /// Maps a saved ORCID works payload into the publications JSON file
    Orcid(OrcidArgs),
}

#[derive(ClapArgs, Debug)]
struct PostArgs {
    /// Title of the post
    #[arg(short, long)]
    title: String,

    /// Short description, used as excerpt
    #[arg(short, long)]
    description: String,

    /// Tag of the post. Repeat it or separate tags with commas
    #[arg(long = "tag", value_delimiter = ',')]
    tags: Vec<String>,

    /// Cover image path
    #[arg(long)]
    cover_image: Option<String>,

    /// Directory of the new post. Defaults to the configured posts directory
    #[arg(short, long)]
    out_dir: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
struct BibtexArgs {
    /// BibTeX file. Defaults to publications.bibtex_input
    input: Option<PathBuf>,

    /// JSON file to write. Defaults to publications.bibtex_output
    output: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
struct OrcidArgs {
    /// Saved response of the ORCID works endpoint
    #[arg(short, long)]
    input: PathBuf,

    /// JSON file to write. Defaults to publications.orcid_output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// ORCID identifier. Defaults to [orcid] id
    #[arg(long, env = "ORCID_ID")]
    orcid_id: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    let (config, _) = match open_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run folio-tool --help");
            std::process::exit(2);
        }
    };

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    match args.command {
        Command::Post(args) => post_cmd(&config, args),
        Command::Status => status_cmd(&config),
        Command::Bibtex(args) => bibtex_cmd(&config, args),
        Command::Orcid(args) => orcid_cmd(&config, args),
    }
}
