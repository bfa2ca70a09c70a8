use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use spdlog::{debug, warn};

use folio::bio::read_bio;
use folio::config::Config;
use folio::logger::configure_logger;
use folio::posts::post_store;
use folio::projects::project_store;
use folio::publications::ordering::{sort_publications, SortDirection};
use folio::publications::resolver::PublicationSource;
use folio::routes::site_routes;

use crate::config::load_config;

mod config;

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
    /// Lists published posts, newest first
    Posts {
        /// Include drafts
        #[arg(long)]
        drafts: bool,
    },
    /// Shows a single post
    Post {
        slug: String,
        /// Adds the rendered HTML body
        #[arg(long)]
        html: bool,
    },
    /// Lists projects, newest first
    Projects,
    /// Shows a single project
    Project {
        slug: String,
        /// Adds the rendered HTML body
        #[arg(long)]
        html: bool,
    },
    /// Shows the bio page
    Bio {
        /// Adds the rendered HTML body
        #[arg(long)]
        html: bool,
    },
    /// Lists publications from the first available data file
    Publications {
        /// Year order, asc or desc
        #[arg(short, long, default_value_t = SortDirection::Desc)]
        order: SortDirection,
    },
    /// Lists every route of the site
    Routes,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Serializes `value` and, when present, adds the rendered body as `html`.
fn with_html<T: Serialize>(value: &T, html: Option<String>) -> Result<Value> {
    let mut json = serde_json::to_value(value)?;
    if let (Some(html), Some(map)) = (html, json.as_object_mut()) {
        map.insert("html".to_string(), Value::String(html));
    }
    Ok(json)
}

fn run(config: &Config, command: Command) -> Result<()> {
    match command {
        Command::Posts { drafts } => {
            let store = post_store(config);
            let posts = if drafts {
                store.list_all_including_drafts()?
            } else {
                store.list_all()?
            };
            debug!("Listing {} posts from {}", posts.len(), store.root_dir().display());
            print_json(&posts)
        }
        Command::Post { slug, html } => {
            let post = post_store(config).get_by_slug(&slug)?;
            let rendered = if html { Some(post.render_html()?) } else { None };
            print_json(&with_html(&post, rendered)?)
        }
        Command::Projects => print_json(&project_store(config).list_all()?),
        Command::Project { slug, html } => {
            let project = project_store(config).get_by_slug(&slug)?;
            let rendered = if html { Some(project.render_html()?) } else { None };
            print_json(&with_html(&project, rendered)?)
        }
        Command::Bio { html } => {
            let bio_file = config.bio_file();
            let bio = read_bio(&bio_file)
                .with_context(|| format!("Unable to load the bio page from {}", bio_file.display()))?;
            let rendered = if html { Some(bio.render_html()?) } else { None };
            print_json(&with_html(&bio, rendered)?)
        }
        Command::Publications { order } => {
            let mut publications = PublicationSource::from_config(config).resolve();
            publications.records = sort_publications(&publications.records, order);
            print_json(&publications)
        }
        Command::Routes => print_json(&site_routes(config)?),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run folio --help");
            std::process::exit(2);
        }
    };

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    run(&config, args.command)
}
