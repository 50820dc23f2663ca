//! `epika` CLI - browse the LRT Epika catalog and resolve DRM playback

mod cmd;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use epika::config::{config_path, Config};
use epika::{Action, EpikaClient, VideoType};

use cmd::Context;

#[derive(Parser)]
#[command(name = "epika")]
#[command(about = "Browse the LRT Epika catalog and resolve DRM-protected playback")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file [default: ~/.config/epika/config.toml]
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Cookie string for license requests (overrides config and EPIKA_COOKIES)
    #[arg(long, global = true)]
    cookies: Option<String>,

    /// API root URL
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the main categories
    Categories,

    /// List the subcategories (genres) of a main category
    Subcategories {
        /// Main category id (268 = Filmai, 304 = Serialai)
        category: u64,
    },

    /// List the videos of a subcategory
    Videos {
        /// Main category id
        category: u64,
        /// Subcategory id
        subcategory: u64,
    },

    /// List the seasons of a serial
    Seasons {
        /// Serial product id
        serial_id: u64,
    },

    /// List the episodes of a season
    Episodes {
        /// Serial product id
        serial_id: u64,
        /// Season id
        season_id: u64,
    },

    /// Resolve a video into a stream URL and license template
    Play {
        /// Product id
        id: String,

        /// Video type requested from the playlist endpoint
        #[arg(long, default_value = "MOVIE")]
        video_type: VideoType,

        /// Skip the title/description/duration lookup
        #[arg(long)]
        no_metadata: bool,
    },

    /// Handle a plugin paramstring (e.g. "action=listing&category=268&subcategory=5")
    Route {
        /// URL-encoded paramstring; empty shows the root menu
        paramstring: Option<String>,
    },

    /// Show the effective configuration
    Config,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn config_file(cli: &Cli) -> PathBuf {
    cli.config.clone().unwrap_or_else(config_path)
}

fn load_config(cli: &Cli, path: &Path) -> Result<Config> {
    let mut config = Config::read(path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))?;

    if let Some(cookies) = &cli.cookies {
        config.cookies = Some(cookies.clone());
    }
    if let Some(base_url) = &cli.base_url {
        config.base_url.clone_from(base_url);
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    if let Commands::Play {
        no_metadata: true, ..
    } = cli.command
    {
        config.fetch_metadata = false;
    }

    config.normalize()?;
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Unknown actions are rejected before any network setup.
    let action = match &cli.command {
        Commands::Route { paramstring } => {
            Some(Action::parse(paramstring.as_deref().unwrap_or(""))?)
        }
        _ => None,
    };

    let path = config_file(&cli);
    let config = load_config(&cli, &path)?;
    let client = EpikaClient::new(&config)?;
    let ctx = Context {
        config,
        client,
        json: cli.json,
    };

    match cli.command {
        Commands::Categories => cmd::browse::cmd_root(&ctx)?,
        Commands::Subcategories { category } => {
            cmd::browse::cmd_subcategories(&ctx, category).await?;
        }
        Commands::Videos {
            category,
            subcategory,
        } => cmd::browse::cmd_videos(&ctx, category, subcategory).await?,
        Commands::Seasons { serial_id } => cmd::browse::cmd_seasons(&ctx, serial_id).await?,
        Commands::Episodes {
            serial_id,
            season_id,
        } => cmd::browse::cmd_episodes(&ctx, serial_id, season_id).await?,
        Commands::Play { id, video_type, .. } => {
            cmd::play::cmd_play(&ctx, &id, video_type).await?;
        }
        Commands::Route { .. } => {
            if let Some(action) = action {
                cmd::dispatch(&ctx, action).await?;
            }
        }
        Commands::Config => cmd_config(&path, &ctx.config, ctx.json)?,
    }

    Ok(())
}

fn cmd_config(path: &Path, config: &Config, json: bool) -> Result<()> {
    let cookies = if config.cookies.is_some() { "set" } else { "not set" };

    if json {
        let value = serde_json::json!({
            "path": path.display().to_string(),
            "base_url": config.base_url,
            "tenant_uid": config.tenant_uid,
            "platform": config.platform,
            "lang": config.lang,
            "cookies": config.cookies.is_some(),
            "timeout_secs": config.timeout_secs,
            "fetch_metadata": config.fetch_metadata,
            "max_results": config.max_results,
        });
        return cmd::output::print_json(&value);
    }

    println!("⚙️  Config file: {}", path.display());
    println!("   base_url:       {}", config.base_url);
    println!("   tenant_uid:     {}", config.tenant_uid);
    println!("   platform:       {}", config.platform);
    println!("   lang:           {}", config.lang);
    println!("   cookies:        {cookies}");
    println!("   timeout_secs:   {}", config.timeout_secs);
    println!("   fetch_metadata: {}", config.fetch_metadata);
    println!("   max_results:    {}", config.max_results);
    Ok(())
}
