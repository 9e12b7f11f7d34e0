//! Themesmith CLI
//!
//! Usage:
//!   themesmith [OPTIONS] <COMMAND>
//!
//! Commands:
//!   list                     List themes built for the application
//!   colors <THEME>           Print a theme's resolved named colors
//!   laf <THEME>              Print the application's look-and-feel attributes
//!   render <SCRIPT>          Fill a script template for every theme
//!
//! Options:
//!   -c, --config <FILE>      Build configuration (TOML format)
//!   -r, --repo <DIR>         Theme repository root
//!   -a, --app <NAME>         Application to build
//!   -p, --product <TIER>     community or ultimate
//!   -h, --help               Print help

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use themesmith::{
    evaluate_templates, BaseAppDefinition, BuildConfig, BuildError, HexResolver, LoadError,
    ProductTier, RgbResolver, ThemeContext, VariableResolver,
};

#[derive(Parser)]
#[command(name = "themesmith")]
#[command(about = "Generate application themes from hierarchical master templates")]
struct Cli {
    /// Build configuration file (TOML format)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Theme repository root, overrides the configuration
    #[arg(short, long, global = true)]
    repo: Option<PathBuf>,

    /// Application whose definitions are built, overrides the configuration
    #[arg(short, long, global = true)]
    app: Option<String>,

    /// Product tier (community or ultimate), overrides the configuration
    #[arg(short, long, global = true)]
    product: Option<ProductTier>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the themes built for the application and product tier
    List,

    /// Print a theme's resolved named-color mapping as JSON
    Colors {
        /// Theme id
        theme: String,
    },

    /// Print the application's look-and-feel attributes for a theme as JSON
    Laf {
        /// Theme id
        theme: String,
    },

    /// Fill a script template for one theme or every theme
    Render {
        /// Script template file
        script: PathBuf,

        /// Only render this theme id
        #[arg(short, long)]
        theme: Option<String>,

        /// Render `^`-prefixed placeholders as RGB triples
        #[arg(long)]
        rgb: bool,
    },
}

fn main() {
    // Logs go to stderr, stdout carries the generated output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&cli.command, &config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<BuildConfig, LoadError> {
    let mut config = match &cli.config {
        Some(path) => BuildConfig::from_file(path)?,
        None => BuildConfig::default(),
    };
    if let Some(repo) = &cli.repo {
        config = config.with_repo(repo);
    }
    if let Some(app) = &cli.app {
        config = config.with_app(app);
    }
    if let Some(product) = cli.product {
        config = config.with_product(product);
    }
    Ok(config)
}

fn run(command: &Command, config: &BuildConfig) -> Result<(), BuildError> {
    match command {
        Command::List => {
            let rows = evaluate_templates::<BaseAppDefinition, _, _>(config, |ctx| {
                Ok(format!(
                    "{}\t{}\t{}\t{}",
                    ctx.definition.id,
                    ctx.display_name(),
                    ctx.definition.variant(),
                    ctx.definition.product
                ))
            })?;
            for row in rows {
                println!("{}", row);
            }
        }
        Command::Colors { theme } => {
            let colors = for_theme(config, theme, |ctx| ctx.named_colors())?;
            println!("{}", serde_json::to_string_pretty(&colors)?);
        }
        Command::Laf { theme } => {
            let ui = for_theme(config, theme, |ctx| ctx.laf())?;
            println!("{}", serde_json::to_string_pretty(&ui)?);
        }
        Command::Render { script, theme, rgb } => {
            let script_text =
                fs::read_to_string(script).map_err(|e| LoadError::io(script, e))?;
            let resolver: &dyn VariableResolver = if *rgb { &RgbResolver } else { &HexResolver };

            let rendered = evaluate_templates::<BaseAppDefinition, _, _>(config, |ctx| {
                if theme.as_ref().is_some_and(|id| *id != ctx.definition.id) {
                    return Ok(None);
                }
                info!(theme = %ctx.display_name(), "rendering");
                Ok(Some(ctx.render(&script_text, resolver)?))
            })?;

            let rendered: Vec<String> = rendered.into_iter().flatten().collect();
            if rendered.is_empty() {
                if let Some(id) = theme {
                    return Err(BuildError::ThemeNotFound { id: id.clone() });
                }
            }
            for text in rendered {
                println!("{}", text);
            }
        }
    }
    Ok(())
}

/// Build one theme, failing when no theme has the given id
fn for_theme<R, F>(config: &BuildConfig, id: &str, build: F) -> Result<R, BuildError>
where
    F: Fn(&ThemeContext<'_, BaseAppDefinition>) -> Result<R, BuildError>,
{
    evaluate_templates::<BaseAppDefinition, _, _>(config, |ctx| {
        if ctx.definition.id == id {
            build(&ctx).map(Some)
        } else {
            Ok(None)
        }
    })?
    .into_iter()
    .flatten()
    .next()
    .ok_or_else(|| BuildError::ThemeNotFound { id: id.to_string() })
}
