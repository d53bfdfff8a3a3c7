use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use scene::{FilterField, ViewState};
use tools::{Summary, ViewOverrides, load_view, render};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "craters", about = "Render and inspect lunar crater maps", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a static SVG map for one filter state
    Render {
        #[command(flatten)]
        view: ViewArgs,

        /// Slider threshold
        #[arg(long, default_value_t = 0.0)]
        threshold: f64,

        #[arg(long)]
        hide_survived: bool,

        #[arg(long)]
        hide_erased: bool,

        /// Region outline (GeoJSON)
        #[arg(long)]
        outline: Option<String>,

        /// Base image href written into the SVG
        #[arg(long)]
        image: Option<String>,

        /// Output SVG path
        #[arg(long)]
        out: PathBuf,
    },
    /// Print record counts and the slider bound
    Summary {
        #[command(flatten)]
        view: ViewArgs,
    },
}

#[derive(Args)]
struct ViewArgs {
    /// Survived crater table (CSV)
    #[arg(long)]
    survived: String,

    /// Erased crater table (CSV)
    #[arg(long)]
    erased: String,

    /// Built-in view: mare or nonmare
    #[arg(long)]
    variant: Option<String>,

    /// Filter field: time or diameter
    #[arg(long, value_parser = parse_filter)]
    filter: Option<FilterField>,

    /// View config (JSON), used instead of the variant
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_filter(s: &str) -> Result<FilterField, String> {
    FilterField::parse(s).ok_or_else(|| format!("unknown filter field: {s}"))
}

impl ViewArgs {
    fn overrides(self) -> Result<ViewOverrides, std::io::Error> {
        let config_json = self.config.map(fs::read_to_string).transpose()?;
        Ok(ViewOverrides {
            variant: self.variant,
            config_json,
            filter: self.filter,
            survived: self.survived,
            erased: self.erased,
            outline: None,
            image: None,
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match Cli::parse().command {
        Command::Render {
            view,
            threshold,
            hide_survived,
            hide_erased,
            outline,
            image,
            out,
        } => {
            let mut overrides = view.overrides()?;
            overrides.outline = outline;
            overrides.image = image;
            let config = overrides.resolve()?;
            let state = ViewState {
                show_survived: !hide_survived,
                show_erased: !hide_erased,
                threshold,
            };
            let svg = render(config, state)?;
            fs::write(&out, svg)?;
            info!(out = %out.display(), "map written");
        }
        Command::Summary { view } => {
            let config = view.overrides()?.resolve()?;
            let view = load_view(config)?;
            println!("{}", Summary::of(&view));
        }
    }
    Ok(())
}
