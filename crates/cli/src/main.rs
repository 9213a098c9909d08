use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use geocompare::app::Controller;
use geocompare::geo::{LatLng, WebMercator};
use geocompare::measure;
use geocompare::share;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod doc;

use doc::{FrameDoc, ModeArg, StateDoc, UnitsArg};

#[derive(Parser)]
#[command(name = "geocompare")]
#[command(about = "Compare one shape across two maps", version = geocompare::VERSION)]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Print the share link for a JSON state file
    Encode {
        #[arg(long)]
        state: PathBuf,
    },
    /// Print the state carried by a share link as JSON
    Decode { link: String },
    /// Measure a point sequence given as repeated --point lat,lng
    Measure {
        #[arg(long, value_enum, default_value_t = ModeArg::Line)]
        mode: ModeArg,
        #[arg(long, value_enum, default_value_t = UnitsArg::Metric)]
        units: UnitsArg,
        #[arg(long = "point", value_parser = doc::parse_lat_lng)]
        points: Vec<LatLng>,
    },
    /// Render both maps for a JSON state file
    Render {
        #[arg(long)]
        state: PathBuf,
        /// Write the frame here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Encode { state } => encode(state),
        Action::Decode { link } => decode(link),
        Action::Measure {
            mode,
            units,
            points,
        } => measure_points(mode, units, &points),
        Action::Render { state, out } => render(state, out),
    }
}

fn encode(path: PathBuf) -> Result<()> {
    tracing::info!(state = %path.display(), "encode");
    let state = doc::read_state(&path)?;
    let link = share::encode(&state).context("encoding state")?;
    println!("{link}");
    Ok(())
}

fn decode(link: String) -> Result<()> {
    tracing::info!(len = link.len(), "decode");
    let state = share::decode(&link).context("decoding share link")?;
    println!(
        "{}",
        serde_json::to_string_pretty(&StateDoc::from_state(&state))?
    );
    Ok(())
}

fn measure_points(mode: ModeArg, units: UnitsArg, points: &[LatLng]) -> Result<()> {
    tracing::info!(?mode, ?units, points = points.len(), "measure");
    let value = measure::value(mode.into(), points);
    let out = serde_json::json!({
        "value": value,
        "label": measure::format(value, mode.into(), units.into()),
        "planar_valid": measure::is_planar_valid(points),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn render(path: PathBuf, out: Option<PathBuf>) -> Result<()> {
    tracing::info!(state = %path.display(), out = ?out, "render");
    let state = doc::read_state(&path)?;
    let frame = Controller::new(WebMercator, state).frame();
    let doc = FrameDoc::from_frame(&frame);
    match out {
        Some(out) => doc::write_json(&out, &doc)?,
        None => println!("{}", serde_json::to_string_pretty(&doc)?),
    }
    Ok(())
}
