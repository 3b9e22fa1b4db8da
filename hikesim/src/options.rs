use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Walk a recorded GPX track across a heightmap terrain.
#[derive(Parser, Debug, Clone)]
pub struct Cli {
    /// GPX track to walk.
    #[arg(short, long)]
    pub track: PathBuf,

    /// Grayscale heightmap raster.
    #[arg(long)]
    pub heightmap: PathBuf,

    /// RGB or RGBA surface texture.
    #[arg(long)]
    pub texture: Option<PathBuf>,

    /// Local units per degree of latitude and longitude.
    #[arg(long, default_value_t = track::DEFAULT_SCALE)]
    pub scale: f64,

    /// Local units per meter of track elevation.
    #[arg(long, default_value_t = track::DEFAULT_HEIGHT_SCALE)]
    pub height_scale: f64,

    /// Distance between neighboring heightmap samples.
    #[arg(long, default_value_t = terrain::DEFAULT_HORIZONTAL_SCALE)]
    pub horizontal_scale: f32,

    /// Height of a full-white heightmap sample.
    #[arg(long, default_value_t = terrain::DEFAULT_HEIGHT_SCALE)]
    pub terrain_height_scale: f32,

    /// Planar distance within which the trail overrides terrain height.
    #[arg(long, default_value_t = terrain::DEFAULT_INFLUENCE_RADIUS)]
    pub influence_radius: f32,

    /// Center the terrain on the origin.
    #[arg(long, default_value_t = false)]
    pub center: bool,

    /// Let the latest trail point win instead of the nearest.
    #[arg(long, default_value_t = false)]
    pub last_wins: bool,

    /// Hiker speed, in local units per second.
    #[arg(short, long, default_value_t = trail::HikerSpeed::DEFAULT)]
    pub speed: f32,

    /// Simulation steps per second.
    #[arg(long, default_value_t = 60.0)]
    pub fps: f32,

    /// Stop after this many simulated seconds.
    #[arg(long, default_value_t = 3600.0)]
    pub max_seconds: f32,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print the hiker's position once per simulated second.
    Csv,

    /// Print final hike statistics and a mesh summary.
    Json,

    /// Plot the trail's elevation profile to terminal.
    Plot,

    /// Write the trail-fused terrain mesh as Wavefront OBJ.
    Obj {
        /// Output file.
        #[arg(short, long)]
        out: PathBuf,
    },
}
