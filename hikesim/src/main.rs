mod options;
mod sim;

use anyhow::{ensure, Error as AnyError};
use clap::Parser;
use itertools::Itertools;
use log::info;
use options::{Cli, Command as CliCmd};
use serde::Serialize;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};
use terrain::{Fusion, HeightGrid, Mesh, Texture};
use textplots::{Chart, Plot, Shape};
use trail::{glam::Vec3, HikeStats, Hiker, HikerSpeed};

fn main() -> Result<(), AnyError> {
    let Cli {
        track: track_path,
        heightmap,
        texture,
        scale,
        height_scale,
        horizontal_scale,
        terrain_height_scale,
        influence_radius,
        center,
        last_wins,
        speed,
        fps,
        max_seconds,
        cmd,
    } = Cli::parse();

    env_logger::init();

    ensure!(fps.is_finite() && fps > 0.0, "fps must be positive, got {fps}");

    let raw = track::load(&track_path)?;
    let local = track::Normalizer::default()
        .scale(scale)
        .height_scale(height_scale)
        .normalize(&raw)?;
    info!(
        "{} trail points, origin: {:?}",
        local.points().len(),
        local.origin()
    );

    let grid = HeightGrid::load(&heightmap)?;
    let texture = texture.map(Texture::load).transpose()?;
    let mesh = Mesh::builder()
        .trail(local.points())
        .horizontal_scale(horizontal_scale)
        .height_scale(terrain_height_scale)
        .influence_radius(influence_radius)
        .center(center)
        .fusion(if last_wins {
            Fusion::LastWins
        } else {
            Fusion::Nearest
        })
        .build(&grid)?;

    let mut hiker = Hiker::new(local.points(), HikerSpeed::new(speed))?;

    match cmd {
        CliCmd::Csv => print_csv(&mut hiker, fps, max_seconds)?,
        CliCmd::Json => {
            let mut samples = Vec::new();
            let steps = sim::run(&mut hiker, fps, max_seconds, |sample| samples.push(sample));
            print_json(&hiker, steps, &samples, &mesh, texture.as_ref())?;
        }
        CliCmd::Plot => plot_ascii(local.points()),
        CliCmd::Obj { out } => write_obj(&mesh, &out)?,
    };
    Ok(())
}

/// # Example with gnuplot
///
/// ```sh
/// cargo run -- --track=data/tracks/ridge_loop.gpx --heightmap=heightmap.png csv | tr ',' ' ' > ~/.tmp/hike && gnuplot -p -e "plot '~/.tmp/hike' using 1:6 with lines"
/// ```
fn print_csv(hiker: &mut Hiker<'_>, fps: f32, max_seconds: f32) -> Result<(), AnyError> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "time,x,y,z,elevation,distance,completion")?;
    let mut result = Ok(());
    sim::run(hiker, fps, max_seconds, |sample| {
        if result.is_ok() {
            let sim::Sample {
                time,
                x,
                y,
                z,
                elevation,
                distance,
                completion,
            } = sample;
            result = writeln!(
                stdout,
                "{time},{x},{y},{z},{elevation},{distance},{completion}"
            );
        }
    });
    Ok(result?)
}

fn print_json(
    hiker: &Hiker<'_>,
    steps: u64,
    samples: &[sim::Sample],
    mesh: &Mesh,
    texture: Option<&Texture>,
) -> Result<(), AnyError> {
    #[derive(Serialize)]
    struct MeshSummary {
        vertices: usize,
        triangles: usize,
        min: Option<[f32; 3]>,
        max: Option<[f32; 3]>,
    }

    #[derive(Serialize)]
    struct TextureSummary {
        width: u32,
        height: u32,
        format: String,
    }

    #[derive(Serialize)]
    struct Report<'a> {
        steps: u64,
        completed: bool,
        position: [f32; 3],
        stats: HikeStats,
        samples: &'a [sim::Sample],
        mesh: MeshSummary,
        texture: Option<TextureSummary>,
    }

    let bounds = mesh.bounds();
    let report = Report {
        steps,
        completed: hiker.is_completed(),
        position: hiker.position().to_array(),
        stats: hiker.stats(),
        samples,
        mesh: MeshSummary {
            vertices: mesh.vertices().len(),
            triangles: mesh.triangle_count(),
            min: bounds.map(|(min, _)| min.to_array()),
            max: bounds.map(|(_, max)| max.to_array()),
        },
        texture: texture.map(|texture| TextureSummary {
            width: texture.width(),
            height: texture.height(),
            format: format!("{:?}", texture.format()),
        }),
    };
    let json = serde_json::to_string(&report)?;
    println!("{json}");
    Ok(())
}

/// Plots trail height against distance walked.
fn plot_ascii(points: &[Vec3]) {
    let plot_data: Vec<(f32, f32)> = points
        .first()
        .map(|first| (0.0, first.y))
        .into_iter()
        .chain(
            points
                .iter()
                .tuple_windows()
                .scan(0.0, |distance, (a, b)| {
                    *distance += a.distance(*b);
                    Some((*distance, b.y))
                }),
        )
        .collect();
    let total = plot_data.last().map_or(0.0, |(distance, _)| *distance);
    Chart::new(300, 150, 0.0, total.max(1.0))
        .lineplot(&Shape::Lines(&plot_data))
        .display();
}

fn write_obj(mesh: &Mesh, out: &Path) -> Result<(), AnyError> {
    let mut writer = BufWriter::new(File::create(out)?);
    mesh.write_obj(&mut writer)?;
    writer.flush()?;
    info!(
        "wrote {} vertices, {} triangles to {out:?}",
        mesh.vertices().len(),
        mesh.triangle_count()
    );
    Ok(())
}
