/// Offline garden baker: writes a composed garden to disk
use indicatif::{ProgressBar, ProgressStyle};
use point_cloud_generator::bounds::PointCloudBounds;
use point_cloud_generator::{GardenKind, GardenPlan, PointCloudBuffer};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct BakeMetadata {
    composition: GardenKind,
    density: f32,
    point_count: usize,
    capacity: usize,
    requested_points: usize,
    bounds: PointCloudBounds,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 || args.len() > 4 {
        eprintln!("Usage: {} <master|hybrid> <output_stem> [density]", args[0]);
        std::process::exit(1);
    }

    let kind = GardenKind::from_name(&args[1])
        .ok_or_else(|| format!("Unknown garden composition: {}", args[1]))?;
    let output_stem = PathBuf::from(&args[2]);
    let density = match args.get(3) {
        Some(value) => value.parse::<f32>()?,
        None => 1.0,
    };

    let mut rng = ChaCha8Rng::from_entropy();
    let plan = GardenPlan::new(kind, density, &mut rng);

    println!(
        "Baking {:?} garden: {} generator calls, {} requested points, capacity {}",
        kind,
        plan.requests.len(),
        plan.requested_points(),
        plan.capacity
    );

    let buffer = bake_with_progress(&plan, &mut rng)?;
    write_points(&output_stem, &buffer)?;
    write_metadata(&output_stem, &plan, density, &buffer)?;

    println!("Bake complete: {} points", buffer.len());
    Ok(())
}

fn bake_with_progress(
    plan: &GardenPlan,
    rng: &mut ChaCha8Rng,
) -> Result<PointCloudBuffer, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(plan.capacity as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40.green/blue}] {pos}/{len} points ({percent}%) {msg}")?
            .progress_chars("▉▊▋▌▍▎▏ "),
    );

    let buffer = plan.bake(rng, |request, cursor| {
        pb.set_message(request.label());
        pb.set_position(cursor as u64);
    });

    pb.finish_with_message("Garden generated");
    Ok(buffer)
}

/// Little-endian f32 positions for every point, then colours in the same order.
fn write_points(stem: &Path, buffer: &PointCloudBuffer) -> Result<(), Box<dyn std::error::Error>> {
    let path = stem.with_extension("points.bin");
    let mut writer = BufWriter::new(File::create(&path)?);

    for value in buffer.positions().iter().chain(buffer.colors()).flatten() {
        writer.write_all(&value.to_le_bytes())?;
    }
    writer.flush()?;

    println!("Wrote {}", path.display());
    Ok(())
}

fn write_metadata(
    stem: &Path,
    plan: &GardenPlan,
    density: f32,
    buffer: &PointCloudBuffer,
) -> Result<(), Box<dyn std::error::Error>> {
    let file_name = format!(
        "{}_metadata.json",
        stem.file_name().unwrap_or_default().to_string_lossy()
    );
    let path = stem.with_file_name(file_name);

    let metadata = BakeMetadata {
        composition: plan.kind,
        density,
        point_count: buffer.len(),
        capacity: plan.capacity,
        requested_points: plan.requested_points(),
        bounds: PointCloudBounds::from_points(buffer.positions()),
    };

    std::fs::write(&path, serde_json::to_string_pretty(&metadata)?)?;
    println!("Wrote {}", path.display());
    Ok(())
}
