//! Würfel-Impakt: ein 10-m-Würfel mit poröser Außenschale und festem
//! Kern wird von einem kugelförmigen Projektil aus einem kubischen
//! Gitter getroffen.
//!
//! Ausgabe: `particles.0000` (17 Spalten, leerzeichengetrennt) plus
//! Metadaten-Sidecar und SVG-Vorschau.

use impact_prep::prelude::*;
use log::info;
use serde::Serialize;

const CUBE_SIZE: f64 = 10.0; // Kantenlänge in Metern
const CELLS_PER_AXIS: usize = 20;
const SPACING: f64 = CUBE_SIZE / CELLS_PER_AXIS as f64;

const POROUS_SHELL_THICKNESS: f64 = 3.0;
const DENSITY_SOLID: f64 = 7.68e3; // Eisen
const DENSITY_POROUS: f64 = 2.86e3; // Basalt mit Porosität

const PROJECTILE_RADIUS: f64 = 2.0;
const PROJECTILE_POSITION: [f64; 3] = [0.0, 0.0, 8.0];
const PROJECTILE_VELOCITY: [f64; 3] = [0.0, 0.0, -200.0];

// Materialindizes gemäß material.cfg des Solvers
const MATERIAL_SOLID: MaterialId = 0;
const MATERIAL_POROUS: MaterialId = 1;

const OUTPUT_BASE: &str = "particles";

#[derive(Debug, Serialize)]
struct ScenarioMetadata {
    scenario: &'static str,
    cube_size: f64,
    spacing: f64,
    porous_shell_thickness: f64,
    density_solid: f64,
    density_porous: f64,
    projectile_radius: f64,
    projectile_velocity: [f64; 3],
    columns: usize,
    particle_count: usize,
}

fn run() -> PrepResult<()> {
    // Würfelgitter, aufgeteilt in festen Kern und poröse Schale
    let core_radius = CUBE_SIZE / 2.0 - POROUS_SHELL_THICKNESS;
    let grid = cube(CUBE_SIZE, SPACING, Centering::Cell)?;
    let (core, shell) = grid.partition(|point| point.norm() < core_radius);
    info!(
        "Cube grid: {} core particle(s), {} shell particle(s).",
        core.len(),
        shell.len()
    );

    let solid_fields = ParticleFields::new()
        .with_mass(particle_mass(DENSITY_SOLID, SPACING))
        .with_density(DENSITY_SOLID)
        .with_material(MATERIAL_SOLID);
    let porous_fields = ParticleFields::new()
        .with_mass(particle_mass(DENSITY_POROUS, SPACING))
        .with_density(DENSITY_POROUS)
        .with_material(MATERIAL_POROUS);

    let mut records = solid_fields.clone().assign(&core)?;
    records.extend(porous_fields.assign(&shell)?);

    // Projektil: Kugel aus dem gleichen Gitterabstand, verschoben auf
    // die Startposition
    let projectile = ball_cubic(PROJECTILE_RADIUS, SPACING)?
        .translated(Vec3::from(PROJECTILE_POSITION));
    info!("Projectile: {} particle(s).", projectile.len());
    records.extend(
        solid_fields
            .with_uniform_velocity(Vec3::from(PROJECTILE_VELOCITY))
            .assign(&projectile)?,
    );

    let format = TableFormat::new(ColumnLayout::minimal());
    let output_file = snapshot_name(OUTPUT_BASE, 0);
    save_particles(&output_file, &records, &format)?;
    preview_records(format!("{output_file}.svg"), &records, Projection::Xz)?;

    let metadata = ScenarioMetadata {
        scenario: "cube_impact",
        cube_size: CUBE_SIZE,
        spacing: SPACING,
        porous_shell_thickness: POROUS_SHELL_THICKNESS,
        density_solid: DENSITY_SOLID,
        density_porous: DENSITY_POROUS,
        projectile_radius: PROJECTILE_RADIUS,
        projectile_velocity: PROJECTILE_VELOCITY,
        columns: format.layout.width(),
        particle_count: records.len(),
    };
    let sidecar = std::fs::File::create(format!("{output_file}.meta.json"))?;
    serde_json::to_writer_pretty(sidecar, &metadata)?;
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(error) = run() {
        eprintln!("cube_impact failed: {error}");
        std::process::exit(1);
    }
}
