//! Rotierender Würfel: ein zellzentriertes Würfelgitter in starrer
//! Rotation um die z-Achse, als Testfall für das P-alpha-Porositätsmodell.
//! Die Dichte in der Tabelle ist die Bulk-Dichte `rho_solid / alpha`.
//!
//! Ausgabe: `particles.0000` (22 Spalten, leerzeichengetrennt) plus
//! Metadaten-Sidecar und SVG-Vorschau.

use impact_prep::prelude::*;
use log::info;
use serde::Serialize;

const CUBE_SIZE: f64 = 1.0;
const CELLS_PER_AXIS: usize = 15;
const SPACING: f64 = CUBE_SIZE / CELLS_PER_AXIS as f64;

// rho_solid muss till_rho_0 in material.cfg entsprechen (Tillotson)
const RHO_SOLID: f64 = 2700.0;
const DISTENTION: f64 = 1.25;
const OMEGA: f64 = 1.0; // rad/s um die z-Achse

// Übliche Wahl für die anfängliche Glättungslänge
const SMOOTHING_FACTOR: f64 = 1.2;

const OUTPUT_BASE: &str = "particles";

#[derive(Debug, Serialize)]
struct ScenarioMetadata {
    scenario: &'static str,
    cube_size: f64,
    spacing: f64,
    rho_solid: f64,
    rho_bulk: f64,
    distention: f64,
    omega: f64,
    smoothing_length: f64,
    columns: usize,
    particle_count: usize,
}

fn run() -> PrepResult<()> {
    let rho_bulk = bulk_density(RHO_SOLID, DISTENTION);
    let h = SMOOTHING_FACTOR * SPACING;

    // Gitter symmetrisch um den Ursprung; die Rotation läuft um die
    // Würfelmitte, das Nettomoment verschwindet damit.
    let grid = cube(CUBE_SIZE, SPACING, Centering::Cell)?;
    let records = ParticleFields::new()
        .with_velocity(VelocityProfile::RigidRotation {
            center: Vec3::zeros(),
            omega: OMEGA,
        })
        .with_mass(particle_mass(rho_bulk, SPACING))
        .with_density(rho_bulk)
        .with_smoothing_length(h)
        .with_distention(DISTENTION)
        .assign(&grid)?;

    let net_momentum = records
        .iter()
        .fold(Vec3::zeros(), |acc, r| acc + r.mass * r.velocity);
    info!(
        "Net momentum: px = {:.2e}, py = {:.2e}, pz = {:.2e}.",
        net_momentum.x, net_momentum.y, net_momentum.z
    );

    let format = TableFormat::new(ColumnLayout::porous());
    let output_file = snapshot_name(OUTPUT_BASE, 0);
    save_particles(&output_file, &records, &format)?;
    preview_records(format!("{output_file}.svg"), &records, Projection::Xy)?;

    let metadata = ScenarioMetadata {
        scenario: "spinning_cube",
        cube_size: CUBE_SIZE,
        spacing: SPACING,
        rho_solid: RHO_SOLID,
        rho_bulk,
        distention: DISTENTION,
        omega: OMEGA,
        smoothing_length: h,
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
        eprintln!("spinning_cube failed: {error}");
        std::process::exit(1);
    }
}
