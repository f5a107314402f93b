//! Zwei-Kugel-Impakt: zwei identische Schalenmethoden-Kugeln, die sich
//! langsam aufeinander zubewegen. Die Flaw-Aktivierungsenergien werden
//! aus der empirischen Impakt-Verteilung gezogen.
//!
//! Ausgabe: `stable_ball.data` (24 Spalten, tabgetrennt) plus
//! Metadaten-Sidecar und SVG-Vorschau.

use impact_prep::prelude::*;
use log::info;
use serde::Serialize;

// Einheiten SI, sofern nicht anders angegeben
const AGGREGATE_RADIUS: f64 = 0.10; // 10 cm
const AGGREGATE_SHIFT: f64 = AGGREGATE_RADIUS * 2.0; // 200% von R Abstand zwischen den Kugeln
const POINT_DISTANCE: f64 = AGGREGATE_RADIUS / 4.0; // ergibt 4 Schalen

// Im Aggregat-Inneren erwartete Wechselwirkungspartner (10% von max = 512)
const NR_INTERACTIONS_NORMAL: f64 = 50.0;

const DISTENTION: f64 = 1.00;
const RHO_0: f64 = 2700.0; // Materialdichte der Monomere
const IMPACT_SPEED: f64 = 1.0; // 100 cm/s, je Kugel

const FLAW_SEED: u64 = 42;
const OUTPUT_FILE: &str = "stable_ball.data";

#[derive(Debug, Serialize)]
struct ScenarioMetadata {
    scenario: &'static str,
    aggregate_radius: f64,
    point_distance: f64,
    smoothing_length: f64,
    particle_density: f64,
    particle_mass: f64,
    distention: f64,
    impact_speed: f64,
    flaw_seed: u64,
    columns: usize,
    particle_count: usize,
}

fn run() -> PrepResult<()> {
    let particle_density = bulk_density(RHO_0, DISTENTION);
    let mass = particle_mass(particle_density, POINT_DISTANCE);
    let h = smoothing_length(POINT_DISTANCE, NR_INTERACTIONS_NORMAL);

    // Geometrie: eine Kugel, zweimal verschoben
    let ball_template = ball(AGGREGATE_RADIUS, POINT_DISTANCE)?;
    let left = ball_template
        .clone()
        .translated(Vec3::new(-AGGREGATE_SHIFT, 0.0, 0.0));
    let right = ball_template.translated(Vec3::new(AGGREGATE_SHIFT, 0.0, 0.0));
    info!("Generated two balls with {} particles total.", left.len() + right.len());

    // Feldbelegung: gleiche Felder, entgegengesetzte Geschwindigkeit
    let fields = ParticleFields::new()
        .with_mass(mass)
        .with_density(particle_density)
        .with_smoothing_length(h)
        .with_distention(DISTENTION);
    let mut flaws = FlawSampler::with_seed(impact_flaw_cdf()?, FLAW_SEED);

    let mut records = fields
        .clone()
        .with_uniform_velocity(Vec3::new(IMPACT_SPEED, 0.0, 0.0))
        .assign_with_flaws(&left, &mut flaws)?;
    records.extend(
        fields
            .with_uniform_velocity(Vec3::new(-IMPACT_SPEED, 0.0, 0.0))
            .assign_with_flaws(&right, &mut flaws)?,
    );

    let format = TableFormat::new(ColumnLayout::porous_flawed()).with_delimiter('\t');
    save_particles(OUTPUT_FILE, &records, &format)?;
    preview_records(format!("{OUTPUT_FILE}.svg"), &records, Projection::Xy)?;

    let metadata = ScenarioMetadata {
        scenario: "balls_impact",
        aggregate_radius: AGGREGATE_RADIUS,
        point_distance: POINT_DISTANCE,
        smoothing_length: h,
        particle_density,
        particle_mass: mass,
        distention: DISTENTION,
        impact_speed: IMPACT_SPEED,
        flaw_seed: FLAW_SEED,
        columns: format.layout.width(),
        particle_count: records.len(),
    };
    let sidecar = std::fs::File::create(format!("{OUTPUT_FILE}.meta.json"))?;
    serde_json::to_writer_pretty(sidecar, &metadata)?;
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(error) = run() {
        eprintln!("balls_impact failed: {error}");
        std::process::exit(1);
    }
}
