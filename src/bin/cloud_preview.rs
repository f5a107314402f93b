//! Vorschau des jüngsten Partikel-Snapshots im Arbeitsverzeichnis:
//! sucht die `particles.NNNN`-Tabelle mit dem höchsten Index, erkennt
//! das Spalten-Layout an der Spaltenzahl und rendert eine nach Dichte
//! eingefärbte SVG-Projektion.

use impact_prep::prelude::*;
use log::info;
use std::path::Path;

const SNAPSHOT_BASE: &str = "particles";

fn run() -> PrepResult<()> {
    let directory = Path::new(".");
    let Some(snapshot) = latest_snapshot(directory, SNAPSHOT_BASE)? else {
        return Err(PrepError::InvalidConfiguration {
            message: format!(
                "no '{SNAPSHOT_BASE}.NNNN' snapshot found in '{}'",
                directory.display()
            ),
        });
    };
    // Die HDF5-Snapshots des Solvers liest die externe Plot-Pipeline;
    // hier werden nur die ASCII-Tabellen dargestellt.
    if snapshot.extension().is_some_and(|ext| ext == "h5") {
        return Err(PrepError::InvalidConfiguration {
            message: format!(
                "latest snapshot '{}' is an HDF5 file; only ASCII tables can be previewed",
                snapshot.display()
            ),
        });
    }

    let (records, layout) = load_particles_auto(&snapshot)?;
    info!(
        "Previewing '{}': {} particle(s), {} columns.",
        snapshot.display(),
        records.len(),
        layout.width()
    );

    let output = format!("{}.svg", snapshot.display());
    preview_records(&output, &records, Projection::Xy)?;
    println!("Preview written to '{output}'.");
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(error) = run() {
        eprintln!("cloud_preview failed: {error}");
        std::process::exit(1);
    }
}
