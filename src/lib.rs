//! Erzeugt Anfangsbedingungen für SPH-Impaktrechnungen: Punktwolken
//! (Kugeln, Bälle, Würfel), Feldbelegung inklusive
//! Flaw-Aktivierungsenergien und Serialisierung als Spaltentabelle im
//! Eingabeformat des Solvers.
//!
//! ```
//! use impact_prep::prelude::*;
//!
//! # fn main() -> impact_prep::PrepResult<()> {
//! let cloud = ball(0.10, 0.025)?;
//! let records = ParticleFields::new()
//!     .with_density(2700.0)
//!     .with_mass(particle_mass(2700.0, 0.025))
//!     .assign(&cloud)?;
//!
//! let mut table = Vec::new();
//! write_particles(&mut table, &records, &TableFormat::new(ColumnLayout::solid()))?;
//! # Ok(())
//! # }
//! ```

pub mod cloud;
pub mod distribution;
pub mod error;
pub mod fields;
pub mod particle;
pub mod preview;
pub mod probability;
pub mod table;
pub mod utils;

// Re-exports für einfache Verwendung
pub use error::{PrepError, PrepResult};

/// Dreidimensionaler Vektor in doppelter Genauigkeit.
pub type Vec3 = nalgebra::Vector3<f64>;

// Öffentliche API
pub mod prelude {
    pub use crate::Vec3;
    pub use crate::cloud::PointCloud;
    pub use crate::distribution::{Centering, ball, ball_cubic, ball_hcp, cube, sphere_surface};
    pub use crate::error::{PrepError, PrepResult};
    pub use crate::fields::{
        FlawSampler, ParticleFields, VelocityProfile, bulk_density, particle_mass,
        smoothing_length,
    };
    pub use crate::particle::{Column, ColumnLayout, MaterialId, ParticleRecord};
    pub use crate::preview::{Projection, preview_cloud, preview_records};
    pub use crate::probability::{EmpiricalCdf, impact_flaw_cdf};
    pub use crate::table::{
        TableFormat, latest_snapshot, load_particles, load_particles_auto, parse_snapshot_index,
        read_particles, save_particles, snapshot_name, write_particles,
    };
}
