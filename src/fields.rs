use crate::Vec3;
use crate::cloud::PointCloud;
use crate::error::{PrepError, PrepResult};
use crate::particle::{MaterialId, ParticleRecord};
use crate::probability::EmpiricalCdf;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

/// Geschwindigkeitsfeld, ausgewertet an der Partikelposition.
#[derive(Debug, Clone, Serialize)]
pub enum VelocityProfile {
    /// Konstante Geschwindigkeit für alle Partikel.
    Uniform(Vec3),
    /// Starre Rotation um die z-Achse durch `center` mit
    /// Winkelgeschwindigkeit `omega` (rad/s).
    RigidRotation { center: Vec3, omega: f64 },
}

impl VelocityProfile {
    pub fn evaluate(&self, position: &Vec3) -> Vec3 {
        match self {
            VelocityProfile::Uniform(velocity) => *velocity,
            VelocityProfile::RigidRotation { center, omega } => {
                let offset = position - center;
                Vec3::new(-omega * offset.y, omega * offset.x, 0.0)
            }
        }
    }
}

impl Default for VelocityProfile {
    fn default() -> Self {
        Self::Uniform(Vec3::zeros())
    }
}

/// Feldbelegung für eine Punktwolke.
///
/// Alle Werte sind SI; nicht gesetzte Felder bleiben 0, nur die
/// Distention startet bei 1 (unverdichtetes Vollmaterial). Die
/// Konfiguration wird vor jeder Zuweisung validiert.
#[derive(Debug, Clone, Serialize)]
pub struct ParticleFields {
    pub velocity: VelocityProfile,
    pub mass: f64,
    pub density: f64,
    pub energy: f64,
    pub smoothing_length: f64,
    pub material: MaterialId,
    pub distention: f64,
}

impl Default for ParticleFields {
    fn default() -> Self {
        Self {
            velocity: VelocityProfile::default(),
            mass: 0.0,
            density: 0.0,
            energy: 0.0,
            smoothing_length: 0.0,
            material: 0,
            distention: 1.0,
        }
    }
}

impl ParticleFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_velocity(mut self, velocity: VelocityProfile) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_uniform_velocity(self, velocity: Vec3) -> Self {
        self.with_velocity(VelocityProfile::Uniform(velocity))
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    pub fn with_energy(mut self, energy: f64) -> Self {
        self.energy = energy;
        self
    }

    pub fn with_smoothing_length(mut self, smoothing_length: f64) -> Self {
        self.smoothing_length = smoothing_length;
        self
    }

    pub fn with_material(mut self, material: MaterialId) -> Self {
        self.material = material;
        self
    }

    pub fn with_distention(mut self, distention: f64) -> Self {
        self.distention = distention;
        self
    }

    /// Prüft die Feldwerte auf physikalische Plausibilität.
    pub fn validate(&self) -> PrepResult<()> {
        for (name, value) in [
            ("mass", self.mass),
            ("density", self.density),
            ("energy", self.energy),
            ("smoothing_length", self.smoothing_length),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PrepError::InvalidConfiguration {
                    message: format!("{name} must be finite and non-negative, got {value}"),
                });
            }
        }
        // P-alpha: alpha = rho_solid / rho_bulk >= 1
        if !self.distention.is_finite() || self.distention < 1.0 {
            return Err(PrepError::InvalidConfiguration {
                message: format!("distention must be >= 1, got {}", self.distention),
            });
        }
        match &self.velocity {
            VelocityProfile::Uniform(velocity) => {
                if !velocity.iter().all(|component| component.is_finite()) {
                    return Err(PrepError::InvalidConfiguration {
                        message: format!("velocity must be finite, got {velocity:?}"),
                    });
                }
            }
            VelocityProfile::RigidRotation { center, omega } => {
                if !omega.is_finite() || !center.iter().all(|component| component.is_finite()) {
                    return Err(PrepError::InvalidConfiguration {
                        message: format!(
                            "rotation must be finite, got center {center:?}, omega {omega}"
                        ),
                    });
                }
            }
        }
        Ok(())
    }

    /// Erzeugt für jeden Punkt der Wolke einen Record mit diesen
    /// Feldern; die Punktreihenfolge bleibt erhalten.
    pub fn assign(&self, cloud: &PointCloud) -> PrepResult<Vec<ParticleRecord>> {
        self.validate()?;
        Ok(cloud.iter().map(|point| self.record_at(point)).collect())
    }

    /// Wie [`assign`](Self::assign), zieht zusätzlich für jeden Record
    /// eine Flaw-Aktivierungsenergie aus dem Sampler.
    pub fn assign_with_flaws(
        &self,
        cloud: &PointCloud,
        flaws: &mut FlawSampler,
    ) -> PrepResult<Vec<ParticleRecord>> {
        self.validate()?;
        Ok(cloud
            .iter()
            .map(|point| {
                let mut record = self.record_at(point);
                record.flaw_activation_energy = flaws.draw();
                record
            })
            .collect())
    }

    fn record_at(&self, point: &Vec3) -> ParticleRecord {
        let mut record = ParticleRecord::at(*point);
        record.velocity = self.velocity.evaluate(point);
        record.mass = self.mass;
        record.density = self.density;
        record.energy = self.energy;
        record.smoothing_length = self.smoothing_length;
        record.material = self.material;
        record.distention = self.distention;
        record
    }
}

/// Zieht Flaw-Aktivierungsenergien aus einer [`EmpiricalCdf`] über
/// die Inversionsmethode.
#[derive(Debug, Clone)]
pub struct FlawSampler {
    cdf: EmpiricalCdf,
    rng: StdRng,
}

impl FlawSampler {
    /// Sampler mit Betriebssystem-Seed.
    pub fn new(cdf: EmpiricalCdf) -> Self {
        Self {
            cdf,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Sampler mit festem Seed für reproduzierbare Szenarien.
    pub fn with_seed(cdf: EmpiricalCdf, seed: u64) -> Self {
        Self {
            cdf,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn draw(&mut self) -> f64 {
        self.cdf.draw(&mut self.rng)
    }

    pub fn cdf(&self) -> &EmpiricalCdf {
        &self.cdf
    }
}

/// Partikelmasse aus Dichte und Gitterabstand (ein Partikel pro
/// Würfelzelle `spacing^3`).
pub fn particle_mass(density: f64, spacing: f64) -> f64 {
    density * spacing.powi(3)
}

/// Glättungslänge, die im Wolkeninneren etwa `interaction_partners`
/// Nachbarn erfasst.
pub fn smoothing_length(spacing: f64, interaction_partners: f64) -> f64 {
    spacing * interaction_partners.cbrt()
}

/// Bulk-Dichte eines porösen Materials aus Matrixdichte und Distention.
pub fn bulk_density(solid_density: f64, distention: f64) -> f64 {
    solid_density / distention
}
