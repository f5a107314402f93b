use crate::Vec3;
use crate::error::{PrepError, PrepResult};

/// Materialkennung, wie sie der Solver in `material.cfg` indiziert.
pub type MaterialId = u32;

/// Vollständiger Eigenschaftssatz eines SPH-Partikels.
///
/// Der Record führt die Vereinigung aller Spalten, die die
/// unterstützten Tabellen-Layouts kennen; ein Layout projiziert beim
/// Schreiben nur die Spalten heraus, die es benennt. Nicht gesetzte
/// Felder sind 0.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleRecord {
    pub position: Vec3,
    pub velocity: Vec3,
    pub mass: f64,
    pub density: f64,
    /// Spezifische innere Energie, J/kg.
    pub energy: f64,
    pub smoothing_length: f64,
    pub material: MaterialId,
    /// Deviatorischer Spannungstensor, zeilenweise (S00, S01, ..., S22).
    pub stress: [f64; 9],
    pub damage: f64,
    pub pressure: f64,
    /// Distention alpha des P-alpha-Porositätsmodells.
    pub distention: f64,
    /// Aktivierungsenergie des schwächsten Flaws, J/kg.
    pub flaw_activation_energy: f64,
}

impl ParticleRecord {
    /// Record an der gegebenen Position, alle übrigen Felder 0.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::zeros(),
            mass: 0.0,
            density: 0.0,
            energy: 0.0,
            smoothing_length: 0.0,
            material: 0,
            stress: [0.0; 9],
            damage: 0.0,
            pressure: 0.0,
            distention: 0.0,
            flaw_activation_energy: 0.0,
        }
    }
}

impl Default for ParticleRecord {
    fn default() -> Self {
        Self::at(Vec3::zeros())
    }
}

/// Eine benannte Spalte einer Partikeltabelle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    X,
    Y,
    Z,
    VelocityX,
    VelocityY,
    VelocityZ,
    Mass,
    Density,
    Energy,
    SmoothingLength,
    Material,
    /// Komponente des Spannungstensors, Index 0..9 (zeilenweise).
    Stress(usize),
    Damage,
    Pressure,
    Distention,
    FlawActivationEnergy,
}

impl Column {
    /// Kurzname der Spalte für Fehlermeldungen und Metadaten.
    pub fn name(&self) -> String {
        match self {
            Column::X => "x".into(),
            Column::Y => "y".into(),
            Column::Z => "z".into(),
            Column::VelocityX => "vx".into(),
            Column::VelocityY => "vy".into(),
            Column::VelocityZ => "vz".into(),
            Column::Mass => "mass".into(),
            Column::Density => "density".into(),
            Column::Energy => "energy".into(),
            Column::SmoothingLength => "h".into(),
            Column::Material => "material_type".into(),
            Column::Stress(index) => format!("s{}{}", index / 3, index % 3),
            Column::Damage => "damage".into(),
            Column::Pressure => "pressure".into(),
            Column::Distention => "alpha".into(),
            Column::FlawActivationEnergy => "flaw_energy".into(),
        }
    }

    /// Liest den Spaltenwert aus einem Record.
    pub fn extract(&self, record: &ParticleRecord) -> f64 {
        match self {
            Column::X => record.position.x,
            Column::Y => record.position.y,
            Column::Z => record.position.z,
            Column::VelocityX => record.velocity.x,
            Column::VelocityY => record.velocity.y,
            Column::VelocityZ => record.velocity.z,
            Column::Mass => record.mass,
            Column::Density => record.density,
            Column::Energy => record.energy,
            Column::SmoothingLength => record.smoothing_length,
            Column::Material => record.material as f64,
            Column::Stress(index) => record.stress[*index],
            Column::Damage => record.damage,
            Column::Pressure => record.pressure,
            Column::Distention => record.distention,
            Column::FlawActivationEnergy => record.flaw_activation_energy,
        }
    }

    /// Schreibt einen eingelesenen Spaltenwert in einen Record.
    pub fn store(&self, record: &mut ParticleRecord, value: f64) {
        match self {
            Column::X => record.position.x = value,
            Column::Y => record.position.y = value,
            Column::Z => record.position.z = value,
            Column::VelocityX => record.velocity.x = value,
            Column::VelocityY => record.velocity.y = value,
            Column::VelocityZ => record.velocity.z = value,
            Column::Mass => record.mass = value,
            Column::Density => record.density = value,
            Column::Energy => record.energy = value,
            Column::SmoothingLength => record.smoothing_length = value,
            Column::Material => record.material = value.round() as MaterialId,
            Column::Stress(index) => record.stress[*index] = value,
            Column::Damage => record.damage = value,
            Column::Pressure => record.pressure = value,
            Column::Distention => record.distention = value,
            Column::FlawActivationEnergy => record.flaw_activation_energy = value,
        }
    }

    /// Spalten, die der Solver als ganze Zahl erwartet.
    pub fn is_integer(&self) -> bool {
        matches!(self, Column::Material)
    }
}

/// Geordnete Spaltenliste einer Partikeltabelle.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    columns: Vec<Column>,
}

impl ColumnLayout {
    pub fn new(columns: Vec<Column>) -> PrepResult<Self> {
        if columns.is_empty() {
            return Err(PrepError::InvalidConfiguration {
                message: "column layout must name at least one column".into(),
            });
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Spaltenzahl des Layouts.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    fn positions() -> [Column; 3] {
        [Column::X, Column::Y, Column::Z]
    }

    fn velocities() -> [Column; 3] {
        [Column::VelocityX, Column::VelocityY, Column::VelocityZ]
    }

    fn stress_block() -> impl Iterator<Item = Column> {
        (0..9).map(Column::Stress)
    }

    /// 17 Spalten: Position, Geschwindigkeit, Masse, Material, Spannung.
    pub fn minimal() -> Self {
        let mut columns = Vec::with_capacity(17);
        columns.extend(Self::positions());
        columns.extend(Self::velocities());
        columns.push(Column::Mass);
        columns.push(Column::Material);
        columns.extend(Self::stress_block());
        Self { columns }
    }

    /// 19 Spalten: wie [`minimal`](Self::minimal) plus Dichte und Energie
    /// (vor der Materialspalte).
    pub fn basic() -> Self {
        let mut columns = Vec::with_capacity(19);
        columns.extend(Self::positions());
        columns.extend(Self::velocities());
        columns.push(Column::Mass);
        columns.push(Column::Density);
        columns.push(Column::Energy);
        columns.push(Column::Material);
        columns.extend(Self::stress_block());
        Self { columns }
    }

    /// 20 Spalten: Standard-Eingabe für nichtporöse Materialien
    /// (zusätzlich Glättungslänge).
    pub fn solid() -> Self {
        let mut columns = Vec::with_capacity(20);
        columns.extend(Self::positions());
        columns.extend(Self::velocities());
        columns.push(Column::Mass);
        columns.push(Column::Density);
        columns.push(Column::Energy);
        columns.push(Column::SmoothingLength);
        columns.push(Column::Material);
        columns.extend(Self::stress_block());
        Self { columns }
    }

    /// 22 Spalten: [`solid`](Self::solid) plus Distention und Druck
    /// (P-alpha-Porosität).
    pub fn porous() -> Self {
        let mut columns = Vec::with_capacity(22);
        columns.extend(Self::solid().columns);
        columns.push(Column::Distention);
        columns.push(Column::Pressure);
        Self { columns }
    }

    /// 24 Spalten: [`solid`](Self::solid) plus Schädigung, Druck,
    /// Distention (Spalte 22, nullbasiert) und Flaw-Aktivierungsenergie.
    pub fn porous_flawed() -> Self {
        let mut columns = Vec::with_capacity(24);
        columns.extend(Self::solid().columns);
        columns.push(Column::Damage);
        columns.push(Column::Pressure);
        columns.push(Column::Distention);
        columns.push(Column::FlawActivationEnergy);
        Self { columns }
    }

    /// Ordnet einer Spaltenzahl das passende Standard-Layout zu.
    pub fn detect(width: usize) -> Option<Self> {
        match width {
            17 => Some(Self::minimal()),
            19 => Some(Self::basic()),
            20 => Some(Self::solid()),
            22 => Some(Self::porous()),
            24 => Some(Self::porous_flawed()),
            _ => None,
        }
    }
}
