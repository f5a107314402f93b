use crate::error::{PrepError, PrepResult};
use crate::particle::{ColumnLayout, ParticleRecord};
use log::info;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Ausgabeformat einer Partikeltabelle: Spalten-Layout, Trennzeichen
/// und Mantissenstellen der wissenschaftlichen Notation.
#[derive(Debug, Clone)]
pub struct TableFormat {
    pub layout: ColumnLayout,
    pub delimiter: char,
    pub precision: usize,
}

impl TableFormat {
    /// Format mit Leerzeichen als Trenner und sechs Mantissenstellen.
    pub fn new(layout: ColumnLayout) -> Self {
        Self {
            layout,
            delimiter: ' ',
            precision: 6,
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }
}

/// Formatiert wie C-`printf("%.*e")`: Vorzeichen im Exponenten und
/// mindestens zwei Exponentenstellen, z. B. `2.700000e+03`.
fn format_scientific(value: f64, precision: usize) -> String {
    let plain = format!("{value:.precision$e}");
    match plain.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => plain,
    }
}

/// Schreibt Records zeilenweise in das gegebene Format.
///
/// Jede Zeile enthält genau die Spalten des Layouts in dessen
/// Reihenfolge; die Materialspalte wird als ganze Zahl ausgegeben.
pub fn write_particles<W: Write>(
    writer: &mut W,
    records: &[ParticleRecord],
    format: &TableFormat,
) -> PrepResult<()> {
    for record in records {
        for (index, column) in format.layout.columns().iter().enumerate() {
            if index > 0 {
                write!(writer, "{}", format.delimiter)?;
            }
            let value = column.extract(record);
            if column.is_integer() {
                write!(writer, "{}", value as i64)?;
            } else {
                write!(writer, "{}", format_scientific(value, format.precision))?;
            }
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Schreibt Records in eine Datei (siehe [`write_particles`]).
pub fn save_particles<P: AsRef<Path>>(
    path: P,
    records: &[ParticleRecord],
    format: &TableFormat,
) -> PrepResult<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_particles(&mut writer, records, format)?;
    writer.flush()?;
    info!("Wrote {} particle(s) to '{}'.", records.len(), path.display());
    Ok(())
}

fn parse_record(line: &str, layout: &ColumnLayout, line_number: usize) -> PrepResult<ParticleRecord> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != layout.width() {
        return Err(PrepError::MalformedRecord {
            line: line_number,
            message: format!(
                "expected {} columns, found {}",
                layout.width(),
                fields.len()
            ),
        });
    }
    let mut record = ParticleRecord::default();
    for (column, field) in layout.columns().iter().zip(&fields) {
        let value: f64 = field.parse().map_err(|_| PrepError::MalformedRecord {
            line: line_number,
            message: format!("column '{}': cannot parse '{}' as a number", column.name(), field),
        })?;
        column.store(&mut record, value);
    }
    Ok(record)
}

fn is_data_line(line: &str) -> bool {
    !line.is_empty() && !line.starts_with('#')
}

/// Liest Records aus einer Tabelle im gegebenen Layout.
///
/// Leerzeilen und `#`-Kommentarzeilen werden übersprungen; Felder
/// dürfen durch beliebigen Whitespace getrennt sein. Zeilen mit
/// falscher Spaltenzahl oder unlesbaren Zahlen brechen mit
/// [`PrepError::MalformedRecord`] ab.
pub fn read_particles<R: BufRead>(reader: R, layout: &ColumnLayout) -> PrepResult<Vec<ParticleRecord>> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if is_data_line(trimmed) {
            records.push(parse_record(trimmed, layout, index + 1)?);
        }
    }
    Ok(records)
}

/// Liest Records aus einer Datei (siehe [`read_particles`]).
pub fn load_particles<P: AsRef<Path>>(
    path: P,
    layout: &ColumnLayout,
) -> PrepResult<Vec<ParticleRecord>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let records = read_particles(reader, layout)?;
    info!(
        "Loaded {} particle(s) from '{}'.",
        records.len(),
        path.display()
    );
    Ok(records)
}

/// Liest eine Tabelle und erkennt das Layout an der Spaltenzahl der
/// ersten Datenzeile (siehe [`ColumnLayout::detect`]).
pub fn load_particles_auto<P: AsRef<Path>>(
    path: P,
) -> PrepResult<(Vec<ParticleRecord>, ColumnLayout)> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let lines = reader.lines().collect::<Result<Vec<String>, _>>()?;

    let first_data = lines
        .iter()
        .enumerate()
        .map(|(index, line)| (index, line.trim()))
        .find(|(_, line)| is_data_line(line));
    let Some((first_index, first_line)) = first_data else {
        return Err(PrepError::MalformedRecord {
            line: 0,
            message: format!("'{}' contains no data lines", path.display()),
        });
    };

    let width = first_line.split_whitespace().count();
    let layout = ColumnLayout::detect(width).ok_or_else(|| PrepError::MalformedRecord {
        line: first_index + 1,
        message: format!("no known layout with {width} columns"),
    })?;

    let mut records = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if is_data_line(trimmed) {
            records.push(parse_record(trimmed, &layout, index + 1)?);
        }
    }
    info!(
        "Loaded {} particle(s) from '{}' ({} columns).",
        records.len(),
        path.display(),
        layout.width()
    );
    Ok((records, layout))
}

/// Dateiname eines Snapshots: `<basis>.<index>` mit vierstelligem,
/// nullgepolstertem Index.
pub fn snapshot_name(base: &str, index: usize) -> String {
    format!("{base}.{index:04}")
}

/// Liest den Snapshot-Index aus einem Dateinamen; akzeptiert auch die
/// `.h5`-Varianten des Solvers (`particles.0042.h5`).
pub fn parse_snapshot_index(file_name: &str, base: &str) -> Option<usize> {
    let rest = file_name.strip_prefix(base)?.strip_prefix('.')?;
    let digits = rest.strip_suffix(".h5").unwrap_or(rest);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Sucht im Verzeichnis den Snapshot mit dem höchsten Index.
pub fn latest_snapshot(dir: &Path, base: &str) -> PrepResult<Option<PathBuf>> {
    let mut best: Option<(usize, PathBuf)> = None;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        let Some(index) = parse_snapshot_index(name, base) else {
            continue;
        };
        if best.as_ref().is_none_or(|(top, _)| index >= *top) {
            best = Some((index, entry.path()));
        }
    }
    Ok(best.map(|(_, path)| path))
}
