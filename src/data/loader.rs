use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use super::error::{DataError, LoadError, SchemaError};
use super::model::{Field, Meteorite, MeteoriteTable};

/// Column separator of the published dataset.
pub const DELIMITER: u8 = b';';

/// Cell contents treated as missing, on top of blank cells.
const NA_TOKENS: &[&str] = &[
    "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "#N/A", "<NA>",
    "#NA", "-1.#IND", "1.#QNAN", "-1.#QNAN", "1.#IND",
];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and clean a `;`-separated meteorite file.
pub fn load_file(path: &Path) -> Result<MeteoriteTable, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = load_reader(file)?;
    log::info!(
        "Loaded {} meteorites from {}",
        table.len(),
        path.display()
    );
    Ok(table)
}

/// Load and clean a table from any reader.
///
/// Rows missing a year, mass or country are dropped. Retained rows must carry
/// valid numbers in every numeric field that is present.
pub fn load_reader<R: Read>(reader: R) -> Result<MeteoriteTable, LoadError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let layout = ColumnLayout::from_headers(reader.headers()?)?;
    log::debug!("Resolved column layout: {:?}", layout.positions);

    let mut rows = Vec::new();
    let mut dropped = 0usize;

    for (i, result) in reader.records().enumerate() {
        let record = result?;
        match layout.clean_row(&record, i + 1)? {
            Some(m) => rows.push(m),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        log::info!("Dropped {dropped} rows missing a year, mass or country");
    }
    Ok(MeteoriteTable::from_rows(rows))
}

// ---------------------------------------------------------------------------
// Header mapping
// ---------------------------------------------------------------------------

/// Position of each known field in the source header.
#[derive(Debug)]
struct ColumnLayout {
    positions: BTreeMap<Field, usize>,
}

impl ColumnLayout {
    fn from_headers(headers: &StringRecord) -> Result<Self, SchemaError> {
        let mut positions = BTreeMap::new();
        for (idx, raw) in headers.iter().enumerate() {
            let header = raw.trim_start_matches('\u{feff}').trim();
            let Some(field) = Field::from_header(header) else {
                continue;
            };
            if let Some(&first) = positions.get(&field) {
                return Err(SchemaError::DuplicateColumn {
                    field,
                    first,
                    second: idx,
                });
            }
            positions.insert(field, idx);
        }

        if let Some(field) = Field::REQUIRED
            .into_iter()
            .find(|f| !positions.contains_key(f))
        {
            return Err(SchemaError::MissingColumn { field });
        }
        Ok(ColumnLayout { positions })
    }

    /// Cell for `field`, or `None` when the column is absent or the value missing.
    fn cell<'r>(&self, record: &'r StringRecord, field: Field) -> Option<&'r str> {
        let idx = *self.positions.get(&field)?;
        let value = record.get(idx)?.trim();
        (!is_missing(value)).then_some(value)
    }

    /// Turn a record into a [`Meteorite`], or `None` if it must be dropped.
    fn clean_row(&self, record: &StringRecord, row: usize) -> Result<Option<Meteorite>, DataError> {
        let (Some(year), Some(mass), Some(country)) = (
            self.cell(record, Field::Year),
            self.cell(record, Field::Mass),
            self.cell(record, Field::Country),
        ) else {
            return Ok(None);
        };

        let lat = self
            .cell(record, Field::Lat)
            .map(|v| parse_real(v, row, Field::Lat))
            .transpose()?;
        let lon = self
            .cell(record, Field::Lon)
            .map(|v| parse_real(v, row, Field::Lon))
            .transpose()?;

        Ok(Some(Meteorite {
            name: self.cell(record, Field::Name).map(str::to_string),
            year_num: parse_year(year, row)?,
            country: country.to_string(),
            class: self.cell(record, Field::Class).map(str::to_string),
            mass_g: parse_real(mass, row, Field::Mass)?,
            lat,
            lon,
        }))
    }
}

// ---------------------------------------------------------------------------
// Cell parsing
// ---------------------------------------------------------------------------

fn is_missing(value: &str) -> bool {
    value.is_empty() || NA_TOKENS.contains(&value)
}

fn parse_real(value: &str, row: usize, field: Field) -> Result<f64, DataError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DataError {
            row,
            field,
            value: value.to_string(),
        })
}

/// Years arrive either as integers or as integral decimals ("1880.0").
fn parse_year(value: &str, row: usize) -> Result<i32, DataError> {
    if let Ok(year) = value.parse::<i32>() {
        return Ok(year);
    }
    let err = || DataError {
        row,
        field: Field::Year,
        value: value.to_string(),
    };
    let as_float = value.parse::<f64>().map_err(|_| err())?;
    if as_float.fract() != 0.0 || as_float < i32::MIN as f64 || as_float > i32::MAX as f64 {
        return Err(err());
    }
    Ok(as_float as i32)
}
