use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Field – canonical column names of the cleaned table
// ---------------------------------------------------------------------------

/// A canonical column of the meteorite table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Year,
    Country,
    Class,
    Mass,
    Lat,
    Lon,
}

impl Field {
    /// All fields in source-file order.
    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::Year,
        Field::Country,
        Field::Class,
        Field::Mass,
        Field::Lat,
        Field::Lon,
    ];

    /// Fields a row must carry to survive cleaning.
    pub const REQUIRED: [Field; 3] = [Field::Year, Field::Mass, Field::Country];

    /// Canonical (snake_case) column name.
    pub fn canonical(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Year => "year_num",
            Field::Country => "country",
            Field::Class => "class",
            Field::Mass => "mass_g",
            Field::Lat => "lat",
            Field::Lon => "lon",
        }
    }

    /// Bilingual header label used by the published dataset.
    pub fn source_label(self) -> &'static str {
        match self {
            Field::Name => "Name / Nom",
            Field::Year => "Year / Année",
            Field::Country => "Country / Pays",
            Field::Class => "Class / Classe",
            Field::Mass => "Mass (g) / Masse (g)",
            Field::Lat => "Latitude",
            Field::Lon => "Longitude",
        }
    }

    /// Resolve a header cell to a field. Accepts the bilingual label or the
    /// canonical name.
    pub fn from_header(header: &str) -> Option<Field> {
        Field::ALL
            .into_iter()
            .find(|f| f.source_label() == header || f.canonical() == header)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical())
    }
}

// ---------------------------------------------------------------------------
// Meteorite – one row of the cleaned table
// ---------------------------------------------------------------------------

/// A single meteorite landing that survived cleaning.
#[derive(Debug, Clone, PartialEq)]
pub struct Meteorite {
    pub name: Option<String>,
    pub year_num: i32,
    pub country: String,
    pub class: Option<String>,
    /// Mass in grams, always finite.
    pub mass_g: f64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

// ---------------------------------------------------------------------------
// MeteoriteTable – the cleaned, immutable dataset
// ---------------------------------------------------------------------------

/// The cleaned dataset. Rows cannot be mutated once the table is built.
#[derive(Debug, Clone, Default)]
pub struct MeteoriteTable {
    rows: Vec<Meteorite>,
    year_span: Option<(i32, i32)>,
    mass_span: Option<(f64, f64)>,
}

impl MeteoriteTable {
    /// Build the table and its summary spans from cleaned rows.
    pub fn from_rows(rows: Vec<Meteorite>) -> Self {
        let year_span = rows.iter().fold(None, |span, m| match span {
            None => Some((m.year_num, m.year_num)),
            Some((lo, hi)) => Some((m.year_num.min(lo), m.year_num.max(hi))),
        });
        let mass_span = rows.iter().fold(None, |span, m| match span {
            None => Some((m.mass_g, m.mass_g)),
            Some((lo, hi)) => Some((m.mass_g.min(lo), m.mass_g.max(hi))),
        });
        MeteoriteTable {
            rows,
            year_span,
            mass_span,
        }
    }

    pub fn rows(&self) -> &[Meteorite] {
        &self.rows
    }

    /// Number of meteorites.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Earliest and latest year present, `None` for an empty table.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        self.year_span
    }

    /// Lightest and heaviest mass present, `None` for an empty table.
    pub fn mass_span(&self) -> Option<(f64, f64)> {
        self.mass_span
    }
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// One entry of the country ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryCount {
    pub country: String,
    pub count: usize,
}

/// Countries ordered by descending count, truncated to the requested N.
pub type TopCountries = Vec<CountryCount>;

/// Number of meteorites per year, only for years that occur.
pub type YearCounts = BTreeMap<i32, usize>;

/// Masses (grams) of the filtered subset.
pub type MassColumn = Vec<f64>;

/// The three views recomputed on every parameter change.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedViews {
    pub top_countries: TopCountries,
    pub year_counts: YearCounts,
    pub masses: MassColumn,
}

impl DerivedViews {
    /// Size of the filtered subset the views were computed from.
    pub fn subset_len(&self) -> usize {
        self.masses.len()
    }
}

/// Result of a filter/aggregate run.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    /// No record satisfies the filters; nothing should be charted.
    Empty,
    Views(DerivedViews),
}

impl FilterOutcome {
    pub fn views(&self) -> Option<&DerivedViews> {
        match self {
            FilterOutcome::Empty => None,
            FilterOutcome::Views(v) => Some(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meteorite(country: &str, year: i32, mass: f64) -> Meteorite {
        Meteorite {
            name: None,
            year_num: year,
            country: country.to_string(),
            class: None,
            mass_g: mass,
            lat: None,
            lon: None,
        }
    }

    #[test]
    fn header_resolution_accepts_labels_and_canonical_names() {
        assert_eq!(Field::from_header("Year / Année"), Some(Field::Year));
        assert_eq!(Field::from_header("mass_g"), Some(Field::Mass));
        assert_eq!(Field::from_header("Latitude"), Some(Field::Lat));
        assert_eq!(Field::from_header("GeoLocation"), None);
    }

    #[test]
    fn spans_cover_all_rows() {
        let table = MeteoriteTable::from_rows(vec![
            meteorite("US", 1990, 500.0),
            meteorite("FR", 1850, 12.5),
            meteorite("US", 2001, 9000.0),
        ]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.year_span(), Some((1850, 2001)));
        assert_eq!(table.mass_span(), Some((12.5, 9000.0)));
    }

    #[test]
    fn empty_table_has_no_spans() {
        let table = MeteoriteTable::from_rows(Vec::new());
        assert!(table.is_empty());
        assert_eq!(table.year_span(), None);
        assert_eq!(table.mass_span(), None);
    }
}
