use std::collections::BTreeMap;

use super::error::InvalidParams;
use super::model::{
    CountryCount, DerivedViews, FilterOutcome, Meteorite, MeteoriteTable, TopCountries,
    YearCounts,
};

// ---------------------------------------------------------------------------
// Filter parameters
// ---------------------------------------------------------------------------

/// Validated query parameters. Holding one guarantees `mass_min >= 0`,
/// `year_min <= year_max` and `top_n >= 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterParams {
    mass_min: f64,
    year_min: i32,
    year_max: i32,
    top_n: usize,
}

impl FilterParams {
    pub fn new(
        mass_min: f64,
        year_min: i32,
        year_max: i32,
        top_n: usize,
    ) -> Result<Self, InvalidParams> {
        if !mass_min.is_finite() || mass_min < 0.0 {
            return Err(InvalidParams::MassMin(mass_min));
        }
        if year_min > year_max {
            return Err(InvalidParams::YearRange {
                min: year_min,
                max: year_max,
            });
        }
        if top_n == 0 {
            return Err(InvalidParams::TopN);
        }
        Ok(FilterParams {
            mass_min,
            year_min,
            year_max,
            top_n,
        })
    }

    pub fn mass_min(&self) -> f64 {
        self.mass_min
    }

    pub fn year_range(&self) -> (i32, i32) {
        (self.year_min, self.year_max)
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Mass floor is inclusive, both year bounds are inclusive.
    pub fn matches(&self, m: &Meteorite) -> bool {
        m.mass_g >= self.mass_min && (self.year_min..=self.year_max).contains(&m.year_num)
    }
}

// ---------------------------------------------------------------------------
// Filtering and aggregation
// ---------------------------------------------------------------------------

/// Return indices of meteorites passing the filters, in table order.
pub fn matching_indices(table: &MeteoriteTable, params: &FilterParams) -> Vec<usize> {
    table
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, m)| params.matches(m))
        .map(|(i, _)| i)
        .collect()
}

/// Compute the three derived views for the filtered subset.
///
/// Returns [`FilterOutcome::Empty`] when nothing passes the filters.
pub fn compute(table: &MeteoriteTable, params: &FilterParams) -> FilterOutcome {
    let rows = table.rows();
    let subset: Vec<&Meteorite> = matching_indices(table, params)
        .into_iter()
        .map(|i| &rows[i])
        .collect();
    if subset.is_empty() {
        return FilterOutcome::Empty;
    }

    FilterOutcome::Views(DerivedViews {
        top_countries: top_countries(&subset, params.top_n),
        year_counts: year_counts(&subset),
        masses: subset.iter().map(|m| m.mass_g).collect(),
    })
}

/// Rank countries by count. Equal counts are ordered alphabetically.
fn top_countries(subset: &[&Meteorite], top_n: usize) -> TopCountries {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for m in subset {
        *counts.entry(m.country.as_str()).or_default() += 1;
    }

    // BTreeMap iterates alphabetically and the sort is stable.
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(top_n)
        .map(|(country, count)| CountryCount {
            country: country.to_string(),
            count,
        })
        .collect()
}

fn year_counts(subset: &[&Meteorite]) -> YearCounts {
    let mut counts = YearCounts::new();
    for m in subset {
        *counts.entry(m.year_num).or_default() += 1;
    }
    counts
}
