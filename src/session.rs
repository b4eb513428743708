use crate::data::error::InvalidParams;
use crate::data::filter::{compute, FilterParams};
use crate::data::model::{FilterOutcome, MeteoriteTable};

// ---------------------------------------------------------------------------
// Control events
// ---------------------------------------------------------------------------

/// Emitted by the UI whenever any of the three controls moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParametersChanged {
    pub mass_min: f64,
    pub year_range: (i32, i32),
    pub top_n: usize,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The loaded table, built once and only ever read afterwards.
#[derive(Debug)]
pub struct Session {
    table: MeteoriteTable,
}

impl Session {
    pub fn new(table: MeteoriteTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &MeteoriteTable {
        &self.table
    }

    /// Recompute all three views for the new control values.
    pub fn handle(&self, event: &ParametersChanged) -> Result<FilterOutcome, InvalidParams> {
        let (year_min, year_max) = event.year_range;
        let params = FilterParams::new(event.mass_min, year_min, year_max, event.top_n)?;
        let outcome = compute(&self.table, &params);
        log::debug!(
            "mass >= {} g, years {:?}, top {} -> {} matching meteorites",
            params.mass_min(),
            params.year_range(),
            params.top_n(),
            outcome.views().map_or(0, |v| v.subset_len())
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Meteorite;

    fn session() -> Session {
        let row = |country: &str, year, mass| Meteorite {
            name: None,
            year_num: year,
            country: country.to_string(),
            class: None,
            mass_g: mass,
            lat: None,
            lon: None,
        };
        Session::new(MeteoriteTable::from_rows(vec![
            row("US", 1990, 500.0),
            row("US", 1991, 1500.0),
            row("FR", 1990, 50.0),
        ]))
    }

    #[test]
    fn handle_returns_all_views() {
        let outcome = session()
            .handle(&ParametersChanged {
                mass_min: 100.0,
                year_range: (1990, 1991),
                top_n: 5,
            })
            .unwrap();
        let views = outcome.views().unwrap();
        assert_eq!(views.subset_len(), 2);
        assert_eq!(views.top_countries[0].country, "US");
        assert_eq!(views.year_counts.len(), 2);
    }

    #[test]
    fn handle_rejects_inverted_range() {
        let err = session()
            .handle(&ParametersChanged {
                mass_min: 1.0,
                year_range: (2000, 1990),
                top_n: 5,
            })
            .unwrap_err();
        assert_eq!(err, InvalidParams::YearRange { min: 2000, max: 1990 });
    }

    #[test]
    fn table_is_unchanged_by_queries() {
        let s = session();
        let before = s.table().rows().to_vec();
        for mass_min in [0.0, 100.0, 1e6] {
            s.handle(&ParametersChanged {
                mass_min,
                year_range: (1400, 2025),
                top_n: 5,
            })
            .unwrap();
        }
        assert_eq!(s.table().rows(), before.as_slice());
    }
}
