use std::path::Path;

use crate::config::{ControlsConfig, DashboardConfig};
use crate::data::loader::load_file;
use crate::data::model::FilterOutcome;
use crate::session::{ParametersChanged, Session};
use crate::ui::bins::{log_histogram, LogHistogram};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Current values of the three controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    pub mass_min: f64,
    pub year_min: i32,
    pub year_max: i32,
    pub top_n: usize,
}

impl Controls {
    fn from_config(c: &ControlsConfig) -> Self {
        Self {
            mass_min: c.mass_min,
            year_min: c.year_range.0,
            year_max: c.year_range.1,
            top_n: c.top_n,
        }
    }

    pub fn event(&self) -> ParametersChanged {
        ParametersChanged {
            mass_min: self.mass_min,
            year_range: (self.year_min, self.year_max),
            top_n: self.top_n,
        }
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded table (None until a file is loaded).
    pub session: Option<Session>,

    pub controls: Controls,

    /// Slider ranges.
    pub bounds: ControlsConfig,

    /// Result of the last recomputation.
    pub outcome: Option<FilterOutcome>,

    /// Mass histogram derived from `outcome`.
    pub histogram: LogHistogram,

    pub histogram_bins: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_config(&DashboardConfig::default())
    }
}

impl AppState {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            session: None,
            controls: Controls::from_config(&config.controls),
            bounds: config.controls.clone(),
            outcome: None,
            histogram: LogHistogram::default(),
            histogram_bins: config.histogram_bins,
            status_message: None,
        }
    }

    /// Install a freshly loaded session and compute the first views.
    pub fn set_session(&mut self, session: Session) {
        self.session = Some(session);
        self.status_message = None;
        self.recompute();
    }

    /// Load a file picked in the UI. On failure the current session is kept.
    pub fn load_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(table) => self.set_session(Session::new(table)),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Replace all three views with ones computed for the current controls.
    pub fn recompute(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        match session.handle(&self.controls.event()) {
            Ok(outcome) => {
                self.histogram = outcome
                    .views()
                    .map(|v| log_histogram(&v.masses, self.histogram_bins))
                    .unwrap_or_default();
                self.outcome = Some(outcome);
                self.status_message = None;
            }
            Err(e) => {
                log::warn!("Ignoring control change: {e}");
                self.status_message = Some(format!("Invalid controls: {e}"));
            }
        }
    }

    pub fn set_mass_min(&mut self, mass_min: f64) {
        self.controls.mass_min = mass_min;
        self.recompute();
    }

    /// Move the lower year bound, dragging the upper one along if needed.
    pub fn set_year_min(&mut self, year: i32) {
        self.controls.year_min = year;
        self.controls.year_max = self.controls.year_max.max(year);
        self.recompute();
    }

    /// Move the upper year bound, dragging the lower one along if needed.
    pub fn set_year_max(&mut self, year: i32) {
        self.controls.year_max = year;
        self.controls.year_min = self.controls.year_min.min(year);
        self.recompute();
    }

    pub fn set_top_n(&mut self, top_n: usize) {
        self.controls.top_n = top_n;
        self.recompute();
    }

    /// Number of meteorites in the current filtered subset.
    pub fn matching(&self) -> usize {
        self.outcome
            .as_ref()
            .and_then(FilterOutcome::views)
            .map_or(0, |v| v.subset_len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Meteorite, MeteoriteTable};

    fn loaded_state() -> AppState {
        let row = |country: &str, year, mass| Meteorite {
            name: None,
            year_num: year,
            country: country.to_string(),
            class: None,
            mass_g: mass,
            lat: None,
            lon: None,
        };
        let mut state = AppState::default();
        state.set_session(Session::new(MeteoriteTable::from_rows(vec![
            row("US", 1990, 500.0),
            row("US", 1991, 1500.0),
            row("FR", 1990, 50.0),
            row("Oman", 1860, 20000.0),
        ])));
        state
    }

    #[test]
    fn loading_computes_initial_views() {
        let state = loaded_state();
        // Defaults: mass >= 1000, 1850..=2025.
        assert_eq!(state.matching(), 2);
        assert_eq!(state.histogram.bins.iter().map(|b| b.count).sum::<usize>(), 2);
    }

    #[test]
    fn every_control_change_recomputes() {
        let mut state = loaded_state();
        state.set_mass_min(1.0);
        assert_eq!(state.matching(), 4);
        state.set_year_max(1900);
        assert_eq!(state.matching(), 1);
        state.set_mass_min(1e6);
        assert_eq!(state.outcome, Some(FilterOutcome::Empty));
        assert!(state.histogram.bins.is_empty());
    }

    #[test]
    fn year_sliders_keep_range_ordered() {
        let mut state = loaded_state();
        state.set_year_min(2000);
        state.set_year_max(1950);
        assert_eq!((state.controls.year_min, state.controls.year_max), (1950, 1950));
        state.set_year_min(1960);
        assert_eq!((state.controls.year_min, state.controls.year_max), (1960, 1960));
    }

    #[test]
    fn top_n_truncates_ranking() {
        let mut state = loaded_state();
        state.set_mass_min(1.0);
        state.set_top_n(1);
        let views = state.outcome.as_ref().and_then(FilterOutcome::views).unwrap();
        assert_eq!(views.top_countries.len(), 1);
        assert_eq!(views.top_countries[0].country, "US");
    }

    #[test]
    fn failed_load_keeps_previous_session() {
        let mut state = loaded_state();
        let dir = tempfile::tempdir().unwrap();
        state.load_path(&dir.path().join("missing.csv"));
        assert!(state.session.is_some());
        assert!(state.status_message.as_deref().unwrap().starts_with("Error"));
    }

    #[test]
    fn valid_change_clears_stale_error() {
        let mut state = loaded_state();
        let dir = tempfile::tempdir().unwrap();
        state.load_path(&dir.path().join("missing.csv"));
        assert!(state.status_message.is_some());
        state.set_top_n(6);
        assert_eq!(state.status_message, None);
    }

    #[test]
    fn without_session_nothing_is_computed() {
        let mut state = AppState::default();
        state.set_top_n(7);
        assert_eq!(state.outcome, None);
    }
}
