use eframe::egui::{self, Color32, RichText, Slider, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – control widgets
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(session) = &state.session else {
        ui.label("No dataset loaded.");
        return;
    };
    let table = session.table();
    if let (Some((y0, y1)), Some((m0, m1))) = (table.year_span(), table.mass_span()) {
        ui.small(format!("Years {y0}–{y1}, masses {m0} g – {m1} g"));
        ui.add_space(4.0);
    }

    let bounds = state.bounds.clone();
    let mut controls = state.controls;

    // ---- Mass floor (log scale) ----
    ui.strong("Minimum mass (g)");
    let (mass_lo, mass_hi) = bounds.mass_bounds;
    if ui
        .add(Slider::new(&mut controls.mass_min, mass_lo..=mass_hi).logarithmic(true))
        .changed()
    {
        state.set_mass_min(controls.mass_min);
    }
    ui.add_space(8.0);

    // ---- Year range ----
    ui.strong("Period");
    let (year_lo, year_hi) = bounds.year_bounds;
    if ui
        .add(Slider::new(&mut controls.year_min, year_lo..=year_hi).text("from"))
        .changed()
    {
        state.set_year_min(controls.year_min);
    }
    if ui
        .add(Slider::new(&mut controls.year_max, year_lo..=year_hi).text("to"))
        .changed()
    {
        state.set_year_max(controls.year_max);
    }
    ui.add_space(8.0);

    // ---- Number of countries ----
    ui.strong("Countries shown");
    let (top_lo, top_hi) = bounds.top_n_bounds;
    if ui
        .add(Slider::new(&mut controls.top_n, top_lo..=top_hi))
        .changed()
    {
        state.set_top_n(controls.top_n);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(session) = &state.session {
            ui.label(format!(
                "{} meteorites loaded, {} matching",
                session.table().len(),
                state.matching()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open meteorite landings")
        .add_filter("Delimited text", &["csv", "txt"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
