use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::DatePickerButton;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – date range pickers
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Data by Date Range");
    ui.separator();

    let (Some(bounds), Some(range)) = (state.bounds, state.range) else {
        ui.label("No dataset loaded.");
        return;
    };

    ui.label(format!("Orders from {} to {}", bounds.start, bounds.end));
    ui.add_space(4.0);

    // Pickers edit copies; the state clamps them into the observed bounds.
    let mut start = range.start;
    ui.strong("Start Date");
    if ui
        .add(DatePickerButton::new(&mut start).id_salt("start_date"))
        .changed()
    {
        state.set_start(start);
    }

    ui.add_space(4.0);

    let mut end = range.end;
    ui.strong("End Date");
    if ui
        .add(DatePickerButton::new(&mut end).id_salt("end_date"))
        .changed()
    {
        state.set_end(end);
    }

    ui.add_space(8.0);
    if ui
        .add_enabled(state.range != state.bounds, egui::Button::new("Full range"))
        .clicked()
    {
        state.reset_range();
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

        if let Some(cache) = &state.cache {
            ui.label(cache.path().display().to_string());
        }

        if state.bounds.is_some() {
            ui.separator();
            ui.label(format!(
                "{} orders loaded, {} in range",
                state.total_rows(),
                state.visible_indices.len()
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
        .set_title("Open order data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening {}", path.display());
        state.open(path);
    }
}
