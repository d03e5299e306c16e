// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Composition analysis panel.
//!
//! Renders the aggregate scores as bars, the visual weight center as a
//! crosshair plot, the dominant color swatches, and the suggestion list.

use crate::models::analysis::CompositionAnalysis;

/// Display the analysis panel.
pub fn show(ui: &mut egui::Ui, analysis: &CompositionAnalysis) {
    ui.heading("Composition");
    ui.separator();

    score_bar(ui, "Rule of thirds", analysis.rule_of_thirds);
    score_bar(ui, "Visual balance", analysis.visual_balance);

    egui::Grid::new("composition_facts")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            ui.label("Contrast");
            ui.label(&analysis.contrast_level);
            ui.end_row();
            ui.label("Brightness");
            ui.label(&analysis.brightness_map);
            ui.end_row();
            ui.label("Eye contact");
            ui.label(if analysis.eye_contact { "Yes" } else { "No" });
            ui.end_row();
        });

    ui.add_space(8.0);
    ui.label("Visual weight center");
    weight_center_plot(ui, analysis.visual_weight_center.x, analysis.visual_weight_center.y);

    if !analysis.dominant_colors.is_empty() {
        ui.add_space(8.0);
        ui.label("Dominant colors");
        ui.horizontal(|ui| {
            for hex in &analysis.dominant_colors {
                let color = parse_hex_color(hex).unwrap_or(egui::Color32::DARK_GRAY);
                let (rect, response) =
                    ui.allocate_exact_size(egui::vec2(20.0, 20.0), egui::Sense::hover());
                ui.painter().rect_filled(rect, 3.0, color);
                response.on_hover_text(hex);
            }
        });
    }

    if !analysis.suggestions.is_empty() {
        ui.add_space(8.0);
        ui.label("Suggestions");
        for suggestion in &analysis.suggestions {
            ui.horizontal_wrapped(|ui| {
                ui.label("•");
                ui.label(egui::RichText::new(suggestion).weak());
            });
        }
    }
}

/// A labeled 0-100 score bar.
fn score_bar(ui: &mut egui::Ui, label: &str, score: f64) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(format!("{:.0}", score));
        });
    });
    let fraction = (score / 100.0).clamp(0.0, 1.0) as f32;
    ui.add(egui::ProgressBar::new(fraction).desired_height(8.0));
    ui.add_space(4.0);
}

/// Small square plot with a crosshair at the weight center (percent).
fn weight_center_plot(ui: &mut egui::Ui, x_percent: f64, y_percent: f64) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(120.0, 120.0), egui::Sense::hover());
    let painter = ui.painter();
    painter.rect_filled(rect, 2.0, egui::Color32::from_gray(35));

    // Rule-of-thirds guides
    let guide = egui::Stroke::new(1.0, egui::Color32::from_gray(70));
    for t in [1.0 / 3.0, 2.0 / 3.0] {
        let x = rect.min.x + rect.width() * t;
        let y = rect.min.y + rect.height() * t;
        painter.line_segment([egui::pos2(x, rect.min.y), egui::pos2(x, rect.max.y)], guide);
        painter.line_segment([egui::pos2(rect.min.x, y), egui::pos2(rect.max.x, y)], guide);
    }

    let center = egui::pos2(
        rect.min.x + rect.width() * (x_percent as f32 / 100.0).clamp(0.0, 1.0),
        rect.min.y + rect.height() * (y_percent as f32 / 100.0).clamp(0.0, 1.0),
    );
    painter.circle_filled(center, 4.0, egui::Color32::LIGHT_YELLOW);
    painter.circle_stroke(center, 6.0, egui::Stroke::new(1.0, egui::Color32::YELLOW));
}

/// Parse a `#rrggbb` hex string.
fn parse_hex_color(hex: &str) -> Option<egui::Color32> {
    let hex = hex.trim().strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(egui::Color32::from_rgb(r, g, b))
}
