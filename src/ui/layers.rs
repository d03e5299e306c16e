// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Layer list panel.
//!
//! One row per detected layer: thumbnail (placeholder until the crop for
//! it is generated), label, category, confidence, visibility toggle, and
//! a crop download button.

use crate::models::analysis::AnalysisResult;
use crate::ui::canvas::category_color;
use std::collections::HashMap;

/// Intent emitted by a layer list interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerAction {
    None,
    Select(String),
    ToggleVisibility(String),
    /// Download one layer's crop (list path, `.png`).
    DownloadCrop(String),
}

const THUMBNAIL_SIZE: f32 = 48.0;

/// Display the layer list and report the clicked action, if any.
pub fn show(
    ui: &mut egui::Ui,
    result: Option<&AnalysisResult>,
    selected_layer: Option<&str>,
    thumbnails: &HashMap<String, egui::TextureHandle>,
) -> LayerAction {
    let mut action = LayerAction::None;

    ui.heading("Layers");
    ui.separator();

    let result = match result {
        Some(r) => r,
        None => {
            ui.label(egui::RichText::new("No analysis yet").weak());
            return action;
        }
    };

    if result.layers.is_empty() {
        ui.label(egui::RichText::new("No layers detected").weak());
        return action;
    }

    // Foreground first: reversed stacking order reads naturally in a list
    for layer in result.layers.iter().rev() {
        let is_selected = Some(layer.id.as_str()) == selected_layer;

        let frame = egui::Frame::none().inner_margin(4.0).fill(if is_selected {
            ui.visuals().selection.bg_fill.gamma_multiply(0.3)
        } else {
            egui::Color32::TRANSPARENT
        });

        frame.show(ui, |ui| {
            ui.horizontal(|ui| {
                // Thumbnail or placeholder while the crop is pending
                match thumbnails.get(&layer.id) {
                    Some(texture) => {
                        let size = egui::vec2(THUMBNAIL_SIZE, THUMBNAIL_SIZE);
                        let sized = egui::load::SizedTexture::new(texture.id(), size);
                        let image = egui::Image::new(sized).fit_to_exact_size(size);
                        if ui.add(egui::Button::image(image)).clicked() {
                            action = LayerAction::Select(layer.id.clone());
                        }
                    }
                    None => {
                        let (rect, response) = ui.allocate_exact_size(
                            egui::vec2(THUMBNAIL_SIZE, THUMBNAIL_SIZE),
                            egui::Sense::click(),
                        );
                        ui.painter()
                            .rect_filled(rect, 2.0, egui::Color32::from_gray(60));
                        ui.put(rect, egui::Spinner::new().size(16.0));
                        if response.clicked() {
                            action = LayerAction::Select(layer.id.clone());
                        }
                    }
                }

                ui.vertical(|ui| {
                    let title = egui::RichText::new(&layer.label).strong();
                    if ui.selectable_label(is_selected, title).clicked() {
                        action = LayerAction::Select(layer.id.clone());
                    }
                    ui.horizontal(|ui| {
                        ui.colored_label(
                            category_color(layer.category),
                            layer.category.display_name(),
                        );
                        if let Some(subtype) = &layer.subtype {
                            ui.label(egui::RichText::new(subtype).weak());
                        }
                        ui.label(
                            egui::RichText::new(format!("{:.0}%", layer.confidence * 100.0))
                                .weak(),
                        );
                    });
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let eye = if layer.visible { "👁" } else { "🚫" };
                    if ui.button(eye).on_hover_text("Toggle visibility").clicked() {
                        action = LayerAction::ToggleVisibility(layer.id.clone());
                    }
                    if ui.button("⬇").on_hover_text("Download crop").clicked() {
                        action = LayerAction::DownloadCrop(layer.id.clone());
                    }
                });
            });
        });
    }

    action
}
