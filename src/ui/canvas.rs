// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Overlay canvas for image display and layer inspection.
//!
//! This module provides the main canvas area where the source image is
//! shown with bounding box overlays for every visible layer. Clicking a
//! box selects that layer; the info strip below the image offers a crop
//! download for the selection.

use crate::models::analysis::AnalysisResult;
use crate::models::layer::{Layer, LayerCategory};
use crate::session::Phase;

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    SelectLayer(String),
    Deselect,
    /// Download the selected layer's crop (canvas path, `_crop.png`).
    DownloadCrop(String),
}

/// Overlay stroke color per category.
pub fn category_color(category: LayerCategory) -> egui::Color32 {
    match category {
        LayerCategory::Person => egui::Color32::from_rgb(255, 99, 132),
        LayerCategory::Object => egui::Color32::from_rgb(54, 162, 235),
        LayerCategory::Text => egui::Color32::from_rgb(255, 206, 86),
        LayerCategory::Logo => egui::Color32::from_rgb(153, 102, 255),
        LayerCategory::Background => egui::Color32::from_rgb(120, 120, 120),
        LayerCategory::Effect => egui::Color32::from_rgb(75, 192, 150),
    }
}

/// Display the canvas area and handle layer selection.
pub fn show(
    ui: &mut egui::Ui,
    phase: &Phase,
    image_texture: &Option<egui::TextureHandle>,
    image_size: Option<(u32, u32)>,
    result: Option<&AnalysisResult>,
    selected_layer: Option<&str>,
) -> CanvasAction {
    let mut action = CanvasAction::None;
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        if let (Some(texture), Some((img_width, img_height))) = (image_texture, image_size) {
            // Calculate scaling to fit the image in the available space
            let available = ui.available_size();
            let img_aspect = img_width as f32 / img_height as f32;
            let available_aspect = available.x / available.y;

            let (display_width, display_height) = if img_aspect > available_aspect {
                let width = available.x;
                (width, width / img_aspect)
            } else {
                let height = available.y;
                (height * img_aspect, height)
            };

            // Center the image
            let x_offset = (available.x - display_width) / 2.0;
            let y_offset = (available.y - display_height) / 2.0;

            let image_rect = egui::Rect::from_min_size(
                ui.min_rect().min + egui::vec2(x_offset, y_offset),
                egui::vec2(display_width, display_height),
            );

            ui.painter().image(
                texture.id(),
                image_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );

            // Click selection: pick the smallest visible box under the cursor
            let response = ui.allocate_rect(image_rect, egui::Sense::click());
            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    if image_rect.contains(pos) {
                        let rel_x = ((pos.x - image_rect.min.x) / display_width) as f64;
                        let rel_y = ((pos.y - image_rect.min.y) / display_height) as f64;
                        action = match result.and_then(|r| hit_test(&r.layers, rel_x, rel_y)) {
                            Some(id) => CanvasAction::SelectLayer(id),
                            None => CanvasAction::Deselect,
                        };
                    }
                }
            }

            // Draw overlays for visible layers, selected last so its
            // stroke stays on top
            if let Some(result) = result {
                let painter = ui.painter();
                for layer in result.layers.iter().filter(|l| l.visible) {
                    if Some(layer.id.as_str()) != selected_layer {
                        draw_layer_box(painter, layer, &image_rect, false);
                    }
                }
                if let Some(layer) = selected_layer.and_then(|id| result.layer(id)) {
                    if layer.visible {
                        draw_layer_box(painter, layer, &image_rect, true);
                    }
                }
            }

            if *phase == Phase::Analyzing {
                ui.painter()
                    .rect_filled(image_rect, 0.0, egui::Color32::from_black_alpha(120));
            }
        } else {
            // Welcome message when nothing is loaded
            ui.centered_and_justified(|ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(20.0);
                    ui.heading(
                        egui::RichText::new("LayerLens")
                            .size(32.0)
                            .color(egui::Color32::from_gray(200)),
                    );
                    ui.label(
                        egui::RichText::new("Image layer detection and composition analysis")
                            .size(14.0)
                            .color(egui::Color32::from_gray(150)),
                    );
                    ui.add_space(20.0);
                    ui.label(
                        egui::RichText::new("Open an image to begin")
                            .color(egui::Color32::from_gray(180)),
                    );
                });
            });
        }
    });

    // Selection info strip below the image
    ui.separator();
    ui.horizontal(|ui| {
        match selected_layer.and_then(|id| result.and_then(|r| r.layer(id))) {
            Some(layer) => {
                ui.colored_label(category_color(layer.category), "■");
                ui.label(format!(
                    "{} ({}, {:.0}% confidence, z {})",
                    layer.label,
                    layer.category.display_name(),
                    layer.confidence * 100.0,
                    layer.z_index
                ));
                if ui.button("⬇ Download crop").clicked() {
                    action = CanvasAction::DownloadCrop(layer.id.clone());
                }
            }
            None => {
                if result.is_some() {
                    ui.label("Click a box to inspect a layer");
                } else {
                    ui.label("No analysis yet");
                }
            }
        }
    });

    action
}

/// Pick the layer to select at a normalized point: smallest visible box
/// containing it, ties broken toward the foreground.
fn hit_test(layers: &[Layer], x: f64, y: f64) -> Option<String> {
    layers
        .iter()
        .filter(|l| l.visible && l.bounding_box.contains(x, y))
        .min_by(|a, b| {
            let area_a = a.bounding_box.width() * a.bounding_box.height();
            let area_b = b.bounding_box.width() * b.bounding_box.height();
            area_a
                .partial_cmp(&area_b)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(b.z_index.cmp(&a.z_index))
        })
        .map(|l| l.id.clone())
}

/// Draw one layer's bounding box on the canvas.
fn draw_layer_box(
    painter: &egui::Painter,
    layer: &Layer,
    image_rect: &egui::Rect,
    is_selected: bool,
) {
    let bounds = &layer.bounding_box;
    let min = egui::pos2(
        image_rect.min.x + bounds.left as f32 * image_rect.width(),
        image_rect.min.y + bounds.top as f32 * image_rect.height(),
    );
    let max = egui::pos2(
        image_rect.min.x + bounds.right as f32 * image_rect.width(),
        image_rect.min.y + bounds.bottom as f32 * image_rect.height(),
    );
    let rect = egui::Rect::from_min_max(min, max);

    let color = category_color(layer.category);
    let stroke_width = if is_selected { 3.0 } else { 1.5 };
    if is_selected {
        painter.rect_filled(rect, 2.0, color.gamma_multiply(0.15));
    }
    painter.rect_stroke(rect, 2.0, egui::Stroke::new(stroke_width, color));

    // Label tag above the box, clamped into the image
    let tag_pos = egui::pos2(min.x, (min.y - 14.0).max(image_rect.min.y));
    painter.text(
        tag_pos,
        egui::Align2::LEFT_TOP,
        &layer.label,
        egui::FontId::proportional(11.0),
        if is_selected {
            egui::Color32::WHITE
        } else {
            color
        },
    );
}
