// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with the session lifecycle controls.
//!
//! This module provides the toolbar interface for opening an image,
//! starting an analysis, exporting the result, and resetting the
//! session.

use crate::session::Phase;

/// Intent emitted by a toolbar interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    OpenImage,
    Analyze,
    Export,
    Reset,
}

/// Display the toolbar and report the clicked action, if any.
pub fn show(ui: &mut egui::Ui, phase: &Phase, can_analyze: bool) -> ToolbarAction {
    let mut action = ToolbarAction::None;
    let analyzing = *phase == Phase::Analyzing;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        if ui
            .add_enabled(!analyzing, egui::Button::new("📂 Open Image..."))
            .clicked()
        {
            action = ToolbarAction::OpenImage;
        }

        if ui
            .add_enabled(can_analyze, egui::Button::new("✨ Analyze"))
            .clicked()
        {
            action = ToolbarAction::Analyze;
        }

        ui.separator();

        if ui
            .add_enabled(*phase == Phase::Success, egui::Button::new("💾 Export JSON"))
            .clicked()
        {
            action = ToolbarAction::Export;
        }

        if ui
            .add_enabled(!analyzing, egui::Button::new("🔄 New Session"))
            .clicked()
        {
            action = ToolbarAction::Reset;
        }

        ui.separator();

        match phase {
            Phase::Error(message) => {
                ui.label(
                    egui::RichText::new(format!("Error: {}", message))
                        .color(egui::Color32::LIGHT_RED),
                );
                if ui.button("Try again").clicked() {
                    action = ToolbarAction::Reset;
                }
            }
            Phase::Analyzing => {
                ui.label(egui::RichText::new("Analyzing...").italics().weak());
                ui.spinner();
            }
            Phase::Success => {
                ui.label(egui::RichText::new("Analysis complete").italics().weak());
            }
            Phase::Idle => {
                ui.label(
                    egui::RichText::new("Open an image and analyze it")
                        .italics()
                        .weak(),
                );
            }
        }
    });

    action
}
