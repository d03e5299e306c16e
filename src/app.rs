// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module wires the session controller, the remote analysis client,
//! and the UI components together: it polls the background channels for
//! loaded images, analysis outcomes, and generated thumbnails, and
//! dispatches the action enums the panels emit.

use crate::error::AnalysisError;
use crate::io::media::{self, LoadedImage};
use crate::io::serialization;
use crate::models::analysis::AnalysisResult;
use crate::models::layer::BoundingBox;
use crate::remote::client::AnalysisClient;
use crate::session::Session;
use crate::ui::{analysis, canvas, layers, toolbar};
use crate::util::crop;
use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver};

/// Main application state.
pub struct LayerLensApp {
    /// Session lifecycle, image, result, and selection
    session: Session,

    /// Remote model client, built once at startup
    client: AnalysisClient,

    /// Texture of the current source image
    image_texture: Option<egui::TextureHandle>,

    /// Receiver for background image loading
    image_loader: Option<Receiver<Result<LoadedImage, String>>>,

    /// Receiver for the in-flight analysis, if any
    analysis_receiver: Option<Receiver<Result<AnalysisResult, AnalysisError>>>,

    /// Receiver for thumbnail crops being generated for the current result
    thumbnail_receiver: Option<Receiver<(String, image::RgbaImage)>>,

    /// Generated thumbnails keyed by layer id; rebuilt per result
    thumbnails: HashMap<String, egui::TextureHandle>,
}

impl LayerLensApp {
    /// Create the application around a configured analysis client.
    pub fn new(client: AnalysisClient) -> Self {
        Self {
            session: Session::new(),
            client,
            image_texture: None,
            image_loader: None,
            analysis_receiver: None,
            thumbnail_receiver: None,
            thumbnails: HashMap::new(),
        }
    }

    /// Open the native file picker and load the chosen image on a
    /// background thread.
    fn open_image_dialog(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"])
            .pick_file()
        else {
            return;
        };

        let (sender, receiver) = channel();
        self.image_loader = Some(receiver);

        std::thread::spawn(move || {
            let result = media::load_image(&path).map_err(|e| e.to_string());
            let _ = sender.send(result);
        });
    }

    /// Start the remote analysis for the current image.
    fn start_analysis(&mut self) {
        let Some(image) = self.session.image() else {
            return;
        };
        let encoded = image.encoded.clone();
        let mime = image.mime;

        if !self.session.begin_analysis() {
            return;
        }
        self.drop_thumbnails();

        let client = self.client.clone();
        let (sender, receiver) = channel();
        self.analysis_receiver = Some(receiver);

        std::thread::spawn(move || {
            let result = client.analyze(&encoded, mime);
            let _ = sender.send(result);
        });
    }

    /// Kick off thumbnail generation for every layer of the current
    /// result. Crops arrive over a channel in no particular order.
    fn start_thumbnail_generation(&mut self) {
        let Some(image) = self.session.image() else {
            return;
        };
        let Some(result) = self.session.result() else {
            return;
        };

        let source = image.rgba.clone();
        let targets: Vec<(String, BoundingBox)> = result
            .layers
            .iter()
            .map(|l| (l.id.clone(), l.bounding_box))
            .collect();

        let (sender, receiver) = channel();
        self.thumbnail_receiver = Some(receiver);

        std::thread::spawn(move || {
            for (id, bounds) in targets {
                // Unavailable crops keep their placeholder forever
                if let Some(pixels) = crop::extract_crop_pixels(&source, &bounds) {
                    if sender.send((id, pixels)).is_err() {
                        return; // cache was invalidated, stop early
                    }
                }
            }
        });
    }

    /// Drop all generated thumbnails and any in-flight generation.
    fn drop_thumbnails(&mut self) {
        self.thumbnails.clear();
        self.thumbnail_receiver = None;
    }

    /// Save one layer's crop as PNG under a filename derived from its
    /// label. `suffix` distinguishes the canvas path (`_crop.png`) from
    /// the list path (`.png`).
    fn download_crop(&self, layer_id: &str, suffix: &str) {
        let (Some(image), Some(result)) = (self.session.image(), self.session.result()) else {
            return;
        };
        let Some(layer) = result.layer(layer_id) else {
            return;
        };

        let Some(bytes) = crop::extract_crop(&image.rgba, &layer.bounding_box) else {
            log::warn!("Crop unavailable for layer {}", layer_id);
            return;
        };

        let filename = format!("{}{}", crop::sanitize_label(&layer.label), suffix);
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name(&filename)
            .save_file()
        else {
            return;
        };

        match std::fs::write(&path, &bytes) {
            Ok(()) => log::info!("Saved crop to {}", path.display()),
            Err(e) => log::error!("Failed to save crop: {}", e),
        }
    }

    /// Export the current analysis result to a JSON file.
    fn export_result(&self) {
        let Some(result) = self.session.result() else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(serialization::EXPORT_FILENAME)
            .save_file()
        else {
            return;
        };

        match serialization::export_json(result, &path) {
            Ok(()) => log::info!("Exported analysis to {}", path.display()),
            Err(e) => log::error!("Failed to export analysis: {}", e),
        }
    }

    /// Discard everything and return to the idle phase.
    fn reset_session(&mut self) {
        if self.session.reset() {
            self.image_texture = None;
            self.image_loader = None;
            self.analysis_receiver = None;
            self.drop_thumbnails();
        }
    }

    fn poll_image_loader(&mut self, ctx: &egui::Context) {
        let Some(receiver) = &self.image_loader else {
            return;
        };
        let Ok(outcome) = receiver.try_recv() else {
            return;
        };
        self.image_loader = None;

        match outcome {
            Ok(loaded) => {
                let size = [loaded.width as usize, loaded.height as usize];
                let color_image =
                    egui::ColorImage::from_rgba_unmultiplied(size, loaded.rgba.as_raw());
                let texture =
                    ctx.load_texture("source_image", color_image, egui::TextureOptions::LINEAR);

                if self.session.load_image(loaded) {
                    self.image_texture = Some(texture);
                    self.drop_thumbnails();
                }
            }
            Err(e) => {
                log::error!("Failed to load image: {}", e);
            }
        }
    }

    fn poll_analysis(&mut self) {
        let Some(receiver) = &self.analysis_receiver else {
            return;
        };
        let Ok(outcome) = receiver.try_recv() else {
            return;
        };
        self.analysis_receiver = None;

        let succeeded = outcome.is_ok();
        self.session
            .finish_analysis(outcome.map_err(|e| e.to_string()));
        if succeeded {
            self.start_thumbnail_generation();
        }
    }

    fn poll_thumbnails(&mut self, ctx: &egui::Context) {
        let Some(receiver) = &self.thumbnail_receiver else {
            return;
        };
        let mut ready = Vec::new();
        while let Ok((id, pixels)) = receiver.try_recv() {
            ready.push((id, pixels));
        }
        for (id, pixels) in ready {
            let size = [pixels.width() as usize, pixels.height() as usize];
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_raw());
            let texture = ctx.load_texture(
                format!("thumb_{}", id),
                color_image,
                egui::TextureOptions::LINEAR,
            );
            self.thumbnails.insert(id, texture);
        }
    }
}

impl eframe::App for LayerLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_image_loader(ctx);
        self.poll_analysis();
        self.poll_thumbnails(ctx);

        // Keep repainting while background work is pending
        if self.image_loader.is_some()
            || self.analysis_receiver.is_some()
            || self.thumbnail_receiver.is_some()
        {
            ctx.request_repaint();
        }

        // Toolbar
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                toolbar::show(ui, self.session.phase(), self.session.can_analyze())
            })
            .inner;

        match toolbar_action {
            toolbar::ToolbarAction::OpenImage => self.open_image_dialog(),
            toolbar::ToolbarAction::Analyze => self.start_analysis(),
            toolbar::ToolbarAction::Export => self.export_result(),
            toolbar::ToolbarAction::Reset => self.reset_session(),
            toolbar::ToolbarAction::None => {}
        }

        // Inspector panel (right side): layer list plus composition scores
        let layer_action = egui::SidePanel::right("inspector")
            .default_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .show(ui, |ui| {
                        let action = layers::show(
                            ui,
                            self.session.result(),
                            self.session.selected_layer(),
                            &self.thumbnails,
                        );
                        if let Some(result) = self.session.result() {
                            ui.add_space(12.0);
                            analysis::show(ui, &result.analysis);
                        }
                        action
                    })
                    .inner
            })
            .inner;

        match layer_action {
            layers::LayerAction::Select(id) => {
                self.session.select_layer(Some(id));
            }
            layers::LayerAction::ToggleVisibility(id) => {
                self.session.toggle_layer_visibility(&id);
            }
            layers::LayerAction::DownloadCrop(id) => {
                self.download_crop(&id, ".png");
            }
            layers::LayerAction::None => {}
        }

        // Main canvas (center)
        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                let image_size = self.session.image().map(|i| (i.width, i.height));
                canvas::show(
                    ui,
                    self.session.phase(),
                    &self.image_texture,
                    image_size,
                    self.session.result(),
                    self.session.selected_layer(),
                )
            })
            .inner;

        match canvas_action {
            canvas::CanvasAction::SelectLayer(id) => {
                log::info!("Selected layer {}", id);
                self.session.select_layer(Some(id));
            }
            canvas::CanvasAction::Deselect => {
                self.session.select_layer(None);
            }
            canvas::CanvasAction::DownloadCrop(id) => {
                self.download_crop(&id, "_crop.png");
            }
            canvas::CanvasAction::None => {}
        }

        // Escape clears the selection
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.session.select_layer(None);
        }
    }
}
