// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! LayerLens
//!
//! A cross-platform desktop application that sends an image to a hosted
//! multimodal model for layer detection and composition scoring, then
//! renders interactive overlays, per-layer crops, and analysis panels.

mod app;
mod error;
mod io;
mod models;
mod remote;
mod session;
mod ui;
mod util;

use anyhow::{Context, Result};
use app::LayerLensApp;
use remote::client::AnalysisClient;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // The credential check happens before any window opens: a missing
    // key is a fatal configuration error, not something to retry.
    let client = AnalysisClient::from_env()
        .context("LayerLens cannot start without a configured API credential")?;

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("LayerLens - Image Layer Analysis"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "LayerLens",
        options,
        Box::new(move |_cc| Ok(Box::new(LayerLensApp::new(client)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
