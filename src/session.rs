// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Session state and lifecycle.
//!
//! One owned state object holds the current image, the current analysis
//! result, and the selection, and sequences the upload -> analyze ->
//! display lifecycle through explicit transitions:
//!
//! ```text
//! Idle -> Analyzing -> Success | Error
//! Error -> Idle (retry), Success -> Idle (new session), both via reset
//! ```
//!
//! The Analyzing phase is the only one with a remote call in flight. A
//! submission while Analyzing is ignored (not queued) and logged.

use crate::io::media::LoadedImage;
use crate::models::analysis::AnalysisResult;

/// Lifecycle phase of the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Analyzing,
    Success,
    Error(String),
}

/// The single owned session state. All mutation goes through the
/// methods below; invalid transitions are rejected and logged.
pub struct Session {
    phase: Phase,
    image: Option<LoadedImage>,
    result: Option<AnalysisResult>,
    selected_layer: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create an idle session with nothing loaded.
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            image: None,
            result: None,
            selected_layer: None,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn image(&self) -> Option<&LoadedImage> {
        self.image.as_ref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn selected_layer(&self) -> Option<&str> {
        self.selected_layer.as_deref()
    }

    /// Whether an analysis could be started right now.
    pub fn can_analyze(&self) -> bool {
        matches!(self.phase, Phase::Idle | Phase::Error(_)) && self.image.is_some()
    }

    /// Replace the source image. Valid outside Analyzing; discards any
    /// previous result and selection so no stale crops survive.
    pub fn load_image(&mut self, image: LoadedImage) -> bool {
        if self.phase == Phase::Analyzing {
            log::warn!("Ignoring image load while an analysis is in flight");
            return false;
        }
        log::info!("Loaded image {}x{}", image.width, image.height);
        self.image = Some(image);
        self.result = None;
        self.selected_layer = None;
        self.phase = Phase::Idle;
        true
    }

    /// Enter the Analyzing phase. Valid only from Idle or Error with an
    /// image loaded; the caller then runs the remote call and reports
    /// back through [`Session::finish_analysis`].
    pub fn begin_analysis(&mut self) -> bool {
        if !self.can_analyze() {
            log::warn!("Ignoring analysis request in phase {:?}", self.phase);
            return false;
        }
        self.result = None;
        self.selected_layer = None;
        self.phase = Phase::Analyzing;
        log::info!("Analysis started");
        true
    }

    /// Record the outcome of the in-flight analysis. Valid only while
    /// Analyzing.
    pub fn finish_analysis(&mut self, outcome: Result<AnalysisResult, String>) -> bool {
        if self.phase != Phase::Analyzing {
            log::warn!("Dropping analysis outcome in phase {:?}", self.phase);
            return false;
        }
        match outcome {
            Ok(result) => {
                log::info!("Analysis succeeded with {} layers", result.layers.len());
                self.result = Some(result);
                self.phase = Phase::Success;
            }
            Err(message) => {
                log::error!("Analysis failed: {}", message);
                self.result = None;
                self.phase = Phase::Error(message);
            }
        }
        true
    }

    /// Flip the visibility flag of exactly one layer. Valid only in
    /// Success; everything else about the layer is left untouched.
    pub fn toggle_layer_visibility(&mut self, layer_id: &str) -> bool {
        if self.phase != Phase::Success {
            log::warn!("Ignoring visibility toggle in phase {:?}", self.phase);
            return false;
        }
        match self.result.as_mut().and_then(|r| r.layer_mut(layer_id)) {
            Some(layer) => {
                layer.visible = !layer.visible;
                log::info!("Layer {} visible: {}", layer_id, layer.visible);
                true
            }
            None => {
                log::warn!("Visibility toggle for unknown layer {}", layer_id);
                false
            }
        }
    }

    /// Change which layer is being inspected. The id is not validated
    /// against the layer set; an unknown id simply selects nothing in
    /// the panels.
    pub fn select_layer(&mut self, layer_id: Option<String>) {
        self.selected_layer = layer_id;
    }

    /// Return to Idle, discarding image, result, and selection. This is
    /// both the Error-phase retry and the Success-phase new session. An
    /// in-flight analysis cannot be cancelled, so reset is rejected
    /// while Analyzing.
    pub fn reset(&mut self) -> bool {
        if self.phase == Phase::Analyzing {
            log::warn!("Ignoring reset while an analysis is in flight");
            return false;
        }
        log::info!("Session reset");
        self.phase = Phase::Idle;
        self.image = None;
        self.result = None;
        self.selected_layer = None;
        true
    }
}
