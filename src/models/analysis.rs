// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Composition analysis data structures.
//!
//! This module defines the aggregate scores and suggestions produced
//! alongside the layer list, and the complete analysis result that
//! pairs the two.

use super::layer::Layer;
use serde::{Deserialize, Serialize};

/// The visual weight center of the image, in percent on each axis
/// (50, 50 is the exact middle of the frame).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightCenter {
    pub x: f64,
    pub y: f64,
}

impl WeightCenter {
    /// The frame midpoint, used when the model omits a coordinate.
    pub const MIDPOINT: f64 = 50.0;
}

/// Aggregate composition scores and suggestions. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionAnalysis {
    /// Rule-of-thirds adherence score, 0 to 100.
    pub rule_of_thirds: f64,
    /// Visual balance score, 0 to 100.
    pub visual_balance: f64,
    pub contrast_level: String,
    pub brightness_map: String,
    pub eye_contact: bool,
    pub dominant_colors: Vec<String>,
    pub visual_weight_center: WeightCenter,
    pub suggestions: Vec<String>,
}

/// One complete analysis of one source image: the detected layers
/// (ascending by stacking order) plus the composition scores.
///
/// At most one result exists at a time; loading a new image discards it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub layers: Vec<Layer>,
    pub analysis: CompositionAnalysis,
}

impl AnalysisResult {
    /// Look up a layer by id.
    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Look up a layer by id, mutably.
    pub fn layer_mut(&mut self, id: &str) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id == id)
    }
}
