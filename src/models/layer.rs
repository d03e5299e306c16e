// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Layer data structures.
//!
//! This module defines the core data structures for representing
//! detected layers and their bounding boxes.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle with normalized coordinates (0.0 to 1.0),
/// relative to the source image dimensions.
///
/// Invariant: `top <= bottom` and `left <= right`. The normalizer enforces
/// this before a box ever reaches the rest of the system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl BoundingBox {
    /// Create a new bounding box from normalized edges.
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// The full-frame box covering the entire image.
    pub fn full_frame() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    /// Normalized width (may be 0 for a degenerate box).
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Normalized height (may be 0 for a degenerate box).
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Whether a normalized point lies inside this box.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// Category of a detected layer. Closed set; the remote model is
/// constrained to these values by the declared response schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerCategory {
    Person,
    Object,
    Text,
    Logo,
    Background,
    Effect,
}

impl LayerCategory {
    /// Human-readable name for panel display.
    pub fn display_name(&self) -> &'static str {
        match self {
            LayerCategory::Person => "Person",
            LayerCategory::Object => "Object",
            LayerCategory::Text => "Text",
            LayerCategory::Logo => "Logo",
            LayerCategory::Background => "Background",
            LayerCategory::Effect => "Effect",
        }
    }
}

/// One detected visual element within the source image.
///
/// Layers are created in bulk from a single analysis response and owned by
/// the current result; the only mutation after creation is the visibility
/// flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub id: String,
    pub label: String,
    pub category: LayerCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    pub confidence: f64,
    pub bounding_box: BoundingBox,
    /// Stacking order: lower values are further back.
    pub z_index: i32,
    pub dominant_color: String,
    pub visible: bool,
}
