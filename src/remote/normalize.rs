// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Response normalization.
//!
//! Turns the model's raw reply into the local data model. The steps run
//! in a fixed order:
//!
//! 1. rescale box coordinates from the 0-1000 scale to [0,1], clamping
//!    out-of-range values and swapping inverted edges;
//! 2. backfill missing per-layer confidence with 0.9;
//! 3. synthesize a background layer if the model returned none;
//! 4. stable-sort layers ascending by stacking order;
//! 5. backfill missing analysis fields (brightness, contrast, weight
//!    center) with their documented defaults.

use super::schema::{RawAnalysis, RawBox, RawLayer, RawResponse};
use crate::models::analysis::{AnalysisResult, CompositionAnalysis, WeightCenter};
use crate::models::layer::{BoundingBox, Layer, LayerCategory};

const DEFAULT_CONFIDENCE: f64 = 0.9;
const DEFAULT_BRIGHTNESS: &str = "Balanced";
const DEFAULT_CONTRAST: &str = "Medium";
const BACKGROUND_COLOR: &str = "#000000";

/// Rescale a raw 0-1000 box to the unit interval and enforce the
/// well-formedness invariant: coordinates clamped to [0,1], inverted
/// edges swapped. Well-formed input passes through unchanged apart from
/// the division.
pub fn normalize_box(raw: &RawBox) -> BoundingBox {
    let clamp = |v: f64| (v / 1000.0).clamp(0.0, 1.0);
    let (mut top, mut bottom) = (clamp(raw.top), clamp(raw.bottom));
    let (mut left, mut right) = (clamp(raw.left), clamp(raw.right));
    if top > bottom {
        std::mem::swap(&mut top, &mut bottom);
    }
    if left > right {
        std::mem::swap(&mut left, &mut right);
    }
    BoundingBox::new(top, left, bottom, right)
}

fn normalize_layer(raw: RawLayer, index: usize) -> Layer {
    Layer {
        id: raw.id.unwrap_or_else(|| format!("layer-{}", index)),
        label: raw.label,
        category: raw.category,
        subtype: raw.subtype,
        confidence: raw.confidence.unwrap_or(DEFAULT_CONFIDENCE),
        bounding_box: normalize_box(&raw.bounding_box),
        z_index: raw.z_index,
        dominant_color: raw.dominant_color,
        visible: true,
    }
}

fn synthetic_background() -> Layer {
    Layer {
        id: "layer-background".to_string(),
        label: "Background".to_string(),
        category: LayerCategory::Background,
        subtype: None,
        confidence: 0.5,
        bounding_box: BoundingBox::full_frame(),
        z_index: 0,
        dominant_color: BACKGROUND_COLOR.to_string(),
        visible: true,
    }
}

fn normalize_analysis(raw: RawAnalysis) -> CompositionAnalysis {
    let center = raw.visual_weight_center.unwrap_or_default();
    CompositionAnalysis {
        rule_of_thirds: raw.rule_of_thirds,
        visual_balance: raw.visual_balance,
        contrast_level: raw.contrast_level.unwrap_or_else(|| DEFAULT_CONTRAST.to_string()),
        brightness_map: raw
            .brightness_map
            .unwrap_or_else(|| DEFAULT_BRIGHTNESS.to_string()),
        eye_contact: raw.eye_contact,
        dominant_colors: raw.dominant_colors,
        visual_weight_center: WeightCenter {
            x: center.x.unwrap_or(WeightCenter::MIDPOINT),
            y: center.y.unwrap_or(WeightCenter::MIDPOINT),
        },
        suggestions: raw.suggestions,
    }
}

/// Normalize a complete raw response into an [`AnalysisResult`].
pub fn normalize(raw: RawResponse) -> AnalysisResult {
    let mut layers: Vec<Layer> = raw
        .layers
        .into_iter()
        .enumerate()
        .map(|(i, l)| normalize_layer(l, i))
        .collect();

    if !layers.iter().any(|l| l.category == LayerCategory::Background) {
        layers.insert(0, synthetic_background());
    }

    // Vec::sort_by_key is stable: ties keep their original relative order.
    layers.sort_by_key(|l| l.z_index);

    AnalysisResult {
        layers,
        analysis: normalize_analysis(raw.analysis),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_layer(label: &str, category: &str, z_index: i32) -> RawLayer {
        serde_json::from_value(serde_json::json!({
            "label": label,
            "category": category,
            "boundingBox": { "top": 100, "left": 100, "bottom": 500, "right": 500 },
            "zIndex": z_index,
            "dominantColor": "#808080"
        }))
        .unwrap()
    }

    fn raw_analysis() -> RawAnalysis {
        serde_json::from_value(serde_json::json!({
            "ruleOfThirds": 70,
            "visualBalance": 55,
            "eyeContact": false
        }))
        .unwrap()
    }

    fn raw_response(layers: Vec<RawLayer>) -> RawResponse {
        RawResponse {
            layers,
            analysis: raw_analysis(),
        }
    }

    #[test]
    fn test_box_rescaled_by_thousand() {
        let raw = RawBox {
            top: 100.0,
            left: 250.0,
            bottom: 800.0,
            right: 750.0,
        };
        let b = normalize_box(&raw);
        assert_eq!(b, BoundingBox::new(0.1, 0.25, 0.8, 0.75));
    }

    #[test]
    fn test_malformed_box_is_clamped_and_swapped() {
        let raw = RawBox {
            top: 900.0,
            left: -50.0,
            bottom: 200.0,
            right: 1200.0,
        };
        let b = normalize_box(&raw);
        assert_eq!(b.top, 0.2);
        assert_eq!(b.bottom, 0.9);
        assert_eq!(b.left, 0.0);
        assert_eq!(b.right, 1.0);
        assert!(b.width() >= 0.0 && b.height() >= 0.0);
    }

    #[test]
    fn test_missing_confidence_defaults() {
        let result = normalize(raw_response(vec![raw_layer("bg", "background", 0)]));
        assert_eq!(result.layers[0].confidence, 0.9);
    }

    #[test]
    fn test_explicit_confidence_is_kept() {
        let mut layer = raw_layer("bg", "background", 0);
        layer.confidence = Some(0.42);
        let result = normalize(raw_response(vec![layer]));
        assert_eq!(result.layers[0].confidence, 0.42);
    }

    #[test]
    fn test_background_synthesized_when_absent() {
        let result = normalize(raw_response(vec![raw_layer("subject", "person", 3)]));
        assert_eq!(result.layers.len(), 2);
        let bg = &result.layers[0];
        assert_eq!(bg.category, LayerCategory::Background);
        assert_eq!(bg.bounding_box, BoundingBox::full_frame());
        assert_eq!(bg.z_index, 0);
        assert_eq!(bg.confidence, 0.5);
        assert_eq!(bg.dominant_color, "#000000");
    }

    #[test]
    fn test_background_not_duplicated_when_present() {
        let result = normalize(raw_response(vec![
            raw_layer("bg", "background", 0),
            raw_layer("subject", "person", 1),
        ]));
        assert_eq!(result.layers.len(), 2);
        let backgrounds = result
            .layers
            .iter()
            .filter(|l| l.category == LayerCategory::Background)
            .count();
        assert_eq!(backgrounds, 1);
    }

    #[test]
    fn test_layers_sorted_by_stacking_order() {
        let result = normalize(raw_response(vec![
            raw_layer("bg", "background", 3),
            raw_layer("mid", "object", 1),
            raw_layer("top", "text", 2),
        ]));
        let orders: Vec<i32> = result.layers.iter().map(|l| l.z_index).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let result = normalize(raw_response(vec![
            raw_layer("bg", "background", 0),
            raw_layer("first", "object", 5),
            raw_layer("second", "object", 5),
        ]));
        let labels: Vec<&str> = result.layers.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["bg", "first", "second"]);
    }

    #[test]
    fn test_analysis_defaults_backfilled() {
        let result = normalize(raw_response(vec![raw_layer("bg", "background", 0)]));
        assert_eq!(result.analysis.brightness_map, "Balanced");
        assert_eq!(result.analysis.contrast_level, "Medium");
        assert_eq!(result.analysis.visual_weight_center.x, 50.0);
        assert_eq!(result.analysis.visual_weight_center.y, 50.0);
    }

    #[test]
    fn test_weight_center_axes_default_independently() {
        let raw = RawResponse {
            layers: vec![raw_layer("bg", "background", 0)],
            analysis: serde_json::from_value(serde_json::json!({
                "ruleOfThirds": 70,
                "visualBalance": 55,
                "eyeContact": false,
                "visualWeightCenter": { "x": 33.0 }
            }))
            .unwrap(),
        };
        let result = normalize(raw);
        assert_eq!(result.analysis.visual_weight_center.x, 33.0);
        assert_eq!(result.analysis.visual_weight_center.y, 50.0);
    }

    #[test]
    fn test_missing_layer_id_backfilled() {
        let result = normalize(raw_response(vec![raw_layer("bg", "background", 0)]));
        assert_eq!(result.layers[0].id, "layer-0");
    }
}
