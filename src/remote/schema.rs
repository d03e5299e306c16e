// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Wire format of the analysis request and response.
//!
//! The request carries a fixed natural-language instruction set plus a
//! declared output schema, so the model replies with structured JSON
//! rather than free text. The raw structs here mirror that declared
//! schema; `normalize` turns them into the local data model.

use crate::models::layer::LayerCategory;
use serde::Deserialize;
use serde_json::{json, Value};

/// Fixed instruction set sent with every analysis request. Bounding box
/// coordinates are requested on a 0-1000 integer scale; the normalizer
/// rescales them to the unit interval.
pub const INSTRUCTIONS: &str = "\
Analyze this image as a layered composition. First, enumerate every distinct \
visual element: give each a short human label, a category (one of person, \
object, text, logo, background, effect), an optional free-text subtype, a \
confidence between 0 and 1, a bounding box with top/left/bottom/right on a \
0-1000 integer scale relative to the image, an integer zIndex estimating its \
stacking order (lower is further back), and its dominant color as a hex \
string. Second, score the overall composition: rule-of-thirds adherence and \
visual balance from 0 to 100, a contrast level (Low, Medium or High), a \
one-word brightness description, whether a depicted person makes eye contact \
with the viewer, the dominant colors of the whole image as hex strings, the \
visual weight center as x/y percentages, and a short list of concrete \
suggestions for improving the composition.";

/// Declared response schema, in the model API's schema dialect. Keeps the
/// reply parseable as [`RawResponse`].
pub fn response_schema() -> Value {
    let bounding_box = json!({
        "type": "OBJECT",
        "properties": {
            "top": { "type": "NUMBER" },
            "left": { "type": "NUMBER" },
            "bottom": { "type": "NUMBER" },
            "right": { "type": "NUMBER" }
        },
        "required": ["top", "left", "bottom", "right"]
    });

    json!({
        "type": "OBJECT",
        "properties": {
            "layers": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "label": { "type": "STRING" },
                        "category": {
                            "type": "STRING",
                            "enum": ["person", "object", "text", "logo", "background", "effect"]
                        },
                        "subtype": { "type": "STRING" },
                        "confidence": { "type": "NUMBER" },
                        "boundingBox": bounding_box,
                        "zIndex": { "type": "INTEGER" },
                        "dominantColor": { "type": "STRING" }
                    },
                    "required": ["label", "category", "boundingBox", "zIndex", "dominantColor"]
                }
            },
            "analysis": {
                "type": "OBJECT",
                "properties": {
                    "ruleOfThirds": { "type": "NUMBER" },
                    "visualBalance": { "type": "NUMBER" },
                    "contrastLevel": { "type": "STRING" },
                    "brightnessMap": { "type": "STRING" },
                    "eyeContact": { "type": "BOOLEAN" },
                    "dominantColors": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "visualWeightCenter": {
                        "type": "OBJECT",
                        "properties": {
                            "x": { "type": "NUMBER" },
                            "y": { "type": "NUMBER" }
                        }
                    },
                    "suggestions": { "type": "ARRAY", "items": { "type": "STRING" } }
                },
                "required": ["ruleOfThirds", "visualBalance", "eyeContact"]
            }
        },
        "required": ["layers", "analysis"]
    })
}

/// A bounding box as returned by the model: 0-1000 integer scale.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawBox {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

/// One detected layer as returned by the model, before normalization.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLayer {
    #[serde(default)]
    pub id: Option<String>,
    pub label: String,
    pub category: LayerCategory,
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    pub bounding_box: RawBox,
    pub z_index: i32,
    pub dominant_color: String,
}

/// The weight center as returned by the model; either axis may be absent.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RawWeightCenter {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
}

/// Composition scores as returned by the model, before default backfill.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnalysis {
    pub rule_of_thirds: f64,
    pub visual_balance: f64,
    #[serde(default)]
    pub contrast_level: Option<String>,
    #[serde(default)]
    pub brightness_map: Option<String>,
    pub eye_contact: bool,
    #[serde(default)]
    pub dominant_colors: Vec<String>,
    #[serde(default)]
    pub visual_weight_center: Option<RawWeightCenter>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// The complete structured reply.
#[derive(Debug, Clone, Deserialize)]
pub struct RawResponse {
    pub layers: Vec<RawLayer>,
    pub analysis: RawAnalysis,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_response_parses_minimal_payload() {
        let payload = r##"{
            "layers": [
                {
                    "label": "Main subject",
                    "category": "person",
                    "boundingBox": { "top": 100, "left": 200, "bottom": 900, "right": 700 },
                    "zIndex": 2,
                    "dominantColor": "#aa3322"
                }
            ],
            "analysis": {
                "ruleOfThirds": 72,
                "visualBalance": 60,
                "eyeContact": true
            }
        }"##;
        let parsed: RawResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.layers.len(), 1);
        assert_eq!(parsed.layers[0].category, LayerCategory::Person);
        assert!(parsed.layers[0].confidence.is_none());
        assert!(parsed.analysis.brightness_map.is_none());
        assert!(parsed.analysis.suggestions.is_empty());
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        // No zIndex on the layer.
        let payload = r##"{
            "layers": [
                {
                    "label": "x",
                    "category": "object",
                    "boundingBox": { "top": 0, "left": 0, "bottom": 10, "right": 10 },
                    "dominantColor": "#000000"
                }
            ],
            "analysis": { "ruleOfThirds": 1, "visualBalance": 1, "eyeContact": false }
        }"##;
        assert!(serde_json::from_str::<RawResponse>(payload).is_err());
    }

    #[test]
    fn test_schema_declares_layers_and_analysis() {
        let schema = response_schema();
        assert_eq!(schema["required"][0], "layers");
        assert_eq!(schema["required"][1], "analysis");
        let category = &schema["properties"]["layers"]["items"]["properties"]["category"];
        assert_eq!(category["enum"].as_array().unwrap().len(), 6);
    }
}
