// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Analysis result serialization.
//!
//! This module handles exporting the current analysis result to JSON
//! and reading such a file back.

use crate::models::analysis::AnalysisResult;
use anyhow::Result;
use std::path::Path;

/// Default filename offered when exporting a result.
pub const EXPORT_FILENAME: &str = "thumbnail_data.json";

/// Export the full analysis result to JSON, exactly as held in memory.
pub fn export_json(result: &AnalysisResult, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Import an analysis result from a previously exported JSON file.
pub fn import_json(path: &Path) -> Result<AnalysisResult> {
    let json = std::fs::read_to_string(path)?;
    let result = serde_json::from_str(&json)?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::{CompositionAnalysis, WeightCenter};
    use crate::models::layer::{BoundingBox, Layer, LayerCategory};

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            layers: vec![
                Layer {
                    id: "layer-background".to_string(),
                    label: "Background".to_string(),
                    category: LayerCategory::Background,
                    subtype: None,
                    confidence: 0.5,
                    bounding_box: BoundingBox::full_frame(),
                    z_index: 0,
                    dominant_color: "#000000".to_string(),
                    visible: true,
                },
                Layer {
                    id: "layer-1".to_string(),
                    label: "Main subject".to_string(),
                    category: LayerCategory::Person,
                    subtype: Some("portrait".to_string()),
                    confidence: 0.97,
                    bounding_box: BoundingBox::new(0.1, 0.2, 0.9, 0.8),
                    z_index: 2,
                    dominant_color: "#a0522d".to_string(),
                    visible: false,
                },
            ],
            analysis: CompositionAnalysis {
                rule_of_thirds: 78.0,
                visual_balance: 64.0,
                contrast_level: "High".to_string(),
                brightness_map: "Balanced".to_string(),
                eye_contact: true,
                dominant_colors: vec!["#a0522d".to_string(), "#1e2a3a".to_string()],
                visual_weight_center: WeightCenter { x: 40.0, y: 55.0 },
                suggestions: vec!["Crop tighter on the subject".to_string()],
            },
        }
    }

    #[test]
    fn test_export_import_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILENAME);

        let original = sample_result();
        export_json(&original, &path).unwrap();
        let reloaded = import_json(&path).unwrap();

        assert_eq!(reloaded, original);
    }

    #[test]
    fn test_export_preserves_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILENAME);
        export_json(&sample_result(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["layers"][0]["boundingBox"]["bottom"], 1.0);
        assert_eq!(value["layers"][1]["zIndex"], 2);
        assert_eq!(value["analysis"]["brightnessMap"], "Balanced");
        assert_eq!(value["analysis"]["visualWeightCenter"]["x"], 40.0);
    }

    #[test]
    fn test_import_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(import_json(&path).is_err());
    }
}
