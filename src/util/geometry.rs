// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides utilities for mapping normalized bounding boxes
//! to pixel-space rectangles.

use crate::models::layer::BoundingBox;

/// A rectangle in pixel space. Width and height may be zero or negative
/// for a degenerate input box; callers must treat that as empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    /// Whether this rectangle encloses at least one pixel.
    pub fn is_empty(&self) -> bool {
        self.width < 1.0 || self.height < 1.0
    }
}

/// Convert a normalized bounding box to a pixel-space rectangle for an
/// image of the given dimensions. Pure multiplication, no clamping.
pub fn box_to_pixel_rect(bounds: &BoundingBox, width: u32, height: u32) -> PixelRect {
    PixelRect {
        x: bounds.left * width as f64,
        y: bounds.top * height as f64,
        width: bounds.width() * width as f64,
        height: bounds.height() * height as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_to_pixel_rect_scales_each_edge() {
        let bounds = BoundingBox::new(0.1, 0.2, 0.5, 0.8);
        let rect = box_to_pixel_rect(&bounds, 1000, 500);
        assert_eq!(rect.x, 200.0);
        assert_eq!(rect.y, 50.0);
        assert!((rect.width - 600.0).abs() < 1e-9);
        assert!((rect.height - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_rescaled_box_matches_thousandths() {
        // A box on the model's 0-1000 scale, divided down, must map to
        // width = (right-left)/1000 * W and height = (bottom-top)/1000 * H.
        let (top, left, bottom, right) = (120.0, 340.0, 880.0, 910.0);
        let bounds = BoundingBox::new(top / 1000.0, left / 1000.0, bottom / 1000.0, right / 1000.0);
        let (w, h) = (1920u32, 1080u32);
        let rect = box_to_pixel_rect(&bounds, w, h);
        assert!((rect.width - (right - left) / 1000.0 * w as f64).abs() < 1e-9);
        assert!((rect.height - (bottom - top) / 1000.0 * h as f64).abs() < 1e-9);
        assert!(rect.width >= 0.0);
        assert!(rect.height >= 0.0);
    }

    #[test]
    fn test_degenerate_box_yields_empty_rect() {
        let bounds = BoundingBox::new(0.5, 0.5, 0.5, 0.5);
        let rect = box_to_pixel_rect(&bounds, 800, 600);
        assert_eq!(rect.width, 0.0);
        assert_eq!(rect.height, 0.0);
        assert!(rect.is_empty());
    }

    #[test]
    fn test_full_frame_maps_to_image_size() {
        let rect = box_to_pixel_rect(&BoundingBox::full_frame(), 1920, 1080);
        assert_eq!(rect.x, 0.0);
        assert_eq!(rect.y, 0.0);
        assert_eq!(rect.width, 1920.0);
        assert_eq!(rect.height, 1080.0);
    }
}
