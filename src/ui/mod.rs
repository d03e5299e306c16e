// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the LayerLens application.

pub mod analysis;
pub mod canvas;
pub mod layers;
pub mod toolbar;
