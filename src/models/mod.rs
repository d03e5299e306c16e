// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Core data model: detected layers and composition analysis.

pub mod analysis;
pub mod layer;
