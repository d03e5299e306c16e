// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometry and crop extraction utilities.

pub mod crop;
pub mod geometry;
