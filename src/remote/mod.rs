// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Remote analysis client: request construction, the round trip to the
//! hosted multimodal model, and response normalization.

pub mod client;
pub mod normalize;
pub mod schema;
