// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for the remote analysis pipeline.
//!
//! Render failures (crop extraction, PNG encoding) are deliberately not
//! represented here: they degrade to `None` at the crop boundary instead
//! of propagating.

use thiserror::Error;

/// Errors surfaced by configuration checks and the remote analysis
/// round trip. None of these are retried internally.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The API credential is absent from the environment. Fatal at
    /// startup; no network call is ever attempted without it.
    #[error("missing API credential: set the {0} environment variable")]
    MissingCredential(&'static str),

    /// The network round trip itself failed.
    #[error("request to the analysis model failed: {0}")]
    RemoteCall(#[from] reqwest::Error),

    /// The endpoint answered with a failure status; a server-side
    /// problem, not a schema one.
    #[error("model endpoint returned HTTP {0}: {1}")]
    RemoteStatus(reqwest::StatusCode, String),

    /// The model answered, but the payload is not the structured data we
    /// asked for.
    #[error("malformed analysis response: {0}")]
    ResponseShape(String),
}

impl AnalysisError {
    /// Shorthand for a shape error with a formatted message.
    pub fn shape(msg: impl Into<String>) -> Self {
        AnalysisError::ResponseShape(msg.into())
    }
}
