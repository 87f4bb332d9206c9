// SPDX-FileCopyrightText: 2026 Geopin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row types for the storage layer.
//!
//! The storage crate persists the submission types defined in `geopin-core`
//! so the agent and channel crates never depend on rusqlite directly.

pub use geopin_core::types::{NewSubmission, Submission, SubmissionPreview};
