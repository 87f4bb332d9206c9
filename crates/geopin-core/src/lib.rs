// SPDX-FileCopyrightText: 2026 Geopin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the geopin photo archive bot.
//!
//! This crate provides the trait definitions, error types, and common
//! types used throughout the geopin workspace. The channel, geocoder,
//! and storage adapters all implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::GeopinError;
pub use types::{
    AdapterType, Coordinates, HealthStatus, InboundEvent, MediaRef, NewSubmission,
    Submission, SubmissionEvent, SubmissionPreview, UserEvent, UserId,
};

// Re-export all adapter traits at crate root.
pub use traits::{ChannelAdapter, Geocoder, MessageSink, PluginAdapter, RecordStore};
