// SPDX-FileCopyrightText: 2026 Geopin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! Every external collaborator of the submission flow (messaging channel,
//! geocoder, record store) is reached through one of these traits so that
//! the flow can be exercised against in-memory fakes.

pub mod adapter;
pub mod channel;
pub mod geocode;
pub mod storage;

pub use adapter::PluginAdapter;
pub use channel::{ChannelAdapter, MessageSink};
pub use geocode::Geocoder;
pub use storage::RecordStore;
