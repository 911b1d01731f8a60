//! Playlist Concierge - chat-style questionnaire for business music curation.
//!
//! This crate implements the questionnaire-review-preview flow: answers are
//! collected one question at a time, confirmed on a review screen, exchanged
//! for playlist previews, and optionally followed by an upgrade, with the
//! whole session mirrored to device-local storage.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
