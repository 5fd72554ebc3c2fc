//! Metadata extraction from raw article bodies.
//!
//! # Responsibility
//! - Infer title, description and icon for plain-body content that ships
//!   without explicit metadata.
//!
//! # Invariants
//! - Extraction never fails; every function has a fixed fallback value.
//! - Pre-rendered HTML bodies are never passed through these heuristics.

pub mod metadata;

pub use metadata::{derive_description, derive_icon, derive_title};
