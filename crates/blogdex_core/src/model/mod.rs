//! Article domain model.
//!
//! # Responsibility
//! - Define the canonical article record shared by ingestion, queries and
//!   boundary adapters.
//! - Provide lightweight projections (summary, markdown, minimal JSON).
//!
//! # Invariants
//! - Every article is identified by a stable, file- or manifest-derived slug.
//! - `created_at` is always a concrete calendar date once loaded.

pub mod article;
