//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate query engine calls into use-case level APIs.
//! - Keep boundary adapters decoupled from how the snapshot is loaded.

pub mod article_service;
