//! Test Module
//!
//! Cross-module test suite for the JavaBuddy core.
//!
//! ## Test Categories
//! - `brain_tests`: normalization, query types, concepts, confidence, contexts
//! - `responder_tests`: end-to-end resolution scenarios over small knowledge bases
//! - `engine_tests`: engine actor lifecycle, loading and knowledge deltas
//! - `mood_tests`: face state driven through a whole conversation

pub mod brain_tests;
pub mod mood_tests;
