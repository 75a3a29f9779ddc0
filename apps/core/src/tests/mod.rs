//! Test Module
//!
//! Cross-module test suite for the PulseBoard assistant backend.
//!
//! ## Test Categories
//! - `assistant_tests`: Conversation workflows over the real classifier and template pools
//! - `generator_tests`: Template pool coverage, artifact export, wire-format shapes
//! - `api_tests`: HTTP handler behavior, validation, and dispatch

pub mod api_tests;
