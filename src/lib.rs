//! Tension Engine - Stress scoring and deterministic colors for dashboards
//!
//! This crate turns sparse runtime metrics into a single tension score with
//! a trend and confidence, derives a full color bundle from that score, and
//! keeps per-context state that observers can subscribe to.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
