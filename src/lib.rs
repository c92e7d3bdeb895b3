//! Carelane: triage scoring and queue prioritization for hospital front desks
//!
//! Carelane turns patient-reported symptoms and nurse-captured vitals into
//! priority scores and red/yellow/green categories, and keeps the waiting
//! queue ordered by them:
//! - A pure triage engine (keyword tiers, vitals thresholds, score floors)
//! - An in-memory waiting queue keyed by patient
//! - A REST surface for check-in, vitals capture, and dashboards

pub mod api;
pub mod config;
pub mod queue;
pub mod triage;

pub use triage::{evaluate_triage, TriageCategory, TriageResult, VitalsSnapshot};
