//! In-memory waiting queue
//!
//! Keeps one entry per waiting patient and its stored triage result in
//! sync with the engine:
//! - Check-in scores the symptom text with no vitals
//! - A nurse vitals submission re-runs the full pass and replaces the result
//! - Listings come back priority-ordered for the dashboards

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

use crate::triage::{evaluate_triage, TriageResult, VitalsSnapshot};

/// One waiting patient and their current classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueEntry {
    pub patient_id: String,
    pub name: Option<String>,
    pub symptoms: String,
    pub vitals: Option<VitalsSnapshot>,
    pub triage: TriageResult,
    pub checked_in_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub enum QueueError {
    PatientNotFound(String),
    AlreadyCheckedIn(String),
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::PatientNotFound(id) => write!(f, "Patient not in queue: {}", id),
            QueueError::AlreadyCheckedIn(id) => write!(f, "Patient already checked in: {}", id),
        }
    }
}

impl std::error::Error for QueueError {}

#[derive(Debug)]
pub struct QueueEngine {
    entries: RwLock<HashMap<String, QueueEntry>>,
}

impl QueueEngine {
    pub fn new() -> Self {
        QueueEngine {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Register a patient at the front desk. The initial classification is
    /// scored from the symptom text alone; vitals arrive later from the
    /// nurse station.
    pub fn check_in(
        &self,
        patient_id: String,
        name: Option<String>,
        symptoms: String,
    ) -> Result<QueueEntry, QueueError> {
        let mut entries = self.entries.write().unwrap();

        if entries.contains_key(&patient_id) {
            return Err(QueueError::AlreadyCheckedIn(patient_id));
        }

        let triage = evaluate_triage(&symptoms, &VitalsSnapshot::default());
        let now = Utc::now();
        let entry = QueueEntry {
            patient_id: patient_id.clone(),
            name,
            symptoms,
            vitals: None,
            triage,
            checked_in_at: now,
            updated_at: now,
        };

        entries.insert(patient_id, entry.clone());
        Ok(entry)
    }

    /// Record a nurse vitals submission. Re-runs the full triage pass over
    /// the stored symptom text (optionally updated) plus the new snapshot,
    /// replacing the stored result wholesale.
    pub fn record_vitals(
        &self,
        patient_id: &str,
        vitals: VitalsSnapshot,
        symptoms: Option<String>,
    ) -> Result<QueueEntry, QueueError> {
        let mut entries = self.entries.write().unwrap();

        let entry = entries
            .get_mut(patient_id)
            .ok_or_else(|| QueueError::PatientNotFound(patient_id.to_string()))?;

        if let Some(symptoms) = symptoms {
            entry.symptoms = symptoms;
        }
        entry.vitals = Some(vitals);
        entry.triage = evaluate_triage(&entry.symptoms, &vitals);
        entry.updated_at = Utc::now();

        Ok(entry.clone())
    }

    /// Take a patient off the queue, e.g. once called back to a doctor.
    pub fn remove(&self, patient_id: &str) -> Result<QueueEntry, QueueError> {
        self.entries
            .write()
            .unwrap()
            .remove(patient_id)
            .ok_or_else(|| QueueError::PatientNotFound(patient_id.to_string()))
    }

    /// All waiting patients, most urgent first: category severity, then
    /// score, then arrival time.
    pub fn list(&self) -> Vec<QueueEntry> {
        let entries = self.entries.read().unwrap();
        let mut listing: Vec<QueueEntry> = entries.values().cloned().collect();

        listing.sort_by(|a, b| {
            b.triage
                .category
                .cmp(&a.triage.category)
                .then(b.triage.score.cmp(&a.triage.score))
                .then(a.checked_in_at.cmp(&b.checked_in_at))
        });

        listing
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::TriageCategory;

    #[test]
    fn check_in_scores_symptoms_without_vitals() {
        let queue = QueueEngine::new();
        let entry = queue
            .check_in("p1".to_string(), None, "chest pain".to_string())
            .unwrap();

        assert_eq!(entry.triage.score, 50);
        assert_eq!(entry.triage.category, TriageCategory::Red);
        assert!(entry.vitals.is_none());
    }

    #[test]
    fn duplicate_check_in_is_rejected() {
        let queue = QueueEngine::new();
        queue.check_in("p1".to_string(), None, "cough".to_string()).unwrap();

        let err = queue
            .check_in("p1".to_string(), None, "cough".to_string())
            .unwrap_err();
        assert!(matches!(err, QueueError::AlreadyCheckedIn(_)));
    }

    #[test]
    fn vitals_submission_rescores_entry() {
        let queue = QueueEngine::new();
        queue.check_in("p1".to_string(), None, "cough".to_string()).unwrap();

        let vitals = VitalsSnapshot { spo2: Some(85.0), ..Default::default() };
        let entry = queue.record_vitals("p1", vitals, None).unwrap();

        assert_eq!(entry.triage.score, 60);
        assert_eq!(entry.triage.category, TriageCategory::Red);
        assert_eq!(entry.vitals, Some(vitals));
    }

    #[test]
    fn vitals_for_unknown_patient_fail() {
        let queue = QueueEngine::new();
        let err = queue
            .record_vitals("ghost", VitalsSnapshot::default(), None)
            .unwrap_err();
        assert!(matches!(err, QueueError::PatientNotFound(_)));
    }

    #[test]
    fn listing_orders_by_severity_then_score() {
        let queue = QueueEngine::new();
        queue.check_in("routine".to_string(), None, "rash".to_string()).unwrap();
        queue.check_in("urgent".to_string(), None, "fever".to_string()).unwrap();
        queue.check_in("emergency".to_string(), None, "stroke".to_string()).unwrap();
        queue
            .check_in("worst".to_string(), None, "stroke and unconscious".to_string())
            .unwrap();

        let listing = queue.list();
        let ids: Vec<&str> = listing.iter().map(|e| e.patient_id.as_str()).collect();
        assert_eq!(ids, vec!["worst", "emergency", "urgent", "routine"]);
    }

    #[test]
    fn remove_takes_patient_off_the_queue() {
        let queue = QueueEngine::new();
        queue.check_in("p1".to_string(), None, "rash".to_string()).unwrap();

        let removed = queue.remove("p1").unwrap();
        assert_eq!(removed.patient_id, "p1");
        assert!(queue.is_empty());
        assert!(matches!(queue.remove("p1"), Err(QueueError::PatientNotFound(_))));
    }
}
