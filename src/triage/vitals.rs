use serde::{Serialize, Deserialize};

use super::TriageCategory;

/// One structured vitals reading captured by clinical staff.
///
/// Every field is independently optional; a snapshot with no populated
/// fields contributes nothing, same as no snapshot at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VitalsSnapshot {
    /// Heart rate in beats per minute
    pub heart_rate: Option<f64>,
    /// Systolic blood pressure in mmHg
    pub bp_systolic: Option<f64>,
    /// Oxygen saturation in percent
    pub spo2: Option<f64>,
    /// Body temperature in degrees Celsius
    pub temperature: Option<f64>,
}

impl VitalsSnapshot {
    /// Readings in `VITAL_RULES` order.
    fn readings(&self) -> [Option<f64>; 4] {
        [self.heart_rate, self.bp_systolic, self.spo2, self.temperature]
    }
}

/// An open band: breached by readings strictly above `above` or strictly
/// below `below`. An unset bound never matches.
struct Band {
    above: Option<f64>,
    below: Option<f64>,
}

impl Band {
    fn breached(&self, value: f64) -> bool {
        self.above.map_or(false, |limit| value > limit)
            || self.below.map_or(false, |limit| value < limit)
    }
}

struct VitalRule {
    critical: Band,
    warning: Band,
    critical_weight: u32,
    warning_weight: u32,
}

// Clinical thresholds, ordered as VitalsSnapshot::readings: heart rate,
// systolic blood pressure, SpO2, temperature. The temperature warning band
// has no lower bound.
static VITAL_RULES: [VitalRule; 4] = [
    VitalRule {
        critical: Band { above: Some(120.0), below: Some(40.0) },
        warning: Band { above: Some(100.0), below: Some(50.0) },
        critical_weight: 40,
        warning_weight: 20,
    },
    VitalRule {
        critical: Band { above: Some(180.0), below: Some(80.0) },
        warning: Band { above: Some(140.0), below: Some(90.0) },
        critical_weight: 40,
        warning_weight: 20,
    },
    VitalRule {
        critical: Band { above: None, below: Some(90.0) },
        warning: Band { above: None, below: Some(95.0) },
        critical_weight: 50,
        warning_weight: 20,
    },
    VitalRule {
        critical: Band { above: Some(39.5), below: Some(35.0) },
        warning: Band { above: Some(38.0), below: None },
        critical_weight: 30,
        warning_weight: 15,
    },
];

/// Evaluate every populated vital against its rule, critical band first.
/// A reading breaching neither band contributes nothing; absent fields
/// never match. Runs regardless of what the lexical pass concluded.
pub(super) fn scan_vitals(vitals: &VitalsSnapshot) -> (u32, TriageCategory) {
    let mut score = 0;
    let mut category = TriageCategory::Green;

    for (rule, reading) in VITAL_RULES.iter().zip(vitals.readings()) {
        if let Some(value) = reading {
            if rule.critical.breached(value) {
                score += rule.critical_weight;
                category = category.escalate(TriageCategory::Red);
            } else if rule.warning.breached(value) {
                score += rule.warning_weight;
                category = category.escalate(TriageCategory::Yellow);
            }
        }
    }

    (score, category)
}
