use super::TriageCategory;

const HIGH_WEIGHT: u32 = 50;
const MEDIUM_WEIGHT: u32 = 30;
const LOW_WEIGHT: u32 = 10;

/// Emergency presentations. Any match forces the category to red.
const HIGH_KEYWORDS: [&str; 9] = [
    "chest pain",
    "heart attack",
    "stroke",
    "difficulty breathing",
    "shortness of breath",
    "passed out",
    "unconscious",
    "bleeding heavily",
    "head injury",
];

/// Urgent presentations. Scanned only when no emergency keyword matched.
const MEDIUM_KEYWORDS: [&str; 9] = [
    "fever",
    "abdominal pain",
    "vomiting",
    "diarrhea",
    "dizziness",
    "fracture",
    "broken bone",
    "cut",
    "laceration",
];

/// Routine presentations. Add score without changing the category.
const LOW_KEYWORDS: [&str; 6] = [
    "cough",
    "cold",
    "rash",
    "minor burn",
    "sore throat",
    "ear ache",
];

/// Scan the symptom text against the keyword tiers.
///
/// Matching is plain substring containment on the lower-cased text, and
/// every matching keyword in a scanned tier contributes its full weight.
/// Lower tiers are skipped once a higher tier has raised the category.
pub(super) fn scan_symptoms(symptoms: &str) -> (u32, TriageCategory) {
    let text = symptoms.to_lowercase();
    let mut score = 0;
    let mut category = TriageCategory::Green;

    for keyword in HIGH_KEYWORDS {
        if text.contains(keyword) {
            score += HIGH_WEIGHT;
            category = category.escalate(TriageCategory::Red);
        }
    }

    if category != TriageCategory::Red {
        for keyword in MEDIUM_KEYWORDS {
            if text.contains(keyword) {
                score += MEDIUM_WEIGHT;
                category = category.escalate(TriageCategory::Yellow);
            }
        }
    }

    if category == TriageCategory::Green {
        for keyword in LOW_KEYWORDS {
            if text.contains(keyword) {
                score += LOW_WEIGHT;
            }
        }
    }

    (score, category)
}
