//! Scheduling slot extraction.
//!
//! Four independent extraction passes (client, date, time, service), each
//! trying an ordered pattern list against the ORIGINAL case-preserved text
//! and stopping at the first hit. This is heuristic slot-filling, not a
//! grammar: the contract is best-effort extraction with a self-reported
//! confidence, and false positives/negatives are expected.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::normalize::strip_diacritics;

/// Number of extractable fields; the denominator of the confidence score.
const FIELD_COUNT: f32 = 4.0;
/// Ceiling for the extraction confidence.
const MAX_CONFIDENCE: f32 = 0.95;

/// Weekday names (accent-folded), rejected as false-positive client names.
const WEEKDAYS: &[&str] = &[
    "segunda", "terca", "quarta", "quinta", "sexta", "sabado", "domingo",
];

// Client names ride on the literal markers "cliente" / "visita a|ao|à",
// followed by a run of capitalized words. Case matters, so these patterns
// are NOT compiled case-insensitively.
static CLIENT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"cliente\s+([A-ZÁÀÂÃÉÊÍÓÔÕÚÇ][\w'-]*(?:\s+[A-ZÁÀÂÃÉÊÍÓÔÕÚÇ][\w'-]*)*)")
            .expect("Invalid regex: client-after-cliente pattern"),
        Regex::new(r"visita\s+(?:a|ao|à)\s+([A-ZÁÀÂÃÉÊÍÓÔÕÚÇ][\w'-]*(?:\s+[A-ZÁÀÂÃÉÊÍÓÔÕÚÇ][\w'-]*)*)")
            .expect("Invalid regex: client-after-visita pattern"),
    ]
});

static DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(?:segunda|ter[cç]a|quarta|quinta|sexta|s[aá]bado|domingo)(?:[- ]feira)?\b")
            .expect("Invalid regex: weekday pattern"),
        Regex::new(r"(?i)\bhoje\b").expect("Invalid regex: today pattern"),
        Regex::new(r"(?i)\bamanh[aã]\b").expect("Invalid regex: tomorrow pattern"),
        Regex::new(r"(?i)\bpr[oó]xim[ao]\s+(?:semana|segunda|ter[cç]a|quarta|quinta|sexta|s[aá]bado|domingo)\b")
            .expect("Invalid regex: next-week pattern"),
        Regex::new(r"(?i)\bdia\s+\d{1,2}\b").expect("Invalid regex: day-number pattern"),
    ]
});

static TIME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\b\d{1,2}:\d{2}\b").expect("Invalid regex: HH:MM pattern"),
        Regex::new(r"\b\d{1,2}h\d{2}\b").expect("Invalid regex: HHhMM pattern"),
        Regex::new(r"(?i)\b[àa]s\s+\d{1,2}\s+horas?\b").expect("Invalid regex: as-N-horas pattern"),
        Regex::new(r"(?i)\b[àa]s\s+\d{1,2}\b").expect("Invalid regex: as-N pattern"),
    ]
});

static SERVICE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)servi[cç]o\s+(?:ser[aá]|[eé])\s+([^.,;!?]+)")
            .expect("Invalid regex: service-will-be pattern"),
        Regex::new(r"(?i)\b(?:limpeza|limpesa|conserto|reparo|manuten[cç][aã]o|instala[cç][aã]o|higieniza[cç][aã]o)\s+(?:do|da|de)\s+[\w ]+")
            .expect("Invalid regex: service-noun pattern"),
        Regex::new(r"(?i)\bpara\s+(?:fazer\s+)?([a-záàâãéêíóôõúç]+(?:\s+[a-záàâãéêíóôõúç]+){0,3})")
            .expect("Invalid regex: service-after-para pattern"),
    ]
});

/// Scheduling details pulled out of a free-text message. Absent fields are
/// `None`; `confidence` grows with the number of filled fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchedulingDetails {
    /// Client the visit/appointment is for.
    pub client_name: Option<String>,
    /// Date expression as written ("segunda feira", "dia 15", "amanhã").
    pub appointment_date: Option<String>,
    /// Time expression as written ("9:00", "14h30", "às 9 horas").
    pub appointment_time: Option<String>,
    /// What will be done ("limpeza do rack").
    pub service_description: Option<String>,
    /// `filled_fields / 4 * 0.95`, capped at 0.95.
    pub confidence: f32,
}

fn is_weekday(word: &str) -> bool {
    let folded = strip_diacritics(&word.to_lowercase());
    WEEKDAYS.contains(&folded.as_str())
}

/// First capture group if present, else the whole match.
fn first_hit(patterns: &[Regex], text: &str) -> Option<String> {
    for pattern in patterns {
        if let Some(caps) = pattern.captures(text) {
            let value = caps
                .get(1)
                .or_else(|| caps.get(0))
                .map(|m| m.as_str().trim().to_string());
            if let Some(v) = value {
                if !v.is_empty() {
                    return Some(v);
                }
            }
        }
    }
    None
}

fn extract_client_name(text: &str) -> Option<String> {
    for pattern in CLIENT_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            let raw = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            // Weekday names capitalize like proper nouns ("Segunda") and
            // would pollute the capture; cut the run at the first one.
            let name: Vec<&str> = raw
                .split_whitespace()
                .take_while(|w| !is_weekday(w))
                .collect();
            if !name.is_empty() {
                return Some(name.join(" "));
            }
        }
    }
    None
}

/// Extracts scheduling slots from the original (case-preserved) message.
pub fn extract_scheduling_details(text: &str) -> SchedulingDetails {
    let client_name = extract_client_name(text);
    let appointment_date = first_hit(&DATE_PATTERNS, text);
    let appointment_time = first_hit(&TIME_PATTERNS, text);
    let service_description = first_hit(&SERVICE_PATTERNS, text);

    let filled = [
        client_name.is_some(),
        appointment_date.is_some(),
        appointment_time.is_some(),
        service_description.is_some(),
    ]
    .iter()
    .filter(|present| **present)
    .count();

    let confidence = (filled as f32 / FIELD_COUNT * MAX_CONFIDENCE).min(MAX_CONFIDENCE);

    SchedulingDetails {
        client_name,
        appointment_date,
        appointment_time,
        service_description,
        confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_scheduling_message() {
        let details = extract_scheduling_details(
            "gostaria de agendar uma visita ao cliente Farkon segunda feira as 9:00, \
             o serviço será limpesa do rack",
        );

        assert_eq!(details.client_name.as_deref(), Some("Farkon"));
        assert_eq!(details.appointment_date.as_deref(), Some("segunda feira"));
        assert_eq!(details.appointment_time.as_deref(), Some("9:00"));
        assert_eq!(details.service_description.as_deref(), Some("limpesa do rack"));
        assert!(details.confidence > 0.6);
    }

    #[test]
    fn test_weekday_never_taken_as_client_name() {
        let details = extract_scheduling_details("visita ao cliente Segunda feira");

        assert!(details.client_name.is_none());
        assert_eq!(details.appointment_date.as_deref(), Some("Segunda feira"));
    }

    #[test]
    fn test_multiword_client_name() {
        let details =
            extract_scheduling_details("agendar com o cliente Farmácia Central amanhã às 14h30");

        assert_eq!(details.client_name.as_deref(), Some("Farmácia Central"));
        assert_eq!(details.appointment_date.as_deref(), Some("amanhã"));
        assert_eq!(details.appointment_time.as_deref(), Some("14h30"));
    }

    #[test]
    fn test_hour_word_form() {
        let details = extract_scheduling_details("pode ser amanhã às 9 horas");

        assert_eq!(details.appointment_time.as_deref(), Some("às 9 horas"));
        assert_eq!(details.appointment_date.as_deref(), Some("amanhã"));
    }

    #[test]
    fn test_day_number_date() {
        let details = extract_scheduling_details("marcar para o dia 15");

        assert_eq!(details.appointment_date.as_deref(), Some("dia 15"));
    }

    #[test]
    fn test_empty_message_extracts_nothing() {
        let details = extract_scheduling_details("");

        assert!(details.client_name.is_none());
        assert!(details.appointment_date.is_none());
        assert!(details.appointment_time.is_none());
        assert!(details.service_description.is_none());
        assert_eq!(details.confidence, 0.0);
    }

    #[test]
    fn test_confidence_counts_filled_fields() {
        // date + time only: 2 of 4 fields
        let details = extract_scheduling_details("quinta-feira 10:00");

        assert!(details.client_name.is_none());
        assert!((details.confidence - 2.0 / 4.0 * 0.95).abs() < f32::EPSILON);
    }
}
