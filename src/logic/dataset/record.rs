use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// EVENT
// ============================================================================

/// One alert row after preprocessing. `is_attack` is only meaningful once the
/// stream has gone through the labeler.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Event {
    #[serde(rename = "_time")]
    pub timestamp: DateTime<Utc>,
    pub signature: String,
    #[serde(rename = "RuleAnnotation.mitre_attack.id")]
    pub mitre_id: String,
    #[serde(rename = "severity_id")]
    pub severity: f64,
    #[serde(rename = "EventType")]
    pub event_type: String,
    pub tag: String,
    #[serde(rename = "path_category_detailed")]
    pub path_category: String,
    pub process_id: String,
    pub parent_process_id: String,
    /// Exported as 0/1
    #[serde(with = "attack_flag")]
    pub is_attack: bool,
}

impl Event {
    /// Unlabeled event with empty categorical fields
    pub fn new(timestamp: DateTime<Utc>, signature: &str, severity: f64) -> Self {
        Self {
            timestamp,
            signature: signature.to_string(),
            mitre_id: String::new(),
            severity,
            event_type: String::new(),
            tag: String::new(),
            path_category: String::new(),
            process_id: String::new(),
            parent_process_id: String::new(),
            is_attack: false,
        }
    }

    pub fn labeled(mut self, is_attack: bool) -> Self {
        self.is_attack = is_attack;
        self
    }
}

mod attack_flag {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(u64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match Flag::deserialize(deserializer)? {
            Flag::Bool(b) => Ok(b),
            Flag::Int(0) => Ok(false),
            Flag::Int(1) => Ok(true),
            Flag::Int(n) => Err(de::Error::custom(format!("invalid attack flag {}", n))),
            Flag::Text(t) => match t.trim() {
                "0" | "false" | "False" => Ok(false),
                "1" | "true" | "True" => Ok(true),
                other => Err(de::Error::custom(format!("invalid attack flag '{}'", other))),
            },
        }
    }
}

// ============================================================================
// ATTACK INTERVAL
// ============================================================================

/// Ground-truth attack window from the run log
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AttackInterval {
    #[serde(rename = "Codice attacco")]
    pub code: String,
    #[serde(rename = "Data inizio attacco")]
    pub start: DateTime<Utc>,
    #[serde(rename = "Data fine attacco")]
    pub end: DateTime<Utc>,
}

impl AttackInterval {
    pub fn new(code: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            code: code.to_string(),
            start,
            end,
        }
    }
}

// ============================================================================
// WINDOW AGGREGATE
// ============================================================================

/// Everything observed inside one attack window. The lists are parallel:
/// index `i` of every list comes from the same event.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct WindowAggregate {
    pub attack_code: String,
    pub signatures: Vec<String>,
    pub mitre_ids: Vec<String>,
    pub severities: Vec<f64>,
    pub event_types: Vec<String>,
    pub tags: Vec<String>,
    pub path_categories: Vec<String>,

    pub severity_max: f64,
    pub severity_mean: f64,
    pub severity_min: f64,
}

impl WindowAggregate {
    pub fn new(attack_code: &str) -> Self {
        Self {
            attack_code: attack_code.to_string(),
            ..Default::default()
        }
    }

    pub fn push(&mut self, event: &Event) {
        self.signatures.push(event.signature.clone());
        self.mitre_ids.push(event.mitre_id.clone());
        self.severities.push(event.severity);
        self.event_types.push(event.event_type.clone());
        self.tags.push(event.tag.clone());
        self.path_categories.push(event.path_category.clone());
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// Recompute max/mean/min severity; empty windows get 0 everywhere
    pub fn refresh_severity_stats(&mut self) {
        let (max, mean, min) = severity_stats(&self.severities);
        self.severity_max = max;
        self.severity_mean = mean;
        self.severity_min = min;
    }
}

/// (max, mean, min) of a severity list, all 0 when empty
pub fn severity_stats(values: &[f64]) -> (f64, f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0, 0.0);
    }
    let max = values.iter().copied().fold(f64::MIN, f64::max);
    let min = values.iter().copied().fold(f64::MAX, f64::min);
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    (max, mean, min)
}
