use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

pub const MAX_LATAIF: usize = 7;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("plan name must be non-empty")]
    EmptyName,
    #[error("plan may select at most {MAX_LATAIF} lataif")]
    TooManyLataif,
    #[error("plan already selects latifa '{id}'")]
    DuplicateLatifa { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub duration: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intermediate {
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub duration: u32,
    #[serde(default)]
    pub auto: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Raabta {
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub duration: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub lataif: Vec<PlanEntry>,
    #[serde(default)]
    pub intermediate: Intermediate,
    #[serde(default)]
    pub raabta: Raabta,
    #[serde(default)]
    pub muraqbat: Vec<PlanEntry>,
    #[serde(default)]
    pub use_start_cue: bool,
    #[serde(default)]
    pub use_end_cue: bool,
    #[serde(default)]
    pub template: bool,
    #[serde(default)]
    pub created_at: String,
}

impl Plan {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            lataif: Vec::new(),
            intermediate: Intermediate {
                duration: 20,
                auto: true,
            },
            raabta: Raabta { duration: 10 },
            muraqbat: Vec::new(),
            use_start_cue: false,
            use_end_cue: false,
            template: false,
            created_at: String::new(),
        }
    }

    pub fn validate(&self) -> Result<(), PlanError> {
        if self.name.trim().is_empty() {
            return Err(PlanError::EmptyName);
        }

        if self.lataif.len() > MAX_LATAIF {
            return Err(PlanError::TooManyLataif);
        }

        for (index, entry) in self.lataif.iter().enumerate() {
            let duplicated = self.lataif[..index]
                .iter()
                .any(|earlier| earlier.id == entry.id);
            if duplicated {
                return Err(PlanError::DuplicateLatifa {
                    id: entry.id.clone(),
                });
            }
        }

        Ok(())
    }

    pub fn add_latifa(&mut self, entry: PlanEntry) -> Result<(), PlanError> {
        if self.lataif.len() >= MAX_LATAIF {
            return Err(PlanError::TooManyLataif);
        }

        if self.lataif.iter().any(|existing| existing.id == entry.id) {
            return Err(PlanError::DuplicateLatifa { id: entry.id });
        }

        self.lataif.push(entry);
        self.normalize();
        self.resolve_intermediate();
        Ok(())
    }

    pub fn normalize(&mut self) {
        self.lataif.sort_by(|left, right| left.id.cmp(&right.id));
    }

    pub fn resolve_intermediate(&mut self) {
        if !self.intermediate.auto {
            return;
        }

        if let Some(first) = self.lataif.first() {
            self.intermediate.duration = auto_intermediate_duration(first.duration);
        }
    }

    pub fn set_intermediate_duration(&mut self, seconds: u32) {
        self.intermediate.duration = seconds;
        self.intermediate.auto = false;
    }
}

pub fn auto_intermediate_duration(first_latifa_seconds: u32) -> u32 {
    (first_latifa_seconds / 3).max(1)
}

fn lenient_seconds<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(coerce_seconds(&value))
}

pub(crate) fn coerce_seconds(value: &serde_json::Value) -> u32 {
    match value {
        serde_json::Value::Number(number) => number
            .as_f64()
            .filter(|seconds| seconds.is_finite() && *seconds > 0.0)
            .map(|seconds| seconds as u32)
            .unwrap_or(0),
        serde_json::Value::String(text) => text.trim().parse::<u32>().unwrap_or(0),
        _ => 0,
    }
}
