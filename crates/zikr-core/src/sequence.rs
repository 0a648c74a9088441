use crate::plan::{MAX_LATAIF, Plan, PlanEntry};
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Latifa,
    Repeat,
    Raabta,
    Muraqba,
}

impl PhaseKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Latifa => "latifa",
            Self::Repeat => "repeat",
            Self::Raabta => "raabta",
            Self::Muraqba => "muraqba",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceItem {
    pub kind: PhaseKind,
    pub name: String,
    pub duration: u32,
    pub cue: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sequence {
    items: Vec<SequenceItem>,
}

impl Sequence {
    pub fn items(&self) -> &[SequenceItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SequenceItem> {
        self.items.get(index)
    }
}

pub fn build(plan: &Plan, settings: &Settings) -> Sequence {
    let mut items = Vec::new();

    let mut lataif: Vec<&PlanEntry> = plan.lataif.iter().collect();
    lataif.sort_by(|left, right| left.id.cmp(&right.id));

    for entry in &lataif {
        items.push(SequenceItem {
            kind: PhaseKind::Latifa,
            name: entry.name.clone(),
            duration: entry.duration,
            cue: settings.lataif.resolve_cue(&entry.id),
        });
    }

    if let Some(first) = lataif.first() {
        items.push(SequenceItem {
            kind: PhaseKind::Repeat,
            name: format!("Repeat {}", first.name),
            duration: plan.intermediate.duration,
            cue: settings.lataif.resolve_cue(&first.id),
        });
    }

    if lataif.len() == MAX_LATAIF && plan.raabta.duration > 0 {
        items.push(SequenceItem {
            kind: PhaseKind::Raabta,
            name: "Raabta".to_string(),
            duration: plan.raabta.duration,
            cue: settings.raabta_cue.clone(),
        });
    }

    for entry in &plan.muraqbat {
        items.push(SequenceItem {
            kind: PhaseKind::Muraqba,
            name: entry.name.clone(),
            duration: entry.duration,
            cue: settings.muraqbat.resolve_cue(&entry.id),
        });
    }

    Sequence { items }
}
