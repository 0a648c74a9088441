use serde::{Deserialize, Serialize};

pub const DEFAULT_CUE: &str = "default_beep";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub cue: String,
    pub default_duration: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn find(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn resolve_cue(&self, id: &str) -> String {
        self.find(id)
            .map(|entry| entry.cue.clone())
            .unwrap_or_else(|| DEFAULT_CUE.to_string())
    }

    pub fn lataif_defaults() -> Self {
        let entries = (1..=7)
            .map(|index| CatalogEntry {
                id: format!("L{index}"),
                name: format!("Latifa {index}"),
                cue: format!("L{index}"),
                default_duration: 60,
            })
            .collect();
        Self { entries }
    }

    pub fn muraqbat_defaults() -> Self {
        let names = [
            ("M1", "Ahdiyat", "m1"),
            ("M2", "Maiyyat", "m2"),
            ("M3", "Aqrabiyat", "m3"),
            ("M4", "Saer-e-Qaba", "m4"),
            ("M5", "Roza-e-Athar", "m5"),
            ("M6", "Masjid-e-Nabawi", "m6"),
        ];
        let entries = names
            .into_iter()
            .map(|(id, name, cue)| CatalogEntry {
                id: id.to_string(),
                name: name.to_string(),
                cue: cue.to_string(),
                default_duration: 60,
            })
            .collect();
        Self { entries }
    }
}
