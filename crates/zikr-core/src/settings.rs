use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_enabled")]
    pub play_start_cue: bool,
    #[serde(default = "default_enabled")]
    pub play_end_cue: bool,
    #[serde(default = "default_start_cue")]
    pub start_cue: String,
    #[serde(default = "default_end_cue")]
    pub end_cue: String,
    #[serde(default = "default_raabta_cue")]
    pub raabta_cue: String,
    #[serde(default = "default_enabled")]
    pub show_template_plans: bool,
    #[serde(default = "Catalog::lataif_defaults")]
    pub lataif: Catalog,
    #[serde(default = "Catalog::muraqbat_defaults")]
    pub muraqbat: Catalog,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            play_start_cue: true,
            play_end_cue: true,
            start_cue: default_start_cue(),
            end_cue: default_end_cue(),
            raabta_cue: default_raabta_cue(),
            show_template_plans: true,
            lataif: Catalog::lataif_defaults(),
            muraqbat: Catalog::muraqbat_defaults(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_start_cue() -> String {
    "start".to_string()
}

fn default_end_cue() -> String {
    "end".to_string()
}

fn default_raabta_cue() -> String {
    "r".to_string()
}
