use serde_json::Value;
use thiserror::Error;

use crate::migrate::{self, LIBRARY_VERSION, MigrateError};
use crate::plan::{Plan, PlanEntry};
use crate::settings::Settings;
use crate::store::{KeyValueStore, StoreError};

pub const PLANS_KEY: &str = "zikr-plans";
pub const SETTINGS_KEY: &str = "zikr-settings";

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("plan '{id}' not found")]
    PlanNotFound { id: String },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Migrate(#[from] MigrateError),
    #[error("stored {what} are malformed: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    pub plans: Vec<Plan>,
    pub settings: Settings,
}

impl Library {
    pub fn plan_by_id(&self, id: &str) -> Result<&Plan, LibraryError> {
        self.plans
            .iter()
            .find(|plan| plan.id == id)
            .ok_or_else(|| LibraryError::PlanNotFound { id: id.to_string() })
    }
}

pub fn load_library(store: &dyn KeyValueStore) -> Result<Library, LibraryError> {
    Ok(Library {
        plans: load_plans(store)?,
        settings: load_settings(store)?,
    })
}

pub fn load_plans(store: &dyn KeyValueStore) -> Result<Vec<Plan>, LibraryError> {
    let Some(blob) = store.get(PLANS_KEY)? else {
        let seeded = template_plans();
        save_plans(store, &seeded)?;
        return Ok(seeded);
    };

    let (migrated, migration_changed) = migrate::migrate(blob, migrate::plan_migrations())?;
    let stored: Vec<Plan> = decode_field(&migrated, "plans")?;

    let refreshed = refresh_templates(stored.clone());
    if migration_changed || refreshed != stored {
        save_plans(store, &refreshed)?;
    }

    Ok(refreshed)
}

pub fn save_plans(store: &dyn KeyValueStore, plans: &[Plan]) -> Result<(), LibraryError> {
    let blob = serde_json::json!({
        "version": LIBRARY_VERSION,
        "plans": plans,
    });
    store.set(PLANS_KEY, &blob)?;
    Ok(())
}

pub fn load_settings(store: &dyn KeyValueStore) -> Result<Settings, LibraryError> {
    let Some(blob) = store.get(SETTINGS_KEY)? else {
        let defaults = Settings::default();
        save_settings(store, &defaults)?;
        return Ok(defaults);
    };

    let (migrated, changed) = migrate::migrate(blob, migrate::settings_migrations())?;
    let settings: Settings = decode_field(&migrated, "settings")?;

    if changed {
        save_settings(store, &settings)?;
    }

    Ok(settings)
}

pub fn save_settings(store: &dyn KeyValueStore, settings: &Settings) -> Result<(), LibraryError> {
    let blob = serde_json::json!({
        "version": LIBRARY_VERSION,
        "settings": settings,
    });
    store.set(SETTINGS_KEY, &blob)?;
    Ok(())
}

pub fn template_plans() -> Vec<Plan> {
    vec![test_ziker_template(), long_ziker_template()]
}

fn refresh_templates(stored: Vec<Plan>) -> Vec<Plan> {
    let mut plans = template_plans();
    plans.extend(stored.into_iter().filter(|plan| !plan.template));
    plans
}

fn decode_field<T>(blob: &Value, field: &'static str) -> Result<T, LibraryError>
where
    T: serde::de::DeserializeOwned,
{
    let value = blob.get(field).cloned().unwrap_or(Value::Null);
    serde_json::from_value(value).map_err(|source| LibraryError::Decode {
        what: field,
        source,
    })
}

fn test_ziker_template() -> Plan {
    let mut plan = template_base("template-test", "Test Ziker");
    plan.lataif = full_lataif(2);
    plan.intermediate.duration = 2;
    plan.muraqbat = muraqbat(&[4, 2, 2, 2, 2, 2]);
    plan
}

fn long_ziker_template() -> Plan {
    let mut plan = template_base("template-long", "Long Ziker");
    plan.lataif = full_lataif(180);
    plan.intermediate.duration = 40;
    plan.muraqbat = muraqbat(&[180, 180, 180, 180, 180, 180]);
    plan
}

fn template_base(id: &str, name: &str) -> Plan {
    let mut plan = Plan::new(id, name);
    plan.template = true;
    plan.use_start_cue = true;
    plan.use_end_cue = true;
    plan.intermediate.auto = false;
    plan.raabta.duration = 0;
    plan
}

fn full_lataif(duration: u32) -> Vec<PlanEntry> {
    (1..=7)
        .map(|index| PlanEntry {
            id: format!("L{index}"),
            name: format!("Latifa {index}"),
            duration,
        })
        .collect()
}

fn muraqbat(durations: &[u32; 6]) -> Vec<PlanEntry> {
    let names = [
        ("M1", "Ahdiyat"),
        ("M2", "Maiyyat"),
        ("M3", "Aqrabiyat"),
        ("M4", "Saer-e-Qaba"),
        ("M5", "Roza-e-Athar"),
        ("M6", "Masjid-e-Nabawi"),
    ];
    names
        .into_iter()
        .zip(durations)
        .map(|((id, name), duration)| PlanEntry {
            id: id.to_string(),
            name: name.to_string(),
            duration: *duration,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrate::blob_version;
    use crate::test_support::MemoryStore;

    #[test]
    fn empty_store_seeds_the_template_plans() {
        let store = MemoryStore::new();

        let plans = load_plans(&store).expect("load");

        assert_eq!(plans.len(), 2);
        assert!(plans.iter().all(|plan| plan.template));
        assert_eq!(plans[0].name, "Test Ziker");
        assert_eq!(plans[1].name, "Long Ziker");

        let blob = store.raw(PLANS_KEY).expect("persisted blob");
        assert_eq!(blob_version(&blob), LIBRARY_VERSION);
    }

    #[test]
    fn template_test_ziker_matches_the_built_in_shape() {
        let plan = test_ziker_template();
        assert_eq!(plan.lataif.len(), 7);
        assert!(plan.lataif.iter().all(|entry| entry.duration == 2));
        assert_eq!(plan.intermediate.duration, 2);
        assert!(!plan.intermediate.auto);
        assert_eq!(plan.raabta.duration, 0);
        assert_eq!(plan.muraqbat[0].duration, 4);
        assert_eq!(plan.muraqbat.len(), 6);
        plan.validate().expect("template is valid");
    }

    #[test]
    fn legacy_plan_blob_loads_through_the_migration_chain() {
        let store = MemoryStore::seed(
            PLANS_KEY,
            serde_json::json!([{
                "id": "plan-1700000000000",
                "name": "Evening",
                "isDefault": false,
                "userLataif": [{"id": "L1", "name": "Latifa 1", "duration": 90}],
                "intermediate": {"duration": 30, "isAuto": false},
                "raabta": {"duration": 10},
                "muraqbat": [],
                "useStartAudio": true,
                "useEndAudio": true,
            }]),
        );

        let plans = load_plans(&store).expect("load");
        let evening = plans
            .iter()
            .find(|plan| plan.name == "Evening")
            .expect("migrated user plan");

        assert_eq!(evening.lataif.len(), 1);
        assert_eq!(evening.lataif[0].duration, 90);
        assert!(evening.use_start_cue);
        assert!(!evening.template);

        let blob = store.raw(PLANS_KEY).expect("rewritten blob");
        assert_eq!(blob_version(&blob), LIBRARY_VERSION);
    }

    #[test]
    fn stale_stored_templates_are_replaced_and_user_plans_kept() {
        let mut stale = test_ziker_template();
        stale.name = "Old Template Name".to_string();
        let user = Plan::new("plan-user", "My Plan");

        let store = MemoryStore::seed(
            PLANS_KEY,
            serde_json::json!({
                "version": LIBRARY_VERSION,
                "plans": [stale, user],
            }),
        );

        let plans = load_plans(&store).expect("load");

        assert_eq!(plans.len(), 3);
        assert_eq!(plans[0].name, "Test Ziker");
        assert_eq!(plans[1].name, "Long Ziker");
        assert_eq!(plans[2].id, "plan-user");
    }

    #[test]
    fn plan_round_trip_preserves_user_plans() {
        let store = MemoryStore::new();
        let mut plan = Plan::new("plan-user", "My Plan");
        plan.muraqbat = vec![PlanEntry {
            id: "M1".to_string(),
            name: "Ahdiyat".to_string(),
            duration: 300,
        }];

        let mut plans = template_plans();
        plans.push(plan.clone());
        save_plans(&store, &plans).expect("save");

        let loaded = load_plans(&store).expect("load");
        assert_eq!(loaded.last().expect("user plan"), &plan);
    }

    #[test]
    fn missing_settings_seed_defaults_and_persist() {
        let store = MemoryStore::new();
        let settings = load_settings(&store).expect("load");

        assert_eq!(settings, Settings::default());
        let blob = store.raw(SETTINGS_KEY).expect("persisted blob");
        assert_eq!(blob_version(&blob), LIBRARY_VERSION);
    }

    #[test]
    fn legacy_settings_blob_loads_through_the_migration_chain() {
        let store = MemoryStore::seed(
            SETTINGS_KEY,
            serde_json::json!({
                "play_start": false,
                "play_end": true,
                "showDefaultPlans": false,
                "audio": {"start": "start", "end": "end", "raabta": "r"},
            }),
        );

        let settings = load_settings(&store).expect("load");

        assert!(!settings.play_start_cue);
        assert!(settings.play_end_cue);
        assert!(!settings.show_template_plans);
        assert_eq!(settings.lataif.entries().len(), 7);
    }

    #[test]
    fn plan_by_id_reports_not_found() {
        let library = Library {
            plans: template_plans(),
            settings: Settings::default(),
        };

        assert_eq!(
            library.plan_by_id("template-test").expect("found").name,
            "Test Ziker"
        );
        let error = library.plan_by_id("missing").expect_err("not found");
        assert!(matches!(error, LibraryError::PlanNotFound { .. }));
        assert_eq!(error.to_string(), "plan 'missing' not found");
    }
}
