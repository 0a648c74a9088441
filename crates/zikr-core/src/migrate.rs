use serde_json::Value;
use thiserror::Error;

pub const LIBRARY_VERSION: u32 = 2;

#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("persisted blob has unsupported shape: expected {expected}, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },
    #[error("migration '{name}' failed: {message}")]
    Step {
        name: &'static str,
        message: String,
    },
}

pub struct Migration {
    pub to_version: u32,
    pub name: &'static str,
    pub apply: fn(Value) -> Result<Value, MigrateError>,
}

pub fn plan_migrations() -> &'static [Migration] {
    &[
        Migration {
            to_version: 1,
            name: "wrap-plan-list",
            apply: wrap_plan_list,
        },
        Migration {
            to_version: 2,
            name: "rename-legacy-plan-fields",
            apply: rename_legacy_plan_fields,
        },
    ]
}

pub fn settings_migrations() -> &'static [Migration] {
    &[
        Migration {
            to_version: 1,
            name: "wrap-settings",
            apply: wrap_settings,
        },
        Migration {
            to_version: 2,
            name: "rename-legacy-settings-fields",
            apply: rename_legacy_settings_fields,
        },
    ]
}

pub fn migrate(value: Value, steps: &[Migration]) -> Result<(Value, bool), MigrateError> {
    let mut current = value;
    let mut changed = false;

    for step in steps {
        if blob_version(&current) >= step.to_version {
            continue;
        }

        current = (step.apply)(current)?;
        set_version(&mut current, step.name, step.to_version)?;
        changed = true;
    }

    Ok((current, changed))
}

pub fn blob_version(value: &Value) -> u32 {
    value
        .as_object()
        .and_then(|object| object.get("version"))
        .and_then(Value::as_u64)
        .map(|version| version as u32)
        .unwrap_or(0)
}

fn set_version(value: &mut Value, name: &'static str, version: u32) -> Result<(), MigrateError> {
    let Some(object) = value.as_object_mut() else {
        return Err(MigrateError::Step {
            name,
            message: "migration did not produce an object".to_string(),
        });
    };

    object.insert("version".to_string(), Value::from(version));
    Ok(())
}

fn wrap_plan_list(value: Value) -> Result<Value, MigrateError> {
    match value {
        Value::Array(plans) => Ok(serde_json::json!({ "plans": plans })),
        Value::Object(object) => Ok(Value::Object(object)),
        other => Err(MigrateError::UnexpectedShape {
            expected: "plan list or plans object",
            found: value_kind(&other),
        }),
    }
}

fn rename_legacy_plan_fields(mut value: Value) -> Result<Value, MigrateError> {
    let plans = value
        .as_object_mut()
        .and_then(|object| object.get_mut("plans"))
        .and_then(Value::as_array_mut)
        .ok_or(MigrateError::UnexpectedShape {
            expected: "object with a 'plans' list",
            found: "other",
        })?;

    for plan in plans.iter_mut() {
        let Some(object) = plan.as_object_mut() else {
            continue;
        };

        rename_key(object, "userLataif", "lataif");
        rename_key(object, "isDefault", "template");
        rename_key(object, "useStartAudio", "use_start_cue");
        rename_key(object, "useEndAudio", "use_end_cue");

        if let Some(intermediate) = object
            .get_mut("intermediate")
            .and_then(Value::as_object_mut)
        {
            rename_key(intermediate, "isAuto", "auto");
        }
    }

    Ok(value)
}

fn wrap_settings(value: Value) -> Result<Value, MigrateError> {
    match value {
        Value::Object(object) if object.contains_key("settings") => Ok(Value::Object(object)),
        Value::Object(object) => Ok(serde_json::json!({ "settings": object })),
        other => Err(MigrateError::UnexpectedShape {
            expected: "settings object",
            found: value_kind(&other),
        }),
    }
}

fn rename_legacy_settings_fields(mut value: Value) -> Result<Value, MigrateError> {
    let settings = value
        .as_object_mut()
        .and_then(|object| object.get_mut("settings"))
        .and_then(Value::as_object_mut)
        .ok_or(MigrateError::UnexpectedShape {
            expected: "object with a 'settings' object",
            found: "other",
        })?;

    rename_key(settings, "play_start", "play_start_cue");
    rename_key(settings, "play_end", "play_end_cue");
    rename_key(settings, "showDefaultPlans", "show_template_plans");

    if let Some(Value::Object(audio)) = settings.remove("audio") {
        for (legacy, renamed) in [
            ("start", "start_cue"),
            ("end", "end_cue"),
            ("raabta", "raabta_cue"),
        ] {
            if let Some(Value::String(cue)) = audio.get(legacy) {
                settings.insert(renamed.to_string(), Value::String(cue.clone()));
            }
        }
    }

    for catalog_key in ["lataif", "muraqbat"] {
        let Some(entries) = settings.get_mut(catalog_key).and_then(Value::as_array_mut) else {
            continue;
        };

        for entry in entries.iter_mut() {
            if let Some(object) = entry.as_object_mut() {
                rename_key(object, "audio", "cue");
                rename_key(object, "defaultDuration", "default_duration");
            }
        }
    }

    Ok(value)
}

fn rename_key(object: &mut serde_json::Map<String, Value>, from: &str, to: &str) {
    if object.contains_key(to) {
        object.remove(from);
        return;
    }

    if let Some(value) = object.remove(from) {
        object.insert(to.to_string(), value);
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy_plan() -> Value {
        serde_json::json!({
            "id": "plan-1700000000000",
            "name": "Evening",
            "isDefault": false,
            "userLataif": [
                {"id": "L1", "name": "Latifa 1", "duration": 90},
            ],
            "intermediate": {"duration": 30, "isAuto": true},
            "raabta": {"duration": 0},
            "muraqbat": [
                {"id": "M1", "name": "Ahdiyat", "duration": 120},
            ],
            "useStartAudio": true,
            "useEndAudio": false,
        })
    }

    #[test]
    fn wrap_plan_list_wraps_a_bare_array() {
        let wrapped = wrap_plan_list(serde_json::json!([legacy_plan()])).expect("wrap");
        assert!(wrapped["plans"].is_array());
        assert_eq!(wrapped["plans"].as_array().expect("plans").len(), 1);
    }

    #[test]
    fn wrap_plan_list_rejects_scalars() {
        let error = wrap_plan_list(serde_json::json!("oops")).expect_err("reject");
        assert!(error.to_string().contains("unsupported shape"));
    }

    #[test]
    fn rename_legacy_plan_fields_maps_camel_case_keys() {
        let blob = serde_json::json!({"plans": [legacy_plan()]});
        let migrated = rename_legacy_plan_fields(blob).expect("rename");
        let plan = &migrated["plans"][0];

        assert!(plan.get("userLataif").is_none());
        assert_eq!(plan["lataif"][0]["id"], "L1");
        assert_eq!(plan["template"], false);
        assert_eq!(plan["use_start_cue"], true);
        assert_eq!(plan["use_end_cue"], false);
        assert_eq!(plan["intermediate"]["auto"], true);
        assert!(plan["intermediate"].get("isAuto").is_none());
    }

    #[test]
    fn plan_chain_migrates_a_legacy_array_to_the_current_version() {
        let (migrated, changed) =
            migrate(serde_json::json!([legacy_plan()]), plan_migrations()).expect("migrate");

        assert!(changed);
        assert_eq!(blob_version(&migrated), LIBRARY_VERSION);
        assert_eq!(migrated["plans"][0]["lataif"][0]["duration"], 90);
    }

    #[test]
    fn plan_chain_is_a_no_op_at_the_current_version() {
        let current = serde_json::json!({"version": LIBRARY_VERSION, "plans": []});
        let (migrated, changed) = migrate(current.clone(), plan_migrations()).expect("migrate");

        assert!(!changed);
        assert_eq!(migrated, current);
    }

    #[test]
    fn settings_chain_flattens_legacy_audio_assignments() {
        let legacy = serde_json::json!({
            "play_start": true,
            "play_end": false,
            "showDefaultPlans": true,
            "audio": {"start": "start", "end": "end", "raabta": "r"},
            "lataif": [
                {"id": "L1", "name": "Latifa 1", "audio": "L1", "defaultDuration": 60},
            ],
            "muraqbat": [
                {"id": "M1", "name": "Ahdiyat", "audio": "m1", "defaultDuration": 60},
            ],
        });

        let (migrated, changed) = migrate(legacy, settings_migrations()).expect("migrate");
        assert!(changed);
        assert_eq!(blob_version(&migrated), LIBRARY_VERSION);

        let settings = &migrated["settings"];
        assert_eq!(settings["play_start_cue"], true);
        assert_eq!(settings["play_end_cue"], false);
        assert_eq!(settings["show_template_plans"], true);
        assert_eq!(settings["start_cue"], "start");
        assert_eq!(settings["raabta_cue"], "r");
        assert_eq!(settings["lataif"][0]["cue"], "L1");
        assert_eq!(settings["lataif"][0]["default_duration"], 60);
        assert_eq!(settings["muraqbat"][0]["cue"], "m1");
    }

    #[test]
    fn settings_chain_drops_non_string_audio_assignments() {
        let legacy = serde_json::json!({
            "audio": {"start": [{"id": "default", "file": "blob"}], "end": "end"},
        });

        let (migrated, _changed) = migrate(legacy, settings_migrations()).expect("migrate");
        let settings = &migrated["settings"];
        assert!(settings.get("start_cue").is_none());
        assert_eq!(settings["end_cue"], "end");
    }

    #[test]
    fn rename_key_prefers_an_existing_target_key() {
        let mut object = serde_json::json!({"audio": "old", "cue": "new"})
            .as_object()
            .expect("object")
            .clone();
        rename_key(&mut object, "audio", "cue");

        assert_eq!(object.get("cue"), Some(&Value::String("new".to_string())));
        assert!(object.get("audio").is_none());
    }
}
