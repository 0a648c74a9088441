use anyhow::{Context, Result, bail};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use zikr_core::library::{self, LibraryError};
use zikr_core::plan::Plan;

use crate::App;

impl<'a> App<'a> {
    pub fn save_plan(&self, mut plan: Plan) -> Result<Plan> {
        if plan.template {
            bail!("template plan '{}' is read-only", plan.name);
        }

        plan.normalize();
        plan.resolve_intermediate();
        plan.validate()
            .with_context(|| format!("plan '{}' is invalid", plan.name))?;

        if plan.created_at.is_empty() {
            plan.created_at = OffsetDateTime::now_utc()
                .format(&Rfc3339)
                .context("failed to format plan creation timestamp")?;
        }

        let mut plans =
            library::load_plans(self.store).context("failed to load stored plans")?;
        match plans.iter_mut().find(|stored| stored.id == plan.id) {
            Some(stored) => *stored = plan.clone(),
            None => plans.push(plan.clone()),
        }

        library::save_plans(self.store, &plans).context("failed to persist plans")?;
        Ok(plan)
    }

    pub fn delete_plan(&self, id: &str) -> Result<()> {
        let mut plans =
            library::load_plans(self.store).context("failed to load stored plans")?;

        let Some(index) = plans.iter().position(|plan| plan.id == id) else {
            return Err(LibraryError::PlanNotFound { id: id.to_string() }.into());
        };

        if plans[index].template {
            bail!("template plan '{}' cannot be deleted", plans[index].name);
        }

        plans.remove(index);
        library::save_plans(self.store, &plans).context("failed to persist plans")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use zikr_core::library::LibraryError;
    use zikr_core::plan::{Plan, PlanEntry};
    use zikr_core::store::JsonFileStore;

    use crate::App;

    fn entry(id: &str, name: &str, duration: u32) -> PlanEntry {
        PlanEntry {
            id: id.to_string(),
            name: name.to_string(),
            duration,
        }
    }

    #[test]
    fn save_plan_runs_the_duration_resolver_and_stamps_creation_time() {
        let temp = tempfile::tempdir().expect("temp dir");
        let store = JsonFileStore::new(temp.path());
        let app = App::new(&store);

        let mut plan = Plan::new("plan-1", "Morning");
        plan.lataif = vec![entry("L1", "Latifa 1", 90)];
        plan.intermediate.auto = true;

        let saved = app.save_plan(plan).expect("save");
        assert_eq!(saved.intermediate.duration, 30);
        assert!(!saved.created_at.is_empty());

        let library = app.library().expect("library");
        let stored = library.plan_by_id("plan-1").expect("stored plan");
        assert_eq!(stored, &saved);
    }

    #[test]
    fn save_plan_upserts_by_id_and_keeps_the_original_timestamp() {
        let temp = tempfile::tempdir().expect("temp dir");
        let store = JsonFileStore::new(temp.path());
        let app = App::new(&store);

        let mut plan = Plan::new("plan-1", "Morning");
        plan.lataif = vec![entry("L1", "Latifa 1", 60)];
        let first = app.save_plan(plan).expect("first save");

        let mut updated = first.clone();
        updated.name = "Morning (revised)".to_string();
        let second = app.save_plan(updated).expect("second save");

        assert_eq!(second.created_at, first.created_at);

        let library = app.library().expect("library");
        let morning_plans: Vec<_> = library
            .plans
            .iter()
            .filter(|stored| stored.id == "plan-1")
            .collect();
        assert_eq!(morning_plans.len(), 1);
        assert_eq!(morning_plans[0].name, "Morning (revised)");
    }

    #[test]
    fn save_plan_rejects_invalid_and_template_plans() {
        let temp = tempfile::tempdir().expect("temp dir");
        let store = JsonFileStore::new(temp.path());
        let app = App::new(&store);

        let blank = Plan::new("plan-1", "   ");
        assert!(app.save_plan(blank).is_err());

        let mut template = Plan::new("template-test", "Test Ziker");
        template.template = true;
        let error = app.save_plan(template).expect_err("read-only");
        assert!(error.to_string().contains("read-only"));
    }

    #[test]
    fn delete_plan_removes_user_plans_and_reports_missing_ids() {
        let temp = tempfile::tempdir().expect("temp dir");
        let store = JsonFileStore::new(temp.path());
        let app = App::new(&store);

        let mut plan = Plan::new("plan-1", "Morning");
        plan.lataif = vec![entry("L1", "Latifa 1", 60)];
        app.save_plan(plan).expect("save");

        app.delete_plan("plan-1").expect("delete");
        let library = app.library().expect("library");
        assert!(library.plan_by_id("plan-1").is_err());

        let error = app.delete_plan("plan-1").expect_err("already gone");
        assert!(matches!(
            error.downcast_ref::<LibraryError>(),
            Some(LibraryError::PlanNotFound { .. })
        ));
    }

    #[test]
    fn delete_plan_refuses_templates() {
        let temp = tempfile::tempdir().expect("temp dir");
        let store = JsonFileStore::new(temp.path());
        let app = App::new(&store);
        app.library().expect("seed templates");

        let error = app.delete_plan("template-test").expect_err("refused");
        assert!(error.to_string().contains("cannot be deleted"));
    }
}
