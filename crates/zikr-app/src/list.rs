use anyhow::Result;
use zikr_core::{progress, sequence};

use crate::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRow {
    pub id: String,
    pub name: String,
    pub phases: usize,
    pub total_seconds: u64,
    pub template: bool,
}

impl<'a> App<'a> {
    pub fn list_plans(&self) -> Result<Vec<PlanRow>> {
        let library = self.library()?;

        let rows = library
            .plans
            .iter()
            .filter(|plan| library.settings.show_template_plans || !plan.template)
            .map(|plan| {
                let built = sequence::build(plan, &library.settings);
                PlanRow {
                    id: plan.id.clone(),
                    name: plan.name.clone(),
                    phases: built.len(),
                    total_seconds: progress::total_duration(&built),
                    template: plan.template,
                }
            })
            .collect();

        Ok(rows)
    }
}
