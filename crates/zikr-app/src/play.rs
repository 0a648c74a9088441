use anyhow::Result;
use zikr_core::library::LibraryError;
use zikr_core::plan::Plan;
use zikr_core::sequence::{self, Sequence};
use zikr_core::session::SessionCues;
use zikr_core::settings::Settings;

use crate::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSetup {
    pub plan_id: String,
    pub plan_name: String,
    pub sequence: Sequence,
    pub cues: SessionCues,
}

impl<'a> App<'a> {
    pub fn prepare_session(&self, plan_ref: &str) -> Result<SessionSetup> {
        let library = self.library()?;

        let plan = find_plan(&library.plans, plan_ref).ok_or_else(|| {
            LibraryError::PlanNotFound {
                id: plan_ref.to_string(),
            }
        })?;

        let sequence = sequence::build(plan, &library.settings);
        let cues = session_cues(plan, &library.settings);

        Ok(SessionSetup {
            plan_id: plan.id.clone(),
            plan_name: plan.name.clone(),
            sequence,
            cues,
        })
    }
}

fn find_plan<'p>(plans: &'p [Plan], plan_ref: &str) -> Option<&'p Plan> {
    plans
        .iter()
        .find(|plan| plan.id == plan_ref)
        .or_else(|| {
            plans
                .iter()
                .find(|plan| plan.name.eq_ignore_ascii_case(plan_ref))
        })
}

fn session_cues(plan: &Plan, settings: &Settings) -> SessionCues {
    SessionCues {
        start: (settings.play_start_cue && plan.use_start_cue)
            .then(|| settings.start_cue.clone()),
        end: (settings.play_end_cue && plan.use_end_cue).then(|| settings.end_cue.clone()),
    }
}
