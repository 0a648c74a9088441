use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::cue::{CueError, CueOutcome, CuePlayer};
use crate::plan::{Plan, PlanEntry};
use crate::store::{KeyValueStore, StoreError};
use crate::wake::{WakeError, WakeHold, WakeToken};

pub(crate) fn plan_entry(id: &str, name: &str, duration: u32) -> PlanEntry {
    PlanEntry {
        id: id.to_string(),
        name: name.to_string(),
        duration,
    }
}

pub(crate) fn full_lataif_plan(duration: u32) -> Plan {
    let mut plan = Plan::new("p-full", "Full Lataif");
    plan.lataif = (1..=7)
        .map(|index| plan_entry(&format!("L{index}"), &format!("Latifa {index}"), duration))
        .collect();
    plan.intermediate.duration = duration;
    plan.intermediate.auto = false;
    plan
}

#[derive(Clone, Default)]
pub(crate) struct CueLog {
    inner: Rc<RefCell<CueLogInner>>,
}

#[derive(Default)]
struct CueLogInner {
    played: Vec<String>,
    attempted: Vec<String>,
    stops: usize,
}

impl CueLog {
    pub(crate) fn played(&self) -> Vec<String> {
        self.inner.borrow().played.clone()
    }

    pub(crate) fn attempted(&self) -> Vec<String> {
        self.inner.borrow().attempted.clone()
    }

    pub(crate) fn stops(&self) -> usize {
        self.inner.borrow().stops
    }
}

pub(crate) struct RecordingCues {
    log: CueLog,
    outcome: CueOutcome,
    fail: bool,
}

impl RecordingCues {
    pub(crate) fn finished() -> (Self, CueLog) {
        Self::with(CueOutcome::Finished, false)
    }

    pub(crate) fn pending() -> (Self, CueLog) {
        Self::with(CueOutcome::Pending, false)
    }

    pub(crate) fn failing() -> (Self, CueLog) {
        Self::with(CueOutcome::Finished, true)
    }

    fn with(outcome: CueOutcome, fail: bool) -> (Self, CueLog) {
        let log = CueLog::default();
        (
            Self {
                log: log.clone(),
                outcome,
                fail,
            },
            log,
        )
    }
}

impl CuePlayer for RecordingCues {
    fn play(&mut self, cue: &str) -> Result<CueOutcome, CueError> {
        let mut inner = self.log.inner.borrow_mut();
        inner.attempted.push(cue.to_string());

        if self.fail {
            return Err(CueError::Playback {
                cue: cue.to_string(),
                message: "playback blocked".to_string(),
            });
        }

        inner.played.push(cue.to_string());
        Ok(self.outcome)
    }

    fn stop_all(&mut self) {
        self.log.inner.borrow_mut().stops += 1;
    }
}

#[derive(Clone, Default)]
pub(crate) struct WakeLog {
    inner: Rc<RefCell<WakeLogInner>>,
}

#[derive(Default)]
struct WakeLogInner {
    acquired: usize,
    released: usize,
}

impl WakeLog {
    pub(crate) fn acquired(&self) -> usize {
        self.inner.borrow().acquired
    }

    pub(crate) fn released(&self) -> usize {
        self.inner.borrow().released
    }
}

pub(crate) struct RecordingWake {
    log: WakeLog,
    fail: bool,
    next_id: u64,
}

impl RecordingWake {
    pub(crate) fn working() -> (Self, WakeLog) {
        Self::with(false)
    }

    pub(crate) fn failing() -> (Self, WakeLog) {
        Self::with(true)
    }

    fn with(fail: bool) -> (Self, WakeLog) {
        let log = WakeLog::default();
        (
            Self {
                log: log.clone(),
                fail,
                next_id: 0,
            },
            log,
        )
    }
}

impl WakeHold for RecordingWake {
    fn acquire(&mut self) -> Result<WakeToken, WakeError> {
        if self.fail {
            return Err(WakeError::Acquire("denied by host".to_string()));
        }

        self.next_id += 1;
        self.log.inner.borrow_mut().acquired += 1;
        Ok(WakeToken::new(self.next_id))
    }

    fn release(&mut self, _token: WakeToken) {
        self.log.inner.borrow_mut().released += 1;
    }
}

#[derive(Default)]
pub(crate) struct MemoryStore {
    values: RefCell<HashMap<String, serde_json::Value>>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn seed(key: &str, value: serde_json::Value) -> Self {
        let store = Self::new();
        store.values.borrow_mut().insert(key.to_string(), value);
        store
    }

    pub(crate) fn raw(&self, key: &str) -> Option<serde_json::Value> {
        self.values.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &serde_json::Value) -> Result<(), StoreError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.clone());
        Ok(())
    }
}
