use crate::cue::{CueOutcome, CuePlayer};
use crate::sequence::{Sequence, SequenceItem};
use crate::wake::{WakeHold, WakeToken};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionCues {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub current_index: usize,
    pub time_left: u32,
    pub running: bool,
    pub starting: bool,
}

pub struct SessionEngine {
    sequence: Sequence,
    cues: SessionCues,
    player: Box<dyn CuePlayer>,
    wake: Box<dyn WakeHold>,
    current_index: usize,
    time_left: u32,
    running: bool,
    starting: bool,
    wake_token: Option<WakeToken>,
}

impl SessionEngine {
    pub fn new(
        sequence: Sequence,
        cues: SessionCues,
        player: Box<dyn CuePlayer>,
        wake: Box<dyn WakeHold>,
    ) -> Self {
        Self {
            sequence,
            cues,
            player,
            wake,
            current_index: 0,
            time_left: 0,
            running: false,
            starting: false,
            wake_token: None,
        }
    }

    pub fn state(&self) -> SessionState {
        SessionState {
            current_index: self.current_index,
            time_left: self.time_left,
            running: self.running,
            starting: self.starting,
        }
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn is_completed(&self) -> bool {
        self.current_index >= self.sequence.len()
    }

    pub fn is_active(&self) -> bool {
        self.running || self.starting
    }

    pub fn current_item(&self) -> Option<&SequenceItem> {
        self.sequence.get(self.current_index)
    }

    pub fn next_item(&self) -> Option<&SequenceItem> {
        self.sequence.get(self.current_index.saturating_add(1))
    }

    pub fn start(&mut self) {
        if self.is_active() || self.is_completed() {
            return;
        }

        self.starting = true;
        self.acquire_wake_hold();

        let Some(start_cue) = self.cues.start.clone() else {
            self.finish_start();
            return;
        };

        match self.player.play(&start_cue) {
            Ok(CueOutcome::Pending) => {}
            Ok(CueOutcome::Finished) => self.finish_start(),
            Err(error) => {
                tracing::warn!(%error, "start cue failed, beginning session without it");
                self.finish_start();
            }
        }
    }

    pub fn start_cue_finished(&mut self) {
        if self.starting {
            self.finish_start();
        }
    }

    pub fn pause(&mut self) {
        if !self.is_active() {
            return;
        }

        self.running = false;
        self.starting = false;
        self.player.stop_all();
        self.release_wake_hold();
    }

    pub fn tick(&mut self) {
        if !self.running || self.time_left == 0 {
            return;
        }

        self.time_left -= 1;
        if self.time_left > 0 {
            return;
        }

        let next = self.next_positive_index(self.current_index + 1);
        if next < self.sequence.len() {
            self.current_index = next;
            self.time_left = self.sequence.items()[next].duration;
            self.play_phase_cue();
        } else {
            self.complete();
        }
    }

    pub fn skip_forward(&mut self) {
        if self.is_completed() {
            return;
        }

        let next = self.current_index + 1;
        if next >= self.sequence.len() {
            self.complete();
            return;
        }

        self.current_index = next;
        self.arm_current();
    }

    pub fn skip_back(&mut self) {
        if self.current_index == 0 {
            return;
        }

        self.current_index -= 1;
        self.arm_current();
    }

    pub fn cancel(&mut self) {
        self.player.stop_all();
        self.release_wake_hold();
        self.running = false;
        self.starting = false;
        self.current_index = 0;
        self.time_left = 0;
    }

    pub fn wake_hold_lost(&mut self) {
        if self.wake_token.take().is_some() && self.is_active() {
            self.acquire_wake_hold();
        }
    }

    fn finish_start(&mut self) {
        self.starting = false;
        self.running = true;

        if self.time_left == 0 {
            let index = self.next_positive_index(self.current_index);
            self.current_index = index;
            if self.is_completed() {
                self.complete();
                return;
            }
            self.time_left = self.sequence.items()[index].duration;
        }

        self.play_phase_cue();
    }

    fn arm_current(&mut self) {
        self.starting = false;
        self.running = true;
        self.time_left = self.sequence.items()[self.current_index].duration;
        self.play_phase_cue();
    }

    fn complete(&mut self) {
        self.current_index = self.sequence.len();
        self.time_left = 0;
        self.running = false;
        self.starting = false;
        self.release_wake_hold();

        if let Some(end_cue) = self.cues.end.clone()
            && let Err(error) = self.player.play(&end_cue)
        {
            tracing::warn!(%error, "end cue failed after session completion");
        }
    }

    fn next_positive_index(&self, from: usize) -> usize {
        let mut index = from;
        while index < self.sequence.len() && self.sequence.items()[index].duration == 0 {
            index += 1;
        }
        index
    }

    fn play_phase_cue(&mut self) {
        let Some(cue) = self.current_item().map(|item| item.cue.clone()) else {
            return;
        };

        if let Err(error) = self.player.play(&cue) {
            tracing::warn!(%error, "phase cue failed, countdown continues");
        }
    }

    fn acquire_wake_hold(&mut self) {
        match self.wake.acquire() {
            Ok(token) => self.wake_token = Some(token),
            Err(error) => {
                tracing::warn!(%error, "wake hold unavailable, session continues without it");
            }
        }
    }

    fn release_wake_hold(&mut self) {
        if let Some(token) = self.wake_token.take() {
            self.wake.release(token);
        }
    }
}
