use thiserror::Error;

#[derive(Debug, Error)]
pub enum CueError {
    #[error("failed to play cue '{cue}': {message}")]
    Playback { cue: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueOutcome {
    Finished,
    Pending,
}

pub trait CuePlayer {
    fn play(&mut self, cue: &str) -> Result<CueOutcome, CueError>;
    fn stop_all(&mut self);
}

#[derive(Debug, Default)]
pub struct SilentCues;

impl SilentCues {
    pub fn new() -> Self {
        Self
    }
}

impl CuePlayer for SilentCues {
    fn play(&mut self, _cue: &str) -> Result<CueOutcome, CueError> {
        Ok(CueOutcome::Finished)
    }

    fn stop_all(&mut self) {}
}
