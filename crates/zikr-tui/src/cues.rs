use std::io::Write;

use zikr_core::cue::{CueError, CueOutcome, CuePlayer};

// All cue ids collapse to the terminal bell.
#[derive(Debug, Default)]
pub(crate) struct TerminalBellCues;

impl TerminalBellCues {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl CuePlayer for TerminalBellCues {
    fn play(&mut self, cue: &str) -> Result<CueOutcome, CueError> {
        let mut out = std::io::stdout();
        out.write_all(b"\x07")
            .and_then(|()| out.flush())
            .map_err(|error| CueError::Playback {
                cue: cue.to_string(),
                message: error.to_string(),
            })?;
        Ok(CueOutcome::Finished)
    }

    fn stop_all(&mut self) {}
}
