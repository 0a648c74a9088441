use thiserror::Error;

#[derive(Debug, Error)]
pub enum WakeError {
    #[error("wake hold acquisition failed: {0}")]
    Acquire(String),
}

#[derive(Debug, PartialEq, Eq)]
pub struct WakeToken(u64);

impl WakeToken {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

pub trait WakeHold {
    fn acquire(&mut self) -> Result<WakeToken, WakeError>;
    fn release(&mut self, token: WakeToken);
}

#[derive(Debug, Default)]
pub struct NullWakeHold {
    next_id: u64,
}

impl NullWakeHold {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WakeHold for NullWakeHold {
    fn acquire(&mut self) -> Result<WakeToken, WakeError> {
        self.next_id += 1;
        Ok(WakeToken::new(self.next_id))
    }

    fn release(&mut self, _token: WakeToken) {}
}
