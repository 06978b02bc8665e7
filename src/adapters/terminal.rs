use crate::domain::ports::KeySource;
use crate::utils::error::Result;
use async_trait::async_trait;
use crossterm::event::{Event, EventStream, KeyEvent};
use crossterm::terminal;
use futures::StreamExt;

/// Raw mode for as long as this value lives.
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    pub fn enable() -> Result<Self> {
        terminal::enable_raw_mode()?;
        tracing::debug!("Terminal switched to raw mode");
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            tracing::warn!("Failed to restore terminal mode: {}", e);
        }
    }
}

/// Key presses read from the controlling terminal.
pub struct TerminalKeys {
    events: EventStream,
    _raw: RawModeGuard,
}

impl TerminalKeys {
    /// Enter raw mode and start listening. Fails when stdin is not a terminal.
    pub fn open() -> Result<Self> {
        let raw = RawModeGuard::enable()?;
        Ok(Self {
            events: EventStream::new(),
            _raw: raw,
        })
    }
}

#[async_trait]
impl KeySource for TerminalKeys {
    async fn next_key(&mut self) -> Result<Option<KeyEvent>> {
        while let Some(event) = self.events.next().await {
            // resize, focus, mouse and paste events are not input
            if let Event::Key(key) = event? {
                return Ok(Some(key));
            }
        }
        Ok(None)
    }
}
