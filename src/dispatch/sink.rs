use std::sync::{Arc, Mutex};

use crate::dispatch::command::KnobCommand;
use crate::error::Result;

/// Boundary to the external librarian.
///
/// Implementations transmit one knob at a time; a failed send must report
/// [`crate::Error::DispatchFailure`] and leave no other state behind — the
/// session's presets are never touched by the dispatch path.
pub trait CommandSink {
    fn send(&mut self, cmd: &KnobCommand) -> Result<()>;
}

/// Prints commands instead of transmitting them. Used by the demo binary.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl CommandSink for StdoutSink {
    fn send(&mut self, cmd: &KnobCommand) -> Result<()> {
        println!("knob {} {}", cmd.label(), cmd.value);
        Ok(())
    }
}

/// Records every command for inspection. The log handle can be cloned out
/// before the sink moves into a dispatcher thread.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    log: Arc<Mutex<Vec<(String, f32)>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> Arc<Mutex<Vec<(String, f32)>>> {
        Arc::clone(&self.log)
    }
}

impl CommandSink for RecordingSink {
    fn send(&mut self, cmd: &KnobCommand) -> Result<()> {
        self.log
            .lock()
            .expect("recording sink log poisoned")
            .push((cmd.label().to_string(), cmd.value));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formant::FormantField;

    #[test]
    fn recording_sink_keeps_send_order() {
        let mut sink = RecordingSink::new();
        let log = sink.log();
        for field in FormantField::ORDER.iter().take(3) {
            sink.send(&KnobCommand {
                field: *field,
                value: 1.0,
            })
            .unwrap();
        }
        let seen: Vec<String> = log.lock().unwrap().iter().map(|(l, _)| l.clone()).collect();
        assert_eq!(seen, ["F1", "F2", "F3"]);
    }
}
