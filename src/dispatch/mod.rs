//! Outbound parameter dispatch.
//!
//! The librarian on the other end of the serial link accepts one knob
//! command at a time, so this module turns a formant vector (or a delta
//! against the last one sent) into a fixed-order command sequence, and
//! rate-limits the stream so pad dragging cannot flood the link.

/// Knob command encoding and the diff planner.
pub mod command;
/// The command sink boundary.
pub mod sink;
/// Coalescing background dispatcher.
pub mod throttler;

pub use command::{plan, KnobCommand, KnobMap};
pub use sink::{CommandSink, RecordingSink, StdoutSink};
pub use throttler::Throttler;
