//! An explicit, non-global timing context.
//!
//! The original `include/rpqdb/Profiler.hpp` is a process-wide, mutex-guarded
//! singleton with a thread-local event stack (`START_LOCAL`/`END_LOCAL`
//! macros push/pop onto it). `Instrument` replaces it with a context object a
//! caller constructs, threads through one `evaluate` call as `Option<&mut
//! Instrument>`, and drops when the query is done — no global mutable state,
//! no macros, just an object.

use std::time::{Duration, Instant};

/// An ordered log of named spans recorded during one query's evaluation.
#[derive(Debug, Default)]
pub struct Instrument {
    spans: Vec<(String, Duration)>,
}

impl Instrument {
    pub fn new() -> Instrument {
        Instrument::default()
    }

    /// Starts a named span; the returned guard records its elapsed duration
    /// into `self` when dropped.
    pub fn start(&mut self, name: impl Into<String>) -> InstrumentGuard<'_> {
        InstrumentGuard {
            instrument: self,
            name: name.into(),
            started: Instant::now(),
        }
    }

    /// The spans recorded so far, in the order their guards were dropped.
    pub fn report(&self) -> &[(String, Duration)] {
        &self.spans
    }
}

/// RAII guard returned by `Instrument::start`. Recording happens entirely in
/// `Drop`, so a span is always closed even if the guarded code returns early.
pub struct InstrumentGuard<'a> {
    instrument: &'a mut Instrument,
    name: String,
    started: Instant,
}

impl Drop for InstrumentGuard<'_> {
    fn drop(&mut self) {
        let elapsed = self.started.elapsed();
        self.instrument.spans.push((std::mem::take(&mut self.name), elapsed));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_a_guard_records_a_span() {
        let mut instrument = Instrument::new();
        {
            let _guard = instrument.start("phase one");
        }
        let report = instrument.report();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].0, "phase one");
    }

    #[test]
    fn multiple_spans_are_recorded_in_drop_order() {
        let mut instrument = Instrument::new();
        {
            let _a = instrument.start("a");
        }
        {
            let _b = instrument.start("b");
        }
        let names: Vec<&str> = instrument.report().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
