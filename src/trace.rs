use crate::cycle::CycleResult;

/// Receives a record of every cycle the dispatcher runs.
///
/// The dispatcher always writes; a sink decides whether anything is kept or
/// shown.
pub trait TraceSink {
    fn record(&mut self, cycle: &CycleResult);
}

/// Discards every record
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn record(&mut self, _cycle: &CycleResult) {}
}

/// Forwards every record to the `log` facade at trace level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl TraceSink for LogSink {
    fn record(&mut self, cycle: &CycleResult) {
        log::trace!(target: "vip8::cycle", "{}", cycle);
    }
}

/// Keeps every record
impl TraceSink for Vec<CycleResult> {
    fn record(&mut self, cycle: &CycleResult) {
        self.push(cycle.clone());
    }
}

impl<T: TraceSink + ?Sized> TraceSink for Box<T> {
    fn record(&mut self, cycle: &CycleResult) {
        (**self).record(cycle);
    }
}

impl<T: TraceSink + ?Sized> TraceSink for &mut T {
    fn record(&mut self, cycle: &CycleResult) {
        (**self).record(cycle);
    }
}

#[cfg(test)]
mod test_trace {
    use super::*;
    use crate::cycle::{RunState, Snapshot};
    use std::sync::Mutex;

    /// Collects every `vip8::cycle` record logged while the tests run
    struct Capture(Mutex<Vec<String>>);

    impl log::Log for Capture {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            metadata.target() == "vip8::cycle"
        }

        fn log(&self, record: &log::Record) {
            if self.enabled(record.metadata()) {
                self.0.lock().unwrap().push(record.args().to_string());
            }
        }

        fn flush(&self) {}
    }

    static CAPTURE: Capture = Capture(Mutex::new(Vec::new()));

    fn cycle() -> CycleResult {
        let mut after = [0; 16];
        after[0x1] = 0x2A;
        CycleResult {
            opcode: 0x612A,
            category: "0x6XNN",
            pseudo: "V1 = 0x2A".to_string(),
            before: Snapshot { pc: 0x200, v: [0; 16] },
            after: Snapshot { pc: 0x202, v: after },
            state: RunState::Running,
        }
    }

    #[test]
    fn test_log_sink_logs_at_trace_level() {
        let _ = log::set_logger(&CAPTURE);
        log::set_max_level(log::LevelFilter::Trace);

        LogSink.record(&cycle());

        let lines = CAPTURE.0.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("0x200> (0x612A) V1 = 0x2A"));
    }

    #[test]
    fn test_vec_keeps_every_record() {
        let mut records: Vec<CycleResult> = Vec::new();
        records.record(&cycle());
        records.record(&cycle());
        assert_eq!(records, vec![cycle(), cycle()]);
    }

    #[test]
    fn test_boxed_and_borrowed_sinks_forward() {
        let mut records: Vec<CycleResult> = Vec::new();
        {
            let mut borrowed: Box<dyn TraceSink + '_> = Box::new(&mut records);
            borrowed.record(&cycle());
        }
        assert_eq!(records.len(), 1);
        NullSink.record(&cycle());
    }
}
