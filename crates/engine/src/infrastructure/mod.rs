pub mod ports;

pub use ports::{
    ClockPort, MessagePort, NarrativePort, NoNarrative, SegmentClock, Severity, TracingMessages,
};

#[cfg(test)]
pub use ports::{MockClockPort, MockMessagePort, MockNarrativePort};
