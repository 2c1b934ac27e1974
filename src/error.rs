use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(
        "Unsupported selector: '{0}'.\n\
         Sort selectors: 1-7 or priority, date, title, quick, bubble, merge, parity, id"
    )]
    InvalidSelector(String),

    #[error("Unknown priority '{0}' (expected low, medium, high or urgent)")]
    InvalidPriority(String),

    #[error("Out of task ids: {count} id(s) starting at #{from} would pass #{}", u32::MAX)]
    IdsExhausted { from: u64, count: usize },

    #[error("Occurrence counter has been shut down")]
    CounterStopped,

    #[error("A counting worker exited before returning its results")]
    WorkerFailed,
}

pub type Result<T> = std::result::Result<T, TrackerError>;
