use md_core::{CoreError, DwellerId};
use md_grid::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("layout error: {0}")]
    Layout(#[from] CoreError),

    /// A grid operation failed inside a worker.  Under the locking protocol
    /// this is unreachable, so it is reported as fatal.
    #[error("grid invariant violated: {0}")]
    Grid(#[from] GridError),

    #[error("event collector hung up before {0} finished")]
    CollectorClosed(DwellerId),

    #[error("worker for {0} panicked")]
    WorkerPanicked(DwellerId),

    #[error("event collector panicked")]
    CollectorPanicked,

    #[error("grid holds {got} dwellers after the run, started with {expected}")]
    DwellerCountChanged { expected: usize, got: usize },

    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
