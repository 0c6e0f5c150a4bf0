use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),
}

/// Controls how independent work units are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStrategy {
    /// Run every unit on the calling thread, one after the other.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Use the global Rayon thread pool to run the units concurrently.
    #[default]
    Parallel,

    /// Run on a dedicated thread pool with `n` threads.
    ///
    /// The pool is built once when the [`Executor`] is created and reused for every call.
    Fixed(usize),
}

/// Runs a batch of independent work units and waits for all of them.
#[derive(Debug)]
pub struct Executor {
    strategy: ExecutionStrategy,
    pool: Option<rayon::ThreadPool>,
}

impl Executor {
    /// Create an executor for the given strategy.
    ///
    /// # Errors
    ///
    /// Returns an error for `Fixed(0)` or if the dedicated pool cannot be built.
    pub fn new(strategy: ExecutionStrategy) -> Result<Self, ParallelError> {
        let pool = match strategy {
            ExecutionStrategy::Fixed(0) => return Err(ParallelError::InvalidThreadCount(0)),
            ExecutionStrategy::Fixed(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("postblur-worker-{i}"))
                    .build()
                    .map_err(|e| ParallelError::BuildError(e.to_string()))?,
            ),
            ExecutionStrategy::Serial | ExecutionStrategy::Parallel => None,
        };

        Ok(Self { strategy, pool })
    }

    /// The strategy this executor was built with.
    pub fn strategy(&self) -> ExecutionStrategy {
        self.strategy
    }

    /// Apply `op` to every item and block until all of them are done.
    ///
    /// Results come back in the order of `items`, whatever order the units finish in.
    ///
    /// # Arguments
    ///
    /// * `items` - The work units, each moved into exactly one invocation of `op`.
    /// * `op` - The operation to run on each unit.
    pub fn map_join<I, R, F>(&self, items: Vec<I>, op: F) -> Vec<R>
    where
        I: Send,
        R: Send,
        F: Fn(I) -> R + Sync + Send,
    {
        match (&self.pool, self.strategy) {
            (_, ExecutionStrategy::Serial) => items.into_iter().map(op).collect(),
            (Some(pool), _) => pool.install(|| items.into_par_iter().map(op).collect()),
            (None, _) => items.into_par_iter().map(op).collect(),
        }
    }
}
