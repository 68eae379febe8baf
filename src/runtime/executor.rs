//! Worker pool executing coincidence requests.

use super::config::RuntimeConfig;
use crate::coincidence::{match_pairs, match_pairs_segmented, CoincidencePairs};
use crate::data::{Channel, InputError, Timestamps, Window};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use thiserror::Error;

/// Segments planned per worker, so uneven segments still balance.
const SEGMENTS_PER_WORKER: usize = 4;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to build worker pool: {0}")]
    Pool(#[from] ThreadPoolBuildError),
}

/// One start/stop channel pair to match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TofJob {
    pub start: Vec<i64>,
    pub stop: Vec<i64>,
    pub window: i64,
}

/// Runtime owning the worker pool.
pub struct Runtime {
    config: RuntimeConfig,
    pool: ThreadPool,
}

impl Runtime {
    /// Create a new runtime.
    pub fn new(config: RuntimeConfig) -> Result<Self, RuntimeError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.worker_count)
            .thread_name(|i| format!("tof-worker-{}", i))
            .build()?;

        log::info!(
            "tof runtime started with {} workers (sequential below {} events)",
            pool.current_num_threads(),
            config.min_chunk_len
        );

        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Validate inputs and match one channel pair.
    pub fn tof(&self, start: Vec<i64>, stop: Vec<i64>, window: i64) -> Result<CoincidencePairs, InputError> {
        let start = Timestamps::new(Channel::Start, start)?;
        let stop = Timestamps::new(Channel::Stop, stop)?;
        let window = Window::new(window)?;

        Ok(self.match_validated(&start, &stop, window))
    }

    fn match_validated(&self, start: &Timestamps, stop: &Timestamps, window: Window) -> CoincidencePairs {
        let (a, b) = (start.as_slice(), stop.as_slice());

        if a.len().max(b.len()) < self.config.min_chunk_len || self.config.worker_count < 2 {
            return match_pairs(a, b, window);
        }

        let segments = self.config.worker_count * SEGMENTS_PER_WORKER;
        self.pool
            .install(|| match_pairs_segmented(a, b, window, segments))
    }

    /// Match many channel pairs on the pool, keeping job order.
    pub fn tof_batch(&self, jobs: &[TofJob]) -> Vec<Result<CoincidencePairs, InputError>> {
        self.pool.install(|| {
            jobs.par_iter()
                .map(|job| self.tof(job.start.clone(), job.stop.clone(), job.window))
                .collect()
        })
    }
}
