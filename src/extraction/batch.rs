//! Parallel processing of independent workbooks.
//!
//! Each workbook is still processed sequentially and fails fast on its own; the runner only
//! spreads *different* workbooks across a rayon thread pool.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

use crate::error::ExtractionResult;
use crate::types::WorkbookResult;

use super::adapter::WorkbookAdapter;
use super::workbook::{process_workbook_with_options, ExtractionOptions};

/// Configuration for the [`BatchRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Number of worker threads.
    ///
    /// If `None`, uses the platform's available parallelism.
    pub num_threads: Option<usize>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        let n = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
        Self {
            num_threads: Some(n),
        }
    }
}

/// Runs workbook extraction for many independent adapters on a dedicated thread pool.
pub struct BatchRunner {
    pool: ThreadPool,
    options: ExtractionOptions,
}

impl BatchRunner {
    /// Create a runner with the given options.
    ///
    /// # Panics
    ///
    /// Panics if `num_threads == Some(0)`.
    pub fn new(opts: BatchOptions) -> Result<Self, ThreadPoolBuildError> {
        if let Some(n) = opts.num_threads {
            assert!(n > 0, "num_threads must be > 0 when set");
        }

        let n_threads = opts
            .num_threads
            .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1))
            .max(1);

        let pool = ThreadPoolBuilder::new().num_threads(n_threads).build()?;
        Ok(Self {
            pool,
            options: ExtractionOptions::default(),
        })
    }

    /// Use `options` (observer, alert threshold, previews) for every workbook in the batch.
    pub fn with_extraction_options(mut self, options: ExtractionOptions) -> Self {
        self.options = options;
        self
    }

    /// Number of worker threads in the pool.
    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Process every adapter, returning one result per adapter in input order.
    ///
    /// A failing workbook does not affect the others.
    pub fn run<A>(&self, adapters: Vec<A>) -> Vec<ExtractionResult<WorkbookResult>>
    where
        A: WorkbookAdapter + Send,
    {
        self.pool.install(|| {
            adapters
                .into_par_iter()
                .map(|mut adapter| process_workbook_with_options(&mut adapter, &self.options))
                .collect()
        })
    }
}
