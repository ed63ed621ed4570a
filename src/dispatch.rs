// Copyright (c) 2023 Mike Tsao. All rights reserved.

//! Runs one unit of work per voice combination, on a worker pool or one after
//! another, and hands the results back in the order the combinations were
//! given.

use log::{debug, trace};
use rayon::prelude::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};
use std::panic::{catch_unwind, AssertUnwindSafe};
use vis_core::{Error, Result};
use vis_settings::ExecutionSettings;

/// Where units of work run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Execution {
    /// On the calling thread, in order.
    Serial,
    /// On a pool of this many threads, built for the one dispatch.
    Parallel { workers: usize },
}
impl Default for Execution {
    fn default() -> Self {
        Self::Parallel {
            workers: Self::default_workers(),
        }
    }
}
impl Execution {
    pub fn default_workers() -> usize {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}
impl From<&ExecutionSettings> for Execution {
    fn from(value: &ExecutionSettings) -> Self {
        if value.parallel {
            Self::Parallel {
                workers: value.workers.unwrap_or_else(Self::default_workers),
            }
        } else {
            Self::Serial
        }
    }
}

/// Calls `unit` once per entry of `combinations`, giving each call its own
/// copy of the voices that combination names, and returns the results in
/// `combinations` order.
///
/// Every unit runs to completion. If any fail, whether by returning an error
/// or by panicking, the result is the error of the first failing unit in
/// `combinations` order and nothing else, so [Execution::Serial] and
/// [Execution::Parallel] always agree. A combination that names a voice
/// outside `voices` fails before anything runs.
pub fn dispatch<V, T, F>(
    voices: &[V],
    combinations: &[Vec<usize>],
    execution: Execution,
    unit: F,
) -> Result<Vec<T>>
where
    V: Clone + Send,
    T: Send,
    F: Fn(Vec<V>) -> Result<T> + Sync,
{
    for combination in combinations {
        if let Some(voice) = combination.iter().copied().find(|v| *v >= voices.len()) {
            return Err(Error::InvalidCombination {
                combination: combination.clone(),
                voice,
                count: voices.len(),
            });
        }
    }
    let units: Vec<Vec<V>> = combinations
        .iter()
        .map(|combination| combination.iter().map(|v| voices[*v].clone()).collect())
        .collect();
    debug!("dispatching {} units ({execution:?})", units.len());

    let results: Vec<Result<T>> = match execution {
        Execution::Serial => units
            .into_iter()
            .enumerate()
            .map(|(i, voices)| run_unit(i, voices, &unit))
            .collect(),
        Execution::Parallel { workers } => {
            if workers == 0 {
                return Err(Error::WorkerPool("a pool needs at least one worker".to_string()));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|i| format!("vis-worker-{i}"))
                .build()
                .map_err(|e| Error::WorkerPool(e.to_string()))?;
            pool.install(|| {
                units
                    .into_par_iter()
                    .enumerate()
                    .map(|(i, voices)| run_unit(i, voices, &unit))
                    .collect()
            })
        }
    };
    results.into_iter().collect()
}

fn run_unit<V, T, F>(index: usize, voices: Vec<V>, unit: &F) -> Result<T>
where
    F: Fn(Vec<V>) -> Result<T>,
{
    trace!("unit {index}: {} voices", voices.len());
    match catch_unwind(AssertUnwindSafe(|| unit(voices))) {
        Ok(r) => r,
        Err(payload) => Err(Error::WorkerFailed {
            unit: index,
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panicked".to_string()
    }
}
