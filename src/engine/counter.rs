//! Parallel occurrence counting on a fixed worker pool
//!
//! Workers share one job queue. A count call cuts its snapshot into
//! contiguous ranges, queues one job per range and waits for every partial
//! result before merging them on the calling thread.

use std::collections::HashMap;
use std::ops::Range;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use tracing::{debug, warn};

use crate::error::{Result, TrackerError};
use crate::task::{Task, TaskId};

pub type OccurrenceCounts = HashMap<TaskId, usize>;

struct CountJob {
    tasks: Arc<[Task]>,
    range: Range<usize>,
    needle: Arc<str>,
    reply: mpsc::Sender<OccurrenceCounts>,
}

pub struct OccurrenceCounter {
    job_tx: Option<mpsc::Sender<CountJob>>,
    workers: Vec<thread::JoinHandle<()>>,
    size: usize,
}

impl OccurrenceCounter {
    /// Start a pool with `workers` threads (at least one)
    pub fn new(workers: usize) -> Self {
        let size = workers.max(1);
        let (job_tx, job_rx) = mpsc::channel::<CountJob>();
        let job_rx = Arc::new(Mutex::new(job_rx));

        let workers = (0..size)
            .filter_map(|index| {
                let job_rx = Arc::clone(&job_rx);
                thread::Builder::new()
                    .name(format!("occurrence-counter-{}", index))
                    .spawn(move || Self::worker_loop(job_rx))
                    .map_err(|e| warn!("Failed to spawn counting worker {}: {}", index, e))
                    .ok()
            })
            .collect::<Vec<_>>();

        debug!(workers = workers.len(), "occurrence counter started");

        Self {
            job_tx: (!workers.is_empty()).then_some(job_tx),
            size: workers.len().max(1),
            workers,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn worker_loop(job_rx: Arc<Mutex<mpsc::Receiver<CountJob>>>) {
        loop {
            let job = {
                let Ok(rx) = job_rx.lock() else { break };
                rx.recv()
            };
            let Ok(job) = job else { break };

            let counts = count_chunk(&job.tasks[job.range.clone()], &job.needle);
            if job.reply.send(counts).is_err() {
                debug!("count caller went away before the result arrived");
            }
        }
    }

    /// Count case-insensitive occurrences of `term` per task.
    ///
    /// Tasks with no occurrence are left out. The result does not depend on
    /// the pool size.
    pub fn count(&self, tasks: &[Task], term: &str) -> Result<OccurrenceCounts> {
        let job_tx = self.job_tx.as_ref().ok_or(TrackerError::CounterStopped)?;

        if term.is_empty() || tasks.is_empty() {
            return Ok(OccurrenceCounts::new());
        }

        let snapshot: Arc<[Task]> = tasks.into();
        let needle: Arc<str> = term.to_lowercase().into();
        let (reply_tx, reply_rx) = mpsc::channel();

        let ranges = chunk_ranges(snapshot.len(), self.size);
        let dispatched = ranges.len();
        for range in ranges {
            let job = CountJob {
                tasks: Arc::clone(&snapshot),
                range,
                needle: Arc::clone(&needle),
                reply: reply_tx.clone(),
            };
            job_tx.send(job).map_err(|_| TrackerError::WorkerFailed)?;
        }
        drop(reply_tx);

        let mut merged = OccurrenceCounts::new();
        for _ in 0..dispatched {
            let partial = reply_rx.recv().map_err(|_| TrackerError::WorkerFailed)?;
            for (id, n) in partial {
                *merged.entry(id).or_default() += n;
            }
        }

        debug!(
            chunks = dispatched,
            matches = merged.len(),
            "occurrence count finished"
        );
        Ok(merged)
    }

    /// Stop accepting jobs and join every worker. Safe to call twice.
    pub fn shutdown(&mut self) {
        let Some(job_tx) = self.job_tx.take() else {
            return;
        };
        drop(job_tx);

        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                warn!("Counting worker panicked");
            }
        }
        debug!("occurrence counter stopped");
    }

    pub fn is_running(&self) -> bool {
        self.job_tx.is_some()
    }
}

impl Drop for OccurrenceCounter {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Split `0..len` into at most `parts` contiguous, non-empty ranges
fn chunk_ranges(len: usize, parts: usize) -> Vec<Range<usize>> {
    if len == 0 {
        return Vec::new();
    }
    let chunk = len.div_ceil(parts.max(1));
    (0..len)
        .step_by(chunk)
        .map(|start| start..(start + chunk).min(len))
        .collect()
}

/// Per-task counts for one chunk. `needle` must already be lowercase.
///
/// Tasks sharing an id add up under that id.
fn count_chunk(tasks: &[Task], needle: &str) -> OccurrenceCounts {
    tasks.iter().fold(OccurrenceCounts::new(), |mut counts, task| {
        let n = occurrences(task, needle);
        if n > 0 {
            *counts.entry(task.id).or_default() += n;
        }
        counts
    })
}

/// Non-overlapping matches in title plus description
fn occurrences(task: &Task, needle: &str) -> usize {
    task.title.to_lowercase().matches(needle).count()
        + task.description.to_lowercase().matches(needle).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskPriority;
    use chrono::NaiveDate;

    fn task(id: u32, title: &str, description: &str) -> Task {
        Task::new(
            TaskId(id),
            title,
            TaskPriority::Low,
            NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
        )
        .with_description(description)
    }

    #[test]
    fn test_chunk_ranges_cover_input() {
        assert_eq!(chunk_ranges(10, 3), vec![0..4, 4..8, 8..10]);
        assert_eq!(chunk_ranges(2, 8), vec![0..1, 1..2]);
        assert_eq!(chunk_ranges(5, 1), vec![0..5]);
        assert!(chunk_ranges(0, 4).is_empty());
    }

    #[test]
    fn test_occurrences() {
        let t = task(1, "Buy buy BUY", "goodbye");
        assert_eq!(occurrences(&t, "buy"), 3);
        assert_eq!(occurrences(&t, "bye"), 1);
        assert_eq!(occurrences(&task(2, "aaaa", ""), "aa"), 2);
    }

    #[test]
    fn test_count_skips_zero_matches() {
        let counter = OccurrenceCounter::new(2);
        let tasks = vec![
            task(1, "Buy milk", ""),
            task(2, "Buy bread", "buy the rye one"),
            task(3, "Plan trip", ""),
        ];

        let counts = counter.count(&tasks, "buy").unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[&TaskId(1)], 1);
        assert_eq!(counts[&TaskId(2)], 2);
        assert!(!counts.contains_key(&TaskId(3)));
    }

    #[test]
    fn test_shared_ids_add_up() {
        let tasks = vec![
            task(1, "buy buy buy", ""),
            task(2, "nothing", ""),
            task(1, "buy", "buy again"),
        ];
        for workers in [1, 2, 3] {
            let counter = OccurrenceCounter::new(workers);
            let counts = counter.count(&tasks, "buy").unwrap();
            assert_eq!(counts.len(), 1);
            assert_eq!(counts[&TaskId(1)], 5);
        }
    }

    #[test]
    fn test_count_empty_inputs() {
        let counter = OccurrenceCounter::new(3);
        assert!(counter.count(&[], "x").unwrap().is_empty());
        assert!(counter.count(&[task(1, "x", "")], "").unwrap().is_empty());
    }

    #[test]
    fn test_zero_workers_means_one() {
        let counter = OccurrenceCounter::new(0);
        assert_eq!(counter.size(), 1);
        let counts = counter.count(&[task(1, "abc", "")], "b").unwrap();
        assert_eq!(counts[&TaskId(1)], 1);
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let mut counter = OccurrenceCounter::new(2);
        assert!(counter.is_running());
        counter.shutdown();
        counter.shutdown();
        assert!(!counter.is_running());
        assert!(matches!(
            counter.count(&[task(1, "a", "")], "a"),
            Err(TrackerError::CounterStopped)
        ));
    }

    #[test]
    fn test_pool_survives_many_calls() {
        let counter = OccurrenceCounter::new(4);
        let tasks: Vec<Task> = (1..=50).map(|i| task(i, "tick", "tock tick")).collect();
        for _ in 0..20 {
            let counts = counter.count(&tasks, "tick").unwrap();
            assert_eq!(counts.len(), 50);
            assert!(counts.values().all(|&n| n == 2));
        }
    }
}
