//! Background extraction with superseding submissions
//!
//! Each call to [`ExtractionWorker::submit`] starts a new job on its own
//! thread and makes every earlier job stale. Stale jobs run to completion
//! but their results are dropped instead of being delivered.

use std::cell::{Cell, RefCell};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use super::extractor::{extract_palette, ExtractedPalette, ExtractionOptions};
use crate::Result;

type JobResult = (u64, Result<ExtractedPalette>);
type ExtractFn = fn(&[u8], &ExtractionOptions) -> Result<ExtractedPalette>;

/// Runs extractions off the caller's thread; only the latest job counts
///
/// Every job gets its own channel and the worker only listens to the newest
/// one, so a job thread that dies closes the channel instead of leaving
/// [`ExtractionWorker::wait`] blocked.
pub struct ExtractionWorker {
    latest: Arc<AtomicU64>,
    delivered: Cell<u64>,
    receiver: RefCell<Option<Receiver<JobResult>>>,
}

impl Default for ExtractionWorker {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionWorker {
    pub fn new() -> Self {
        Self {
            latest: Arc::new(AtomicU64::new(0)),
            delivered: Cell::new(0),
            receiver: RefCell::new(None),
        }
    }

    /// Start extracting `pixels`, superseding any job still in flight
    ///
    /// # Arguments
    ///
    /// * `pixels` - RGBA8 buffer, moved to the job thread
    /// * `options` - Extraction parameters for this job
    ///
    /// # Returns
    ///
    /// The id of the new job; ids start at 1 and increase by one per call
    pub fn submit(&self, pixels: Vec<u8>, options: ExtractionOptions) -> u64 {
        self.submit_with(pixels, options, extract_palette)
    }

    fn submit_with(&self, pixels: Vec<u8>, options: ExtractionOptions, extract: ExtractFn) -> u64 {
        let job = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let latest = Arc::clone(&self.latest);
        let (sender, receiver) = mpsc::channel();
        // dropping the previous receiver disconnects the superseded job
        self.receiver.replace(Some(receiver));

        log::debug!("Submitting extraction job {} ({} bytes)", job, pixels.len());
        thread::spawn(move || {
            let result = extract(&pixels, &options);
            if latest.load(Ordering::SeqCst) != job {
                log::debug!("Dropping result of superseded extraction job {}", job);
                return;
            }
            if sender.send((job, result)).is_err() {
                log::debug!("Nobody waiting for extraction job {}", job);
            }
        });

        job
    }

    /// Id of the most recently submitted job, 0 if none
    pub fn latest_job(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    /// Result of the latest job if it has finished, without blocking
    pub fn poll(&self) -> Option<Result<ExtractedPalette>> {
        let received = self.receiver.borrow().as_ref()?.try_recv();
        match received {
            Ok((job, result)) => self.accept(job, result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.abandon();
                None
            }
        }
    }

    /// Block until the latest job finishes
    ///
    /// Returns `None` if nothing was submitted, the latest result was
    /// already delivered, or the job thread died before producing one.
    pub fn wait(&self) -> Option<Result<ExtractedPalette>> {
        let latest = self.latest_job();
        if latest == 0 || self.delivered.get() == latest {
            return None;
        }
        let received = self.receiver.borrow().as_ref()?.recv();
        match received {
            Ok((job, result)) => self.accept(job, result),
            Err(_) => {
                self.abandon();
                None
            }
        }
    }

    fn accept(&self, job: u64, result: Result<ExtractedPalette>) -> Option<Result<ExtractedPalette>> {
        if job != self.latest_job() {
            log::warn!("Discarding stale extraction result for job {}", job);
            return None;
        }
        self.delivered.set(job);
        Some(result)
    }

    fn abandon(&self) {
        let job = self.latest_job();
        log::error!("Extraction job {} ended without a result", job);
        self.delivered.set(job);
        self.receiver.replace(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(rgba: [u8; 4], count: usize) -> Vec<u8> {
        rgba.iter().copied().cycle().take(count * 4).collect()
    }

    #[test]
    fn test_wait_without_jobs() {
        let worker = ExtractionWorker::new();
        assert_eq!(worker.latest_job(), 0);
        assert!(worker.wait().is_none());
        assert!(worker.poll().is_none());
    }

    #[test]
    fn test_single_job() {
        let worker = ExtractionWorker::new();
        let job = worker.submit(solid([255, 0, 0, 255], 64), ExtractionOptions::default());
        assert_eq!(job, 1);
        let palette = worker.wait().unwrap().unwrap();
        assert_eq!(palette.dominant[0].hex, "#FF0000");
        // delivered once only
        assert!(worker.wait().is_none());
    }

    #[test]
    fn test_latest_submission_wins() {
        let worker = ExtractionWorker::new();
        worker.submit(solid([255, 0, 0, 255], 20_000), ExtractionOptions::default());
        worker.submit(solid([0, 255, 0, 255], 20_000), ExtractionOptions::default());
        let last = worker.submit(solid([0, 0, 255, 255], 64), ExtractionOptions::default());
        assert_eq!(last, 3);

        let palette = worker.wait().unwrap().unwrap();
        assert_eq!(palette.dominant[0].hex, "#0000FF");
    }

    fn panicking_extract(_: &[u8], _: &ExtractionOptions) -> Result<ExtractedPalette> {
        panic!("extraction failed")
    }

    #[test]
    fn test_dead_job_does_not_block_wait() {
        let worker = ExtractionWorker::new();
        worker.submit_with(solid([255, 0, 0, 255], 4), ExtractionOptions::default(), panicking_extract);
        assert!(worker.wait().is_none());
        assert!(worker.poll().is_none());

        // the worker stays usable afterwards
        worker.submit(solid([0, 0, 255, 255], 4), ExtractionOptions::default());
        let palette = worker.wait().unwrap().unwrap();
        assert_eq!(palette.dominant[0].hex, "#0000FF");
    }

    #[test]
    fn test_errors_are_delivered() {
        let worker = ExtractionWorker::new();
        worker.submit(vec![1, 2, 3], ExtractionOptions::default());
        assert!(worker.wait().unwrap().is_err());
    }
}
