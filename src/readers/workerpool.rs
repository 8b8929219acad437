// src/readers/workerpool.rs

//! A fixed-size pool of named worker threads.
//!
//! Jobs are sent over a [`crossbeam_channel`] to whichever worker is idle.
//! The pool is an ordinary value: it is created by its owner, fed with
//! [`WorkerPool::submit`], and torn down with [`WorkerPool::join`], which
//! closes the job channel and waits for every worker to drain it.
//!
//! A job that panics is caught and counted; its worker thread goes on to the
//! next queued job.

use std::fmt;
use std::io::{Error, ErrorKind, Result};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::thread;

use ::crossbeam_channel;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// A unit of work for a worker thread.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

type ChanSendJob = crossbeam_channel::Sender<Job>;
type ChanRecvJob = crossbeam_channel::Receiver<Job>;

/// Worker thread names are this prefix followed by the worker index.
pub const WORKER_NAME_PREFIX: &str = "sx-worker-";

pub struct WorkerPool {
    /// `None` once the pool no longer accepts jobs
    chan_send: Option<ChanSendJob>,
    /// each worker returns its count of panicked jobs
    workers: Vec<thread::JoinHandle<usize>>,
}

impl fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerPool")
            .field("workers", &self.workers.len())
            .field("open", &self.chan_send.is_some())
            .finish()
    }
}

/// Loop of one worker thread: run jobs until the channel is closed and empty.
/// Returns the count of jobs that panicked.
fn worker_loop(chan_recv: ChanRecvJob) -> usize {
    defn!("{:?}", thread::current().name());
    let mut panicked: usize = 0;
    while let Ok(job) = chan_recv.recv() {
        defo!("{:?} run job", thread::current().name());
        // a job owns all its state, nothing it touched is observed after a panic
        if catch_unwind(AssertUnwindSafe(job)).is_err() {
            defo!("{:?} job panicked", thread::current().name());
            panicked += 1;
        }
    }
    defx!("{:?} channel closed, {} jobs panicked", thread::current().name(), panicked);

    panicked
}

impl WorkerPool {
    /// Start `size` worker threads. A `size` of `0` starts one.
    pub fn new(size: usize) -> Result<WorkerPool> {
        let size = size.max(1);
        defn!("({})", size);
        let (chan_send, chan_recv): (ChanSendJob, ChanRecvJob) = crossbeam_channel::unbounded();
        let mut workers = Vec::with_capacity(size);
        for index in 0..size {
            let chan_recv_ = chan_recv.clone();
            let handle = thread::Builder::new()
                .name(format!("{}{}", WORKER_NAME_PREFIX, index))
                .spawn(move || worker_loop(chan_recv_))?;
            workers.push(handle);
        }
        defx!("started {} workers", workers.len());

        Ok(WorkerPool {
            chan_send: Some(chan_send),
            workers,
        })
    }

    /// Count of worker threads started.
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Queue `job` for the next idle worker.
    pub fn submit<F>(
        &self,
        job: F,
    ) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let chan_send = match self.chan_send.as_ref() {
            Some(val) => val,
            None => {
                return Err(Error::new(ErrorKind::BrokenPipe, "worker pool is closed"));
            }
        };
        match chan_send.send(Box::new(job)) {
            Ok(_) => Ok(()),
            Err(_err) => Err(Error::new(ErrorKind::BrokenPipe, "all worker threads have exited")),
        }
    }

    /// Stop accepting jobs. Already queued jobs still run.
    pub fn close(&mut self) {
        defñ!();
        self.chan_send = None;
    }

    /// Close the pool then wait for every worker to finish all queued jobs.
    /// Returns the count of jobs that panicked.
    pub fn join(mut self) -> usize {
        defn!();
        self.close();
        let mut panicked: usize = 0;
        for handle in self.workers.drain(..) {
            panicked += handle.join().unwrap_or(1);
        }
        defx!("{} jobs panicked", panicked);

        panicked
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.chan_send = None;
        for handle in self.workers.drain(..) {
            _ = handle.join();
        }
    }
}
