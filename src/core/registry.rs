//! Appender registry and per-appender workers
//!
//! Every registered appender gets a dedicated bounded queue and a worker
//! thread that delivers records serially. Fan-out iterates the live set
//! under the shared lock; registration and teardown take the exclusive
//! lock. Teardown swaps the live set for a torn-down marker, so a
//! registration racing with shutdown fails fast instead of leaking a
//! worker.

use super::{
    appender::Appender,
    error::{FanlogError, Result},
    metrics::FacilityMetrics,
    record::LogRecord,
};
use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::RwLock;
use std::sync::Arc;
use std::thread;

/// Default capacity of each appender's worker queue.
pub const DEFAULT_APPENDER_QUEUE_CAPACITY: usize = 100;

struct WriterHandle {
    name: String,
    sender: Sender<Arc<LogRecord>>,
    worker: thread::JoinHandle<()>,
}

pub(crate) struct AppenderRegistry {
    /// `None` marks the registry as torn down.
    writers: RwLock<Option<Vec<WriterHandle>>>,
    queue_capacity: usize,
    metrics: Arc<FacilityMetrics>,
}

impl AppenderRegistry {
    pub(crate) fn new(queue_capacity: usize, metrics: Arc<FacilityMetrics>) -> Self {
        Self {
            writers: RwLock::new(Some(Vec::new())),
            queue_capacity,
            metrics,
        }
    }

    /// Wrap `appender` in a worker with its own bounded queue and add it to
    /// the live set. Fails with `FacilityStopped` once teardown has begun;
    /// nothing is spawned in that case.
    pub(crate) fn register(&self, appender: Box<dyn Appender>) -> Result<()> {
        let mut writers = self.writers.write();
        let writers = writers.as_mut().ok_or(FanlogError::FacilityStopped)?;

        let name = appender.name().to_string();
        let (sender, receiver) = bounded(self.queue_capacity);
        let metrics = Arc::clone(&self.metrics);
        let worker = thread::spawn(move || listen(appender, receiver, metrics));

        writers.push(WriterHandle {
            name,
            sender,
            worker,
        });
        Ok(())
    }

    /// Enqueue the record onto every live worker's queue, in registration
    /// order. A full worker queue blocks the whole fan-out step: one slow
    /// appender stalls delivery to all of them, and eventually the central
    /// queue. No-op after teardown.
    pub(crate) fn fan_out(&self, record: LogRecord) {
        let writers = self.writers.read();
        let Some(writers) = writers.as_ref() else {
            return;
        };

        let record = Arc::new(record);
        for writer in writers {
            let _ = writer.sender.send(Arc::clone(&record));
        }
    }

    /// Tear down the live set: close every worker queue for further input,
    /// then wait for each worker to drain its backlog, close its appender,
    /// and exit.
    pub(crate) fn close_all(&self) {
        let taken = self.writers.write().take();
        let Some(writers) = taken else {
            return;
        };

        let mut joins = Vec::with_capacity(writers.len());
        for WriterHandle {
            name,
            sender,
            worker,
        } in writers
        {
            // dropping the sole sender closes the queue
            drop(sender);
            joins.push((name, worker));
        }

        for (name, worker) in joins {
            if worker.join().is_err() {
                eprintln!("[fanlog] worker for appender '{}' panicked", name);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn is_closed(&self) -> bool {
        self.writers.read().is_none()
    }
}

/// Worker loop: deliver queued records in FIFO order until the queue is
/// closed and drained, then invoke the appender's close hook.
fn listen(
    mut appender: Box<dyn Appender>,
    receiver: Receiver<Arc<LogRecord>>,
    metrics: Arc<FacilityMetrics>,
) {
    for record in receiver.iter() {
        if let Err(err) = appender.write(&record) {
            metrics.record_appender_error();
            eprintln!("[fanlog] appender '{}' write failed: {}", appender.name(), err);
        }
    }

    if let Err(err) = appender.close() {
        metrics.record_appender_error();
        eprintln!("[fanlog] appender '{}' close failed: {}", appender.name(), err);
    }
}
