//! Offloads the window computation to a dedicated worker thread.
//!
//! The worker owns its own [`crate::Worker`] (and therefore its own `Window`); nothing is
//! shared with the host thread. Requests and replies travel over two FIFO channels, so replies
//! arrive in request order, but may interleave with newer host-side state. The host applies
//! them in receipt order and lets the last one win.
//!
//! Terminating the bridge closes both channels before joining the thread. The worker stops at
//! its next reply instead of working through the queued backlog, and no reply is observable
//! after termination.

use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::{Reply, Request, Worker};

const WORKER_THREAD_NAME: &str = "vwindow-worker";

#[derive(Debug)]
pub struct SyncBridge {
    requests: Option<mpsc::Sender<Request>>,
    replies: Option<mpsc::Receiver<Reply>>,
    handle: Option<JoinHandle<()>>,
}

impl SyncBridge {
    /// Spawns the worker thread.
    pub fn spawn() -> Result<Self> {
        let (req_tx, req_rx) = mpsc::channel::<Request>();
        let (rep_tx, rep_rx) = mpsc::channel::<Reply>();

        let handle = thread::Builder::new()
            .name(WORKER_THREAD_NAME.into())
            .spawn(move || worker_loop(req_rx, rep_tx))
            .map_err(Error::WorkerSpawn)?;
        vdebug!("worker spawned");

        Ok(Self {
            requests: Some(req_tx),
            replies: Some(rep_rx),
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.requests.is_some()
    }

    /// Queues a request for the worker.
    pub fn post(&self, request: Request) -> Result<()> {
        let Some(tx) = &self.requests else {
            return Err(Error::WorkerGone);
        };
        vtrace!(kind = request.kind(), "post");
        tx.send(request).map_err(|_| Error::WorkerGone)
    }

    /// Returns the next reply if one is ready.
    pub fn try_recv(&self) -> Option<Reply> {
        self.replies.as_ref()?.try_recv().ok()
    }

    /// Waits up to `timeout` for the next reply.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Reply> {
        self.replies.as_ref()?.recv_timeout(timeout).ok()
    }

    /// Stops the worker and waits for its thread to exit.
    ///
    /// Blocks at most for the request the worker is currently handling; queued requests are
    /// discarded.
    pub fn terminate(&mut self) {
        if self.requests.take().is_none() {
            return;
        }
        // Closing the reply channel makes the worker's next send fail.
        self.replies = None;
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                vwarn!("worker thread panicked");
            }
        }
        vdebug!("worker terminated");
    }
}

impl Drop for SyncBridge {
    fn drop(&mut self) {
        self.terminate();
    }
}

fn worker_loop(requests: mpsc::Receiver<Request>, replies: mpsc::Sender<Reply>) {
    let mut worker = Worker::new();
    let mut open = true;
    // Ends when the host drops either end.
    for request in requests {
        worker.handle(request, |reply| {
            if open && replies.send(reply).is_err() {
                open = false;
            }
        });
        if !open {
            return;
        }
    }
}
