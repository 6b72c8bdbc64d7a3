use crate::{FrameId, Host};

/// Collapses bursts of scroll notifications into at most one recomputation per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameThrottle {
    pending: Option<FrameId>,
}

impl FrameThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<FrameId> {
        self.pending
    }

    /// Requests a frame from the host unless one is already pending.
    ///
    /// Returns `true` if a new frame was requested.
    pub fn request<H: Host>(&mut self, host: &mut H) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(host.request_frame());
        true
    }

    /// Marks the pending frame as fired; returns whether one was pending.
    pub fn fire(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Cancels the pending frame, if any.
    pub fn cancel<H: Host>(&mut self, host: &mut H) {
        if let Some(id) = self.pending.take() {
            host.cancel_frame(id);
        }
    }
}
