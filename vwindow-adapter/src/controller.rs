use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use vwindow::{Align, Calculated, FrameState, Invalidation, OptionPatch, WindowOptions, WindowRange};

use crate::error::{Error, Result};
use crate::{FrameThrottle, Host, Init, MeasureRegistry, Reply, Request, SyncBridge, Worker};

/// A callback fired when the controller's snapshot changes.
pub type OnChangeCallback = Arc<dyn Fn(&Calculated) + Send + Sync>;

/// Configuration for [`WindowController`].
#[derive(Clone)]
pub struct ControllerOptions {
    pub window: WindowOptions,
    /// Runs the window computation on a worker thread.
    pub use_worker: bool,
    /// Fired after a recomputation produces a different snapshot.
    pub on_change: Option<OnChangeCallback>,
}

impl ControllerOptions {
    pub fn new(window: WindowOptions) -> Self {
        Self {
            window,
            use_worker: false,
            on_change: None,
        }
    }

    pub fn with_use_worker(mut self, use_worker: bool) -> Self {
        self.use_worker = use_worker;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&Calculated) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl fmt::Debug for ControllerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerOptions")
            .field("window", &self.window)
            .field("use_worker", &self.use_worker)
            .finish_non_exhaustive()
    }
}

/// Lifecycle of a [`WindowController`]. Transitions only move forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Observing,
    Disposed,
}

#[derive(Debug)]
enum Engine {
    /// The worker mirror driven synchronously on the host thread.
    Local(Worker),
    Offload(SyncBridge),
}

/// Drives a window from host events.
///
/// This type does not hold any rendered items. The host drives it by calling:
/// - `attach` once, with access to the scroll container
/// - `on_scroll` for every scroll notification and `on_frame` when the requested frame fires
/// - `on_viewport_resized` when the container is resized
/// - `measure`/`unmeasure` as items mount and unmount, and `on_element_resized` when an
///   observed element reports a new size
///
/// In offload mode the window math runs on a worker thread; call [`Self::poll`] (for example
/// once per frame) to apply its replies.
pub struct WindowController<H: Host> {
    options: ControllerOptions,
    phase: Phase,
    host: Option<H>,
    engine: Option<Engine>,
    measured: MeasureRegistry<H::Element>,
    frame: FrameThrottle,
    pending_sizes: Vec<(usize, f64)>,
    scratch: Vec<Reply>,
    worker_failed: bool,

    viewport_size: f64,
    scroll_offset: f64,
    snapshot: Calculated,
}

impl<H: Host> WindowController<H> {
    pub fn new(options: ControllerOptions) -> Self {
        Self {
            options,
            phase: Phase::Idle,
            host: None,
            engine: None,
            measured: MeasureRegistry::new(),
            frame: FrameThrottle::new(),
            pending_sizes: Vec::new(),
            scratch: Vec::new(),
            worker_failed: false,
            viewport_size: 0.0,
            scroll_offset: 0.0,
            snapshot: Calculated::default(),
        }
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_observing(&self) -> bool {
        self.phase == Phase::Observing
    }

    pub fn is_offloaded(&self) -> bool {
        matches!(self.engine, Some(Engine::Offload(_)))
    }

    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }

    pub fn set_on_change(&mut self, on_change: Option<impl Fn(&Calculated) + Send + Sync + 'static>) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    /// Starts observing `host`: reads its geometry and computes the first range.
    ///
    /// With `use_worker`, a worker thread is spawned here. A spawn failure is returned as
    /// [`Error::WorkerSpawn`] and leaves the controller idle; there is no silent fallback to
    /// local computation.
    pub fn attach(&mut self, host: H) -> Result<()> {
        match self.phase {
            Phase::Idle => {}
            Phase::Observing => return Err(Error::AlreadyAttached),
            Phase::Disposed => return Err(Error::Disposed),
        }

        let direction = self.options.window.direction;
        let frame = FrameState::new(host.viewport_size(direction), host.scroll_offset(direction));
        let init = Request::Init(Init::new(&self.options.window, frame));

        let engine = if self.options.use_worker {
            let bridge = SyncBridge::spawn()?;
            bridge.post(init.clone())?;
            Engine::Offload(bridge)
        } else {
            Engine::Local(Worker::new())
        };
        vdebug!(
            use_worker = self.options.use_worker,
            viewport_size = frame.viewport_size,
            scroll_offset = frame.scroll_offset,
            "attach"
        );

        self.viewport_size = frame.viewport_size;
        self.scroll_offset = frame.scroll_offset;
        self.host = Some(host);
        self.phase = Phase::Observing;

        let offloaded = matches!(engine, Engine::Offload(_));
        self.engine = Some(engine);
        if !offloaded {
            self.send(init);
        }
        Ok(())
    }

    /// Releases observers, the pending frame, and the worker. Irreversible.
    ///
    /// Returns the host, if one was attached.
    pub fn dispose(&mut self) -> Option<H> {
        if self.phase == Phase::Disposed {
            return None;
        }

        let mut host = self.host.take();
        if let Some(h) = host.as_mut() {
            self.frame.cancel(h);
            for element in self.measured.drain() {
                h.unobserve(&element);
            }
        } else {
            self.measured.drain().for_each(drop);
        }

        if let Some(Engine::Offload(mut bridge)) = self.engine.take() {
            bridge.terminate();
        }
        self.pending_sizes.clear();
        self.scratch.clear();
        self.phase = Phase::Disposed;
        vdebug!("dispose");
        host
    }

    pub fn snapshot(&self) -> Calculated {
        self.snapshot
    }

    pub fn range(&self) -> WindowRange {
        self.snapshot.range
    }

    pub fn offset(&self) -> f64 {
        self.snapshot.offset
    }

    pub fn total_size(&self) -> f64 {
        self.snapshot.total_size
    }

    pub fn at_start(&self) -> bool {
        self.snapshot.at_start
    }

    pub fn at_end(&self) -> bool {
        self.snapshot.at_end
    }

    pub fn viewport_size(&self) -> f64 {
        self.viewport_size
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn measured_count(&self) -> usize {
        self.measured.len()
    }

    pub fn is_frame_pending(&self) -> bool {
        self.frame.is_pending()
    }

    /// Call this for every scroll notification. The recomputation is deferred to the next
    /// frame; bursts collapse into a single [`Self::on_frame`].
    pub fn on_scroll(&mut self) {
        if self.phase != Phase::Observing {
            return;
        }
        if let Some(host) = self.host.as_mut() {
            self.frame.request(host);
        }
    }

    /// Call this when the frame requested through [`Host::request_frame`] fires.
    ///
    /// Reads the latest scroll offset, flushes queued measurements, and recomputes once.
    /// Does nothing if no frame is pending.
    pub fn on_frame(&mut self) {
        if self.phase != Phase::Observing || !self.frame.fire() {
            return;
        }
        let Some(host) = self.host.as_ref() else {
            return;
        };
        let offset = FrameState::new(0.0, host.scroll_offset(self.options.window.direction))
            .scroll_offset;
        vtrace!(offset, "on_frame");
        self.scroll_offset = offset;
        self.send(Request::Scroll {
            scroll_offset: offset,
        });
        self.drain_replies();
    }

    /// Call this when the scroll container is resized. Recomputes immediately.
    pub fn on_viewport_resized(&mut self) {
        if self.phase != Phase::Observing {
            return;
        }
        let Some(host) = self.host.as_ref() else {
            return;
        };
        let size = FrameState::new(host.viewport_size(self.options.window.direction), 0.0)
            .viewport_size;
        self.viewport_size = size;
        self.send(Request::Viewport {
            viewport_size: size,
        });
    }

    /// Registers `element` as the rendered item at `index` and starts observing its size.
    ///
    /// Only meaningful in dynamic mode. A different element previously registered at `index`
    /// is unobserved; an element moving to a new index keeps its observer.
    pub fn measure(&mut self, index: usize, element: H::Element) -> bool {
        if self.phase != Phase::Observing || !self.options.window.dynamic {
            return false;
        }
        let Some(host) = self.host.as_mut() else {
            return false;
        };
        let Some(displaced) = self.measured.insert(index, element.clone()) else {
            return false;
        };
        if let Some(old) = displaced.element {
            host.unobserve(&old);
        }
        if displaced.index.is_none() {
            host.observe(&element);
        }
        true
    }

    /// Stops observing the element registered at `index`.
    pub fn unmeasure(&mut self, index: usize) -> bool {
        let Some(element) = self.measured.remove(index) else {
            return false;
        };
        if let Some(host) = self.host.as_mut() {
            host.unobserve(&element);
        }
        true
    }

    /// Call this when an observed element reports a new size along the scroll axis.
    ///
    /// Unknown elements and non-finite or non-positive sizes are ignored. Accepted sizes are
    /// queued and applied, in arrival order, before the next computation; a frame is
    /// requested so that one happens.
    pub fn on_element_resized(&mut self, element: &H::Element, size: f64) -> bool {
        if self.phase != Phase::Observing || !self.options.window.dynamic {
            return false;
        }
        let Some(index) = self.measured.index_of(element) else {
            vtrace!(size, "resize from unregistered element ignored");
            return false;
        };
        if !size.is_finite() || size <= 0.0 {
            vtrace!(index, size, "invalid measurement ignored");
            return false;
        }
        self.pending_sizes.push((index, size));
        if let Some(host) = self.host.as_mut() {
            self.frame.request(host);
        }
        true
    }

    /// Moves the host to `value`, clamped to `[0, total_size - viewport_size]`, and recomputes.
    ///
    /// The clamp runs on the engine against its current extent, after queued measurements and
    /// option changes. Returns the applied offset. In offload mode the target is applied when
    /// the worker's reply is polled, so this returns `None`; it also returns `None` when not
    /// observing.
    pub fn scroll_to_offset(&mut self, value: f64) -> Option<f64> {
        if self.phase != Phase::Observing {
            return None;
        }
        self.send(Request::ScrollToOffset { offset: value });
        (!self.is_offloaded()).then_some(self.scroll_offset)
    }

    /// Scrolls so that `index` (clamped into the list) lands at `align`.
    ///
    /// Returns the applied offset. In offload mode the target is resolved by the worker and
    /// applied when its reply is polled, so this returns `None`.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> Option<f64> {
        if self.phase != Phase::Observing {
            return None;
        }
        self.send(Request::ScrollToIndex { index, align });
        (!self.is_offloaded()).then_some(self.scroll_offset)
    }

    pub fn scroll_to_top(&mut self) -> Option<f64> {
        self.scroll_to_offset(0.0)
    }

    /// Applies a partial options update and recomputes.
    ///
    /// Turning dynamic mode off or switching direction releases every observed element and
    /// drops queued measurements.
    pub fn set_options(&mut self, patch: OptionPatch) -> Invalidation {
        let invalidation = self.options.window.apply(&patch);
        vdebug!(?patch, ?invalidation, "set_options");
        if invalidation == Invalidation::None {
            return invalidation;
        }
        if invalidation == Invalidation::All {
            self.pending_sizes.clear();
            if !self.options.window.dynamic || patch.direction.is_some() {
                self.release_measured();
            }
        }
        if self.phase == Phase::Observing {
            self.send(Request::Options(patch));
        }
        invalidation
    }

    /// Clones the current window options, applies `f`, then applies the difference.
    pub fn update_options(&mut self, f: impl FnOnce(&mut WindowOptions)) -> Invalidation {
        let prev = self.options.window;
        let mut next = prev;
        f(&mut next);

        let mut patch = OptionPatch::default();
        if next.direction != prev.direction {
            patch.direction = Some(next.direction);
        }
        if next.item_count != prev.item_count {
            patch.item_count = Some(next.item_count);
        }
        if next.item_size != prev.item_size {
            patch.item_size = Some(next.item_size);
        }
        if next.overscan != prev.overscan {
            patch.overscan = Some(next.overscan);
        }
        if next.dynamic != prev.dynamic {
            patch.dynamic = Some(next.dynamic);
        }
        self.set_options(patch)
    }

    /// Drops every measured size on the engine and recomputes.
    pub fn reset_sizes(&mut self) {
        self.pending_sizes.clear();
        if self.phase == Phase::Observing {
            self.send(Request::ResetSize);
        }
    }

    /// Applies every worker reply that is ready, in receipt order.
    ///
    /// Returns the number of replies applied. Always `Ok(0)` in local mode.
    pub fn poll(&mut self) -> Result<usize> {
        if self.worker_failed {
            return Err(Error::WorkerGone);
        }
        Ok(self.drain_replies())
    }

    /// Blocks up to `timeout` for one worker reply and applies it.
    ///
    /// Returns `Ok(false)` on timeout and in local mode.
    pub fn wait_for_reply(&mut self, timeout: Duration) -> Result<bool> {
        if self.worker_failed {
            return Err(Error::WorkerGone);
        }
        let Some(Engine::Offload(bridge)) = self.engine.as_ref() else {
            return Ok(false);
        };
        let Some(reply) = bridge.recv_timeout(timeout) else {
            return Ok(false);
        };
        self.handle_reply(reply);
        Ok(true)
    }

    fn drain_replies(&mut self) -> usize {
        let Some(Engine::Offload(bridge)) = self.engine.as_ref() else {
            return 0;
        };
        let mut replies = std::mem::take(&mut self.scratch);
        while let Some(reply) = bridge.try_recv() {
            replies.push(reply);
        }
        let n = replies.len();
        for reply in replies.drain(..) {
            self.handle_reply(reply);
        }
        self.scratch = replies;
        n
    }

    fn flush_sizes(&mut self) {
        if self.pending_sizes.is_empty() {
            return;
        }
        let entries = std::mem::take(&mut self.pending_sizes);
        vtrace!(entries = entries.len(), "flush measurements");
        self.dispatch(Request::UpdateSize { entries });
    }

    /// Flushes queued measurements, then dispatches `request`.
    fn send(&mut self, request: Request) {
        self.flush_sizes();
        self.dispatch(request);
    }

    fn dispatch(&mut self, request: Request) {
        match self.engine.as_mut() {
            Some(Engine::Local(worker)) => {
                let mut replies = std::mem::take(&mut self.scratch);
                worker.handle(request, |reply| replies.push(reply));
                for reply in replies.drain(..) {
                    self.handle_reply(reply);
                }
                self.scratch = replies;
            }
            Some(Engine::Offload(bridge)) => {
                if bridge.post(request).is_err() {
                    vwarn!("worker is gone; request dropped");
                    self.worker_failed = true;
                }
            }
            None => {}
        }
    }

    fn handle_reply(&mut self, reply: Reply) {
        if self.phase != Phase::Observing {
            return;
        }
        match reply {
            Reply::Calculated(calc) => {
                self.apply(calc);
            }
            Reply::ScrollTarget { offset } => {
                let direction = self.options.window.direction;
                if let Some(host) = self.host.as_mut() {
                    host.set_scroll_offset(direction, offset);
                }
                self.scroll_offset = offset;
            }
        }
    }

    /// Replaces the snapshot wholesale; returns whether anything changed.
    fn apply(&mut self, calc: Calculated) -> bool {
        if calc == self.snapshot {
            return false;
        }
        vtrace!(
            start = calc.range.start,
            end = calc.range.end,
            offset = calc.offset,
            total_size = calc.total_size,
            "snapshot changed"
        );
        self.snapshot = calc;
        if let Some(cb) = &self.options.on_change {
            cb(&self.snapshot);
        }
        true
    }

    fn release_measured(&mut self) {
        if let Some(host) = self.host.as_mut() {
            for element in self.measured.drain() {
                host.unobserve(&element);
            }
        } else {
            self.measured.drain().for_each(drop);
        }
    }
}

impl<H: Host> Drop for WindowController<H> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<H: Host> fmt::Debug for WindowController<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowController")
            .field("options", &self.options)
            .field("phase", &self.phase)
            .field("engine", &self.engine)
            .field("measured", &self.measured.len())
            .field("frame", &self.frame)
            .field("viewport_size", &self.viewport_size)
            .field("scroll_offset", &self.scroll_offset)
            .field("snapshot", &self.snapshot)
            .finish_non_exhaustive()
    }
}
