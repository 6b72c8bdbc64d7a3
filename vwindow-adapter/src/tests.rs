use crate::*;

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use vwindow::{Align, Calculated, OptionPatch, WindowOptions, WindowRange};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        let span = (end_exclusive - start) as u64;
        start + (self.next_u64() % span) as usize
    }
}

/// Records every call the controller makes.
#[derive(Debug, Default)]
struct TestHost {
    viewport: f64,
    scroll: f64,
    next_frame: u64,
    requested: Vec<FrameId>,
    cancelled: Vec<FrameId>,
    observed: HashSet<u32>,
    observe_calls: usize,
    unobserved: Vec<u32>,
    scroll_writes: Vec<f64>,
}

impl TestHost {
    fn new(viewport: f64, scroll: f64) -> Self {
        Self {
            viewport,
            scroll,
            ..Self::default()
        }
    }
}

impl Host for TestHost {
    type Element = u32;

    fn viewport_size(&self, _direction: vwindow::Direction) -> f64 {
        self.viewport
    }

    fn scroll_offset(&self, _direction: vwindow::Direction) -> f64 {
        self.scroll
    }

    fn set_scroll_offset(&mut self, _direction: vwindow::Direction, offset: f64) {
        self.scroll = offset;
        self.scroll_writes.push(offset);
    }

    fn request_frame(&mut self) -> FrameId {
        self.next_frame += 1;
        let id = FrameId(self.next_frame);
        self.requested.push(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.cancelled.push(id);
    }

    fn observe(&mut self, element: &u32) {
        self.observe_calls += 1;
        self.observed.insert(*element);
    }

    fn unobserve(&mut self, element: &u32) {
        self.observed.remove(element);
        self.unobserved.push(*element);
    }
}

fn uniform_options() -> ControllerOptions {
    ControllerOptions::new(WindowOptions::new(100, 50.0).with_overscan(2))
}

fn dynamic_options() -> ControllerOptions {
    ControllerOptions::new(WindowOptions::dynamic(100, 50.0).with_overscan(0))
}

fn attached(options: ControllerOptions, host: TestHost) -> WindowController<TestHost> {
    let mut c = WindowController::new(options);
    c.attach(host).unwrap();
    c
}

fn host_of(c: &WindowController<TestHost>) -> &TestHost {
    c.host().unwrap()
}

/// Applies worker replies until `done` holds, or gives up after a few seconds.
fn settle(
    c: &mut WindowController<TestHost>,
    mut done: impl FnMut(&WindowController<TestHost>) -> bool,
) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if done(c) {
            return true;
        }
        c.wait_for_reply(Duration::from_millis(50)).unwrap();
    }
    done(c)
}

/// Receives exactly `n` replies from the bridge.
fn recv_n(bridge: &SyncBridge, n: usize) -> Vec<Reply> {
    let mut out = Vec::new();
    for _ in 0..n {
        out.push(bridge.recv_timeout(Duration::from_secs(5)).unwrap());
    }
    out
}

fn last_calculated(replies: &[Reply]) -> Calculated {
    replies
        .iter()
        .rev()
        .find_map(|r| match r {
            Reply::Calculated(calc) => Some(*calc),
            Reply::ScrollTarget { .. } => None,
        })
        .unwrap()
}

#[test]
fn attach_computes_initial_range() {
    let c = attached(uniform_options(), TestHost::new(300.0, 0.0));
    assert_eq!(c.phase(), Phase::Observing);
    assert_eq!(c.range(), WindowRange::inclusive(0, 7));
    assert_eq!(c.total_size(), 5000.0);
    assert!(c.at_start());
    assert!(!c.at_end());
}

#[test]
fn lifecycle_rejects_misuse() {
    let mut c = WindowController::new(uniform_options());
    assert_eq!(c.phase(), Phase::Idle);
    assert!(c.scroll_to_offset(10.0).is_none());

    c.attach(TestHost::new(300.0, 0.0)).unwrap();
    assert!(matches!(
        c.attach(TestHost::new(300.0, 0.0)),
        Err(Error::AlreadyAttached)
    ));

    let host = c.dispose().unwrap();
    assert_eq!(host.viewport, 300.0);
    assert_eq!(c.phase(), Phase::Disposed);
    assert!(c.dispose().is_none());
    assert!(matches!(
        c.attach(TestHost::new(300.0, 0.0)),
        Err(Error::Disposed)
    ));
}

#[test]
fn scroll_bursts_coalesce_into_one_frame() {
    let mut c = attached(uniform_options(), TestHost::new(300.0, 0.0));

    c.host_mut().unwrap().scroll = 1000.0;
    c.on_scroll();
    c.on_scroll();
    c.on_scroll();
    assert_eq!(host_of(&c).requested.len(), 1);
    assert!(c.is_frame_pending());
    // Nothing is recomputed until the frame fires.
    assert_eq!(c.range(), WindowRange::inclusive(0, 7));

    c.on_frame();
    assert!(!c.is_frame_pending());
    assert_eq!(c.range(), WindowRange::inclusive(18, 27));
    assert_eq!(c.offset(), 900.0);

    // A stray frame callback is a no-op.
    c.host_mut().unwrap().scroll = 0.0;
    c.on_frame();
    assert_eq!(c.range(), WindowRange::inclusive(18, 27));

    c.on_scroll();
    assert_eq!(host_of(&c).requested.len(), 2);
}

#[test]
fn on_change_fires_only_for_new_snapshots() {
    let changes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&changes);
    let options = uniform_options().with_on_change(Some(move |_: &Calculated| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));
    let mut c = attached(options, TestHost::new(300.0, 0.0));
    assert_eq!(changes.load(Ordering::SeqCst), 1);

    c.on_scroll();
    c.on_frame();
    assert_eq!(changes.load(Ordering::SeqCst), 1);

    c.host_mut().unwrap().scroll = 1000.0;
    c.on_scroll();
    c.on_frame();
    assert_eq!(changes.load(Ordering::SeqCst), 2);
}

#[test]
fn viewport_resize_recomputes_synchronously() {
    let mut c = attached(uniform_options(), TestHost::new(300.0, 0.0));
    c.host_mut().unwrap().viewport = 500.0;
    c.on_viewport_resized();
    // visible = 10, last = 0 + 10 + 2 - 1
    assert_eq!(c.range(), WindowRange::inclusive(0, 11));
    assert_eq!(c.viewport_size(), 500.0);

    c.host_mut().unwrap().viewport = f64::NAN;
    c.on_viewport_resized();
    assert_eq!(c.viewport_size(), 0.0);
}

#[test]
fn dispose_cancels_pending_frame_and_releases_observers() {
    let mut c = attached(dynamic_options(), TestHost::new(100.0, 0.0));
    assert!(c.measure(0, 10));
    assert!(c.measure(1, 11));
    c.on_scroll();
    let pending = host_of(&c).requested[0];

    let host = c.dispose().unwrap();
    assert_eq!(host.cancelled, vec![pending]);
    assert!(host.observed.is_empty());
    assert_eq!(c.measured_count(), 0);
    assert!(!c.is_frame_pending());

    // Events after disposal are ignored.
    c.on_scroll();
    c.on_frame();
    assert!(!c.measure(2, 12));
}

#[test]
fn measure_replaces_and_moves_elements() {
    let mut c = attached(dynamic_options(), TestHost::new(100.0, 0.0));

    assert!(c.measure(0, 1));
    assert!(host_of(&c).observed.contains(&1));

    // Same index, new element: the old one is released.
    assert!(c.measure(0, 2));
    assert_eq!(host_of(&c).unobserved, vec![1]);
    assert!(host_of(&c).observed.contains(&2));

    // Same element, new index: keeps its observer.
    assert!(c.measure(3, 2));
    assert_eq!(host_of(&c).observe_calls, 2);
    assert_eq!(c.measured_count(), 1);

    // Exact repeat is a no-op.
    assert!(!c.measure(3, 2));

    assert!(c.unmeasure(3));
    assert!(!c.unmeasure(3));
    assert!(host_of(&c).observed.is_empty());
}

#[test]
fn measure_is_ignored_in_uniform_mode() {
    let mut c = attached(uniform_options(), TestHost::new(300.0, 0.0));
    assert!(!c.measure(0, 1));
    assert!(!c.on_element_resized(&1, 80.0));
    assert!(host_of(&c).observed.is_empty());
}

#[test]
fn element_resizes_apply_on_next_frame() {
    let mut c = attached(dynamic_options(), TestHost::new(100.0, 0.0));
    for (i, el) in [10u32, 11, 12].into_iter().enumerate() {
        assert!(c.measure(i, el));
    }

    assert!(c.on_element_resized(&10, 80.0));
    assert!(c.on_element_resized(&11, 40.0));
    assert!(c.on_element_resized(&12, 60.0));
    assert_eq!(host_of(&c).requested.len(), 1);
    assert_eq!(c.total_size(), 5000.0);

    c.on_frame();
    // 97 * 50 + 80 + 40 + 60
    assert_eq!(c.total_size(), 5030.0);
}

#[test]
fn invalid_or_unknown_measurements_are_dropped() {
    let mut c = attached(dynamic_options(), TestHost::new(100.0, 0.0));
    assert!(c.measure(0, 10));

    assert!(!c.on_element_resized(&10, f64::NAN));
    assert!(!c.on_element_resized(&10, f64::INFINITY));
    assert!(!c.on_element_resized(&10, 0.0));
    assert!(!c.on_element_resized(&10, -4.0));
    assert!(!c.on_element_resized(&99, 80.0));
    assert!(host_of(&c).requested.is_empty());
    assert_eq!(c.total_size(), 5000.0);
}

#[test]
fn later_measurements_of_one_index_win() {
    let mut c = attached(dynamic_options(), TestHost::new(100.0, 0.0));
    assert!(c.measure(0, 10));
    assert!(c.on_element_resized(&10, 80.0));
    assert!(c.on_element_resized(&10, 70.0));
    c.on_frame();
    assert_eq!(c.total_size(), 5020.0);
}

#[test]
fn scroll_to_index_moves_the_host_in_local_mode() {
    let mut c = attached(uniform_options(), TestHost::new(300.0, 0.0));

    assert_eq!(c.scroll_to_index(99, Align::End), Some(4700.0));
    assert_eq!(host_of(&c).scroll, 4700.0);
    assert_eq!(c.scroll_offset(), 4700.0);
    // start = 94, overscanned start = 92, last clamped to 99
    assert_eq!(c.range(), WindowRange::inclusive(92, 99));
    assert!(c.at_end());

    assert_eq!(c.scroll_to_index(10, Align::Center), Some(375.0));
    assert_eq!(c.scroll_to_index(10_000, Align::Start), Some(4700.0));
}

#[test]
fn scroll_to_offset_clamps_into_scrollable_span() {
    let mut c = attached(uniform_options(), TestHost::new(300.0, 0.0));

    assert_eq!(c.scroll_to_offset(10_000.0), Some(4700.0));
    assert_eq!(c.scroll_to_offset(-5.0), Some(0.0));
    assert_eq!(c.scroll_to_offset(f64::NAN), Some(0.0));
    assert_eq!(c.scroll_to_offset(1000.0), Some(1000.0));
    assert_eq!(c.range(), WindowRange::inclusive(18, 27));

    assert_eq!(c.scroll_to_top(), Some(0.0));
    assert_eq!(host_of(&c).scroll_writes, vec![4700.0, 0.0, 0.0, 1000.0, 0.0]);
}

#[test]
fn scroll_to_offset_sees_queued_measurements() {
    let mut c = attached(dynamic_options(), TestHost::new(100.0, 0.0));
    assert!(c.measure(99, 7));
    assert!(c.on_element_resized(&7, 250.0));

    // total = 99 * 50 + 250 = 5200
    assert_eq!(c.scroll_to_offset(f64::MAX), Some(5100.0));
    assert_eq!(c.total_size(), 5200.0);
}

#[test]
fn set_options_recomputes_with_new_count() {
    let mut c = attached(uniform_options(), TestHost::new(300.0, 0.0));

    assert_eq!(
        c.set_options(OptionPatch::default().item_count(5)),
        vwindow::Invalidation::Positions
    );
    assert_eq!(c.range(), WindowRange::inclusive(0, 4));
    assert_eq!(c.total_size(), 250.0);

    assert_eq!(
        c.update_options(|o| o.item_count = 0),
        vwindow::Invalidation::Positions
    );
    assert!(c.range().is_empty());
    assert_eq!(c.total_size(), 0.0);

    assert_eq!(
        c.set_options(OptionPatch::default().item_count(0)),
        vwindow::Invalidation::None
    );
}

#[test]
fn leaving_dynamic_mode_releases_observers() {
    let mut c = attached(dynamic_options(), TestHost::new(100.0, 0.0));
    assert!(c.measure(0, 10));
    assert!(c.measure(1, 11));
    assert!(c.on_element_resized(&10, 80.0));

    assert_eq!(
        c.set_options(OptionPatch::default().dynamic(false)),
        vwindow::Invalidation::All
    );
    assert_eq!(c.measured_count(), 0);
    assert!(host_of(&c).observed.is_empty());
    assert!(!c.options().window.dynamic);
    assert_eq!(c.total_size(), 5000.0);
}

#[test]
fn reset_sizes_restores_estimates() {
    let mut c = attached(dynamic_options(), TestHost::new(100.0, 0.0));
    assert!(c.measure(0, 10));
    assert!(c.on_element_resized(&10, 80.0));
    c.on_frame();
    assert_eq!(c.total_size(), 5030.0);

    c.reset_sizes();
    assert_eq!(c.total_size(), 5000.0);
}

#[test]
fn worker_drops_requests_before_init() {
    let mut worker = Worker::new();
    let mut replies = Vec::new();
    worker.handle(Request::Scroll { scroll_offset: 10.0 }, |r| replies.push(r));
    assert!(replies.is_empty());
    assert!(!worker.is_initialized());

    let init = Init::new(
        &WindowOptions::new(100, 50.0).with_overscan(2),
        vwindow::FrameState::new(300.0, 0.0),
    );
    worker.handle(Request::Init(init), |r| replies.push(r));
    assert_eq!(replies.len(), 1);
    assert_eq!(
        last_calculated(&replies).range,
        WindowRange::inclusive(0, 7)
    );

    replies.clear();
    worker.handle(
        Request::ScrollToIndex {
            index: 99,
            align: Align::End,
        },
        |r| replies.push(r),
    );
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0], Reply::ScrollTarget { offset: 4700.0 });
    assert_eq!(
        last_calculated(&replies).range,
        WindowRange::inclusive(92, 99)
    );
}

#[test]
fn bridge_matches_local_worker() {
    let mut rng = Lcg::new(7);
    let init = Init::new(
        &WindowOptions::dynamic(500, 40.0).with_overscan(3),
        vwindow::FrameState::new(400.0, 0.0),
    );

    let mut requests = vec![Request::Init(init)];
    for _ in 0..20 {
        let entries = (0..8)
            .map(|_| {
                (
                    rng.gen_range_usize(0, 500),
                    rng.gen_range_usize(1, 120) as f64,
                )
            })
            .collect();
        requests.push(Request::UpdateSize { entries });
        requests.push(Request::Scroll {
            scroll_offset: rng.gen_range_usize(0, 20_000) as f64,
        });
    }
    requests.push(Request::Options(OptionPatch::default().overscan(1)));
    requests.push(Request::ScrollToIndex {
        index: 250,
        align: Align::Center,
    });

    let mut local = Worker::new();
    let mut expected = Vec::new();
    for r in requests.iter().cloned() {
        local.handle(r, |reply| expected.push(reply));
    }

    let bridge = SyncBridge::spawn().unwrap();
    for r in requests {
        bridge.post(r).unwrap();
    }
    let got = recv_n(&bridge, expected.len());
    assert_eq!(got, expected);
}

#[test]
fn terminated_bridge_yields_nothing() {
    let mut bridge = SyncBridge::spawn().unwrap();
    let init = Init::new(&WindowOptions::new(10, 10.0), vwindow::FrameState::new(50.0, 0.0));
    bridge.post(Request::Init(init)).unwrap();
    bridge.terminate();

    assert!(!bridge.is_running());
    assert!(bridge.try_recv().is_none());
    assert!(bridge.recv_timeout(Duration::from_millis(10)).is_none());
    assert!(matches!(bridge.post(Request::ResetSize), Err(Error::WorkerGone)));
}

#[test]
fn offloaded_controller_follows_worker_replies() {
    let mut c = attached(
        uniform_options().with_use_worker(true),
        TestHost::new(300.0, 0.0),
    );
    assert!(c.is_offloaded());
    assert!(settle(&mut c, |c| c.total_size() == 5000.0));
    assert_eq!(c.range(), WindowRange::inclusive(0, 7));

    c.host_mut().unwrap().scroll = 1000.0;
    c.on_scroll();
    c.on_frame();
    assert!(settle(&mut c, |c| c.range() == WindowRange::inclusive(18, 27)));

    assert_eq!(c.scroll_to_index(99, Align::End), None);
    assert!(settle(&mut c, |c| c.range() == WindowRange::inclusive(92, 99)));
    assert_eq!(host_of(&c).scroll, 4700.0);
    assert!(c.at_end());

    assert_eq!(c.scroll_to_offset(9_999.0), None);
    assert!(settle(&mut c, |c| c.scroll_offset() == 4700.0));
    assert_eq!(host_of(&c).scroll, 4700.0);
}

#[test]
fn offloaded_scroll_to_offset_before_first_reply() {
    let mut c = attached(
        uniform_options().with_use_worker(true),
        TestHost::new(300.0, 0.0),
    );
    // No reply applied yet: the local snapshot still reports a zero extent.
    assert_eq!(c.total_size(), 0.0);

    assert_eq!(c.scroll_to_offset(1000.0), None);
    assert!(settle(&mut c, |c| c.range() == WindowRange::inclusive(18, 27)));
    assert_eq!(host_of(&c).scroll, 1000.0);
    assert_eq!(c.scroll_offset(), 1000.0);
}

#[test]
fn offloaded_scroll_to_offset_sees_unanswered_option_change() {
    let mut c = attached(
        uniform_options().with_use_worker(true),
        TestHost::new(300.0, 0.0),
    );
    assert!(settle(&mut c, |c| c.total_size() == 5000.0));

    c.set_options(OptionPatch::default().item_count(200));
    // total = 200 * 50, max = 9700
    assert_eq!(c.scroll_to_offset(9000.0), None);
    assert!(settle(&mut c, |c| c.scroll_offset() == 9000.0));
    assert_eq!(host_of(&c).scroll, 9000.0);
    assert!(settle(&mut c, |c| c.total_size() == 10_000.0));
}

#[test]
fn worker_clamps_scroll_to_offset() {
    let mut worker = Worker::new();
    let init = Init::new(
        &WindowOptions::new(100, 50.0).with_overscan(2),
        vwindow::FrameState::new(300.0, 0.0),
    );
    worker.handle(Request::Init(init), |_| {});

    for (requested, applied) in [(10_000.0, 4700.0), (-5.0, 0.0), (f64::NAN, 0.0), (1000.0, 1000.0)] {
        let mut replies = Vec::new();
        worker.handle(Request::ScrollToOffset { offset: requested }, |r| {
            replies.push(r)
        });
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0], Reply::ScrollTarget { offset: applied });
    }
    assert_eq!(
        worker.window().unwrap().scroll_offset(),
        1000.0
    );
}

#[test]
fn terminate_skips_queued_backlog() {
    const N: usize = 1_000_000;
    let init = Init::new(
        &WindowOptions::dynamic(N, 10.0),
        vwindow::FrameState::new(500.0, 0.0),
    );
    // Each pair rebuilds the whole prefix cache.
    let heavy = [
        Request::ResetSize,
        Request::ScrollToIndex {
            index: N - 1,
            align: Align::End,
        },
    ];

    let mut local = Worker::new();
    local.handle(Request::Init(init), |_| {});
    let started = Instant::now();
    for r in heavy.iter().cloned() {
        local.handle(r, |_| {});
    }
    let one = started.elapsed();

    let mut bridge = SyncBridge::spawn().unwrap();
    bridge.post(Request::Init(init)).unwrap();
    for _ in 0..100 {
        for r in heavy.iter().cloned() {
            bridge.post(r).unwrap();
        }
    }
    assert!(bridge.recv_timeout(Duration::from_secs(5)).is_some());

    let started = Instant::now();
    bridge.terminate();
    let took = started.elapsed();
    assert!(
        took < one * 20,
        "terminate took {took:?}, one backlog entry takes {one:?}"
    );
}

#[test]
fn offloaded_measurements_reach_the_worker() {
    let mut c = attached(
        dynamic_options().with_use_worker(true),
        TestHost::new(100.0, 0.0),
    );
    assert!(settle(&mut c, |c| c.total_size() == 5000.0));

    assert!(c.measure(0, 10));
    assert!(c.measure(1, 11));
    assert!(c.on_element_resized(&10, 80.0));
    assert!(c.on_element_resized(&11, 40.0));
    c.on_frame();
    assert!(settle(&mut c, |c| c.total_size() == 5020.0));
}

#[test]
fn replies_after_dispose_are_discarded() {
    let mut c = attached(
        uniform_options().with_use_worker(true),
        TestHost::new(300.0, 0.0),
    );
    assert!(settle(&mut c, |c| c.total_size() == 5000.0));

    c.host_mut().unwrap().scroll = 1000.0;
    c.on_scroll();
    c.on_frame();
    let before = c.snapshot();
    c.dispose();

    assert_eq!(c.poll().unwrap(), 0);
    assert!(!c.wait_for_reply(Duration::from_millis(20)).unwrap());
    assert_eq!(c.snapshot(), before);
}

#[test]
fn local_mode_poll_is_a_no_op() {
    let mut c = attached(uniform_options(), TestHost::new(300.0, 0.0));
    assert!(!c.is_offloaded());
    assert_eq!(c.poll().unwrap(), 0);
    assert!(!c.wait_for_reply(Duration::from_millis(1)).unwrap());
}

#[test]
fn frame_throttle_tracks_one_pending_frame() {
    let mut host = TestHost::default();
    let mut t = FrameThrottle::new();
    assert!(t.request(&mut host));
    assert!(!t.request(&mut host));
    assert_eq!(t.pending(), Some(FrameId(1)));
    assert!(t.fire());
    assert!(!t.fire());

    assert!(t.request(&mut host));
    t.cancel(&mut host);
    assert_eq!(host.cancelled, vec![FrameId(2)]);
    t.cancel(&mut host);
    assert_eq!(host.cancelled.len(), 1);
}

#[test]
fn registry_keeps_both_directions_in_sync() {
    let mut r = MeasureRegistry::<u32>::new();
    assert_eq!(
        r.insert(0, 5),
        Some(Displaced {
            element: None,
            index: None
        })
    );
    assert_eq!(
        r.insert(1, 5),
        Some(Displaced {
            element: None,
            index: Some(0)
        })
    );
    assert_eq!(r.element_at(0), None);
    assert_eq!(r.index_of(&5), Some(1));

    assert_eq!(
        r.insert(1, 6),
        Some(Displaced {
            element: Some(5),
            index: None
        })
    );
    assert_eq!(r.index_of(&5), None);
    assert_eq!(r.len(), 1);

    let drained: Vec<_> = r.drain().collect();
    assert_eq!(drained, vec![6]);
    assert!(r.is_empty());
    assert_eq!(r.index_of(&6), None);
}

#[test]
fn errors_render_and_chain() {
    use std::error::Error as _;

    assert_eq!(
        Error::WorkerGone.to_string(),
        "window worker is no longer running"
    );
    let spawn = Error::WorkerSpawn(std::io::Error::other("no threads"));
    assert!(spawn.to_string().contains("no threads"));
    assert!(spawn.source().is_some());
    assert!(Error::Disposed.source().is_none());
}

#[cfg(feature = "serde")]
#[test]
fn request_wire_form_is_adjacently_tagged() {
    use serde_json::json;

    let scroll = serde_json::to_value(Request::Scroll {
        scroll_offset: 120.0,
    })
    .unwrap();
    assert_eq!(
        scroll,
        json!({"type": "scroll", "payload": {"scrollOffset": 120.0}})
    );

    let update = serde_json::to_value(Request::UpdateSize {
        entries: vec![(3, 80.0)],
    })
    .unwrap();
    assert_eq!(
        update,
        json!({"type": "updateSize", "payload": {"entries": [[3, 80.0]]}})
    );

    let option = serde_json::to_value(Request::Options(OptionPatch::default())).unwrap();
    assert_eq!(option["type"], "option");

    assert_eq!(
        serde_json::to_value(Request::ResetSize).unwrap(),
        json!({"type": "resetSize"})
    );

    let parsed: Request =
        serde_json::from_value(json!({"type": "viewport", "payload": {"viewportSize": 480.0}}))
            .unwrap();
    assert_eq!(
        parsed,
        Request::Viewport {
            viewport_size: 480.0
        }
    );
}

#[cfg(feature = "serde")]
#[test]
fn calculated_reply_sends_inclusive_range() {
    use serde_json::json;

    let mut worker = Worker::new();
    let init = Init::new(
        &WindowOptions::new(100, 50.0).with_overscan(2),
        vwindow::FrameState::new(300.0, 0.0),
    );
    let mut replies = Vec::new();
    worker.handle(Request::Init(init), |r| replies.push(r));

    let value = serde_json::to_value(replies[0]).unwrap();
    assert_eq!(
        value,
        json!({
            "type": "calculated",
            "payload": {
                "range": {"start": 0, "end": 7},
                "offset": 0.0,
                "totalSize": 5000.0,
                "atStart": true,
                "atEnd": false
            }
        })
    );
    let back: Reply = serde_json::from_value(value).unwrap();
    assert_eq!(back, replies[0]);

    let empty = Reply::Calculated(Calculated::default());
    let value = serde_json::to_value(empty).unwrap();
    assert_eq!(value["payload"]["range"], json!({"start": 0, "end": -1}));
}

#[cfg(feature = "serde")]
#[test]
fn reply_wire_form_is_adjacently_tagged() {
    let reply = Reply::ScrollTarget { offset: 4700.0 };
    let value = serde_json::to_value(reply).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"type": "scrollTarget", "payload": {"offset": 4700.0}})
    );
    let back: Reply = serde_json::from_value(value).unwrap();
    assert_eq!(back, reply);
}
