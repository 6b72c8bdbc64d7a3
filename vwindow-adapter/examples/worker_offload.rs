use std::time::Duration;

use vwindow::{Align, Calculated, Direction, WindowOptions};
use vwindow_adapter::{ControllerOptions, FrameId, Host, WindowController};

// A simulated scroll container. A real adapter would forward these calls to its UI toolkit.
#[derive(Debug, Default)]
struct SimHost {
    viewport: f64,
    scroll: f64,
    next_frame: u64,
    pending_frame: Option<FrameId>,
}

impl Host for SimHost {
    type Element = usize;

    fn viewport_size(&self, _direction: Direction) -> f64 {
        self.viewport
    }

    fn scroll_offset(&self, _direction: Direction) -> f64 {
        self.scroll
    }

    fn set_scroll_offset(&mut self, _direction: Direction, offset: f64) {
        self.scroll = offset;
    }

    fn request_frame(&mut self) -> FrameId {
        self.next_frame += 1;
        let id = FrameId(self.next_frame);
        self.pending_frame = Some(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if self.pending_frame == Some(id) {
            self.pending_frame = None;
        }
    }

    fn observe(&mut self, _element: &usize) {}

    fn unobserve(&mut self, _element: &usize) {}
}

fn settle(c: &mut WindowController<SimHost>) {
    while c.wait_for_reply(Duration::from_millis(20)).unwrap_or(false) {}
}

fn main() {
    let options = ControllerOptions::new(WindowOptions::dynamic(100_000, 32.0).with_overscan(4))
        .with_use_worker(true)
        .with_on_change(Some(|calc: &Calculated| {
            println!(
                "range={:?} offset={} total={}",
                calc.range, calc.offset, calc.total_size
            );
        }));

    let mut c = WindowController::new(options);
    let host = SimHost {
        viewport: 640.0,
        ..SimHost::default()
    };
    if let Err(err) = c.attach(host) {
        eprintln!("attach failed: {err}");
        return;
    }
    settle(&mut c);

    // Mount the visible items and report their rendered heights.
    for index in c.range().indices() {
        c.measure(index, index);
        c.on_element_resized(&index, 24.0 + (index % 5) as f64 * 8.0);
    }

    // A burst of scroll events collapses into one frame.
    for step in 1..=10 {
        if let Some(h) = c.host_mut() {
            h.scroll = step as f64 * 150.0;
        }
        c.on_scroll();
    }
    c.on_frame();
    settle(&mut c);

    // The worker resolves the target; the host is moved when the reply is applied.
    c.scroll_to_index(50_000, Align::Center);
    settle(&mut c);
    println!(
        "after scroll_to_index: scroll={} at_end={}",
        c.scroll_offset(),
        c.at_end()
    );

    c.dispose();
}
