// Example: dynamic measurement with out-of-order size reports.
use vwindow::{Align, Window, WindowOptions};

fn main() {
    let mut w = Window::new(WindowOptions::dynamic(10_000, 40.0).with_overscan(2));
    w.set_viewport_size(300.0);
    w.set_scroll_offset(2_000.0);

    let calc = w.calculate();
    println!(
        "estimated: range={:?} offset={} total={}",
        calc.range, calc.offset, calc.total_size
    );

    // Measurements arrive in any order; each only invalidates offsets after its own index.
    let changed = w.update_sizes([(51, 120.0), (0, 64.0), (50, 18.0), (52, 0.0)]);
    println!(
        "measured: changed={changed} cached_offsets={}",
        w.positions().valid_len()
    );

    let calc = w.calculate();
    println!(
        "after measure: range={:?} offset={} total={}",
        calc.range, calc.offset, calc.total_size
    );

    let to = w.scroll_to_index_offset(51, Align::Center);
    w.set_scroll_offset(to);
    println!("scroll_to_index(51, center): offset={to} range={:?}", w.calculate().range);
}
