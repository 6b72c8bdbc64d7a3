// Example: a uniform list and the scroll-to helper.
use vwindow::{Align, Window, WindowOptions};

fn main() {
    let mut w = Window::new(WindowOptions::new(1_000_000, 24.0).with_overscan(3));
    w.set_viewport_size(480.0);
    w.set_scroll_offset(123_456.0);

    let calc = w.calculate();
    println!("total_size={}", calc.total_size);
    println!("range={:?} offset={}", calc.range, calc.offset);
    println!("at_start={} at_end={}", calc.at_start, calc.at_end);

    let off = w.scroll_to_index_offset(999_999, Align::End);
    w.set_scroll_offset(off);
    let calc = w.calculate();
    println!(
        "after scroll_to_index: offset={off} range={:?} at_end={}",
        calc.range, calc.at_end
    );
}
