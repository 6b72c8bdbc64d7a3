//! A headless windowing engine for very large ordered lists.
//!
//! For host integration (frame-coalesced scrolling, measurement dispatch, worker offload), see
//! the `vwindow-adapter` crate.
//!
//! This crate holds the algorithmic core: a sparse size-override map with an estimate fallback,
//! a lazily extended prefix-offset cache, start-index lookup (division for uniform lists, binary
//! search for measured ones), and overscanned index windows.
//!
//! It is UI-agnostic. A host is expected to provide:
//! - viewport size along the scroll axis
//! - scroll offset along the same axis
//! - measured item sizes (dynamic mode only)
//!
//! ```rust
//! use vwindow::{Window, WindowOptions, WindowRange};
//!
//! let mut w = Window::new(WindowOptions::new(100, 50.0).with_overscan(2));
//! w.set_viewport_size(300.0);
//! w.set_scroll_offset(1000.0);
//!
//! let calc = w.calculate();
//! assert_eq!(calc.range, WindowRange::inclusive(18, 27));
//! assert_eq!(calc.total_size, 5000.0);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod options;
mod position;
mod range;
mod size;
mod size_map;
mod state;
mod types;
mod window;


pub use options::{Invalidation, OptionPatch, WindowOptions};
pub use position::PositionCache;
pub use range::{RangeFinder, uniform_last_index, visible_count};
pub use size::SizeResolver;
pub use state::FrameState;
pub use types::{Align, Calculated, Direction, WindowRange};
pub use window::Window;
