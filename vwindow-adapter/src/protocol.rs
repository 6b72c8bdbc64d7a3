//! Messages exchanged between the controller and the window worker.
//!
//! With `feature = "serde"` the wire form is adjacently tagged, e.g.
//! `{"type": "scroll", "payload": {"scrollOffset": 120.0}}`.

use vwindow::{Align, Calculated, Direction, FrameState, OptionPatch, WindowOptions};

/// Initial worker state: the full option set plus the host geometry at attach time.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Init {
    pub direction: Direction,
    pub item_count: usize,
    pub estimated_size: f64,
    pub overscan: usize,
    pub dynamic: bool,
    pub viewport_size: f64,
    pub scroll_offset: f64,
}

impl Init {
    pub fn new(options: &WindowOptions, frame: FrameState) -> Self {
        Self {
            direction: options.direction,
            item_count: options.item_count,
            estimated_size: options.item_size,
            overscan: options.overscan,
            dynamic: options.dynamic,
            viewport_size: frame.viewport_size,
            scroll_offset: frame.scroll_offset,
        }
    }

    pub fn options(&self) -> WindowOptions {
        WindowOptions::new(self.item_count, self.estimated_size)
            .with_direction(self.direction)
            .with_overscan(self.overscan)
            .with_dynamic(self.dynamic)
    }

    pub fn frame(&self) -> FrameState {
        FrameState::new(self.viewport_size, self.scroll_offset)
    }
}

/// Controller → worker. Every request triggers a recomputation and a
/// [`Reply::Calculated`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        tag = "type",
        content = "payload",
        rename_all = "camelCase",
        rename_all_fields = "camelCase"
    )
)]
pub enum Request {
    Init(Init),
    Viewport {
        viewport_size: f64,
    },
    Scroll {
        scroll_offset: f64,
    },
    #[cfg_attr(feature = "serde", serde(rename = "option"))]
    Options(OptionPatch),
    UpdateSize {
        entries: Vec<(usize, f64)>,
    },
    ResetSize,
    /// Clamps a scroll target against the worker's current extent. Answered with
    /// [`Reply::ScrollTarget`] before the recomputed [`Reply::Calculated`].
    ScrollToOffset {
        offset: f64,
    },
    /// Resolves a scroll-to-index target on the worker. Answered with
    /// [`Reply::ScrollTarget`] before the recomputed [`Reply::Calculated`].
    ScrollToIndex {
        index: usize,
        align: Align,
    },
}

impl Request {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Init(_) => "init",
            Self::Viewport { .. } => "viewport",
            Self::Scroll { .. } => "scroll",
            Self::Options(_) => "option",
            Self::UpdateSize { .. } => "updateSize",
            Self::ResetSize => "resetSize",
            Self::ScrollToOffset { .. } => "scrollToOffset",
            Self::ScrollToIndex { .. } => "scrollToIndex",
        }
    }
}

/// Worker → controller.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        tag = "type",
        content = "payload",
        rename_all = "camelCase",
        rename_all_fields = "camelCase"
    )
)]
pub enum Reply {
    Calculated(Calculated),
    /// The clamped offset the host should scroll to.
    ScrollTarget { offset: f64 },
}
