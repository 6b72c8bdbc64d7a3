//! Host integration for the `vwindow` crate.
//!
//! `vwindow` is pure math over a [`vwindow::Window`]. This crate wires it to a live scroll
//! container through the [`Host`] trait:
//!
//! - scroll notifications are coalesced into one recomputation per frame
//! - rendered elements are registered by index and their size reports are routed back to the
//!   window in dynamic mode
//! - the computation can optionally run on a worker thread ([`SyncBridge`]) that speaks a small
//!   request/reply protocol ([`Request`], [`Reply`])
//!
//! It is framework-agnostic: the host decides what an element handle is and how frames are
//! scheduled.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod bridge;
mod controller;
mod error;
mod frame;
mod host;
mod measure;
mod protocol;
mod worker;

#[cfg(test)]
mod tests;

pub use bridge::SyncBridge;
pub use controller::{ControllerOptions, OnChangeCallback, Phase, WindowController};
pub use error::{Error, Result};
pub use frame::FrameThrottle;
pub use host::{FrameId, Host};
pub use measure::{Displaced, MeasureRegistry};
pub use protocol::{Init, Reply, Request};
pub use worker::Worker;
