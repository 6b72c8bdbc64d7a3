/// A lightweight, serializable snapshot of viewport + scroll state.
///
/// This is useful for restoring a list position across frames or sessions without coupling the
/// window to any specific UI framework. It is also the geometry half of the worker `init`
/// message.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FrameState {
    pub viewport_size: f64,
    pub scroll_offset: f64,
}

impl FrameState {
    pub fn new(viewport_size: f64, scroll_offset: f64) -> Self {
        Self {
            viewport_size: sanitize(viewport_size),
            scroll_offset: sanitize(scroll_offset),
        }
    }
}

/// Clamps host-supplied geometry to a finite, non-negative value.
pub(crate) fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
