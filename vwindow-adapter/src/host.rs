use vwindow::Direction;

/// Identifies a frame callback requested from the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameId(pub u64);

/// The scroll container and rendering environment the controller is attached to.
///
/// The controller never owns rendered elements. It reads geometry through this trait, asks the
/// host to move the scroll position, to schedule frame callbacks, and to start or stop
/// observing element sizes. Events flow the other way: the host calls
/// [`crate::WindowController::on_scroll`], [`crate::WindowController::on_frame`],
/// [`crate::WindowController::on_viewport_resized`] and
/// [`crate::WindowController::on_element_resized`].
pub trait Host {
    /// Handle to a rendered item element (an id, a node reference, ...).
    type Element: Clone + Eq + core::hash::Hash;

    /// Viewport extent along `direction` (block extent for vertical lists, inline for
    /// horizontal ones).
    fn viewport_size(&self, direction: Direction) -> f64;

    /// Current scroll offset along `direction`.
    fn scroll_offset(&self, direction: Direction) -> f64;

    /// Moves the scroll position along `direction`.
    fn set_scroll_offset(&mut self, direction: Direction, offset: f64);

    /// Schedules a single frame callback; the host answers with
    /// [`crate::WindowController::on_frame`].
    fn request_frame(&mut self) -> FrameId;

    /// Cancels a frame callback that has not fired yet.
    fn cancel_frame(&mut self, id: FrameId);

    /// Starts reporting size changes of `element`.
    fn observe(&mut self, element: &Self::Element);

    /// Stops reporting size changes of `element`.
    fn unobserve(&mut self, element: &Self::Element);
}
