use vwindow::Window;

use crate::{Reply, Request};

/// The worker-side mirror of the engine.
///
/// It owns an independent [`Window`] built from the `init` request and kept in sync purely by
/// the requests it receives. It is never a cache of the host's state; the host treats its
/// replies as eventually consistent.
#[derive(Clone, Debug, Default)]
pub struct Worker {
    window: Option<Window>,
}

impl Worker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.window.is_some()
    }

    pub fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }

    /// Applies one request and emits the resulting replies in order.
    ///
    /// Requests that arrive before `init` are dropped without a reply.
    pub fn handle(&mut self, request: Request, mut emit: impl FnMut(Reply)) {
        if let Request::Init(init) = &request {
            vdebug!(
                item_count = init.item_count,
                dynamic = init.dynamic,
                "worker init"
            );
            let mut window = Window::with_frame(init.options(), init.frame());
            emit(Reply::Calculated(window.calculate()));
            self.window = Some(window);
            return;
        }

        let Some(window) = self.window.as_mut() else {
            vwarn!(kind = request.kind(), "request before init dropped");
            return;
        };

        match request {
            Request::Init(_) => {}
            Request::Viewport { viewport_size } => window.set_viewport_size(viewport_size),
            Request::Scroll { scroll_offset } => window.set_scroll_offset(scroll_offset),
            Request::Options(patch) => {
                window.apply_patch(&patch);
            }
            Request::UpdateSize { entries } => {
                window.update_sizes(entries);
            }
            Request::ResetSize => window.reset_sizes(),
            Request::ScrollToOffset { offset } => {
                let offset = window.clamp_scroll_offset(offset);
                window.set_scroll_offset(offset);
                emit(Reply::ScrollTarget { offset });
            }
            Request::ScrollToIndex { index, align } => {
                let offset = window.scroll_to_index_offset(index, align);
                window.set_scroll_offset(offset);
                emit(Reply::ScrollTarget { offset });
            }
        }

        emit(Reply::Calculated(window.calculate()));
    }
}
