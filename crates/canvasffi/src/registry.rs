use std::cell::RefCell;
use std::ffi::c_void;

use lifecycle::{HandleTable, RefreshSource, SurfaceController};
use renderer::WgpuEngine;

use crate::abi::RequestFrameFn;

/// Refresh source backed by a host callback that schedules one more
/// `wgpu_view_tick` (display link, choreographer, `invalidate()`).
pub(crate) struct HostRefresh {
    request_frame: RequestFrameFn,
    user_data: *mut c_void,
}

impl HostRefresh {
    pub(crate) fn new(request_frame: RequestFrameFn, user_data: *mut c_void) -> Self {
        Self {
            request_frame,
            user_data,
        }
    }
}

impl RefreshSource for HostRefresh {
    fn request_tick(&mut self) {
        (self.request_frame)(self.user_data);
    }
}

pub(crate) type View = SurfaceController<HostRefresh>;

/// Everything the C ABI hands out handles for, owned by the UI thread.
#[derive(Default)]
pub(crate) struct Registry {
    pub engine: WgpuEngine,
    pub views: HandleTable<View>,
}

thread_local! {
    static REGISTRY: RefCell<Registry> = RefCell::new(Registry::default());
}

/// Runs `f` against this thread's registry. Re-entrant calls made from inside
/// a host callback get `None`.
pub(crate) fn with_registry<R>(f: impl FnOnce(&mut Registry) -> R) -> Option<R> {
    REGISTRY
        .try_with(|cell| match cell.try_borrow_mut() {
            Ok(mut registry) => Some(f(&mut registry)),
            Err(_) => {
                tracing::warn!("re-entrant canvas call ignored");
                None
            }
        })
        .ok()
        .flatten()
}
