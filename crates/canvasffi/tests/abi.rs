use std::cell::Cell;
use std::ffi::c_void;

use wgpu_canvas::*;

extern "C" fn count_request(user_data: *mut c_void) {
    let counter = unsafe { &*(user_data as *const Cell<usize>) };
    counter.set(counter.get() + 1);
}

fn null_surface(platform: u32) -> ViewObj {
    ViewObj {
        platform,
        display: std::ptr::null_mut(),
        view: std::ptr::null_mut(),
        layer: std::ptr::null_mut(),
        width: 800,
        height: 600,
        maximum_frames: 60,
        flags: 0,
        callback: None,
    }
}

#[test]
fn unusable_surface_yields_the_sentinel() {
    let handle = unsafe { create_wgpu_canvas(null_surface(2), 0) };
    assert_eq!(handle, WGPU_CANVAS_INVALID);

    let handle = unsafe { create_wgpu_canvas(null_surface(77), 0) };
    assert_eq!(handle, WGPU_CANVAS_INVALID);
}

#[test]
fn engine_calls_on_dead_handles_are_no_ops() {
    for handle in [WGPU_CANVAS_INVALID, 0, -5, 1 << 32, (9 << 32) | 3] {
        enter_frame(handle);
        change_example(handle, 2);
        resize_wgpu_canvas(handle, 640, 480);
        drop_wgpu_canvas(handle);
        drop_wgpu_canvas(handle);
    }
}

#[test]
fn view_requires_a_refresh_callback() {
    assert_eq!(wgpu_view_new(None, std::ptr::null_mut()), WGPU_CANVAS_INVALID);
}

#[test]
fn view_without_canvas_stays_inert() {
    let requests = Cell::new(0usize);
    let user_data = &requests as *const Cell<usize> as *mut c_void;
    let view = wgpu_view_new(Some(count_request), user_data);
    assert_ne!(view, WGPU_CANVAS_INVALID);

    assert!(!wgpu_view_tick(view));
    assert!(!wgpu_view_change_example(view, 3));
    wgpu_view_surface_resized(view, 1024, 768);

    let canvas = unsafe { wgpu_view_surface_created(view, null_surface(3), 0) };
    assert_eq!(canvas, WGPU_CANVAS_INVALID);
    assert!(!wgpu_view_tick(view));
    wgpu_view_surface_destroyed(view);

    assert_eq!(requests.get(), 0, "no frame was ever requested");
    wgpu_view_free(view);
}

#[test]
fn freed_views_are_never_reissued() {
    let requests = Cell::new(0usize);
    let user_data = &requests as *const Cell<usize> as *mut c_void;

    let first = wgpu_view_new(Some(count_request), user_data);
    wgpu_view_free(first);
    wgpu_view_free(first);
    assert!(!wgpu_view_tick(first));

    let second = wgpu_view_new(Some(count_request), user_data);
    assert_ne!(first, second);
    assert!(!wgpu_view_change_example(first, 1));
    wgpu_view_free(second);
}
