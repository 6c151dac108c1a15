use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crossterm::event::{KeyCode, KeyEvent};

use blockfall::input::{GamepadButton, GamepadState, InputDispatcher, Swipe};
use blockfall::types::Phase;

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn dispatcher_round_trip_does_not_allocate() {
    let mut dispatcher = InputDispatcher::new();
    let pad = GamepadState::new()
        .with(GamepadButton::DpadLeft)
        .with(GamepadButton::South);

    // Warm-up.
    dispatcher.push_key(KeyEvent::from(KeyCode::Left));
    let _ = dispatcher.drain(Phase::Running);

    let allocs = with_alloc_counting(|| {
        for frame in 0..200u64 {
            dispatcher.push_key(KeyEvent::from(KeyCode::Right));
            dispatcher.push_swipe(Swipe::Down);
            dispatcher.poll_gamepad(pad, frame * 16);
            let drained = dispatcher.drain(Phase::Running);
            assert!(!drained.is_empty());
        }
    });

    assert!(allocs == 0);
}
