//! Allocation Tracer
//!
//! [`TracingAllocator`] wraps the system allocator and, while a
//! [`TraceSession`] is active, records the net bytes allocated by the
//! session's thread together with their high-water mark.
//!
//! # Concurrency contract
//!
//! Tracing is a process-wide facility with at most ONE active session.
//! [`TraceSession::start`] takes a global lock, so concurrent benchmark runs
//! serialize around it. Starting a second session on a thread that already
//! holds one deadlocks. Only allocations made by the owning thread are
//! attributed to the session.
//!
//! The allocator must be installed by the final binary:
//!
//! ```ignore
//! #[global_allocator]
//! static GLOBAL: solbench_core::TracingAllocator = solbench_core::TracingAllocator;
//! ```
//!
//! Without it every traced byte count reads zero.
//!
//! The net count never drops below zero: freeing a block that predates the
//! session is absorbed instead of offsetting the session's own allocations.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

static INSTALLED: AtomicBool = AtomicBool::new(false);
static TRACING: AtomicBool = AtomicBool::new(false);
static CURRENT_BYTES: AtomicI64 = AtomicI64::new(0);
static PEAK_BYTES: AtomicI64 = AtomicI64::new(0);
static SESSION_LOCK: Mutex<()> = Mutex::new(());

thread_local! {
    static TRACED_THREAD: Cell<bool> = const { Cell::new(false) };
}

#[inline]
fn record(delta: i64) {
    if !TRACING.load(Ordering::Relaxed) {
        return;
    }
    let traced = TRACED_THREAD.try_with(Cell::get).unwrap_or(false);
    if !traced {
        return;
    }
    // Frees of blocks allocated before the session must not push the net
    // count below zero, or later allocations would never raise the peak
    let mut now = 0;
    let _ = CURRENT_BYTES.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
        now = current.saturating_add(delta).max(0);
        Some(now)
    });
    PEAK_BYTES.fetch_max(now, Ordering::Relaxed);
}

#[inline]
fn mark_installed() {
    if !INSTALLED.load(Ordering::Relaxed) {
        INSTALLED.store(true, Ordering::Relaxed);
    }
}

/// Global allocator that feeds the allocation tracer
pub struct TracingAllocator;

// SAFETY: every method forwards to `System` with the caller's arguments
// unchanged; bookkeeping only touches atomics and a const thread-local.
unsafe impl GlobalAlloc for TracingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        mark_installed();
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            record(layout.size() as i64);
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        mark_installed();
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            record(layout.size() as i64);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
        record(-(layout.size() as i64));
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            record(-(layout.size() as i64));
            record(new_size as i64);
        }
        new_ptr
    }
}

/// Whether [`TracingAllocator`] is the active global allocator.
///
/// Only becomes `true` after the first allocation routed through it.
pub fn tracer_installed() -> bool {
    INSTALLED.load(Ordering::Relaxed)
}

/// Traced byte counts read from an active session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TracedMemory {
    /// Net bytes still allocated since the session started
    pub current_bytes: u64,
    /// High-water mark of net allocated bytes
    pub peak_bytes: u64,
}

/// Scoped ownership of the allocation tracer.
///
/// Tracing stops and the global lock is released when the session is
/// dropped, including during unwinding.
pub struct TraceSession {
    _guard: MutexGuard<'static, ()>,
    // Sessions are bound to the thread that started them
    _not_send: PhantomData<*const ()>,
}

impl TraceSession {
    /// Acquire the tracer and start recording for the current thread.
    ///
    /// Blocks while another session is active.
    pub fn start() -> Self {
        let guard = SESSION_LOCK.lock().unwrap_or_else(PoisonError::into_inner);

        CURRENT_BYTES.store(0, Ordering::SeqCst);
        PEAK_BYTES.store(0, Ordering::SeqCst);
        TRACED_THREAD.with(|t| t.set(true));
        TRACING.store(true, Ordering::SeqCst);

        Self {
            _guard: guard,
            _not_send: PhantomData,
        }
    }

    /// Current and peak traced bytes
    pub fn traced_memory(&self) -> TracedMemory {
        let current = CURRENT_BYTES.load(Ordering::SeqCst);
        let peak = PEAK_BYTES.load(Ordering::SeqCst);
        TracedMemory {
            current_bytes: current.max(0) as u64,
            peak_bytes: peak.max(0) as u64,
        }
    }

    /// Read the counters and stop tracing
    pub fn stop(self) -> TracedMemory {
        self.traced_memory()
    }
}

impl Drop for TraceSession {
    fn drop(&mut self) {
        TRACING.store(false, Ordering::SeqCst);
        let _ = TRACED_THREAD.try_with(|t| t.set(false));
    }
}
