//! Lightweight global metrics for Rabbit.
//!
//! Атомарные счётчики по подсистемам:
//! - Store (add / reject)
//! - Persistence (load / save)

use std::sync::atomic::{AtomicU64, Ordering};

// ----- Store -----
static ITEMS_ADDED: AtomicU64 = AtomicU64::new(0);
static ADDS_REJECTED: AtomicU64 = AtomicU64::new(0);

// ----- Persistence -----
static ITEMS_LOADED: AtomicU64 = AtomicU64::new(0);
static LINES_SKIPPED: AtomicU64 = AtomicU64::new(0);
static SAVES_TOTAL: AtomicU64 = AtomicU64::new(0);
static SAVE_FAILURES: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    // Store
    pub items_added: u64,
    pub adds_rejected: u64,

    // Persistence
    pub items_loaded: u64,
    pub lines_skipped: u64,
    pub saves_total: u64,
    pub save_failures: u64,
}

// ----- recorders -----

pub fn record_item_added() {
    ITEMS_ADDED.fetch_add(1, Ordering::Relaxed);
}

pub fn record_add_rejected() {
    ADDS_REJECTED.fetch_add(1, Ordering::Relaxed);
}

pub fn record_load(loaded: u64, skipped: u64) {
    ITEMS_LOADED.fetch_add(loaded, Ordering::Relaxed);
    LINES_SKIPPED.fetch_add(skipped, Ordering::Relaxed);
}

pub fn record_save(ok: bool) {
    SAVES_TOTAL.fetch_add(1, Ordering::Relaxed);
    if !ok {
        SAVE_FAILURES.fetch_add(1, Ordering::Relaxed);
    }
}

pub fn metrics_snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        items_added: ITEMS_ADDED.load(Ordering::Relaxed),
        adds_rejected: ADDS_REJECTED.load(Ordering::Relaxed),
        items_loaded: ITEMS_LOADED.load(Ordering::Relaxed),
        lines_skipped: LINES_SKIPPED.load(Ordering::Relaxed),
        saves_total: SAVES_TOTAL.load(Ordering::Relaxed),
        save_failures: SAVE_FAILURES.load(Ordering::Relaxed),
    }
}

/// Сброс всех счётчиков (для тестов).
pub fn metrics_reset() {
    ITEMS_ADDED.store(0, Ordering::Relaxed);
    ADDS_REJECTED.store(0, Ordering::Relaxed);
    ITEMS_LOADED.store(0, Ordering::Relaxed);
    LINES_SKIPPED.store(0, Ordering::Relaxed);
    SAVES_TOTAL.store(0, Ordering::Relaxed);
    SAVE_FAILURES.store(0, Ordering::Relaxed);
}
