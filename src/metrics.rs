//! Process-wide counters for sessions and game activity.
use std::sync::atomic::{AtomicU64, Ordering};

static SESSIONS_STARTED: AtomicU64 = AtomicU64::new(0);
static SESSIONS_ENDED: AtomicU64 = AtomicU64::new(0);
static SESSIONS_ACTIVE: AtomicU64 = AtomicU64::new(0);
static SESSIONS_PEAK: AtomicU64 = AtomicU64::new(0);
static COMMANDS_HANDLED: AtomicU64 = AtomicU64::new(0);
static PROBES_ANSWERED: AtomicU64 = AtomicU64::new(0);
static DEATHS: AtomicU64 = AtomicU64::new(0);

pub fn record_session_start() {
    SESSIONS_STARTED.fetch_add(1, Ordering::Relaxed);
    let active = SESSIONS_ACTIVE.fetch_add(1, Ordering::Relaxed) + 1;
    SESSIONS_PEAK.fetch_max(active, Ordering::Relaxed);
}

pub fn record_session_end() {
    SESSIONS_ENDED.fetch_add(1, Ordering::Relaxed);
    let _ = SESSIONS_ACTIVE.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| {
        Some(n.saturating_sub(1))
    });
}

pub fn inc_commands() {
    COMMANDS_HANDLED.fetch_add(1, Ordering::Relaxed);
}

pub fn inc_probes() {
    PROBES_ANSWERED.fetch_add(1, Ordering::Relaxed);
}

pub fn inc_deaths() {
    DEATHS.fetch_add(1, Ordering::Relaxed);
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub sessions_started: u64,
    pub sessions_ended: u64,
    pub sessions_active: u64,
    pub sessions_peak: u64,
    pub commands_handled: u64,
    pub probes_answered: u64,
    pub deaths: u64,
}

pub fn snapshot() -> Snapshot {
    Snapshot {
        sessions_started: SESSIONS_STARTED.load(Ordering::Relaxed),
        sessions_ended: SESSIONS_ENDED.load(Ordering::Relaxed),
        sessions_active: SESSIONS_ACTIVE.load(Ordering::Relaxed),
        sessions_peak: SESSIONS_PEAK.load(Ordering::Relaxed),
        commands_handled: COMMANDS_HANDLED.load(Ordering::Relaxed),
        probes_answered: PROBES_ANSWERED.load(Ordering::Relaxed),
        deaths: DEATHS.load(Ordering::Relaxed),
    }
}
