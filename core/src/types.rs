//! Shared primitive types used across the detection engine.

/// Account identifier as it appears on a transaction.
pub type AccountId = String;

/// Human-readable ring identifier (`RING_001`, `RING_002`, ...).
pub type RingId = String;

/// Position of an account in the registry arena.
/// Stable for the duration of one run; never valid across runs.
pub type AccountIdx = usize;

/// Suspicion / risk score on a 0-100 scale.
pub type Score = u32;
