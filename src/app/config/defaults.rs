// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Notifications**: toast lifetime and flash banner stagger
//! - **Progress**: simulated analysis duration
//! - **Diagnostics**: event buffer capacity

// ==========================================================================
// Notification Defaults
// ==========================================================================

/// Default time a toast stays on screen (in milliseconds).
pub const DEFAULT_NOTIFICATION_DURATION_MS: u64 = 5000;

/// Longest configurable toast lifetime (in milliseconds).
pub const MAX_NOTIFICATION_DURATION_MS: u64 = 60_000;

/// Delay between consecutive adopted flash banners (in milliseconds).
pub const DEFAULT_FLASH_STAGGER_MS: u64 = 300;

/// Longest configurable flash stagger (in milliseconds).
pub const MAX_FLASH_STAGGER_MS: u64 = 5000;

// ==========================================================================
// Progress Defaults
// ==========================================================================

/// Delay after which a submitted analysis is reported complete (in milliseconds).
pub const DEFAULT_SIMULATED_COMPLETION_MS: u64 = 7000;

/// Longest configurable simulated analysis (in milliseconds).
pub const MAX_SIMULATED_COMPLETION_MS: u64 = 120_000;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 1000;

/// Minimum diagnostic buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10;

/// Maximum diagnostic buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_NOTIFICATION_DURATION_MS <= MAX_NOTIFICATION_DURATION_MS);
    assert!(DEFAULT_FLASH_STAGGER_MS <= MAX_FLASH_STAGGER_MS);
    assert!(DEFAULT_SIMULATED_COMPLETION_MS > 0);
    assert!(DEFAULT_SIMULATED_COMPLETION_MS <= MAX_SIMULATED_COMPLETION_MS);

    assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY > 0);
    assert!(MAX_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
};
