// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Notifications**: Toast lifetime bounds
//! - **Diagnostics**: Event buffer sizing
//! - **Packaging**: Public base paths per build mode

// ==========================================================================
// Notification Defaults
// ==========================================================================

/// Default lifetime of a toast notification (in milliseconds).
pub const DEFAULT_NOTIFICATION_TTL_MS: u64 = 5000;

/// Minimum accepted toast lifetime (in milliseconds).
pub const MIN_NOTIFICATION_TTL_MS: u64 = 500;

/// Maximum accepted toast lifetime (in milliseconds).
pub const MAX_NOTIFICATION_TTL_MS: u64 = 60_000;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 1000;

/// Minimum diagnostics buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 100;

/// Maximum diagnostics buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;

// ==========================================================================
// Packaging Defaults
// ==========================================================================

/// Base path the application is served under in production builds.
pub const PRODUCTION_BASE_PATH: &str = "/create-real-estate-event/";

/// Base path for every other build.
pub const DEVELOPMENT_BASE_PATH: &str = "/";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_NOTIFICATION_TTL_MS > 0);
    assert!(DEFAULT_NOTIFICATION_TTL_MS >= MIN_NOTIFICATION_TTL_MS);
    assert!(DEFAULT_NOTIFICATION_TTL_MS <= MAX_NOTIFICATION_TTL_MS);

    assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY > 0);
    assert!(MAX_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_ttl_defaults_are_valid() {
        assert_eq!(DEFAULT_NOTIFICATION_TTL_MS, 5000);
        assert!(DEFAULT_NOTIFICATION_TTL_MS >= MIN_NOTIFICATION_TTL_MS);
        assert!(DEFAULT_NOTIFICATION_TTL_MS <= MAX_NOTIFICATION_TTL_MS);
    }

    #[test]
    fn diagnostics_capacity_defaults_are_valid() {
        assert_eq!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY, 1000);
        assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
        assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
    }

    #[test]
    fn base_paths_are_slash_delimited() {
        for path in [PRODUCTION_BASE_PATH, DEVELOPMENT_BASE_PATH] {
            assert!(path.starts_with('/'));
            assert!(path.ends_with('/'));
        }
    }
}
