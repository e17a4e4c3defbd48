//! Size limits shared by every layer
//!
//! Exceeding any of these fails with [`Error::Limit`](crate::Error::Limit).

/// Longest accepted key, in bytes (64 KiB)
pub const MAX_KEY_LEN: usize = 64 * 1024;

/// Default upper bound for a single stored value, in bytes (64 MiB)
pub const DEFAULT_MAX_VALUE_SIZE: u64 = 64 * 1024 * 1024;

/// Maximum number of elements an [`ArrayValue`](crate::ArrayValue) may hold
pub const MAX_ARRAY_LEN: usize = 1 << 24;
