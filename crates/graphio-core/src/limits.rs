//! Input limits for resource protection

/// Maximum length of a single word, number or quoted token (64KB)
pub const MAX_TOKEN_LEN: usize = 64 * 1024;

/// Maximum length of a physical input line (1MB)
pub const MAX_LINE_LEN: usize = 1024 * 1024;
