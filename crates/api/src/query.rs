//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Default page size for listing endpoints.
pub const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for listing endpoints.
pub const MAX_LIMIT: i64 = 200;

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// The requested limit, clamped to `[1, MAX_LIMIT]`.
    pub fn clamp_limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// The requested offset, floored at zero.
    pub fn clamp_offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_clamps() {
        let params = PaginationParams {
            limit: None,
            offset: None,
        };
        assert_eq!(params.clamp_limit(), DEFAULT_LIMIT);
        assert_eq!(params.clamp_offset(), 0);

        let params = PaginationParams {
            limit: Some(100_000),
            offset: Some(-5),
        };
        assert_eq!(params.clamp_limit(), MAX_LIMIT);
        assert_eq!(params.clamp_offset(), 0);
    }
}
