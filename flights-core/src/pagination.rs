use crate::{CoreError, CoreResult};

/// Upper bound on rows returned by one list query, whatever the client asks for.
pub const MAX_PAGE_SIZE: i64 = 30;

pub fn clamp_limit(limit: i64) -> i64 {
    limit.min(MAX_PAGE_SIZE)
}

/// A page of a list query, already translated to SQL `LIMIT` / `OFFSET`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    /// `page` is 1-based. The offset is computed from the clamped limit so
    /// consecutive pages never overlap.
    pub fn new(page: i64, page_size: i64) -> CoreResult<Self> {
        if page < 1 {
            return Err(CoreError::Validation("Invalid page number".to_string()));
        }
        if page_size < 1 {
            return Err(CoreError::Validation("Invalid page size".to_string()));
        }

        let limit = clamp_limit(page_size);
        let offset = (page - 1)
            .checked_mul(limit)
            .ok_or_else(|| CoreError::Validation("Invalid page number".to_string()))?;

        Ok(Self { limit, offset })
    }
}
