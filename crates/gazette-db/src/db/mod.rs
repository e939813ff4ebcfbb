pub mod blog;
pub mod career;
pub mod contact;
pub mod event;
pub mod gallery_image;

use gazette_core::AppError;

const DEFAULT_PAGE_LIMIT: i64 = 20;
const MAX_PAGE_LIMIT: i64 = 100;

/// Limit/offset pagination window, clamped to sane bounds.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Page {
            limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT),
            offset: offset.unwrap_or(0).max(0),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::new(None, None)
    }
}

/// Map database errors at the persistence boundary: schema constraint
/// violations are user-correctable validation failures, everything else
/// stays a database error.
pub(crate) fn map_db_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            return AppError::InvalidInput(format!(
                "A record with the same unique value already exists: {}",
                db_err.constraint().unwrap_or("unknown constraint")
            ));
        }
        if db_err.is_check_violation() {
            return AppError::InvalidInput(format!(
                "Value violates a schema constraint: {}",
                db_err.constraint().unwrap_or("unknown constraint")
            ));
        }
    }
    AppError::Database(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_clamps_limit_and_offset() {
        let page = Page::new(Some(5000), Some(-3));
        assert_eq!(page.limit, 100);
        assert_eq!(page.offset, 0);

        let page = Page::new(Some(0), None);
        assert_eq!(page.limit, 1);

        let page = Page::default();
        assert_eq!(page.limit, 20);
        assert_eq!(page.offset, 0);
    }
}
