pub mod category_handlers;
pub mod comment_handlers;
pub mod post_handlers;

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

/// Clamp list pagination to sane bounds.
fn clamp_page(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = offset.unwrap_or(0).max(0);
    (limit, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_absent() {
        assert_eq!(clamp_page(None, None), (DEFAULT_PAGE_SIZE, 0));
    }

    #[test]
    fn limit_is_capped() {
        assert_eq!(clamp_page(Some(500), Some(10)), (MAX_PAGE_SIZE, 10));
    }

    #[test]
    fn nonpositive_values_are_clamped() {
        assert_eq!(clamp_page(Some(0), Some(-5)), (1, 0));
        assert_eq!(clamp_page(Some(-3), None), (1, 0));
    }
}
