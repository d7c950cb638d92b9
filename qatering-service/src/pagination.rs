//! Cursor pagination contract shared by every list query.
//!
//! Callers fetch `limit + 1` rows in a stable id order and hand them to
//! [`paginate`]. The incoming cursor translates into a strict inequality on
//! id: `id > cursor` for ascending scans (vendors, menu items) and
//! `id < cursor` for descending scans (orders, most recent first). Ids are
//! monotonic and insert-ordered, so rows existing at scan time are
//! consistently bounded even under concurrent inserts.

pub const DEFAULT_LIMIT: i64 = 50;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<i32>,
}

pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Slices a `limit + 1` fetch down to a page. If the extra row was present,
/// `next_cursor` is the id of the last retained row; otherwise this was the
/// final page.
pub fn paginate<T>(mut rows: Vec<T>, limit: i64, id_of: impl Fn(&T) -> i32) -> Page<T> {
    if rows.len() as i64 > limit {
        rows.truncate(limit as usize);
        let next_cursor = rows.last().map(id_of);
        Page {
            items: rows,
            next_cursor,
        }
    } else {
        Page {
            items: rows,
            next_cursor: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_cursor_when_extra_row_exists() {
        let page = paginate(vec![1, 2, 3, 4, 5], 4, |id| *id);
        assert_eq!(page.items, vec![1, 2, 3, 4]);
        assert_eq!(page.next_cursor, Some(4));
    }

    #[test]
    fn no_cursor_on_final_page() {
        let page = paginate(vec![1, 2, 3], 4, |id| *id);
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.next_cursor, None);
    }

    #[test]
    fn exact_limit_is_final_page() {
        let page = paginate(vec![1, 2, 3, 4], 4, |id| *id);
        assert_eq!(page.items.len(), 4);
        assert_eq!(page.next_cursor, None);
    }

    #[test]
    fn descending_scan_cursor_is_last_retained_id() {
        let page = paginate(vec![9, 8, 7], 2, |id| *id);
        assert_eq!(page.items, vec![9, 8]);
        assert_eq!(page.next_cursor, Some(8));
    }

    #[test]
    fn limit_clamped_to_bounds() {
        assert_eq!(clamp_limit(None), DEFAULT_LIMIT);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(1000)), MAX_LIMIT);
    }
}
