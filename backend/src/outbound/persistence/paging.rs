//! Offset/limit helpers shared by the Diesel repositories.
//!
//! Repositories fetch `limit + 1` rows so the pagination envelope can tell
//! whether another page follows without a separate count query.

use pagination::{Page, PageRequest};

use crate::domain::ports::RepositoryError;

/// SQL `OFFSET` for a page request.
pub(crate) fn sql_offset(page: &PageRequest) -> i64 {
    i64::try_from(page.offset()).unwrap_or(i64::MAX)
}

/// SQL `LIMIT` fetching one row beyond the requested page size.
pub(crate) fn sql_limit(page: &PageRequest) -> i64 {
    i64::from(page.limit()) + 1
}

/// Convert fetched rows into a page envelope, truncating the look-ahead row.
pub(crate) fn collect_page<R, E>(
    rows: Vec<R>,
    page: &PageRequest,
) -> Result<Page<E>, RepositoryError>
where
    E: TryFrom<R, Error = RepositoryError>,
{
    let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
    let has_more = rows.len() > limit;
    let items = rows
        .into_iter()
        .take(limit)
        .map(E::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Page::from_items(items, page, has_more))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use pagination::Cursor;

    struct Raw(u8);

    impl TryFrom<Raw> for u8 {
        type Error = RepositoryError;

        fn try_from(raw: Raw) -> Result<Self, Self::Error> {
            Ok(raw.0)
        }
    }

    #[test]
    fn look_ahead_row_is_truncated_and_signals_more() {
        let page = PageRequest::new(None, Some(2));
        let collected: Page<u8> =
            collect_page(vec![Raw(1), Raw(2), Raw(3)], &page).expect("rows convert");
        assert_eq!(collected.items, vec![1, 2]);
        let token = collected.next_cursor.expect("more pages remain");
        assert_eq!(Cursor::decode(&token).expect("decode").offset(), 2);
    }

    #[test]
    fn short_fetch_is_the_final_page() {
        let page = PageRequest::new(None, Some(2));
        let collected: Page<u8> = collect_page(vec![Raw(1)], &page).expect("rows convert");
        assert_eq!(collected.items, vec![1]);
        assert!(collected.next_cursor.is_none());
    }

    #[test]
    fn limits_convert_to_sql_bounds() {
        let page = PageRequest::new(None, Some(20));
        assert_eq!(sql_offset(&page), 0);
        assert_eq!(sql_limit(&page), 21);
    }
}
