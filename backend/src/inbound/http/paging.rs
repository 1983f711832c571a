//! Pagination query parameters shared by listing endpoints.

use pagination::{Cursor, PageRequest};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::Error;

/// Cursor and limit query parameters accepted by list endpoints.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    /// Opaque resume token from a previous page's `nextCursor`.
    pub cursor: Option<String>,
    /// Requested page size, clamped server-side into `1..=100`.
    pub limit: Option<u32>,
}

impl PageQuery {
    /// Decode the cursor and clamp the limit into a validated request.
    ///
    /// # Errors
    /// Returns [`Error::validation`] when the cursor token does not decode.
    pub fn page_request(&self) -> Result<PageRequest, Error> {
        let cursor = self
            .cursor
            .as_deref()
            .map(Cursor::decode)
            .transpose()
            .map_err(|err| Error::validation(format!("invalid cursor: {err}")))?;
        Ok(PageRequest::new(cursor, self.limit))
    }
}

/// Search parameters: the needle plus the usual pagination knobs.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Case-insensitive fragment matched against the entity's search text.
    pub q: String,
    /// Opaque resume token from a previous page's `nextCursor`.
    pub cursor: Option<String>,
    /// Requested page size, clamped server-side into `1..=100`.
    pub limit: Option<u32>,
}

impl SearchQuery {
    /// Decode the cursor and clamp the limit into a validated request.
    ///
    /// # Errors
    /// Returns [`Error::validation`] when the cursor token does not decode.
    pub fn page_request(&self) -> Result<PageRequest, Error> {
        PageQuery {
            cursor: self.cursor.clone(),
            limit: self.limit,
        }
        .page_request()
    }
}

/// Delete mode selector.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
pub struct DeleteParams {
    /// When true, remove the record permanently instead of soft-deleting.
    pub hard: Option<bool>,
}

impl DeleteParams {
    /// Whether a permanent delete was requested.
    #[must_use]
    pub fn is_hard(&self) -> bool {
        self.hard.unwrap_or(false)
    }
}

/// OpenAPI shape of the pagination envelope returned by list endpoints.
///
/// Documentation-only: handlers serialise `pagination::Page<T>` directly.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope {
    /// Items on this page, at most the requested limit.
    #[schema(value_type = Vec<serde_json::Value>)]
    pub items: Vec<serde_json::Value>,
    /// Opaque token resuming after the last item, absent on the final page.
    pub next_cursor: Option<String>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[test]
    fn absent_parameters_fall_back_to_defaults() {
        let request = PageQuery::default().page_request().expect("valid query");
        assert_eq!(request.offset(), 0);
        assert_eq!(request.limit(), pagination::DEFAULT_LIMIT);
    }

    #[test]
    fn cursors_resume_where_they_point() {
        let query = PageQuery {
            cursor: Some(Cursor::new(40).encode()),
            limit: Some(10),
        };
        let request = query.page_request().expect("valid query");
        assert_eq!(request.offset(), 40);
        assert_eq!(request.limit(), 10);
    }

    #[rstest]
    #[case("!!not base64!!")]
    #[case("aGVsbG8")]
    fn garbage_cursors_are_validation_errors(#[case] token: &str) {
        let query = PageQuery {
            cursor: Some(token.to_owned()),
            limit: None,
        };
        let err = query.page_request().expect_err("garbage must fail");
        assert_eq!(err.code(), ErrorCode::ValidationError);
    }

    #[rstest]
    #[case(None, false)]
    #[case(Some(false), false)]
    #[case(Some(true), true)]
    fn hard_flag_defaults_to_soft(#[case] hard: Option<bool>, #[case] expected: bool) {
        assert_eq!(DeleteParams { hard }.is_hard(), expected);
    }
}
