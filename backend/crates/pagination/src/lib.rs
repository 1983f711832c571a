//! Opaque cursor and pagination envelope primitives shared by backend
//! endpoints.
//!
//! Cursors encode a resume position as URL-safe base64 so clients can treat
//! them as opaque tokens. Endpoints clamp requested page sizes to a bounded
//! window and return a [`Page`] envelope carrying the items plus the cursor
//! for the next page, if any.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

/// Default page size applied when the client does not request one.
pub const DEFAULT_LIMIT: u32 = 20;

/// Upper bound on the page size a client may request.
pub const MAX_LIMIT: u32 = 100;

/// Failures raised while decoding a client-supplied cursor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    /// The token was not valid URL-safe base64.
    #[error("cursor is not valid base64")]
    Encoding,
    /// The decoded payload did not match the expected cursor shape.
    #[error("cursor payload is malformed")]
    Payload,
}

/// Serialised cursor payload. Kept private so the wire shape stays opaque.
#[derive(Debug, Serialize, Deserialize)]
struct CursorPayload {
    /// Zero-based offset of the first item on the next page.
    o: u64,
}

/// Opaque resume token for paginated endpoints.
///
/// ## Invariants
/// - Round-trips through [`Cursor::encode`] / [`Cursor::decode`] preserve the
///   offset exactly.
///
/// # Examples
/// ```
/// use pagination::Cursor;
///
/// let token = Cursor::new(40).encode();
/// let cursor = Cursor::decode(&token).expect("self-produced tokens decode");
/// assert_eq!(cursor.offset(), 40);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    offset: u64,
}

impl Cursor {
    /// Build a cursor pointing at the given zero-based offset.
    #[must_use]
    pub const fn new(offset: u64) -> Self {
        Self { offset }
    }

    /// Zero-based offset of the first item the cursor resumes at.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Encode the cursor as an opaque URL-safe token.
    #[must_use]
    pub fn encode(&self) -> String {
        let payload = CursorPayload { o: self.offset };
        // Serialising a struct of one integer cannot fail.
        let json = serde_json::to_vec(&payload).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }

    /// Decode a client-supplied token back into a cursor.
    ///
    /// # Errors
    /// Returns [`CursorError`] when the token is not base64 or the decoded
    /// payload does not match the cursor shape.
    pub fn decode(token: &str) -> Result<Self, CursorError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token.as_bytes())
            .map_err(|_| CursorError::Encoding)?;
        let payload: CursorPayload =
            serde_json::from_slice(&bytes).map_err(|_| CursorError::Payload)?;
        Ok(Self { offset: payload.o })
    }
}

/// Validated page request combining a resume cursor with a clamped limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    offset: u64,
    limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Build a request from an optional cursor and an optional raw limit.
    ///
    /// Limits are clamped into `1..=`[`MAX_LIMIT`]; absent limits fall back
    /// to [`DEFAULT_LIMIT`].
    #[must_use]
    pub fn new(cursor: Option<Cursor>, limit: Option<u32>) -> Self {
        let limit = limit
            .unwrap_or(DEFAULT_LIMIT)
            .clamp(1, MAX_LIMIT);
        Self {
            offset: cursor.map_or(0, |c| c.offset()),
            limit,
        }
    }

    /// Zero-based offset of the first requested item.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Clamped page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }
}

/// Pagination envelope returned by list and search endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page, at most the requested limit.
    pub items: Vec<T>,
    /// Opaque token resuming after the last item, absent on the final page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    /// Assemble an envelope from a fetched slice.
    ///
    /// `items` should contain at most `request.limit()` entries; when exactly
    /// full, a cursor resuming after the last entry is attached. Callers that
    /// fetch `limit + 1` rows to detect a following page should truncate
    /// before calling this.
    #[must_use]
    pub fn from_items(items: Vec<T>, request: &PageRequest, has_more: bool) -> Self {
        let consumed = u64::try_from(items.len()).unwrap_or(u64::MAX);
        let next_cursor = has_more
            .then(|| Cursor::new(request.offset().saturating_add(consumed)).encode());
        Self { items, next_cursor }
    }

    /// Map the item type while preserving the cursor.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(40)]
    #[case(u64::MAX)]
    fn cursor_round_trips(#[case] offset: u64) {
        let token = Cursor::new(offset).encode();
        let decoded = Cursor::decode(&token).expect("round trip");
        assert_eq!(decoded.offset(), offset);
    }

    #[rstest]
    #[case("not base64!!", CursorError::Encoding)]
    #[case("aGVsbG8", CursorError::Payload)]
    fn cursor_rejects_garbage(#[case] token: &str, #[case] expected: CursorError) {
        let err = Cursor::decode(token).expect_err("garbage must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case(None, DEFAULT_LIMIT)]
    #[case(Some(0), 1)]
    #[case(Some(50), 50)]
    #[case(Some(10_000), MAX_LIMIT)]
    fn limits_are_clamped(#[case] raw: Option<u32>, #[case] expected: u32) {
        let request = PageRequest::new(None, raw);
        assert_eq!(request.limit(), expected);
    }

    #[rstest]
    fn page_attaches_cursor_when_more_remains() {
        let request = PageRequest::new(Some(Cursor::new(20)), Some(3));
        let page = Page::from_items(vec![1, 2, 3], &request, true);
        let token = page.next_cursor.expect("cursor expected");
        assert_eq!(Cursor::decode(&token).expect("decode").offset(), 23);
    }

    #[rstest]
    fn final_page_has_no_cursor() {
        let request = PageRequest::default();
        let page = Page::from_items(vec![1], &request, false);
        assert!(page.next_cursor.is_none());
    }

    #[rstest]
    fn map_preserves_cursor() {
        let request = PageRequest::new(None, Some(1));
        let page = Page::from_items(vec![7], &request, true).map(|n| n * 2);
        assert_eq!(page.items, vec![14]);
        assert!(page.next_cursor.is_some());
    }
}
