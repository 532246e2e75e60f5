//! Error Kind
//!
//! The four outcomes a GreenMitra request can fail with.

use serde::Serialize;

/// 失敗の分類
///
/// 重複登録・交換不可（ポイント不足を含む）・スキーマ違反はすべて
/// `BadRequest`。内部の詳細はクライアントに返さない。
///
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::from_status(404), Some(ErrorKind::NotFound));
/// assert_eq!(ErrorKind::NotFound.title(), "Not Found");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Validation failure or refused business action
    BadRequest,
    /// Login with unknown email or wrong password
    Unauthorized,
    /// Unknown user or report id
    NotFound,
    /// Storage or hashing failure
    InternalServerError,
}

const TABLE: [(ErrorKind, u16, &str); 4] = [
    (ErrorKind::BadRequest, 400, "Bad Request"),
    (ErrorKind::Unauthorized, 401, "Unauthorized"),
    (ErrorKind::NotFound, 404, "Not Found"),
    (ErrorKind::InternalServerError, 500, "Internal Server Error"),
];

impl ErrorKind {
    const fn row(self) -> (u16, &'static str) {
        let (_, status, title) = TABLE[self as usize];
        (status, title)
    }

    pub const fn status_code(self) -> u16 {
        self.row().0
    }

    /// Reason phrase, used as the problem `title`
    pub const fn title(self) -> &'static str {
        self.row().1
    }

    pub const fn is_server_error(self) -> bool {
        matches!(self, ErrorKind::InternalServerError)
    }

    /// Classify a status received over the wire; any 5xx is a server error
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            500..=599 => Some(ErrorKind::InternalServerError),
            _ => TABLE
                .iter()
                .find(|(_, code, _)| *code == status)
                .map(|(kind, _, _)| *kind),
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}
