//! Short link entity representing a committed code to URL mapping.

use chrono::{DateTime, Utc};

/// A committed short link.
///
/// Records are created exactly once by a successful insert and are never
/// updated or deleted afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    /// Store-assigned key, increasing in commit order.
    pub id: i64,
    pub code: String,
    pub target_url: String,
    pub created_at: DateTime<Utc>,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(id: i64, code: String, target_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            code,
            target_url,
            created_at,
        }
    }
}

/// Input data for a single insert attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub code: String,
    pub target_url: String,
}

impl NewShortLink {
    pub fn new(code: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            target_url: target_url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_link_creation() {
        let now = Utc::now();
        let link = ShortLink::new(
            1,
            "aB3xY9".to_string(),
            "https://example.com".to_string(),
            now,
        );

        assert_eq!(link.id, 1);
        assert_eq!(link.code, "aB3xY9");
        assert_eq!(link.target_url, "https://example.com");
        assert_eq!(link.created_at, now);
    }

    #[test]
    fn test_new_short_link_creation() {
        let new_link = NewShortLink::new("Zz0099", "https://rust-lang.org");

        assert_eq!(new_link.code, "Zz0099");
        assert_eq!(new_link.target_url, "https://rust-lang.org");
    }
}
