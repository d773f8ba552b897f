use serde::{Deserialize, Serialize};

/// Offset/limit window over the active entities of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Pagination {
    pub const DEFAULT_OFFSET: u64 = 0;
    pub const DEFAULT_LIMIT: u64 = 10;

    pub fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }

    /// Build a window from raw query-string values.
    ///
    /// Missing, negative or non-numeric values fall back to the defaults,
    /// and so does a zero limit.
    pub fn from_raw(offset: Option<&str>, limit: Option<&str>) -> Self {
        let offset = parse_non_negative(offset).unwrap_or(Self::DEFAULT_OFFSET);
        let limit = parse_non_negative(limit)
            .filter(|l| *l > 0)
            .unwrap_or(Self::DEFAULT_LIMIT);

        Self { offset, limit }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(Self::DEFAULT_OFFSET, Self::DEFAULT_LIMIT)
    }
}

fn parse_non_negative(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .and_then(|n| u64::try_from(n).ok())
}

/// One page of results plus the total number of active entities.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_use_defaults() {
        assert_eq!(Pagination::from_raw(None, None), Pagination::new(0, 10));
    }

    #[test]
    fn numeric_values_are_kept() {
        assert_eq!(
            Pagination::from_raw(Some("20"), Some("5")),
            Pagination::new(20, 5)
        );
    }

    #[test]
    fn negative_and_garbage_values_are_coerced() {
        assert_eq!(
            Pagination::from_raw(Some("-3"), Some("abc")),
            Pagination::new(0, 10)
        );
        assert_eq!(
            Pagination::from_raw(Some("x"), Some("-1")),
            Pagination::new(0, 10)
        );
    }

    #[test]
    fn zero_limit_falls_back_to_default() {
        assert_eq!(Pagination::from_raw(Some("4"), Some("0")), Pagination::new(4, 10));
    }
}
