use derive_more::Display;

/// Totals of one run.
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq)]
#[display(
    "Authors fixed: {authors_fixed}\nSeries fixed: {series_fixed}\nBooks cleaned from DB: {books_deleted}\nErrors encountered: {errors}"
)]
pub struct Summary {
    pub authors_fixed: u64,
    /// Number of series writes; a book in two series can count twice.
    pub series_fixed: u64,
    pub books_deleted: u64,
    /// Books that could not be read or parsed.
    pub errors: u64,
}
impl Summary {
    /// `true` when the run had nothing to report.
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_clean() {
        assert!(Summary::default().is_clean());
        assert!(!Summary { errors: 1, ..Summary::default() }.is_clean());
        assert!(!Summary { books_deleted: 3, ..Summary::default() }.is_clean());
    }

    #[test]
    fn test_display() {
        let summary = Summary { authors_fixed: 2, series_fixed: 3, books_deleted: 1, errors: 0 };
        assert_eq!(
            summary.to_string(),
            "Authors fixed: 2\nSeries fixed: 3\nBooks cleaned from DB: 1\nErrors encountered: 0"
        );
    }
}
