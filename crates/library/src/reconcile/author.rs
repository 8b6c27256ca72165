use crate::refine::{Refinements, last_value};
use pbfix_epub::models::Package;
use pbfix_explorer::models::BookRecord;

const FILE_AS: &str = "file-as";

/// Corrected sort name for a book's first author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorFix {
    pub first_author: String,
    /// First character of [`first_author`](Self::first_author), used by the
    /// library view's alphabetical index.
    pub first_letter: String,
}
impl AuthorFix {
    fn new(first_author: &str) -> Self {
        let first_letter = first_author.chars().next().map(String::from).unwrap_or_default();
        Self { first_author: first_author.to_string(), first_letter }
    }
}

/// Decide whether the stored first author needs the file-as refinement of
/// the package's first creator.
///
/// Only a creator without its own `opf:file-as` attribute is considered, and
/// only a value that differs (byte for byte) from the stored one is returned.
pub fn reconcile_author(record: &BookRecord, package: &Package, refinements: &Refinements<'_>) -> Option<AuthorFix> {
    let creator = package.first_creator()?;
    if !creator.file_as.is_empty() {
        return None;
    }
    let file_as = last_value(refinements.of(&creator.id), FILE_AS)?;
    if file_as == record.first_author {
        return None;
    }
    Some(AuthorFix::new(file_as))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pbfix_epub::models::{Creator, Meta};
    use rstest::rstest;

    fn record(first_author: &str) -> BookRecord {
        BookRecord {
            id: 1,
            folder: "/mnt/ext1".to_string(),
            filename: "book.epub".to_string(),
            first_author: first_author.to_string(),
            series: String::new(),
            number_in_series: 0,
            sort_title: String::new(),
        }
    }

    fn package(creator: Creator, metas: Vec<Meta>) -> Package {
        Package { creators: vec![creator], metas }
    }

    fn reconcile(record: &BookRecord, package: &Package) -> Option<AuthorFix> {
        let refinements = Refinements::new(&package.metas);
        reconcile_author(record, package, &refinements)
    }

    #[test]
    fn test_fills_in_file_as() {
        let package = package(
            Creator::new("c1", "", "Jane Doe"),
            vec![Meta::new("c1", "", "x", "y"), Meta::new("m1", "#c1", "file-as", "Doe, Jane")],
        );
        let fix = reconcile(&record(""), &package).unwrap();
        assert_eq!(fix.first_author, "Doe, Jane");
        assert_eq!(fix.first_letter, "D");
    }

    #[test]
    fn test_idempotent() {
        let package = package(Creator::new("c1", "", "Jane Doe"), vec![Meta::new("", "#c1", "file-as", "Doe, Jane")]);
        let mut record = record("");
        let fix = reconcile(&record, &package).unwrap();
        record.first_author = fix.first_author;
        assert_eq!(reconcile(&record, &package), None);
    }

    #[test]
    fn test_last_file_as_wins() {
        let package = package(
            Creator::new("c1", "", "Jane Doe"),
            vec![Meta::new("", "#c1", "file-as", "Doe, J."), Meta::new("", "#c1", "file-as", "Doe, Jane")],
        );
        assert_eq!(reconcile(&record("Doe, J."), &package).unwrap().first_author, "Doe, Jane");
    }

    #[test]
    fn test_first_letter_is_a_character() {
        let package = package(Creator::new("c1", "", ""), vec![Meta::new("", "#c1", "file-as", "Égalité, Ève")]);
        assert_eq!(reconcile(&record(""), &package).unwrap().first_letter, "É");
    }

    #[test]
    fn test_empty_file_as_refinement() {
        let package = package(Creator::new("c1", "", ""), vec![Meta::new("", "#c1", "file-as", "")]);
        let fix = reconcile(&record("Doe, Jane"), &package).unwrap();
        assert_eq!(fix, AuthorFix { first_author: String::new(), first_letter: String::new() });
    }

    #[rstest]
    // The creator declares its own file-as.
    #[case(Creator::new("c1", "Doe, Jane", "Jane Doe"), "")]
    // No identifier to refine.
    #[case(Creator::new("", "", "Jane Doe"), "")]
    // Refinements target another element.
    #[case(Creator::new("c2", "", "Jane Doe"), "")]
    // Already stored.
    #[case(Creator::new("c1", "", "Jane Doe"), "Doe, Jane")]
    fn test_no_fix(#[case] creator: Creator, #[case] stored: &str) {
        let package = package(
            creator,
            vec![Meta::new("", "#c1", "file-as", "Doe, Jane"), Meta::new("", "#", "file-as", "Nobody")],
        );
        assert_eq!(reconcile(&record(stored), &package), None);
    }

    #[test]
    fn test_only_first_creator() {
        let package = Package {
            creators: vec![Creator::new("c1", "Doe, Jane", "Jane Doe"), Creator::new("c2", "", "Richard Roe")],
            metas: vec![Meta::new("", "#c2", "file-as", "Roe, Richard")],
        };
        assert_eq!(reconcile(&record(""), &package), None);
    }

    #[test]
    fn test_no_creators() {
        let package = Package { creators: vec![], metas: vec![Meta::new("", "#c1", "file-as", "Doe, Jane")] };
        assert_eq!(reconcile(&record(""), &package), None);
    }
}
