//! ePub package document (OPF) metadata reader.
//!
//! Only the part of an ePub the library fixer cares about is read: the OCF
//! container points at the package document, and the package document's
//! `<metadata>` element yields the creators and `<meta>` assertions in
//! document order. Nothing is validated beyond what is needed to get there.

pub mod error;
#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
pub mod models;
mod reader;

use tracing::instrument;

use crate::error::Result;
use crate::models::Package;
pub use crate::reader::{CONTAINER_PATH, Reader};

/// Easy, top-level entrypoint for reading the [`Package`] metadata from the
/// raw bytes of an ePub archive.
#[instrument(skip(epub), fields(epub_size = epub.as_ref().len()))]
pub fn read_package(epub: impl AsRef<[u8]>) -> Result<Package> {
    Reader::from_bytes(epub.as_ref())?.package()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::fixtures::{EpubBuilder, archive};
    use crate::models::{Creator, Meta};

    #[test]
    fn test_read_package() {
        let epub = EpubBuilder::new()
            .creator("c1", "", "Jane Doe")
            .meta("c1", "", "x", "y")
            .meta("m1", "#c1", "file-as", "Doe, Jane")
            .build();
        let package = read_package(&epub).unwrap();
        assert_eq!(package.creators, vec![Creator::new("c1", "", "Jane Doe")]);
        assert_eq!(
            package.metas,
            vec![Meta::new("c1", "", "x", "y"), Meta::new("m1", "#c1", "file-as", "Doe, Jane")]
        );
    }

    #[test]
    fn test_rootfile_location_is_honoured() {
        let container = r#"<container><rootfiles><rootfile full-path="book.opf"/></rootfiles></container>"#;
        let opf = r#"<package><metadata><meta property="dcterms:modified">2020-01-01</meta></metadata></package>"#;
        let epub = archive([(CONTAINER_PATH, container), ("book.opf", opf)]);
        let package = read_package(epub).unwrap();
        assert_eq!(package.metas[0].property, "dcterms:modified");
    }

    #[test]
    fn test_not_an_archive() {
        let err = read_package(b"<html>definitely not a zip</html>").unwrap_err();
        assert_eq!(*err, ErrorKind::Archive);
    }

    #[test]
    fn test_missing_container() {
        let epub = archive([("mimetype", "application/epub+zip")]);
        let err = read_package(epub).unwrap_err();
        assert_eq!(*err, ErrorKind::MissingEntry(CONTAINER_PATH.to_string()));
    }

    #[test]
    fn test_missing_rootfile() {
        let epub = archive([(CONTAINER_PATH, "<container><rootfiles/></container>")]);
        let err = read_package(epub).unwrap_err();
        assert_eq!(*err, ErrorKind::MissingElement("rootfile"));
    }

    #[test]
    fn test_missing_package_document() {
        let container = r#"<container><rootfiles><rootfile full-path="OEBPS/content.opf"/></rootfiles></container>"#;
        let epub = archive([(CONTAINER_PATH, container)]);
        let err = read_package(epub).unwrap_err();
        assert_eq!(*err, ErrorKind::MissingEntry("OEBPS/content.opf".to_string()));
    }
}
