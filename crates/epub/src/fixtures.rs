//! In-memory ePub archives for tests.
//!
//! Everything in here panics instead of returning errors: a fixture that
//! cannot be built is a broken test, not a runtime condition.

use crate::CONTAINER_PATH;
use crate::models::{Creator, Meta};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const OPF_PATH: &str = "OEBPS/content.opf";

/// Build a zip archive from raw `(name, contents)` entries.
pub fn archive<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents) in entries {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        writer.start_file(name, options).expect("start zip entry");
        writer.write_all(contents.as_bytes()).expect("write zip entry");
    }
    writer.finish().expect("finish zip archive").into_inner()
}

/// Builder for a minimal, valid ePub archive.
///
/// ```
/// use pbfix_epub::{fixtures::EpubBuilder, read_package};
///
/// let epub = EpubBuilder::new()
///     .creator("c1", "", "Jane Doe")
///     .meta("m1", "#c1", "file-as", "Doe, Jane")
///     .build();
/// let package = read_package(epub).unwrap();
/// assert_eq!(package.metas[0].data, "Doe, Jane");
/// ```
#[derive(Debug, Clone, Default)]
pub struct EpubBuilder {
    creators: Vec<Creator>,
    metas: Vec<Meta>,
}
impl EpubBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn creator(mut self, id: &str, file_as: &str, name: &str) -> Self {
        self.creators.push(Creator::new(id, file_as, name));
        self
    }

    pub fn meta(mut self, id: &str, refines: &str, property: &str, data: &str) -> Self {
        self.metas.push(Meta::new(id, refines, property, data));
        self
    }

    /// A `belongs-to-collection` meta plus its series refinements.
    pub fn series(self, id: &str, title: &str, position: &str) -> Self {
        let refines = format!("#{id}");
        self.meta(id, "", "belongs-to-collection", title)
            .meta("", &refines, "collection-type", "series")
            .meta("", &refines, "group-position", position)
    }

    /// Render the package document.
    pub fn opf(&self) -> String {
        let mut opf = String::from(concat!(
            r#"<?xml version="1.0" encoding="UTF-8"?>"#,
            "\n",
            r#"<package xmlns="http://www.idpf.org/2007/opf" version="3.0">"#,
            "\n",
            r#"<metadata xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:opf="http://www.idpf.org/2007/opf">"#,
            "\n",
        ));
        for creator in &self.creators {
            opf.push_str("<dc:creator");
            push_attribute(&mut opf, "id", &creator.id);
            push_attribute(&mut opf, "opf:file-as", &creator.file_as);
            opf.push_str(&format!(">{}</dc:creator>\n", escape(&creator.name)));
        }
        for meta in &self.metas {
            opf.push_str("<meta");
            push_attribute(&mut opf, "id", &meta.id);
            push_attribute(&mut opf, "refines", &meta.refines);
            push_attribute(&mut opf, "property", &meta.property);
            opf.push_str(&format!(">{}</meta>\n", escape(&meta.data)));
        }
        opf.push_str("</metadata>\n<manifest/>\n<spine/>\n</package>\n");
        opf
    }

    /// Build the complete archive.
    pub fn build(&self) -> Vec<u8> {
        let container = format!(
            concat!(
                r#"<?xml version="1.0"?>"#,
                r#"<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">"#,
                r#"<rootfiles><rootfile full-path="{}" media-type="application/oebps-package+xml"/></rootfiles>"#,
                r#"</container>"#,
            ),
            OPF_PATH
        );
        let opf = self.opf();
        archive([("mimetype", "application/epub+zip"), (CONTAINER_PATH, container.as_str()), (OPF_PATH, opf.as_str())])
    }
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    if !value.is_empty() {
        out.push_str(&format!(r#" {name}="{}""#, escape(value)));
    }
}

fn escape(value: &str) -> String {
    value.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}
