//! Locating and parsing the package document inside an ePub archive.

use crate::error::{ErrorKind, Result};
use crate::models::{Creator, Meta, Package};
use exn::{OptionExt, ResultExt};
use roxmltree::{Document, Node, ParsingOptions};
use std::io::{Cursor, Read, Seek};
use tracing::instrument;
use zip::ZipArchive;
use zip::result::ZipError;

/// Fixed location of the OCF container document.
pub const CONTAINER_PATH: &str = "META-INF/container.xml";

#[derive(Debug)]
pub struct Reader<R> {
    archive: ZipArchive<R>,
}
impl<'a> Reader<Cursor<&'a [u8]>> {
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self> {
        Self::new(Cursor::new(bytes))
    }
}
impl<R: Read + Seek> Reader<R> {
    pub fn new(inner: R) -> Result<Self> {
        let archive = ZipArchive::new(inner).or_raise(|| ErrorKind::Archive)?;
        Ok(Self { archive })
    }

    /// Path of the package document, taken from the first `rootfile` of
    /// the container document.
    pub fn rootfile(&mut self) -> Result<String> {
        let container = self.entry(CONTAINER_PATH)?;
        let document = parse_xml(&container, CONTAINER_PATH)?;
        document
            .descendants()
            .filter(|node| node.is_element() && node.tag_name().name() == "rootfile")
            .find_map(|node| node.attribute("full-path"))
            .filter(|path| !path.is_empty())
            .map(str::to_string)
            .ok_or_raise(|| ErrorKind::MissingElement("rootfile"))
    }

    /// Read and parse the package document's metadata.
    #[instrument(skip(self))]
    pub fn package(&mut self) -> Result<Package> {
        let rootfile = self.rootfile()?;
        let opf = self.entry(&rootfile)?;
        parse_package(&opf, &rootfile)
    }

    fn entry(&mut self, name: &str) -> Result<String> {
        let mut file = match self.archive.by_name(name) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => exn::bail!(ErrorKind::MissingEntry(name.to_string())),
            Err(err) => return Err(err).or_raise(|| ErrorKind::Archive),
        };
        let mut contents = String::new();
        file.read_to_string(&mut contents).or_raise(|| ErrorKind::Archive)?;
        Ok(contents)
    }
}

fn parse_xml<'input>(text: &'input str, name: &str) -> Result<Document<'input>> {
    let options = ParsingOptions {
        // Plenty of older packages still carry a DOCTYPE.
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(text, options).or_raise(|| ErrorKind::MalformedXml(name.to_string()))
}

/// Extract creators and metas from the `<metadata>` element of a package
/// document. Only direct children of `<metadata>` are considered.
pub(crate) fn parse_package(opf: &str, name: &str) -> Result<Package> {
    let document = parse_xml(opf, name)?;
    let metadata = document
        .root_element()
        .children()
        .find(|node| node.is_element() && node.tag_name().name() == "metadata")
        .ok_or_raise(|| ErrorKind::MissingElement("metadata"))?;
    let mut package = Package::default();
    for node in metadata.children().filter(Node::is_element) {
        match node.tag_name().name() {
            "creator" => package.creators.push(Creator {
                id: attribute(&node, "id"),
                file_as: node
                    .attributes()
                    .find(|attr| attr.name() == "file-as")
                    .map(|attr| attr.value().to_string())
                    .unwrap_or_default(),
                name: text(&node),
            }),
            "meta" => package.metas.push(Meta {
                id: attribute(&node, "id"),
                refines: attribute(&node, "refines"),
                property: attribute(&node, "property"),
                data: text(&node),
            }),
            _ => {},
        }
    }
    Ok(package)
}

fn attribute(node: &Node<'_, '_>, name: &str) -> String {
    node.attribute(name).unwrap_or_default().to_string()
}

fn text(node: &Node<'_, '_>) -> String {
    node.children().filter(Node::is_text).filter_map(|child| child.text()).collect()
}
