//! Package metadata as found in the OPF `<metadata>` element.

/// A `dc:creator` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Creator {
    /// The element's `id` attribute; empty when absent.
    pub id: String,
    /// The EPUB2-style `opf:file-as` attribute; empty when absent.
    pub file_as: String,
    /// Display name (element text).
    pub name: String,
}
impl Creator {
    pub fn new(id: impl Into<String>, file_as: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            file_as: file_as.into(),
            name: name.into(),
        }
    }
}

/// A `<meta>` element: one metadata assertion.
///
/// An assertion with a non-empty [`refines`](Self::refines) attaches its
/// property to the element whose `id` it references (`#id`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Meta {
    /// The element's `id` attribute; empty when absent.
    pub id: String,
    /// Reference to the refined element (`#id`); empty when absent.
    pub refines: String,
    /// The `property` attribute, e.g. `file-as` or `belongs-to-collection`.
    /// Empty for EPUB2 `name`/`content` metas.
    pub property: String,
    /// Element text, verbatim (not trimmed).
    pub data: String,
}
impl Meta {
    pub fn new(
        id: impl Into<String>,
        refines: impl Into<String>,
        property: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            refines: refines.into(),
            property: property.into(),
            data: data.into(),
        }
    }
}

/// The metadata of one ePub package, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Package {
    pub creators: Vec<Creator>,
    pub metas: Vec<Meta>,
}
impl Package {
    /// The first `dc:creator`, the only one whose file-as is ever considered.
    pub fn first_creator(&self) -> Option<&Creator> {
        self.creators.first()
    }
}
