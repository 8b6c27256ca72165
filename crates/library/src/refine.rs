//! Resolution of `refines` chains in package metadata.
//!
//! A `<meta refines="#id" property="...">` element attaches a property to the
//! element carrying `id`. An empty identifier can never be referenced: the
//! bare target `#` matches nothing, whatever the metadata contains.

use pbfix_epub::models::Meta;
use std::collections::HashMap;

/// Every assertion refining `target`, in document order.
///
/// `target` is a full reference (`"#" + id`).
pub fn resolve<'a>(target: &str, metas: &'a [Meta]) -> Vec<&'a Meta> {
    if target == "#" {
        return Vec::new();
    }
    metas.iter().filter(|meta| meta.refines == target).collect()
}

/// Value of the last match carrying `property`.
///
/// Later matches overwrite earlier ones.
pub fn last_value<'a>(matches: &[&'a Meta], property: &str) -> Option<&'a str> {
    matches.iter().fold(None, |value, meta| {
        if meta.property == property { Some(meta.data.as_str()) } else { value }
    })
}

/// Assertions of one package indexed by their `refines` target.
///
/// Built once per book; lookups return the same matches as [`resolve`].
#[derive(Debug, Default)]
pub struct Refinements<'a> {
    by_target: HashMap<&'a str, Vec<&'a Meta>>,
}
impl<'a> Refinements<'a> {
    pub fn new(metas: &'a [Meta]) -> Self {
        let mut by_target: HashMap<&'a str, Vec<&'a Meta>> = HashMap::new();
        for meta in metas.iter().filter(|meta| !meta.refines.is_empty()) {
            by_target.entry(meta.refines.as_str()).or_default().push(meta);
        }
        Self { by_target }
    }

    /// Assertions refining the element with the raw identifier `id` (no `#`).
    pub fn of(&self, id: &str) -> &[&'a Meta] {
        if id.is_empty() {
            return &[];
        }
        self.by_target
            .get(format!("#{id}").as_str())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
