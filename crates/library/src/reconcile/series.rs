use crate::refine::Refinements;
use pbfix_epub::models::{Meta, Package};
use pbfix_explorer::models::BookRecord;

const BELONGS_TO_COLLECTION: &str = "belongs-to-collection";
const COLLECTION_TYPE: &str = "collection-type";
const GROUP_POSITION: &str = "group-position";
const SERIES: &str = "series";

/// Corrected series title and position for a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesFix {
    pub series: String,
    pub number_in_series: i32,
}

/// What the refinements of one collection say about it.
#[derive(Debug, Default, Clone, Copy)]
struct Collection {
    is_series: bool,
    position: i32,
}
impl Collection {
    fn fold(matches: &[&Meta]) -> Self {
        matches.iter().fold(Self::default(), |mut collection, meta| {
            match meta.property.as_str() {
                COLLECTION_TYPE if meta.data == SERIES => collection.is_series = true,
                // Malformed positions count as 0, which never qualifies.
                GROUP_POSITION => collection.position = meta.data.parse().unwrap_or_default(),
                _ => {},
            }
            collection
        })
    }
}

/// Decide which series writes a book needs, one per qualifying
/// `belongs-to-collection` assertion, in document order.
///
/// A collection qualifies when it is refined as a `series` with a position
/// of at least 1 and differs from what the record stored when it was read.
pub fn reconcile_series(record: &BookRecord, package: &Package, refinements: &Refinements<'_>) -> Vec<SeriesFix> {
    package
        .metas
        .iter()
        .filter(|meta| meta.property == BELONGS_TO_COLLECTION && !meta.id.is_empty())
        .filter_map(|meta| {
            let collection = Collection::fold(refinements.of(&meta.id));
            if !collection.is_series || collection.position < 1 {
                return None;
            }
            if record.series == meta.data && record.number_in_series == collection.position {
                return None;
            }
            Some(SeriesFix { series: meta.data.clone(), number_in_series: collection.position })
        })
        .collect()
}
