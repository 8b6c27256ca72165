mod book;

pub use self::book::{BookRecord, OrphanedBook};
pub(crate) use self::book::{BookRow, OrphanedBookRow};
