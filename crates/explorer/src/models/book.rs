use std::path::PathBuf;

/// A book with a backing ePub file, as stored in the library database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    pub id: i64,
    /// Device folder the file lives in (`folders.name`).
    pub folder: String,
    pub filename: String,
    /// Sort name of the first author (`books_impl.firstauthor`).
    pub first_author: String,
    pub series: String,
    /// Position within [`series`](Self::series); `0` means "not in a series".
    pub number_in_series: i32,
    pub sort_title: String,
}
impl BookRecord {
    /// Full device path of the book's file.
    pub fn file_path(&self) -> PathBuf {
        PathBuf::from(&self.folder).join(&self.filename)
    }
}

/// A book without any backing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrphanedBook {
    pub id: i64,
    pub title: String,
}

#[derive(sqlx::FromRow)]
pub(crate) struct BookRow {
    folder: String,
    filename: String,
    id: i64,
    first_author: String,
    series: String,
    number_in_series: i32,
    sort_title: String,
}
impl From<BookRow> for BookRecord {
    fn from(row: BookRow) -> Self {
        Self {
            id: row.id,
            folder: row.folder,
            filename: row.filename,
            first_author: row.first_author,
            series: row.series,
            number_in_series: row.number_in_series,
            sort_title: row.sort_title,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct OrphanedBookRow {
    id: i64,
    title: String,
}
impl From<OrphanedBookRow> for OrphanedBook {
    fn from(row: OrphanedBookRow) -> Self {
        Self { id: row.id, title: row.title }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_row_to_model() {
        let row = BookRow {
            folder: "/mnt/ext1/Books".to_string(),
            filename: "Dune.epub".to_string(),
            id: 42,
            first_author: "Herbert, Frank".to_string(),
            series: "Dune Chronicles".to_string(),
            number_in_series: 1,
            sort_title: "Dune".to_string(),
        };
        let model = BookRecord::from(row);
        assert_eq!(model.id, 42);
        assert_eq!(model.file_path(), Path::new("/mnt/ext1/Books/Dune.epub"));
    }

    #[test]
    fn test_file_path_with_trailing_slash() {
        let record = BookRecord {
            id: 1,
            folder: "/mnt/ext1/".to_string(),
            filename: "Emma.epub".to_string(),
            first_author: String::new(),
            series: String::new(),
            number_in_series: 0,
            sort_title: String::new(),
        };
        assert_eq!(record.file_path(), Path::new("/mnt/ext1/Emma.epub"));
    }
}
