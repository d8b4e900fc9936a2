use bytes::Bytes;
use std::str::FromStr;

use crate::error::AppError;

/// One file submitted in a batch. Held in memory for the duration of a single
/// orchestration run, never persisted.
#[derive(Debug, Clone)]
pub struct BatchFile {
    pub name: String,
    pub data: Bytes,
}

impl BatchFile {
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// Sort directive applied to the batch before upload, so viewer URL order
/// matches the requested order of the input filenames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Preserve submission order.
    #[default]
    None,
    /// Lexicographically increasing filenames.
    Ascending,
    /// Lexicographically decreasing filenames.
    Descending,
}

impl FromStr for SortOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(SortOrder::None),
            "asc" => Ok(SortOrder::Ascending),
            "desc" => Ok(SortOrder::Descending),
            other => Err(AppError::InvalidInput(format!(
                "Invalid sort parameter '{}'. Must be 'none', 'asc', or 'desc'",
                other
            ))),
        }
    }
}

impl SortOrder {
    /// Reorder the batch in place. Stable, so equal names keep submission order.
    pub fn apply(&self, files: &mut [BatchFile]) {
        match self {
            SortOrder::None => {}
            SortOrder::Ascending => files.sort_by(|a, b| a.name.cmp(&b.name)),
            SortOrder::Descending => files.sort_by(|a, b| b.name.cmp(&a.name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(names: &[&str]) -> Vec<BatchFile> {
        names
            .iter()
            .map(|n| BatchFile::new(*n, Bytes::from_static(b"x")))
            .collect()
    }

    fn names(files: &[BatchFile]) -> Vec<&str> {
        files.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn parses_known_directives() {
        assert_eq!("none".parse::<SortOrder>().unwrap(), SortOrder::None);
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Ascending);
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Descending);
    }

    #[test]
    fn rejects_unknown_directive() {
        let err = "bogus".parse::<SortOrder>().unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn ascending_sorts_lexicographically() {
        let mut files = batch(&["c.jpg", "a.jpg", "b.jpg"]);
        SortOrder::Ascending.apply(&mut files);
        assert_eq!(names(&files), vec!["a.jpg", "b.jpg", "c.jpg"]);
    }

    #[test]
    fn descending_reverses() {
        let mut files = batch(&["c.jpg", "a.jpg", "b.jpg"]);
        SortOrder::Descending.apply(&mut files);
        assert_eq!(names(&files), vec!["c.jpg", "b.jpg", "a.jpg"]);
    }

    #[test]
    fn none_preserves_submission_order() {
        let mut files = batch(&["c.jpg", "a.jpg", "b.jpg"]);
        SortOrder::None.apply(&mut files);
        assert_eq!(names(&files), vec!["c.jpg", "a.jpg", "b.jpg"]);
    }
}
