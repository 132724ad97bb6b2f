use serde::{Deserialize, Serialize};

/// Sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn from_descending(descending: bool) -> Self {
        if descending {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        }
    }

    pub fn is_descending(self) -> bool {
        matches!(self, SortOrder::Descending)
    }

    /// SQL keyword for this direction
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

/// Pagination options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
}

impl Pagination {
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }

    /// Zero-based page of `per_page` items
    pub fn page(page: usize, per_page: usize) -> Self {
        Self {
            offset: page.saturating_mul(per_page),
            limit: per_page,
        }
    }

    /// Skip/take over any ordered sequence without collecting it first
    pub fn window<I: IntoIterator>(&self, items: I) -> std::iter::Take<std::iter::Skip<I::IntoIter>> {
        items.into_iter().skip(self.offset).take(self.limit)
    }

    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        self.window(items).collect()
    }
}
