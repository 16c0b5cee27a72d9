//! # Pagination
//!
//! The request cursor sent to paged endpoints and the page envelope they
//! return. A page is immutable per fetch and replaced wholesale on the next
//! one; there is no incremental merge.

use serde::{Deserialize, Serialize};

/// Paging options sent with a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Zero-based page number.
    pub page: u32,
    /// Items per page.
    pub size: u32,
    /// Sort criteria, e.g. `"price,asc"`.
    #[serde(default)]
    pub sort: Vec<String>,
}

impl Pagination {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            sort: Vec::new(),
        }
    }

    /// Append a sort criterion.
    pub fn sorted_by(mut self, criterion: impl Into<String>) -> Self {
        self.sort.push(criterion.into());
        self
    }

    /// Query parameters: `page`, `size`, then one `sort` per criterion.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.size.to_string()),
        ];
        params.extend(self.sort.iter().map(|s| ("sort".to_string(), s.clone())));
        params
    }
}

impl Default for Pagination {
    /// First page of twenty, unsorted.
    fn default() -> Self {
        Self::new(0, 20)
    }
}

/// Sorting metadata returned with a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortInfo {
    #[serde(default)]
    pub empty: bool,
    #[serde(default)]
    pub sorted: bool,
    #[serde(default)]
    pub unsorted: bool,
}

/// Paging metadata echoed back by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pageable {
    #[serde(default)]
    pub page_number: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub sort: SortInfo,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub paged: bool,
    #[serde(default)]
    pub unpaged: bool,
}

/// A page of results.
///
/// Fields use `#[serde(default)]` so a server omitting metadata still
/// deserializes; only `content` is essential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub pageable: Pageable,
    #[serde(default)]
    pub last: bool,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub sort: SortInfo,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub number_of_elements: u32,
    #[serde(default)]
    pub empty: bool,
}

impl<T> Page<T> {
    /// A single page holding every item.
    pub fn of(content: Vec<T>) -> Self {
        let len = content.len();
        Self {
            pageable: Pageable {
                page_size: len as u32,
                paged: true,
                ..Pageable::default()
            },
            last: true,
            total_elements: len as u64,
            total_pages: u32::from(len > 0),
            sort: SortInfo::default(),
            number: 0,
            size: len as u32,
            first: true,
            number_of_elements: len as u32,
            empty: len == 0,
            content,
        }
    }

    /// `number * size <= total_elements` whenever the page is not empty.
    pub fn is_consistent(&self) -> bool {
        self.content.is_empty()
            || u64::from(self.number) * u64::from(self.size) <= self.total_elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_lists_page_size_then_each_sort() {
        let p = Pagination::new(2, 10).sorted_by("price,asc").sorted_by("location,desc");
        assert_eq!(
            p.to_query(),
            vec![
                ("page".to_string(), "2".to_string()),
                ("size".to_string(), "10".to_string()),
                ("sort".to_string(), "price,asc".to_string()),
                ("sort".to_string(), "location,desc".to_string()),
            ]
        );
    }

    #[test]
    fn page_deserializes_spring_envelope() {
        let json = serde_json::json!({
            "content": [1, 2, 3],
            "pageable": {"pageNumber": 0, "pageSize": 20, "sort": {"empty": true, "sorted": false, "unsorted": true}, "offset": 0, "paged": true, "unpaged": false},
            "last": true,
            "totalElements": 3,
            "totalPages": 1,
            "number": 0,
            "size": 20,
            "first": true,
            "numberOfElements": 3,
            "empty": false
        });
        let page: Page<u32> = serde_json::from_value(json).unwrap();
        assert_eq!(page.content, vec![1, 2, 3]);
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.pageable.page_size, 20);
        assert!(page.pageable.sort.unsorted);
        assert!(page.is_consistent());
    }

    #[test]
    fn inconsistent_page_detected() {
        let mut page = Page::of(vec!["a"]);
        page.number = 5;
        page.size = 20;
        assert!(!page.is_consistent());
    }

    #[test]
    fn empty_page_of_nothing() {
        let page: Page<u8> = Page::of(Vec::new());
        assert!(page.empty);
        assert_eq!(page.total_pages, 0);
        assert!(page.is_consistent());
    }
}
