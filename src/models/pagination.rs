// src/models/pagination.rs

use serde::{Deserialize, Serialize};

/// `meta` block of every paginated list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageMeta {
    pub page: u32,
    pub limit: u32,
    #[serde(alias = "totalItems")]
    pub total: u32,
    pub total_pages: u32,
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            total: 0,
            total_pages: 0,
        }
    }
}

impl PageMeta {
    pub fn can_go_previous(&self) -> bool {
        self.page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// The page to show for a requested page number: never below 1, never past the last page.
    pub fn clamp(&self, requested: u32) -> u32 {
        requested.clamp(1, self.total_pages.max(1))
    }

    /// Up to `width` page numbers centred on the current page, all within `1..=total_pages`.
    pub fn window(&self, width: u32) -> Vec<u32> {
        let total = self.total_pages;
        if total == 0 || width == 0 {
            return Vec::new();
        }
        let width = width.min(total);
        let current = self.clamp(self.page);
        let half = width / 2;

        let start = if current <= half {
            1
        } else if current + half >= total {
            total + 1 - width
        } else {
            current - half
        };
        (start..start + width).collect()
    }

    /// First and last 1-based item index shown on the current page.
    pub fn showing(&self, shown: usize) -> (u32, u32) {
        if shown == 0 {
            return (0, 0);
        }
        let first = (self.page.saturating_sub(1)) * self.limit + 1;
        let last = (self.page * self.limit).min(self.total);
        (first, last)
    }
}

/// A list page. Order listings name the rows `orders`, some provider listings
/// name the meta `pagination`; both are read into the same shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Paginated<T> {
    #[serde(default, alias = "orders")]
    pub data: Vec<T>,
    #[serde(default, alias = "pagination")]
    pub meta: PageMeta,
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            meta: PageMeta::default(),
        }
    }
}

/// `?page=` as sent by pagination links; anything unparsable means page 1.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    pub fn page(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1)
    }
}

/// Where a list page should send the visitor instead of rendering a page past the end.
pub fn overflow_redirect(meta: &PageMeta, requested: u32) -> Option<u32> {
    (meta.total_pages > 0 && requested > meta.total_pages).then_some(meta.total_pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(page: u32, total_pages: u32) -> PageMeta {
        PageMeta {
            page,
            limit: 10,
            total: total_pages * 10,
            total_pages,
        }
    }

    #[test]
    fn window_never_leaves_valid_range() {
        for total_pages in 0..12 {
            for page in 0..15 {
                let m = meta(page, total_pages);
                let pages = m.window(5);
                assert!(pages.len() as u32 <= total_pages.min(5));
                assert!(pages.iter().all(|p| *p >= 1 && *p <= total_pages));
            }
        }
    }

    #[test]
    fn window_follows_current_page() {
        assert_eq!(meta(1, 10).window(5), vec![1, 2, 3, 4, 5]);
        assert_eq!(meta(6, 10).window(5), vec![4, 5, 6, 7, 8]);
        assert_eq!(meta(10, 10).window(5), vec![6, 7, 8, 9, 10]);
        assert_eq!(meta(2, 3).window(5), vec![1, 2, 3]);
    }

    #[test]
    fn next_is_disabled_on_last_page() {
        assert!(!meta(4, 4).can_go_next());
        assert!(meta(3, 4).can_go_next());
        assert!(!meta(1, 4).can_go_previous());
        assert_eq!(meta(1, 4).clamp(9), 4);
        assert_eq!(meta(1, 0).clamp(0), 1);
    }

    #[test]
    fn overflow_points_at_last_page() {
        assert_eq!(overflow_redirect(&meta(7, 3), 7), Some(3));
        assert_eq!(overflow_redirect(&meta(3, 3), 3), None);
        assert_eq!(overflow_redirect(&meta(5, 0), 5), None);
    }

    #[test]
    fn showing_range_stops_at_total() {
        let m = PageMeta { page: 3, limit: 10, total: 25, total_pages: 3 };
        assert_eq!(m.showing(5), (21, 25));
        assert_eq!(m.showing(0), (0, 0));
    }

    #[test]
    fn page_query_defaults_to_first_page() {
        assert_eq!(PageQuery { page: Some("abc".into()) }.page(), 1);
        assert_eq!(PageQuery { page: Some("0".into()) }.page(), 1);
        assert_eq!(PageQuery { page: Some("4".into()) }.page(), 4);
        assert_eq!(PageQuery::default().page(), 1);
    }

    #[test]
    fn meta_accepts_total_items_alias() {
        let m: PageMeta =
            serde_json::from_str(r#"{"page":2,"limit":5,"totalItems":12,"totalPages":3}"#).unwrap();
        assert_eq!(m.total, 12);
    }

    #[test]
    fn list_body_accepts_alternate_names() {
        let orders: Paginated<u32> =
            serde_json::from_str(r#"{"orders":[1,2],"meta":{"page":1,"limit":2,"total":4,"totalPages":2}}"#)
                .unwrap();
        assert_eq!(orders.data, vec![1, 2]);
        assert_eq!(orders.meta.total_pages, 2);

        let bare: Paginated<u32> = serde_json::from_str(r#"{"data":[]}"#).unwrap();
        assert_eq!(bare.meta, PageMeta::default());
    }

    #[test]
    fn rows_need_no_default() {
        #[derive(Debug, Deserialize)]
        struct Row {
            id: String,
        }

        let list: Paginated<Row> = serde_json::from_str(r#"{"data":[{"id":"m1"}],"pagination":{"page":1,"limit":10,"total":1,"totalPages":1}}"#)
            .unwrap();
        assert_eq!(list.data[0].id, "m1");
        assert_eq!(list.meta.total, 1);

        let empty: Paginated<crate::models::catalog::Meal> = serde_json::from_str("{}").unwrap();
        assert!(empty.data.is_empty());
    }
}
