use crate::{model::api::PaginatedDto, server::util::stats::total_pages};

/// Largest page size a client may request.
pub const MAX_PER_PAGE: u64 = 100;

/// Clamps a requested page size to `1..=MAX_PER_PAGE`.
pub fn clamp_per_page(entries: u64) -> u64 {
    entries.clamp(1, MAX_PER_PAGE)
}

/// One page of domain records. `page` is 0-indexed.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

impl<T> Page<T> {
    pub fn new((items, total): (Vec<T>, u64), page: u64, per_page: u64) -> Self {
        Self {
            items,
            total,
            page,
            per_page,
        }
    }

    /// Converts every item to a DTO and fills in the page count.
    pub fn into_dto<D>(self, convert: impl FnMut(T) -> D) -> PaginatedDto<D> {
        PaginatedDto {
            items: self.items.into_iter().map(convert).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: total_pages(self.total, self.per_page),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_is_clamped() {
        assert_eq!(clamp_per_page(0), 1);
        assert_eq!(clamp_per_page(20), 20);
        assert_eq!(clamp_per_page(10_000), MAX_PER_PAGE);
    }

    #[test]
    fn dto_reports_page_count() {
        let page = Page::new((vec![1, 2], 45), 0, 20);
        let dto = page.into_dto(|n| n * 10);

        assert_eq!(dto.items, vec![10, 20]);
        assert_eq!(dto.total_pages, 3);
    }
}
