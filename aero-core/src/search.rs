use aero_shared::Booking;
use serde::Serialize;
use std::ops::RangeInclusive;

/// One page of a (possibly filtered) listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Page actually served, after clamping
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Case-insensitive substring match against name, origin, destination and
/// email. An empty query keeps everything; order is preserved.
pub fn search(bookings: Vec<Booking>, query: &str) -> Vec<Booking> {
    if query.is_empty() {
        return bookings;
    }
    let needle = query.to_lowercase();
    bookings.into_iter().filter(|b| matches(b, &needle)).collect()
}

fn matches(booking: &Booking, needle: &str) -> bool {
    let haystack = [
        booking.name.as_str(),
        booking.origin.as_str(),
        booking.destination.as_str(),
        booking.email.as_str(),
    ]
    .join(" ")
    .to_lowercase();
    haystack.contains(needle)
}

/// Number of pages for `count` items; never less than one.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// Slice out page `page` (1-based). Out-of-range pages clamp to the nearest
/// valid one.
pub fn paginate<T: Clone>(items: &[T], page_size: usize, page: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(items.len(), page_size);
    let page = page.clamp(1, total_pages);

    let start = ((page - 1) * page_size).min(items.len());
    let end = (start + page_size).min(items.len());

    Page {
        items: items[start..end].to_vec(),
        page,
        total_pages,
        total_items: items.len(),
        page_size,
    }
}

/// Page numbers to offer in pagination controls: at most `max_to_show`,
/// centred on `current` where possible.
pub fn page_window(current: usize, total_pages: usize, max_to_show: usize) -> RangeInclusive<usize> {
    let total_pages = total_pages.max(1);
    let max_to_show = max_to_show.max(1);

    let mut start = current.saturating_sub(2).max(1);
    let end = (start + max_to_show - 1).min(total_pages);
    if end - start < max_to_show - 1 {
        start = end.saturating_sub(max_to_show - 1).max(1);
    }
    start..=end
}
