// Pagination math shared by the client and the presentation layer

/// Total pages for a match count, rounding up
///
/// Zero matches still yields one (empty) page so callers never divide by
/// or link to a zero-page listing. Saturating so a registry reporting an
/// absurd total can't overflow us into a panic.
pub fn total_pages(total_count: u64, per_page: u32) -> u64 {
    let per_page = u64::from(per_page.max(1));
    total_count.max(1).saturating_add(per_page - 1) / per_page
}

/// Clamp a raw page number to the valid range
///
/// Anything below 1 becomes 1. The client calls this itself rather than
/// trusting callers to have sanitized their input.
pub fn clamp_page(page: i64) -> u64 {
    page.max(1) as u64
}

/// Parse a page number out of user-facing input
///
/// Non-numeric, empty, zero, or negative input all fall back to page 1,
/// mirroring how the search form treats a mangled `?page=` parameter.
pub fn parse_page(raw: &str) -> u64 {
    raw.trim()
        .parse::<i64>()
        .map(clamp_page)
        .unwrap_or(1)
}
