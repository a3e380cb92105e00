//! Splitting long listings into pages and rendering the page links.

use maud::{Markup, html};

use crate::html::LINK_STYLE;

/// How listings are split into pages.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationConfig {
    /// The number of items shown on each page.
    pub page_size: u64,
    /// The most page numbers to show at once in the page links.
    pub max_pages: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            max_pages: 5,
        }
    }
}

/// One entry in the row of page links.
#[derive(Debug, PartialEq, Eq)]
pub enum PaginationIndicator {
    Page(u64),
    CurrPage(u64),
    Ellipsis,
    NextButton(u64),
    BackButton(u64),
}

/// One page of a listing.
#[derive(Debug, PartialEq)]
pub struct PageOf<'a, T> {
    pub items: &'a [T],
    /// The 1-based page number, clamped to the pages that exist.
    pub page: u64,
    /// The number of pages, at least 1.
    pub page_count: u64,
}

/// Take page `page` (1-based) of `items`, `page_size` items at a time.
///
/// Pages past the end give the last page and page 0 gives the first.
pub fn paginate<T>(items: &[T], page: u64, page_size: u64) -> PageOf<'_, T> {
    let page_size = page_size.max(1);
    let page_count = (items.len() as u64).div_ceil(page_size).max(1);
    let page = page.clamp(1, page_count);

    let start = ((page - 1) * page_size) as usize;
    let end = (start + page_size as usize).min(items.len());

    PageOf {
        items: items.get(start..end).unwrap_or_default(),
        page,
        page_count,
    }
}

/// The page links for `curr_page` out of `page_count` pages, showing at most
/// `max_pages` page numbers around the current page plus the first and last.
pub fn create_pagination_indicators(
    curr_page: u64,
    page_count: u64,
    max_pages: u64,
) -> Vec<PaginationIndicator> {
    let max_pages = max_pages.max(1);
    let (first, last) = if page_count <= max_pages {
        (1, page_count)
    } else {
        let first = curr_page
            .saturating_sub(max_pages / 2)
            .clamp(1, page_count - max_pages + 1);
        (first, first + max_pages - 1)
    };

    let mut indicators = Vec::new();

    if curr_page > 1 {
        indicators.push(PaginationIndicator::BackButton(curr_page - 1));
    }

    if first > 1 {
        indicators.push(PaginationIndicator::Page(1));
        if first > 2 {
            indicators.push(PaginationIndicator::Ellipsis);
        }
    }

    indicators.extend((first..=last).map(|page| {
        if page == curr_page {
            PaginationIndicator::CurrPage(page)
        } else {
            PaginationIndicator::Page(page)
        }
    }));

    if last < page_count {
        if last + 1 < page_count {
            indicators.push(PaginationIndicator::Ellipsis);
        }
        indicators.push(PaginationIndicator::Page(page_count));
    }

    if curr_page < page_count {
        indicators.push(PaginationIndicator::NextButton(curr_page + 1));
    }

    indicators
}

/// Render the page links. `page_url` gives the link for a page number.
pub fn pagination_view(
    indicators: &[PaginationIndicator],
    page_url: impl Fn(u64) -> String,
) -> Markup {
    html! {
        nav aria-label="Pagination" class="flex justify-center"
        {
            ul class="inline-flex items-center gap-3 text-sm"
            {
                @for indicator in indicators {
                    li
                    {
                        @match indicator {
                            PaginationIndicator::Page(page) => {
                                a href=(page_url(*page)) class=(LINK_STYLE) { (page) }
                            }
                            PaginationIndicator::CurrPage(page) => {
                                span aria-current="page" class="font-bold" { (page) }
                            }
                            PaginationIndicator::Ellipsis => {
                                span class="text-gray-500" { "…" }
                            }
                            PaginationIndicator::BackButton(page) => {
                                a href=(page_url(*page)) class=(LINK_STYLE) rel="prev" { "Previous" }
                            }
                            PaginationIndicator::NextButton(page) => {
                                a href=(page_url(*page)) class=(LINK_STYLE) rel="next" { "Next" }
                            }
                        }
                    }
                }
            }
        }
    }
}
