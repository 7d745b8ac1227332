//! Item table pagination.
//!
//! Rows are accumulated by measured height against page capacities that
//! were calibrated on the fixed A4 layout: the first page shares its height
//! with the details block, later pages start right below the running header.
//! After the last row, the remaining room on the last content page decides
//! whether the recap blocks need a page of their own.

use std::ops::Range;

use crate::error::Error;

/// Item height the first content page holds before breaking.
pub const FIRST_PAGE_CAPACITY: f32 = 410.0;
/// Item height any later content page holds before breaking.
pub const NEXT_PAGE_CAPACITY: f32 = 550.0;
/// Room for items plus recap blocks when the table fits on the first page.
pub const SINGLE_PAGE_RECAP_BUDGET: f32 = 440.0;
/// Room for items plus recap blocks on a later last content page.
pub const LAST_PAGE_RECAP_BUDGET: f32 = 640.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Pagination {
    /// Item indices per content page; every page also repeats the header row.
    pub pages: Vec<Range<usize>>,
    /// Accumulated item height on the last content page.
    pub last_page_height: f32,
    /// The recap blocks do not fit below the table and get an extra page.
    pub trailing_page: bool,
}

impl Pagination {
    pub fn content_pages(&self) -> usize {
        self.pages.len()
    }

    pub fn total_pages(&self) -> usize {
        self.pages.len() + usize::from(self.trailing_page)
    }
}

/// Split `items` into content pages.
///
/// `row_height` measures one item row. `minimum_height` is the vertical room
/// the recap blocks need on the last content page. Every comparison is
/// strict: a page filled exactly to its capacity does not break. A row that
/// alone exceeds the first page's capacity still moves on, leaving the first
/// table with only its header row.
pub fn paginate<T, F>(
    items: &[T],
    minimum_height: f32,
    mut row_height: F,
) -> Result<Pagination, Error>
where
    F: FnMut(&T) -> Result<f32, Error>,
{
    let mut pages: Vec<Range<usize>> = vec![0..0];
    let mut height_sum: f32 = 0.0;

    for (i, item) in items.iter().enumerate() {
        let h = row_height(item)?;
        if !h.is_finite() || h < 0.0 {
            return Err(Error::Layout(format!("item {i} measured at {h}pt")));
        }
        height_sum += h;

        let capacity = if pages.len() == 1 {
            FIRST_PAGE_CAPACITY
        } else {
            NEXT_PAGE_CAPACITY
        };
        if height_sum > capacity {
            log::debug!(
                "paginate: page {} closed before item {} ({:.1}pt > {:.1}pt)",
                pages.len(),
                i,
                height_sum,
                capacity
            );
            pages.push(i..i);
            height_sum = h;
        }
        if let Some(page) = pages.last_mut() {
            page.end = i + 1;
        }
    }

    let budget = if pages.len() == 1 {
        SINGLE_PAGE_RECAP_BUDGET
    } else {
        LAST_PAGE_RECAP_BUDGET
    };
    let trailing_page = height_sum > budget - minimum_height;
    log::debug!(
        "paginate: {} items on {} content pages, last page {:.1}pt, recap needs {:.1}pt, \
         trailing page: {}",
        items.len(),
        pages.len(),
        height_sum,
        minimum_height,
        trailing_page
    );

    Ok(Pagination {
        pages,
        last_page_height: height_sum,
        trailing_page,
    })
}
