//! Copyright year stamp, written once at startup.

use crate::host::PageElement;

#[cfg(test)]
#[path = "year_test.rs"]
mod year_test;

/// Four-digit rendering of a calendar year.
#[must_use]
pub fn format_year(year: u32) -> String {
    format!("{year:04}")
}

/// Write `year` into `target`. Returns whether anything was written.
#[must_use]
pub fn stamp_year<E: PageElement>(target: Option<&E>, year: u32) -> bool {
    let Some(target) = target else {
        return false;
    };
    target.set_text(&format_year(year));
    true
}
