//! Column helpers for fixed-width console tables.
//!
//! Widths are measured in terminal columns with `unicode-width`, so space
//! names in CJK or with emoji line up with plain ASCII ones.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// Display width of `s` in terminal columns
pub fn display_width(s: &str) -> usize {
  UnicodeWidthStr::width(s)
}

/// Truncate `s` to at most `max_width` columns, ending in `…` when cut.
///
/// ```
/// use atlas_core::text::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Engineering", 20), "Engineering");
/// assert_eq!(truncate_to_width("Engineering", 6), "Engin…");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
  if display_width(s) <= max_width {
    return s.to_string();
  }
  if max_width == 0 {
    return String::new();
  }

  let budget = max_width - 1;
  let mut used = 0;
  let mut out = String::new();
  for c in s.chars() {
    let w = c.width().unwrap_or(0);
    if used + w > budget {
      break;
    }
    used += w;
    out.push(c);
  }
  out.push(ELLIPSIS);
  out
}

/// Truncate or right-pad `s` so it occupies exactly `width` columns.
pub fn fit_column(s: &str, width: usize) -> String {
  let mut out = truncate_to_width(s, width);
  let pad = width.saturating_sub(display_width(&out));
  out.extend(std::iter::repeat_n(' ', pad));
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fit_column_pads_short_text() {
    assert_eq!(fit_column("HR", 5), "HR   ");
    assert_eq!(fit_column("", 3), "   ");
  }

  #[test]
  fn fit_column_truncates_long_text() {
    let fitted = fit_column("Customer Success Playbooks", 10);
    assert_eq!(fitted, "Customer …");
    assert_eq!(display_width(&fitted), 10);
  }

  #[test]
  fn fit_column_exact_width_is_unchanged() {
    assert_eq!(fit_column("12345", 5), "12345");
  }

  #[test]
  fn wide_characters_are_measured_in_columns() {
    assert_eq!(display_width("設計"), 4);

    let fitted = fit_column("設計ドキュメント", 5);
    assert_eq!(fitted, "設計…");
    assert_eq!(display_width(&fitted), 5);

    let padded = fit_column("設計", 6);
    assert_eq!(padded, "設計  ");
  }

  #[test]
  fn zero_width_yields_empty() {
    assert_eq!(truncate_to_width("anything", 0), "");
    assert_eq!(fit_column("anything", 0), "");
  }
}
