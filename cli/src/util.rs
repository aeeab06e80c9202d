// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;

use chrono::NaiveDate;
use kbcal_core::date::{parse_date, parse_time};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

/// Value parser for `YYYY-MM-DD` arguments.
pub fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).ok_or_else(|| format!("Invalid date `{s}`, expected YYYY-MM-DD"))
}

/// Value parser for `HH:MM` arguments, the zero-padded form is kept as typed.
pub fn parse_time_arg(s: &str) -> Result<String, String> {
    match parse_time(s) {
        Some(_) => Ok(s.to_string()),
        None => Err(format!("Invalid time `{s}`, expected HH:MM")),
    }
}

/// Calculate the width of the first `first_n_chars` characters of `s`.
pub fn unicode_width_of_slice(s: &str, first_n_chars: usize) -> usize {
    if first_n_chars == 0 || s.is_empty() {
        0
    } else if let Some((idx, ch)) = s.char_indices().nth(first_n_chars - 1) {
        let byte_idx = idx + ch.len_utf8();
        s[..byte_idx].width()
    } else {
        s.width()
    }
}

/// Cut `s` so it fits into `width` columns, marking the cut with `…`.
pub fn truncate_to_width(s: &str, width: usize) -> Cow<'_, str> {
    if s.width() <= width {
        return s.into();
    } else if width == 0 {
        return "".into();
    }

    let mut out = String::new();
    let mut used = 0;
    for g in s.graphemes(true) {
        let w = g.width();
        if used + w > width - 1 {
            break;
        }
        out.push_str(g);
        used += w;
    }
    out.push('…');
    out.into()
}
