use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const ELLIPSIS: char = '\u{2026}';
const TAB_CELLS: usize = 4;

fn cell_width(grapheme: &str) -> usize {
    if grapheme == "\t" {
        TAB_CELLS
    } else {
        grapheme.width()
    }
}

/// Display width in terminal cells, per grapheme cluster. Tabs count as 4.
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(cell_width).sum()
}

/// Cut `s` to at most `max_cells` cells, ending in `…` when anything was cut.
/// Never splits a grapheme, so a wide marker is dropped whole.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    let Some(budget) = max_cells.checked_sub(1) else {
        return String::new();
    };
    let mut used = 0;
    let mut out: String = s
        .graphemes(true)
        .take_while(|g| {
            used += cell_width(g);
            used <= budget
        })
        .collect();
    out.push(ELLIPSIS);
    out
}

/// Right-pad with spaces to `cells` wide; wider strings are returned as is.
pub fn pad_to_width(s: &str, cells: usize) -> String {
    let fill = cells.saturating_sub(display_width(s));
    format!("{}{}", s, " ".repeat(fill))
}
