use crate::document::{Document, ends_block, is_blank};

/// Heuristic for "this line starts a new menu item".
///
/// Two layouts are recognized:
///
/// * `Name Name - ............. $12.50` (leader dots before the price)
/// * `Name Name - description description $12.5`, where the text after the
///   last `$` must read back as exactly the number it parses to. That keeps
///   a `$` inside running text from counting as a price column.
///
/// This misfires on descriptions that end in a dollar amount, e.g.
/// "choice of two sides - add a drink $2.5"; such lines are split as items.
pub fn is_item_first_line(line: &str) -> bool {
    if line.contains(".. $") {
        return true;
    }
    if !(line.contains(" - ") && line.contains('$')) {
        return false;
    }
    let tail = line.rsplit('$').next().unwrap_or_default().trim();
    match tail.parse::<f64>() {
        Ok(value) if value.is_finite() => canonical_decimal(value) == tail,
        _ => false,
    }
}

/// Shortest round-trip form, always with a fractional digit: 8 is "8.0",
/// 8.5 is "8.5".
fn canonical_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Lines that need a blank line in front of them.
fn starts_block(line: &str) -> bool {
    is_item_first_line(line) || line.contains("Dinner")
}

/// Put every menu item into its own blank-line-delimited block.
pub fn segment_items(doc: Document) -> Document {
    let inserted = insert_boundaries(doc);
    let collapsed = collapse_boundaries(inserted);
    terminate(collapsed)
}

/// Force a blank line in front of every detected item start that lacks one.
pub fn insert_boundaries(doc: Document) -> Document {
    let lines = doc.into_lines();
    let mut out = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        let preceded_by_blank = i == 0 || is_blank(&lines[i - 1]) || ends_block(&lines[i - 1]);
        if !preceded_by_blank && starts_block(line) {
            out.push("\n".to_string());
        }
        out.push(line.clone());
    }
    Document::new(out)
}

/// Drop every blank line that does not sit directly before an item start.
/// A trailing blank line is kept.
pub fn collapse_boundaries(doc: Document) -> Document {
    let lines = doc.into_lines();
    let mut out = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        let keep = match lines.get(i + 1) {
            _ if !is_blank(line) => true,
            None => true,
            Some(next) => starts_block(next),
        };
        if keep {
            out.push(line.clone());
        }
    }
    Document::new(out)
}

/// Make sure a non-empty document ends with exactly one blank line so the
/// last item is closed. An unterminated last line gets its line break first.
pub fn terminate(doc: Document) -> Document {
    let mut lines = doc.into_lines();
    if let Some(last) = lines.last_mut() {
        if !is_blank(last) {
            if !last.ends_with('\n') {
                last.push('\n');
            }
            lines.push("\n".to_string());
        }
    }
    Document::new(lines)
}
