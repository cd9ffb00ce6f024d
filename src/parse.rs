use std::sync::LazyLock;

use regex::Regex;

use crate::document::{Document, is_blank};
use crate::error::MenuError;
use crate::headers::Section;
use crate::model::{MealPeriod, MenuItem, ParsedMenu};

static DOT_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.{2,}").unwrap());
static SPACE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());
static LEADING_DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+(?:\.\d+)?|\.\d+)").unwrap());

#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// File items after "Breakfast Specials" under their own period instead
    /// of lunch. A "Lunch Specials" header then switches back to lunch.
    pub breakfast_period: bool,
}

/// Block accumulator for one document.
///
/// The parser is always collecting for one meal period. Section headers move
/// it between periods; a blank line flushes the buffered block into an item.
/// "Dinner Entrees" always switches to dinner. The breakfast and lunch
/// headers only switch periods when `breakfast_period` is set, so by default
/// breakfast specials land in lunch.
#[derive(Debug)]
pub struct ItemParser {
    options: ParseOptions,
    period: MealPeriod,
    buffer: Vec<String>,
    parsed: ParsedMenu,
}

impl ItemParser {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            period: MealPeriod::Lunch,
            buffer: Vec::new(),
            parsed: ParsedMenu::default(),
        }
    }

    pub fn period(&self) -> MealPeriod {
        self.period
    }

    pub fn feed(&mut self, line: &str) {
        if let Some(section) = Section::from_line(line) {
            self.enter(section);
        } else if is_blank(line) {
            self.flush();
        } else {
            self.buffer.push(line.to_string());
        }
    }

    fn enter(&mut self, section: Section) {
        self.period = match section {
            Section::DinnerEntrees => MealPeriod::Dinner,
            Section::BreakfastSpecials if self.options.breakfast_period => MealPeriod::Breakfast,
            Section::LunchSpecials if self.options.breakfast_period => MealPeriod::Lunch,
            _ => self.period,
        };
    }

    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let block = std::mem::take(&mut self.buffer);
        match finalize_item(&block, self.period) {
            Ok(item) => self.parsed.items.push(item),
            Err(err) => {
                tracing::warn!(error = %err, "skipping malformed menu item");
                self.parsed.defects.push(err);
            }
        }
    }

    /// Consume the parser. A block still buffered at the end was never closed
    /// by a blank line and is dropped.
    pub fn finish(self) -> ParsedMenu {
        if !self.buffer.is_empty() {
            tracing::debug!(lines = self.buffer.len(), "dropping unterminated block");
        }
        self.parsed
    }
}

/// Turn segmented, cleaned text into menu items.
pub fn parse_items(clean_text: &str, options: ParseOptions) -> ParsedMenu {
    let doc = Document::from_text(clean_text);
    let mut parser = ItemParser::new(options);
    for line in doc.lines() {
        parser.feed(line);
    }
    parser.finish()
}

/// Build one item from the lines of a block. The first line carries the name
/// and the price; any description on it follows the last " - ".
pub fn finalize_item(block: &[String], meal: MealPeriod) -> Result<MenuItem, MenuError> {
    let Some((first, rest)) = block.split_first() else {
        return Err(MenuError::MissingPrice {
            line: String::new(),
        });
    };

    let price = parse_price(first)?;

    let name = first
        .split('.')
        .next()
        .unwrap_or_default()
        .split(" - ")
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();

    let squeezed = DOT_RUN_RE.replace_all(first, ".");
    let seed = if squeezed.contains(" - ") {
        squeezed
            .rsplit(" - ")
            .next()
            .unwrap_or_default()
            .split(" . ")
            .next()
            .unwrap_or_default()
    } else {
        ""
    };
    let joined = std::iter::once(seed)
        .chain(rest.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
        .replace('\n', " ");
    let description = SPACE_RUN_RE.replace_all(&joined, " ").trim().to_string();

    Ok(MenuItem {
        name,
        description,
        price,
        meal,
    })
}

/// Price after the first `$` on the line. Trailing text after the number is
/// ignored.
pub fn parse_price(line: &str) -> Result<f64, MenuError> {
    let Some((_, after)) = line.split_once('$') else {
        return Err(MenuError::MissingPrice {
            line: line.trim_end().to_string(),
        });
    };
    leading_decimal(after).ok_or_else(|| MenuError::UnreadablePrice {
        line: line.trim_end().to_string(),
    })
}

fn leading_decimal(text: &str) -> Option<f64> {
    let caps = LEADING_DECIMAL_RE.captures(text)?;
    caps.get(1)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn leader_dot_item_without_inline_description() {
        let item = finalize_item(
            &block(&["Buffalo Wings .. $9.50\n", "Served with ranch\n"]),
            MealPeriod::Lunch,
        )
        .unwrap();
        assert_eq!(item.name, "Buffalo Wings");
        assert_eq!(item.description, "Served with ranch");
        assert_eq!(item.price, 9.5);
        assert_eq!(item.meal, MealPeriod::Lunch);
    }

    #[test]
    fn dash_item_takes_description_from_first_line() {
        let item = finalize_item(
            &block(&["Cobb Salad - greens, bacon, egg ........... $10.25\n", "blue cheese\n"]),
            MealPeriod::Lunch,
        )
        .unwrap();
        assert_eq!(item.name, "Cobb Salad");
        assert_eq!(item.description, "greens, bacon, egg blue cheese");
        assert_eq!(item.price, 10.25);
    }

    #[test]
    fn description_whitespace_is_collapsed() {
        let item = finalize_item(
            &block(&["Nachos .. $6.00\n", "  chips,   salsa\n", "and  queso  \n"]),
            MealPeriod::Dinner,
        )
        .unwrap();
        assert_eq!(item.description, "chips, salsa and queso");
    }

    #[test]
    fn missing_dollar_sign_is_a_defect_not_zero() {
        let err = finalize_item(&block(&["Soup of the day\n", "ask your server\n"]), MealPeriod::Lunch)
            .unwrap_err();
        assert!(matches!(err, MenuError::MissingPrice { .. }));
    }

    #[test]
    fn non_numeric_price_is_a_defect() {
        let err = parse_price("Lobster .. $market\n").unwrap_err();
        assert!(matches!(err, MenuError::UnreadablePrice { .. }));
    }

    #[test]
    fn price_ignores_trailing_text() {
        assert_eq!(parse_price("Ribs .. $14.75 half rack\n").unwrap(), 14.75);
        assert_eq!(parse_price("Fries $ 3\n").unwrap(), 3.0);
    }

    #[test]
    fn dinner_header_switches_period() {
        let parsed = parse_items(
            "Wings .. $9.50\n\nDinner Entrees\n\nSteak Frites - hand cut fries $22.00\n\n",
            ParseOptions::default(),
        );
        assert_eq!(parsed.items.len(), 2);
        assert_eq!(parsed.items[0].meal, MealPeriod::Lunch);
        assert_eq!(parsed.items[1].meal, MealPeriod::Dinner);
        assert_eq!(parsed.items[1].name, "Steak Frites");
        assert_eq!(parsed.items[1].price, 22.0);
    }

    #[test]
    fn breakfast_collapses_into_lunch_by_default() {
        let text = "Breakfast Specials\n\nOmelet .. $6.00\n\nLunch Specials\n\nClub .. $8.00\n\n";
        let parsed = parse_items(text, ParseOptions::default());
        assert!(parsed.items.iter().all(|i| i.meal == MealPeriod::Lunch));
    }

    #[test]
    fn breakfast_period_can_be_tracked() {
        let text = "Breakfast Specials\n\nOmelet .. $6.00\n\nLunch Specials\n\nClub .. $8.00\n\n";
        let parsed = parse_items(
            text,
            ParseOptions {
                breakfast_period: true,
            },
        );
        assert_eq!(parsed.items[0].meal, MealPeriod::Breakfast);
        assert_eq!(parsed.items[1].meal, MealPeriod::Lunch);
    }

    #[test]
    fn malformed_block_does_not_stop_parsing() {
        let parsed = parse_items(
            "Soup of the day\n\nWings .. $9.50\n\n",
            ParseOptions::default(),
        );
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.defects.len(), 1);
        assert_eq!(parsed.items[0].name, "Wings");
    }

    #[test]
    fn headers_are_never_buffered() {
        let parsed = parse_items("Lunch Specials\nWings .. $9.50\n\n", ParseOptions::default());
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].description, "");
    }

    #[test]
    fn empty_text_yields_nothing() {
        let parsed = parse_items("", ParseOptions::default());
        assert!(parsed.items.is_empty());
        assert!(parsed.defects.is_empty());
    }
}
