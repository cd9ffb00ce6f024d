use crate::document::{Document, is_blank};

/// Section titles printed on the menu pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    LunchSpecials,
    BreakfastSpecials,
    DinnerEntrees,
}

impl Section {
    /// Checked in this order when a noisy line could match more than one title.
    pub const ALL: [Section; 3] = [
        Section::LunchSpecials,
        Section::BreakfastSpecials,
        Section::DinnerEntrees,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::LunchSpecials => "Lunch Specials",
            Section::BreakfastSpecials => "Breakfast Specials",
            Section::DinnerEntrees => "Dinner Entrees",
        }
    }

    /// True when every character of `line` occurs in the title (or is the
    /// line break). Extraction sometimes moves letters of a title onto
    /// another line; what remains is still recognizable this way.
    pub fn loosely_matches(self, line: &str) -> bool {
        let title = self.title();
        line.chars().all(|c| c == '\n' || title.contains(c))
    }

    /// Exact header line, as produced by [`normalize_headers`].
    pub fn from_line(line: &str) -> Option<Section> {
        let trimmed = line.trim();
        Self::ALL.into_iter().find(|s| s.title() == trimmed)
    }
}

/// Replace noisy section header lines with the canonical title followed by a
/// blank line.
pub fn normalize_headers(doc: Document) -> Document {
    doc.into_lines()
        .into_iter()
        .map(|line| {
            if is_blank(&line) {
                return line;
            }
            match Section::ALL.into_iter().find(|s| s.loosely_matches(&line)) {
                Some(section) => format!("{}\n\n", section.title()),
                None => line,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(lines: &[&str]) -> Document {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn canonical_titles_gain_a_blank_line() {
        let out = normalize_headers(doc(&["Lunch Specials\n", "Dinner Entrees\n"]));
        assert_eq!(out.lines(), ["Lunch Specials\n\n", "Dinner Entrees\n\n"]);
    }

    #[test]
    fn damaged_titles_are_recognized() {
        let out = normalize_headers(doc(&["Lunc Specals\n", "Brekfast Specials\n", "Diner Entres\n"]));
        assert_eq!(
            out.lines(),
            [
                "Lunch Specials\n\n",
                "Breakfast Specials\n\n",
                "Dinner Entrees\n\n"
            ]
        );
    }

    #[test]
    fn foreign_characters_prevent_a_match() {
        let input = doc(&["Lunch Specials!\n", "Chicken Tenders .. $7.00\n", "\n"]);
        let out = normalize_headers(input.clone());
        assert_eq!(out, input);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let input = doc(&["LUNCH SPECIALS\n"]);
        assert_eq!(normalize_headers(input.clone()), input);
    }

    #[test]
    fn from_line_requires_the_exact_title() {
        assert_eq!(Section::from_line("Dinner Entrees\n"), Some(Section::DinnerEntrees));
        assert_eq!(Section::from_line("Dinner Entrees after 5\n"), None);
    }
}
