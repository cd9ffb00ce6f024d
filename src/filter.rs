use crate::document::Document;

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Drop short artifact lines and weekday header lines.
pub fn filter_lines(doc: Document) -> Document {
    doc.into_lines()
        .into_iter()
        .filter(|line| !is_artifact(line) && !is_weekday_header(line))
        .collect()
}

/// Bad text extraction leaves one- and two-character fragments on their own
/// line. A lone newline is a real separator and is kept.
pub fn is_artifact(line: &str) -> bool {
    line.chars().count() <= 2 && line != "\n"
}

pub fn is_weekday_header(line: &str) -> bool {
    let lower = line.to_lowercase();
    WEEKDAYS.iter().any(|day| lower.starts_with(day))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(lines: &[&str]) -> Document {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn drops_short_fragments_but_keeps_separators() {
        let out = filter_lines(doc(&["Wings .. $9.50\n", "a\n", "\n", "12", "ok\n"]));
        assert_eq!(out.lines(), ["Wings .. $9.50\n", "\n", "ok\n"]);
    }

    #[test]
    fn drops_weekday_headers_in_any_case() {
        let out = filter_lines(doc(&[
            "MONDAY 3/14\n",
            "tuesday\n",
            "Wednesday Specials\n",
            "Burger .. $8.00\n",
            "Served Monday only\n",
        ]));
        assert_eq!(out.lines(), ["Burger .. $8.00\n", "Served Monday only\n"]);
    }

    #[test]
    fn filtering_twice_changes_nothing() {
        let input = doc(&["Friday\n", "x\n", "\n", "\n", "Item .. $1.00\n", "yz", "desc\n"]);
        let once = filter_lines(input);
        let twice = filter_lines(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_in_empty_out() {
        assert!(filter_lines(Document::default()).is_empty());
    }
}
