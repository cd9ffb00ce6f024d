/// An ordered sequence of raw lines, each keeping its line terminator.
///
/// Every cleaning pass takes a `Document` by value and returns a new one, so
/// a stage can be tested on its own by feeding it a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Split extracted text into lines the way a line reader would: each line
    /// keeps its trailing `\n`, and a final unterminated fragment is kept too.
    pub fn from_text(text: &str) -> Self {
        let text = text.replace("\r\n", "\n");
        let lines = text.split_inclusive('\n').map(str::to_string).collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn to_text(&self) -> String {
        self.lines.concat()
    }
}

impl From<Vec<String>> for Document {
    fn from(lines: Vec<String>) -> Self {
        Self::new(lines)
    }
}

impl FromIterator<String> for Document {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A line with no visible content. Header lines that carry their own
/// trailing blank ("Lunch Specials\n\n") are not blank.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// A line that already ends a blank-terminated block.
pub fn ends_block(line: &str) -> bool {
    line.contains("\n\n")
}
