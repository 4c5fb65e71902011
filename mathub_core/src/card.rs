//! # Keyword Card Renderer
//!
//! Builds LS-DYNA keyword decks line by line. A card is an ordered list of
//! [`Field`]s; [`DeckBuilder::card`] writes a `$#` column header and the
//! matching data line in one step.
//!
//! ## Layout
//!
//! ```text
//! *KEYWORD
//! $ CSCM Concrete (*MAT_CSCM)                     <- banner comments
//! *TITLE
//! $#                                          title
//! Material Hub deck: CSCM Concrete
//! *MAT_CSCM_TITLE
//! MAT_CSCM_30.0MPa_dmax16.0mm                     <- material title
//! $#     mid        ro     nplot ...              <- column header
//!       1001    0.0023         1 ...              <- data line, 10 chars/field
//! *END
//! ```
//!
//! Column position is the contract with the solver: fields are written in
//! the order given, never sorted or renamed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::format::{fixed_decimal_opt, fixed_int_opt, fixed_width_opt, pad_left, DEFAULT_WIDTH};

/// Deck start sigil
pub const KEYWORD_START: &str = "*KEYWORD";

/// Deck end sigil
pub const KEYWORD_END: &str = "*END";

/// Comment sigil
pub const COMMENT: char = '$';

/// Column-header prefix
pub const COLUMN_HEADER: &str = "$#";

/// Card image width
pub const LINE_WIDTH: usize = 80;

/// How a field value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldFormat {
    /// Truncated integer (IDs, flags)
    Int,
    /// Fixed number of decimals
    Decimal(usize),
    /// Shortest decimal form, scientific when needed
    Auto,
}

/// One column of a card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    /// Solver field name, as printed in the column header
    pub label: &'static str,
    /// `None` renders as zero
    pub value: Option<f64>,
    pub format: FieldFormat,
}

impl Field {
    pub fn int(label: &'static str, value: impl Into<Option<f64>>) -> Self {
        Field {
            label,
            value: value.into(),
            format: FieldFormat::Int,
        }
    }

    pub fn decimal(label: &'static str, value: impl Into<Option<f64>>, decimals: usize) -> Self {
        Field {
            label,
            value: value.into(),
            format: FieldFormat::Decimal(decimals),
        }
    }

    pub fn auto(label: &'static str, value: impl Into<Option<f64>>) -> Self {
        Field {
            label,
            value: value.into(),
            format: FieldFormat::Auto,
        }
    }

    /// The value in exactly `width` columns
    pub fn render(&self, width: usize) -> String {
        match self.format {
            FieldFormat::Int => fixed_int_opt(self.value, width),
            FieldFormat::Decimal(d) => fixed_decimal_opt(self.value, d, width),
            FieldFormat::Auto => fixed_width_opt(self.value, width),
        }
    }
}

/// One line of a generated deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text")]
pub enum DeckLine {
    /// `*KEYWORD`, `*MAT_..._TITLE`, `*END`
    Keyword(String),
    /// Free `$` comment
    Comment(String),
    /// `$#` column header
    ColumnHeader(String),
    /// Plain title text
    Title(String),
    /// Fixed-width field values
    Data(String),
}

impl DeckLine {
    pub fn text(&self) -> &str {
        match self {
            DeckLine::Keyword(s)
            | DeckLine::Comment(s)
            | DeckLine::ColumnHeader(s)
            | DeckLine::Title(s)
            | DeckLine::Data(s) => s,
        }
    }

    pub fn is_data(&self) -> bool {
        matches!(self, DeckLine::Data(_))
    }
}

/// A complete rendered deck.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardText {
    lines: Vec<DeckLine>,
}

impl CardText {
    pub fn lines(&self) -> &[DeckLine] {
        &self.lines
    }

    /// Data lines only, in deck order
    pub fn data_lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter(|l| l.is_data()).map(DeckLine::text)
    }

    /// Deck text with `\n` line endings and a trailing newline
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line.text());
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for CardText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Line-by-line deck builder.
///
/// ```rust
/// use mathub_core::card::{DeckBuilder, Field};
///
/// let mut deck = DeckBuilder::new();
/// deck.keyword("*MAT_ELASTIC_TITLE")
///     .title("Steel")
///     .card(&[
///         Field::int("mid", 1.0),
///         Field::decimal("ro", 0.00785, 5),
///         Field::decimal("e", 210000.0, 1),
///     ]);
/// let text = deck.finish().to_text();
///
/// assert!(text.starts_with("*KEYWORD\n"));
/// assert!(text.contains("$#     mid        ro         e\n"));
/// assert!(text.contains("         1   0.00785  210000.0\n"));
/// assert!(text.ends_with("*END\n"));
/// ```
#[derive(Debug, Clone)]
pub struct DeckBuilder {
    lines: Vec<DeckLine>,
    width: usize,
}

impl Default for DeckBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DeckBuilder {
    /// Start a deck with the `*KEYWORD` line
    pub fn new() -> Self {
        DeckBuilder {
            lines: vec![DeckLine::Keyword(KEYWORD_START.to_string())],
            width: DEFAULT_WIDTH,
        }
    }

    /// `$ text` comment, wrapped at word boundaries to stay within 80 columns
    pub fn comment(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if text.trim().is_empty() {
            self.lines.push(DeckLine::Comment(COMMENT.to_string()));
            return self;
        }

        let mut line = String::from(COMMENT);
        for word in text.split_whitespace() {
            if line.len() > 1 && line.len() + 1 + word.len() > LINE_WIDTH {
                self.lines.push(DeckLine::Comment(std::mem::take(&mut line)));
                line.push(COMMENT);
            }
            line.push(' ');
            line.push_str(word);
        }
        self.lines.push(DeckLine::Comment(line));
        self
    }

    /// A keyword line such as `*MAT_CSCM_TITLE`
    pub fn keyword(&mut self, keyword: impl Into<String>) -> &mut Self {
        self.lines.push(DeckLine::Keyword(keyword.into()));
        self
    }

    /// Plain title text (not column formatted).
    ///
    /// Leading `*` or `$` would turn a title into a keyword or a comment, so
    /// they are stripped.
    pub fn title(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref().trim_start_matches(['*', COMMENT]).trim();
        self.lines.push(DeckLine::Title(text.to_string()));
        self
    }

    /// `*TITLE` block with its 80-column header comment
    pub fn deck_title(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.keyword("*TITLE");
        self.lines.push(DeckLine::ColumnHeader(format!(
            "{}{}",
            COLUMN_HEADER,
            pad_left("title", LINE_WIDTH - COLUMN_HEADER.len())
        )));
        self.title(text)
    }

    /// Column header plus data line for one card
    pub fn card(&mut self, fields: &[Field]) -> &mut Self {
        let mut header = String::from(COLUMN_HEADER);
        let mut data = String::with_capacity(fields.len() * self.width);

        for (i, field) in fields.iter().enumerate() {
            let label_width = if i == 0 { self.width - COLUMN_HEADER.len() } else { self.width };
            let label: String = field.label.chars().take(label_width).collect();
            header.push_str(&pad_left(&label, label_width));
            data.push_str(&field.render(self.width));
        }

        self.lines.push(DeckLine::ColumnHeader(header));
        self.lines.push(DeckLine::Data(data));
        self
    }

    /// Close the deck with `*END`
    pub fn finish(mut self) -> CardText {
        self.lines.push(DeckLine::Keyword(KEYWORD_END.to_string()));
        CardText { lines: self.lines }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CardText {
        let mut deck = DeckBuilder::new();
        deck.comment("Units: mm-ms-g-N-MPa")
            .deck_title("Material Hub deck")
            .keyword("*MAT_WINFRITH_CONCRETE_TITLE")
            .title("WINFRITH_30.0MPa")
            .card(&[
                Field::int("mid", 99.0),
                Field::decimal("ro", 0.0023, 4),
                Field::decimal("tm", 33550.56, 1),
                Field::auto("fe", 5.2e-5),
            ]);
        deck.finish()
    }

    #[test]
    fn test_deck_frame() {
        let text = sample().to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.first(), Some(&"*KEYWORD"));
        assert_eq!(lines.last(), Some(&"*END"));
        assert_eq!(lines.iter().filter(|l| **l == "*KEYWORD").count(), 1);
        assert_eq!(lines.iter().filter(|l| **l == "*END").count(), 1);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_header_precedes_data_once() {
        let deck = sample();
        let lines = deck.lines();
        let data_idx = lines.iter().position(DeckLine::is_data).unwrap();
        assert_eq!(
            lines[data_idx - 1],
            DeckLine::ColumnHeader("$#     mid        ro        tm        fe".to_string())
        );
        assert_eq!(deck.data_lines().count(), 1);
    }

    #[test]
    fn test_data_line_columns() {
        let deck = sample();
        let data = deck.data_lines().next().unwrap();
        assert_eq!(data.len(), 40);
        assert_eq!(&data[0..10], "        99");
        assert_eq!(&data[10..20], "    0.0023");
        assert_eq!(&data[20..30], "   33550.6");
        assert_eq!(&data[30..40], "  5.200E-5");
    }

    #[test]
    fn test_title_header_is_80_columns() {
        let deck = sample();
        let header = deck
            .lines()
            .iter()
            .find(|l| l.text().ends_with("title"))
            .unwrap();
        assert_eq!(header.text().len(), 80);
    }

    #[test]
    fn test_title_strips_sigils() {
        let mut deck = DeckBuilder::new();
        deck.title("*MAT_CSCM 30 MPa");
        let card = deck.finish();
        assert_eq!(card.lines()[1], DeckLine::Title("MAT_CSCM 30 MPa".to_string()));
    }

    #[test]
    fn test_long_comment_wraps() {
        let mut deck = DeckBuilder::new();
        deck.comment("Ref: ".to_string() + &"word ".repeat(40));
        let card = deck.finish();
        let comments: Vec<&str> = card
            .lines()
            .iter()
            .filter(|l| matches!(l, DeckLine::Comment(_)))
            .map(DeckLine::text)
            .collect();
        assert!(comments.len() > 1);
        for c in &comments {
            assert!(c.starts_with("$ "));
            assert!(c.len() <= LINE_WIDTH, "{:?}", c);
        }
    }

    #[test]
    fn test_missing_value_renders_zero() {
        let mut deck = DeckBuilder::new();
        deck.card(&[Field::decimal("pred", None, 1)]);
        let card = deck.finish();
        assert_eq!(card.data_lines().next(), Some("       0.0"));
    }
}
