use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitType {
    Title,
    List,
    Table,
    Paragraph,
    Slide,
    Other,
}

impl UnitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitType::Title => "title",
            UnitType::List => "list",
            UnitType::Table => "table",
            UnitType::Paragraph => "paragraph",
            UnitType::Slide => "slide",
            UnitType::Other => "other",
        }
    }

    pub fn is_classified(&self) -> bool {
        !matches!(self, UnitType::Other)
    }
}

impl FromStr for UnitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(UnitType::Title),
            "list" => Ok(UnitType::List),
            "table" => Ok(UnitType::Table),
            "paragraph" => Ok(UnitType::Paragraph),
            "slide" => Ok(UnitType::Slide),
            "other" => Ok(UnitType::Other),
            _ => Err(format!("Invalid unit type: {}", s)),
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A trimmed, non-empty piece of document text.
///
/// `ordinal` is `None` exactly when `unit_type` is [`UnitType::Other`].
#[derive(Debug, Clone, PartialEq)]
pub struct TextUnit {
    pub ordinal: Option<u32>,
    pub unit_type: UnitType,
    pub text: String,
}

/// Collects raw elements in document order and assigns ordinals.
///
/// Elements are trimmed and dropped when empty. Only classified units consume
/// an ordinal, so the sequence of ordinals is always `0, 1, 2, ...`.
#[derive(Debug, Default)]
pub struct UnitSequenceBuilder {
    units: Vec<TextUnit>,
    next_ordinal: u32,
}

impl UnitSequenceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, unit_type: UnitType, raw_text: &str) {
        let text = raw_text.trim();
        if text.is_empty() {
            return;
        }

        let ordinal = if unit_type.is_classified() {
            let ordinal = self.next_ordinal;
            self.next_ordinal += 1;
            Some(ordinal)
        } else {
            None
        };

        self.units.push(TextUnit {
            ordinal,
            unit_type,
            text: text.to_string(),
        });
    }

    /// Pushes a unit whose ordinal is fixed by the source, e.g. a slide number.
    pub fn push_numbered(&mut self, unit_type: UnitType, ordinal: u32, raw_text: &str) {
        let text = raw_text.trim();
        if text.is_empty() {
            return;
        }
        self.units.push(TextUnit {
            ordinal: Some(ordinal),
            unit_type,
            text: text.to_string(),
        });
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn finish(self) -> Vec<TextUnit> {
        self.units
    }
}

