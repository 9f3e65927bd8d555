//! # Line Templates
//!
//! A template is plain text with `%name%` placeholders:
//!
//! | placeholder  | replaced with                          |
//! |--------------|----------------------------------------|
//! | `%time%`     | entry time, rendered with the layout   |
//! | `%level%`    | upper-case level name                  |
//! | `%filename%` | caller file, or nothing                |
//! | `%line%`     | caller line, or nothing                |
//! | `%message%`  | message, verbatim                      |
//! | `%fields%`   | `name:value` pairs joined by `", "`    |
//!
//! The template is scanned once, up front, into [`Segment`]s. Rendered values
//! are written next to the literals and are never scanned again, so a message
//! containing `%level%` stays as it is.
//!
//! Every placeholder except `%fields%` fills only its first occurrence; later
//! repeats are kept as literal text. `%fields%` fills every occurrence.
//! Unknown names and lone `%` characters are literal text as well.

/// A named slot in a line template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder
{
    Time,
    Message,
    Filename,
    Line,
    Level,
    Fields,
}

impl Placeholder
{
    pub const ALL: [Placeholder; 6] = [
        Placeholder::Time,
        Placeholder::Message,
        Placeholder::Filename,
        Placeholder::Line,
        Placeholder::Level,
        Placeholder::Fields,
    ];

    /// Name between the `%` delimiters
    #[must_use]
    pub const fn name(self) -> &'static str
    {
        match self {
            Placeholder::Time => "time",
            Placeholder::Message => "message",
            Placeholder::Filename => "filename",
            Placeholder::Line => "line",
            Placeholder::Level => "level",
            Placeholder::Fields => "fields",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self>
    {
        Self::ALL.into_iter().find(|placeholder| placeholder.name() == name)
    }

    /// Whether every occurrence is filled, not just the first
    #[must_use]
    pub const fn fills_every_occurrence(self) -> bool
    {
        matches!(self, Placeholder::Fields)
    }

    const fn index(self) -> usize
    {
        self as usize
    }
}

/// A piece of a parsed template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment
{
    /// Text copied to the output unchanged
    Literal(String),
    /// A placeholder to fill with a rendered value
    Slot(Placeholder),
}

/// A line template, scanned into segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template
{
    source: String,
    segments: Vec<Segment>,
}

impl Template
{
    /// Scan `source` into literal and placeholder segments.
    ///
    /// Never fails: anything that is not a recognized placeholder is literal text.
    #[must_use]
    pub fn parse(source: &str) -> Self
    {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut filled = [false; Placeholder::ALL.len()];
        let mut rest = source;

        while let Some(start) = rest.find('%') {
            literal.push_str(&rest[..start]);
            let after = &rest[start + 1..];

            let slot = after
                .find('%')
                .and_then(|end| Placeholder::from_name(&after[..end]).map(|placeholder| (placeholder, end)))
                .filter(|(placeholder, _)| placeholder.fills_every_occurrence() || !filled[placeholder.index()]);

            if let Some((placeholder, end)) = slot {
                filled[placeholder.index()] = true;
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Slot(placeholder));
                rest = &after[end + 1..];
            } else {
                literal.push('%');
                rest = after;
            }
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self {
            source: source.to_string(),
            segments,
        }
    }

    /// The text the template was parsed from
    #[must_use]
    pub fn source(&self) -> &str
    {
        &self.source
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment]
    {
        &self.segments
    }

    /// Whether the template fills `placeholder` anywhere
    #[must_use]
    pub fn contains(&self, placeholder: Placeholder) -> bool
    {
        self.segments.iter().any(|segment| *segment == Segment::Slot(placeholder))
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn literal(text: &str) -> Segment
    {
        Segment::Literal(text.to_string())
    }

    #[test]
    fn test_parse_default_template()
    {
        let template = Template::parse("%time% [%level%] %filename%:%line% %message% {%fields%}");
        assert_eq!(
            template.segments(),
            [
                Segment::Slot(Placeholder::Time),
                literal(" ["),
                Segment::Slot(Placeholder::Level),
                literal("] "),
                Segment::Slot(Placeholder::Filename),
                literal(":"),
                Segment::Slot(Placeholder::Line),
                literal(" "),
                Segment::Slot(Placeholder::Message),
                literal(" {"),
                Segment::Slot(Placeholder::Fields),
                literal("}"),
            ]
        );
    }

    #[test]
    fn test_parse_plain_text()
    {
        assert_eq!(Template::parse("no slots here").segments(), [literal("no slots here")]);
        assert!(Template::parse("").segments().is_empty());
    }

    #[test]
    fn test_unknown_names_and_stray_percent_are_literal()
    {
        let template = Template::parse("100% %user% %%level%");
        assert_eq!(
            template.segments(),
            [literal("100% %user% %"), Segment::Slot(Placeholder::Level)]
        );
    }

    #[test]
    fn test_unterminated_placeholder_is_literal()
    {
        assert_eq!(Template::parse("[%level").segments(), [literal("[%level")]);
    }

    #[test]
    fn test_repeated_placeholder_fills_first_only()
    {
        let template = Template::parse("%level% %level%");
        assert_eq!(
            template.segments(),
            [Segment::Slot(Placeholder::Level), literal(" %level%")]
        );
    }

    #[test]
    fn test_repeated_fields_fills_every_occurrence()
    {
        let template = Template::parse("%fields%|%fields%");
        assert_eq!(
            template.segments(),
            [
                Segment::Slot(Placeholder::Fields),
                literal("|"),
                Segment::Slot(Placeholder::Fields),
            ]
        );
    }

    #[test]
    fn test_contains()
    {
        let template = Template::parse("%message%");
        assert!(template.contains(Placeholder::Message));
        assert!(!template.contains(Placeholder::Time));
        assert_eq!(template.source(), "%message%");
    }
}
