//! # Timestamp Layouts
//!
//! Layouts are written by example: they show how one reference moment,
//! `Mon Jan 2 15:04:05 MST 2006` (offset `-0700`), would be printed.
//! The default layout `2006/02/01 15:04:05` therefore prints the day before
//! the month.
//!
//! ## Recognized tokens
//!
//! | token                  | meaning                              |
//! |------------------------|--------------------------------------|
//! | `2006` / `06`          | year, four / two digits              |
//! | `01` / `1`             | month, padded / unpadded             |
//! | `January` / `Jan`      | month name, long / short             |
//! | `02` / `_2` / `2`      | day, zero / space / unpadded         |
//! | `002` / `__2`          | day of year, zero / space padded     |
//! | `Monday` / `Mon`       | weekday name, long / short           |
//! | `15`                   | hour, 24h                            |
//! | `03` / `3`             | hour, 12h padded / unpadded          |
//! | `04` / `4`             | minute                               |
//! | `05` / `5`             | second                               |
//! | `PM` / `pm`            | meridiem                             |
//! | `MST`                  | zone abbreviation                    |
//! | `-0700` `-07:00` `-07` | offset (`-070000`, `-07:00:00` too)  |
//! | `Z0700` `Z07:00` `Z07` | offset, `Z` when zero                |
//! | `.000` / `.999`        | fractional seconds, fixed / trimmed  |
//!
//! Everything else is copied literally. Compiling a layout never fails; tokens
//! become `chrono` format items wherever chrono has one.

use std::fmt::{self, Write};
use std::iter;

use chrono::format::{Fixed, Item as ChronoItem, Numeric, Pad};
use chrono::{DateTime, FixedOffset, Timelike};

/// Layout pieces chrono has no item for
#[derive(Debug, Clone, PartialEq, Eq)]
enum Custom
{
    /// `MST`: fixed offsets carry no abbreviation, so `UTC` or `-0700`
    ZoneName,
    /// `Z07`, `Z07:00:00`: `Z` at zero offset, otherwise `offset`
    Zulu(ChronoItem<'static>),
    /// `-070000` / `Z070000`
    SecondsOffset
    {
        zulu: bool,
    },
    /// Fractions with a `,` separator, an unusual width, or trimmed zeros
    Fraction
    {
        separator: char,
        digits: usize,
        trim: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Run
{
    Chrono(Vec<ChronoItem<'static>>),
    Custom(Custom),
}

enum Token
{
    Chrono(ChronoItem<'static>),
    Custom(Custom),
}

/// A compiled timestamp layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampLayout
{
    runs: Vec<Run>,
}

impl TimestampLayout
{
    /// Compile a layout written against the reference time
    #[must_use]
    pub fn parse(layout: &str) -> Self
    {
        let mut runs: Vec<Run> = Vec::new();
        let mut literal = String::new();
        let mut rest = layout;

        while let Some(c) = rest.chars().next() {
            let Some((token, len)) = match_token(rest) else {
                literal.push(c);
                rest = &rest[c.len_utf8()..];
                continue;
            };
            if !literal.is_empty() {
                push_chrono(&mut runs, ChronoItem::OwnedLiteral(std::mem::take(&mut literal).into()));
            }
            match token {
                Token::Chrono(item) => push_chrono(&mut runs, item),
                Token::Custom(custom) => runs.push(Run::Custom(custom)),
            }
            rest = &rest[len..];
        }
        if !literal.is_empty() {
            push_chrono(&mut runs, ChronoItem::OwnedLiteral(literal.into()));
        }

        Self { runs }
    }

    /// Render `time` into `out`
    ///
    /// ## Errors
    ///
    /// Only fails if `out` does.
    pub fn write<W>(&self, time: &DateTime<FixedOffset>, out: &mut W) -> fmt::Result
    where
        W: Write + ?Sized,
    {
        for run in &self.runs {
            match run {
                Run::Chrono(items) => write!(out, "{}", time.format_with_items(items.iter()))?,
                Run::Custom(custom) => write_custom(custom, time, out)?,
            }
        }
        Ok(())
    }

    /// Render `time` to a new string
    #[must_use]
    pub fn format(&self, time: &DateTime<FixedOffset>) -> String
    {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write(time, &mut out);
        out
    }
}

fn push_chrono(runs: &mut Vec<Run>, item: ChronoItem<'static>)
{
    if let Some(Run::Chrono(items)) = runs.last_mut() {
        items.push(item);
    } else {
        runs.push(Run::Chrono(vec![item]));
    }
}

const fn numeric(field: Numeric, pad: Pad) -> Token
{
    Token::Chrono(ChronoItem::Numeric(field, pad))
}

const fn fixed(field: Fixed) -> Token
{
    Token::Chrono(ChronoItem::Fixed(field))
}

/// `Jan` and `Mon` followed by a lowercase letter are ordinary words (`Month`, `Janet`)
fn short_name_at(s: &str, name: &str) -> bool
{
    s.strip_prefix(name)
        .is_some_and(|rest| !rest.starts_with(|c: char| c.is_ascii_lowercase()))
}

/// Match the token at the start of `s`, returning it and its byte length
fn match_token(s: &str) -> Option<(Token, usize)>
{
    let bytes = s.as_bytes();
    let at = |i: usize| bytes.get(i).copied();

    let token = match bytes[0] {
        b'J' if s.starts_with("January") => (fixed(Fixed::LongMonthName), 7),
        b'J' if short_name_at(s, "Jan") => (fixed(Fixed::ShortMonthName), 3),
        b'M' if s.starts_with("Monday") => (fixed(Fixed::LongWeekdayName), 6),
        b'M' if short_name_at(s, "Mon") => (fixed(Fixed::ShortWeekdayName), 3),
        b'M' if s.starts_with("MST") => (Token::Custom(Custom::ZoneName), 3),
        b'0' => match at(1) {
            Some(b'1') => (numeric(Numeric::Month, Pad::Zero), 2),
            Some(b'2') => (numeric(Numeric::Day, Pad::Zero), 2),
            Some(b'3') => (numeric(Numeric::Hour12, Pad::Zero), 2),
            Some(b'4') => (numeric(Numeric::Minute, Pad::Zero), 2),
            Some(b'5') => (numeric(Numeric::Second, Pad::Zero), 2),
            Some(b'6') => (numeric(Numeric::YearMod100, Pad::Zero), 2),
            Some(b'0') if at(2) == Some(b'2') => (numeric(Numeric::Ordinal, Pad::Zero), 3),
            _ => return None,
        },
        b'1' if at(1) == Some(b'5') => (numeric(Numeric::Hour, Pad::Zero), 2),
        b'1' => (numeric(Numeric::Month, Pad::None), 1),
        b'2' if s.starts_with("2006") => (numeric(Numeric::Year, Pad::Zero), 4),
        b'2' => (numeric(Numeric::Day, Pad::None), 1),
        // `_2006` is a literal underscore followed by the year
        b'_' if s.starts_with("_2006") => return None,
        b'_' if s.starts_with("__2") => (numeric(Numeric::Ordinal, Pad::Space), 3),
        b'_' if s.starts_with("_2") => (numeric(Numeric::Day, Pad::Space), 2),
        b'3' => (numeric(Numeric::Hour12, Pad::None), 1),
        b'4' => (numeric(Numeric::Minute, Pad::None), 1),
        b'5' => (numeric(Numeric::Second, Pad::None), 1),
        b'P' if at(1) == Some(b'M') => (fixed(Fixed::UpperAmPm), 2),
        b'p' if at(1) == Some(b'm') => (fixed(Fixed::LowerAmPm), 2),
        b'-' | b'Z' => return match_offset(s),
        b'.' | b',' => return match_fraction(s),
        _ => return None,
    };
    Some(token)
}

fn match_offset(s: &str) -> Option<(Token, usize)>
{
    let zulu = s.starts_with('Z');
    let body = &s[1..];
    let (token, len) = if body.starts_with("07:00:00") {
        let item = ChronoItem::Fixed(Fixed::TimezoneOffsetDoubleColon);
        (if zulu { Token::Custom(Custom::Zulu(item)) } else { Token::Chrono(item) }, 8)
    } else if body.starts_with("070000") {
        (Token::Custom(Custom::SecondsOffset { zulu }), 6)
    } else if body.starts_with("07:00") {
        (fixed(if zulu { Fixed::TimezoneOffsetColonZ } else { Fixed::TimezoneOffsetColon }), 5)
    } else if body.starts_with("0700") {
        (fixed(if zulu { Fixed::TimezoneOffsetZ } else { Fixed::TimezoneOffset }), 4)
    } else if body.starts_with("07") {
        // Hours only; minutes are truncated
        let item = ChronoItem::Fixed(Fixed::TimezoneOffsetTripleColon);
        (if zulu { Token::Custom(Custom::Zulu(item)) } else { Token::Chrono(item) }, 2)
    } else {
        return None;
    };
    Some((token, len + 1))
}

fn match_fraction(s: &str) -> Option<(Token, usize)>
{
    let mut chars = s.chars();
    let separator = chars.next()?;
    let digit = chars.next().filter(|c| *c == '0' || *c == '9')?;
    let digits = 1 + chars.clone().take_while(|c| *c == digit).count();
    // A run followed by another digit is not a fraction
    if chars.nth(digits - 1).is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }
    let trim = digit == '9';

    let token = match (separator, digits, trim) {
        ('.', 3, false) => fixed(Fixed::Nanosecond3),
        ('.', 6, false) => fixed(Fixed::Nanosecond6),
        ('.', 9, false) => fixed(Fixed::Nanosecond9),
        _ => Token::Custom(Custom::Fraction {
            separator,
            digits,
            trim,
        }),
    };
    Some((token, 1 + digits))
}

fn write_custom<W>(custom: &Custom, time: &DateTime<FixedOffset>, out: &mut W) -> fmt::Result
where
    W: Write + ?Sized,
{
    let seconds = time.offset().local_minus_utc();
    match custom {
        Custom::ZoneName if seconds == 0 => out.write_str("UTC"),
        Custom::ZoneName => write_chrono(time, &ChronoItem::Fixed(Fixed::TimezoneOffset), out),
        Custom::Zulu(_) | Custom::SecondsOffset { zulu: true } if seconds == 0 => out.write_char('Z'),
        Custom::Zulu(item) => write_chrono(time, item, out),
        Custom::SecondsOffset { .. } => {
            let sign = if seconds < 0 { '-' } else { '+' };
            let seconds = seconds.unsigned_abs();
            write!(out, "{sign}{:02}{:02}{:02}", seconds / 3600, seconds / 60 % 60, seconds % 60)
        }
        Custom::Fraction {
            separator,
            digits,
            trim,
        } => write_fraction(out, time.nanosecond() % 1_000_000_000, *separator, *digits, *trim),
    }
}

fn write_chrono<W>(time: &DateTime<FixedOffset>, item: &ChronoItem<'static>, out: &mut W) -> fmt::Result
where
    W: Write + ?Sized,
{
    write!(out, "{}", time.format_with_items(iter::once(item)))
}

fn write_fraction<W>(out: &mut W, nanos: u32, separator: char, digits: usize, trim: bool) -> fmt::Result
where
    W: Write + ?Sized,
{
    let all = format!("{nanos:09}");
    let shown = &all[..digits.min(9)];
    let shown = if trim { shown.trim_end_matches('0') } else { shown };
    if shown.is_empty() {
        return Ok(());
    }
    out.write_char(separator)?;
    out.write_str(shown)
}
