//! Reference-time layout formatting.
//!
//! Layouts are written as the rendering of one fixed moment,
//!
//! ```text
//! Mon Jan 2 15:04:05 MST 2006
//! 01/02 03:04:05PM '06 -0700
//! ```
//!
//! so `"2006-01-02"` means "four digit year, dash, zero-padded month, dash,
//! zero-padded day". Any text that is not one of the recognized tokens is
//! copied through unchanged.
//!
//! | Token | Meaning |
//! |-------|---------|
//! | `2006` `06` | year, four or two digits |
//! | `January` `Jan` `1` `01` | month name, abbreviation, number, padded number |
//! | `Monday` `Mon` | weekday name, abbreviation |
//! | `2` `_2` `02` | day of month, plain, space padded, zero padded |
//! | `__2` `002` | day of year, space padded, zero padded |
//! | `15` `3` `03` | hour, 24h or 12h, 12h zero padded |
//! | `4` `04` `5` `05` | minute and second, plain or zero padded |
//! | `PM` `pm` | meridiem |
//! | `MST` | zone abbreviation (`UTC` or `+hhmm`) |
//! | `-0700` `-07:00` `-07` `-070000` `-07:00:00` | numeric offset |
//! | `Z0700` `Z07:00` `Z07` `Z070000` `Z07:00:00` | numeric offset, `Z` for UTC |
//! | `.000` `,000` | fractional seconds, fixed width |
//! | `.999` `,999` | fractional seconds, trailing zeros removed |
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use funcmap_core::layout;
//!
//! let t = Utc.with_ymd_and_hms(2019, 7, 4, 18, 30, 0).unwrap().fixed_offset();
//! assert_eq!(layout::format(&t, "Jan 2, 2006 at 3:04pm"), "Jul 4, 2019 at 6:30pm");
//! assert_eq!(layout::format(&t, layout::RFC3339), "2019-07-04T18:30:00Z");
//! ```

use std::fmt::Write as _;

use chrono::{DateTime, Datelike, FixedOffset, Timelike};

/// `Mon Jan _2 15:04:05 2006`
pub const ANSIC: &str = "Mon Jan _2 15:04:05 2006";
/// `Mon Jan _2 15:04:05 MST 2006`
pub const UNIX_DATE: &str = "Mon Jan _2 15:04:05 MST 2006";
/// `Mon Jan 02 15:04:05 -0700 2006`
pub const RUBY_DATE: &str = "Mon Jan 02 15:04:05 -0700 2006";
/// `02 Jan 06 15:04 MST`
pub const RFC822: &str = "02 Jan 06 15:04 MST";
/// `02 Jan 06 15:04 -0700`
pub const RFC822Z: &str = "02 Jan 06 15:04 -0700";
/// `Monday, 02-Jan-06 15:04:05 MST`
pub const RFC850: &str = "Monday, 02-Jan-06 15:04:05 MST";
/// `Mon, 02 Jan 2006 15:04:05 MST`
pub const RFC1123: &str = "Mon, 02 Jan 2006 15:04:05 MST";
/// `Mon, 02 Jan 2006 15:04:05 -0700`
pub const RFC1123Z: &str = "Mon, 02 Jan 2006 15:04:05 -0700";
/// `2006-01-02T15:04:05Z07:00`
pub const RFC3339: &str = "2006-01-02T15:04:05Z07:00";
/// `2006-01-02T15:04:05.999999999Z07:00`
pub const RFC3339_NANO: &str = "2006-01-02T15:04:05.999999999Z07:00";
/// `3:04PM`
pub const KITCHEN: &str = "3:04PM";
/// `Jan _2 15:04:05`
pub const STAMP: &str = "Jan _2 15:04:05";
/// `2006-01-02 15:04:05`
pub const DATE_TIME: &str = "2006-01-02 15:04:05";
/// `2006-01-02`
pub const DATE_ONLY: &str = "2006-01-02";
/// `15:04:05`
pub const TIME_ONLY: &str = "15:04:05";

/// Layout used when a time value is displayed without an explicit layout.
pub const DEFAULT_FORMAT: &str = "2006-01-02 15:04:05.999999999 -0700 MST";

const LONG_DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const LONG_MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A recognized layout token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// `January`
    LongMonth,
    /// `Jan`
    Month,
    /// `1`
    NumMonth,
    /// `01`
    ZeroMonth,
    /// `Monday`
    LongWeekDay,
    /// `Mon`
    WeekDay,
    /// `2`
    Day,
    /// `_2`
    UnderDay,
    /// `02`
    ZeroDay,
    /// `__2`
    UnderYearDay,
    /// `002`
    ZeroYearDay,
    /// `15`
    Hour,
    /// `3`
    Hour12,
    /// `03`
    ZeroHour12,
    /// `4`
    Minute,
    /// `04`
    ZeroMinute,
    /// `5`
    Second,
    /// `05`
    ZeroSecond,
    /// `2006`
    LongYear,
    /// `06`
    Year,
    /// `PM`
    UpperPm,
    /// `pm`
    LowerPm,
    /// `MST`
    ZoneName,
    /// `Z0700`, `Z07:00`, `Z07`, `Z070000`, `Z07:00:00`
    IsoOffset(OffsetStyle),
    /// `-0700`, `-07:00`, `-07`, `-070000`, `-07:00:00`
    NumOffset(OffsetStyle),
    /// Fractional seconds with separator, digit count, and whether trailing
    /// zeros are trimmed (`.999`) or kept (`.000`).
    Fraction {
        /// `.` or `,`
        separator: char,
        /// Number of digits, 1 to 9.
        digits: usize,
        /// `true` for the `9` form.
        trim: bool,
    },
}

/// Shape of a numeric UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetStyle {
    /// `07`
    Hours,
    /// `0700`
    HoursMinutes,
    /// `07:00`
    HoursColonMinutes,
    /// `070000`
    HoursMinutesSeconds,
    /// `07:00:00`
    HoursColonMinutesColonSeconds,
}

/// One piece of a parsed layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chunk<'a> {
    /// Text copied verbatim.
    Literal(&'a str),
    /// A token replaced by a component of the time.
    Token(Token),
}

/// Iterator splitting a layout string into literals and tokens.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    rest: &'a str,
}

/// Split `layout` into literal text and tokens.
pub const fn chunks(layout: &str) -> Chunks<'_> {
    Chunks { rest: layout }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        match find_token(self.rest) {
            Some((0, token, len)) => {
                self.rest = &self.rest[len..];
                Some(Chunk::Token(token))
            },
            Some((start, _, _)) => {
                let (literal, rest) = self.rest.split_at(start);
                self.rest = rest;
                Some(Chunk::Literal(literal))
            },
            None => {
                let literal = self.rest;
                self.rest = "";
                Some(Chunk::Literal(literal))
            },
        }
    }
}

/// Find the first token in `s`: its byte offset, kind and byte length.
///
/// Every token is ASCII, so the returned offsets are always char boundaries.
fn find_token(s: &str) -> Option<(usize, Token, usize)> {
    let b = s.as_bytes();
    (0..b.len()).find_map(|i| token_at(b, i).map(|(token, len)| (i, token, len)))
}

#[allow(clippy::too_many_lines)]
fn token_at(b: &[u8], i: usize) -> Option<(Token, usize)> {
    let rest = &b[i..];
    let starts = |prefix: &[u8]| rest.starts_with(prefix);

    match b[i] {
        b'J' if starts(b"Jan") => {
            if starts(b"January") {
                return Some((Token::LongMonth, 7));
            }
            // `Jan` followed by a lowercase letter is a word like "Janet".
            if !starts_with_lower(&rest[3..]) {
                return Some((Token::Month, 3));
            }
        },
        b'M' if starts(b"Mon") => {
            if starts(b"Monday") {
                return Some((Token::LongWeekDay, 6));
            }
            if !starts_with_lower(&rest[3..]) {
                return Some((Token::WeekDay, 3));
            }
        },
        b'M' if starts(b"MST") => return Some((Token::ZoneName, 3)),
        b'0' => {
            if let Some(&next @ b'1'..=b'6') = rest.get(1) {
                let token = match next {
                    b'1' => Token::ZeroMonth,
                    b'2' => Token::ZeroDay,
                    b'3' => Token::ZeroHour12,
                    b'4' => Token::ZeroMinute,
                    b'5' => Token::ZeroSecond,
                    _ => Token::Year,
                };
                return Some((token, 2));
            }
            if starts(b"002") {
                return Some((Token::ZeroYearDay, 3));
            }
        },
        b'1' => {
            if starts(b"15") {
                return Some((Token::Hour, 2));
            }
            return Some((Token::NumMonth, 1));
        },
        b'2' => {
            if starts(b"2006") {
                return Some((Token::LongYear, 4));
            }
            return Some((Token::Day, 1));
        },
        b'_' => {
            if starts(b"_2") {
                // `_2006` is a literal underscore followed by a year.
                if starts(b"_2006") {
                    return None;
                }
                return Some((Token::UnderDay, 2));
            }
            if starts(b"__2") {
                return Some((Token::UnderYearDay, 3));
            }
        },
        b'3' => return Some((Token::Hour12, 1)),
        b'4' => return Some((Token::Minute, 1)),
        b'5' => return Some((Token::Second, 1)),
        b'P' if starts(b"PM") => return Some((Token::UpperPm, 2)),
        b'p' if starts(b"pm") => return Some((Token::LowerPm, 2)),
        b'-' => return offset_at(rest, b"-").map(|(style, len)| (Token::NumOffset(style), len)),
        b'Z' => return offset_at(rest, b"Z").map(|(style, len)| (Token::IsoOffset(style), len)),
        sep @ (b'.' | b',') => {
            if let Some(&digit @ (b'0' | b'9')) = rest.get(1) {
                let digits = rest[1..].iter().take_while(|&&c| c == digit).count();
                let followed_by_digit = rest.get(1 + digits).is_some_and(u8::is_ascii_digit);
                if !followed_by_digit {
                    return Some((
                        Token::Fraction {
                            separator: char::from(sep),
                            digits: digits.min(9),
                            trim: digit == b'9',
                        },
                        1 + digits,
                    ));
                }
            }
        },
        _ => {},
    }
    None
}

fn offset_at(rest: &[u8], lead: &[u8]) -> Option<(OffsetStyle, usize)> {
    const FORMS: [(&[u8], OffsetStyle); 5] = [
        (b"070000", OffsetStyle::HoursMinutesSeconds),
        (b"07:00:00", OffsetStyle::HoursColonMinutesColonSeconds),
        (b"0700", OffsetStyle::HoursMinutes),
        (b"07:00", OffsetStyle::HoursColonMinutes),
        (b"07", OffsetStyle::Hours),
    ];
    let body = rest.strip_prefix(lead)?;
    FORMS
        .iter()
        .find(|(form, _)| body.starts_with(form))
        .map(|&(form, style)| (style, lead.len() + form.len()))
}

fn starts_with_lower(b: &[u8]) -> bool {
    b.first().is_some_and(u8::is_ascii_lowercase)
}

/// Render `time` according to a reference `layout`.
pub fn format(time: &DateTime<FixedOffset>, layout: &str) -> String {
    let mut out = String::with_capacity(layout.len() + 10);
    for chunk in chunks(layout) {
        match chunk {
            Chunk::Literal(text) => out.push_str(text),
            Chunk::Token(token) => write_token(&mut out, time, token),
        }
    }
    out
}

fn write_token(out: &mut String, time: &DateTime<FixedOffset>, token: Token) {
    let year = time.year();
    let hour = time.hour();
    // `write!` into a String never fails.
    let _ = match token {
        Token::LongYear => write_year(out, year),
        Token::Year => write!(out, "{:02}", year.rem_euclid(100)),
        Token::LongMonth => write!(out, "{}", LONG_MONTH_NAMES[time.month0() as usize]),
        Token::Month => write!(out, "{}", &LONG_MONTH_NAMES[time.month0() as usize][..3]),
        Token::NumMonth => write!(out, "{}", time.month()),
        Token::ZeroMonth => write!(out, "{:02}", time.month()),
        Token::LongWeekDay => write!(
            out,
            "{}",
            LONG_DAY_NAMES[time.weekday().num_days_from_sunday() as usize]
        ),
        Token::WeekDay => write!(
            out,
            "{}",
            &LONG_DAY_NAMES[time.weekday().num_days_from_sunday() as usize][..3]
        ),
        Token::Day => write!(out, "{}", time.day()),
        Token::UnderDay => write!(out, "{:>2}", time.day()),
        Token::ZeroDay => write!(out, "{:02}", time.day()),
        Token::UnderYearDay => write!(out, "{:>3}", time.ordinal()),
        Token::ZeroYearDay => write!(out, "{:03}", time.ordinal()),
        Token::Hour => write!(out, "{hour:02}"),
        Token::Hour12 => write!(out, "{}", hour12(hour)),
        Token::ZeroHour12 => write!(out, "{:02}", hour12(hour)),
        Token::Minute => write!(out, "{}", time.minute()),
        Token::ZeroMinute => write!(out, "{:02}", time.minute()),
        Token::Second => write!(out, "{}", time.second()),
        Token::ZeroSecond => write!(out, "{:02}", time.second()),
        Token::UpperPm => write!(out, "{}", if hour >= 12 { "PM" } else { "AM" }),
        Token::LowerPm => write!(out, "{}", if hour >= 12 { "pm" } else { "am" }),
        Token::ZoneName => {
            let offset = time.offset().local_minus_utc();
            if offset == 0 {
                write!(out, "UTC")
            } else {
                write_offset(out, offset, OffsetStyle::HoursMinutes)
            }
        },
        Token::IsoOffset(style) => {
            let offset = time.offset().local_minus_utc();
            if offset == 0 {
                write!(out, "Z")
            } else {
                write_offset(out, offset, style)
            }
        },
        Token::NumOffset(style) => write_offset(out, time.offset().local_minus_utc(), style),
        Token::Fraction {
            separator,
            digits,
            trim,
        } => {
            write_fraction(out, time.nanosecond(), separator, digits, trim);
            Ok(())
        },
    };
}

fn write_year(out: &mut String, year: i32) -> std::fmt::Result {
    if year < 0 {
        write!(out, "-{:04}", year.unsigned_abs())
    } else {
        write!(out, "{year:04}")
    }
}

const fn hour12(hour: u32) -> u32 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}

fn write_offset(out: &mut String, offset_secs: i32, style: OffsetStyle) -> std::fmt::Result {
    let sign = if offset_secs < 0 { '-' } else { '+' };
    let abs = offset_secs.unsigned_abs();
    let (hours, minutes, seconds) = (abs / 3600, abs / 60 % 60, abs % 60);
    match style {
        OffsetStyle::Hours => write!(out, "{sign}{hours:02}"),
        OffsetStyle::HoursMinutes => write!(out, "{sign}{hours:02}{minutes:02}"),
        OffsetStyle::HoursColonMinutes => write!(out, "{sign}{hours:02}:{minutes:02}"),
        OffsetStyle::HoursMinutesSeconds => {
            write!(out, "{sign}{hours:02}{minutes:02}{seconds:02}")
        },
        OffsetStyle::HoursColonMinutesColonSeconds => {
            write!(out, "{sign}{hours:02}:{minutes:02}:{seconds:02}")
        },
    }
}

fn write_fraction(out: &mut String, nanos: u32, separator: char, digits: usize, trim: bool) {
    // Leap-second nanos run past 1e9; clamp to the last representable instant.
    let nanos = nanos.min(999_999_999);
    let full = format!("{nanos:09}");
    let mut frac = &full[..digits];
    if trim {
        frac = frac.trim_end_matches('0');
        if frac.is_empty() {
            return;
        }
    }
    out.push(separator);
    out.push_str(frac);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn reference() -> DateTime<FixedOffset> {
        // The reference moment itself: Mon Jan 2 15:04:05 2006 at -07:00.
        FixedOffset::west_opt(7 * 3600)
            .unwrap()
            .with_ymd_and_hms(2006, 1, 2, 15, 4, 5)
            .unwrap()
    }

    fn sample() -> DateTime<FixedOffset> {
        Utc.with_ymd_and_hms(2019, 11, 9, 8, 7, 6)
            .unwrap()
            .fixed_offset()
    }

    #[test]
    fn test_reference_moment_formats_to_itself() {
        let t = reference();
        for layout in [RUBY_DATE, RFC822Z, RFC1123Z, KITCHEN, DATE_TIME, DATE_ONLY, TIME_ONLY] {
            assert_eq!(format(&t, layout), layout, "layout {layout}");
        }
        assert_eq!(format(&t, ANSIC), "Mon Jan  2 15:04:05 2006");
        assert_eq!(format(&t, RFC3339), "2006-01-02T15:04:05-07:00");
        assert_eq!(format(&t, RFC850), "Monday, 02-Jan-06 15:04:05 -0700");
    }

    #[test]
    fn test_common_layouts() {
        let t = sample();
        assert_eq!(format(&t, DATE_ONLY), "2019-11-09");
        assert_eq!(format(&t, DATE_TIME), "2019-11-09 08:07:06");
        assert_eq!(format(&t, RFC3339), "2019-11-09T08:07:06Z");
        assert_eq!(format(&t, RFC1123), "Sat, 09 Nov 2019 08:07:06 UTC");
        assert_eq!(format(&t, ANSIC), "Sat Nov  9 08:07:06 2019");
        assert_eq!(format(&t, "January 2, 2006"), "November 9, 2019");
        assert_eq!(format(&t, "Monday 3:04 PM"), "Saturday 8:07 AM");
        assert_eq!(format(&t, "1/2/06 3pm"), "11/9/19 8am");
    }

    #[test]
    fn test_day_of_year() {
        let t = sample();
        assert_eq!(format(&t, "002"), "313");
        let early = Utc.with_ymd_and_hms(2020, 1, 5, 0, 0, 0).unwrap().fixed_offset();
        assert_eq!(format(&early, "002"), "005");
        assert_eq!(format(&early, "__2"), "  5");
        assert_eq!(format(&early, "_2"), " 5");
    }

    #[test]
    fn test_offsets() {
        let t = FixedOffset::east_opt(5 * 3600 + 30 * 60)
            .unwrap()
            .with_ymd_and_hms(2020, 6, 1, 12, 0, 0)
            .unwrap();
        assert_eq!(format(&t, "-07"), "+05");
        assert_eq!(format(&t, "-0700"), "+0530");
        assert_eq!(format(&t, "-07:00"), "+05:30");
        assert_eq!(format(&t, "-07:00:00"), "+05:30:00");
        assert_eq!(format(&t, "Z07:00"), "+05:30");
        assert_eq!(format(&t, "MST"), "+0530");

        let utc = sample();
        assert_eq!(format(&utc, "Z0700"), "Z");
        assert_eq!(format(&utc, "-0700"), "+0000");
    }

    #[test]
    fn test_fractional_seconds() {
        let t = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_nano_opt(0, 0, 1, 120_000_000)
            .unwrap()
            .and_utc()
            .fixed_offset();
        assert_eq!(format(&t, "05.000"), "01.120");
        assert_eq!(format(&t, "05.999"), "01.12");
        assert_eq!(format(&t, "05,000000"), "01,120000");

        let whole = sample();
        assert_eq!(format(&whole, "05.999999999"), "06");
        assert_eq!(format(&whole, "05.000"), "06.000");
    }

    #[test]
    fn test_literals_pass_through() {
        let t = sample();
        assert_eq!(format(&t, "Year: 2006!"), "Year: 2019!");
        assert_eq!(format(&t, "Janet"), "Janet");
        assert_eq!(format(&t, "_2006"), "_2019");
        assert_eq!(format(&t, "été 2006"), "été 2019");
        assert_eq!(format(&t, ""), "");
    }

    #[test]
    fn test_chunks_split_tokens_and_literals() {
        let parts: Vec<_> = chunks("2006-01 at x").collect();
        assert_eq!(
            parts,
            vec![
                Chunk::Token(Token::LongYear),
                Chunk::Literal("-"),
                Chunk::Token(Token::ZeroMonth),
                Chunk::Literal(" at x"),
            ]
        );
    }

    #[test]
    fn test_default_format() {
        let t = NaiveDate::from_ymd_opt(2021, 2, 3)
            .unwrap()
            .and_hms_nano_opt(4, 5, 6, 500)
            .unwrap()
            .and_utc()
            .fixed_offset();
        assert_eq!(
            format(&t, DEFAULT_FORMAT),
            "2021-02-03 04:05:06.0000005 +0000 UTC"
        );
    }
}
