use regex::{Captures, Regex};

use crate::types::command::{AbsoluteFields, GrammarMatch, RelativeFields};

// Unit slots of the relative grammar, in the only order tokens may appear.
const YEARS: u8 = 0;
const MONTHS: u8 = 1;
const WEEKS: u8 = 2;
const DAYS: u8 = 3;
const HOURS: u8 = 4;
const MINUTES: u8 = 5;
const SECONDS: u8 = 6;

/// Line-anchored matcher for the two command grammars.
///
/// Both grammars start with the command marker (`#` + tag) followed by one
/// space and must cover a whole line of the normalized text:
///
/// - absolute: optional `[year-]month-day` date part, optional
///   `hour:minute[:second]` time part, either or both or neither;
/// - relative: an ordered subset of `Ny Nm Nw Nd Nh Nm Ns` magnitude+unit
///   tokens, with one optional space between the day-side and the
///   time-side tokens.
///
/// Absolute always wins over relative: a line like `3-15` must read as a
/// calendar date, not as "3 months" followed by garbage. Precedence is an
/// ordered pair of attempts, not pattern backtracking.
pub struct CommandGrammar {
    marker: String,
    absolute: Regex,
}

impl CommandGrammar {
    pub fn new(tag: &str) -> Self {
        let marker: String = format!("#{tag}");
        let absolute = Regex::new(&format!(
            r"^{marker} (?:(?:(?P<year>\d+)-)?(?P<month>\d+)-(?P<day>\d+))?(?:(?:\b| )(?P<hour>\d+):(?P<minute>\d+)(?::(?P<second>\d+))?)?$",
            marker = regex::escape(&marker),
        ))
        .expect("absolute grammar pattern is well-formed for any escaped tag");

        Self { marker, absolute }
    }

    /// Tries both grammars against every line of `text`, absolute first.
    ///
    /// A relative match that captured no field at all does not count; the
    /// scan keeps going and ends on [`GrammarMatch::NoMatch`] when no line
    /// carries a usable command.
    pub fn match_text(&self, text: &str) -> GrammarMatch {
        for line in text.lines() {
            if let Some(fields) = self.match_absolute_line(line) {
                return GrammarMatch::Absolute(fields);
            }
        }
        for line in text.lines() {
            if let Some(fields) = self.match_relative_line(line)
                && !fields.is_empty()
            {
                return GrammarMatch::Relative(fields);
            }
        }
        GrammarMatch::NoMatch
    }

    /// Whether the whole text is nothing but the delete directive.
    ///
    /// For a grammar match this requires every non-blank line to match the
    /// selected grammar; for the fallback, the text with every bare marker
    /// removed must trim to empty.
    pub fn is_pure_tag(&self, text: &str, matched: &GrammarMatch) -> bool {
        match matched {
            GrammarMatch::Absolute(_) => text
                .lines()
                .all(|line| line.trim().is_empty() || self.absolute.is_match(line)),
            GrammarMatch::Relative(_) => text
                .lines()
                .all(|line| line.trim().is_empty() || self.match_relative_line(line).is_some()),
            GrammarMatch::NoMatch => text.replace(&self.marker, "").trim().is_empty(),
        }
    }

    fn match_absolute_line(&self, line: &str) -> Option<AbsoluteFields> {
        let caps: Captures<'_> = self.absolute.captures(line)?;

        Some(AbsoluteFields {
            year: capture_u32(&caps, "year")?,
            month: capture_u32(&caps, "month")?,
            day: capture_u32(&caps, "day")?,
            hour: capture_u32(&caps, "hour")?,
            minute: capture_u32(&caps, "minute")?,
            second: capture_u32(&caps, "second")?,
        })
    }

    /// Hand-written scanner for the relative grammar.
    ///
    /// Returns `Some` for any line of the shape `#tag N<unit>...`, including
    /// one with zero tokens (`#tag ` and nothing else); the caller decides
    /// whether an empty capture counts.
    fn match_relative_line(&self, line: &str) -> Option<RelativeFields> {
        let rest: &str = line.strip_prefix(self.marker.as_str())?.strip_prefix(' ')?;

        // Lex into (count, unit) tokens; at most one single space may occur,
        // splitting the day-side tokens from the time-side tokens.
        let mut tokens: Vec<(u32, char)> = Vec::new();
        let mut seam: Option<usize> = None;
        let mut s: &str = rest;
        while !s.is_empty() {
            if let Some(stripped) = s.strip_prefix(' ') {
                if seam.is_some() {
                    return None;
                }
                seam = Some(tokens.len());
                s = stripped;
                continue;
            }
            let digits: usize = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
            if digits == 0 {
                return None;
            }
            let (count_str, tail) = s.split_at(digits);
            // a digit run too large for u32 disqualifies the whole line
            let count: u32 = count_str.parse().ok()?;
            let unit: char = tail.chars().next()?;
            if !matches!(unit, 'y' | 'm' | 'w' | 'd' | 'h' | 's') {
                return None;
            }
            tokens.push((count, unit));
            s = &tail[1..];
        }

        // Assign tokens to unit slots in fixed order.
        let mut fields = RelativeFields::default();
        let mut next_slot: u8 = YEARS;
        for (idx, &(count, unit)) in tokens.iter().enumerate() {
            let slot: u8 = match unit {
                'y' => YEARS,
                'w' => WEEKS,
                'd' => DAYS,
                'h' => HOURS,
                's' => SECONDS,
                'm' => {
                    // `m` reads as months only while the months slot is open
                    // and something day-sided (or the space seam) still
                    // follows; otherwise it reads as minutes.
                    let months_open: bool = next_slot <= MONTHS;
                    let later_unit: bool = tokens[idx + 1..]
                        .iter()
                        .any(|&(_, u)| matches!(u, 'm' | 'w' | 'd' | 'h'));
                    let seam_later: bool = seam.is_some_and(|at| at > idx);
                    if months_open && (later_unit || seam_later) {
                        MONTHS
                    } else {
                        MINUTES
                    }
                }
                _ => return None,
            };
            if slot < next_slot {
                return None;
            }
            if let Some(at) = seam {
                // day-side units may not follow the seam, nor time-side
                // units precede it
                if idx < at && slot > DAYS {
                    return None;
                }
                if idx >= at && slot < HOURS {
                    return None;
                }
            }
            let field: &mut Option<u32> = match slot {
                YEARS => &mut fields.years,
                MONTHS => &mut fields.months,
                WEEKS => &mut fields.weeks,
                DAYS => &mut fields.days,
                HOURS => &mut fields.hours,
                MINUTES => &mut fields.minutes,
                _ => &mut fields.seconds,
            };
            *field = Some(count);
            next_slot = slot + 1;
        }

        Some(fields)
    }
}

fn capture_u32(caps: &Captures<'_>, name: &str) -> Option<Option<u32>> {
    match caps.name(name) {
        // a digit run too large for u32 disqualifies the whole line
        Some(m) => m.as_str().parse::<u32>().ok().map(Some),
        None => Some(None),
    }
}
