use chrono::DateTime;
use chrono_tz::Tz;

/// Result of parsing one status body.
///
/// Produced per status and consumed immediately by the sweeper; nothing is
/// persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// The instant after which the status gets deleted.
    pub delete_at: DateTime<Tz>,
    /// True when the status is nothing but the delete directive, which also
    /// marks its reply parent for deletion.
    pub is_tagging_reply: bool,
}

/// Fields captured by the absolute grammar.
///
/// `None` means the field was not written in the command; absence is distinct
/// from zero and no field carries a default of its own. Defaulting against
/// the reference time happens in `core::resolve`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbsoluteFields {
    pub year: Option<u32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub second: Option<u32>,
}

/// Magnitudes captured by the relative grammar, one per unit token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelativeFields {
    pub years: Option<u32>,
    pub months: Option<u32>,
    pub weeks: Option<u32>,
    pub days: Option<u32>,
    pub hours: Option<u32>,
    pub minutes: Option<u32>,
    pub seconds: Option<u32>,
}

impl RelativeFields {
    /// True when no unit token was captured at all. Such a match does not
    /// count as a match; the caller keeps looking and may end up on the
    /// fallback rule.
    pub fn is_empty(&self) -> bool {
        self.years.is_none()
            && self.months.is_none()
            && self.weeks.is_none()
            && self.days.is_none()
            && self.hours.is_none()
            && self.minutes.is_none()
            && self.seconds.is_none()
    }
}

/// Outcome of trying both grammars against a status body, in precedence
/// order: absolute first, then relative, then nothing.
///
/// A deadline always derives from exactly one of these, never a blend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarMatch {
    Absolute(AbsoluteFields),
    Relative(RelativeFields),
    NoMatch,
}
