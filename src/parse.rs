use chrono::DateTime;
use chrono_tz::Tz;
use tracing::debug;

use crate::core::content;
use crate::core::grammar::CommandGrammar;
use crate::core::resolve;
use crate::types::command::{GrammarMatch, ParsedCommand};

/// Parses the self-destruct command embedded in a status body.
///
/// The raw HTML body is flattened to plain text, then both command grammars
/// are tried line by line in fixed precedence (absolute before relative).
/// A matching command yields its resolved deadline plus the pure-tag flag;
/// anything else — no marker, trailing prose on the command line, an
/// impossible date — falls back to one calendar day past `reference`.
///
/// # Parameters
/// - `grammar`: compiled matcher for the configured command tag.
/// - `html`: the status body as the platform stores it.
/// - `reference`: the status's last-modified instant in the configured
///   timezone; all defaulting and relative arithmetic is based on it.
///
/// # Behavior & Invariants
/// - Never fails: malformed or absent commands always produce the fallback
///   deadline rather than an error.
/// - The deadline derives from exactly one grammar match or the fallback
///   rule, never a mix of both grammars.
/// - `is_tagging_reply` is true only when the whole normalized text is the
///   delete directive itself, in which case the sweeper also deletes the
///   status this one replies to.
pub fn parse(grammar: &CommandGrammar, html: &str, reference: DateTime<Tz>) -> ParsedCommand {
    let text: String = content::plain_text(html);

    let matched: GrammarMatch = grammar.match_text(&text);
    let delete_at: Option<DateTime<Tz>> = match &matched {
        GrammarMatch::Absolute(fields) => {
            debug!("Using absolute pattern");
            resolve::resolve_absolute(fields, reference)
        }
        GrammarMatch::Relative(fields) => {
            debug!("Using relative pattern");
            resolve::resolve_relative(fields, reference)
        }
        GrammarMatch::NoMatch => None,
    };

    match delete_at {
        Some(delete_at) => ParsedCommand {
            delete_at,
            is_tagging_reply: grammar.is_pure_tag(&text, &matched),
        },
        // no usable command on any line: one day past the reference
        None => {
            debug!("Using default pattern");
            ParsedCommand {
                delete_at: resolve::fallback(reference),
                is_tagging_reply: grammar.is_pure_tag(&text, &GrammarMatch::NoMatch),
            }
        }
    }
}
