//! Keyword screens applied to every inbound message.
//!
//! All checks are plain substring/regex tests evaluated in a fixed order;
//! the first match decides.

use std::sync::LazyLock;

use itmo_advisor_shared::Program;
use regex::Regex;

/// Domain stems: course, curriculum/plan, elective, semester, vacancy,
/// program, magistracy, thesis, credit.
static RELEVANT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)курс|учебн|план|выборн|семестр|вакан|программ|магистр|вкр|зач")
        .expect("relevance regex")
});

/// Elective / recommendation request stems.
static RECOMMEND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)выборн|рекоменд").expect("recommendation regex"));

/// Whether the message is about the programs at all.
pub fn is_relevant(text: &str) -> bool {
    RELEVANT_RE.is_match(text)
}

/// Pick the program a message is about. Defaults to [`Program::Ai`].
pub fn resolve_program(text: &str) -> Program {
    let lower = text.to_lowercase();
    if lower.contains("ai product") || lower.contains("product") {
        Program::AiProduct
    } else {
        Program::Ai
    }
}

/// Whether the message asks for elective recommendations.
pub fn is_recommendation_request(text: &str) -> bool {
    RECOMMEND_RE.is_match(text)
}

/// Longest command name Telegram recognises.
const MAX_COMMAND_LEN: usize = 32;

/// Name of the bot command in `text`, if it is one.
///
/// `/start`, `/start@advisor_bot` and `/start payload` all yield `start`.
/// Only `[A-Za-z0-9_]{1,32}` names count as commands; anything else after a
/// slash (e.g. `/курсы`) is ordinary text.
pub fn command_name(text: &str) -> Option<&str> {
    let token = text.split_whitespace().next()?;
    let name = token.strip_prefix('/')?;
    let name = name.split('@').next().unwrap_or(name);
    let valid = !name.is_empty()
        && name.len() <= MAX_COMMAND_LEN
        && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_');
    valid.then_some(name)
}
