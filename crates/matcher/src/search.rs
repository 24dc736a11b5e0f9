//! Built-in string matching for record values.
//!
//! Candidate text and query are folded the same way before comparison:
//! lowercased, and with `diacritics` on, canonically decomposed with the
//! combining marks U+0300..=U+036F removed. Folding can change the number of
//! chars, so each folded char remembers the char it came from and reported
//! indices always point into the original text.

use std::borrow::Cow;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use serde_json::Value;
use unicode_normalization::char::decompose_canonical;

use crate::types::{SearchMatch, SearchMode, SearchOptions};

const BASE_SCORE: i64 = 100;
const PREFIX_BONUS: i64 = 50;
const EXACT_BONUS: i64 = 25;
const MATCH_BONUS: i64 = 16;
const CONSECUTIVE_BONUS: i64 = 8;
const LENGTH_PENALTY_DIVISOR: i64 = 4;

/// Text a record value is searched as. Arrays, objects and null have none.
pub fn candidate_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(text) => Some(Cow::Borrowed(text.as_str())),
        Value::Number(number) => Some(Cow::Owned(number.to_string())),
        Value::Bool(flag) => Some(Cow::Owned(flag.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Match `query` against `text` with the given options.
pub fn search(query: &str, text: &str, options: &SearchOptions) -> Option<SearchMatch> {
    let candidate = Folded::new(text, options.diacritics);
    let pattern = Folded::new(query, options.diacritics);
    match options.mode {
        SearchMode::Strict => strict(&pattern.chars, &candidate),
        SearchMode::Loose => {
            let pattern: Vec<char> = pattern.chars.into_iter().filter(|c| *c != ' ').collect();
            loose(&pattern, &candidate)
        }
        SearchMode::Fuzzy => fuzzy(&pattern.chars, &candidate),
    }
}

struct Folded {
    chars: Vec<char>,
    origin: Vec<usize>,
}

impl Folded {
    fn new(text: &str, diacritics: bool) -> Self {
        let mut chars = Vec::with_capacity(text.len());
        let mut origin = Vec::with_capacity(text.len());
        for (idx, ch) in text.chars().enumerate() {
            let mut push = |c: char| {
                for lower in c.to_lowercase() {
                    chars.push(lower);
                    origin.push(idx);
                }
            };
            if diacritics {
                decompose_canonical(ch, |d| {
                    if !is_combining_diacritic(d) {
                        push(d);
                    }
                });
            } else {
                push(ch);
            }
        }
        Self { chars, origin }
    }

    /// Map folded positions back to original char indices.
    fn original_indices(&self, folded: impl IntoIterator<Item = usize>) -> Vec<usize> {
        let mut indices: Vec<usize> = Vec::new();
        for pos in folded {
            let idx = self.origin[pos];
            if indices.last() != Some(&idx) {
                indices.push(idx);
            }
        }
        indices
    }
}

fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

fn strict(pattern: &[char], candidate: &Folded) -> Option<SearchMatch> {
    if pattern.is_empty() || pattern.len() > candidate.chars.len() {
        return None;
    }
    let start = candidate
        .chars
        .windows(pattern.len())
        .position(|window| window == pattern)?;

    let extra = (candidate.chars.len() - pattern.len()) as i64;
    let mut score = BASE_SCORE - start as i64 - extra / LENGTH_PENALTY_DIVISOR;
    if start == 0 {
        score += PREFIX_BONUS;
    }
    if extra == 0 {
        score += EXACT_BONUS;
    }

    Some(SearchMatch {
        score,
        indices: candidate.original_indices(start..start + pattern.len()),
    })
}

fn loose(pattern: &[char], candidate: &Folded) -> Option<SearchMatch> {
    if pattern.is_empty() {
        return None;
    }
    let mut cursor = 0;
    let mut hits = Vec::with_capacity(pattern.len());
    for (pos, ch) in candidate.chars.iter().enumerate() {
        if cursor == pattern.len() {
            break;
        }
        if *ch == pattern[cursor] {
            hits.push(pos);
            cursor += 1;
        }
    }
    if cursor < pattern.len() {
        return None;
    }

    let first = hits[0];
    let last = hits[hits.len() - 1];
    let gaps = (last - first + 1 - hits.len()) as i64;
    let consecutive = hits.windows(2).filter(|pair| pair[1] == pair[0] + 1).count() as i64;
    let mut score = hits.len() as i64 * MATCH_BONUS + consecutive * CONSECUTIVE_BONUS
        - gaps
        - first as i64;
    if first == 0 {
        score += PREFIX_BONUS;
    }

    Some(SearchMatch {
        score,
        indices: candidate.original_indices(hits),
    })
}

fn fuzzy(pattern: &[char], candidate: &Folded) -> Option<SearchMatch> {
    if pattern.is_empty() {
        return None;
    }
    let choice: String = candidate.chars.iter().collect();
    let pattern: String = pattern.iter().collect();
    let matcher = SkimMatcherV2::default().ignore_case();
    let (score, positions) = matcher.fuzzy_indices(&choice, &pattern)?;
    Some(SearchMatch {
        score,
        indices: candidate.original_indices(positions),
    })
}

/// Wrap each run of highlighted chars in `open`/`close` markers.
///
/// `indices` are char positions as reported in [`SearchMatch::indices`] and
/// must be ascending.
pub fn highlight(text: &str, indices: &[usize], open: &str, close: &str) -> String {
    let mut out = String::with_capacity(text.len() + indices.len() * (open.len() + close.len()));
    let mut pending = indices.iter().peekable();
    let mut inside = false;
    for (idx, ch) in text.chars().enumerate() {
        let hit = pending.peek() == Some(&&idx);
        if hit {
            pending.next();
        }
        if hit && !inside {
            out.push_str(open);
        } else if !hit && inside {
            out.push_str(close);
        }
        inside = hit;
        out.push(ch);
    }
    if inside {
        out.push_str(close);
    }
    out
}
