//! Positional placeholder parsing and substitution.
//!
//! A marker is `%` followed by a run of ASCII digits (`%0`, `%1`, `%12`).
//! Markers bind to arguments by rank: the lowest distinct marker number takes
//! the first argument, the next one the second, and so on. A template numbered
//! from `%0` therefore reads `%N` as `args[N]`, and one numbered from `%1`
//! behaves the same way shifted by one.
//!
//! Substitution is a single left-to-right pass. Argument text is copied
//! verbatim and never re-scanned, so an argument containing `%1` stays as is.

use std::collections::BTreeSet;

/// One lexical piece of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Text(&'a str),
    Marker { number: usize, raw: &'a str },
}

/// Splits a template into literal text and markers.
///
/// Digit runs too long for `usize` are kept as text.
fn segments(template: &str) -> Vec<Segment<'_>> {
    let bytes = template.as_bytes();
    let mut out = Vec::new();
    let mut text_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        let mut j = i + 1;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j == i + 1 {
            // lone '%'
            i += 1;
            continue;
        }
        let Ok(number) = template[i + 1..j].parse::<usize>() else {
            i = j;
            continue;
        };
        if text_start < i {
            out.push(Segment::Text(&template[text_start..i]));
        }
        out.push(Segment::Marker {
            number,
            raw: &template[i..j],
        });
        text_start = j;
        i = j;
    }

    if text_start < template.len() {
        out.push(Segment::Text(&template[text_start..]));
    }
    out
}

/// Result of a substitution together with the markers that had no argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub text: String,
    /// Marker numbers left verbatim, ascending and without duplicates.
    pub unmatched: Vec<usize>,
}

impl Substitution {
    pub fn is_complete(&self) -> bool {
        self.unmatched.is_empty()
    }
}

/// Substitutes `args` into `template`.
///
/// ```
/// use numerus::placeholder::substitute;
/// assert_eq!(substitute("Code %1 of %2", &["3", "10"]), "Code 3 of 10");
/// assert_eq!(substitute("%0 unread", &[] as &[&str]), "%0 unread");
/// ```
pub fn substitute<S: AsRef<str>>(template: &str, args: &[S]) -> String {
    substitute_with_report(template, args).text
}

/// Like [`substitute`], also returning which markers stayed unmatched.
pub fn substitute_with_report<S: AsRef<str>>(template: &str, args: &[S]) -> Substitution {
    let segments = segments(template);
    let ranks: Vec<usize> = segments
        .iter()
        .filter_map(|segment| match segment {
            Segment::Marker { number, .. } => Some(*number),
            Segment::Text(_) => None,
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut text = String::with_capacity(template.len());
    let mut unmatched = BTreeSet::new();
    for segment in segments {
        match segment {
            Segment::Text(literal) => text.push_str(literal),
            Segment::Marker { number, raw } => {
                // ranks is sorted and contains every marker number
                let rank = ranks.binary_search(&number).unwrap_or(usize::MAX);
                match args.get(rank) {
                    Some(arg) => text.push_str(arg.as_ref()),
                    None => {
                        text.push_str(raw);
                        unmatched.insert(number);
                    }
                }
            }
        }
    }

    Substitution {
        text,
        unmatched: unmatched.into_iter().collect(),
    }
}

/// Marker numbers in order of appearance, repeats included.
pub fn extract_placeholders(template: &str) -> Vec<usize> {
    segments(template)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Marker { number, .. } => Some(number),
            Segment::Text(_) => None,
        })
        .collect()
}

/// The set of distinct marker numbers, for comparing a translation against
/// its source.
pub fn placeholder_signature(template: &str) -> BTreeSet<usize> {
    extract_placeholders(template).into_iter().collect()
}
