//! Heading segmentation
//!
//! A heading marker is a bold label ending in a colon:
//!
//! ```text
//! marker := "**" label ":**"
//! label  := one or more characters other than '*'
//! ```
//!
//! Markers are matched left to right without overlap. At each position the
//! scanner either consumes a whole marker or advances by one character.

use crate::ScriptComponent;

/// Heading used when a script has no markers at all
pub const FALLBACK_HEADING: &str = "Introduction";

/// A marker found in the script (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Marker<'a> {
    start: usize,
    end: usize,
    label: &'a str,
}

/// Split a script into components.
///
/// Text between two markers belongs to the first one. Text before the first
/// marker is not part of any component. Without markers the whole trimmed
/// script becomes a single "Introduction" component.
pub fn segment(script: &str) -> Vec<ScriptComponent> {
    let markers = find_markers(script);
    if markers.is_empty() {
        return vec![ScriptComponent::new(FALLBACK_HEADING, script.trim())];
    }

    markers
        .iter()
        .enumerate()
        .map(|(i, marker)| {
            let body_end = markers.get(i + 1).map_or(script.len(), |next| next.start);
            ScriptComponent::new(marker.label.trim(), script[marker.end..body_end].trim())
        })
        .collect()
}

fn find_markers(script: &str) -> Vec<Marker<'_>> {
    let mut markers = Vec::new();
    let mut pos = 0;
    while pos < script.len() {
        match match_marker(script, pos) {
            Some(marker) => {
                pos = marker.end;
                markers.push(marker);
            }
            None => {
                pos += script[pos..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    markers
}

/// Try to match a marker starting exactly at `start`.
fn match_marker(script: &str, start: usize) -> Option<Marker<'_>> {
    let rest = script[start..].strip_prefix("**")?;
    let label_start = start + 2;

    // The label runs up to the next '*'; it can never contain one.
    let star = rest.find('*')?;
    let label = rest[..star].strip_suffix(':')?;
    if label.is_empty() || !rest[star..].starts_with("**") {
        return None;
    }

    Some(Marker {
        start,
        end: label_start + star + 2,
        label,
    })
}
