use tracing::debug;

use crate::models::{Speaker, Transcript, Turn};

/// Perform Stage 0: split raw dialogue into speaker turns
///
/// A line opens a new turn when it starts (ignoring case) with `Doctor:`,
/// `Physician:` or `Patient:`. Other non-blank lines continue the most
/// recent turn; lines before the first header have no turn and are dropped.
pub fn segment(raw_text: &str) -> Transcript {
    let mut turns = Vec::new();
    let mut current: Option<(Speaker, Vec<&str>)> = None;
    let mut orphans = 0usize;

    for line in raw_text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some((speaker, opening)) = parse_header(line) {
            if let Some((speaker, parts)) = current.take() {
                turns.push(close_turn(speaker, parts));
            }
            current = Some((speaker, vec![opening]));
        } else if let Some((_, parts)) = current.as_mut() {
            parts.push(line);
        } else {
            orphans += 1;
        }
    }

    if let Some((speaker, parts)) = current {
        turns.push(close_turn(speaker, parts));
    }

    if orphans > 0 {
        debug!("Dropped {} line(s) before the first speaker header", orphans);
    }

    Transcript::new(turns)
}

/// Split a header line into its speaker and the turn's opening text
fn parse_header(line: &str) -> Option<(Speaker, &str)> {
    let (label, rest) = line.split_once(':')?;
    let speaker = Speaker::from_label(label)?;
    Some((speaker, rest.trim_start()))
}

fn close_turn(speaker: Speaker, parts: Vec<&str>) -> Turn {
    let text = parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    Turn::new(speaker, text)
}
