use super::Lexicon;

/// Split text into sentences at `.`, `!` or `?` followed by whitespace or end of text
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            let at_break = chars.peek().is_none_or(|(_, next)| next.is_whitespace());
            if at_break {
                let end = i + c.len_utf8();
                let sentence = text[start..end].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence);
                }
                start = end;
            }
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }

    sentences
}

/// Pick the `max_sentences` sentences with the most lexicon hits
///
/// Selected sentences keep their original order. Earlier sentences win ties,
/// so text without any hits yields its opening sentences.
pub fn extractive_summary(lexicon: &Lexicon, text: &str, max_sentences: usize) -> String {
    let sentences = split_sentences(text);

    let mut ranked: Vec<(usize, usize)> = sentences
        .iter()
        .enumerate()
        .map(|(i, s)| (i, lexicon.count(s)))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut chosen: Vec<usize> = ranked
        .into_iter()
        .take(max_sentences)
        .map(|(i, _)| i)
        .collect();
    chosen.sort();

    chosen
        .into_iter()
        .map(|i| sentences[i])
        .collect::<Vec<_>>()
        .join(" ")
}
