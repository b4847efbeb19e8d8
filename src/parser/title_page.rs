use crate::models::{ElementKind, ScreenplayElement, TitlePageEntry};
use crate::utils::RULE_REGEX;

/// Outcome of scanning a document's leading lines for title-page content.
pub struct TitlePageParse {
    pub entries: Vec<TitlePageEntry>,
    /// How many leading lines the title page claimed; body parsing
    /// resumes after them.
    pub consumed_lines: usize,
}

/// Parses the title page, if the document opens with one.
///
/// Only the leading run of lines up to the first blank line is eligible,
/// and it counts as a title page when at least one line in it is a
/// directive (`Key:` or `Key: value`, key at column 0). A bare `Key:`
/// opens an entry that collects the following plain lines as values
/// until the next directive; `Key: value` is complete on its own line.
/// Plain lines with no open entry to receive them are dropped with the
/// block.
pub fn parse_title_page(lines: &[&str]) -> Option<TitlePageParse> {
    let block_len = lines.iter().take_while(|l| !l.trim().is_empty()).count();
    let block = &lines[..block_len];
    if !block.iter().any(|line| directive(line).is_some()) {
        return None;
    }

    // Label each contributing line first, then fold the labeled run into
    // entries. Keys keep their raw spelling here; canonicalization
    // happens at entry construction.
    let mut labeled: Vec<ScreenplayElement> = Vec::new();
    let mut open = false;
    for line in block {
        match directive(line) {
            Some((key, value)) => {
                labeled.push(ScreenplayElement::new(ElementKind::TitlePageKey, key));
                match value {
                    Some(value) => {
                        labeled.push(ScreenplayElement::new(ElementKind::TitlePageValue, value));
                        open = false;
                    }
                    None => open = true,
                }
            }
            None if open => {
                labeled.push(ScreenplayElement::new(ElementKind::TitlePageValue, line.trim()));
            }
            None => {}
        }
    }

    let mut entries: Vec<TitlePageEntry> = Vec::new();
    for element in labeled {
        match element.kind {
            ElementKind::TitlePageKey => entries.push(TitlePageEntry::new(&element.text)),
            ElementKind::TitlePageValue => {
                if let Some(entry) = entries.last_mut() {
                    entry.values.push(element.text);
                }
            }
            _ => {}
        }
    }

    Some(TitlePageParse {
        entries,
        consumed_lines: block_len,
    })
}

/// Splits a `Key:` / `Key: value` line, or `None` if the line is not a
/// directive. The key may contain spaces but never a colon; anything
/// after the first colon belongs to the value.
fn directive(line: &str) -> Option<(String, Option<String>)> {
    let caps = RULE_REGEX["title_directive"].captures(line)?;
    let key = caps[1].to_string();
    let value = caps[2].trim();
    if value.is_empty() {
        Some((key, None))
    } else {
        Some((key, Some(value.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_and_block_values() {
        let lines = vec!["Title: My Script", "Credit:", "    written by", "    A. Writer"];
        let parsed = parse_title_page(&lines).unwrap();
        assert_eq!(parsed.consumed_lines, 4);
        assert_eq!(parsed.entries.len(), 2);
        assert_eq!(parsed.entries[0].key, "title");
        assert_eq!(parsed.entries[0].values, vec!["My Script"]);
        assert_eq!(parsed.entries[1].key, "credit");
        assert_eq!(parsed.entries[1].values, vec!["written by", "A. Writer"]);
    }

    #[test]
    fn test_repeated_author_stays_separate_entries() {
        let lines = vec!["Author: Jane Doe", "Author: John Roe"];
        let parsed = parse_title_page(&lines).unwrap();
        assert_eq!(parsed.entries.len(), 2);
        assert_eq!(parsed.entries[0].key, "authors");
        assert_eq!(parsed.entries[0].values, vec!["Jane Doe"]);
        assert_eq!(parsed.entries[1].key, "authors");
        assert_eq!(parsed.entries[1].values, vec!["John Roe"]);
    }

    #[test]
    fn test_block_without_directive_is_not_a_title_page() {
        let lines = vec!["Just an action line.", "And another."];
        assert!(parse_title_page(&lines).is_none());
    }

    #[test]
    fn test_directive_anywhere_in_block_claims_it() {
        let lines = vec!["stray line", "Title: Found Late"];
        let parsed = parse_title_page(&lines).unwrap();
        assert_eq!(parsed.consumed_lines, 2);
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.entries[0].values, vec!["Found Late"]);
    }

    #[test]
    fn test_block_stops_at_blank_line() {
        let lines = vec!["Title: Short", "", "INT. HOUSE - DAY"];
        let parsed = parse_title_page(&lines).unwrap();
        assert_eq!(parsed.consumed_lines, 1);
        assert_eq!(parsed.entries.len(), 1);
    }

    #[test]
    fn test_inline_directive_closes_immediately() {
        let lines = vec!["Title: Mine", "    orphan continuation"];
        let parsed = parse_title_page(&lines).unwrap();
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.entries[0].values, vec!["Mine"]);
    }

    #[test]
    fn test_indented_directive_lookalike_is_a_value() {
        let lines = vec!["Notes:", "    Draft: 3"];
        let parsed = parse_title_page(&lines).unwrap();
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.entries[0].key, "notes");
        assert_eq!(parsed.entries[0].values, vec!["Draft: 3"]);
    }

    #[test]
    fn test_colon_in_value_belongs_to_value() {
        let lines = vec!["Contact: info@example.com:8080"];
        let parsed = parse_title_page(&lines).unwrap();
        assert_eq!(parsed.entries[0].key, "contact");
        assert_eq!(parsed.entries[0].values, vec!["info@example.com:8080"]);
    }
}
