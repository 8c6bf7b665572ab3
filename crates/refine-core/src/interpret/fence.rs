//! Fenced code block extraction.
//!
//! Fences pair up in order of appearance. The tag is the run of
//! non-whitespace characters directly after an opening fence; a block with
//! no whitespace at all inside (```` ```x=1``` ````) is untagged.

const FENCE: &str = "```";

/// One fenced block, borrowed from the reply text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FencedBlock<'a> {
    /// Language tag, empty when the block is untagged.
    pub tag: &'a str,
    /// Everything between the tag and the closing fence, untrimmed.
    pub body: &'a str,
}

impl FencedBlock<'_> {
    pub fn is_tagged(&self) -> bool {
        !self.tag.is_empty()
    }
}

/// All closed fenced blocks in `text`, in order. An unclosed trailing fence is ignored.
pub fn fenced_blocks(text: &str) -> Vec<FencedBlock<'_>> {
    let mut blocks = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find(FENCE) {
        let after_open = &rest[open + FENCE.len()..];
        let Some(close) = after_open.find(FENCE) else {
            break;
        };
        let inner = &after_open[..close];

        let (tag, body) = match inner.find(char::is_whitespace) {
            Some(split) => inner.split_at(split),
            None => ("", inner),
        };
        blocks.push(FencedBlock { tag, body });

        rest = &after_open[close + FENCE.len()..];
    }

    blocks
}

/// Trimmed body of the first block tagged `language`, else of the first untagged block.
pub(crate) fn extract_code(text: &str, language: &str) -> Option<String> {
    let blocks = fenced_blocks(text);
    let chosen = blocks
        .iter()
        .find(|b| b.is_tagged() && b.tag.eq_ignore_ascii_case(language))
        .or_else(|| blocks.iter().find(|b| !b.is_tagged()))?;

    let code = chosen.body.trim();
    if code.is_empty() {
        None
    } else {
        Some(code.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_tag_from_body() {
        let blocks = fenced_blocks("intro\n```python\nprint(1)\n```\n```\nraw\n```");
        assert_eq!(
            blocks,
            vec![
                FencedBlock {
                    tag: "python",
                    body: "\nprint(1)\n"
                },
                FencedBlock {
                    tag: "",
                    body: "\nraw\n"
                },
            ]
        );
    }

    #[test]
    fn single_line_blocks() {
        assert_eq!(
            fenced_blocks("```x=1```"),
            vec![FencedBlock { tag: "", body: "x=1" }]
        );
        assert_eq!(
            fenced_blocks("```python print(2)```"),
            vec![FencedBlock {
                tag: "python",
                body: " print(2)"
            }]
        );
    }

    #[test]
    fn unclosed_fence_is_ignored() {
        assert!(fenced_blocks("```python\nprint(1)\n").is_empty());
        assert_eq!(fenced_blocks("```a\n1\n``` and ```b\n2").len(), 1);
    }

    #[test]
    fn tagged_block_preferred_over_earlier_untagged() {
        let text = "```\nfirst\n```\n```python\nsecond\n```";
        assert_eq!(extract_code(text, "python"), Some("second".to_string()));
    }

    #[test]
    fn tag_match_ignores_case() {
        let text = "```PYTHON\nprint(2)\n```";
        assert_eq!(extract_code(text, "python"), Some("print(2)".to_string()));
    }

    #[test]
    fn untagged_block_is_the_fallback() {
        let text = "```\n  print(3)  \n```";
        assert_eq!(extract_code(text, "python"), Some("print(3)".to_string()));
    }

    #[test]
    fn other_languages_are_skipped() {
        let text = "```json\n{\"a\": 1}\n```";
        assert_eq!(extract_code(text, "python"), None);

        let text = "```js\nalert(1)\n```\n```\nprint(4)\n```";
        assert_eq!(extract_code(text, "python"), Some("print(4)".to_string()));
    }

    #[test]
    fn empty_block_is_not_code() {
        assert_eq!(extract_code("```python\n   \n```", "python"), None);
        assert_eq!(extract_code("``````", "python"), None);
    }
}
