use crate::matcher::SequenceMatcher;
use crate::opcode::OpTag;
use crate::tokenize::split_word_runs;
use derive_new::new;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SegmentTag {
    Equal,
    Add,
    Remove,
}

/// One inline segment of a word-level diff between two lines.
///
/// Concatenating the `Equal` and `Remove` segments in order reproduces
/// the base line exactly; `Equal` and `Add` reproduce the current line.
/// Tokenizing on whitespace runs keeps that invariant byte-exact.
#[derive(Debug, Clone, PartialEq, Eq, new)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordDiffSegment {
    pub tag: SegmentTag,
    pub text: String,
}

/// Refines one changed line pair into inline add/remove/equal segments.
pub fn word_diff(base_line: &str, current_line: &str) -> anyhow::Result<Vec<WordDiffSegment>> {
    if base_line.is_empty() && current_line.is_empty() {
        return Ok(Vec::new());
    }
    if base_line.is_empty() {
        return Ok(vec![WordDiffSegment::new(
            SegmentTag::Add,
            current_line.to_string(),
        )]);
    }
    if current_line.is_empty() {
        return Ok(vec![WordDiffSegment::new(
            SegmentTag::Remove,
            base_line.to_string(),
        )]);
    }

    let base_runs = split_word_runs(base_line)?;
    let current_runs = split_word_runs(current_line)?;
    let matcher = SequenceMatcher::new(&base_runs, &current_runs);

    let mut segments = Vec::new();
    for opcode in matcher.opcodes() {
        match opcode.tag {
            OpTag::Equal => segments.push(WordDiffSegment::new(
                SegmentTag::Equal,
                base_runs[opcode.a].concat(),
            )),
            OpTag::Replace => {
                segments.push(WordDiffSegment::new(
                    SegmentTag::Remove,
                    base_runs[opcode.a].concat(),
                ));
                segments.push(WordDiffSegment::new(
                    SegmentTag::Add,
                    current_runs[opcode.b].concat(),
                ));
            }
            OpTag::Delete => segments.push(WordDiffSegment::new(
                SegmentTag::Remove,
                base_runs[opcode.a].concat(),
            )),
            OpTag::Insert => segments.push(WordDiffSegment::new(
                SegmentTag::Add,
                current_runs[opcode.b].concat(),
            )),
        }
    }

    Ok(segments)
}
