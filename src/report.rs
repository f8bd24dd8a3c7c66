use crate::matcher::SequenceMatcher;
use crate::normalize::normalize;
use crate::opcode::{OpTag, validate_opcodes};
use crate::summary::{SIGNIFICANT_CHANGES_LIMIT, significant_changes};
use crate::tokenize::split_lines;
use crate::word_diff::{WordDiffSegment, word_diff};

/// The conventional context window for trimmed output. Callers wanting
/// every unchanged line pass `None` instead.
pub const DEFAULT_CONTEXT_WINDOW: usize = 3;

/// One display unit of a structured diff.
///
/// `line_num` counts emitted rows sequentially rather than reflecting a
/// source position; consumers depend on that numbering, so context
/// trimming makes the counter skip nothing even though it drops lines.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum DiffRow {
    Equal {
        line_num: usize,
        text: String,
    },
    Change {
        line_num: usize,
        base_text: String,
        current_text: String,
        word_diff: Vec<WordDiffSegment>,
    },
    Remove {
        line_num: usize,
        base_text: String,
    },
    Add {
        line_num: usize,
        current_text: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiffStats {
    pub total_rows: usize,
    pub added: usize,
    pub removed: usize,
    pub changed: usize,
    pub identical: bool,
    pub total_changes: usize,
}

/// The full structured comparison of two document versions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiffResult {
    pub rows: Vec<DiffRow>,
    pub stats: DiffStats,
    pub significant_added: Vec<String>,
    pub significant_removed: Vec<String>,
}

/// Compares two pre-normalized documents line by line.
///
/// `window` limits how many trailing lines of each unchanged block are
/// emitted; `None` emits every line. Dropped context lines are gone from
/// the result, not merely hidden. Two empty documents yield a valid
/// result with zero rows and `identical = true`.
pub fn diff_lines(base: &str, current: &str, window: Option<usize>) -> anyhow::Result<DiffResult> {
    let base_lines = split_lines(base);
    let current_lines = split_lines(current);

    let matcher = SequenceMatcher::new(&base_lines, &current_lines);
    let opcodes = matcher.opcodes();
    validate_opcodes(&opcodes, base_lines.len(), current_lines.len())?;

    let mut rows = Vec::new();
    let mut line_num = 0;

    for opcode in &opcodes {
        match opcode.tag {
            OpTag::Equal => {
                let block_len = opcode.a.len();
                let shown = match window {
                    Some(window) => window.min(block_len),
                    None => block_len,
                };

                for i in opcode.a.end - shown..opcode.a.end {
                    line_num += 1;
                    rows.push(DiffRow::Equal {
                        line_num,
                        text: base_lines[i].to_string(),
                    });
                }
            }
            OpTag::Replace => {
                // Pair lines by position, padding the shorter side with
                // an empty string.
                for offset in 0..opcode.a.len().max(opcode.b.len()) {
                    line_num += 1;

                    let base_text = if opcode.a.start + offset < opcode.a.end {
                        base_lines[opcode.a.start + offset]
                    } else {
                        ""
                    };
                    let current_text = if opcode.b.start + offset < opcode.b.end {
                        current_lines[opcode.b.start + offset]
                    } else {
                        ""
                    };

                    rows.push(DiffRow::Change {
                        line_num,
                        base_text: base_text.to_string(),
                        current_text: current_text.to_string(),
                        word_diff: word_diff(base_text, current_text)?,
                    });
                }
            }
            OpTag::Delete => {
                for i in opcode.a.clone() {
                    line_num += 1;
                    rows.push(DiffRow::Remove {
                        line_num,
                        base_text: base_lines[i].to_string(),
                    });
                }
            }
            OpTag::Insert => {
                for j in opcode.b.clone() {
                    line_num += 1;
                    rows.push(DiffRow::Add {
                        line_num,
                        current_text: current_lines[j].to_string(),
                    });
                }
            }
        }
    }

    let added = rows
        .iter()
        .filter(|row| matches!(row, DiffRow::Add { .. }))
        .count();
    let removed = rows
        .iter()
        .filter(|row| matches!(row, DiffRow::Remove { .. }))
        .count();
    let changed = rows
        .iter()
        .filter(|row| matches!(row, DiffRow::Change { .. }))
        .count();

    // Judged on the raw inputs, independently of row emission.
    let identical = base == current;
    let (significant_added, significant_removed) = if identical {
        (Vec::new(), Vec::new())
    } else {
        significant_changes(&base_lines, &current_lines, SIGNIFICANT_CHANGES_LIMIT)
    };

    Ok(DiffResult {
        stats: DiffStats {
            total_rows: rows.len(),
            added,
            removed,
            changed,
            identical,
            total_changes: added + removed + changed,
        },
        rows,
        significant_added,
        significant_removed,
    })
}

/// Normalizes both documents, then diffs them.
///
/// Mirrors the canonical caller sequence: clean both sides with
/// [`normalize`], then hand the cleaned text to [`diff_lines`].
pub fn diff_documents(
    base: &str,
    current: &str,
    window: Option<usize>,
) -> anyhow::Result<DiffResult> {
    diff_lines(&normalize(base), &normalize(current), window)
}
