use crate::matcher::SequenceMatcher;
use crate::opcode::OpTag;

/// How many lines each significance bag keeps by default.
pub const SIGNIFICANT_CHANGES_LIMIT: usize = 5;

/// Extracts the most significant added and removed lines, position
/// insensitively.
///
/// This is a content summary, not a structural diff: a line that merely
/// moved is matched by the aligner and lands in neither bag, so the
/// counts here can disagree with the row-level statistics. Longer lines
/// are presumed more informative and rank first; the sort is stable, so
/// equally long lines keep their document order.
pub fn significant_changes(
    base_lines: &[&str],
    current_lines: &[&str],
    top_n: usize,
) -> (Vec<String>, Vec<String>) {
    let matcher = SequenceMatcher::new(base_lines, current_lines);

    let mut added = Vec::new();
    let mut removed = Vec::new();
    for opcode in matcher.opcodes() {
        match opcode.tag {
            OpTag::Equal => {}
            OpTag::Delete => {
                removed.extend(opcode.a.clone().map(|i| base_lines[i].to_string()));
            }
            OpTag::Insert => {
                added.extend(opcode.b.clone().map(|j| current_lines[j].to_string()));
            }
            OpTag::Replace => {
                removed.extend(opcode.a.clone().map(|i| base_lines[i].to_string()));
                added.extend(opcode.b.clone().map(|j| current_lines[j].to_string()));
            }
        }
    }

    rank_by_length(&mut added, top_n);
    rank_by_length(&mut removed, top_n);

    (added, removed)
}

fn rank_by_length(lines: &mut Vec<String>, top_n: usize) {
    lines.sort_by(|left, right| right.chars().count().cmp(&left.chars().count()));
    lines.truncate(top_n);
}
