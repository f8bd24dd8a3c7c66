use derive_new::new;
use std::ops::Range;

/// Classification of one aligned region between two sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OpTag {
    Equal,
    Replace,
    Delete,
    Insert,
}

/// A tagged pair of half-open ranges, one into each sequence.
///
/// Read in order, the opcodes of an alignment partition both sequences
/// exactly: consecutive `a` ranges cover `0..a_len` with no gaps or
/// overlaps, and likewise the `b` ranges cover `0..b_len`.
#[derive(Debug, Clone, PartialEq, Eq, new)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Opcode {
    pub tag: OpTag,
    pub a: Range<usize>,
    pub b: Range<usize>,
}

/// Checks that an opcode list is a well-formed partition of `0..a_len`
/// and `0..b_len` and that each tag carries the range shape it promises.
///
/// A violation is a bug in the aligner, never a user-facing condition,
/// so callers propagate the error instead of truncating output.
pub fn validate_opcodes(opcodes: &[Opcode], a_len: usize, b_len: usize) -> anyhow::Result<()> {
    let mut a_pos = 0;
    let mut b_pos = 0;

    for opcode in opcodes {
        anyhow::ensure!(
            opcode.a.start <= opcode.a.end && opcode.b.start <= opcode.b.end,
            "opcode has inverted range: {opcode:?}"
        );
        anyhow::ensure!(
            opcode.a.start == a_pos && opcode.b.start == b_pos,
            "opcode leaves a gap at a={a_pos}, b={b_pos}: {opcode:?}"
        );

        match opcode.tag {
            OpTag::Equal => anyhow::ensure!(
                opcode.a.len() == opcode.b.len() && !opcode.a.is_empty(),
                "equal opcode must pair non-empty ranges of the same length: {opcode:?}"
            ),
            OpTag::Replace => anyhow::ensure!(
                !opcode.a.is_empty() && !opcode.b.is_empty(),
                "replace opcode must have both ranges non-empty: {opcode:?}"
            ),
            OpTag::Delete => anyhow::ensure!(
                !opcode.a.is_empty() && opcode.b.is_empty(),
                "delete opcode must consume only the base side: {opcode:?}"
            ),
            OpTag::Insert => anyhow::ensure!(
                opcode.a.is_empty() && !opcode.b.is_empty(),
                "insert opcode must consume only the current side: {opcode:?}"
            ),
        }

        a_pos = opcode.a.end;
        b_pos = opcode.b.end;
    }

    anyhow::ensure!(
        a_pos == a_len && b_pos == b_len,
        "opcodes cover a=0..{a_pos}, b=0..{b_pos}, expected a=0..{a_len}, b=0..{b_len}"
    );

    Ok(())
}
