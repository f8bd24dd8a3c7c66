use crate::opcode::{OpTag, Opcode};
use derive_new::new;
use std::collections::HashMap;
use std::hash::Hash;

/// Sequences longer than this enable the popularity heuristic.
const AUTOJUNK_MIN_LEN: usize = 200;

/// A contiguous block of tokens common to both sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct Match {
    pub a_start: usize,
    pub b_start: usize,
    pub len: usize,
}

impl Match {
    fn a_end(&self) -> usize {
        self.a_start + self.len
    }

    fn b_end(&self) -> usize {
        self.b_start + self.len
    }
}

/// Heuristic longest-common-subsequence aligner over two token slices.
///
/// The alignment repeatedly carves out the longest contiguous matching
/// block of a sub-rectangle and recurses on the regions before and after
/// it. The result is stable and reproducible but not guaranteed to be
/// edit-distance minimal, a deliberate trade-off for near-linear average
/// behaviour on long, repetitive text.
///
/// When `b` is longer than 200 tokens, token values occupying more than
/// one percent of it are considered "popular" and excluded from the
/// primary match index. Runs of popular tokens are still found by a
/// fallback scan when the primary index yields nothing, so an all-popular
/// region never degrades into a spurious replace of equal content.
#[derive(Debug)]
pub struct SequenceMatcher<'s, T> {
    a: &'s [T],
    b: &'s [T],
    b_index: HashMap<&'s T, Vec<usize>>,
    popular: HashMap<&'s T, Vec<usize>>,
}

impl<'s, T: Eq + Hash> SequenceMatcher<'s, T> {
    pub fn new(a: &'s [T], b: &'s [T]) -> Self {
        let mut b_index: HashMap<&T, Vec<usize>> = HashMap::new();
        for (j, token) in b.iter().enumerate() {
            b_index.entry(token).or_default().push(j);
        }

        let mut popular = HashMap::new();
        if b.len() > AUTOJUNK_MIN_LEN {
            let cutoff = b.len() / 100 + 1;
            let popular_tokens: Vec<&T> = b_index
                .iter()
                .filter(|(_, positions)| positions.len() > cutoff)
                .map(|(token, _)| *token)
                .collect();

            for token in popular_tokens {
                if let Some(positions) = b_index.remove(token) {
                    popular.insert(token, positions);
                }
            }
        }

        Self {
            a,
            b,
            b_index,
            popular,
        }
    }

    /// Finds the longest contiguous matching block within
    /// `[a_lo, a_hi) x [b_lo, b_hi)`.
    ///
    /// Ties are broken deterministically towards the smallest `a_start`,
    /// then the smallest `b_start`. A zero-length result means the
    /// rectangle has no common tokens reachable through either index.
    pub fn find_longest_match(&self, a_lo: usize, a_hi: usize, b_lo: usize, b_hi: usize) -> Match {
        let best = self.scan_rectangle(&self.b_index, a_lo, a_hi, b_lo, b_hi);

        if best.len == 0 && !self.popular.is_empty() {
            return self.scan_rectangle(&self.popular, a_lo, a_hi, b_lo, b_hi);
        }

        best
    }

    fn scan_rectangle(
        &self,
        index: &HashMap<&'s T, Vec<usize>>,
        a_lo: usize,
        a_hi: usize,
        b_lo: usize,
        b_hi: usize,
    ) -> Match {
        let mut best = Match::new(a_lo, b_lo, 0);
        // For each candidate `b` position, the length of the contiguous
        // match ending at the current `a` position.
        let mut run_lengths: HashMap<usize, usize> = HashMap::new();

        for i in a_lo..a_hi {
            let mut next_run_lengths = HashMap::new();

            if let Some(positions) = index.get(&self.a[i]) {
                for &j in positions {
                    if j < b_lo {
                        continue;
                    }
                    if j >= b_hi {
                        // Positions are sorted ascending
                        break;
                    }

                    let len = match j.checked_sub(1).and_then(|prev| run_lengths.get(&prev)) {
                        Some(run) => run + 1,
                        None => 1,
                    };
                    next_run_lengths.insert(j, len);

                    let candidate = Match::new(i + 1 - len, j + 1 - len, len);
                    if candidate.len > best.len
                        || (candidate.len == best.len
                            && (candidate.a_start, candidate.b_start)
                                < (best.a_start, best.b_start))
                    {
                        best = candidate;
                    }
                }
            }

            run_lengths = next_run_lengths;
        }

        best
    }

    /// All matching blocks in order, terminated by a zero-length sentinel
    /// at `(a.len(), b.len())`. Adjacent blocks are coalesced.
    fn matching_blocks(&self) -> Vec<Match> {
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];
        let mut found = Vec::new();

        while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
            let block = self.find_longest_match(a_lo, a_hi, b_lo, b_hi);
            if block.len == 0 {
                continue;
            }

            found.push(block);
            if a_lo < block.a_start && b_lo < block.b_start {
                pending.push((a_lo, block.a_start, b_lo, block.b_start));
            }
            if block.a_end() < a_hi && block.b_end() < b_hi {
                pending.push((block.a_end(), a_hi, block.b_end(), b_hi));
            }
        }

        found.sort_unstable_by_key(|block| (block.a_start, block.b_start));

        let mut blocks: Vec<Match> = Vec::new();
        for block in found {
            match blocks.last_mut() {
                Some(last) if last.a_end() == block.a_start && last.b_end() == block.b_start => {
                    last.len += block.len;
                }
                _ => blocks.push(block),
            }
        }

        blocks.push(Match::new(self.a.len(), self.b.len(), 0));
        blocks
    }

    /// Produces the ordered, gap-free opcode list for the full alignment.
    ///
    /// A gap on only one side becomes a delete or insert; a delete
    /// immediately followed by an insert over the same gap is merged into
    /// a single replace, so changed regions stay grouped.
    pub fn opcodes(&self) -> Vec<Opcode> {
        let mut opcodes: Vec<Opcode> = Vec::new();
        let mut a_pos = 0;
        let mut b_pos = 0;

        for block in self.matching_blocks() {
            if a_pos < block.a_start {
                opcodes.push(Opcode::new(OpTag::Delete, a_pos..block.a_start, b_pos..b_pos));
            }
            if b_pos < block.b_start {
                let insert = Opcode::new(
                    OpTag::Insert,
                    block.a_start..block.a_start,
                    b_pos..block.b_start,
                );

                match opcodes.last_mut() {
                    Some(last)
                        if last.tag == OpTag::Delete
                            && last.a.end == insert.a.start
                            && last.b.end == insert.b.start =>
                    {
                        last.tag = OpTag::Replace;
                        last.b.end = insert.b.end;
                    }
                    _ => opcodes.push(insert),
                }
            }

            if block.len > 0 {
                opcodes.push(Opcode::new(
                    OpTag::Equal,
                    block.a_start..block.a_end(),
                    block.b_start..block.b_end(),
                ));
            }

            a_pos = block.a_end();
            b_pos = block.b_end();
        }

        opcodes
    }
}

/// Aligns two token slices, returning the opcode list for the whole pair.
pub fn align<'s, T: Eq + Hash>(a: &'s [T], b: &'s [T]) -> Vec<Opcode> {
    SequenceMatcher::new(a, b).opcodes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcode::validate_opcodes;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn changed_document() -> (Vec<&'static str>, Vec<&'static str>) {
        (
            vec!["line1", "line2", "line3", "line4"],
            vec!["line2", "line3_modified", "line4", "line5"],
        )
    }

    #[rstest]
    fn aligning_changed_document_groups_replacements(
        changed_document: (Vec<&'static str>, Vec<&'static str>),
    ) {
        let (a, b) = changed_document;
        let opcodes = align(&a, &b);

        let expected = vec![
            Opcode::new(OpTag::Delete, 0..1, 0..0),
            Opcode::new(OpTag::Equal, 1..2, 0..1),
            Opcode::new(OpTag::Replace, 2..3, 1..2),
            Opcode::new(OpTag::Equal, 3..4, 2..3),
            Opcode::new(OpTag::Insert, 4..4, 3..4),
        ];
        assert_eq!(opcodes, expected);
    }

    #[test]
    fn identical_sequences_produce_one_equal_opcode() {
        let a = vec!["a", "b", "c"];
        let opcodes = align(&a, &a);

        assert_eq!(opcodes, vec![Opcode::new(OpTag::Equal, 0..3, 0..3)]);
    }

    #[test]
    fn empty_sequences_produce_no_opcodes() {
        let empty: Vec<&str> = Vec::new();
        assert_eq!(align(&empty, &empty), Vec::new());
    }

    #[test]
    fn one_sided_inputs_produce_single_opcode() {
        let lines = vec!["a", "b"];
        let empty: Vec<&str> = Vec::new();

        assert_eq!(
            align(&lines, &empty),
            vec![Opcode::new(OpTag::Delete, 0..2, 0..0)]
        );
        assert_eq!(
            align(&empty, &lines),
            vec![Opcode::new(OpTag::Insert, 0..0, 0..2)]
        );
    }

    #[test]
    fn disjoint_sequences_produce_single_replace() {
        let a = vec!["x", "y"];
        let b = vec!["p", "q", "r"];

        assert_eq!(align(&a, &b), vec![Opcode::new(OpTag::Replace, 0..2, 0..3)]);
    }

    #[test]
    fn ties_prefer_smallest_a_start_then_b_start() {
        // "b" matches at a positions 1 and 3; the leftmost block wins.
        let a = vec!["a", "b", "c", "b"];
        let b = vec!["b"];
        let matcher = SequenceMatcher::new(&a, &b);

        assert_eq!(matcher.find_longest_match(0, 4, 0, 1), Match::new(1, 0, 1));
    }

    #[test]
    fn popular_tokens_are_excluded_from_the_primary_index() {
        // 300 copies of the same token make it popular; the unique token
        // pair must still anchor the alignment.
        let mut a: Vec<String> = (0..300).map(|_| "filler".to_string()).collect();
        a[150] = "anchor".to_string();
        let mut b: Vec<String> = (0..300).map(|_| "filler".to_string()).collect();
        b[40] = "anchor".to_string();

        let matcher = SequenceMatcher::new(&a, &b);
        let block = matcher.find_longest_match(0, a.len(), 0, b.len());

        assert_eq!(block, Match::new(150, 40, 1));
    }

    #[test]
    fn all_popular_identical_sequences_fall_back_to_the_popular_index() {
        let a: Vec<String> = (0..300).map(|_| "filler".to_string()).collect();
        let b = a.clone();

        let matcher = SequenceMatcher::new(&a, &b);
        let opcodes = matcher.opcodes();

        assert_eq!(opcodes, vec![Opcode::new(OpTag::Equal, 0..300, 0..300)]);
    }

    #[test]
    fn repeated_calls_return_identical_opcodes() {
        let a = vec!["a", "b", "a", "b", "c"];
        let b = vec!["b", "a", "b", "d", "c"];
        let matcher = SequenceMatcher::new(&a, &b);

        assert_eq!(matcher.opcodes(), matcher.opcodes());
    }

    fn line_strategy() -> impl Strategy<Value = Vec<String>> {
        proptest::collection::vec("[abc]{0,2}", 0..30)
    }

    proptest! {
        #[test]
        fn prop_opcodes_partition_both_sequences(a in line_strategy(), b in line_strategy()) {
            let opcodes = align(&a, &b);
            prop_assert!(validate_opcodes(&opcodes, a.len(), b.len()).is_ok());
        }

        #[test]
        fn prop_equal_opcodes_pair_identical_tokens(a in line_strategy(), b in line_strategy()) {
            for opcode in align(&a, &b) {
                if opcode.tag == OpTag::Equal {
                    prop_assert_eq!(&a[opcode.a.clone()], &b[opcode.b.clone()]);
                }
            }
        }

        #[test]
        fn prop_replace_opcodes_never_pair_identical_tokens(a in line_strategy(), b in line_strategy()) {
            for opcode in align(&a, &b) {
                if opcode.tag == OpTag::Replace {
                    prop_assert_ne!(&a[opcode.a.clone()], &b[opcode.b.clone()]);
                }
            }
        }
    }
}
