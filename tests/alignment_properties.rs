use proptest::prelude::*;
use revdiff::{OpTag, align, validate_opcodes, word_diff};

fn document_strategy() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-d ]{0,6}", 0..40)
}

proptest! {
    #[test]
    fn opcodes_partition_both_documents(a in document_strategy(), b in document_strategy()) {
        let opcodes = align(&a, &b);
        prop_assert!(validate_opcodes(&opcodes, a.len(), b.len()).is_ok());
    }

    #[test]
    fn opcode_ranges_reconstruct_both_documents(a in document_strategy(), b in document_strategy()) {
        let opcodes = align(&a, &b);

        let rebuilt_a: Vec<String> = opcodes
            .iter()
            .flat_map(|op| a[op.a.clone()].to_vec())
            .collect();
        let rebuilt_b: Vec<String> = opcodes
            .iter()
            .flat_map(|op| b[op.b.clone()].to_vec())
            .collect();

        prop_assert_eq!(rebuilt_a, a);
        prop_assert_eq!(rebuilt_b, b);
    }

    #[test]
    fn alignment_is_deterministic(a in document_strategy(), b in document_strategy()) {
        prop_assert_eq!(align(&a, &b), align(&a, &b));
    }

    #[test]
    fn equal_blocks_carry_identical_content(a in document_strategy(), b in document_strategy()) {
        for op in align(&a, &b) {
            if op.tag == OpTag::Equal {
                prop_assert_eq!(&a[op.a.clone()], &b[op.b.clone()]);
            }
        }
    }

    #[test]
    fn word_segments_round_trip_through_both_lines(
        base in "[a-c \t]{0,30}",
        current in "[a-c \t]{0,30}",
    ) {
        let segments = word_diff(&base, &current).unwrap();

        let rebuilt_base: String = segments
            .iter()
            .filter(|s| s.tag != revdiff::SegmentTag::Add)
            .map(|s| s.text.as_str())
            .collect();
        let rebuilt_current: String = segments
            .iter()
            .filter(|s| s.tag != revdiff::SegmentTag::Remove)
            .map(|s| s.text.as_str())
            .collect();

        prop_assert_eq!(rebuilt_base, base);
        prop_assert_eq!(rebuilt_current, current);
    }
}
