//! Line- and word-level diff engine for comparing two revisions of a
//! text document.
//!
//! The crate is organized leaves first:
//!
//! - `tokenize`: splitting text into lines and word/whitespace runs
//! - `opcode`: alignment opcodes and their partition invariants
//! - `matcher`: heuristic LCS sequence alignment with autojunk
//! - `word_diff`: intra-line refinement of a changed line pair
//! - `summary`: ranked "most significant" added/removed lines
//! - `report`: structured diff rows, context trimming and statistics
//! - `normalize`: the canonical pre-diff cleanup step
//!
//! Every comparison is a pure, self-contained computation over two
//! input strings; there is no shared state between invocations.

pub mod matcher;
pub mod normalize;
pub mod opcode;
pub mod report;
pub mod summary;
pub mod tokenize;
pub mod word_diff;

pub use matcher::{Match, SequenceMatcher, align};
pub use normalize::normalize;
pub use opcode::{OpTag, Opcode, validate_opcodes};
pub use report::{
    DEFAULT_CONTEXT_WINDOW, DiffResult, DiffRow, DiffStats, diff_documents, diff_lines,
};
pub use summary::{SIGNIFICANT_CHANGES_LIMIT, significant_changes};
pub use word_diff::{SegmentTag, WordDiffSegment, word_diff};
