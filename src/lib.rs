//! Sequence differencing via the Wu–Manber–Myers O(N·P) algorithm.
//!
//! This crate computes the minimal difference between two ordered sequences
//! of any `Clone + PartialEq` element type — lines of text, characters,
//! tokens — and exposes it three ways:
//!
//! 1. The **shortest edit script** ([`Ses`]): an ordered list of
//!    Add/Delete/Common operations with 1-based positions, plus O(1)
//!    classification queries (pure insertion, pure deletion, identical).
//! 2. The **longest common subsequence** ([`Lcs`]) and the edit distance.
//! 3. **Unified-format hunks** ([`UniHunk`]): contiguous change groups with
//!    up to three lines of context, rendered in the familiar
//!    `@@ -a,b +c,d @@` form.
//!
//! An edit script can also be applied back to its base sequence with
//! [`patch::apply`] to reconstruct the target.
//!
//! ## Quick start
//! ```
//! use np_diff::{hunks, Diff};
//!
//! let a: Vec<&str> = vec!["one", "two", "three"];
//! let b: Vec<&str> = vec!["one", "2", "three"];
//!
//! let mut diff = Diff::new(&a, &b);
//! diff.compose();
//!
//! assert_eq!(diff.edit_distance(), 2);
//! assert_eq!(diff.lcs().elements(), ["one", "three"]);
//! assert_eq!(diff.patch(&a), b);
//!
//! let text = hunks::render(&diff.compose_hunks());
//! assert_eq!(text, "@@ -1,3 +1,3 @@\n one\n-two\n+2\n three\n");
//! ```
//!
//! ## Large inputs
//! The path-reconstruction arena is bounded (2,000,000 graph points by
//! default). When very large, very different inputs exhaust it, the session
//! keeps the resolved prefix and restarts the search on the remainder, so
//! memory stays bounded without failing. Callers diffing multi-megabyte
//! sequences should opt into [`DiffBuilder::huge`], which pre-reserves the
//! arena once instead of growing it.
//!
//! Sessions are self-contained and single-threaded; independent sessions
//! may run on separate threads with no coordination.

pub mod builder;
pub mod engine;
pub mod hunks;
pub mod patch;
pub mod ses;

pub use crate::builder::DiffBuilder;
pub use crate::engine::{Diff, MAX_COORDINATES_SIZE};
pub use crate::hunks::{UniHunk, CONTEXT_SIZE, SEPARATE_SIZE};
pub use crate::ses::{EditType, ElemInfo, Lcs, Ses, SesElem};
