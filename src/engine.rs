//! The edit-graph search engine.
//!
//! [`Diff`] runs the Wu–Manber–Myers O(N·P) shortest-edit-script algorithm:
//! a greedy search over the edit graph of the two sequences, where P is the
//! number of deletions from the shorter sequence. For similar inputs P is
//! small and the search touches far fewer vertices than the classic O(ND)
//! formulation.
//!
//! The session normalizes its inputs so the shorter sequence is always
//! probed (`a`, length M) against the longer (`b`, length N); when the
//! caller's arguments arrive the other way round, a `reverse` flag is set
//! and all Add/Delete tags are swapped on output so results stay relative
//! to the caller's original order.
//!
//! Path reconstruction uses a back-pointer arena: every snake step records
//! a graph point `(x, y)` whose `prev` is an index into the same arena,
//! forming a chain back to the origin. The arena is bounded by a budget;
//! when exceeded, the already-resolved prefix of both sequences is kept and
//! the search restarts on the unresolved suffixes with fresh diagonal
//! state (see [`Diff::compose`]).

use crate::hunks::{self, UniHunk};
use crate::patch;
use crate::ses::{EditType, Lcs, Ses};

/// Default cap on the number of graph points retained for path
/// reconstruction before the search restarts on the unresolved suffix.
pub const MAX_COORDINATES_SIZE: usize = 2_000_000;

/// A vertex reached on the edit graph, with a back-pointer into the arena.
#[derive(Debug, Clone, Copy)]
struct Point {
    x: usize,
    y: usize,
    prev: Option<usize>,
}

/// A diff session over two sequences of `E`.
///
/// Construct with [`Diff::new`] (or [`DiffBuilder`](crate::DiffBuilder) for
/// the large-input options), run [`compose`](Diff::compose) once, then read
/// the results:
///
/// ```
/// use np_diff::Diff;
///
/// let a: Vec<char> = "strength".chars().collect();
/// let b: Vec<char> = "string".chars().collect();
/// let mut diff = Diff::new(&a, &b);
/// diff.compose();
///
/// assert_eq!(diff.edit_distance(), 4);
/// let lcs: String = diff.lcs().elements().iter().collect();
/// assert_eq!(lcs, "strng");
/// assert_eq!(diff.patch(&a), b);
/// ```
pub struct Diff<E> {
    /// Shorter sequence (engine order), length `m`.
    a: Vec<E>,
    /// Longer sequence (engine order), length `n`.
    b: Vec<E>,
    m: usize,
    n: usize,
    /// `n - m`; the diagonal the final vertex lies on.
    delta: usize,
    /// Diagonal-index shift (`m + 1`) so negative diagonals are addressable.
    offset: usize,
    /// Furthest `y` reached on each shifted diagonal; -1 means unvisited.
    fp: Vec<isize>,
    /// Latest arena slot recorded for each shifted diagonal.
    route: Vec<Option<usize>>,
    /// Back-pointer arena of graph points.
    arena: Vec<Point>,
    arena_budget: usize,
    huge: bool,
    reverse: bool,
    edit_distance: usize,
    lcs: Lcs<E>,
    ses: Ses<E>,
}

impl<E: Clone + PartialEq> Diff<E> {
    /// Create a session for `a` -> `b` with default options.
    pub fn new(a: &[E], b: &[E]) -> Self {
        Self::with_options(a, b, false, MAX_COORDINATES_SIZE)
    }

    pub(crate) fn with_options(a: &[E], b: &[E], huge: bool, arena_budget: usize) -> Self {
        // Keep the shorter sequence as `a`. Equal lengths also swap, so the
        // tag-swapping rule below covers them uniformly.
        let (a, b, reverse) = if a.len() < b.len() {
            (a.to_vec(), b.to_vec(), false)
        } else {
            (b.to_vec(), a.to_vec(), true)
        };
        // A one-point arena cannot outgrow the p=0 pass on diagonal 0, so
        // the restart would re-enter an identical state. Two points always
        // admit at least one p=1 step of progress.
        let arena_budget = arena_budget.max(2);
        let m = a.len();
        let n = b.len();
        let size = m + n + 3;
        Self {
            a,
            b,
            m,
            n,
            delta: n - m,
            offset: m + 1,
            fp: vec![-1; size],
            route: vec![None; size],
            arena: Vec::new(),
            arena_budget,
            huge,
            reverse,
            edit_distance: 0,
            lcs: Lcs::new(),
            ses: Ses::new(),
        }
    }

    /// Length of the shortest edit script found by [`compose`](Diff::compose).
    pub fn edit_distance(&self) -> usize {
        self.edit_distance
    }

    /// Longest common subsequence of the two inputs.
    pub fn lcs(&self) -> &Lcs<E> {
        &self.lcs
    }

    /// Shortest edit script, tagged relative to the caller's argument order.
    pub fn ses(&self) -> &Ses<E> {
        &self.ses
    }

    /// True if the caller's first argument was not the shorter sequence and
    /// the session swapped its inputs internally.
    pub fn is_reversed(&self) -> bool {
        self.reverse
    }

    /// Apply this session's edit script to `base`.
    ///
    /// See [`patch::apply`] for the contract; `base` must be the sequence
    /// the script was composed from (the caller's first argument).
    pub fn patch(&self, base: &[E]) -> Vec<E> {
        patch::apply(base, &self.ses)
    }

    /// Group this session's edit script into unified-format hunks.
    pub fn compose_hunks(&self) -> Vec<UniHunk<E>> {
        hunks::compose_hunks(&self.ses, self.reverse)
    }

    /// Run the O(N·P) search and record the LCS and the edit script.
    ///
    /// Iterates `p = 0, 1, 2, ...`, sweeping diagonals `-p ..= delta-1`
    /// upward, `delta+p ..= delta+1` downward, then `delta`, until the
    /// furthest point on diagonal `delta` reaches `y = N` or the arena
    /// passes its budget. Each pass contributes `delta + 2p` to the edit
    /// distance.
    ///
    /// On arena overflow the resolved prefix of the script is kept, both
    /// sequences shrink to their unresolved suffixes, and the search
    /// restarts from `p = 0` with fresh diagonal state. This bounds peak
    /// memory at the cost of re-searching the remainder; sessions built
    /// with the large-input option pre-reserve the arena up front.
    ///
    /// Calling `compose` a second time on the same session is not
    /// supported.
    pub fn compose(&mut self) {
        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!("diff_compose", m = self.m, n = self.n);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        if self.huge {
            self.arena.reserve(self.arena_budget + 50_000);
        }

        loop {
            let delta = self.delta as isize;
            let dd = self.di(delta);
            let mut p: isize = -1;
            loop {
                p += 1;
                let mut k = -p;
                while k <= delta - 1 {
                    let i = self.di(k);
                    self.fp[i] = self.snake(k);
                    k += 1;
                }
                let mut k = delta + p;
                while k >= delta + 1 {
                    let i = self.di(k);
                    self.fp[i] = self.snake(k);
                    k -= 1;
                }
                self.fp[dd] = self.snake(delta);

                if self.fp[dd] == self.n as isize || self.arena.len() >= self.arena_budget {
                    break;
                }
            }
            self.edit_distance += (delta + 2 * p) as usize;

            // The chain on the delta diagonal runs newest-to-oldest, so the
            // trace is replayed in reverse.
            debug_assert!(
                self.route[dd].is_some(),
                "delta diagonal has no recorded point after a search pass"
            );
            let mut trace = Vec::new();
            let mut r = self.route[dd];
            while let Some(idx) = r {
                let pt = self.arena[idx];
                trace.push((pt.x, pt.y));
                r = pt.prev;
            }

            if self.record_sequence(&trace) {
                return;
            }
            #[cfg(feature = "tracing")]
            tracing::trace!(
                remaining_a = self.m,
                remaining_b = self.n,
                "path arena passed its budget; restarting on the unresolved suffix"
            );
        }
    }

    #[inline]
    fn di(&self, k: isize) -> usize {
        (k + self.offset as isize) as usize
    }

    /// Advance diagonal `k`: pick the better of the `k-1`/`k+1` frontiers,
    /// slide down the free run of matches, and record the reached point.
    ///
    /// The tie-break is load-bearing: `above > below` takes `k-1`'s chain,
    /// an equal furthest point takes `k+1`'s. Swapping it would still yield
    /// a shortest script, but a different one.
    fn snake(&mut self, k: isize) -> isize {
        let above = self.fp[self.di(k - 1)] + 1;
        let below = self.fp[self.di(k + 1)];
        let prev = if above > below {
            self.route[self.di(k - 1)]
        } else {
            self.route[self.di(k + 1)]
        };

        let mut y = above.max(below);
        let mut x = y - k;
        while (x as usize) < self.m
            && (y as usize) < self.n
            && self.a[x as usize] == self.b[y as usize]
        {
            x += 1;
            y += 1;
        }

        let slot = self.di(k);
        self.route[slot] = Some(self.arena.len());
        self.arena.push(Point {
            x: x as usize,
            y: y as usize,
            prev,
        });
        y
    }

    /// Replay a coordinate trace into the LCS and the edit script.
    ///
    /// `trace` is newest-to-oldest; cursors `(px, py)` walk trace space
    /// while `(x_idx, y_idx)` are 1-based positions into `a`/`b`. Returns
    /// false if the trace did not reach the end of both sequences (arena
    /// overflow), in which case the session has already been truncated to
    /// the unresolved suffixes and reset for another pass.
    fn record_sequence(&mut self, trace: &[(usize, usize)]) -> bool {
        let mut x_idx = 1usize;
        let mut y_idx = 1usize;
        let mut px = 0usize;
        let mut py = 0usize;

        for &(vx, vy) in trace.iter().rev() {
            while px < vx || py < vy {
                let target = vy as isize - vx as isize;
                let cursor = py as isize - px as isize;
                if target > cursor {
                    let elem = self.b[y_idx - 1].clone();
                    if !self.reverse {
                        self.ses.add(elem, 0, y_idx, EditType::Add);
                    } else {
                        self.ses.add(elem, y_idx, 0, EditType::Delete);
                    }
                    y_idx += 1;
                    py += 1;
                } else if target < cursor {
                    let elem = self.a[x_idx - 1].clone();
                    if !self.reverse {
                        self.ses.add(elem, x_idx, 0, EditType::Delete);
                    } else {
                        self.ses.add(elem, 0, x_idx, EditType::Add);
                    }
                    x_idx += 1;
                    px += 1;
                } else {
                    let elem = self.a[x_idx - 1].clone();
                    self.lcs.add(elem.clone());
                    self.ses.add(elem, x_idx, y_idx, EditType::Common);
                    x_idx += 1;
                    y_idx += 1;
                    px += 1;
                    py += 1;
                }
            }
        }

        if x_idx > self.m && y_idx > self.n {
            return true;
        }

        // Arena overflow: keep the resolved prefix, shrink to the suffixes,
        // and reset all diagonal state. Stale back-pointers must not survive
        // into the next pass, so the arena is cleared rather than truncated.
        self.a.drain(..x_idx - 1);
        self.b.drain(..y_idx - 1);
        self.m = self.a.len();
        self.n = self.b.len();
        self.delta = self.n - self.m;
        self.offset = self.m + 1;
        let size = self.m + self.n + 3;
        self.fp.clear();
        self.fp.resize(size, -1);
        self.route.clear();
        self.route.resize(size, None);
        self.arena.clear();
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff_of(a: &[u8], b: &[u8]) -> Diff<u8> {
        let mut d = Diff::new(a, b);
        d.compose();
        d
    }

    #[test]
    fn empty_against_empty() {
        let d = diff_of(b"", b"");
        assert_eq!(d.edit_distance(), 0);
        assert!(d.ses().is_empty());
        assert!(d.lcs().is_empty());
    }

    #[test]
    fn empty_against_nonempty_is_all_adds() {
        let d = diff_of(b"", b"abc");
        assert_eq!(d.edit_distance(), 3);
        assert!(d.ses().is_only_add());
        assert!(d.lcs().is_empty());
        let tags: Vec<EditType> = d.ses().entries().iter().map(|e| e.info.edit).collect();
        assert_eq!(tags, vec![EditType::Add; 3]);
        // Add entries carry the after-side index only.
        let after: Vec<usize> = d.ses().entries().iter().map(|e| e.info.after_idx).collect();
        assert_eq!(after, vec![1, 2, 3]);
        assert!(d.ses().entries().iter().all(|e| e.info.before_idx == 0));
    }

    #[test]
    fn nonempty_against_empty_is_all_deletes() {
        let d = diff_of(b"abc", b"");
        assert_eq!(d.edit_distance(), 3);
        assert!(d.is_reversed());
        assert!(d.ses().is_only_delete());
        let before: Vec<usize> = d
            .ses()
            .entries()
            .iter()
            .map(|e| e.info.before_idx)
            .collect();
        assert_eq!(before, vec![1, 2, 3]);
        assert_eq!(d.patch(b"abc"), Vec::<u8>::new());
    }

    #[test]
    fn identical_inputs_are_pure_copy() {
        let d = diff_of(b"abc", b"abc");
        assert_eq!(d.edit_distance(), 0);
        assert!(d.ses().is_only_copy());
        assert!(!d.ses().is_change());
        assert_eq!(d.lcs().elements(), b"abc");
        // Commons carry both indices.
        for (i, e) in d.ses().entries().iter().enumerate() {
            assert_eq!(e.info.before_idx, i + 1);
            assert_eq!(e.info.after_idx, i + 1);
        }
    }

    #[test]
    fn single_replacement() {
        let d = diff_of(b"abcdef", b"abXdef");
        assert_eq!(d.edit_distance(), 2);
        assert_eq!(d.lcs().elements(), b"abdef");
        assert_eq!(d.patch(b"abcdef"), b"abXdef".to_vec());
    }

    #[test]
    fn reversed_session_stays_caller_relative() {
        // Longer first argument: the session swaps internally but the
        // script must still transform the caller's first argument.
        let d = diff_of(b"abcdef", b"ab");
        assert!(d.is_reversed());
        assert_eq!(d.edit_distance(), 4);
        assert!(d.ses().is_change());
        assert_eq!(d.patch(b"abcdef"), b"ab".to_vec());
    }

    #[test]
    fn restart_on_tiny_arena_budget() {
        // A two-point budget forces an overflow after the first pass; the
        // resolved common prefix must be kept and the suffix re-searched.
        let a = b"aaaax";
        let b = b"aaaayz";
        let mut d = Diff::with_options(a, b, false, 2);
        d.compose();
        assert_eq!(d.edit_distance(), 3);
        assert_eq!(d.patch(a), b.to_vec());
        assert_eq!(d.lcs().elements(), b"aaaa");
    }

    #[test]
    fn zero_arena_budget_is_clamped_and_terminates() {
        // delta == 0 with differing first elements: an unclamped budget of
        // 0 would break every pass after one point and restart in place.
        let mut d = Diff::with_options(b"x".as_slice(), b"y".as_slice(), false, 0);
        d.compose();
        assert_eq!(d.edit_distance(), 2);
        assert_eq!(d.patch(b"x"), b"y".to_vec());
    }

    #[test]
    fn restart_preserves_round_trip_both_directions() {
        let a = b"the quick brown fox jumps over the lazy dog";
        let b = b"the quick red fox leaps over a lazy dog";
        let mut d = Diff::with_options(a.as_slice(), b.as_slice(), false, 16);
        d.compose();
        assert_eq!(d.patch(a), b.to_vec());

        let mut rd = Diff::with_options(b.as_slice(), a.as_slice(), false, 16);
        rd.compose();
        assert_eq!(rd.patch(b), a.to_vec());
    }
}
