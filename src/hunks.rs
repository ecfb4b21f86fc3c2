//! Unified-format hunk composition and rendering.
//!
//! [`compose_hunks`] scans an edit script once and groups its changes into
//! [`UniHunk`] display hunks: a change block surrounded by at most
//! [`CONTEXT_SIZE`] lines of context, with nearby change blocks merged into
//! one hunk when fewer than [`SEPARATE_SIZE`] common lines separate them.
//! [`render`] turns the hunks into the familiar textual form:
//!
//! ```text
//! @@ -1,6 +1,6 @@
//!  ab
//! -c
//! +X
//!  de
//! ```

use std::fmt::{self, Write as _};

use crate::ses::{EditType, Ses, SesElem};

/// Number of consecutive common entries that closes a hunk after a change
/// block.
pub const SEPARATE_SIZE: usize = 3;
/// Maximum number of leading-context entries collected before a change.
pub const CONTEXT_SIZE: usize = 3;

/// One display hunk: `@@ -before_start,before_len +after_start,after_len @@`
/// plus its context and change entries.
///
/// `before_len`/`after_len` count every entry the hunk spans on that side,
/// leading context included. Trailing common lines produced while deciding
/// whether to close the hunk live inside `change` with a `Common` tag;
/// `trailing` is kept for symmetry of the rendered form.
#[derive(Debug, Clone)]
pub struct UniHunk<E> {
    pub before_start: usize,
    pub before_len: usize,
    pub after_start: usize,
    pub after_len: usize,
    pub leading: Vec<SesElem<E>>,
    pub change: Vec<SesElem<E>>,
    pub trailing: Vec<SesElem<E>>,
}

impl<E> UniHunk<E> {
    /// Entries of the hunk in display order.
    pub fn entries(&self) -> impl Iterator<Item = &SesElem<E>> {
        self.leading
            .iter()
            .chain(self.change.iter())
            .chain(self.trailing.iter())
    }
}

/// Group an edit script into unified-format hunks.
///
/// `reversed` must be the composing session's
/// [`is_reversed`](crate::Diff::is_reversed) flag; common entries carry
/// their positions in engine order, so header starts are swapped back here
/// to describe the caller's original direction.
///
/// A hunk is closed once [`SEPARATE_SIZE`] consecutive common entries have
/// been confirmed after a change block (looking ahead one window to decide),
/// or at the end of the script. Commons that fail the confirmation are
/// folded into the change block instead, merging what would otherwise be
/// two adjacent hunks. Header starts of 0 (a change at the very beginning)
/// are bumped to 1.
pub fn compose_hunks<E: Clone>(ses: &Ses<E>, reversed: bool) -> Vec<UniHunk<E>> {
    let entries = ses.entries();
    let length = entries.len();

    let mut hunks: Vec<UniHunk<E>> = Vec::new();
    let mut leading: Vec<SesElem<E>> = Vec::new();
    let mut trailing: Vec<SesElem<E>> = Vec::new();
    let mut change: Vec<SesElem<E>> = Vec::new();
    let mut adds: Vec<SesElem<E>> = Vec::new();
    let mut deletes: Vec<SesElem<E>> = Vec::new();

    // Header fields: starts (a, c) and side lengths (b, d).
    let mut a = 0usize;
    let mut b = 0usize;
    let mut c = 0usize;
    let mut d = 0usize;
    // Consecutive commons seen since the change block started closing.
    let mut middle = 0usize;
    let mut in_change = false;
    let mut closing = false;

    for (i, entry) in entries.iter().enumerate() {
        let l_cnt = i + 1;
        match entry.info.edit {
            EditType::Add => {
                middle = 0;
                adds.push(entry.clone());
                in_change = true;
                d += 1;
                if l_cnt >= length {
                    change.extend(deletes.drain(..));
                    change.extend(adds.drain(..));
                    closing = true;
                }
            }
            EditType::Delete => {
                middle = 0;
                deletes.push(entry.clone());
                in_change = true;
                b += 1;
                if l_cnt >= length {
                    change.extend(deletes.drain(..));
                    change.extend(adds.drain(..));
                    closing = true;
                }
            }
            EditType::Common => {
                b += 1;
                d += 1;
                if trailing.is_empty() && adds.is_empty() && deletes.is_empty() && change.is_empty()
                {
                    if leading.len() < CONTEXT_SIZE {
                        if a == 0 && c == 0 {
                            a = entry.info.before_idx;
                            c = entry.info.after_idx;
                        }
                        leading.push(entry.clone());
                    } else {
                        // Ring: evict the oldest context line and shift the
                        // header start past it.
                        leading.remove(0);
                        leading.push(entry.clone());
                        a += 1;
                        c += 1;
                        b -= 1;
                        d -= 1;
                    }
                }
                if in_change && !closing {
                    middle += 1;
                    change.extend(deletes.drain(..));
                    change.extend(adds.drain(..));
                    change.push(entry.clone());
                    if middle >= SEPARATE_SIZE || l_cnt >= length {
                        closing = true;
                    }
                }
            }
        }

        if closing && !change.is_empty() {
            // Confirm the separation: the window of up to SEPARATE_SIZE
            // entries starting at the current one must be all common,
            // otherwise the next change is near enough to fold into this
            // hunk. The window shrinks at the end of the script; an
            // all-common remainder still confirms, so tail context never
            // grows past the cap.
            let window = &entries[i..(i + SEPARATE_SIZE).min(length)];
            let commons = window
                .iter()
                .filter(|e| e.info.edit == EditType::Common)
                .count();
            if commons < window.len() && l_cnt < length {
                middle = 0;
                closing = false;
                continue;
            }

            if leading.len() >= SEPARATE_SIZE {
                let excess = leading.len() - SEPARATE_SIZE;
                leading.drain(..excess);
                a += excess;
                c += excess;
            }
            if a == 0 {
                a = 1;
            }
            if c == 0 {
                c = 1;
            }
            if reversed {
                std::mem::swap(&mut a, &mut c);
            }
            hunks.push(UniHunk {
                before_start: a,
                before_len: b,
                after_start: c,
                after_len: d,
                leading: std::mem::take(&mut leading),
                change: std::mem::take(&mut change),
                trailing: std::mem::take(&mut trailing),
            });

            in_change = false;
            closing = false;
            adds.clear();
            deletes.clear();
            a = 0;
            b = 0;
            c = 0;
            d = 0;
            middle = 0;
        }
    }

    hunks
}

/// Render hunks in unified textual form.
///
/// Exactly three one-character line markers are used: `-` for deletes, `+`
/// for adds and a space for common lines.
pub fn render<E: fmt::Display>(hunks: &[UniHunk<E>]) -> String {
    let mut out = String::new();
    for hunk in hunks {
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "@@ -{},{} +{},{} @@",
            hunk.before_start, hunk.before_len, hunk.after_start, hunk.after_len
        );
        for e in &hunk.leading {
            let _ = writeln!(out, " {}", e.elem);
        }
        for e in &hunk.change {
            let mark = match e.info.edit {
                EditType::Delete => '-',
                EditType::Add => '+',
                EditType::Common => ' ',
            };
            let _ = writeln!(out, "{}{}", mark, e.elem);
        }
        for e in &hunk.trailing {
            let _ = writeln!(out, " {}", e.elem);
        }
    }
    out
}
