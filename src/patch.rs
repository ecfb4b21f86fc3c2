//! Patch application: reconstruct the "after" sequence from the "before"
//! sequence and an edit script.

use crate::ses::{EditType, Ses};

/// Apply `ses` to `base`, producing the patched sequence.
///
/// The walk keeps a cursor into `base`: `Add` emits the script's element
/// without consuming input, `Delete` consumes one base element without
/// emitting it, `Common` copies one base element through. Base elements
/// beyond the script's reach are retained unchanged.
///
/// For a script composed from `(a, b)`, `apply(a, ses) == b`. Scripts are
/// directional: applying to any sequence other than the one the script was
/// composed from is a contract violation and yields an unspecified result.
pub fn apply<E: Clone>(base: &[E], ses: &Ses<E>) -> Vec<E> {
    let mut patched = Vec::with_capacity(base.len() + ses.len());
    let mut rest = base.iter();

    for entry in ses.entries() {
        match entry.info.edit {
            EditType::Add => patched.push(entry.elem.clone()),
            EditType::Delete => {
                let skipped = rest.next();
                debug_assert!(skipped.is_some(), "edit script overran the base sequence");
            }
            EditType::Common => {
                if let Some(e) = rest.next() {
                    patched.push(e.clone());
                }
            }
        }
    }
    patched.extend(rest.cloned());
    patched
}
