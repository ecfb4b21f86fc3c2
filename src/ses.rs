//! Edit-script and LCS containers.
//!
//! A diff session produces two ordered results:
//! - [`Lcs`]: the elements of a longest common subsequence, in the order
//!   they occur in both inputs.
//! - [`Ses`]: the shortest edit script, a sequence of [`SesElem`] entries
//!   tagged [`Delete`](EditType::Delete), [`Common`](EditType::Common) or
//!   [`Add`](EditType::Add).
//!
//! `Ses` additionally maintains three classification flags that are folded
//! in as entries are appended, so "is this diff a pure insertion?" style
//! queries are O(1) reads rather than scans. The flags are monotone: once
//! one turns false it stays false for the lifetime of the script.

/// Kind of a single edit operation.
///
/// `Common` is a first-class outcome: runs of matching elements are part of
/// the script, carrying positions in both sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditType {
    /// Element present in the "before" sequence only.
    Delete,
    /// Element present in both sequences.
    Common,
    /// Element present in the "after" sequence only.
    Add,
}

/// Positional metadata attached to each script entry.
///
/// Indices are 1-based; the side an operation does not touch is left at the
/// sentinel 0. `Delete` carries `before_idx`, `Add` carries `after_idx`,
/// `Common` carries both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElemInfo {
    pub before_idx: usize,
    pub after_idx: usize,
    pub edit: EditType,
}

/// One edit-script entry: an element plus its [`ElemInfo`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SesElem<E> {
    pub elem: E,
    pub info: ElemInfo,
}

/// Longest common subsequence of the two input sequences.
#[derive(Debug, Clone, Default)]
pub struct Lcs<E> {
    seq: Vec<E>,
}

impl<E> Lcs<E> {
    pub fn new() -> Self {
        Self { seq: Vec::new() }
    }

    /// Append the next common element.
    pub fn add(&mut self, elem: E) {
        self.seq.push(elem);
    }

    /// Elements of the subsequence, in occurrence order.
    pub fn elements(&self) -> &[E] {
        &self.seq
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }
}

/// Shortest edit script: ordered entries plus cached classification flags.
#[derive(Debug, Clone)]
pub struct Ses<E> {
    seq: Vec<SesElem<E>>,
    only_add: bool,
    only_delete: bool,
    only_copy: bool,
}

impl<E> Default for Ses<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Ses<E> {
    pub fn new() -> Self {
        Self {
            seq: Vec::new(),
            only_add: true,
            only_delete: true,
            only_copy: true,
        }
    }

    /// Append an entry and fold its tag into the classification flags.
    pub fn add(&mut self, elem: E, before_idx: usize, after_idx: usize, edit: EditType) {
        self.seq.push(SesElem {
            elem,
            info: ElemInfo {
                before_idx,
                after_idx,
                edit,
            },
        });
        match edit {
            EditType::Delete => {
                self.only_copy = false;
                self.only_add = false;
            }
            EditType::Common => {
                self.only_add = false;
                self.only_delete = false;
            }
            EditType::Add => {
                self.only_delete = false;
                self.only_copy = false;
            }
        }
    }

    /// Script entries in order.
    pub fn entries(&self) -> &[SesElem<E>] {
        &self.seq
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// True while no `Delete` or `Common` entry has been appended.
    pub fn is_only_add(&self) -> bool {
        self.only_add
    }

    /// True while no `Add` or `Common` entry has been appended.
    pub fn is_only_delete(&self) -> bool {
        self.only_delete
    }

    /// True while no `Add` or `Delete` entry has been appended.
    pub fn is_only_copy(&self) -> bool {
        self.only_copy
    }

    /// True if the script consists of a single kind of operation.
    pub fn is_only_one_operation(&self) -> bool {
        self.only_add || self.only_delete || self.only_copy
    }

    /// True if the script changes anything at all.
    pub fn is_change(&self) -> bool {
        !self.only_copy
    }
}
