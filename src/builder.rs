use crate::engine::{Diff, MAX_COORDINATES_SIZE};

/// Builder for [`Diff`] sessions that need non-default options.
///
/// ```
/// use np_diff::DiffBuilder;
///
/// let a: Vec<u8> = b"abc".to_vec();
/// let b: Vec<u8> = b"abd".to_vec();
/// let mut diff = DiffBuilder::new(&a, &b).huge(true).build();
/// diff.compose();
/// assert_eq!(diff.edit_distance(), 2);
/// ```
pub struct DiffBuilder<'a, E> {
    a: &'a [E],
    b: &'a [E],
    huge: bool,
    arena_budget: Option<usize>,
}

impl<'a, E: Clone + PartialEq> DiffBuilder<'a, E> {
    pub fn new(a: &'a [E], b: &'a [E]) -> Self {
        Self {
            a,
            b,
            huge: false,
            arena_budget: None,
        }
    }

    /// Large-input mode: pre-reserve the path arena up to the budget so the
    /// search does not reallocate while it grows.
    pub fn huge(mut self, huge: bool) -> Self {
        self.huge = huge;
        self
    }

    /// Override the path arena budget (default
    /// [`MAX_COORDINATES_SIZE`]). Lowering it trades repeated
    /// restart passes for a smaller peak footprint; it is also the knob
    /// tests use to exercise the restart path on small inputs. Budgets
    /// below 2 are raised to 2, the smallest arena the search can make
    /// progress with.
    pub fn arena_budget(mut self, budget: usize) -> Self {
        self.arena_budget = Some(budget);
        self
    }

    pub fn build(self) -> Diff<E> {
        Diff::with_options(
            self.a,
            self.b,
            self.huge,
            self.arena_budget.unwrap_or(MAX_COORDINATES_SIZE),
        )
    }
}
