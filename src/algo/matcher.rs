//! Child list matcher
//!
//! Pairs live children with target children using a greedy, single-direction,
//! earliest-match scan (no keys, no LCS):
//!
//! ```text
//! pool = live children, in order
//! for t in target:
//!     k = first pool offset structurally equal to t
//!     found     -> Remove(pool[..k]) ... Keep(pool[k], t); pool = pool[k+1..]
//!     not found -> Insert(t); pool untouched
//! leftover pool -> Remove(...)
//! ```
//!
//! With duplicate equal siblings the earlier live node always wins the earlier
//! target slot. The result is then run through [`merge_replacements`], which
//! folds an adjacent removal/insertion couple into one `Replace`. That trades
//! the removed node's identity for one mutation instead of two.

/// One entry of the edit plan, in application order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<L, T> {
    /// Structurally equal pair, live node kept as is
    Keep { live: L, target: T },
    /// Live node without counterpart
    Remove(L),
    /// Target node without counterpart
    Insert(T),
    /// Merged removal + insertion occupying the same slot
    Replace { live: L, target: T },
}

impl<L: Copy, T: Copy> Step<L, T> {
    /// Live side of the step
    #[inline]
    pub fn live(&self) -> Option<L> {
        match *self {
            Step::Keep { live, .. } | Step::Replace { live, .. } | Step::Remove(live) => Some(live),
            Step::Insert(_) => None,
        }
    }

    /// Target side of the step
    #[inline]
    pub fn target(&self) -> Option<T> {
        match *self {
            Step::Keep { target, .. } | Step::Replace { target, .. } | Step::Insert(target) => {
                Some(target)
            }
            Step::Remove(_) => None,
        }
    }
}

/// Greedy earliest-match pairing followed by the replace-merge pass
pub fn match_children<L, T, F>(live: &[L], target: &[T], eq: F) -> Vec<Step<L, T>>
where
    L: Copy,
    T: Copy,
    F: FnMut(L, T) -> bool,
{
    merge_replacements(pair_children(live, target, eq))
}

/// Greedy earliest-match pairing (without merging)
pub fn pair_children<L, T, F>(live: &[L], target: &[T], mut eq: F) -> Vec<Step<L, T>>
where
    L: Copy,
    T: Copy,
    F: FnMut(L, T) -> bool,
{
    let mut steps = Vec::with_capacity(live.len().max(target.len()));
    let mut front = 0;

    for &t in target {
        match live[front..].iter().position(|&l| eq(l, t)) {
            Some(offset) => {
                let found = front + offset;
                steps.extend(live[front..found].iter().map(|&l| Step::Remove(l)));
                steps.push(Step::Keep {
                    live: live[found],
                    target: t,
                });
                front = found + 1;
            }
            None => steps.push(Step::Insert(t)),
        }
    }

    steps.extend(live[front..].iter().map(|&l| Step::Remove(l)));
    steps
}

/// Fold adjacent `Remove`/`Insert` couples (either order) into `Replace`
pub fn merge_replacements<L, T>(steps: Vec<Step<L, T>>) -> Vec<Step<L, T>>
where
    L: Copy,
    T: Copy,
{
    let mut merged = Vec::with_capacity(steps.len());
    let mut iter = steps.into_iter().peekable();

    while let Some(step) = iter.next() {
        let replacement = match (&step, iter.peek()) {
            (&Step::Remove(live), Some(&Step::Insert(target)))
            | (&Step::Insert(target), Some(&Step::Remove(live))) => Some(Step::Replace { live, target }),
            _ => None,
        };
        match replacement {
            Some(replace) => {
                iter.next();
                merged.push(replace);
            }
            None => merged.push(step),
        }
    }

    merged
}
