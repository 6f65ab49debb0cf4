use crate::intersect::PairSet;
use crate::shape::{Axis, AABB};
use std::cmp::Ordering;

/// Sweep and prune (aka sort and sweep) over one axis.
///
/// Boxes are kept sorted by their lower bound on the sweep axis. A sweep then walks them in order
/// while maintaining the set of boxes whose interval is still open: only those can overlap the box
/// being visited, and are tested on both axes.
///
/// ## Dynamicity
/// The sort order is kept between [`update`](SweepAndPrune::update) calls. Since shapes move
/// a little every tick, the order is almost right already and is fixed with an insertion sort,
/// which is close to linear in that case.
///
/// Sorting costs O(n log n) once, the sweep is near linear when few boxes overlap on the sweep axis
/// and degrades to O(n^2) when they all do.
///
/// ## Examples
/// ```rust
/// use isect2d::{Axis, SweepAndPrune, AABB};
///
/// let mut sap = SweepAndPrune::new(Axis::X);
/// sap.build(&[
///     AABB::new([0.0, 0.0], [2.0, 2.0]),
///     AABB::new([1.0, 3.5], [3.0, 6.0]), // overlaps 0 on x only
///     AABB::new([1.5, 1.5], [4.0, 4.0]),
/// ]);
///
/// let pairs = sap.pairs();
/// assert_eq!(pairs.len(), 2);
/// assert!(pairs.contains(&(0, 2)));
/// assert!(pairs.contains(&(1, 2)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct SweepAndPrune {
    axis: Axis,
    aabbs: Vec<AABB>,
    /// Indices into `aabbs`, sorted by lower bound on `axis` then by index
    order: Vec<usize>,
    // Cache the active list to avoid allocating on every sweep
    active: Vec<usize>,
}

impl SweepAndPrune {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            aabbs: vec![],
            order: vec![],
            active: vec![],
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Replaces the tracked boxes and sorts them from scratch.
    pub fn build(&mut self, aabbs: &[AABB]) {
        self.aabbs.clear();
        self.aabbs.extend_from_slice(aabbs);

        self.order.clear();
        self.order.extend(0..aabbs.len());

        let Self {
            axis, aabbs, order, ..
        } = self;
        let (axis, aabbs) = (*axis, &aabbs[..]);
        order.sort_unstable_by(|&a, &b| Self::cmp_keys(axis, aabbs, a, b));
    }

    /// Replaces the tracked boxes, keeping the previous order as a starting point.
    /// If the number of boxes changed, this is the same as [`build`](SweepAndPrune::build).
    pub fn update(&mut self, aabbs: &[AABB]) {
        if aabbs.len() != self.aabbs.len() {
            self.build(aabbs);
            return;
        }
        self.aabbs.copy_from_slice(aabbs);

        let Self {
            axis, aabbs, order, ..
        } = self;
        let (axis, aabbs) = (*axis, &aabbs[..]);

        let mut swaps = 0usize;
        for i in 1..order.len() {
            let mut j = i;
            while j > 0 && Self::cmp_keys(axis, aabbs, order[j - 1], order[j]) == Ordering::Greater {
                order.swap(j - 1, j);
                j -= 1;
                swaps += 1;
            }
        }
        log::trace!("sap resort: {} swaps over {} boxes", swaps, order.len());
    }

    fn cmp_keys(axis: Axis, aabbs: &[AABB], a: usize, b: usize) -> Ordering {
        aabbs[a]
            .min_on(axis)
            .total_cmp(&aabbs[b].min_on(axis))
            .then(a.cmp(&b))
    }

    /// Indices of the tracked boxes in sweep order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn aabbs(&self) -> &[AABB] {
        &self.aabbs
    }

    pub fn len(&self) -> usize {
        self.aabbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aabbs.is_empty()
    }

    /// Sweeps the sorted boxes and returns every overlapping pair as `(i, j)`, `i < j`.
    pub fn pairs(&mut self) -> PairSet {
        let mut out = PairSet::default();

        let Self {
            axis,
            aabbs,
            order,
            active,
        } = self;
        let (axis, aabbs) = (*axis, &aabbs[..]);
        active.clear();

        for &i in order.iter() {
            let b = &aabbs[i];
            let start = b.min_on(axis);

            // Closed intervals: a box ending exactly at `start` is still open.
            active.retain(|&a| aabbs[a].max_on(axis) >= start);

            for &a in active.iter() {
                if aabbs[a].overlaps(b) {
                    out.insert((a.min(i), a.max(i)));
                }
            }
            active.push(i);
        }

        out
    }
}
