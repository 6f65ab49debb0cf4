use crate::bvh::Bvh;
use crate::config::{IntersectConfig, Strategy};
use crate::error::ConfigError;
use crate::sap::SweepAndPrune;
use crate::shape::{Intersect, Shape, AABB};
use fnv::FnvHashSet;

/// Set of unordered index pairs `(i, j)` with `i < j`.
pub type PairSet = FnvHashSet<(usize, usize)>;

/// One bounding box per shape, tagged with the shape's index.
pub fn extents<S: Shape>(shapes: &[S]) -> Vec<AABB> {
    shapes
        .iter()
        .enumerate()
        .map(|(i, s)| s.bbox().with_tag(i))
        .collect()
}

/// Tests every pair of boxes.
pub fn broad_phase_brute_force(aabbs: &[AABB]) -> PairSet {
    let mut pairs = PairSet::default();
    for (i, a) in aabbs.iter().enumerate() {
        for (j, b) in aabbs.iter().enumerate().skip(i + 1) {
            if a.overlaps(b) {
                pairs.insert((i, j));
            }
        }
    }
    pairs
}

/// Keeps the candidate pairs whose shapes really intersect.
pub fn narrow_phase<S: Intersect<S>>(
    shapes: &[S],
    candidates: impl IntoIterator<Item = (usize, usize)>,
) -> PairSet {
    candidates
        .into_iter()
        .filter(|&(i, j)| shapes[i].intersects(&shapes[j]))
        .collect()
}

fn finish<S: Intersect<S>>(strategy: Strategy, shapes: &[S], candidates: PairSet) -> PairSet {
    let n_candidates = candidates.len();
    let pairs = narrow_phase(shapes, candidates);
    log::debug!(
        "{}: {} shapes, {} candidates, {} intersecting",
        strategy,
        shapes.len(),
        n_candidates,
        pairs.len()
    );
    pairs
}

/// Intersecting pairs, found by testing every pair of bounding boxes first.
pub fn intersect_brute_force<S: Shape + Intersect<S>>(shapes: &[S]) -> PairSet {
    let candidates = broad_phase_brute_force(&extents(shapes));
    finish(Strategy::BruteForce, shapes, candidates)
}

/// Intersecting pairs, using a bounding volume hierarchy as broad phase.
pub fn intersect_bvh<S: Shape + Intersect<S>>(shapes: &[S]) -> PairSet {
    let candidates = Bvh::build(&extents(shapes)).pairs();
    finish(Strategy::Bvh, shapes, candidates)
}

/// Intersecting pairs, using sweep and prune along the x axis as broad phase.
pub fn intersect_sap<S: Shape + Intersect<S>>(shapes: &[S]) -> PairSet {
    let mut sap = SweepAndPrune::default();
    sap.build(&extents(shapes));
    finish(Strategy::Sap, shapes, sap.pairs())
}

/// Intersecting pairs using the given broad phase.
///
/// ```rust
/// use isect2d::{intersect, Strategy, OBB};
///
/// let shapes = [
///     OBB::new([0.0, 0.0], 0.0, 5.0, 5.0),
///     OBB::new([9.0, 0.0], 0.3, 5.0, 5.0),
///     OBB::new([40.0, 0.0], 0.0, 5.0, 5.0),
/// ];
/// for strategy in Strategy::ALL {
///     let pairs = intersect(&shapes, strategy);
///     assert_eq!(pairs.len(), 1);
///     assert!(pairs.contains(&(0, 1)));
/// }
/// ```
pub fn intersect<S: Shape + Intersect<S>>(shapes: &[S], strategy: Strategy) -> PairSet {
    match strategy {
        Strategy::BruteForce => intersect_brute_force(shapes),
        Strategy::Bvh => intersect_bvh(shapes),
        Strategy::Sap => intersect_sap(shapes),
    }
}

/// Runs intersection queries tick after tick with a fixed configuration.
///
/// Results are the same as the free functions', but the box buffer is reused between calls and the
/// sweep and prune order carries over from one tick to the next so it only has to be fixed up.
/// Nothing else is kept: each call only looks at the shapes it is given.
///
/// ```rust
/// use isect2d::{IntersectConfig, Intersector, Strategy, OBB};
///
/// let mut shapes = vec![
///     OBB::new([0.0, 0.0], 0.0, 1.0, 1.0),
///     OBB::new([3.0, 0.0], 0.0, 1.0, 1.0),
/// ];
/// let mut isect = Intersector::new(IntersectConfig::default()).unwrap();
/// assert!(isect.intersect(&shapes).is_empty());
///
/// shapes[1].move_to(1.5, 0.0);
/// assert!(isect.intersect(&shapes).contains(&(0, 1)));
/// ```
#[derive(Clone, Debug)]
pub struct Intersector {
    config: IntersectConfig,
    aabbs: Vec<AABB>,
    sap: SweepAndPrune,
}

impl Intersector {
    pub fn new(config: IntersectConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            aabbs: vec![],
            sap: SweepAndPrune::new(config.sweep_axis),
        })
    }

    pub fn config(&self) -> &IntersectConfig {
        &self.config
    }

    fn update_extents<S: Shape>(&mut self, shapes: &[S]) {
        self.aabbs.clear();
        self.aabbs
            .extend(shapes.iter().enumerate().map(|(i, s)| s.bbox().with_tag(i)));
    }

    /// Broad phase only: pairs of shapes whose bounding boxes overlap.
    pub fn candidates<S: Shape>(&mut self, shapes: &[S]) -> PairSet {
        self.update_extents(shapes);
        match self.config.strategy {
            Strategy::BruteForce => broad_phase_brute_force(&self.aabbs),
            Strategy::Bvh => Bvh::build_with_margin(&self.aabbs, self.config.bvh_margin).pairs(),
            Strategy::Sap => {
                self.sap.update(&self.aabbs);
                self.sap.pairs()
            }
        }
    }

    /// Pairs of intersecting shapes.
    pub fn intersect<S: Shape + Intersect<S>>(&mut self, shapes: &[S]) -> PairSet {
        let candidates = self.candidates(shapes);
        finish(self.config.strategy, shapes, candidates)
    }

    /// Builds the hierarchy the BVH strategy would use, for inspection or display.
    pub fn bvh<S: Shape>(&self, shapes: &[S]) -> Bvh {
        Bvh::build_with_margin(&extents(shapes), self.config.bvh_margin)
    }
}
