//! BSP tree nodes and the arena-backed polygon store they partition.
//!
//! Trees never own polygon data directly. Every polygon lives in its
//! tree's arena (`Vec<BspPolygon>`) and nodes hold arena indices, so a
//! polygon produced by splitting can point back at its source with a
//! plain index. That parent link is what lets output extraction stitch
//! split halves back together.

use crate::float_types::Real;
use crate::plane::{FRONT, Plane, SplitPoints};
use nalgebra::Point3;

/// A polygon as stored in a tree's arena.
///
/// `plane` is the polygon's logical plane and is negated whenever
/// `flipped` toggles. The vertex order itself is never touched until
/// output time; carrying the orientation as a bit is what lets a whole
/// tree flip without rewriting any vertex loop.
#[derive(Debug, Clone)]
pub struct BspPolygon<S: Clone> {
    pub vertices: Vec<Point3<Real>>,
    pub plane: Plane,
    /// Logical orientation is the reverse of the stored vertex order.
    pub flipped: bool,
    /// Arena index of the polygon this one was split from.
    pub parent: Option<usize>,
    pub metadata: Option<S>,
}

impl<S: Clone> BspPolygon<S> {
    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
        self.plane.flip();
    }
}

/// A BSP tree node: a partitioning plane, the bundle of coplanar
/// polygons stored on it, and optional front/back subtrees.
#[derive(Debug, Clone)]
pub struct Node {
    pub plane: Plane,
    /// Arena indices of polygons lying on `plane`.
    pub polygons: Vec<usize>,
    /// Subtree strictly on the positive side of `plane`.
    pub front: Option<Box<Node>>,
    /// Subtree strictly on the negative side of `plane`.
    pub back: Option<Box<Node>>,
}

impl Node {
    pub fn new(plane: Plane, id: usize) -> Self {
        Node {
            plane,
            polygons: vec![id],
            front: None,
            back: None,
        }
    }
}

/// Outcome of splitting one arena polygon by a plane.
pub(crate) enum Fragments {
    /// The polygon lies on the plane; the caller decides which way it goes.
    Coplanar,
    /// Entirely on the positive side, returned unchanged.
    Front(usize),
    /// Entirely on the negative side, returned unchanged.
    Back(usize),
    /// Cut in two. Either side may be `None` when its loop degenerated
    /// below three vertices. Fresh fragments record the split polygon as
    /// their parent and inherit its plane, flip state and metadata.
    Split {
        front: Option<usize>,
        back: Option<usize>,
    },
}

/// Split the polygon at `id` by `plane`, materializing any fragments in
/// the arena.
pub(crate) fn split_polygon<S: Clone>(
    arena: &mut Vec<BspPolygon<S>>,
    plane: &Plane,
    id: usize,
) -> Fragments {
    match plane.split_points(&arena[id].vertices) {
        SplitPoints::Coplanar => Fragments::Coplanar,
        SplitPoints::Front => Fragments::Front(id),
        SplitPoints::Back => Fragments::Back(id),
        SplitPoints::Spanning { front, back } => {
            let front = (front.len() >= 3).then(|| alloc_fragment(arena, id, front));
            let back = (back.len() >= 3).then(|| alloc_fragment(arena, id, back));
            Fragments::Split { front, back }
        },
    }
}

fn alloc_fragment<S: Clone>(
    arena: &mut Vec<BspPolygon<S>>,
    parent: usize,
    vertices: Vec<Point3<Real>>,
) -> usize {
    let fragment = BspPolygon {
        vertices,
        plane: arena[parent].plane.clone(),
        flipped: arena[parent].flipped,
        parent: Some(parent),
        metadata: arena[parent].metadata.clone(),
    };
    arena.push(fragment);
    arena.len() - 1
}

/// Insert the polygon at `id` into the subtree rooted at `slot`.
///
/// An empty slot becomes a node carrying `plane` (the polygon's own plane
/// at initial build, the source node's plane when merging trees). A
/// coplanar polygon joins the node's bundle; anything else filters down,
/// splitting as it goes. The first insertion into a tree therefore fixes
/// its root plane; no rebalancing is ever attempted.
pub(crate) fn insert_polygon<'t, S: Clone>(
    arena: &mut Vec<BspPolygon<S>>,
    slot: &'t mut Option<Box<Node>>,
    id: usize,
    plane: &Plane,
) {
    let mut pending: Vec<(&'t mut Option<Box<Node>>, usize)> = vec![(slot, id)];

    while let Some((slot, id)) = pending.pop() {
        let node = match slot {
            Some(node) => node,
            None => {
                *slot = Some(Box::new(Node::new(plane.clone(), id)));
                continue;
            },
        };
        match split_polygon(arena, &node.plane, id) {
            Fragments::Coplanar => node.polygons.push(id),
            Fragments::Front(id) => pending.push((&mut node.front, id)),
            Fragments::Back(id) => pending.push((&mut node.back, id)),
            Fragments::Split { front, back } => {
                let Node {
                    front: front_slot,
                    back: back_slot,
                    ..
                } = &mut **node;
                if let Some(id) = back {
                    pending.push((back_slot, id));
                }
                if let Some(id) = front {
                    pending.push((front_slot, id));
                }
            },
        }
    }
}

/// Clip the polygon at `id` against the solid represented by `bsp`,
/// appending the surviving pieces to `survivors`.
///
/// Pieces reaching a missing front child are outside the solid and kept;
/// pieces reaching a missing back child are inside and dropped. A piece
/// lying on a node's plane is routed by facing: aligned with the plane
/// counts as outside, opposed counts as inside. That tie-break is what
/// makes the invert/clip/invert step of a union strip the coplanar faces
/// it must strip while keeping the shared boundary.
pub(crate) fn clip_polygon<S: Clone>(
    arena: &mut Vec<BspPolygon<S>>,
    bsp: &Node,
    id: usize,
    survivors: &mut Vec<usize>,
) {
    let (front, back) = match split_polygon(arena, &bsp.plane, id) {
        Fragments::Coplanar => {
            if bsp.plane.orient_plane(&arena[id].plane) == FRONT {
                (Some(id), None)
            } else {
                (None, Some(id))
            }
        },
        Fragments::Front(id) => (Some(id), None),
        Fragments::Back(id) => (None, Some(id)),
        Fragments::Split { front, back } => (front, back),
    };

    if let Some(id) = front {
        match bsp.front.as_deref() {
            Some(child) => clip_polygon(arena, child, id, survivors),
            None => survivors.push(id),
        }
    }
    if let Some(id) = back {
        if let Some(child) = bsp.back.as_deref() {
            clip_polygon(arena, child, id, survivors);
        }
    }
}
