//! The owning CSG tree and its boolean operations.

use crate::bsp::{BspPolygon, Node, clip_polygon, insert_polygon};
use crate::polygon::Polygon;
use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use std::fmt::Debug;

/// A solid, held as a BSP tree over an arena of polygons.
///
/// The tree is both the build product and the operand of every boolean
/// operation: operations consume their operands (the underlying trees are
/// clipped and merged in place) and return a live tree that can be fed
/// straight into the next operation or read out with
/// [`to_polygons`](Csg::to_polygons).
#[derive(Debug, Clone)]
pub struct Csg<S: Clone> {
    /// Every polygon ever created for this tree, splits included. Nodes
    /// refer into this arena by index; entries are never removed, so a
    /// fragment's `parent` index stays valid for the tree's lifetime.
    pub arena: Vec<BspPolygon<S>>,
    pub root: Option<Box<Node>>,
}

impl<S: Clone + Send + Sync + Debug> Default for Csg<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + Send + Sync + Debug> Csg<S> {
    /// Create an empty solid.
    pub const fn new() -> Self {
        Csg {
            arena: Vec::new(),
            root: None,
        }
    }

    /// Build a tree from boundary polygons, in input order.
    pub fn from_polygons(polygons: Vec<Polygon<S>>) -> Self {
        let mut csg = Self::new();
        for polygon in polygons {
            csg.insert(polygon);
        }
        csg
    }

    /// Insert one boundary polygon. Polygons with fewer than three
    /// vertices cannot span a plane and are dropped.
    pub fn insert(&mut self, polygon: Polygon<S>) {
        if polygon.vertices.len() < 3 {
            return;
        }
        let plane = polygon.plane();
        let id = self.arena.len();
        self.arena.push(BspPolygon {
            vertices: polygon.vertices,
            plane: plane.clone(),
            flipped: false,
            parent: None,
            metadata: polygon.metadata,
        });
        insert_polygon(&mut self.arena, &mut self.root, id, &plane);
    }

    /// Convert solid space to empty space and empty space to solid space.
    ///
    /// Every node plane is negated, front and back subtrees swap, and
    /// every stored polygon toggles its deferred orientation bit. Vertex
    /// loops are left untouched until output.
    pub fn invert(&mut self) {
        let Csg { arena, root } = self;
        let mut pending: Vec<&mut Node> = Vec::new();
        if let Some(node) = root.as_deref_mut() {
            pending.push(node);
        }
        while let Some(node) = pending.pop() {
            node.plane.flip();
            for &id in &node.polygons {
                arena[id].flip();
            }
            std::mem::swap(&mut node.front, &mut node.back);
            // Back first so front pops first: pre-order.
            if let Some(back) = node.back.as_deref_mut() {
                pending.push(back);
            }
            if let Some(front) = node.front.as_deref_mut() {
                pending.push(front);
            }
        }
    }

    /// Remove every part of this tree's polygons that lies inside the
    /// solid represented by `other`. Each node's bundle is replaced by
    /// its clipped survivors; the tree structure itself is unchanged.
    pub fn clip_to(&mut self, other: &Csg<S>) {
        let Some(bsp) = other.root.as_deref() else {
            // Nothing is inside an empty solid.
            return;
        };
        let Csg { arena, root } = self;
        let mut pending: Vec<&mut Node> = Vec::new();
        if let Some(node) = root.as_deref_mut() {
            pending.push(node);
        }
        while let Some(node) = pending.pop() {
            let bundle = std::mem::take(&mut node.polygons);
            let mut survivors = Vec::with_capacity(bundle.len());
            for id in bundle {
                clip_polygon(arena, bsp, id, &mut survivors);
            }
            node.polygons = survivors;
            if let Some(back) = node.back.as_deref_mut() {
                pending.push(back);
            }
            if let Some(front) = node.front.as_deref_mut() {
                pending.push(front);
            }
        }
    }

    /// Fold `other` into this tree, consuming it.
    ///
    /// `other`'s arena moves over wholesale (parent indices rebased), and
    /// each of its nodes' bundles is inserted in pre-order, keyed by that
    /// node's plane. Existing partitioning planes in `self` are reused,
    /// never reconsidered.
    pub fn merge(&mut self, other: Csg<S>) {
        let offset = self.arena.len();
        self.arena.extend(other.arena.into_iter().map(|mut polygon| {
            if let Some(parent) = polygon.parent.as_mut() {
                *parent += offset;
            }
            polygon
        }));

        let mut pending: Vec<Box<Node>> = other.root.into_iter().collect();
        while let Some(node) = pending.pop() {
            let Node {
                plane,
                polygons,
                front,
                back,
            } = *node;
            for id in polygons {
                insert_polygon(&mut self.arena, &mut self.root, id + offset, &plane);
            }
            if let Some(back) = back {
                pending.push(back);
            }
            if let Some(front) = front {
                pending.push(front);
            }
        }
    }

    /// Collect the boundary polygons of this solid.
    ///
    /// Walks the tree in pre-order and reunites split fragments: the
    /// first surviving half of a split is emitted provisionally, and if
    /// its sibling also turns up, both are retired in favor of the
    /// polygon they were cut from. The reunion chains upward, so a
    /// polygon cut by several planes whose pieces all survived comes back
    /// out whole.
    ///
    /// Deferred orientation is resolved here and only here, by reversing
    /// the copied vertex order of polygons whose flip bit is set. Output
    /// polygons are fresh allocations sharing nothing with the tree.
    pub fn to_polygons(&self) -> Vec<Polygon<S>> {
        // Emission slots; coalescing tombstones a slot rather than
        // removing it, keeping output order insertion-ordered.
        let mut chosen: Vec<Option<(usize, bool)>> = Vec::new();
        let mut by_parent: HashMap<usize, usize> = HashMap::new();

        let mut pending: Vec<&Node> = Vec::new();
        if let Some(node) = self.root.as_deref() {
            pending.push(node);
        }
        while let Some(node) = pending.pop() {
            for &id in &node.polygons {
                // Fragments in the tree carry the live flip state; a
                // polygon retired from the bundles by a split stopped
                // seeing tree inversions at that moment.
                let flipped = self.arena[id].flipped;
                let mut id = id;
                loop {
                    let Some(parent) = self.arena[id].parent else {
                        chosen.push(Some((id, flipped)));
                        break;
                    };
                    match by_parent.entry(parent) {
                        Entry::Vacant(slot) => {
                            slot.insert(chosen.len());
                            chosen.push(Some((id, flipped)));
                            break;
                        },
                        Entry::Occupied(slot) => {
                            chosen[*slot.get()] = None;
                            id = parent;
                        },
                    }
                }
            }
            if let Some(back) = node.back.as_deref() {
                pending.push(back);
            }
            if let Some(front) = node.front.as_deref() {
                pending.push(front);
            }
        }

        chosen
            .into_iter()
            .flatten()
            .map(|(id, flipped)| {
                let polygon = &self.arena[id];
                let mut vertices = polygon.vertices.clone();
                if flipped {
                    vertices.reverse();
                }
                Polygon::new(vertices, polygon.metadata.clone())
            })
            .collect()
    }

    /// Return a solid covering space in either `self` or `other`.
    ///
    /// ```text
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   A   |            |       |
    ///     |    +--+----+   =   |       +----+
    ///     +----+--+    |       +----+       |
    ///          |   B   |            |       |
    ///          |       |            |       |
    ///          +-------+            +-------+
    /// ```
    ///
    /// Both boundaries are clipped against the other solid; the extra
    /// invert/clip/invert pass on `other` removes its coplanar faces that
    /// coincide with faces of `self`, which would otherwise come out
    /// doubled.
    pub fn union(mut self, mut other: Self) -> Self {
        self.clip_to(&other);
        other.clip_to(&self);
        other.invert();
        other.clip_to(&self);
        other.invert();
        self.merge(other);
        self
    }

    /// Return a solid covering space in `self` but not in `other`.
    ///
    /// ```text
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   A   |            |       |
    ///     |    +--+----+   =   |    +--+
    ///     +----+--+    |       +----+
    ///          |   B   |
    ///          |       |
    ///          +-------+
    /// ```
    ///
    /// `A − B = ~(~A ∪ B)`: invert, union, invert back.
    pub fn difference(mut self, mut other: Self) -> Self {
        self.invert();
        self.clip_to(&other);
        other.clip_to(&self);
        other.invert();
        other.clip_to(&self);
        other.invert();
        self.merge(other);
        self.invert();
        self
    }

    /// Return a solid covering space in both `self` and `other`.
    ///
    /// ```text
    ///     +-------+
    ///     |       |
    ///     |   A   |
    ///     |    +--+----+   =   +--+
    ///     +----+--+    |       +--+
    ///          |   B   |
    ///          |       |
    ///          +-------+
    /// ```
    pub fn intersection(mut self, mut other: Self) -> Self {
        self.invert();
        other.clip_to(&self);
        other.invert();
        self.clip_to(&other);
        other.clip_to(&self);
        self.merge(other);
        self.invert();
        self
    }

    /// Return a solid covering space in exactly one of `self` and
    /// `other`: `(A − B) ∪ (B − A)`.
    pub fn xor(self, other: Self) -> Self {
        let a_sub_b = self.clone().difference(other.clone());
        let b_sub_a = other.difference(self);
        a_sub_b.union(b_sub_a)
    }

    /// Union a sequence of solids, folding pairwise left to right.
    pub fn union_all<I>(solids: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        solids.into_iter().fold(Self::new(), Self::union)
    }
}
