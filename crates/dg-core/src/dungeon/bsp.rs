//! Binary space partition
//!
//! Recursively cuts the map rectangle in two until pieces get too small.
//! Leaves of the tree become the initial rooms; the tree itself is dropped
//! once they have been extracted.

use crate::consts::{SPLIT_LIMIT, SPLIT_MEAN, SPLIT_STD_DEV};
use crate::geometry::Rect;
use crate::rng::DungeonRng;

/// Which way a rectangle gets cut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitAxis {
    /// Cut along a row: top and bottom children
    Horizontal,
    /// Cut along a column: left and right children
    Vertical,
}

impl SplitAxis {
    /// Cut across the longer side; square rectangles are cut vertically
    pub fn for_rect(rect: &Rect) -> SplitAxis {
        if rect.h > rect.w {
            SplitAxis::Horizontal
        } else {
            SplitAxis::Vertical
        }
    }
}

/// A node of the partition tree: either a leaf or a split into exactly two
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BspNode {
    Leaf(Rect),
    Split(Rect, Box<BspNode>, Box<BspNode>),
}

/// Cut `rect` in two along `axis` (or the automatic axis)
///
/// The cut position is a clamped gaussian fraction of the cut dimension, so
/// children can be degenerate (zero-sized) for tiny rectangles; callers
/// decide whether to keep the split.
pub fn split(rect: &Rect, axis: Option<SplitAxis>, rng: &mut DungeonRng) -> (Rect, Rect) {
    let axis = axis.unwrap_or_else(|| SplitAxis::for_rect(rect));
    let v = rng.nrand(SPLIT_MEAN, SPLIT_STD_DEV, SPLIT_LIMIT);

    match axis {
        SplitAxis::Horizontal => {
            let a = (v * rect.h as f64) as i32;
            let top = Rect::new(rect.x, rect.y, rect.w, a);
            let bottom = Rect::new(rect.x, rect.y + a, rect.w, rect.h - a);
            (top, bottom)
        }
        SplitAxis::Vertical => {
            let a = (v * rect.w as f64) as i32;
            let left = Rect::new(rect.x, rect.y, a, rect.h);
            let right = Rect::new(rect.x + a, rect.y, rect.w - a, rect.h);
            (left, right)
        }
    }
}

fn fits(rect: &Rect, min_size: i32) -> bool {
    rect.w >= min_size && rect.h >= min_size
}

/// Build a partition tree over `rect`
///
/// A node is only cut when both sides are at least `2 * min_size`. A cut is
/// kept only if both children still fit `min_size` in each dimension;
/// otherwise the node stays a leaf and no other cut is tried.
pub fn generate_tree(rect: Rect, min_size: i32, rng: &mut DungeonRng) -> BspNode {
    if rect.w < min_size * 2 || rect.h < min_size * 2 {
        return BspNode::Leaf(rect);
    }

    let (first, second) = split(&rect, None, rng);
    if !fits(&first, min_size) || !fits(&second, min_size) {
        return BspNode::Leaf(rect);
    }

    let first = generate_tree(first, min_size, rng);
    let second = generate_tree(second, min_size, rng);
    BspNode::Split(rect, Box::new(first), Box::new(second))
}

impl BspNode {
    pub fn rect(&self) -> &Rect {
        match self {
            BspNode::Leaf(rect) | BspNode::Split(rect, _, _) => rect,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, BspNode::Leaf(_))
    }

    /// Leaf rectangles, depth first with the top/left child first
    pub fn leaves(&self) -> Vec<Rect> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<Rect>) {
        match self {
            BspNode::Leaf(rect) => out.push(*rect),
            BspNode::Split(_, first, second) => {
                first.collect_leaves(out);
                second.collect_leaves(out);
            }
        }
    }

    /// Consume the tree, keeping only its leaves
    pub fn into_leaves(self) -> Vec<Rect> {
        self.leaves()
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            BspNode::Leaf(_) => 1,
            BspNode::Split(_, first, second) => first.leaf_count() + second.leaf_count(),
        }
    }

    /// Number of levels; a lone leaf has depth 1
    pub fn depth(&self) -> usize {
        match self {
            BspNode::Leaf(_) => 1,
            BspNode::Split(_, first, second) => 1 + first.depth().max(second.depth()),
        }
    }
}
