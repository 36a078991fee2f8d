use core::fmt;
use core::mem;
use core::ops::Index;
use core::ops::IndexMut;

use crate::element::Element;
use crate::geometry::Aabb;

/// Index of a node record in an [`Arena`].
pub type NodeId = usize;

/// The root always lives in the first slot.
pub const ROOT: NodeId = 0;

/// A node of a [`LinearQuadtree`](super::LinearQuadtree).
#[derive(Debug)]
pub struct NodeRecord<T> {
    pub bounds: Aabb,
    pub depth: usize,

    /// Elements held by a leaf. Always empty on a branch.
    pub elements: Vec<Element<T>>,

    /// Children in Z-order, `None` for a leaf.
    pub children: Option<[NodeId; 4]>,
}

impl<T> NodeRecord<T> {
    pub fn leaf(bounds: Aabb, depth: usize) -> Self {
        NodeRecord {
            bounds,
            depth,
            elements: Vec::new(),
            children: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

enum Slot<T> {
    Occupied(NodeRecord<T>),

    /// A freed slot. It doubles as a link in the free list.
    Vacant { next_free: Option<NodeId> },
}

/// Every node of a tree, in one growable buffer.
///
/// Freed slots are threaded into a singly-linked free list through the slots themselves, and are
/// handed out again before the buffer grows.
pub struct Arena<T> {
    slots: Vec<Slot<T>>,

    /// Head of the free list
    free: Option<NodeId>,

    /// Number of occupied slots
    live: usize,
}

impl<T> Arena<T> {
    /// An arena holding a single empty leaf at [`ROOT`].
    pub fn with_root(bounds: Aabb) -> Self {
        Arena {
            slots: vec![Slot::Occupied(NodeRecord::leaf(bounds, 0))],
            free: None,
            live: 1,
        }
    }

    /// Number of occupied slots.
    pub fn live(&self) -> usize {
        self.live
    }

    /// Number of slots, occupied or not.
    pub fn slots(&self) -> usize {
        self.slots.len()
    }

    /// Store `node`, reusing a freed slot if there is one.
    pub fn alloc(&mut self, node: NodeRecord<T>) -> NodeId {
        self.live += 1;

        let Some(id) = self.free else {
            self.slots.push(Slot::Occupied(node));
            return self.slots.len() - 1;
        };

        let Slot::Vacant { next_free } = self.slots[id] else {
            unreachable!("free list points at occupied slot {id}");
        };

        self.free = next_free;
        self.slots[id] = Slot::Occupied(node);

        id
    }

    /// Vacate slot `id`, handing back the node that lived there.
    pub fn free(&mut self, id: NodeId) -> NodeRecord<T> {
        assert_ne!(id, ROOT, "the root is never freed");

        let vacant = Slot::Vacant {
            next_free: self.free,
        };

        let Slot::Occupied(node) = mem::replace(&mut self.slots[id], vacant) else {
            panic!("double free of slot {id}");
        };

        self.free = Some(id);
        self.live -= 1;

        node
    }

    /// Drop every node but the root, and empty the root.
    pub fn reset(&mut self) {
        let root = &self[ROOT];
        let bounds = root.bounds;

        self.slots.clear();
        self.slots.push(Slot::Occupied(NodeRecord::leaf(bounds, 0)));
        self.free = None;
        self.live = 1;
    }
}

impl<T> Index<NodeId> for Arena<T> {
    type Output = NodeRecord<T>;

    fn index(&self, id: NodeId) -> &Self::Output {
        match &self.slots[id] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("slot {id} is vacant"),
        }
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match &mut self.slots[id] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("slot {id} is vacant"),
        }
    }
}

impl<T> fmt::Debug for Arena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("slots", &self.slots.len())
            .field("live", &self.live)
            .field("free_head", &self.free)
            .finish()
    }
}
