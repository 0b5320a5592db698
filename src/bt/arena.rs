use std::collections::HashSet;
use uuid::Uuid;

use super::action::Leaf;
use super::branch::{Branch, BranchKind};
use super::builder::Builder;
use super::handle::NodeHandle;
use super::multiplexer::Multiplexer;
use super::node::{Callback, Node, NodeError, NodeKind, Status};

/// Owner of every node of one or more trees.
///
/// Nodes live as long as the arena and are only referenced through
/// [`NodeHandle`]s. Executors borrow the arena, so it can neither be mutated
/// nor dropped while a tree is being ticked.
pub struct TreeArena<C, LM = (), DM = LM> {
    id: Uuid,
    nodes: Vec<Node<C, LM, DM>>,
}

impl<C, LM, DM> Default for TreeArena<C, LM, DM> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, LM, DM> TreeArena<C, LM, DM> {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            nodes: vec![],
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Destroys all nodes. Handles issued before are rejected afterwards.
    pub fn clear(&mut self) {
        log::debug!("Arena {} - destroying {} nodes", self.id, self.nodes.len());
        self.nodes.clear();
        self.id = Uuid::new_v4();
    }

    fn insert(&mut self, kind: NodeKind<C, LM>) -> NodeHandle {
        let handle = NodeHandle::new(self.id, self.nodes.len());
        self.nodes.push(Node::new(kind));
        handle
    }

    pub fn create_leaf<F>(&mut self, exec: F) -> NodeHandle
    where
        F: Fn(&mut C, &mut LM) -> Status + 'static,
    {
        self.insert(NodeKind::Leaf(Leaf::new(Box::new(exec))))
    }

    pub fn create_branch(&mut self, kind: BranchKind) -> NodeHandle {
        self.insert(NodeKind::Branch(Branch::new(kind)))
    }

    pub fn create_sequence(&mut self) -> NodeHandle {
        self.create_branch(BranchKind::Sequence)
    }

    pub fn create_selector(&mut self) -> NodeHandle {
        self.create_branch(BranchKind::Selector)
    }

    pub fn create_multiplexer(&mut self) -> NodeHandle {
        self.insert(NodeKind::Multiplexer(Multiplexer::new(None)))
    }

    pub fn create_gated_multiplexer<F>(&mut self, gate: F) -> NodeHandle
    where
        F: Fn(&mut C, &mut LM) -> Status + 'static,
    {
        self.insert(NodeKind::Multiplexer(Multiplexer::new(Some(Box::new(gate)))))
    }

    /// Appends `child` to a sequence, selector or multiplexer. The order of
    /// the calls is the evaluation order of the children.
    pub fn add_child(&mut self, parent: NodeHandle, child: NodeHandle) -> Result<(), NodeError> {
        self.check(parent)?;
        self.check(child)?;
        if self.reaches(child, parent) {
            return Err(NodeError::Cycle { parent, child });
        }
        match self.nodes[parent.index()].kind_mut() {
            NodeKind::Leaf(_) => return Err(NodeError::NotComposite(parent)),
            NodeKind::Branch(branch) => branch.push_child(child),
            NodeKind::Multiplexer(multiplexer) => multiplexer.push_child(child),
        }
        Ok(())
    }

    pub fn decorate<F>(&mut self, node: NodeHandle, decorator: F) -> Result<(), NodeError>
    where
        F: Fn(&mut C, &mut DM) -> Status + 'static,
    {
        self.decorate_all(node, vec![Box::new(decorator)])
    }

    pub fn decorate_all(
        &mut self,
        node: NodeHandle,
        decorators: Vec<Callback<C, DM>>,
    ) -> Result<(), NodeError> {
        self.check(node)?;
        let node = &mut self.nodes[node.index()];
        for decorator in decorators {
            node.push_decorator(decorator);
        }
        Ok(())
    }

    pub fn set_loops(&mut self, node: NodeHandle, loops: u64) -> Result<(), NodeError> {
        if loops == 0 {
            return Err(NodeError::ZeroCount("loops"));
        }
        self.branch_mut(node)?.set_loops(loops);
        Ok(())
    }

    pub fn set_attempts(&mut self, node: NodeHandle, attempts: u64) -> Result<(), NodeError> {
        if attempts == 0 {
            return Err(NodeError::ZeroCount("attempts"));
        }
        self.branch_mut(node)?.set_attempts(attempts);
        Ok(())
    }

    pub fn set_name<S: Into<String>>(&mut self, node: NodeHandle, name: S) -> Result<(), NodeError> {
        self.check(node)?;
        self.nodes[node.index()].set_name(name.into());
        Ok(())
    }

    pub fn get(&self, handle: NodeHandle) -> Option<&Node<C, LM, DM>> {
        self.check(handle).ok()?;
        self.nodes.get(handle.index())
    }

    /// Checks that every node reachable from `root` belongs to this arena.
    pub fn verify(&self, root: NodeHandle) -> Result<(), NodeError> {
        self.check(root)?;
        for handle in self.reachable(root) {
            self.check(handle)?;
        }
        Ok(())
    }

    /// Fluent construction starting from a fresh sequence.
    pub fn sequence(&mut self) -> Builder<'_, C, LM, DM> {
        let handle = self.create_sequence();
        Builder::new(self, handle)
    }

    /// Fluent construction starting from a fresh selector.
    pub fn selector(&mut self) -> Builder<'_, C, LM, DM> {
        let handle = self.create_selector();
        Builder::new(self, handle)
    }

    /// Fluent construction starting from a fresh multiplexer without gate.
    pub fn multiplexer(&mut self) -> Builder<'_, C, LM, DM> {
        let handle = self.create_multiplexer();
        Builder::new(self, handle)
    }

    /// Fluent construction starting from a fresh gated multiplexer.
    pub fn gated_multiplexer<F>(&mut self, gate: F) -> Builder<'_, C, LM, DM>
    where
        F: Fn(&mut C, &mut LM) -> Status + 'static,
    {
        let handle = self.create_gated_multiplexer(gate);
        Builder::new(self, handle)
    }

    /// Fluent construction starting from a fresh leaf, mostly to decorate it.
    pub fn leaf<F>(&mut self, exec: F) -> Builder<'_, C, LM, DM>
    where
        F: Fn(&mut C, &mut LM) -> Status + 'static,
    {
        let handle = self.create_leaf(exec);
        Builder::new(self, handle)
    }

    /// Fluent construction continuing on an existing node.
    pub fn edit(&mut self, node: NodeHandle) -> Builder<'_, C, LM, DM> {
        Builder::new(self, node)
    }

    /// Panics on handles that were not verified, which is a construction bug.
    pub(crate) fn node(&self, handle: NodeHandle) -> &Node<C, LM, DM> {
        match self.get(handle) {
            Some(node) => node,
            None => panic!("Arena {} - dangling node handle {handle}", self.id),
        }
    }

    /// Unique nodes below `root` in depth-first pre-order, `root` included.
    pub(crate) fn reachable(&self, root: NodeHandle) -> Vec<NodeHandle> {
        let mut visited = HashSet::new();
        let mut order = vec![];
        let mut pending = vec![root];
        while let Some(handle) = pending.pop() {
            if !visited.insert(handle) {
                continue;
            }
            order.push(handle);
            if let Some(node) = self.get(handle) {
                pending.extend(node.children().iter().rev().copied());
            }
        }
        order
    }

    fn reaches(&self, from: NodeHandle, target: NodeHandle) -> bool {
        self.reachable(from).contains(&target)
    }

    fn check(&self, handle: NodeHandle) -> Result<(), NodeError> {
        if handle.arena() != self.id {
            return Err(NodeError::ForeignHandle(handle));
        }
        if handle.index() >= self.nodes.len() {
            return Err(NodeError::UnknownHandle(handle));
        }
        Ok(())
    }

    fn branch_mut(&mut self, handle: NodeHandle) -> Result<&mut Branch, NodeError> {
        self.check(handle)?;
        match self.nodes[handle.index()].kind_mut() {
            NodeKind::Branch(branch) => Ok(branch),
            _ => Err(NodeError::NotBranch(handle)),
        }
    }
}
