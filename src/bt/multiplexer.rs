use super::handle::NodeHandle;
use super::node::{Callback, Status};

/// Composite ticking every child as an independent subtree, gated by an
/// optional callback with the leaf contract.
pub struct Multiplexer<C, LM> {
    gate: Option<Callback<C, LM>>,
    children: Vec<NodeHandle>,
}

impl<C, LM> Multiplexer<C, LM> {
    pub(crate) fn new(gate: Option<Callback<C, LM>>) -> Self {
        Self {
            gate,
            children: vec![],
        }
    }

    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    pub fn is_gated(&self) -> bool {
        self.gate.is_some()
    }

    pub(crate) fn push_child(&mut self, child: NodeHandle) {
        self.children.push(child);
    }

    /// Without a gate the multiplexer keeps running and is due every tick.
    pub(crate) fn poll_gate(&self, ctx: &mut C, memory: &mut LM) -> Status {
        match &self.gate {
            Some(gate) => gate(ctx, memory),
            None => Status::INSTANT,
        }
    }
}
