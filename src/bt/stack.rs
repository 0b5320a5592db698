use super::branch::Counters;
use super::handle::NodeHandle;
use super::timer::Timer;

/// One node on the current depth-first path.
#[derive(Debug)]
pub struct NodeStackEntry<LM> {
    pub node: NodeHandle,
    pub memory: LM,
    /// Size of the decorator stack right after this node's decorators were queued.
    pub checkpoint: usize,
    pub counters: Counters,
}

impl<LM: Default> NodeStackEntry<LM> {
    pub fn new(node: NodeHandle, checkpoint: usize) -> Self {
        Self {
            node,
            memory: LM::default(),
            checkpoint,
            counters: Counters::default(),
        }
    }
}

/// A decorator still pending for a node on the node stack.
#[derive(Debug)]
pub struct DecoratorStackEntry<DM> {
    pub node_index: usize,
    pub decorator_index: usize,
    pub memory: DM,
    pub timer: Timer,
}

impl<DM> DecoratorStackEntry<DM> {
    pub fn new(node_index: usize, decorator_index: usize, memory: DM, timer: Timer) -> Self {
        Self {
            node_index,
            decorator_index,
            memory,
            timer,
        }
    }
}

/// Current root-to-node path, only the last entry may be a leaf or multiplexer.
#[derive(Debug)]
pub struct NodeStack<LM> {
    entries: Vec<NodeStackEntry<LM>>,
}

impl<LM> Default for NodeStack<LM> {
    fn default() -> Self {
        Self { entries: vec![] }
    }
}

impl<LM> NodeStack<LM> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, entry: NodeStackEntry<LM>) {
        self.entries.push(entry);
    }

    pub fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, index: usize) -> Option<&NodeStackEntry<LM>> {
        self.entries.get(index)
    }

    pub fn top(&self) -> Option<&NodeStackEntry<LM>> {
        self.entries.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut NodeStackEntry<LM>> {
        self.entries.last_mut()
    }
}

/// Decorators awaiting re-evaluation, ordered by (node index, decorator index).
#[derive(Debug)]
pub struct DecoratorStack<DM> {
    entries: Vec<DecoratorStackEntry<DM>>,
}

impl<DM> Default for DecoratorStack<DM> {
    fn default() -> Self {
        Self { entries: vec![] }
    }
}

impl<DM> DecoratorStack<DM> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn push(&mut self, entry: DecoratorStackEntry<DM>) {
        debug_assert!(
            self.entries
                .last()
                .map(|last| (last.node_index, last.decorator_index)
                    < (entry.node_index, entry.decorator_index))
                .unwrap_or(true),
            "Decorator stack must stay ordered"
        );
        self.entries.push(entry);
    }

    pub fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, DecoratorStackEntry<DM>> {
        self.entries.iter_mut()
    }
}
