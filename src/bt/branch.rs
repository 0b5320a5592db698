use super::handle::NodeHandle;
use super::node::Outcome;

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum BranchKind {
    /// Succeeds once every child succeeded in one pass, restarts on a child failure.
    Sequence,
    /// Succeeds on the first succeeding child, tries the next one on failure.
    Selector,
}

impl BranchKind {
    pub fn element(&self) -> &'static str {
        match self {
            BranchKind::Sequence => "Sequence",
            BranchKind::Selector => "Fallback",
        }
    }
}

/// How the traversal arrives at a branch.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Traversal {
    Success,
    Failure,
    /// The branch was just entered, nothing to account for yet.
    Descend,
}

impl From<Outcome> for Traversal {
    fn from(outcome: Outcome) -> Traversal {
        match outcome {
            Outcome::Success => Traversal::Success,
            Outcome::Failure => Traversal::Failure,
        }
    }
}

/// Per-activation bookkeeping of a branch on the node stack.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct Counters {
    pub cursor: usize,
    pub loops: u64,
    pub retries: u64,
}

/// Next move of the traversal after a branch processed an arrival.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Step {
    Enter(NodeHandle),
    Resolve(Outcome),
}

pub struct Branch {
    kind: BranchKind,
    children: Vec<NodeHandle>,
    loops: u64,
    attempts: u64,
}

impl Branch {
    pub(crate) fn new(kind: BranchKind) -> Self {
        Self {
            kind,
            children: vec![],
            loops: 1,
            attempts: 1,
        }
    }

    pub fn kind(&self) -> BranchKind {
        self.kind
    }

    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    pub fn loops(&self) -> u64 {
        self.loops
    }

    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub(crate) fn push_child(&mut self, child: NodeHandle) {
        self.children.push(child);
    }

    // Callers guarantee non-zero counts
    pub(crate) fn set_loops(&mut self, loops: u64) {
        self.loops = loops;
    }

    pub(crate) fn set_attempts(&mut self, attempts: u64) {
        self.attempts = attempts;
    }

    /// Accounts `arrival` on the counters and decides where the traversal goes next.
    pub(crate) fn advance(&self, counters: &mut Counters, arrival: Traversal) -> Step {
        if self.children.is_empty() {
            return match self.kind {
                BranchKind::Sequence => Step::Resolve(Outcome::Success),
                BranchKind::Selector => Step::Resolve(Outcome::Failure),
            };
        }

        match (self.kind, arrival) {
            (BranchKind::Selector, Traversal::Success) => {
                counters.loops += 1;
                counters.cursor = 0;
            }
            (BranchKind::Selector, Traversal::Failure) => counters.cursor += 1,
            (BranchKind::Sequence, Traversal::Success) => counters.cursor += 1,
            (BranchKind::Sequence, Traversal::Failure) => {
                counters.retries += 1;
                counters.cursor = 0;
            }
            (_, Traversal::Descend) => {}
        }

        // Running off the end counts as a failed attempt for a selector and a
        // completed loop for a sequence
        if counters.cursor >= self.children.len() {
            match self.kind {
                BranchKind::Selector => counters.retries += 1,
                BranchKind::Sequence => counters.loops += 1,
            }
            counters.cursor = 0;
        }

        if counters.retries >= self.attempts {
            Step::Resolve(Outcome::Failure)
        } else if counters.loops >= self.loops {
            Step::Resolve(Outcome::Success)
        } else {
            Step::Enter(self.children[counters.cursor])
        }
    }
}
