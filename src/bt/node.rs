use thiserror::Error;

use super::action::Leaf;
use super::branch::Branch;
use super::handle::NodeHandle;
use super::multiplexer::Multiplexer;

/// Shared shape of leaf actions, multiplexer gates and decorator guards.
pub type Callback<C, M> = Box<dyn Fn(&mut C, &mut M) -> Status>;

/// Integer encoding used by embedding layers, see [`Status::try_from`].
pub const SUCCESS_CODE: i64 = -1;
pub const FAILURE_CODE: i64 = -2;

/// Result of a single callback invocation.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Status {
    Success,
    Failure,
    /// Not finished, poll again once this many clock units have elapsed.
    Running(u64),
}

impl Status {
    /// Not finished, eligible again on the next tick.
    pub const INSTANT: Status = Status::Running(0);

    pub fn is_success(&self) -> bool {
        matches!(self, Status::Success)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Status::Failure)
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Status::Running(_))
    }
}

impl From<bool> for Status {
    fn from(passed: bool) -> Status {
        if passed {
            Status::Success
        } else {
            Status::Failure
        }
    }
}

impl TryFrom<i64> for Status {
    type Error = NodeError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            SUCCESS_CODE => Ok(Status::Success),
            FAILURE_CODE => Ok(Status::Failure),
            delay if delay >= 0 => Ok(Status::Running(delay as u64)),
            invalid => Err(NodeError::InvalidStatusCode(invalid)),
        }
    }
}

impl From<Status> for i64 {
    fn from(status: Status) -> i64 {
        match status {
            Status::Success => SUCCESS_CODE,
            Status::Failure => FAILURE_CODE,
            Status::Running(delay) => delay.min(i64::MAX as u64) as i64,
        }
    }
}

/// A resolved node or tree.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Outcome {
    Success,
    Failure,
}

/// What a single tick of a whole tree ended with.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum TreeStatus {
    /// Suspended at a leaf or multiplexer, the traversal resumes next tick.
    Running,
    Success,
    Failure,
}

impl TreeStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, TreeStatus::Running)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TreeStatus::Success)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, TreeStatus::Failure)
    }
}

impl From<Outcome> for TreeStatus {
    fn from(outcome: Outcome) -> TreeStatus {
        match outcome {
            Outcome::Success => TreeStatus::Success,
            Outcome::Failure => TreeStatus::Failure,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum NodeError {
    #[error("Invalid status code {0}, expected -1, -2 or a non-negative delay")]
    InvalidStatusCode(i64),
    #[error("The handle {0} belongs to another arena")]
    ForeignHandle(NodeHandle),
    #[error("The handle {0} does not point to a node")]
    UnknownHandle(NodeHandle),
    #[error("The node {0} cannot hold children")]
    NotComposite(NodeHandle),
    #[error("The node {0} is not a sequence or selector")]
    NotBranch(NodeHandle),
    #[error("Adding {child} under {parent} would create a cycle")]
    Cycle { parent: NodeHandle, child: NodeHandle },
    #[error("The {0} of a branch must be at least 1")]
    ZeroCount(&'static str),
}

pub enum NodeKind<C, LM> {
    Leaf(Leaf<C, LM>),
    Branch(Branch),
    Multiplexer(Multiplexer<C, LM>),
}

pub struct Node<C, LM, DM> {
    name: Option<String>,
    decorators: Vec<Callback<C, DM>>,
    kind: NodeKind<C, LM>,
}

impl<C, LM, DM> Node<C, LM, DM> {
    pub(crate) fn new(kind: NodeKind<C, LM>) -> Self {
        Self {
            name: None,
            decorators: vec![],
            kind,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    pub fn kind(&self) -> &NodeKind<C, LM> {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut NodeKind<C, LM> {
        &mut self.kind
    }

    pub fn decorators(&self) -> &[Callback<C, DM>] {
        &self.decorators
    }

    pub(crate) fn push_decorator(&mut self, decorator: Callback<C, DM>) {
        self.decorators.push(decorator);
    }

    pub fn children(&self) -> &[NodeHandle] {
        match &self.kind {
            NodeKind::Leaf(_) => &[],
            NodeKind::Branch(branch) => branch.children(),
            NodeKind::Multiplexer(multiplexer) => multiplexer.children(),
        }
    }

    /// Element name in the Groot vocabulary.
    pub fn element(&self) -> &'static str {
        match &self.kind {
            NodeKind::Leaf(_) => "Action",
            NodeKind::Branch(branch) => branch.kind().element(),
            NodeKind::Multiplexer(_) => "Parallel",
        }
    }

    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.element())
    }
}
