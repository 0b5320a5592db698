//! Behavior trees evaluated one tick at a time.
//!
//! A tree is built once in a [`TreeArena`] and ticked by a [`TreeExecutor`]
//! with a caller supplied context and a non-decreasing logical clock. Actions
//! and guards may answer [`Status::Running`] with a delay, in which case the
//! traversal suspends and resumes on a later tick without holding any stack
//! frames in between.

mod bt;

pub use crate::bt::{BehaviorTree, RunConfig};
pub use crate::bt::{
    action::{fail, raw, succeed, wait, Leaf},
    arena::TreeArena,
    branch::{Branch, BranchKind},
    builder::Builder,
    condition::{condition, invert, watch},
    executor::TreeExecutor,
    handle::NodeHandle,
    multiplexer::Multiplexer,
    node::{
        Callback, Node, NodeError, NodeKind, Outcome, Status, TreeStatus, FAILURE_CODE, SUCCESS_CODE,
    },
    timer::Timer,
};
