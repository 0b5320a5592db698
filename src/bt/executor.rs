use super::arena::TreeArena;
use super::branch::{Step, Traversal};
use super::handle::NodeHandle;
use super::node::{NodeError, NodeKind, Outcome, Status, TreeStatus};
use super::stack::{DecoratorStack, DecoratorStackEntry, NodeStack, NodeStackEntry};
use super::timer::Timer;

/// States of one tick. The traversal only leaves the loop in `update` when it
/// suspends or the whole tree resolves, the stacks carry it across ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    /// Pop back to the node at `target` and hand it `outcome`. `None` is above the root.
    Rebuild {
        target: Option<usize>,
        outcome: Outcome,
    },
    Traverse(Traversal),
    AddChild(NodeHandle),
    Execute,
    Suspend,
}

/// Resumable depth-first traversal of one tree.
///
/// Every call to [`update`](TreeExecutor::update) either resolves the whole
/// tree or suspends at a leaf or multiplexer that asked to be polled again
/// later. No host stack frames are kept while suspended: the path is held in
/// the node stack, pending decorators in the decorator stack.
pub struct TreeExecutor<'a, C, LM = (), DM = LM> {
    arena: &'a TreeArena<C, LM, DM>,
    root: NodeHandle,
    end_timer: Timer,
    subtrees: Vec<TreeExecutor<'a, C, LM, DM>>,
    node_stack: NodeStack<LM>,
    decorator_stack: DecoratorStack<DM>,
}

impl<'a, C, LM, DM> TreeExecutor<'a, C, LM, DM>
where
    LM: Default,
    DM: Default,
{
    pub fn new(arena: &'a TreeArena<C, LM, DM>, root: NodeHandle) -> Result<Self, NodeError> {
        arena.verify(root)?;
        Ok(Self::verified(arena, root))
    }

    fn verified(arena: &'a TreeArena<C, LM, DM>, root: NodeHandle) -> Self {
        Self {
            arena,
            root,
            end_timer: Timer::default(),
            subtrees: vec![],
            node_stack: NodeStack::default(),
            decorator_stack: DecoratorStack::default(),
        }
    }

    pub fn root(&self) -> NodeHandle {
        self.root
    }

    pub fn node_stack_depth(&self) -> usize {
        self.node_stack.len()
    }

    pub fn decorator_stack_depth(&self) -> usize {
        self.decorator_stack.len()
    }

    /// Drops all traversal state, the next tick starts again at the root.
    pub fn reset(&mut self) {
        self.node_stack.clear();
        self.decorator_stack.clear();
        self.subtrees.clear();
        self.end_timer.clear();
    }

    /// Runs one tick at logical time `now`, which must never decrease between calls.
    pub fn update(&mut self, ctx: &mut C, now: u64) -> TreeStatus {
        let mut state = State::Start;
        loop {
            log::trace!("Executor {} - {:?}", self.root, state);
            state = match state {
                State::Start => self.start(ctx, now),
                State::Rebuild {
                    target: None,
                    outcome,
                } => {
                    log::debug!(
                        "Executor {} - tree resolved with {:?}",
                        self.label(self.root),
                        outcome
                    );
                    self.reset();
                    return outcome.into();
                }
                State::Rebuild {
                    target: Some(index),
                    outcome,
                } => self.rebuild(index, outcome),
                State::Traverse(arrival) => self.traverse(arrival),
                State::AddChild(child) => self.add_child(ctx, now, child),
                State::Execute => self.execute(ctx, now),
                State::Suspend => return TreeStatus::Running,
            }
        }
    }

    fn start(&mut self, ctx: &mut C, now: u64) -> State {
        if self.node_stack.is_empty() {
            return State::AddChild(self.root);
        }

        let arena = self.arena;
        for entry in self.decorator_stack.iter_mut() {
            if !entry.timer.has_passed(now) {
                continue;
            }
            let owner = match self.node_stack.get(entry.node_index) {
                Some(owner) => owner.node,
                None => panic!(
                    "Decorator entry points at node stack index {} beyond depth {}",
                    entry.node_index,
                    self.node_stack.len()
                ),
            };
            let decorator = &arena.node(owner).decorators()[entry.decorator_index];
            match decorator(ctx, &mut entry.memory) {
                Status::Success => entry.timer.disable(),
                Status::Failure => {
                    log::debug!(
                        "Executor {} - decorator {} of {:?} failed",
                        self.root,
                        entry.decorator_index,
                        arena.node(owner).label()
                    );
                    // The owner may be a leaf, so its parent records the failure
                    return State::Rebuild {
                        target: entry.node_index.checked_sub(1),
                        outcome: Outcome::Failure,
                    };
                }
                Status::Running(delay) => entry.timer.set(now, delay),
            }
        }
        State::Execute
    }

    fn rebuild(&mut self, index: usize, outcome: Outcome) -> State {
        self.node_stack.truncate(index + 1);
        let checkpoint = match self.node_stack.top() {
            Some(top) => top.checkpoint,
            None => panic!("Rebuild to index {index} on an empty node stack"),
        };
        self.decorator_stack.truncate(checkpoint);
        // Only a branch can be left on top, any multiplexer below it is gone
        self.subtrees.clear();
        State::Traverse(outcome.into())
    }

    fn traverse(&mut self, arrival: Traversal) -> State {
        let arena = self.arena;
        let index = self.node_stack.len().wrapping_sub(1);
        let top = match self.node_stack.top_mut() {
            Some(top) => top,
            None => panic!("Traverse on an empty node stack"),
        };
        let branch = match arena.node(top.node).kind() {
            NodeKind::Branch(branch) => branch,
            _ => panic!("Traverse reached non-branch node {}", top.node),
        };
        match branch.advance(&mut top.counters, arrival) {
            Step::Enter(child) => State::AddChild(child),
            Step::Resolve(outcome) => {
                log::trace!(
                    "Executor {} - {:?} resolved with {:?}",
                    self.root,
                    arena.node(top.node).label(),
                    outcome
                );
                State::Rebuild {
                    target: index.checked_sub(1),
                    outcome,
                }
            }
        }
    }

    fn add_child(&mut self, ctx: &mut C, now: u64, child: NodeHandle) -> State {
        let arena = self.arena;
        let node = arena.node(child);
        let index = self.node_stack.len();
        let checkpoint = self.decorator_stack.len();

        for (decorator_index, decorator) in node.decorators().iter().enumerate() {
            let mut memory = DM::default();
            match decorator(ctx, &mut memory) {
                Status::Success => {}
                Status::Failure => {
                    log::debug!(
                        "Executor {} - decorator {} vetoed {:?}",
                        self.root,
                        decorator_index,
                        node.label()
                    );
                    // The child was never pushed, drop whatever it queued
                    self.decorator_stack.truncate(checkpoint);
                    return if self.node_stack.is_empty() {
                        State::Rebuild {
                            target: None,
                            outcome: Outcome::Failure,
                        }
                    } else {
                        State::Traverse(Traversal::Failure)
                    };
                }
                Status::Running(delay) => self.decorator_stack.push(DecoratorStackEntry::new(
                    index,
                    decorator_index,
                    memory,
                    Timer::armed(now, delay),
                )),
            }
        }

        self.node_stack
            .push(NodeStackEntry::new(child, self.decorator_stack.len()));
        match node.kind() {
            NodeKind::Branch(_) => State::Traverse(Traversal::Descend),
            NodeKind::Multiplexer(multiplexer) => {
                self.subtrees = multiplexer
                    .children()
                    .iter()
                    .map(|&subtree| TreeExecutor::verified(arena, subtree))
                    .collect();
                self.end_timer.clear();
                State::Execute
            }
            NodeKind::Leaf(_) => {
                self.end_timer.clear();
                State::Execute
            }
        }
    }

    fn execute(&mut self, ctx: &mut C, now: u64) -> State {
        let arena = self.arena;
        let index = self.node_stack.len().wrapping_sub(1);
        if !self.end_timer.has_passed(now) {
            return State::Suspend;
        }
        let top = match self.node_stack.top_mut() {
            Some(top) => top,
            None => panic!("Execute on an empty node stack"),
        };

        let status = match arena.node(top.node).kind() {
            NodeKind::Leaf(leaf) => leaf.execute(ctx, &mut top.memory),
            NodeKind::Multiplexer(multiplexer) => {
                let gate = multiplexer.poll_gate(ctx, &mut top.memory);
                // Subtrees run with the gate, whatever it answered
                for subtree in self.subtrees.iter_mut() {
                    subtree.update(ctx, now);
                }
                gate
            }
            NodeKind::Branch(_) => panic!("Execute reached branch node {}", top.node),
        };

        match status {
            Status::Success => State::Rebuild {
                target: index.checked_sub(1),
                outcome: Outcome::Success,
            },
            Status::Failure => State::Rebuild {
                target: index.checked_sub(1),
                outcome: Outcome::Failure,
            },
            Status::Running(delay) => {
                self.end_timer.set(now, delay);
                State::Suspend
            }
        }
    }

    fn label(&self, handle: NodeHandle) -> &str {
        self.arena.node(handle).label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bt::action::succeed;
    use crate::logging::load_logger;

    type TP = Vec<u32>;

    fn push(value: u32, status: Status) -> impl Fn(&mut TP, &mut ()) -> Status {
        move |v, _| {
            v.push(value);
            status
        }
    }

    #[test]
    fn test_root_decorator_veto_fails_tree() {
        load_logger();
        let mut arena: TreeArena<TP> = TreeArena::new();
        let root = arena
            .leaf(push(0, Status::Success))
            .decorate(push(1, Status::Failure))
            .build()
            .unwrap();
        let mut exec = TreeExecutor::new(&arena, root).unwrap();
        let mut vec = vec![];

        assert_eq!(exec.update(&mut vec, 0), TreeStatus::Failure);
        assert_eq!(vec, vec![1]);
        assert_eq!(exec.node_stack_depth(), 0);
        assert_eq!(exec.decorator_stack_depth(), 0);
    }

    #[test]
    fn test_vetoed_child_counts_as_failed_candidate() {
        let mut arena: TreeArena<TP> = TreeArena::new();
        let root = arena
            .selector()
            .leaf_with(push(0, Status::Success), |b| {
                b.decorate(push(9, Status::INSTANT))
                    .decorate(push(1, Status::Failure))
            })
            .leaf(push(2, Status::Success))
            .build()
            .unwrap();
        let mut exec = TreeExecutor::new(&arena, root).unwrap();
        let mut vec = vec![];

        assert_eq!(exec.update(&mut vec, 0), TreeStatus::Success);
        assert_eq!(vec, vec![9, 1, 2]);
        assert_eq!(exec.decorator_stack_depth(), 0);
    }

    #[test]
    fn test_pending_decorators_queue_on_stack() {
        let mut arena: TreeArena<TP> = TreeArena::new();
        let root = arena
            .sequence()
            .decorate(push(0, Status::INSTANT))
            .leaf_with(push(1, Status::INSTANT), |b| {
                b.decorate(push(2, Status::Running(5)))
                    .decorate(push(3, Status::Success))
            })
            .build()
            .unwrap();
        let mut exec = TreeExecutor::new(&arena, root).unwrap();
        let mut vec = vec![];

        assert_eq!(exec.update(&mut vec, 0), TreeStatus::Running);
        assert_eq!(vec, vec![0, 2, 3, 1]);
        assert_eq!(exec.node_stack_depth(), 2);
        assert_eq!(exec.decorator_stack_depth(), 2);

        // Succeeded decorators are not re-run, delayed ones wait for their timer
        exec.update(&mut vec, 1);
        assert_eq!(vec, vec![0, 2, 3, 1, 0, 1]);
        exec.update(&mut vec, 5);
        assert_eq!(vec, vec![0, 2, 3, 1, 0, 1, 0, 2, 1]);
    }

    #[test]
    fn test_consumed_decorator_is_not_polled_again() {
        let mut arena: TreeArena<TP> = TreeArena::new();
        let root = arena
            .leaf(push(0, Status::INSTANT))
            .decorate(|v: &mut TP, _: &mut ()| {
                v.push(1);
                if v.len() > 2 {
                    Status::Success
                } else {
                    Status::INSTANT
                }
            })
            .build()
            .unwrap();
        let mut exec = TreeExecutor::new(&arena, root).unwrap();
        let mut vec = vec![];

        exec.update(&mut vec, 0);
        exec.update(&mut vec, 0);
        exec.update(&mut vec, 0);
        assert_eq!(vec, vec![1, 0, 1, 0, 0]);
    }

    #[test]
    fn test_decorator_failure_during_scan_fails_owner() {
        let mut arena: TreeArena<TP> = TreeArena::new();
        let root = arena
            .selector()
            .leaf_with(push(0, Status::INSTANT), |b| {
                b.decorate(|v: &mut TP, _: &mut ()| {
                    v.push(1);
                    if v.len() > 2 {
                        Status::Failure
                    } else {
                        Status::INSTANT
                    }
                })
            })
            .leaf(push(2, Status::Success))
            .build()
            .unwrap();
        let mut exec = TreeExecutor::new(&arena, root).unwrap();
        let mut vec = vec![];

        assert_eq!(exec.update(&mut vec, 0), TreeStatus::Running);
        assert_eq!(exec.update(&mut vec, 0), TreeStatus::Success);
        assert_eq!(vec, vec![1, 0, 1, 2]);
        assert_eq!(exec.node_stack_depth(), 0);
    }

    //  Selector
    //  |- [D1, D2] Leaf0
    //  `- Leaf3
    //
    // D1 fails on its second poll, D2 is skipped and the selector moves on
    #[test]
    fn test_decorator_failure_stops_scan() {
        let mut arena: TreeArena<TP> = TreeArena::new();
        let root = arena
            .selector()
            .leaf_with(push(0, Status::INSTANT), |b| {
                b.decorate(|v: &mut TP, _: &mut ()| {
                    v.push(1);
                    if v.iter().filter(|&&x| x == 1).count() > 1 {
                        Status::Failure
                    } else {
                        Status::INSTANT
                    }
                })
                .decorate(push(2, Status::INSTANT))
            })
            .leaf(push(3, Status::Success))
            .build()
            .unwrap();
        let mut exec = TreeExecutor::new(&arena, root).unwrap();
        let mut vec = vec![];

        assert_eq!(exec.update(&mut vec, 0), TreeStatus::Running);
        assert_eq!(vec, vec![1, 2, 0]);
        assert_eq!(exec.decorator_stack_depth(), 2);

        assert_eq!(exec.update(&mut vec, 0), TreeStatus::Success);
        assert_eq!(vec, vec![1, 2, 0, 1, 3]);
        assert_eq!(exec.decorator_stack_depth(), 0);
    }

    #[test]
    fn test_gated_multiplexer_resolves_and_drops_subtrees() {
        let mut arena: TreeArena<TP> = TreeArena::new();
        let root = arena
            .sequence()
            .gated_multiplexer(
                |v: &mut TP, _: &mut ()| {
                    v.push(9);
                    if v.len() > 1 {
                        Status::Success
                    } else {
                        Status::INSTANT
                    }
                },
                |b| b.leaf(push(0, Status::INSTANT)),
            )
            .leaf(push(1, Status::Success))
            .build()
            .unwrap();
        let mut exec = TreeExecutor::new(&arena, root).unwrap();
        let mut vec = vec![];

        assert_eq!(exec.update(&mut vec, 0), TreeStatus::Running);
        assert_eq!(vec, vec![9, 0]);
        assert_eq!(exec.update(&mut vec, 0), TreeStatus::Success);
        assert_eq!(vec, vec![9, 0, 9, 0, 1]);
        assert!(exec.subtrees.is_empty());
    }

    #[test]
    fn test_subtrees_wait_for_gate_delay() {
        let mut arena: TreeArena<TP> = TreeArena::new();
        let root = arena
            .gated_multiplexer(push(9, Status::Running(10)))
            .leaf(push(0, Status::INSTANT))
            .build()
            .unwrap();
        let mut exec = TreeExecutor::new(&arena, root).unwrap();
        let mut vec = vec![];

        assert_eq!(exec.update(&mut vec, 0), TreeStatus::Running);
        assert_eq!(exec.update(&mut vec, 1), TreeStatus::Running);
        assert_eq!(vec, vec![9, 0]);
        assert_eq!(exec.update(&mut vec, 10), TreeStatus::Running);
        assert_eq!(vec, vec![9, 0, 9, 0]);
    }

    #[test]
    fn test_nested_multiplexers() {
        let mut arena: TreeArena<TP> = TreeArena::new();
        let root = arena
            .multiplexer()
            .multiplexer(|b| b.leaf(push(0, Status::INSTANT)).leaf(push(1, Status::INSTANT)))
            .leaf(push(2, Status::INSTANT))
            .build()
            .unwrap();
        let mut exec = TreeExecutor::new(&arena, root).unwrap();
        let mut vec = vec![];

        exec.update(&mut vec, 0);
        assert_eq!(vec, vec![0, 1, 2]);
    }

    #[test]
    fn test_reset_restarts_from_root() {
        let mut arena: TreeArena<TP> = TreeArena::new();
        let root = arena.create_leaf(push(0, Status::Running(100)));
        let mut exec = TreeExecutor::new(&arena, root).unwrap();
        let mut vec = vec![];

        exec.update(&mut vec, 0);
        exec.reset();
        exec.update(&mut vec, 1);
        assert_eq!(vec, vec![0, 0]);
    }

    #[test]
    fn test_foreign_root_is_rejected() {
        let arena: TreeArena<TP> = TreeArena::new();
        let mut other: TreeArena<TP> = TreeArena::new();
        let root = other.create_leaf(succeed);

        assert_eq!(
            TreeExecutor::new(&arena, root).err(),
            Some(NodeError::ForeignHandle(root))
        );
    }

    #[derive(Default)]
    struct InitInteger {
        i: u32,
    }

    //  Leaf0
    //
    // No delay, every tick runs the leaf once and resolves the tree
    #[test]
    fn test_leaf_without_delay() {
        let mut arena: TreeArena<TP> = TreeArena::new();
        let root = arena.create_leaf(push(0, Status::Success));
        let mut exec = TreeExecutor::new(&arena, root).unwrap();
        let mut vec = vec![];

        for _ in 0..3 {
            assert_eq!(exec.update(&mut vec, 0), TreeStatus::Success);
            assert_eq!(exec.node_stack_depth(), 0);
        }
        assert_eq!(vec, vec![0, 0, 0]);
    }

    //  Leaf0 (1)
    //
    // The leaf asks to be polled one clock unit later
    #[test]
    fn test_leaf_with_delay() {
        let mut arena: TreeArena<TP> = TreeArena::new();
        let root = arena.create_leaf(push(0, Status::Running(1)));
        let mut vec = vec![];

        let mut exec = TreeExecutor::new(&arena, root).unwrap();
        exec.update(&mut vec, 0);
        exec.update(&mut vec, 0);
        assert_eq!(vec, vec![0]);

        exec.update(&mut vec, 1);
        assert_eq!(vec, vec![0, 0]);

        // Overshooting the deadline fires once
        let mut vec = vec![];
        let mut exec = TreeExecutor::new(&arena, root).unwrap();
        exec.update(&mut vec, 0);
        exec.update(&mut vec, 4);
        assert_eq!(vec, vec![0, 0]);
    }

    #[test]
    fn test_decorator_without_delay() {
        let mut arena: TreeArena<TP> = TreeArena::new();
        let root = arena
            .leaf(|_: &mut TP, _: &mut ()| Status::INSTANT)
            .decorate(push(0, Status::INSTANT))
            .build()
            .unwrap();
        let mut exec = TreeExecutor::new(&arena, root).unwrap();
        let mut vec = vec![];

        exec.update(&mut vec, 0);
        assert_eq!(vec, vec![0]);
        exec.update(&mut vec, 0);
        assert_eq!(vec, vec![0, 0]);
    }

    #[test]
    fn test_decorator_with_delay() {
        let mut arena: TreeArena<TP> = TreeArena::new();
        let root = arena
            .leaf(|_: &mut TP, _: &mut ()| Status::INSTANT)
            .decorate(push(0, Status::Running(1)))
            .build()
            .unwrap();
        let mut exec = TreeExecutor::new(&arena, root).unwrap();
        let mut vec = vec![];

        exec.update(&mut vec, 0);
        exec.update(&mut vec, 0);
        assert_eq!(vec, vec![0]);
        exec.update(&mut vec, 2);
        assert_eq!(vec, vec![0, 0]);
    }

    #[test]
    fn test_leaf_with_two_decorators() {
        let mut arena: TreeArena<TP> = TreeArena::new();
        let root = arena
            .leaf(push(0, Status::INSTANT))
            .decorate(push(1, Status::INSTANT))
            .decorate(push(2, Status::INSTANT))
            .build()
            .unwrap();
        let mut exec = TreeExecutor::new(&arena, root).unwrap();
        let mut vec = vec![];

        exec.update(&mut vec, 0);
        assert_eq!(vec, vec![1, 2, 0]);
        exec.update(&mut vec, 0);
        assert_eq!(vec, vec![1, 2, 0, 1, 2, 0]);
    }

    //       Seq
    //     /     \
    //  Leaf0  Leaf1 (1 -> Success)
    #[test]
    fn test_sequence_resumes_at_delayed_leaf() {
        let mut arena: TreeArena<TP> = TreeArena::new();
        let root = arena
            .sequence()
            .leaf(push(0, Status::Success))
            .leaf(|v: &mut TP, _: &mut ()| {
                v.push(1);
                if v.len() == 3 {
                    Status::Success
                } else {
                    Status::Running(1)
                }
            })
            .build()
            .unwrap();
        let mut exec = TreeExecutor::new(&arena, root).unwrap();
        let mut vec = vec![];

        assert_eq!(exec.update(&mut vec, 0), TreeStatus::Running);
        assert_eq!(exec.update(&mut vec, 0), TreeStatus::Running);
        assert_eq!(vec, vec![0, 1]);

        assert_eq!(exec.update(&mut vec, 1), TreeStatus::Success);
        assert_eq!(vec, vec![0, 1, 1]);
        assert_eq!(exec.node_stack_depth(), 0);
    }

    //         Sel
    //       /     \
    //  Leaf0       Leaf1
    // (Failure ->  (Success)
    //  Success)
    #[test]
    fn test_selector_fails_over_within_one_tick() {
        let mut arena: TreeArena<TP> = TreeArena::new();
        let root = arena
            .selector()
            .leaf(|v: &mut TP, _: &mut ()| {
                v.push(0);
                Status::from(v.len() > 1)
            })
            .leaf(push(1, Status::Success))
            .build()
            .unwrap();
        let mut exec = TreeExecutor::new(&arena, root).unwrap();
        let mut vec = vec![];

        assert_eq!(exec.update(&mut vec, 0), TreeStatus::Success);
        assert_eq!(vec, vec![0, 1]);
        assert_eq!(exec.node_stack_depth(), 0);

        assert_eq!(exec.update(&mut vec, 0), TreeStatus::Success);
        assert_eq!(vec, vec![0, 1, 0]);
        assert_eq!(exec.node_stack_depth(), 0);
    }

    //    Seq [2]
    //     |
    //    Seq [0]
    //     |
    //   Leaf1
    //
    // Outer decorators are polled before inner ones
    #[test]
    fn test_deep_decorators() {
        let mut arena: TreeArena<TP> = TreeArena::new();
        let root = arena
            .sequence()
            .sequence(|b| {
                b.decorate(push(0, Status::INSTANT))
                    .leaf(push(1, Status::INSTANT))
            })
            .decorate(push(2, Status::INSTANT))
            .build()
            .unwrap();
        let mut exec = TreeExecutor::new(&arena, root).unwrap();
        let mut vec = vec![];

        exec.update(&mut vec, 0);
        assert_eq!(vec, vec![2, 0, 1]);
        exec.update(&mut vec, 0);
        assert_eq!(vec, vec![2, 0, 1, 2, 0, 1]);
    }

    //   Seq [2, 3]
    //     |
    //    Seq [0]
    //     |
    //   Leaf1 (Success)
    #[test]
    fn test_deep_decorators_unload_with_leaf() {
        let mut arena: TreeArena<TP> = TreeArena::new();
        let root = arena
            .sequence()
            .sequence(|b| {
                b.decorate(push(0, Status::INSTANT))
                    .leaf(push(1, Status::Success))
            })
            .decorate(push(2, Status::INSTANT))
            .decorate(push(3, Status::INSTANT))
            .build()
            .unwrap();
        let mut exec = TreeExecutor::new(&arena, root).unwrap();
        let mut vec = vec![];

        exec.update(&mut vec, 0);
        exec.update(&mut vec, 0);
        assert_eq!(vec, vec![2, 3, 0, 1, 2, 3, 0, 1]);
        assert_eq!(exec.decorator_stack_depth(), 0);
    }

    //        Seq [3]
    //       /       \
    //   Seq [0]     Seq
    //     |          |
    //   Leaf1      Leaf2 (0)
    //  (Success)
    #[test]
    fn test_deep_decorators_unload_with_branch() {
        let mut arena: TreeArena<TP> = TreeArena::new();
        let root = arena
            .sequence()
            .sequence(|b| {
                b.decorate(push(0, Status::INSTANT))
                    .leaf(push(1, Status::Success))
            })
            .sequence(|b| b.leaf(push(2, Status::INSTANT)))
            .decorate(push(3, Status::INSTANT))
            .build()
            .unwrap();
        let mut exec = TreeExecutor::new(&arena, root).unwrap();
        let mut vec = vec![];

        exec.update(&mut vec, 0);
        assert_eq!(exec.decorator_stack_depth(), 1);
        exec.update(&mut vec, 0);
        assert_eq!(vec, vec![3, 0, 1, 2, 3, 2]);
    }

    #[test]
    fn test_sequence_loops() {
        let mut arena: TreeArena<u32> = TreeArena::new();
        let root = arena
            .sequence()
            .sequence(|b| {
                b.loops(25).leaf(|v: &mut u32, _: &mut ()| {
                    *v += 1;
                    Status::Success
                })
            })
            .build()
            .unwrap();
        let mut exec = TreeExecutor::new(&arena, root).unwrap();
        let mut counter = 0;

        assert_eq!(exec.update(&mut counter, 0), TreeStatus::Success);
        assert_eq!(counter, 25);
    }

    #[test]
    fn test_sequence_attempts() {
        let mut arena: TreeArena<u32> = TreeArena::new();
        let root = arena
            .sequence()
            .sequence(|b| {
                b.attempts(25).leaf(|v: &mut u32, _: &mut ()| {
                    *v += 1;
                    Status::Failure
                })
            })
            .build()
            .unwrap();
        let mut exec = TreeExecutor::new(&arena, root).unwrap();
        let mut counter = 0;

        assert_eq!(exec.update(&mut counter, 0), TreeStatus::Failure);
        assert_eq!(counter, 25);
    }

    //        Mux
    //       /   \
    //   Leaf0   Leaf1
    #[test]
    fn test_multiplexer_fans_out_every_tick() {
        let mut arena: TreeArena<TP> = TreeArena::new();
        let root = arena
            .multiplexer()
            .leaf(push(0, Status::INSTANT))
            .leaf(push(1, Status::INSTANT))
            .build()
            .unwrap();
        let mut exec = TreeExecutor::new(&arena, root).unwrap();
        let mut vec = vec![];

        exec.update(&mut vec, 0);
        assert_eq!(vec, vec![0, 1]);
        exec.update(&mut vec, 0);
        assert_eq!(vec, vec![0, 1, 0, 1]);
    }

    #[test]
    fn test_leaf_memory_clears_after_reset() {
        let mut arena: TreeArena<TP, InitInteger> = TreeArena::new();
        let root = arena.create_leaf(|v: &mut TP, memory: &mut InitInteger| {
            v.push(memory.i);
            memory.i += 1;
            Status::Success
        });
        let mut exec = TreeExecutor::new(&arena, root).unwrap();
        let mut vec = vec![];

        exec.update(&mut vec, 0);
        exec.update(&mut vec, 0);
        assert_eq!(vec, vec![0, 0]);
    }

    #[test]
    fn test_leaf_memory_stays_without_reset() {
        let mut arena: TreeArena<TP, InitInteger> = TreeArena::new();
        let root = arena.create_leaf(|v: &mut TP, memory: &mut InitInteger| {
            v.push(memory.i);
            memory.i += 1;
            Status::INSTANT
        });
        let mut exec = TreeExecutor::new(&arena, root).unwrap();
        let mut vec = vec![];

        exec.update(&mut vec, 0);
        exec.update(&mut vec, 0);
        assert_eq!(vec, vec![0, 1]);
    }

    #[test]
    fn test_decorator_memory_clears_after_reset() {
        let mut arena: TreeArena<TP, (), InitInteger> = TreeArena::new();
        let root = arena
            .leaf(|_: &mut TP, _: &mut ()| Status::INSTANT)
            .decorate(|v: &mut TP, memory: &mut InitInteger| {
                v.push(memory.i);
                memory.i += 1;
                Status::Failure
            })
            .build()
            .unwrap();
        let mut exec = TreeExecutor::new(&arena, root).unwrap();
        let mut vec = vec![];

        exec.update(&mut vec, 0);
        exec.update(&mut vec, 0);
        assert_eq!(vec, vec![0, 0]);
    }

    #[test]
    fn test_decorator_memory_stays_without_reset() {
        let mut arena: TreeArena<TP, (), InitInteger> = TreeArena::new();
        let root = arena
            .leaf(|_: &mut TP, _: &mut ()| Status::INSTANT)
            .decorate(|v: &mut TP, memory: &mut InitInteger| {
                v.push(memory.i);
                memory.i += 1;
                Status::INSTANT
            })
            .build()
            .unwrap();
        let mut exec = TreeExecutor::new(&arena, root).unwrap();
        let mut vec = vec![];

        exec.update(&mut vec, 0);
        exec.update(&mut vec, 0);
        assert_eq!(vec, vec![0, 1]);
    }
}
