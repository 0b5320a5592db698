use super::arena::TreeArena;
use super::handle::NodeHandle;
use super::node::{Callback, NodeError, Status};

/// Fluent construction of a (sub)tree in a [`TreeArena`].
///
/// Every call appends in declaration order. The first construction error is
/// kept and reported by [`Builder::build`], later calls become no-ops.
///
/// ```
/// use tick_tree::{Status, TreeArena};
///
/// let mut arena: TreeArena<Vec<u32>> = TreeArena::new();
/// let root = arena
///     .sequence()
///     .selector(|b| {
///         b.leaf(|v: &mut Vec<u32>, _: &mut ()| {
///             v.push(0);
///             Status::Failure
///         })
///         .leaf(|v: &mut Vec<u32>, _: &mut ()| {
///             v.push(1);
///             Status::Success
///         })
///     })
///     .attempts(3)
///     .build()
///     .unwrap();
/// assert_eq!(arena.get(root).unwrap().children().len(), 1);
/// ```
pub struct Builder<'t, C, LM, DM> {
    arena: &'t mut TreeArena<C, LM, DM>,
    handle: NodeHandle,
    error: Option<NodeError>,
}

impl<'t, C, LM, DM> Builder<'t, C, LM, DM> {
    pub(crate) fn new(arena: &'t mut TreeArena<C, LM, DM>, handle: NodeHandle) -> Self {
        Self {
            arena,
            handle,
            error: None,
        }
    }

    pub fn handle(&self) -> NodeHandle {
        self.handle
    }

    pub fn build(self) -> Result<NodeHandle, NodeError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.handle),
        }
    }

    fn record(mut self, result: Result<(), NodeError>) -> Self {
        if let Err(err) = result {
            log::warn!("Builder {} - construction failed: {err}", self.handle);
            self.error.get_or_insert(err);
        }
        self
    }

    pub fn name<S: Into<String>>(self, name: S) -> Self {
        if self.error.is_some() {
            return self;
        }
        let result = self.arena.set_name(self.handle, name);
        self.record(result)
    }

    pub fn decorate<F>(self, decorator: F) -> Self
    where
        F: Fn(&mut C, &mut DM) -> Status + 'static,
    {
        if self.error.is_some() {
            return self;
        }
        let result = self.arena.decorate(self.handle, decorator);
        self.record(result)
    }

    pub fn decorate_all(self, decorators: Vec<Callback<C, DM>>) -> Self {
        if self.error.is_some() {
            return self;
        }
        let result = self.arena.decorate_all(self.handle, decorators);
        self.record(result)
    }

    pub fn loops(self, loops: u64) -> Self {
        if self.error.is_some() {
            return self;
        }
        let result = self.arena.set_loops(self.handle, loops);
        self.record(result)
    }

    pub fn attempts(self, attempts: u64) -> Self {
        if self.error.is_some() {
            return self;
        }
        let result = self.arena.set_attempts(self.handle, attempts);
        self.record(result)
    }

    /// Appends an already constructed node, which may be shared between parents.
    pub fn node(self, child: NodeHandle) -> Self {
        if self.error.is_some() {
            return self;
        }
        let result = self.arena.add_child(self.handle, child);
        self.record(result)
    }

    pub fn leaf<F>(self, exec: F) -> Self
    where
        F: Fn(&mut C, &mut LM) -> Status + 'static,
    {
        self.leaf_with(exec, |b| b)
    }

    pub fn leaf_with<F, B>(self, exec: F, build: B) -> Self
    where
        F: Fn(&mut C, &mut LM) -> Status + 'static,
        B: FnOnce(Builder<'_, C, LM, DM>) -> Builder<'_, C, LM, DM>,
    {
        if self.error.is_some() {
            return self;
        }
        let child = self.arena.create_leaf(exec);
        self.child(child, build)
    }

    pub fn sequence<B>(self, build: B) -> Self
    where
        B: FnOnce(Builder<'_, C, LM, DM>) -> Builder<'_, C, LM, DM>,
    {
        if self.error.is_some() {
            return self;
        }
        let child = self.arena.create_sequence();
        self.child(child, build)
    }

    pub fn selector<B>(self, build: B) -> Self
    where
        B: FnOnce(Builder<'_, C, LM, DM>) -> Builder<'_, C, LM, DM>,
    {
        if self.error.is_some() {
            return self;
        }
        let child = self.arena.create_selector();
        self.child(child, build)
    }

    pub fn multiplexer<B>(self, build: B) -> Self
    where
        B: FnOnce(Builder<'_, C, LM, DM>) -> Builder<'_, C, LM, DM>,
    {
        if self.error.is_some() {
            return self;
        }
        let child = self.arena.create_multiplexer();
        self.child(child, build)
    }

    pub fn gated_multiplexer<F, B>(self, gate: F, build: B) -> Self
    where
        F: Fn(&mut C, &mut LM) -> Status + 'static,
        B: FnOnce(Builder<'_, C, LM, DM>) -> Builder<'_, C, LM, DM>,
    {
        if self.error.is_some() {
            return self;
        }
        let child = self.arena.create_gated_multiplexer(gate);
        self.child(child, build)
    }

    fn child<B>(self, child: NodeHandle, build: B) -> Self
    where
        B: FnOnce(Builder<'_, C, LM, DM>) -> Builder<'_, C, LM, DM>,
    {
        let Self {
            arena,
            handle,
            error,
        } = self;
        let result = match build(Builder::new(&mut *arena, child)).error {
            Some(err) => Err(err),
            None => arena.add_child(handle, child),
        };
        Self {
            arena,
            handle,
            error,
        }
        .record(result)
    }
}
