use super::node::{Callback, Status};

/// Terminal node running a single action callback.
pub struct Leaf<C, LM> {
    exec: Callback<C, LM>,
}

impl<C, LM> Leaf<C, LM> {
    pub(crate) fn new(exec: Callback<C, LM>) -> Self {
        Self { exec }
    }

    pub(crate) fn execute(&self, ctx: &mut C, memory: &mut LM) -> Status {
        (self.exec)(ctx, memory)
    }
}

/*
Canned actions are pre-implemented for convenience
*/

/// Action that succeeds without side effects.
pub fn succeed<C, M>(_: &mut C, _: &mut M) -> Status {
    Status::Success
}

/// Action that fails without side effects.
pub fn fail<C, M>(_: &mut C, _: &mut M) -> Status {
    Status::Failure
}

/// Action that stays running for `delay` clock units once, then succeeds.
///
/// The wait is tracked in the per-activation memory, so it restarts whenever
/// the node is freshly entered.
pub fn wait<C, M>(delay: u64) -> impl Fn(&mut C, &mut M) -> Status
where
    M: AsMut<bool>,
{
    move |_, memory| {
        let waited = memory.as_mut();
        if *waited {
            Status::Success
        } else {
            *waited = true;
            Status::Running(delay)
        }
    }
}

/// Adapts a callback speaking the integer encoding (`-1` success, `-2`
/// failure, `>= 0` delay). Any other code is a contract violation: it is
/// logged and resolves the node as failed.
pub fn raw<C, M, F>(exec: F) -> impl Fn(&mut C, &mut M) -> Status
where
    F: Fn(&mut C, &mut M) -> i64,
{
    move |ctx, memory| {
        let code = exec(ctx, memory);
        match Status::try_from(code) {
            Ok(status) => status,
            Err(e) => {
                log::error!("Rejected callback result: {e}");
                Status::Failure
            }
        }
    }
}
