use super::node::Status;

/// Decorator passing while `predicate` holds on the context, vetoing otherwise.
pub fn condition<C, M, P>(predicate: P) -> impl Fn(&mut C, &mut M) -> Status
where
    P: Fn(&C) -> bool,
{
    move |ctx, _| Status::from(predicate(ctx))
}

/// Like [`condition`], but re-checks every `interval` clock units while the
/// guarded node stays active instead of passing once.
pub fn watch<C, M, P>(predicate: P, interval: u64) -> impl Fn(&mut C, &mut M) -> Status
where
    P: Fn(&C) -> bool,
{
    move |ctx, _| {
        if predicate(ctx) {
            Status::Running(interval)
        } else {
            Status::Failure
        }
    }
}

/// Swaps success and failure of `inner`, running results pass through.
pub fn invert<C, M, F>(inner: F) -> impl Fn(&mut C, &mut M) -> Status
where
    F: Fn(&mut C, &mut M) -> Status,
{
    move |ctx, memory| match inner(ctx, memory) {
        Status::Success => Status::Failure,
        Status::Failure => Status::Success,
        running => running,
    }
}
