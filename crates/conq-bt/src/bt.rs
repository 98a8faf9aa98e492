use std::borrow::Cow;

/// Tagged evaluation result.
///
/// The tree contract is two-valued: [`BtNode::run`] returns `bool`. `BtStatus` is the opt-in
/// extension for callers that want to observe multi-tick work (`Running`) through
/// [`BtNode::tick`]. Under the boolean contract `Running` counts as success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BtStatus {
    Running,
    Success,
    Failure,
}

impl BtStatus {
    pub fn is_success(self) -> bool {
        matches!(self, BtStatus::Success)
    }

    pub fn is_failure(self) -> bool {
        matches!(self, BtStatus::Failure)
    }

    /// Collapse to the boolean contract: only `Failure` is `false`.
    pub fn as_bool(self) -> bool {
        !self.is_failure()
    }

    /// Swap `Success` and `Failure`; `Running` is unchanged.
    pub fn invert(self) -> Self {
        match self {
            BtStatus::Success => BtStatus::Failure,
            BtStatus::Failure => BtStatus::Success,
            BtStatus::Running => BtStatus::Running,
        }
    }
}

impl From<bool> for BtStatus {
    fn from(value: bool) -> Self {
        if value {
            BtStatus::Success
        } else {
            BtStatus::Failure
        }
    }
}

/// A behavior tree node evaluated against a context `C`.
///
/// Nodes never hold a reference to the state they act on; the owner passes it in on every
/// evaluation. `run` has no default, so a node without evaluation behaviour does not compile.
pub trait BtNode<C> {
    /// Evaluate the node once, synchronously, and report success.
    fn run(&mut self, ctx: &mut C) -> bool;

    /// Clear node-local memory. Must recurse into children and must not evaluate anything.
    fn reset(&mut self);

    fn name(&self) -> &str;

    /// Evaluate with the tagged result. Nodes without a notion of `Running` use `run`.
    fn tick(&mut self, ctx: &mut C) -> BtStatus {
        BtStatus::from(self.run(ctx))
    }
}

impl<C, N> BtNode<C> for Box<N>
where
    N: BtNode<C> + ?Sized,
{
    fn run(&mut self, ctx: &mut C) -> bool {
        (**self).run(ctx)
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn tick(&mut self, ctx: &mut C) -> BtStatus {
        (**self).tick(ctx)
    }
}

pub type NodeName = Cow<'static, str>;
