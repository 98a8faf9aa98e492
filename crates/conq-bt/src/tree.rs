use crate::bt::{BtNode, BtStatus};

/// Owns exactly one root node and evaluates it against a caller-provided context.
///
/// Each evaluation is a full top-down pass from the root; nothing is resumed between calls.
pub struct BehaviorTree<C> {
    root: Box<dyn BtNode<C>>,
    last: Option<BtStatus>,
}

impl<C> BehaviorTree<C> {
    pub fn new(root: impl BtNode<C> + 'static) -> Self {
        Self::from_boxed(Box::new(root))
    }

    pub fn from_boxed(root: Box<dyn BtNode<C>>) -> Self {
        Self { root, last: None }
    }

    pub fn run(&mut self, ctx: &mut C) -> bool {
        let ok = self.root.run(ctx);
        self.last = Some(BtStatus::from(ok));
        ok
    }

    pub fn tick(&mut self, ctx: &mut C) -> BtStatus {
        let status = self.root.tick(ctx);
        self.last = Some(status);
        status
    }

    /// Clear node-local memory throughout the tree. Does not evaluate any node.
    pub fn reset(&mut self) {
        self.root.reset();
        self.last = None;
    }

    /// Result of the most recent evaluation, `None` before the first one or after a reset.
    pub fn last_status(&self) -> Option<BtStatus> {
        self.last
    }

    pub fn root_name(&self) -> &str {
        self.root.name()
    }
}

impl<C> core::fmt::Debug for BehaviorTree<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BehaviorTree")
            .field("root", &self.root.name())
            .field("last", &self.last)
            .finish()
    }
}
