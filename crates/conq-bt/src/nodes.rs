use std::marker::PhantomData;

use tracing::trace;

use crate::bt::{BtNode, BtStatus, NodeName};

type Children<C> = Vec<Box<dyn BtNode<C>>>;

/// Short-circuit AND: evaluates children in order and stops at the first failure.
///
/// An empty sequence succeeds.
pub struct Sequence<C> {
    name: NodeName,
    children: Children<C>,
}

impl<C> Sequence<C> {
    pub fn new(name: impl Into<NodeName>, children: Children<C>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    pub fn with_child(mut self, child: impl BtNode<C> + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<C> BtNode<C> for Sequence<C> {
    fn run(&mut self, ctx: &mut C) -> bool {
        for child in self.children.iter_mut() {
            if !child.run(ctx) {
                trace!(node = %self.name, child = child.name(), "sequence failed");
                return false;
            }
        }
        trace!(node = %self.name, "sequence succeeded");
        true
    }

    fn tick(&mut self, ctx: &mut C) -> BtStatus {
        for child in self.children.iter_mut() {
            match child.tick(ctx) {
                BtStatus::Success => continue,
                status => return status,
            }
        }
        BtStatus::Success
    }

    fn reset(&mut self) {
        for c in self.children.iter_mut() {
            c.reset();
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Short-circuit OR: evaluates children in order and stops at the first success.
///
/// An empty selector fails.
pub struct Selector<C> {
    name: NodeName,
    children: Children<C>,
}

impl<C> Selector<C> {
    pub fn new(name: impl Into<NodeName>, children: Children<C>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    pub fn with_child(mut self, child: impl BtNode<C> + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<C> BtNode<C> for Selector<C> {
    fn run(&mut self, ctx: &mut C) -> bool {
        for child in self.children.iter_mut() {
            if child.run(ctx) {
                trace!(node = %self.name, child = child.name(), "selector succeeded");
                return true;
            }
        }
        trace!(node = %self.name, "selector failed");
        false
    }

    fn tick(&mut self, ctx: &mut C) -> BtStatus {
        for child in self.children.iter_mut() {
            match child.tick(ctx) {
                BtStatus::Failure => continue,
                status => return status,
            }
        }
        BtStatus::Failure
    }

    fn reset(&mut self) {
        for c in self.children.iter_mut() {
            c.reset();
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Logical NOT over exactly one child.
pub struct Inverter<C> {
    name: NodeName,
    child: Box<dyn BtNode<C>>,
}

impl<C> Inverter<C> {
    pub fn new(child: impl BtNode<C> + 'static) -> Self {
        Self::named("Inverter", child)
    }

    pub fn named(name: impl Into<NodeName>, child: impl BtNode<C> + 'static) -> Self {
        Self {
            name: name.into(),
            child: Box::new(child),
        }
    }
}

impl<C> BtNode<C> for Inverter<C> {
    fn run(&mut self, ctx: &mut C) -> bool {
        let result = self.child.run(ctx);
        trace!(
            node = %self.name,
            child = self.child.name(),
            from = result,
            to = !result,
            "inverted"
        );
        !result
    }

    fn tick(&mut self, ctx: &mut C) -> BtStatus {
        self.child.tick(ctx).invert()
    }

    fn reset(&mut self) {
        self.child.reset();
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Leaf that performs an effect on the context and reports whether it succeeded.
pub struct Action<C, F> {
    name: NodeName,
    act: F,
    _ctx: PhantomData<fn(&mut C)>,
}

impl<C, F> Action<C, F>
where
    F: FnMut(&mut C) -> bool,
{
    pub fn new(name: impl Into<NodeName>, act: F) -> Self {
        Self {
            name: name.into(),
            act,
            _ctx: PhantomData,
        }
    }
}

impl<C, F> BtNode<C> for Action<C, F>
where
    F: FnMut(&mut C) -> bool,
{
    fn run(&mut self, ctx: &mut C) -> bool {
        let result = (self.act)(ctx);
        trace!(node = %self.name, result, "action executed");
        result
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        &self.name
    }
}

/// Leaf that checks the context. It sees the context read-only.
pub struct Condition<C, F> {
    name: NodeName,
    cond: F,
    _ctx: PhantomData<fn(&C)>,
}

impl<C, F> Condition<C, F>
where
    F: FnMut(&C) -> bool,
{
    pub fn new(name: impl Into<NodeName>, cond: F) -> Self {
        Self {
            name: name.into(),
            cond,
            _ctx: PhantomData,
        }
    }
}

impl<C, F> BtNode<C> for Condition<C, F>
where
    F: FnMut(&C) -> bool,
{
    fn run(&mut self, ctx: &mut C) -> bool {
        let result = (self.cond)(&*ctx);
        trace!(node = %self.name, result, "condition evaluated");
        result
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        &self.name
    }
}

/// Multi-tick leaf with node-local progress.
///
/// The callback receives how many consecutive evaluations have returned `Running` so far. The
/// counter goes back to zero when the task finishes or the node is reset.
pub struct Task<C, F> {
    name: NodeName,
    step: F,
    running_ticks: u32,
    _ctx: PhantomData<fn(&mut C)>,
}

impl<C, F> Task<C, F>
where
    F: FnMut(&mut C, u32) -> BtStatus,
{
    pub fn new(name: impl Into<NodeName>, step: F) -> Self {
        Self {
            name: name.into(),
            step,
            running_ticks: 0,
            _ctx: PhantomData,
        }
    }

    pub fn running_ticks(&self) -> u32 {
        self.running_ticks
    }
}

impl<C, F> BtNode<C> for Task<C, F>
where
    F: FnMut(&mut C, u32) -> BtStatus,
{
    fn run(&mut self, ctx: &mut C) -> bool {
        self.tick(ctx).as_bool()
    }

    fn tick(&mut self, ctx: &mut C) -> BtStatus {
        let status = (self.step)(ctx, self.running_ticks);
        if status == BtStatus::Running {
            self.running_ticks = self.running_ticks.saturating_add(1);
        } else {
            self.running_ticks = 0;
        }
        trace!(node = %self.name, ?status, running_ticks = self.running_ticks, "task stepped");
        status
    }

    fn reset(&mut self) {
        self.running_ticks = 0;
    }

    fn name(&self) -> &str {
        &self.name
    }
}
