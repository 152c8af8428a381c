// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! StopWatch - nested scope timing
//!
//! A StopWatch is a tree of named timers. Each [`Scope`] guard measures one
//! region and commits the elapsed time to its node when dropped, whether the
//! region finished normally, returned early with an error, or panicked.
//!
//! ```text
//! let watch = StopWatch::new("frame");
//! {
//!     let frame = watch.start();
//!     {
//!         let _detect = frame.enter("detect");
//!         // ...
//!     }
//!     let _draw = frame.enter("draw");
//! }
//! println!("{watch}");
//! ```
//!
//! Children are keyed by name under their parent: entering the same name
//! again reuses the node and adds a sample. A parent only measures the region
//! it wraps; child time is never rolled up implicitly.
//!
//! Names are resolved under the parent they are entered from. Entering a
//! name from the same parent while a scope on it is still open reuses the
//! node: every scope carries its own start instant, so each adds one sample.
//! Entering a scope's own name from that scope creates a child of the same
//! name, e.g. `walk.walk`.
//!
//! The tree uses interior mutability and is meant for a single thread.

use crate::clock::{Clock, SystemClock};
use crate::error::TimingError;
use crate::stats::{IntervalWindow, Statistics};
use std::cell::RefCell;
use std::fmt;
use std::time::{Duration, Instant};

const ROOT: usize = 0;

#[derive(Debug)]
struct Node {
    name: String,
    parent: Option<usize>,
    window: IntervalWindow,
    children: Vec<usize>,
}

/// Tree of named scope timers
pub struct StopWatch<C: Clock = SystemClock> {
    nodes: RefCell<Vec<Node>>,
    capacity: Option<usize>,
    clock: C,
}

impl StopWatch<SystemClock> {
    /// StopWatch keeping every sample
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_clock(name, None, SystemClock)
    }

    /// StopWatch keeping the most recent `capacity` samples per node
    pub fn with_capacity(name: impl Into<String>, capacity: usize) -> Self {
        Self::with_clock(name, Some(capacity), SystemClock)
    }
}

impl<C: Clock> StopWatch<C> {
    pub fn with_clock(name: impl Into<String>, capacity: Option<usize>, clock: C) -> Self {
        let root = Node {
            name: name.into(),
            parent: None,
            window: IntervalWindow::new(capacity),
            children: Vec::new(),
        };
        Self {
            nodes: RefCell::new(vec![root]),
            capacity,
            clock,
        }
    }

    pub fn name(&self) -> String {
        self.nodes.borrow()[ROOT].name.clone()
    }

    /// Time the root node
    pub fn start(&self) -> Scope<'_, C> {
        Scope::open(self, ROOT)
    }

    /// Time the child `name` of the root node
    pub fn enter(&self, name: &str) -> Scope<'_, C> {
        let node = self.child_of(ROOT, name);
        Scope::open(self, node)
    }

    /// Run `f` inside the child scope `name` of the root node
    pub fn measure<R>(&self, name: &str, f: impl FnOnce() -> R) -> R {
        let _scope = self.enter(name);
        f()
    }

    /// Statistics of the root node's own samples
    pub fn statistics(&self) -> Result<Statistics, TimingError> {
        self.nodes.borrow()[ROOT].window.statistics()
    }

    /// Clear every node's samples, keeping the tree shape
    pub fn reset(&self) {
        for node in self.nodes.borrow_mut().iter_mut() {
            node.window.clear();
        }
    }

    /// Snapshot of the whole tree
    pub fn report(&self) -> TimerReport {
        let nodes = self.nodes.borrow();
        build_report(&nodes, ROOT, None, 0)
    }

    fn child_of(&self, parent: usize, name: &str) -> usize {
        let mut nodes = self.nodes.borrow_mut();
        let existing = nodes[parent]
            .children
            .iter()
            .copied()
            .find(|&child| nodes[child].name == name);
        if let Some(child) = existing {
            return child;
        }
        let child = nodes.len();
        nodes.push(Node {
            name: name.to_string(),
            parent: Some(parent),
            window: IntervalWindow::new(self.capacity),
            children: Vec::new(),
        });
        nodes[parent].children.push(child);
        tracing::trace!(parent = %nodes[parent].name, child = name, "created timer");
        child
    }

    fn commit(&self, node: usize, elapsed: Duration) {
        match self.nodes.try_borrow_mut() {
            Ok(mut nodes) => nodes[node].window.push(elapsed),
            Err(_) => tracing::warn!(node, "timer tree busy, dropping sample"),
        }
    }

    fn full_name(&self, node: usize) -> String {
        let nodes = self.nodes.borrow();
        full_name_of(&nodes, node)
    }
}

impl<C: Clock> fmt::Debug for StopWatch<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StopWatch")
            .field("nodes", &self.nodes)
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl<C: Clock> fmt::Display for StopWatch<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.report().fmt(f)
    }
}

fn full_name_of(nodes: &[Node], node: usize) -> String {
    let mut family = vec![nodes[node].name.as_str()];
    let mut current = nodes[node].parent;
    while let Some(parent) = current {
        family.push(nodes[parent].name.as_str());
        current = nodes[parent].parent;
    }
    family.reverse();
    family.join(".")
}

fn build_report(nodes: &[Node], node: usize, prefix: Option<&str>, level: usize) -> TimerReport {
    let name = nodes[node].name.clone();
    let full_name = match prefix {
        Some(prefix) => format!("{prefix}.{name}"),
        None => name.clone(),
    };
    let children = nodes[node]
        .children
        .iter()
        .map(|&child| build_report(nodes, child, Some(&full_name), level + 1))
        .collect();
    TimerReport {
        name,
        full_name,
        level,
        window: nodes[node].window.clone(),
        children,
    }
}

/// Guard timing one region of a [`StopWatch`]
///
/// The elapsed time is committed exactly once, when the guard is dropped.
pub struct Scope<'a, C: Clock = SystemClock> {
    watch: &'a StopWatch<C>,
    node: usize,
    started: Instant,
}

impl<'a, C: Clock> Scope<'a, C> {
    fn open(watch: &'a StopWatch<C>, node: usize) -> Self {
        Self {
            watch,
            node,
            started: watch.clock.now(),
        }
    }

    /// Time the child `name` of this scope's timer
    pub fn enter(&self, name: &str) -> Scope<'a, C> {
        let node = self.watch.child_of(self.node, name);
        Scope::open(self.watch, node)
    }

    /// Run `f` inside the child scope `name`
    pub fn measure<R>(&self, name: &str, f: impl FnOnce() -> R) -> R {
        let _scope = self.enter(name);
        f()
    }

    /// Dot-joined path from the root to this scope's timer
    pub fn full_name(&self) -> String {
        self.watch.full_name(self.node)
    }

    /// Time since the scope was opened
    pub fn elapsed(&self) -> Duration {
        self.watch.clock.now().saturating_duration_since(self.started)
    }
}

impl<C: Clock> Drop for Scope<'_, C> {
    fn drop(&mut self) {
        let elapsed = self.elapsed();
        self.watch.commit(self.node, elapsed);
    }
}

/// Read-only snapshot of a StopWatch node and its descendants
#[derive(Debug, Clone)]
pub struct TimerReport {
    pub name: String,
    /// Dot-joined path from the root
    pub full_name: String,
    /// Number of ancestors
    pub level: usize,
    window: IntervalWindow,
    children: Vec<TimerReport>,
}

impl TimerReport {
    /// Statistics over this node's own samples
    pub fn statistics(&self) -> Result<Statistics, TimingError> {
        self.window.statistics()
    }

    /// Samples from oldest to newest
    pub fn intervals(&self) -> Vec<Duration> {
        self.window.to_vec()
    }

    /// Children in the order they were first entered
    pub fn children(&self) -> &[TimerReport] {
        &self.children
    }

    pub fn child(&self, name: &str) -> Option<&TimerReport> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Find a descendant by dot-separated path relative to this node
    pub fn find(&self, path: &str) -> Option<&TimerReport> {
        path.split('.')
            .try_fold(self, |node, segment| node.child(segment))
    }

    /// Sum of the children's recorded time
    pub fn total_children(&self) -> Duration {
        self.children.iter().map(|c| c.window.sum()).sum()
    }

    fn fmt_level(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = "    ".repeat(self.level);
        write!(f, "{indent}<StopWatch name={}", self.name)?;
        self.window.fmt_props(f)?;
        if !self.children.is_empty() {
            writeln!(f, " children=[")?;
            for (i, child) in self.children.iter().enumerate() {
                if i > 0 {
                    writeln!(f, ",")?;
                }
                child.fmt_level(f)?;
            }
            write!(f, "\n{indent}]")?;
        }
        write!(f, ">")
    }
}

impl fmt::Display for TimerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_level(f)
    }
}

#[cfg(test)]
#[path = "stopwatch_tests.rs"]
mod tests;
