//! Totalizer from [[`1`]].
//!
//! [[`1`]] O. Bailleux and Y. Boufkhad, _"Efficient CNF encoding of Boolean cardinality constraints,"_ in Principles and Practice of Constraint Programming, 2003, pp. 108–122.
//!
//! [`1`]: https://doi.org/10.1007/978-3-540-45193-8_8

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use itertools::Itertools;
use log::debug;
use snafu::ensure;

use crate::error::{EmptyInputSnafu, Result, ZeroLiteralSnafu};
use crate::lit::Lit;
use crate::solver::Solver;

/// Order in which literal groups are merged.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MergeStrategy {
    /// Merge groups in arrival order. Merge depth is not balanced.
    Fifo,
    /// Always merge the two smallest groups (ties by arrival order).
    Balanced,
}

#[derive(Debug, Clone)]
pub struct TotalizerOptions {
    pub strategy: MergeStrategy,
}

pub const DEFAULT_OPTIONS: TotalizerOptions = TotalizerOptions {
    strategy: MergeStrategy::Fifo,
};

impl Default for TotalizerOptions {
    fn default() -> Self {
        DEFAULT_OPTIONS
    }
}

#[derive(Debug, Clone)]
struct Node {
    lits: Vec<Lit>,
    children: Option<(usize, usize)>,
    depth: usize,
}

enum MergeQueue {
    Fifo(VecDeque<usize>),
    // Keyed by (size, node index); node indices grow with arrival.
    Balanced(BinaryHeap<Reverse<(usize, usize)>>),
}

impl MergeQueue {
    fn new(strategy: MergeStrategy) -> Self {
        match strategy {
            MergeStrategy::Fifo => MergeQueue::Fifo(VecDeque::new()),
            MergeStrategy::Balanced => MergeQueue::Balanced(BinaryHeap::new()),
        }
    }

    fn push(&mut self, index: usize, size: usize) {
        match self {
            MergeQueue::Fifo(q) => q.push_back(index),
            MergeQueue::Balanced(q) => q.push(Reverse((size, index))),
        }
    }

    fn pop(&mut self) -> Option<usize> {
        match self {
            MergeQueue::Fifo(q) => q.pop_front(),
            MergeQueue::Balanced(q) => q.pop().map(|Reverse((_, index))| index),
        }
    }
}

/// Unary counter over a set of input literals.
///
/// `output_vars[i - 1]` holds iff at least `i` inputs hold.
#[derive(Debug, Clone)]
pub struct Totalizer {
    // Leaves first (in input order), then merged nodes in creation order.
    nodes: Vec<Node>,
    num_inputs: usize,
}

impl Totalizer {
    pub fn declare<S, I>(solver: &mut S, input_vars: I) -> Result<Self>
    where
        S: Solver,
        I: IntoIterator,
        I::Item: Into<Lit>,
    {
        Self::declare_with(solver, input_vars, &DEFAULT_OPTIONS)
    }

    pub fn declare_with<S, I>(solver: &mut S, input_vars: I, options: &TotalizerOptions) -> Result<Self>
    where
        S: Solver,
        I: IntoIterator,
        I::Item: Into<Lit>,
    {
        let input_vars = input_vars.into_iter().map_into::<Lit>().collect_vec();
        ensure!(!input_vars.is_empty(), EmptyInputSnafu);
        if let Some(position) = input_vars.iter().position(|x| x.get() == 0) {
            return ZeroLiteralSnafu { position }.fail();
        }

        let n = input_vars.len();
        solver.comment(&format!("Totalizer({})", n));
        let clauses_before = solver.num_clauses();

        let mut nodes = input_vars
            .into_iter()
            .map(|x| Node {
                lits: vec![x],
                children: None,
                depth: 0,
            })
            .collect_vec();
        let mut queue = MergeQueue::new(options.strategy);
        for i in 0..n {
            queue.push(i, 1);
        }

        // The last remaining group is the root, which is always the last node created.
        while let (Some(a), Some(b)) = (queue.pop(), queue.pop()) {
            let lits = merge(solver, &nodes[a].lits, &nodes[b].lits);
            let size = lits.len();
            nodes.push(Node {
                lits,
                children: Some((a, b)),
                depth: 1 + nodes[a].depth.max(nodes[b].depth),
            });
            queue.push(nodes.len() - 1, size);
        }

        let totalizer = Self { nodes, num_inputs: n };
        debug!(
            "Declared totalizer over {} literals: {} nodes, depth {}, {} clauses",
            n,
            totalizer.num_nodes(),
            totalizer.depth(),
            solver.num_clauses() - clauses_before
        );
        Ok(totalizer)
    }

    fn root(&self) -> &Node {
        &self.nodes[self.nodes.len() - 1]
    }

    /// The counter literals, 0-based: `output_vars()[i]` means "at least `i + 1`".
    pub fn output_vars(&self) -> &[Lit] {
        &self.root().lits
    }

    /// Input literals, in the order they were given.
    pub fn input_vars(&self) -> Vec<Lit> {
        self.nodes[..self.num_inputs].iter().map(|node| node.lits[0]).collect_vec()
    }

    /// Literal meaning "at least `i` inputs are true", for `1 <= i <= size`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    pub fn at_least(&self, i: usize) -> Lit {
        assert!(i >= 1 && i <= self.size(), "index {} out of range 1..={}", i, self.size());
        // Note: totalizer is 0-based, but all params are naturally 1-based
        self.output_vars()[i - 1]
    }

    pub fn size(&self) -> usize {
        self.num_inputs
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Length of the longest merge chain from an input to the output.
    pub fn depth(&self) -> usize {
        self.root().depth
    }

    /// Children of the node at `index`, if it is a merge node.
    pub fn children(&self, index: usize) -> Option<(usize, usize)> {
        self.nodes.get(index).and_then(|node| node.children)
    }
}

fn merge<S>(solver: &mut S, a: &[Lit], b: &[Lit]) -> Vec<Lit>
where
    S: Solver,
{
    let m1 = a.len();
    let m2 = b.len();
    let m = m1 + m2;
    let r = (0..m).map(|_| solver.new_var()).collect_vec();

    for alpha in 0..=m1 {
        for beta in 0..=m2 {
            let sigma = alpha + beta;

            // at least alpha of `a` and beta of `b` => at least sigma of `r`
            if sigma > 0 {
                let mut clause = Vec::with_capacity(3);
                if alpha > 0 {
                    clause.push(-a[alpha - 1]);
                }
                if beta > 0 {
                    clause.push(-b[beta - 1]);
                }
                clause.push(r[sigma - 1]);
                solver.add_clause(clause);
            }

            // at least sigma+1 of `r` => at least alpha+1 of `a` or beta+1 of `b`
            if sigma < m {
                let mut clause = Vec::with_capacity(3);
                if alpha < m1 {
                    clause.push(a[alpha]);
                }
                if beta < m2 {
                    clause.push(b[beta]);
                }
                clause.push(-r[sigma]);
                solver.add_clause(clause);
            }
        }
    }

    r
}
