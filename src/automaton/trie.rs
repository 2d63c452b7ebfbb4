//! The prefix trie that the automaton is compiled from.
//!
//! Every path from the root spells a prefix of at least one pattern. States
//! are numbered in creation order and never removed. The children of a state
//! are kept sorted by symbol so that the breadth first compilation visits them
//! in a stable order.

use super::state::{S, ROOT};
use super::Pattern;
use crate::symbol::Symbol;

#[derive(Debug)]
pub struct Trie<T> {
    nodes: Vec<Node<T>>,
}

#[derive(Debug)]
pub struct Node<T> {
    /// The explicit transitions, sorted by symbol.
    pub edges: Vec<(T, S)>,

    /// The patterns that end exactly at this node, in insertion order.
    pub matches: Vec<Pattern>,

    /// The distance from the root.
    pub depth: usize,
}

impl<T: Symbol> Trie<T> {
    pub fn new() -> Self {
        let mut trie = Self { nodes: Vec::new() };
        trie.push_node(0);
        trie
    }

    /// Adds the pattern with the given id, creating any missing states, and
    /// returns the state where the pattern ends.
    pub fn insert(&mut self, symbols: &[T], id: usize) -> S {
        let mut curr = ROOT;
        for (depth, &sym) in symbols.iter().enumerate() {
            curr = match self.next(curr, sym) {
                Some(next) => next,
                None => {
                    let next = self.push_node(depth + 1);
                    let edges = &mut self.nodes[curr].edges;
                    let i = edges.partition_point(|&(s, _)| s < sym);
                    edges.insert(i, (sym, next));
                    next
                }
            };
        }
        self.nodes[curr].matches.push(Pattern::new(id, symbols.len()));
        curr
    }

    /// Returns the state spelled by the given symbols, if there is one.
    pub fn find(&self, symbols: &[T]) -> Option<S> {
        symbols
            .iter()
            .try_fold(ROOT, |curr, &sym| self.next(curr, sym))
    }

    /// Returns the explicit transition from the given state.
    pub fn next(&self, id: S, sym: T) -> Option<S> {
        let edges = &self.nodes[id].edges;
        edges
            .binary_search_by(|&(s, _)| s.cmp(&sym))
            .ok()
            .map(|i| edges[i].1)
    }

    /// Returns every distinct symbol used on some edge, sorted.
    pub fn symbols(&self) -> Vec<T> {
        let mut symbols: Vec<T> = self
            .nodes
            .iter()
            .flat_map(|node| node.edges.iter().map(|&(s, _)| s))
            .collect();
        symbols.sort_unstable();
        symbols.dedup();
        symbols
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn into_nodes(self) -> Vec<Node<T>> {
        self.nodes
    }

    fn push_node(&mut self, depth: usize) -> S {
        let id = self.nodes.len();
        self.nodes.push(Node {
            edges: Vec::new(),
            matches: Vec::new(),
            depth,
        });
        id
    }
}
