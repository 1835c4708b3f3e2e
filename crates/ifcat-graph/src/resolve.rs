//! Depth-first flattening of embedded interfaces.
//!
//! The catalog slice is the arena; an index maps each `(namespace, name)` key
//! to its arena positions. Resolving a record resolves its bases first, then
//! appends their flattened methods after the record's own, in base order.
//! A record is resolved once its `bases` is empty, which also memoizes the
//! walk: a second visit is a no-op.

use ifcat_facts_core::{BaseRef, InterfaceKey, InterfaceRecord};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// An embedded base with no matching record in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedBase {
    pub interface: InterfaceKey,
    pub origin: String,
    pub base: BaseRef,
}

/// Interfaces that embed each other, in walk order. The last member embeds the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cycle {
    pub members: Vec<InterfaceKey>,
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for member in &self.members {
            write!(f, "{member} -> ")?;
        }
        match self.members.first() {
            Some(first) => write!(f, "{first}"),
            None => Ok(()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("embedding cycle: {0}")]
    Cycle(Cycle),
}

/// Diagnostics from one resolution pass. None of them abort resolution.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolveReport {
    /// Records that had bases and were flattened in this pass.
    pub flattened: usize,
    pub unresolved: Vec<UnresolvedBase>,
    pub cycles: Vec<Cycle>,
}

impl ResolveReport {
    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty() && self.cycles.is_empty()
    }

    /// Treat a detected cycle as a hard failure.
    pub fn into_result(mut self) -> Result<Self, ResolveError> {
        if self.cycles.is_empty() {
            Ok(self)
        } else {
            Err(ResolveError::Cycle(self.cycles.swap_remove(0)))
        }
    }
}

/// Flatten every record's embedded bases into its method list.
///
/// Bases are looked up by `(namespace, name)`: an unqualified base lives in
/// the embedding record's own package, a qualified one (`io.Reader`) in the
/// named package. An unqualified base missing from the own package is then
/// looked up in the record's dot-imported packages. When several records
/// share a key (two `package main` directories), the one in the embedding
/// record's directory wins, then the first in catalog order.
///
/// Missing bases are skipped. A cycle fails only its members: they keep what
/// was flattened before the cycle was found and are marked resolved.
pub fn resolve_catalog(records: &mut [InterfaceRecord]) -> ResolveReport {
    let mut index: HashMap<InterfaceKey, Vec<usize>> = HashMap::new();
    for (pos, record) in records.iter().enumerate() {
        index.entry(record.key()).or_default().push(pos);
    }

    let len = records.len();
    let mut resolver = Resolver {
        records,
        index,
        in_progress: vec![false; len],
        stack: Vec::new(),
        report: ResolveReport::default(),
    };
    for pos in 0..len {
        resolver.resolve(pos);
    }
    resolver.report
}

struct Resolver<'a> {
    records: &'a mut [InterfaceRecord],
    index: HashMap<InterfaceKey, Vec<usize>>,
    in_progress: Vec<bool>,
    /// Walk path, for reporting cycles.
    stack: Vec<usize>,
    report: ResolveReport,
}

impl Resolver<'_> {
    fn resolve(&mut self, pos: usize) {
        if self.records[pos].is_resolved() {
            return;
        }
        let bases = std::mem::take(&mut self.records[pos].bases);
        self.in_progress[pos] = true;
        self.stack.push(pos);
        self.report.flattened += 1;

        for base in bases {
            let Some(target) = self.lookup(pos, &base) else {
                let record = &self.records[pos];
                tracing::debug!(
                    interface = %record.key(),
                    origin = %record.origin,
                    base = %base,
                    "embedded base not in catalog"
                );
                self.report.unresolved.push(UnresolvedBase {
                    interface: record.key(),
                    origin: record.origin.clone(),
                    base,
                });
                continue;
            };

            if self.in_progress[target] {
                let start = self.stack.iter().position(|&p| p == target).unwrap_or(0);
                let cycle = Cycle {
                    members: self.stack[start..]
                        .iter()
                        .map(|&p| self.records[p].key())
                        .collect(),
                };
                tracing::warn!(%cycle, "embedding cycle; members left partially flattened");
                self.report.cycles.push(cycle);
                continue;
            }

            self.resolve(target);
            let inherited = self.records[target].methods.clone();
            self.records[pos].methods.extend(inherited);
        }

        self.stack.pop();
        self.in_progress[pos] = false;
    }

    fn lookup(&self, pos: usize, base: &BaseRef) -> Option<usize> {
        let record = &self.records[pos];
        if let Some(found) = self.find(record, &base.key_in(&record.namespace)) {
            return Some(found);
        }
        if base.package.is_some() {
            return None;
        }
        record.dot_imports.iter().find_map(|package| {
            let key = InterfaceKey {
                namespace: package.clone(),
                name: base.name.clone(),
            };
            self.find(record, &key)
        })
    }

    fn find(&self, record: &InterfaceRecord, key: &InterfaceKey) -> Option<usize> {
        let candidates = self.index.get(key)?;
        match candidates.as_slice() {
            [] => None,
            [only] => Some(*only),
            [first, ..] => {
                let dir = record.origin_dir();
                candidates
                    .iter()
                    .copied()
                    .find(|&c| self.records[c].origin_dir() == dir)
                    .or(Some(*first))
            }
        }
    }
}
