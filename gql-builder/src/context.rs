//! Per-pass build state.

use gqlschema_ir::SchemaGraph;
use indexmap::IndexSet;
use tracing::debug;

use crate::{Error, Result};

/// State of one build pass.
///
/// A record name is absent, pending (its fields are being resolved) or
/// complete (registered in the graph). Once an operation fails the context
/// is aborted and rejects further work.
#[derive(Debug, Default)]
pub struct BuildContext {
    pub(crate) graph: SchemaGraph,
    pub(crate) pending: IndexSet<String>,
    aborted: bool,
}

impl BuildContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The graph built so far.
    pub fn graph(&self) -> &SchemaGraph {
        &self.graph
    }

    /// Record names whose fields are still being resolved.
    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.pending.iter().map(String::as_str)
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// Complete the pass and hand out the graph.
    ///
    /// Fails if the pass was aborted, a record is still pending or any
    /// reference names an entry the graph does not hold.
    pub fn finish(self) -> Result<SchemaGraph> {
        if self.aborted {
            return Err(Error::Aborted);
        }
        self.check_pending()?;

        if let Some(unresolved) = self.graph.unresolved_references().into_iter().next() {
            return Err(Error::UnresolvedReference {
                owner: unresolved.owner,
                member: unresolved.member,
                type_name: unresolved.type_name,
            });
        }

        debug!(
            records = self.graph.records().count(),
            dictionaries = self.graph.dictionaries().count(),
            enums = self.graph.enums().count(),
            "build finished"
        );
        Ok(self.graph)
    }

    pub(crate) fn ensure_active(&self) -> Result<()> {
        if self.aborted {
            return Err(Error::Aborted);
        }
        Ok(())
    }

    pub(crate) fn check_pending(&self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        Err(Error::PendingNotEmpty {
            pending: self.pending.iter().cloned().collect(),
        })
    }

    /// Close a top-level operation: abort on failure, otherwise verify that
    /// no record was left pending.
    pub(crate) fn settle(&mut self, result: Result<()>) -> Result<()> {
        let result = result.and_then(|()| self.check_pending());
        if result.is_err() {
            self.aborted = true;
        }
        result
    }
}
