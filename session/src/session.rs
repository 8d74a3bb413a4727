//! Session manager.

use log::{info, warn};
use rdfg_constraint::DependencyReport;
use rdfg_core::{GraphName, PrefixTable, Term, Vocabulary};
use rdfg_mutation::{
    Catalog, DeletionPlanner, DeletionTarget, MutationRequest, PlanError, PlanOutcome,
};
use rdfg_query::{QueryFacade, StoreQueryFacade};
use rdfg_rule::{DerivationEngine, RecomputeReport, VirtualGraphInfo};
use rdfg_store::QuadStore;
use rdfg_text::{remove_subject_block, TextError};

use crate::error::SessionResult;
use crate::result::{DeleteOutcome, DeleteSummary};

/// An editing session over one quad store.
///
/// The session owns the store, so every operation has exclusive access
/// to it from the first read to the last write.
pub struct Session<S: QuadStore> {
    store: S,
    vocab: Vocabulary,
    prefixes: PrefixTable,
    facade: Box<dyn QueryFacade>,
    engine: DerivationEngine,
}

impl<S: QuadStore> Session<S> {
    /// Create a session answering queries directly from the store.
    pub fn new(store: S, vocab: Vocabulary) -> Self {
        Self {
            store,
            prefixes: vocab.prefixes(),
            facade: Box::new(StoreQueryFacade::new(vocab.clone())),
            engine: DerivationEngine::new(vocab.clone()),
            vocab,
        }
    }

    /// Create a session from a TOML vocabulary document.
    pub fn from_toml(store: S, config: &str) -> SessionResult<Self> {
        let vocab = Vocabulary::from_toml_str(config)?;
        Ok(Self::new(store, vocab))
    }

    /// Replace the query facade.
    pub fn with_facade(mut self, facade: impl QueryFacade + 'static) -> Self {
        self.facade = Box::new(facade);
        self
    }

    /// Replace the derivation engine.
    pub fn with_engine(mut self, engine: DerivationEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Give the store back, ending the session.
    pub fn into_store(self) -> S {
        self.store
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    pub fn prefixes(&self) -> &PrefixTable {
        &self.prefixes
    }

    pub fn engine(&self) -> &DerivationEngine {
        &self.engine
    }

    /// Listings used to pick deletion targets.
    pub fn catalog(&self) -> Catalog<'_> {
        Catalog::new(&self.vocab, self.facade.as_ref())
    }

    fn planner(&self) -> DeletionPlanner<'_> {
        DeletionPlanner::new(&self.vocab, self.facade.as_ref())
    }

    // ==================== Deletion ====================

    /// Report what keeps a target alive.
    pub fn check(&self, target: &DeletionTarget) -> SessionResult<DependencyReport> {
        Ok(self.planner().check(&self.store, target)?)
    }

    /// Plan a deletion without applying it.
    pub fn plan(&self, target: &DeletionTarget) -> SessionResult<PlanOutcome> {
        Ok(self.planner().plan(&self.store, target)?)
    }

    /// The SPARQL update a deletion would run, or `None` if it is blocked.
    pub fn preview(&self, target: &DeletionTarget) -> SessionResult<Option<String>> {
        Ok(self
            .plan(target)?
            .request()
            .map(|request| request.to_sparql(&self.prefixes)))
    }

    /// Delete a target and bring the virtual graphs up to date.
    ///
    /// A blocked target leaves the store untouched and returns its
    /// blockers. If the cascade or the recompute fails after the plan was
    /// applied, the removed quads are restored before the error is
    /// returned. Quads that cannot be restored are reported through
    /// [`PlanError::RollbackIncomplete`].
    pub fn delete(&mut self, target: &DeletionTarget) -> SessionResult<DeleteOutcome> {
        let request = match self.plan(target)? {
            PlanOutcome::Blocked(blockers) => return Ok(DeleteOutcome::Blocked(blockers)),
            PlanOutcome::Ready(request) => request,
        };

        let applied = request.apply(&mut self.store)?;
        let removed = applied.removed.len();

        match self.settle(&request) {
            Ok((cascaded, recompute)) => {
                info!(
                    "deleted {} {}: {} quad(s), {} cascaded",
                    target.kind, target.id, removed, cascaded
                );
                Ok(DeleteOutcome::Deleted(DeleteSummary {
                    removed,
                    cascaded,
                    recompute,
                }))
            }
            Err(e) => {
                warn!("deleting {} failed after apply, rolling back: {}", target.id, e);
                let unrestored = applied.rollback(&mut self.store);
                if let Err(retry) = self.engine.recompute_all(&mut self.store, self.facade.as_ref()) {
                    warn!("recompute after rollback failed: {}", retry);
                }
                if !unrestored.is_empty() {
                    return Err(PlanError::rollback_incomplete(e.to_string(), unrestored).into());
                }
                Err(e)
            }
        }
    }

    /// Cascade to the virtual graphs of removed diagrams, then recompute.
    fn settle(&mut self, request: &MutationRequest) -> SessionResult<(usize, RecomputeReport)> {
        let mut cascaded = 0;
        if request.cascade_virtual_graph {
            for graph in &request.graph_removals {
                cascaded += self
                    .engine
                    .cascade_delete(&mut self.store, self.facade.as_ref(), graph)?;
            }
        }
        let report = self.engine.recompute_all(&mut self.store, self.facade.as_ref())?;
        Ok((cascaded, report))
    }

    // ==================== Virtual graphs ====================

    /// Recompute every virtual graph.
    pub fn recompute(&mut self) -> SessionResult<RecomputeReport> {
        Ok(self.engine.recompute_all(&mut self.store, self.facade.as_ref())?)
    }

    pub fn virtual_graphs(&self) -> SessionResult<Vec<VirtualGraphInfo>> {
        Ok(self.engine.virtual_graphs(&self.store, self.facade.as_ref())?)
    }

    /// Remove virtual graphs whose parent no longer exists.
    pub fn cascade_orphans(&mut self) -> SessionResult<Vec<GraphName>> {
        Ok(self.engine.cascade_orphans(&mut self.store, self.facade.as_ref())?)
    }

    // ==================== Text ====================

    /// Remove the statement blocks of `subject` from a TriG buffer. Both
    /// the prefixed and the `<iri>` spelling are removed.
    pub fn remove_from_text(&self, text: &str, subject: &Term) -> SessionResult<String> {
        let Term::Iri(iri) = subject else {
            return Err(TextError::invalid_subject(subject.to_string()).into());
        };

        let prefixed = self.prefixes.shorten(iri);
        let mut edited = remove_subject_block(text, &prefixed)?;
        let full = format!("<{}>", iri);
        if full != prefixed {
            edited = remove_subject_block(&edited, &full)?;
        }
        Ok(edited)
    }
}
