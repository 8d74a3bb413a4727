//! Stores and facades that fail on demand.

use rdfg_core::{GraphName, Quad, QuadPattern, StoreError, StoreResult, Vocabulary};
use rdfg_query::{Binding, Query, QueryError, QueryFacade, QueryResult, StoreQueryFacade};
use rdfg_store::{MemoryStore, QuadStore};

/// How an injected store failure presents itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// The store cannot be reached.
    Unavailable,
    /// The store refuses the single write.
    Rejected,
}

impl Fault {
    fn to_error(self, write: usize) -> StoreError {
        match self {
            Fault::Unavailable => StoreError::unavailable(format!("injected at write {}", write)),
            Fault::Rejected => StoreError::invalid_quad(format!("injected at write {}", write)),
        }
    }
}

/// A memory store whose n-th write fails once, or which can go offline.
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    writes: usize,
    fail_at: Option<(usize, Fault)>,
    down_from: Option<usize>,
    offline: bool,
}

impl FlakyStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    /// Fail the write with this zero-based index, counted from now.
    pub fn fail_write(mut self, index: usize, fault: Fault) -> Self {
        self.fail_at = Some((self.writes + index, fault));
        self
    }

    /// Fail every write from this zero-based index on, counted from now.
    /// Reads keep working.
    pub fn fail_writes_from(mut self, index: usize) -> Self {
        self.down_from = Some(self.writes + index);
        self
    }

    /// Make every read and write report the store as unavailable.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    /// Number of writes attempted so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    fn read(&self) -> StoreResult<()> {
        if self.offline {
            return Err(StoreError::unavailable("store offline"));
        }
        Ok(())
    }

    fn write(&mut self) -> StoreResult<()> {
        self.read()?;
        let index = self.writes;
        self.writes += 1;
        if self.down_from.map_or(false, |from| index >= from) {
            return Err(StoreError::unavailable(format!("down since write {}", index)));
        }
        match self.fail_at {
            Some((at, fault)) if at == index => {
                self.fail_at = None;
                Err(fault.to_error(index))
            }
            _ => Ok(()),
        }
    }
}

impl QuadStore for FlakyStore {
    fn add_quad(&mut self, quad: Quad) -> StoreResult<bool> {
        self.write()?;
        self.inner.add_quad(quad)
    }

    fn remove_quad(&mut self, quad: &Quad) -> StoreResult<bool> {
        self.write()?;
        self.inner.remove_quad(quad)
    }

    fn quads(&self, pattern: &QuadPattern) -> StoreResult<Vec<Quad>> {
        self.read()?;
        self.inner.quads(pattern)
    }

    fn drop_graph(&mut self, graph: &GraphName) -> StoreResult<Vec<Quad>> {
        self.write()?;
        self.inner.drop_graph(graph)
    }
}

/// A query facade that fails for one diagram, or for everything.
pub struct FailingFacade {
    inner: StoreQueryFacade,
    failing: Option<GraphName>,
    offline: bool,
}

impl FailingFacade {
    pub fn new(vocab: Vocabulary) -> Self {
        Self {
            inner: StoreQueryFacade::new(vocab),
            failing: None,
            offline: false,
        }
    }

    /// Fail every derivation query about this diagram.
    pub fn failing_for(mut self, diagram: GraphName) -> Self {
        self.failing = Some(diagram);
        self
    }

    /// Report the engine as unreachable for every query.
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    fn concerns_failing(&self, query: &Query) -> bool {
        let Some(failing) = &self.failing else {
            return false;
        };
        match query {
            Query::ProcessSubtypeFacts { diagram } | Query::ExecutorGroupMembers { diagram } => {
                diagram == failing
            }
            _ => false,
        }
    }
}

impl QueryFacade for FailingFacade {
    fn execute(&self, store: &dyn QuadStore, query: &Query) -> QueryResult<Vec<Binding>> {
        if self.offline {
            return Err(QueryError::unavailable("query engine offline"));
        }
        if self.concerns_failing(query) {
            return Err(QueryError::failed(query.name(), "injected failure"));
        }
        self.inner.execute(store, query)
    }
}
