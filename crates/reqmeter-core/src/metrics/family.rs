use dashmap::DashMap;

use crate::error::Result;

use super::definition::MetricDefinition;
use super::labels::LabelSet;

/// One metric: its definition plus a cell per observed label set.
///
/// Cells are sharded by `DashMap`; first use of a label set goes through
/// `entry().or_insert_with()` so concurrent first observations share one cell.
pub(crate) struct Family<C> {
    pub(crate) def: MetricDefinition,
    pub(crate) cells: DashMap<LabelSet, C>,
}

impl<C> Family<C> {
    pub(crate) fn new(def: MetricDefinition) -> Self {
        Self {
            def,
            cells: DashMap::new(),
        }
    }

    /// Run `f` against the cell for `values`, creating it with `init` on first use.
    pub(crate) fn with_cell<R>(
        &self,
        values: &[&str],
        init: impl FnOnce() -> C,
        f: impl FnOnce(&C) -> R,
    ) -> Result<R> {
        self.def.check_arity(values)?;
        let key = LabelSet::new(values);

        // Read lock on the hot path; the shard write lock is only taken to create.
        if let Some(cell) = self.cells.get(&key) {
            return Ok(f(cell.value()));
        }
        let cell = self.cells.entry(key).or_insert_with(init);
        Ok(f(cell.value()))
    }

    /// Read an existing cell without creating it.
    pub(crate) fn read<R>(&self, values: &[&str], f: impl FnOnce(&C) -> R) -> Result<Option<R>> {
        self.def.check_arity(values)?;
        Ok(self.cells.get(&LabelSet::new(values)).map(|cell| f(cell.value())))
    }

    /// Read every cell, sorted by label set.
    pub(crate) fn collect<R>(&self, f: impl Fn(&C) -> R) -> Vec<(LabelSet, R)> {
        let mut rows: Vec<(LabelSet, R)> = self
            .cells
            .iter()
            .map(|r| (r.key().clone(), f(r.value())))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));
        rows
    }
}
