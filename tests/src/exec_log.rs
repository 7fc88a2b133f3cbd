use crate::logging_connection::DriverOp;
use quill_core::driver::Transaction;
use std::sync::{Arc, Mutex};

/// A wrapper around the operations log that provides a clean API for tests
#[derive(Debug, Clone)]
pub struct ExecLog {
    ops: Arc<Mutex<Vec<DriverOp>>>,
}

impl ExecLog {
    pub(crate) fn new(ops: Arc<Mutex<Vec<DriverOp>>>) -> Self {
        Self { ops }
    }

    /// Get the number of logged operations
    pub fn len(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.lock().unwrap().is_empty()
    }

    /// Count operations matching the given predicate
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&DriverOp) -> bool,
    {
        self.ops.lock().unwrap().iter().filter(|op| predicate(op)).count()
    }

    /// Number of row-returning queries issued
    pub fn queries(&self) -> usize {
        self.count(|op| matches!(op, DriverOp::Query { .. }))
    }

    /// Number of writes issued
    pub fn executes(&self) -> usize {
        self.count(|op| matches!(op, DriverOp::Execute { .. }))
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter_map(|op| match op {
                DriverOp::Transaction(op) => Some(*op),
                _ => None,
            })
            .collect()
    }

    /// SQL text of every statement, in order
    pub fn sql(&self) -> Vec<String> {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter_map(|op| op.sql().map(str::to_string))
            .collect()
    }

    /// Remove and return the oldest operation
    #[track_caller]
    pub fn pop(&self) -> DriverOp {
        let mut ops = self.ops.lock().unwrap();
        assert!(!ops.is_empty(), "exec log is empty");
        ops.remove(0)
    }

    pub fn clear(&self) {
        self.ops.lock().unwrap().clear();
    }
}
