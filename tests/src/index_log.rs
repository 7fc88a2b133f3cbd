use quill::{
    schema::Model,
    stmt::{Record, Value},
    IndexHook, Result,
};
use std::sync::Mutex;

/// A notification received by [`IndexLog`].
#[derive(Debug, Clone, PartialEq)]
pub enum IndexEvent {
    Insert { module: String, id: Value },
    Update { module: String, id: Value },
    Delete { module: String, model: String, id: Value },
}

/// Records every index notification. Optionally fails each call to check
/// that failures never reach the writer.
#[derive(Debug, Default)]
pub struct IndexLog {
    events: Mutex<Vec<IndexEvent>>,
    failing: bool,
}

impl IndexLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            events: Mutex::default(),
            failing: true,
        }
    }

    pub fn events(&self) -> Vec<IndexEvent> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: IndexEvent) -> Result<()> {
        self.events.lock().unwrap().push(event);

        if self.failing {
            quill::bail!("index unavailable");
        }
        Ok(())
    }
}

impl IndexHook for IndexLog {
    fn on_insert(&self, module: &str, record: &Record) -> Result<()> {
        self.push(IndexEvent::Insert {
            module: module.to_string(),
            id: record.id().cloned().unwrap_or_default(),
        })
    }

    fn on_update(&self, module: &str, record: &Record) -> Result<()> {
        self.push(IndexEvent::Update {
            module: module.to_string(),
            id: record.id().cloned().unwrap_or_default(),
        })
    }

    fn on_delete(&self, module: &str, model: &Model, id: &Value) -> Result<()> {
        self.push(IndexEvent::Delete {
            module: module.to_string(),
            model: model.name().to_string(),
            id: id.clone(),
        })
    }
}
