use serde::Serialize;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing::info;

use crate::error::SinkError;
use crate::types::Dimensions;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupHandle {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle {
    pub group_id: String,
    pub id: String,
}

/// One call made into a sink, in wire form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SinkRecord {
    Group { id: String, name: String },
    Element { group: String, id: String, name: String },
    Property { element: String, name: String, value: String },
    Absolute { element: String, key: String, value: String, dimensions: Dimensions },
    Relative { element: String, key: String, value: String, dimensions: Dimensions },
}

/// Destination for topology entities and their metrics.
///
/// Implementors only have to accept [`SinkRecord`]s; the entity operations
/// default to building the record and handing it to [`TopologySink::emit`].
pub trait TopologySink {
    fn emit(&mut self, record: SinkRecord) -> Result<(), SinkError>;

    fn create_group(&mut self, id: &str, name: &str) -> Result<GroupHandle, SinkError> {
        self.emit(SinkRecord::Group { id: id.to_string(), name: name.to_string() })?;
        Ok(GroupHandle { id: id.to_string() })
    }

    fn create_element(&mut self, group: &GroupHandle, id: &str, name: &str) -> Result<ElementHandle, SinkError> {
        self.emit(SinkRecord::Element {
            group: group.id.clone(),
            id: id.to_string(),
            name: name.to_string(),
        })?;
        Ok(ElementHandle { group_id: group.id.clone(), id: id.to_string() })
    }

    fn report_property(&mut self, element: &ElementHandle, name: &str, value: &str) -> Result<(), SinkError> {
        self.emit(SinkRecord::Property {
            element: element.id.clone(),
            name: name.to_string(),
            value: value.to_string(),
        })
    }

    fn report_absolute_metric(
        &mut self,
        element: &ElementHandle,
        key: &str,
        value: &str,
        dimensions: &Dimensions,
    ) -> Result<(), SinkError> {
        self.emit(SinkRecord::Absolute {
            element: element.id.clone(),
            key: key.to_string(),
            value: value.to_string(),
            dimensions: dimensions.clone(),
        })
    }

    fn report_relative_metric(
        &mut self,
        element: &ElementHandle,
        key: &str,
        value: &str,
        dimensions: &Dimensions,
    ) -> Result<(), SinkError> {
        self.emit(SinkRecord::Relative {
            element: element.id.clone(),
            key: key.to_string(),
            value: value.to_string(),
            dimensions: dimensions.clone(),
        })
    }
}

/// Dev mode: nothing leaves the process, every call is logged instead.
#[derive(Debug, Default)]
pub struct DryRunSink;

impl TopologySink for DryRunSink {
    fn emit(&mut self, record: SinkRecord) -> Result<(), SinkError> {
        info!("[dry-run] {:?}", record);
        Ok(())
    }
}

/// Writes each call as one JSON object per line for the host agent to consume.
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TopologySink for JsonLinesSink<W> {
    fn emit(&mut self, record: SinkRecord) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.out, &record)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Keeps every call in memory. Clones share the same record list.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<SinkRecord>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<SinkRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl TopologySink for MemorySink {
    fn emit(&mut self, record: SinkRecord) -> Result<(), SinkError> {
        let mut records = self.records.lock().map_err(|_| SinkError::Rejected {
            operation: "record",
            reason: "record list poisoned".to_string(),
        })?;
        records.push(record);
        Ok(())
    }
}
