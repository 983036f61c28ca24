//! Lazily described records.

use std::{fmt, sync::Arc};

use crate::FieldInfo;

type FieldProvider = dyn Fn() -> Vec<FieldInfo> + Send + Sync;

/// Reference to a record type.
///
/// Fields are only produced when [`RecordRef::fields`] is called, which lets
/// a record's description mention itself.
#[derive(Clone)]
pub struct RecordRef {
    name: Option<String>,
    fields: Arc<FieldProvider>,
}

impl RecordRef {
    pub fn named<F>(name: impl Into<String>, fields: F) -> Self
    where
        F: Fn() -> Vec<FieldInfo> + Send + Sync + 'static,
    {
        Self {
            name: Some(name.into()),
            fields: Arc::new(fields),
        }
    }

    pub fn anonymous<F>(fields: F) -> Self
    where
        F: Fn() -> Vec<FieldInfo> + Send + Sync + 'static,
    {
        Self {
            name: None,
            fields: Arc::new(fields),
        }
    }

    /// Declared name; `None` for inline records.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> Vec<FieldInfo> {
        (self.fields)()
    }
}

impl fmt::Debug for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordRef")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
