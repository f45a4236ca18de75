//! Process-wide build properties.
//!
//! Each property name is written at most once per run. Re-writing a name with a value that renders to the same string is accepted and keeps the first value; any other re-write is a configuration error.

use std::collections::BTreeMap;

use fanout_model::{PropertyName, PropertyValue};
use tracing::{debug, trace};

use crate::error::CoreError;

/// Registry of global build properties shared by all configuration logic of one build.
#[derive(Debug, Clone, Default)]
pub struct PropertyRegistry {
    props: BTreeMap<PropertyName, PropertyValue>,
}

impl PropertyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`.
    ///
    /// Fails with [`CoreError::ConflictingProperty`] when `name` already holds a value whose string form differs from `value`.
    pub fn set(
        &mut self,
        name: impl Into<PropertyName>,
        value: impl Into<PropertyValue>,
    ) -> Result<(), CoreError> {
        let name = name.into();
        let value = value.into();

        if let Some(existing) = self.props.get(&name) {
            if existing.same_as(&value) {
                trace!(
                    target: "fanout.core.property",
                    %name,
                    %value,
                    "property already set to same value"
                );
                return Ok(());
            }
            return Err(CoreError::ConflictingProperty {
                name,
                value: value.to_string(),
                existing: existing.to_string(),
            });
        }

        debug!(target: "fanout.core.property", %name, %value, "global property set");
        self.props.insert(name, value);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.props.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.props.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Iterate over all properties, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.props.iter().map(|(k, v)| (k.as_str(), v))
    }
}
