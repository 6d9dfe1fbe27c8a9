//! Arbitrary values kept for debugging.

use std::{fmt, sync::Arc};

use errkit_core::Attribute;

/// An ordered list of values attached for debugging.
///
/// Usually built with the [`debug_info!`](crate::debug_info) macro.
///
/// # Examples
///
/// ```
/// use errkit::{Attribute, debug_info};
///
/// let info = debug_info![42, "user-7", vec![1, 2]];
/// assert_eq!(info.len(), 3);
/// assert_eq!(info.value_strings(), vec!["42", "\"user-7\"", "[1, 2]"]);
/// ```
#[derive(Clone, Default)]
pub struct DebugInfo {
    values: Vec<Arc<dyn fmt::Debug + Send + Sync>>,
}

impl DebugInfo {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value, keeping call order.
    pub fn with(mut self, value: impl fmt::Debug + Send + Sync + 'static) -> Self {
        self.values.push(Arc::new(value));
        self
    }

    /// Returns the values in the order they were added.
    pub fn values(&self) -> impl Iterator<Item = &(dyn fmt::Debug + Send + Sync)> {
        self.values.iter().map(|value| &**value)
    }

    /// Returns the number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the list holds no value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for DebugInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.values()).finish()
    }
}

impl Attribute for DebugInfo {
    fn type_label(&self) -> String {
        "Debug info".to_string()
    }

    fn value_strings(&self) -> Vec<String> {
        self.values().map(|value| format!("{value:?}")).collect()
    }
}

/// Builds a [`DebugInfo`] attribute from heterogeneous `Debug` values.
#[macro_export]
macro_rules! debug_info {
    ($($value:expr),* $(,)?) => {
        $crate::attribute::DebugInfo::new()$(.with($value))*
    };
}
