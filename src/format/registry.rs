//! Format registry for discovering and accessing export formats.

use std::collections::HashMap;

use crate::format::formats::{MaskFormat, YoloFormat};
use crate::format::traits::ExportFormat;

/// Registry of available export formats.
///
/// All built-in formats are registered automatically on creation.
pub struct FormatRegistry {
    formats: HashMap<&'static str, Box<dyn ExportFormat>>,
}

impl FormatRegistry {
    /// Create a new registry with all built-in formats registered.
    pub fn new() -> Self {
        let mut registry = Self {
            formats: HashMap::new(),
        };

        registry.register(Box::new(YoloFormat));
        registry.register(Box::new(MaskFormat));

        registry
    }

    /// Register a format implementation, replacing any with the same ID.
    pub fn register(&mut self, format: Box<dyn ExportFormat>) {
        self.formats.insert(format.id(), format);
    }

    /// Get a format by its ID.
    pub fn get(&self, id: &str) -> Option<&dyn ExportFormat> {
        self.formats.get(id).map(|f| f.as_ref())
    }

    /// Get all format IDs.
    pub fn ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.formats.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_formats() {
        let registry = FormatRegistry::new();

        assert!(registry.get("yolo").is_some());
        assert!(registry.get("mask").is_some());
        assert!(registry.get("coco").is_none());
        assert_eq!(registry.ids(), vec!["mask", "yolo"]);
    }

    #[test]
    fn test_default_file_names() {
        let registry = FormatRegistry::new();
        assert_eq!(
            registry.get("mask").unwrap().default_file_name("cell_01"),
            "cell_01_mask.png"
        );
        assert_eq!(
            registry.get("yolo").unwrap().default_file_name("cell_01"),
            "cell_01.txt"
        );
    }
}
