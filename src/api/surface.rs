//! Output surfaces the front-end renders into

use crate::api::formatting::MapLink;
use std::cell::RefCell;

/// Rendering targets for status text, the map link and blocking alerts.
///
/// Every call overwrites the previous content wholesale.
pub trait DisplaySurface {
    /// Replace the status text
    fn set_status(&self, text: &str);

    /// Replace the map link href and label
    fn set_map_link(&self, link: &MapLink);

    /// Raise a blocking alert to the user
    fn alert(&self, message: &str);

    /// Empty href and label
    fn clear_map_link(&self) {
        self.set_map_link(&MapLink::empty());
    }
}

/// Everything a `MemoryDisplay` has been asked to show
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplaySnapshot {
    pub status: String,
    pub map_link: MapLink,
    pub alerts: Vec<String>,
}

/// Display surface that keeps its content in memory
#[derive(Debug, Default)]
pub struct MemoryDisplay {
    content: RefCell<DisplaySnapshot>,
}

impl MemoryDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current content
    pub fn snapshot(&self) -> DisplaySnapshot {
        self.content.borrow().clone()
    }

    pub fn status(&self) -> String {
        self.content.borrow().status.clone()
    }

    pub fn map_link(&self) -> MapLink {
        self.content.borrow().map_link.clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.content.borrow().alerts.clone()
    }
}

impl DisplaySurface for MemoryDisplay {
    fn set_status(&self, text: &str) {
        self.content.borrow_mut().status = text.to_string();
    }

    fn set_map_link(&self, link: &MapLink) {
        self.content.borrow_mut().map_link = link.clone();
    }

    fn alert(&self, message: &str) {
        self.content.borrow_mut().alerts.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_display_overwrites() {
        let display = MemoryDisplay::new();
        display.set_status("first");
        display.set_status("second");
        assert_eq!(display.status(), "second");

        let link = MapLink {
            href: "https://example.com".to_string(),
            label: "here".to_string(),
        };
        display.set_map_link(&link);
        assert_eq!(display.map_link(), link);

        display.clear_map_link();
        assert!(display.map_link().is_empty());
    }

    #[test]
    fn test_alerts_accumulate() {
        let display = MemoryDisplay::new();
        display.alert("one");
        display.alert("two");
        assert_eq!(display.alerts(), vec!["one", "two"]);
    }
}
