//! User-facing messages.
//!
//! A localization can be attached at any point of an error's life, from the
//! failure site up to where the error is presented. Attaching a new one
//! overrides the previous one, so outer layers can rephrase a message to fit
//! their context.

use errkit_core::Attribute;

/// A localized title and message for presenting an error to a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Localization {
    title: Option<String>,
    message: String,
}

impl Localization {
    /// Creates a localization with a message and no title.
    ///
    /// # Arguments
    ///
    /// * `message` - The localized message shown to the user.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            title: None,
            message: message.into(),
        }
    }

    /// Sets the localized title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Returns the localized title, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the localized message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Attribute for Localization {
    fn type_label(&self) -> String {
        "Localization".to_string()
    }

    fn value_strings(&self) -> Vec<String> {
        let mut values = Vec::with_capacity(2);
        if let Some(title) = &self.title {
            values.push(format!("Title: {title}"));
        }
        values.push(format!("Message: {}", self.message));
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_only() {
        let localization = Localization::new("Try again later.");

        assert_eq!(localization.title(), None);
        assert_eq!(localization.value_strings(), vec!["Message: Try again later."]);
    }

    #[test]
    fn test_title_comes_first() {
        let localization = Localization::new("Check your connection.").with_title("Offline");

        assert_eq!(localization.title(), Some("Offline"));
        assert_eq!(
            localization.value_strings(),
            vec!["Title: Offline", "Message: Check your connection."]
        );
    }
}
