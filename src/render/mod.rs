pub mod template;

pub use template::{Template, render};

/// Rendered manifest text, ready for submission or further concatenation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDocument(String);

impl RenderedDocument {
    pub fn new(text: String) -> Self {
        Self(text)
    }

    #[cfg(test)]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Append a fragment as-is. Fragments that continue a document (list
    /// items of a pipeline's `tasks`) must not be separated.
    pub fn push(&mut self, fragment: RenderedDocument) {
        self.0.push_str(&fragment.0);
    }
}
