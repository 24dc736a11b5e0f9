use serde::{Deserialize, Serialize};

/// Current text of the input widget, tagged by the widget's capability.
///
/// The caller reads the widget; this crate never touches a UI toolkit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum InputSource {
    /// A text field or text area exposing its `value`.
    TextValue(String),
    /// Any other element; carries its rendered content.
    Rendered(String),
}

impl InputSource {
    pub fn raw(&self) -> &str {
        match self {
            InputSource::TextValue(text) | InputSource::Rendered(text) => text,
        }
    }
}

impl From<&str> for InputSource {
    fn from(value: &str) -> Self {
        InputSource::TextValue(value.to_string())
    }
}

impl From<String> for InputSource {
    fn from(value: String) -> Self {
        InputSource::TextValue(value)
    }
}

/// Read the widget text and lowercase it.
pub fn get_input_value(input: &InputSource) -> String {
    input.raw().to_lowercase()
}
