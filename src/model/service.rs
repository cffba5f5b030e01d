//! Service definitions, stable ids and built-in templates.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a configured service.
///
/// Independent of the display name, so renaming a service keeps its
/// sessions. Persisted in `settings.json` next to the definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(String);

impl ServiceId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ServiceId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One configured web service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDefinition {
    #[serde(default = "ServiceId::generate")]
    pub id: ServiceId,
    pub name: String,
    pub url: String,
    /// CSS selector of the prompt input; empty disables auto-focus.
    #[serde(default)]
    pub focus_selector: String,
}

impl ServiceDefinition {
    /// Creates a definition with a freshly generated id.
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        focus_selector: impl Into<String>,
    ) -> Self {
        Self::with_id(ServiceId::generate(), name, url, focus_selector)
    }

    pub fn with_id(
        id: ServiceId,
        name: impl Into<String>,
        url: impl Into<String>,
        focus_selector: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            url: url.into(),
            focus_selector: focus_selector.into(),
        }
    }

    /// Row inserted by the settings "Add" button.
    pub fn placeholder() -> Self {
        Self::new("New Engine", "https://example.com", "")
    }

    /// Focus selector, or `None` when empty.
    pub fn selector(&self) -> Option<&str> {
        let trimmed = self.focus_selector.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    pub fn field(&self, field: ServiceField) -> &str {
        match field {
            ServiceField::Name => &self.name,
            ServiceField::Url => &self.url,
            ServiceField::FocusSelector => &self.focus_selector,
        }
    }

    pub fn set_field(&mut self, field: ServiceField, value: String) {
        match field {
            ServiceField::Name => self.name = value,
            ServiceField::Url => self.url = value,
            ServiceField::FocusSelector => self.focus_selector = value,
        }
    }
}

/// Replaces ids that occur more than once (e.g. a hand-copied JSON entry)
/// with fresh ones, keeping the first occurrence. Returns whether any id
/// was replaced.
pub fn ensure_unique_ids(services: &mut [ServiceDefinition]) -> bool {
    let mut seen = HashSet::new();
    let mut replaced = false;
    for service in services.iter_mut() {
        while !seen.insert(service.id.clone()) {
            service.id = ServiceId::generate();
            replaced = true;
        }
    }
    replaced
}

/// Editable column of a service row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceField {
    Name,
    Url,
    FocusSelector,
}

impl ServiceField {
    pub const ALL: [ServiceField; 3] = [Self::Name, Self::Url, Self::FocusSelector];

    /// Column identifier used by the settings table.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Url => "url",
            Self::FocusSelector => "focus_selector",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Url => "URL",
            Self::FocusSelector => "Focus Selector",
        }
    }
}

impl FromStr for ServiceField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("unknown service field '{s}'"))
    }
}

/// A ready-made service the user can add from the settings window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceTemplate {
    pub name: &'static str,
    pub url: &'static str,
    pub focus_selector: &'static str,
}

impl ServiceTemplate {
    pub fn instantiate(&self) -> ServiceDefinition {
        ServiceDefinition::new(self.name, self.url, self.focus_selector)
    }
}

pub const TEMPLATES: &[ServiceTemplate] = &[
    ServiceTemplate {
        name: "Ollama - Open WebUI",
        url: "http://localhost:8080",
        focus_selector: r#"[contenteditable="true"]"#,
    },
    ServiceTemplate {
        name: "ChatGPT",
        url: "https://chat.openai.com?referrer=https://github.io/sassanh/quiper",
        focus_selector: "#prompt-textarea",
    },
    ServiceTemplate {
        name: "Gemini",
        url: "https://gemini.google.com?referrer=https://github.io/sassanh/quiper",
        focus_selector: ".textarea",
    },
    ServiceTemplate {
        name: "Grok",
        url: "https://grok.com?referrer=https://github.io/sassanh/quiper",
        focus_selector: r#"textarea[aria-label="Ask Grok anything"],div[contenteditable=true]"#,
    },
    ServiceTemplate {
        name: "Claude",
        url: "https://claude.ai/?referrer=https://github.io/sassanh/quiper",
        focus_selector: "",
    },
    ServiceTemplate {
        name: "Perplexity",
        url: "https://www.perplexity.ai/?referrer=https://github.io/sassanh/quiper",
        focus_selector: "",
    },
];

/// Names of the services configured on first launch.
const DEFAULT_TEMPLATE_NAMES: [&str; 3] = ["ChatGPT", "Gemini", "Grok"];

pub fn template(name: &str) -> Option<&'static ServiceTemplate> {
    TEMPLATES.iter().find(|t| t.name == name)
}

/// ChatGPT, Gemini and Grok, each with its own URL and selector.
pub fn default_services() -> Vec<ServiceDefinition> {
    DEFAULT_TEMPLATE_NAMES
        .iter()
        .filter_map(|name| template(name))
        .map(ServiceTemplate::instantiate)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::constants::REFERRER;

    #[test]
    fn test_defaults_use_their_own_urls() {
        let services = default_services();
        let names: Vec<&str> = services.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["ChatGPT", "Gemini", "Grok"]);
        assert!(services[0].url.starts_with("https://chat.openai.com"));
        assert!(services[1].url.starts_with("https://gemini.google.com"));
        assert!(services[2].url.starts_with("https://grok.com"));
    }

    #[test]
    fn test_default_ids_are_distinct() {
        let services = default_services();
        assert_ne!(services[0].id, services[1].id);
        assert_ne!(services[1].id, services[2].id);
    }

    #[test]
    fn test_remote_templates_carry_referrer() {
        for t in TEMPLATES.iter().filter(|t| t.url.starts_with("https")) {
            assert!(t.url.ends_with(REFERRER), "{}", t.name);
        }
    }

    #[test]
    fn test_template_lookup() {
        assert_eq!(template("Claude").map(|t| t.focus_selector), Some(""));
        assert!(template("AltaVista").is_none());
    }

    #[test]
    fn test_missing_id_is_generated_on_read() {
        let json = r#"{"name": "A", "url": "https://a.example"}"#;
        let def: ServiceDefinition = serde_json::from_str(json).unwrap();
        assert!(!def.id.as_str().is_empty());
        assert_eq!(def.focus_selector, "");
    }

    #[test]
    fn test_selector_blank_is_none() {
        let def = ServiceDefinition::new("A", "https://a.example", "   ");
        assert_eq!(def.selector(), None);
    }

    #[test]
    fn test_ensure_unique_ids() {
        let id = ServiceId::from("same");
        let mut services = vec![
            ServiceDefinition::with_id(id.clone(), "A", "a", ""),
            ServiceDefinition::with_id(id.clone(), "B", "b", ""),
        ];
        assert!(ensure_unique_ids(&mut services));
        assert_eq!(services[0].id, id);
        assert_ne!(services[1].id, id);
        assert!(!ensure_unique_ids(&mut services));
    }

    #[test]
    fn test_field_round_trip() {
        for field in ServiceField::ALL {
            assert_eq!(field.as_str().parse::<ServiceField>(), Ok(field));
        }
        assert!("colour".parse::<ServiceField>().is_err());
    }

    #[test]
    fn test_set_field() {
        let mut def = ServiceDefinition::placeholder();
        def.set_field(ServiceField::Url, "https://b.example".into());
        assert_eq!(def.field(ServiceField::Url), "https://b.example");
    }
}
