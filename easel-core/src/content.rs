//! Structured content from the generation collaborator.
//!
//! The content-generation service hands documents a JSON object describing
//! a cover, ordered sections, and contact details. Every field is optional;
//! consumers substitute fixed default labels when something is absent. The
//! model seeder turns this object into an initial element list, and the
//! slide-deck and flow-text exporters read it directly.

use serde::{Deserialize, Serialize};

/// The full structured content object.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentContent {
    /// Document title, when the collaborator supplies one directly.
    #[serde(default)]
    pub title: Option<String>,
    /// Cover block: company/report naming, division, year, logo, contact.
    #[serde(default)]
    pub cover: Option<Cover>,
    /// Ordered document sections.
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// Cover information.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cover {
    /// Company name.
    #[serde(default)]
    pub company_name: Option<String>,
    /// Report title.
    #[serde(default)]
    pub report_title: Option<String>,
    /// Division or department name.
    #[serde(default)]
    pub division: Option<String>,
    /// Reporting year.
    #[serde(default)]
    pub year: Option<String>,
    /// Logo image source (data URI or URL).
    #[serde(default)]
    pub logo: Option<String>,
    /// Contact block.
    #[serde(default)]
    pub contact_details: Option<ContactDetails>,
}

/// Contact details rendered on covers and in flow-text output.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    /// Contact email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Postal address.
    #[serde(default)]
    pub address: Option<String>,
}

/// One document section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Section heading.
    #[serde(default)]
    pub title: Option<String>,
    /// Section body: a string, an array of items, or an object. The
    /// collaborator is free-form here; [`Section::content_text`] flattens
    /// whatever arrives into displayable text.
    #[serde(default)]
    pub content: serde_json::Value,
}

impl Section {
    /// The section heading, or a fixed default label for section `index`
    /// (0-based; labels are 1-based).
    #[must_use]
    pub fn display_title(&self, index: usize) -> String {
        match &self.title {
            Some(title) if !title.is_empty() => title.clone(),
            _ => format!("Section {}", index + 1),
        }
    }

    /// Flatten the free-form content value into displayable text.
    ///
    /// Strings pass through. Arrays join item texts with blank lines,
    /// rendering `{position, company}` objects as "position at company"
    /// and other objects as their JSON. Objects join their values with
    /// spaces. Anything else flattens to an empty string.
    #[must_use]
    pub fn content_text(&self) -> String {
        flatten_value(&self.content)
    }
}

fn flatten_value(value: &serde_json::Value) -> String {
    use serde_json::Value;

    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(flatten_item)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n"),
        Value::Object(map) => map
            .values()
            .map(|v| match v {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" "),
        _ => String::new(),
    }
}

fn flatten_item(item: &serde_json::Value) -> String {
    use serde_json::Value;

    match item {
        Value::String(text) => text.clone(),
        Value::Object(map) => {
            let position = map.get("position").and_then(Value::as_str);
            let company = map.get("company").and_then(Value::as_str);
            match (position, company) {
                (Some(position), Some(company)) => format!("{position} at {company}"),
                _ => item.to_string(),
            }
        }
        other => other.to_string(),
    }
}

impl DocumentContent {
    /// Parse a content object from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The title exporters display: cover report title, else company name,
    /// else the top-level title, else the fixed default label.
    #[must_use]
    pub fn display_title(&self) -> String {
        self.cover
            .as_ref()
            .and_then(|cover| cover.report_title.clone().or_else(|| cover.company_name.clone()))
            .or_else(|| self.title.clone())
            .unwrap_or_else(|| "Document Title".to_string())
    }

    /// The cover subtitle, if any: division, else year.
    #[must_use]
    pub fn subtitle(&self) -> Option<String> {
        let cover = self.cover.as_ref()?;
        cover.division.clone().or_else(|| cover.year.clone())
    }

    /// Whether there is anything at all to render from this object.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.cover.is_none() && self.sections.is_empty()
    }
}
