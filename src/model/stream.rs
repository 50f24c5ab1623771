use serde::{Deserialize, Serialize};

/// Watchable links for one match, as served by the stream feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamData {
    #[serde(default)]
    pub events: Vec<MatchEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<StreamStyles>,
}

/// A named stream with a primary link and/or alternate servers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchEvent {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,
}

impl MatchEvent {
    /// Primary link first, then the alternates in feed order.
    pub fn servers(&self) -> impl Iterator<Item = &str> {
        self.link
            .iter()
            .chain(self.links.iter())
            .map(String::as_str)
            .filter(|link| !link.trim().is_empty())
    }
}

/// Inline CSS overrides for the stream buttons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamStyles {
    #[serde(default)]
    pub livee: String,
    #[serde(default)]
    pub livee_hover: String,
    #[serde(default)]
    pub livee_name: String,
}

/// Split an inline CSS declaration list into `(camelCaseProperty, value)` pairs.
///
/// Declarations without both a property and a value are skipped.
pub fn parse_inline_style(css: &str) -> Vec<(String, String)> {
    css.split(';')
        .filter_map(|rule| {
            let (prop, value) = rule.split_once(':')?;
            let (prop, value) = (prop.trim(), value.trim());
            if prop.is_empty() || value.is_empty() {
                return None;
            }
            Some((camel_case(prop), value.to_string()))
        })
        .collect()
}

fn camel_case(prop: &str) -> String {
    let mut out = String::with_capacity(prop.len());
    let mut upper_next = false;
    for c in prop.chars() {
        if c == '-' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
