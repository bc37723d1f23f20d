//! Output shapes for check results.
//!
//! Three formats, all carrying identical content:
//! - Map: an insertion-ordered associative structure with lookup
//! - Object: a `serde_json::Value` object (key order preserved)
//! - Json: the object form serialized to text

use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::analysis::FeatureSite;
use crate::error::Error;

/// Output shape selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Map,
    #[default]
    Object,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Map => "map",
            OutputFormat::Object => "object",
            OutputFormat::Json => "json",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "map" => Ok(OutputFormat::Map),
            "object" => Ok(OutputFormat::Object),
            "json" => Ok(OutputFormat::Json),
            other => Err(Error::InvalidConfig(other.to_string())),
        }
    }
}

/// Feature name to non-empty site lists, in checker registration order.
///
/// Names with zero matches are never present: downstream tooling treats
/// "key present" as "feature found", so omission is a hard invariant, not
/// an implementation detail.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckReport {
    entries: Vec<(String, Vec<FeatureSite>)>,
}

impl CheckReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a non-empty site list under a name. Re-inserting a name
    /// replaces its sites in place, keeping the original position.
    pub fn insert(&mut self, name: String, sites: Vec<FeatureSite>) {
        debug_assert!(!sites.is_empty(), "empty results must be dropped, not inserted");
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = sites,
            None => self.entries.push((name, sites)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&[FeatureSite]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, sites)| sites.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FeatureSite])> {
        self.entries
            .iter()
            .map(|(name, sites)| (name.as_str(), sites.as_slice()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// The plain key/value object form. serde_json is built with
    /// `preserve_order`, so the report's ordering survives.
    pub fn to_object(&self) -> Result<serde_json::Value, Error> {
        Ok(serde_json::to_value(self)?)
    }

    /// The serialized-text form of the object.
    pub fn to_json_string(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Serialize for CheckReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, sites) in &self.entries {
            map.serialize_entry(name, sites)?;
        }
        map.end()
    }
}

/// A rendered check result, shaped per the engine's configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutput {
    Map(CheckReport),
    Object(serde_json::Value),
    Json(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(literal: &str) -> FeatureSite {
        FeatureSite::lexical(literal, 0)
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut report = CheckReport::new();
        report.insert("Zeta".to_string(), vec![site("z")]);
        report.insert("Alpha".to_string(), vec![site("a")]);
        let names: Vec<_> = report.names().collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn object_form_preserves_order() {
        let mut report = CheckReport::new();
        report.insert("Zeta".to_string(), vec![site("z")]);
        report.insert("Alpha".to_string(), vec![site("a")]);
        let object = report.to_object().unwrap();
        let keys: Vec<_> = object.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn json_form_matches_object_form() {
        let mut report = CheckReport::new();
        report.insert("Loop".to_string(), vec![site("for")]);
        let json = report.to_json_string().unwrap();
        let reparsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(reparsed, report.to_object().unwrap());
    }

    #[test]
    fn unknown_format_is_invalid_config() {
        let err = "yaml".parse::<OutputFormat>().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn known_formats_parse() {
        assert_eq!("map".parse::<OutputFormat>().unwrap(), OutputFormat::Map);
        assert_eq!(
            "object".parse::<OutputFormat>().unwrap(),
            OutputFormat::Object
        );
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    }
}
