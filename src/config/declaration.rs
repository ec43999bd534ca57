//! Package declarations (the `--config` YAML file)
//!
//! The file is a top-level list:
//!
//! ```yaml
//! - name: curl
//!   version: 8.0.0
//!   release: "1"
//!   source_channel: base-os
//!   target_channels:
//!     - updates
//!     - extras
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;
use tracing::debug;

use crate::error::{
    Result, config_not_found, config_parse_failed, config_read_failed, declaration_invalid,
};

/// One operator intent record
///
/// Every key is optional at parse time so that an incomplete entry loads and
/// is later skipped by [`PackageDeclaration::validate`] instead of failing the
/// whole file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDeclaration {
    #[serde(default, deserialize_with = "scalar_string")]
    pub name: String,

    #[serde(default, deserialize_with = "scalar_string")]
    pub version: String,

    #[serde(default, deserialize_with = "scalar_string")]
    pub release: String,

    #[serde(default, deserialize_with = "scalar_string")]
    pub source_channel: String,

    #[serde(default)]
    pub target_channels: Vec<String>,

    /// Keys whose plain YAML scalar reads as a number with different text
    #[serde(skip)]
    unquoted_numbers: Vec<String>,
}

/// Keys compared as text against the server
const TEXT_KEYS: [&str; 4] = ["name", "version", "release", "source_channel"];

impl PackageDeclaration {
    #[cfg(test)]
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        release: impl Into<String>,
        source_channel: impl Into<String>,
        target_channels: &[&str],
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            release: release.into(),
            source_channel: source_channel.into(),
            target_channels: target_channels.iter().map(ToString::to_string).collect(),
            unquoted_numbers: Vec::new(),
        }
    }

    /// Both the source channel and at least one target channel are required,
    /// and no compared value may be a number YAML would rewrite
    pub fn validate(&self) -> Result<()> {
        if !self.unquoted_numbers.is_empty() {
            return Err(declaration_invalid(
                &self.name,
                format!(
                    "{} must be quoted, YAML reads the value as a number",
                    self.unquoted_numbers.join(", ")
                ),
            ));
        }
        if self.source_channel.trim().is_empty() {
            return Err(declaration_invalid(&self.name, "source_channel is not specified"));
        }
        if self.target_channels.iter().all(|c| c.trim().is_empty()) {
            return Err(declaration_invalid(&self.name, "target_channels is empty"));
        }
        Ok(())
    }

    /// Target channels in declared order, duplicates and blanks removed
    pub fn unique_targets(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.target_channels
            .iter()
            .map(String::as_str)
            .filter(|c| !c.trim().is_empty())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// `name-version-release`, the way the server shows packages
    pub fn nvr(&self) -> String {
        format!("{}-{}-{}", self.name, self.version, self.release)
    }
}

/// Keep the scalar's text as written
///
/// `release: 1` is an integer to YAML but the server compares strings, so
/// the literal text is kept. Deserializers that only hand over the parsed
/// number get its decimal rendering.
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_str(ScalarText)
}

struct ScalarText;

impl Visitor<'_> for ScalarText {
    type Value = String;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a scalar")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<String, E> {
        Ok(String::new())
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<String, E> {
        Ok(String::new())
    }
}

impl PackageDeclaration {
    fn text_mut(&mut self, key: &str) -> Option<&mut String> {
        match key {
            "name" => Some(&mut self.name),
            "version" => Some(&mut self.version),
            "release" => Some(&mut self.release),
            "source_channel" => Some(&mut self.source_channel),
            _ => None,
        }
    }

    /// Compare the text read for each key with how YAML typed the scalar
    ///
    /// A float (`1.10` is `1.1`) or an integer whose text is not its decimal
    /// form (`0x1F` is `31`) would be matched against the wrong value, so the
    /// key is recorded and [`validate`](Self::validate) rejects the entry.
    fn check_scalars(&mut self, record: &Value) {
        for key in TEXT_KEYS {
            let Some(field) = self.text_mut(key) else {
                continue;
            };
            let rewritten = match record.get(key) {
                Some(Value::Null) => {
                    field.clear();
                    false
                }
                Some(Value::Number(n)) => n.is_f64() || n.to_string() != *field,
                _ => false,
            };
            if rewritten {
                self.unquoted_numbers.push(key.to_string());
            }
        }
    }
}

/// Load declarations from a YAML file
///
/// A missing, unreadable or unparsable file is fatal to the run. An empty
/// file is an empty list.
pub fn load_declarations(path: &Path) -> Result<Vec<PackageDeclaration>> {
    if !path.exists() {
        return Err(config_not_found(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| config_read_failed(path.display().to_string(), e.to_string()))?;

    let declarations = parse_declarations(&content)
        .map_err(|e| config_parse_failed(path.display().to_string(), e.to_string()))?;

    debug!(
        path = %path.display(),
        count = declarations.len(),
        "Loaded package declarations"
    );
    Ok(declarations)
}

/// Parse declarations from YAML text
pub fn parse_declarations(
    yaml: &str,
) -> std::result::Result<Vec<PackageDeclaration>, serde_yaml::Error> {
    if yaml.trim().is_empty() {
        return Ok(Vec::new());
    }
    let declarations: Option<Vec<PackageDeclaration>> = serde_yaml::from_str(yaml)?;
    let mut declarations = declarations.unwrap_or_default();

    // Second read keeps the scalar types the text-preserving pass hides
    let tree: Value = serde_yaml::from_str(yaml)?;
    if let Some(records) = tree.as_sequence() {
        for (declaration, record) in declarations.iter_mut().zip(records) {
            declaration.check_scalars(record);
        }
    }
    Ok(declarations)
}
