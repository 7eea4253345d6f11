//! Raw records of the JSON model description, exactly as they appear in the input.
//!
//! Every field is optional. Defaults are applied by the builders, never here, so an absent
//! list and an explicit `null` behave the same.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RawModel {
    pub documents: Option<Vec<RawDocument>>,
    pub types: Option<Vec<RawType>>,
    pub services: Option<Vec<RawService>>,
    pub root: Option<String>,
}

/// Fields shared by every record that becomes a concept.
#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RawCommon {
    pub name: Option<String>,
    pub doc: Option<String>,
    pub html: Option<String>,
    pub annotations: Option<Vec<RawAnnotation>>,
}

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RawDocument {
    #[serde(flatten)]
    pub common: RawCommon,
    pub source: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RawType {
    #[serde(flatten)]
    pub common: RawCommon,
    pub kind: Option<String>,
    pub values: Option<Vec<RawEnumValue>>,
    pub attributes: Option<Vec<RawMember>>,
    pub links: Option<Vec<RawMember>>,
}

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RawEnumValue {
    #[serde(flatten)]
    pub common: RawCommon,
}

/// A struct attribute, struct link, method parameter or locator parameter.
#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RawMember {
    #[serde(flatten)]
    pub common: RawCommon,
    #[serde(rename = "type")]
    pub type_spec: Option<String>,
    #[serde(rename = "in")]
    pub is_in: Option<bool>,
    #[serde(rename = "out")]
    pub is_out: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RawService {
    #[serde(flatten)]
    pub common: RawCommon,
    pub methods: Option<Vec<RawMethod>>,
    pub locators: Option<Vec<RawLocator>>,
}

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RawMethod {
    #[serde(flatten)]
    pub common: RawCommon,
    pub parameters: Option<Vec<RawMember>>,
}

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RawLocator {
    #[serde(flatten)]
    pub common: RawCommon,
    pub service: Option<String>,
    pub parameters: Option<Vec<RawMember>>,
}

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RawAnnotation {
    pub name: Option<String>,
    pub parameters: Option<Vec<RawAnnotationParameter>>,
}

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RawAnnotationParameter {
    pub name: Option<String>,
    pub values: Option<Vec<String>>,
}
