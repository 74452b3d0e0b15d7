//! Declarative keyword-extension schemas.
//!
//! Extensions describe custom keywords the engine should accept: the name,
//! the sections the keyword is legal in, and the shape of its records.
//! The core consumes these purely as configuration handed through to the
//! engine; nothing here is interpreted semantically. The serde shape
//! matches the JSON dialect such schemas are traditionally shipped in
//! (`"value_type": "DOUBLE"`, `"size_type": "ALL"`, ...).

#[cfg(not(test))]
use alloc::string::String;
#[cfg(not(test))]
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::value::Item;

/// The scalar type of a schema item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ValueType {
    /// Integer.
    #[cfg_attr(feature = "serde", serde(rename = "INT"))]
    Int,
    /// Floating-point.
    #[cfg_attr(feature = "serde", serde(rename = "DOUBLE"))]
    Float,
    /// String.
    #[cfg_attr(feature = "serde", serde(rename = "STRING"))]
    Str,
}

/// How many values an item consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SizeType {
    /// Exactly one value.
    #[cfg_attr(feature = "serde", serde(rename = "FIXED"))]
    Fixed,
    /// All remaining values in the record.
    #[cfg_attr(feature = "serde", serde(rename = "ALL"))]
    All,
}

/// One named item in a keyword's record specification.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ItemSchema {
    /// Item name.
    pub name: String,
    /// Scalar type of the value.
    pub value_type: ValueType,
    /// Default value when the deck leaves the item unspecified.
    #[cfg_attr(feature = "serde", serde(default))]
    pub default: Option<Item>,
    /// Fixed or variable size marker.
    #[cfg_attr(feature = "serde", serde(default))]
    pub size_type: Option<SizeType>,
}

/// Untyped bulk-data specification (a keyword whose records are one long
/// homogeneous value list, like a grid property array).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DataSchema {
    /// Scalar type of every value.
    pub value_type: ValueType,
}

/// A custom keyword the engine should accept.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeywordSchema {
    /// The keyword name this schema registers.
    pub name: String,
    /// The deck sections the keyword is legal in.
    #[cfg_attr(feature = "serde", serde(default))]
    pub sections: Vec<String>,
    /// Fixed record count, when the keyword has one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub size: Option<u32>,
    /// Bulk-data specification, for data keywords.
    #[cfg_attr(feature = "serde", serde(default))]
    pub data: Option<DataSchema>,
    /// Per-item record specification.
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Vec<ItemSchema>,
}

impl KeywordSchema {
    /// A minimal schema that registers `name` with no record specification.
    pub fn named(name: impl Into<String>) -> Self {
        KeywordSchema {
            name: name.into(),
            sections: Vec::new(),
            size: None,
            data: None,
            items: Vec::new(),
        }
    }

    /// Does this keyword declare a fixed record count?
    pub fn fixed_size(&self) -> bool {
        self.size.is_some()
    }
}
