// Copyright 2025 Stoolap Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Core type definitions
//!
//! This module defines [`DataType`], the runtime tag carried by every value,
//! and [`TypeDescriptor`], the bind-time description of a function argument
//! which may nest arrays, structs and maps.

use std::fmt;

/// SQL data types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum DataType {
    /// NULL data type, used for unknown/unspecified types
    #[default]
    Null = 0,

    /// 64-bit signed integer
    Integer = 1,

    /// 64-bit floating point number
    Float = 2,

    /// UTF-8 text string
    Text = 3,

    /// Boolean true/false
    Boolean = 4,

    /// Timestamp with timezone (stored as UTC)
    Timestamp = 5,

    /// JSON document
    Json = 6,

    /// Ordered list of values (ARRAY or positional STRUCT)
    Array = 7,
}

impl DataType {
    /// Returns true if this type can be compared for ordering
    pub fn is_orderable(&self) -> bool {
        !matches!(self, DataType::Json)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Null => write!(f, "NULL"),
            DataType::Integer => write!(f, "INTEGER"),
            DataType::Float => write!(f, "FLOAT"),
            DataType::Text => write!(f, "TEXT"),
            DataType::Boolean => write!(f, "BOOLEAN"),
            DataType::Timestamp => write!(f, "TIMESTAMP"),
            DataType::Json => write!(f, "JSON"),
            DataType::Array => write!(f, "ARRAY"),
        }
    }
}

/// Bind-time type of a function argument
///
/// The engine builds one descriptor per argument expression. Composite
/// descriptors nest arbitrarily; STRUCT values travel as positional arrays.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    /// A scalar type
    Primitive(DataType),
    /// ARRAY<elem>
    Array(Box<TypeDescriptor>),
    /// STRUCT<name: type, ...>
    Struct(Vec<(String, TypeDescriptor)>),
    /// MAP<key, value>
    Map {
        key: Box<TypeDescriptor>,
        value: Box<TypeDescriptor>,
    },
}

impl TypeDescriptor {
    /// Shorthand for a primitive descriptor
    pub fn primitive(data_type: DataType) -> Self {
        TypeDescriptor::Primitive(data_type)
    }

    pub fn integer() -> Self {
        TypeDescriptor::Primitive(DataType::Integer)
    }

    pub fn float() -> Self {
        TypeDescriptor::Primitive(DataType::Float)
    }

    pub fn text() -> Self {
        TypeDescriptor::Primitive(DataType::Text)
    }

    pub fn boolean() -> Self {
        TypeDescriptor::Primitive(DataType::Boolean)
    }

    pub fn timestamp() -> Self {
        TypeDescriptor::Primitive(DataType::Timestamp)
    }

    /// ARRAY of the given element type
    pub fn array(elem: TypeDescriptor) -> Self {
        TypeDescriptor::Array(Box::new(elem))
    }

    /// STRUCT from (name, type) pairs
    pub fn structure<N: Into<String>>(fields: impl IntoIterator<Item = (N, TypeDescriptor)>) -> Self {
        TypeDescriptor::Struct(
            fields
                .into_iter()
                .map(|(name, ty)| (name.into(), ty))
                .collect(),
        )
    }

    /// MAP from key and value types
    pub fn map(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        TypeDescriptor::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Runtime tag of values described by this descriptor
    pub fn data_type(&self) -> DataType {
        match self {
            TypeDescriptor::Primitive(dt) => *dt,
            TypeDescriptor::Array(_) | TypeDescriptor::Struct(_) => DataType::Array,
            // Map values are carried as JSON documents
            TypeDescriptor::Map { .. } => DataType::Json,
        }
    }

    /// Returns true if values of this type can be compared for ordering
    ///
    /// Maps are never comparable, and neither is any composite that
    /// contains one at any depth.
    pub fn supports_comparison(&self) -> bool {
        match self {
            TypeDescriptor::Primitive(dt) => dt.is_orderable(),
            TypeDescriptor::Array(elem) => elem.supports_comparison(),
            TypeDescriptor::Struct(fields) => fields.iter().all(|(_, ty)| ty.supports_comparison()),
            TypeDescriptor::Map { .. } => false,
        }
    }

    /// Returns true for the BOOLEAN primitive
    pub fn is_boolean(&self) -> bool {
        matches!(self, TypeDescriptor::Primitive(DataType::Boolean))
    }
}

impl From<DataType> for TypeDescriptor {
    fn from(data_type: DataType) -> Self {
        TypeDescriptor::Primitive(data_type)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Primitive(dt) => write!(f, "{}", dt),
            TypeDescriptor::Array(elem) => write!(f, "ARRAY<{}>", elem),
            TypeDescriptor::Struct(fields) => {
                write!(f, "STRUCT<")?;
                for (i, (name, ty)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", name, ty)?;
                }
                write!(f, ">")
            }
            TypeDescriptor::Map { key, value } => write!(f, "MAP<{}, {}>", key, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datatype_display() {
        assert_eq!(DataType::Null.to_string(), "NULL");
        assert_eq!(DataType::Integer.to_string(), "INTEGER");
        assert_eq!(DataType::Boolean.to_string(), "BOOLEAN");
        assert_eq!(DataType::Json.to_string(), "JSON");
        assert_eq!(DataType::Array.to_string(), "ARRAY");
    }

    #[test]
    fn test_primitive_comparison_support() {
        assert!(TypeDescriptor::integer().supports_comparison());
        assert!(TypeDescriptor::text().supports_comparison());
        assert!(TypeDescriptor::timestamp().supports_comparison());
        assert!(!TypeDescriptor::primitive(DataType::Json).supports_comparison());
    }

    #[test]
    fn test_map_is_not_comparable() {
        let map = TypeDescriptor::map(TypeDescriptor::text(), TypeDescriptor::integer());
        assert!(!map.supports_comparison());
    }

    #[test]
    fn test_nested_map_is_not_comparable() {
        let map = TypeDescriptor::map(TypeDescriptor::text(), TypeDescriptor::integer());
        let nested = TypeDescriptor::structure([
            ("id", TypeDescriptor::integer()),
            ("tags", TypeDescriptor::array(map)),
        ]);
        assert!(!nested.supports_comparison());

        let plain = TypeDescriptor::structure([
            ("id", TypeDescriptor::integer()),
            ("names", TypeDescriptor::array(TypeDescriptor::text())),
        ]);
        assert!(plain.supports_comparison());
    }

    #[test]
    fn test_descriptor_display() {
        let ty = TypeDescriptor::structure([
            ("a", TypeDescriptor::integer()),
            (
                "b",
                TypeDescriptor::map(TypeDescriptor::text(), TypeDescriptor::float()),
            ),
        ]);
        assert_eq!(ty.to_string(), "STRUCT<a: INTEGER, b: MAP<TEXT, FLOAT>>");
        assert_eq!(
            TypeDescriptor::array(TypeDescriptor::boolean()).to_string(),
            "ARRAY<BOOLEAN>"
        );
    }

    #[test]
    fn test_descriptor_data_type() {
        assert_eq!(TypeDescriptor::integer().data_type(), DataType::Integer);
        assert_eq!(
            TypeDescriptor::array(TypeDescriptor::text()).data_type(),
            DataType::Array
        );
        assert_eq!(
            TypeDescriptor::map(TypeDescriptor::text(), TypeDescriptor::text()).data_type(),
            DataType::Json
        );
    }
}
