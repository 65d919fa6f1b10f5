// types.rs
//
// Semantic column types and their MySQL rendering.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::declaration::ColumnDeclaration;
use crate::error::{SchemaError, SchemaResult};
use crate::schema::quote_literal;

pub const DEFAULT_STRING_LENGTH: u32 = 255;
pub const DEFAULT_DECIMAL_PRECISION: u32 = 10;
pub const DEFAULT_DECIMAL_SCALE: u32 = 0;

/// The closed set of type names a column may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticType {
    Int,
    Float,
    String,
    Text,
    Bool,
    Decimal,
    Enum,
}

impl SemanticType {
    pub const ALL: [SemanticType; 7] = [
        SemanticType::Int,
        SemanticType::Float,
        SemanticType::String,
        SemanticType::Text,
        SemanticType::Bool,
        SemanticType::Decimal,
        SemanticType::Enum,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SemanticType::Int => "int",
            SemanticType::Float => "float",
            SemanticType::String => "string",
            SemanticType::Text => "text",
            SemanticType::Bool => "bool",
            SemanticType::Decimal => "decimal",
            SemanticType::Enum => "enum",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error from parsing a type name outside [`SemanticType::ALL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownType(pub String);

impl FromStr for SemanticType {
    type Err = UnknownType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SemanticType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownType(s.to_string()))
    }
}

/// A column's type together with the modifiers that apply to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ColumnType {
    Int,
    Float,
    String {
        #[serde(skip_serializing_if = "Option::is_none")]
        length: Option<u32>,
    },
    Text,
    Bool,
    Decimal {
        #[serde(skip_serializing_if = "Option::is_none")]
        precision: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        scale: Option<u32>,
    },
    Enum {
        options: Vec<String>,
    },
}

impl ColumnType {
    /// Resolve a declared type name, keeping only the modifiers the type uses.
    pub fn resolve(decl: &ColumnDeclaration) -> SchemaResult<Self> {
        let semantic = decl
            .ty
            .parse::<SemanticType>()
            .map_err(|UnknownType(type_name)| SchemaError::UnsupportedType {
                type_name,
                column: decl.resolved_name().to_string(),
            })?;

        let ty = match semantic {
            SemanticType::Int => ColumnType::Int,
            SemanticType::Float => ColumnType::Float,
            SemanticType::String => ColumnType::String {
                length: decl.length,
            },
            SemanticType::Text => ColumnType::Text,
            SemanticType::Bool => ColumnType::Bool,
            SemanticType::Decimal => ColumnType::Decimal {
                precision: decl.precision,
                scale: decl.scale,
            },
            SemanticType::Enum => {
                if decl.options.is_empty() {
                    return Err(SchemaError::MissingEnumOptions {
                        column: decl.resolved_name().to_string(),
                    });
                }
                ColumnType::Enum {
                    options: decl.options.clone(),
                }
            }
        };
        Ok(ty)
    }

    pub fn semantic(&self) -> SemanticType {
        match self {
            ColumnType::Int => SemanticType::Int,
            ColumnType::Float => SemanticType::Float,
            ColumnType::String { .. } => SemanticType::String,
            ColumnType::Text => SemanticType::Text,
            ColumnType::Bool => SemanticType::Bool,
            ColumnType::Decimal { .. } => SemanticType::Decimal,
            ColumnType::Enum { .. } => SemanticType::Enum,
        }
    }

    /// SQL type fragment, with defaults filled in for absent modifiers.
    pub fn sql_type(&self) -> String {
        match self {
            ColumnType::Int => "INT".to_string(),
            ColumnType::Float => "FLOAT".to_string(),
            ColumnType::String { length } => {
                format!("VARCHAR({})", length.unwrap_or(DEFAULT_STRING_LENGTH))
            }
            ColumnType::Text => "TEXT".to_string(),
            ColumnType::Bool => "BOOLEAN".to_string(),
            ColumnType::Decimal { precision, scale } => format!(
                "DECIMAL({},{})",
                precision.unwrap_or(DEFAULT_DECIMAL_PRECISION),
                scale.unwrap_or(DEFAULT_DECIMAL_SCALE)
            ),
            ColumnType::Enum { options } => {
                let quoted: Vec<String> = options.iter().map(|o| quote_literal(o)).collect();
                format!("ENUM({})", quoted.join(", "))
            }
        }
    }
}
