// schema.rs
use std::fmt;

use serde::Serialize;

use crate::declaration::{ColumnDeclaration, EntityDeclaration};
use crate::error::{SchemaError, SchemaResult};
use crate::types::ColumnType;

/// Literal used in a `DEFAULT` clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DefaultValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        DefaultValue::String(value.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(value: String) -> Self {
        DefaultValue::String(value)
    }
}

impl From<i64> for DefaultValue {
    fn from(value: i64) -> Self {
        DefaultValue::Integer(value)
    }
}

impl From<f64> for DefaultValue {
    fn from(value: f64) -> Self {
        DefaultValue::Float(value)
    }
}

impl From<bool> for DefaultValue {
    fn from(value: bool) -> Self {
        DefaultValue::Bool(value)
    }
}

/// Renders the literal as SQL: strings quoted, everything else verbatim.
impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::String(s) => write!(f, "{}", quote_literal(s)),
            DefaultValue::Integer(n) => write!(f, "{n}"),
            DefaultValue::Float(n) => write!(f, "{n}"),
            DefaultValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Single-quote a string literal, doubling embedded quotes.
pub(crate) fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Resolved, immutable description of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDescriptor {
    name: String,
    ty: ColumnType,
    identity: bool,
    unique: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    nullable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<DefaultValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generated: Option<String>,
}

impl ColumnDescriptor {
    pub fn from_declaration(decl: &ColumnDeclaration) -> SchemaResult<Self> {
        let name = decl.resolved_name();
        if name.is_empty() {
            return Err(SchemaError::EmptyColumnName {
                field: decl.field.clone(),
            });
        }
        if matches!(decl.default, Some(DefaultValue::Float(n)) if !n.is_finite()) {
            return Err(SchemaError::NonFiniteDefault {
                column: name.to_string(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            ty: ColumnType::resolve(decl)?,
            identity: decl.identity,
            unique: decl.unique,
            nullable: decl.nullable,
            default: decl.default.clone(),
            generated: decl.generated.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &ColumnType {
        &self.ty
    }

    pub fn is_identity(&self) -> bool {
        self.identity
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    /// Columns are NOT NULL unless declared nullable.
    pub fn is_nullable(&self) -> bool {
        self.nullable.unwrap_or(false)
    }

    /// Whether the clause should spell out `NOT NULL`.
    ///
    /// An identity column is already constrained by its primary key, so it
    /// only gets the clause when declared not-null explicitly.
    pub fn requires_not_null(&self) -> bool {
        match self.nullable {
            Some(nullable) => !nullable,
            None => !self.identity,
        }
    }

    pub fn default_value(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    pub fn generated(&self) -> Option<&str> {
        self.generated.as_deref()
    }
}

/// Resolved, immutable description of one entity's table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityDescriptor {
    entity: String,
    table_name: String,
    columns: Vec<ColumnDescriptor>,
}

impl EntityDescriptor {
    /// Validate a declaration and resolve every column type.
    ///
    /// Fails on a missing or empty table name, on the first column whose type
    /// cannot be resolved, and on an entity without columns.
    pub fn from_declaration(decl: &EntityDeclaration) -> SchemaResult<Self> {
        let table_name = match decl.table_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                return Err(SchemaError::MissingTableMetadata {
                    entity: decl.entity.to_string(),
                });
            }
        };

        let columns = decl
            .columns
            .iter()
            .map(ColumnDescriptor::from_declaration)
            .collect::<SchemaResult<Vec<_>>>()?;

        if columns.is_empty() {
            return Err(SchemaError::MissingColumns {
                entity: decl.entity.to_string(),
                table: table_name,
            });
        }

        Ok(Self {
            entity: decl.entity.to_string(),
            table_name,
            columns,
        })
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }
}
