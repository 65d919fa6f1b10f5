// declaration.rs
//
// Raw, unvalidated entity declarations. `#[entity]` expands into calls on
// these builders; the same builders can be used by hand.

use crate::schema::DefaultValue;

/// An entity's declared shape before type names are resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDeclaration {
    pub entity: &'static str,
    pub table_name: Option<String>,
    pub columns: Vec<ColumnDeclaration>,
}

impl EntityDeclaration {
    /// Start a declaration for the entity type named `entity`.
    /// ```
    /// use tablecraft::{ColumnDeclaration, EntityDeclaration};
    ///
    /// let decl = EntityDeclaration::new("User")
    ///     .table_name("users")
    ///     .column(ColumnDeclaration::new("id", "int").identity());
    /// assert_eq!(decl.columns.len(), 1);
    /// ```
    pub fn new(entity: &'static str) -> Self {
        Self {
            entity,
            table_name: None,
            columns: Vec::new(),
        }
    }

    pub fn table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = Some(name.into());
        self
    }

    pub fn column(mut self, column: ColumnDeclaration) -> Self {
        self.columns.push(column);
        self
    }
}

/// One annotated field. `ty` is the semantic type name as written.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDeclaration {
    pub field: String,
    pub name: Option<String>,
    pub ty: String,
    pub length: Option<u32>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    pub options: Vec<String>,
    pub identity: bool,
    pub unique: bool,
    /// `None` when nullability was not declared.
    pub nullable: Option<bool>,
    pub default: Option<DefaultValue>,
    pub generated: Option<String>,
}

impl ColumnDeclaration {
    pub fn new(field: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            name: None,
            ty: ty.into(),
            length: None,
            precision: None,
            scale: None,
            options: Vec::new(),
            identity: false,
            unique: false,
            nullable: None,
            default: None,
            generated: None,
        }
    }

    /// Column name override; the field name is used otherwise.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn identity(mut self) -> Self {
        self.identity = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = Some(true);
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = Some(false);
        self
    }

    pub fn default_value(mut self, value: impl Into<DefaultValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn generated(mut self, expr: impl Into<String>) -> Self {
        self.generated = Some(expr.into());
        self
    }

    /// Name the column will carry in DDL.
    pub fn resolved_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.field)
    }
}
