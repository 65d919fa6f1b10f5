// column.rs
use crate::schema::ColumnDescriptor;

/// Render one column-definition clause.
///
/// Constraint order is fixed: identity, unique, not-null, default, generated.
pub fn compile_column(column: &ColumnDescriptor) -> String {
    let mut col_def = format!("{} {}", column.name(), column.ty().sql_type());
    if column.is_identity() {
        col_def.push_str(" AUTO_INCREMENT PRIMARY KEY");
    }
    if column.is_unique() {
        col_def.push_str(" UNIQUE");
    }
    if column.requires_not_null() {
        col_def.push_str(" NOT NULL");
    }
    if let Some(default) = column.default_value() {
        col_def.push_str(&format!(" DEFAULT {default}"));
    }
    if let Some(expr) = column.generated() {
        col_def.push_str(&format!(" GENERATED ALWAYS AS ({expr}) STORED"));
    }
    col_def
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::ColumnDeclaration;

    fn compile(decl: ColumnDeclaration) -> String {
        compile_column(&ColumnDescriptor::from_declaration(&decl).unwrap())
    }

    #[test]
    fn every_clause_in_fixed_order() {
        let sql = compile(
            ColumnDeclaration::new("code", "string")
                .identity()
                .unique()
                .not_null()
                .default_value("x")
                .generated("y"),
        );
        assert_eq!(
            sql,
            "code VARCHAR(255) AUTO_INCREMENT PRIMARY KEY UNIQUE NOT NULL DEFAULT 'x' GENERATED ALWAYS AS (y) STORED"
        );
    }

    #[test]
    fn identity_is_not_null_only_when_declared() {
        assert_eq!(
            compile(ColumnDeclaration::new("id", "int").identity()),
            "id INT AUTO_INCREMENT PRIMARY KEY"
        );
        assert_eq!(
            compile(ColumnDeclaration::new("id", "int").identity().not_null()),
            "id INT AUTO_INCREMENT PRIMARY KEY NOT NULL"
        );
        assert_eq!(compile(ColumnDeclaration::new("n", "int")), "n INT NOT NULL");
    }

    #[test]
    fn nullable_column_has_no_constraints() {
        assert_eq!(compile(ColumnDeclaration::new("bio", "text").nullable()), "bio TEXT");
    }

    #[test]
    fn non_string_defaults_are_verbatim() {
        assert_eq!(
            compile(ColumnDeclaration::new("active", "bool").default_value(true)),
            "active BOOLEAN NOT NULL DEFAULT true"
        );
        assert_eq!(
            compile(ColumnDeclaration::new("retries", "int").default_value(3_i64)),
            "retries INT NOT NULL DEFAULT 3"
        );
        assert_eq!(
            compile(
                ColumnDeclaration::new("ratio", "float")
                    .nullable()
                    .default_value(0.25_f64)
            ),
            "ratio FLOAT DEFAULT 0.25"
        );
    }

    #[test]
    fn generated_column_keeps_expression_as_written() {
        assert_eq!(
            compile(
                ColumnDeclaration::new("total", "decimal")
                    .precision(12)
                    .scale(2)
                    .nullable()
                    .generated("price * quantity")
            ),
            "total DECIMAL(12,2) GENERATED ALWAYS AS (price * quantity) STORED"
        );
    }

    #[test]
    fn renamed_column_uses_override() {
        assert_eq!(
            compile(ColumnDeclaration::new("email", "string").name("mail").length(100)),
            "mail VARCHAR(100) NOT NULL"
        );
    }
}
