// orm.rs
use std::sync::Arc;

use tracing::{Instrument, debug, debug_span};

use crate::column::compile_column;
use crate::error::{OrmError, SchemaResult};
use crate::executor::Executor;
use crate::registry::{Entity, EntityRef, SchemaRegistry};
use crate::schema::EntityDescriptor;

/// Build the `CREATE TABLE IF NOT EXISTS` statement for a descriptor.
///
/// No trailing semicolon is added.
pub fn compile_table(descriptor: &EntityDescriptor) -> String {
    let cols: Vec<String> = descriptor.columns().iter().map(compile_column).collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n{}\n)",
        descriptor.table_name(),
        cols.join(",\n")
    )
}

/// Compiles entity declarations into DDL and hands it to an [`Executor`].
pub struct Orm<X> {
    executor: X,
    registry: Arc<SchemaRegistry>,
    entities: Vec<EntityRef>,
}

impl<X> Orm<X>
where
    X: Executor,
{
    /// Uses the process-wide [`SchemaRegistry`].
    pub fn new(executor: X) -> Self {
        Self::with_registry(executor, Arc::clone(SchemaRegistry::global()))
    }

    pub fn with_registry(executor: X, registry: Arc<SchemaRegistry>) -> Self {
        Self {
            executor,
            registry,
            entities: Vec::new(),
        }
    }

    /// Add an entity to the set created by [`migrate`](Self::migrate).
    /// ```ignore
    /// let orm = Orm::new(db).register::<User>().register::<Post>();
    /// orm.migrate().await?;
    /// ```
    pub fn register<T: Entity>(mut self) -> Self {
        let entity = EntityRef::of::<T>();
        if !self.entities.iter().any(|e| e.type_id() == entity.type_id()) {
            self.entities.push(entity);
        }
        self
    }

    pub fn executor(&self) -> &X {
        &self.executor
    }

    pub fn describe<T: Entity>(&self) -> SchemaResult<Arc<EntityDescriptor>> {
        self.registry.describe::<T>()
    }

    /// Compile without executing anything.
    pub fn create_table_sql<T: Entity>(&self) -> SchemaResult<String> {
        let descriptor = self.describe::<T>()?;
        Ok(compile_table(&descriptor))
    }

    /// Compile the entity's table and run it: exactly one executor call on
    /// success, none if compilation fails.
    pub async fn create_table<T: Entity>(&self) -> Result<X::Output, OrmError<X::Error>> {
        let span = debug_span!("create_table", entity = std::any::type_name::<T>());
        async {
            let sql = self.create_table_sql::<T>()?;
            self.run(sql).await
        }
        .instrument(span)
        .await
    }

    /// Create every registered table, in registration order.
    ///
    /// All tables are compiled before the first statement runs, so a bad
    /// declaration anywhere means nothing is executed.
    pub async fn migrate(&self) -> Result<Vec<X::Output>, OrmError<X::Error>> {
        let statements = self
            .entities
            .iter()
            .map(|e| self.registry.describe_ref(*e).map(|d| compile_table(&d)))
            .collect::<SchemaResult<Vec<_>>>()?;

        let span = debug_span!("migrate", tables = statements.len());
        async {
            let mut outputs = Vec::with_capacity(statements.len());
            for sql in statements {
                outputs.push(self.run(sql).await?);
            }
            Ok::<_, OrmError<X::Error>>(outputs)
        }
        .instrument(span)
        .await
    }

    async fn run(&self, sql: String) -> Result<X::Output, OrmError<X::Error>> {
        debug!(%sql, "executing DDL");
        self.executor.execute(&sql).await.map_err(OrmError::Execution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::{ColumnDeclaration, EntityDeclaration};

    #[test]
    fn table_statement_layout() {
        let decl = EntityDeclaration::new("Tag")
            .table_name("tags")
            .column(ColumnDeclaration::new("id", "int").identity())
            .column(ColumnDeclaration::new("label", "string").length(40).unique());
        let desc = EntityDescriptor::from_declaration(&decl).unwrap();

        assert_eq!(
            compile_table(&desc),
            "CREATE TABLE IF NOT EXISTS tags (\n\
             id INT AUTO_INCREMENT PRIMARY KEY,\n\
             label VARCHAR(40) UNIQUE NOT NULL\n\
             )"
        );
    }

    #[test]
    fn single_column_has_no_separator() {
        let decl = EntityDeclaration::new("Flag")
            .table_name("flags")
            .column(ColumnDeclaration::new("enabled", "bool").nullable());
        let desc = EntityDescriptor::from_declaration(&decl).unwrap();
        assert_eq!(
            compile_table(&desc),
            "CREATE TABLE IF NOT EXISTS flags (\nenabled BOOLEAN\n)"
        );
    }
}
