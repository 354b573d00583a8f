//! Schema trait definition.
//!
//! A schema description is supplied to the database handle from outside;
//! this trait is the seam it plugs into.

/// A single table in a schema description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDefinition {
    /// Table name.
    pub name: &'static str,
    /// `CREATE TABLE IF NOT EXISTS` statement.
    pub create_sql: &'static str,
    /// `CREATE INDEX IF NOT EXISTS` statements for the table.
    pub indexes: &'static [&'static str],
}

/// Static description of the tables a database handle is bound to.
pub trait Schema: Send + Sync {
    /// Schema name, recorded alongside the version.
    fn name(&self) -> &'static str;

    /// Schema version.
    fn version(&self) -> u32;

    /// Tables in creation order (referenced tables first).
    fn tables(&self) -> &'static [TableDefinition];

    /// Returns the DDL batch that creates every table and index.
    ///
    /// Should be idempotent - safe to execute against an existing database.
    fn ddl(&self) -> String {
        let mut sql = String::new();
        for table in self.tables() {
            sql.push_str(table.create_sql.trim());
            sql.push('\n');
            for index in table.indexes {
                sql.push_str(index.trim());
                sql.push_str(";\n");
            }
        }
        sql
    }

    /// Looks up a table by name.
    fn table(&self, name: &str) -> Option<&'static TableDefinition> {
        self.tables().iter().find(|t| t.name == name)
    }
}
