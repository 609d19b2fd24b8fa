use super::conditions::ColumnRef;
use crate::schema::{join_alias, EntitySchema, JoinStep};

/// Represents different types of SQL JOINs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Left,
}

impl JoinType {
    pub fn to_sql(&self) -> &'static str {
        match self {
            JoinType::Left => "LEFT JOIN",
        }
    }
}

/// Represents a SQL JOIN clause `JOIN table alias ON joined = parent`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub join_type: JoinType,
    pub table: &'static str,
    pub alias: String,
    /// Column on the joined table
    pub joined: ColumnRef,
    /// Column on the table already in scope
    pub parent: ColumnRef,
}

impl Join {
    /// Create a LEFT JOIN
    pub fn left(table: &'static str, alias: &str, joined: ColumnRef, parent: ColumnRef) -> Self {
        Self {
            join_type: JoinType::Left,
            table,
            alias: alias.to_string(),
            joined,
            parent,
        }
    }

    /// Left-outer join for the last hop of `path`, starting from `schema`'s table
    pub fn for_path(schema: &EntitySchema, path: &[JoinStep]) -> Option<Self> {
        let (step, parents) = path.split_last()?;
        let parent_alias = if parents.is_empty() {
            schema.table.to_string()
        } else {
            join_alias(parents)
        };
        let alias = join_alias(path);
        Some(Self::left(
            step.table,
            &alias,
            ColumnRef::new(alias.clone(), step.remote_column),
            ColumnRef::new(parent_alias, step.local_column),
        ))
    }

    /// Convert to SQL string
    pub fn to_sql(&self) -> String {
        format!(
            "{} {} {} ON {} = {}",
            self.join_type.to_sql(),
            self.table,
            self.alias,
            self.joined.to_sql(),
            self.parent.to_sql()
        )
    }
}
