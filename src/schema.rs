//! # Entity Schema Metadata
//!
//! Static, per-entity tables describing which criteria fields exist, which column
//! each one reads, and which left-outer join path reaches a related entity's
//! identifier. The predicate compiler is driven entirely by these tables.

/// One left-outer join hop: `LEFT JOIN table alias ON alias.remote_column = previous.local_column`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinStep {
    /// Relationship name on the previous entity (`order`, `customer`, `orderItems`, ...)
    pub relationship: &'static str,
    pub table: &'static str,
    pub local_column: &'static str,
    pub remote_column: &'static str,
}

impl JoinStep {
    /// Follow a foreign key held by the previous entity (many-to-one)
    pub const fn to_one(
        relationship: &'static str,
        table: &'static str,
        local_column: &'static str,
    ) -> Self {
        Self {
            relationship,
            table,
            local_column,
            remote_column: "id",
        }
    }

    /// Follow a foreign key held by the target entity (one-to-many)
    pub const fn to_many(
        relationship: &'static str,
        table: &'static str,
        remote_column: &'static str,
    ) -> Self {
        Self {
            relationship,
            table,
            local_column: "id",
            remote_column,
        }
    }
}

/// Where a criteria field reads its value from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTarget {
    /// Scalar column on the entity's own table
    Column(&'static str),
    /// Identifier of the entity at the end of the join path
    Related(&'static [JoinStep]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub target: FieldTarget,
}

impl FieldDef {
    pub const fn column(name: &'static str) -> Self {
        Self {
            name,
            target: FieldTarget::Column(name),
        }
    }

    pub const fn related(name: &'static str, path: &'static [JoinStep]) -> Self {
        Self {
            name,
            target: FieldTarget::Related(path),
        }
    }
}

/// Field and relationship table for one persistent entity
#[derive(Debug, PartialEq, Eq)]
pub struct EntitySchema {
    pub name: &'static str,
    pub table: &'static str,
    pub columns: &'static [&'static str],
    pub fields: &'static [FieldDef],
}

impl EntitySchema {
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains(&column)
    }

    /// Columns qualified with the table alias, in declaration order
    pub fn qualified_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| format!("{}.{}", self.table, column))
            .collect()
    }
}

/// Alias of the table reached by a join path, e.g. `j_order_customer`
pub fn join_alias(path: &[JoinStep]) -> String {
    let mut alias = String::from("j");
    for step in path {
        alias.push('_');
        alias.push_str(step.relationship);
    }
    alias
}
