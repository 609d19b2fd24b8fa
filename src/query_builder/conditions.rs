use std::cmp::Ordering;

use super::value::Value;

/// A column qualified by the alias of the table it is read from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub alias: String,
    pub column: &'static str,
}

impl ColumnRef {
    pub fn new(alias: impl Into<String>, column: &'static str) -> Self {
        Self {
            alias: alias.into(),
            column,
        }
    }

    pub fn to_sql(&self) -> String {
        format!("{}.{}", self.alias, self.column)
    }
}

/// Source of column values for in-memory condition evaluation
pub trait RowSource {
    /// `None` reads as NULL
    fn lookup(&self, column: &ColumnRef) -> Option<&Value>;
}

/// Comparison operators for [`Condition::Simple`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    NotEq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Operator {
    pub fn to_sql(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::NotEq => "<>",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
        }
    }

    fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            Operator::Eq => ordering == Ordering::Equal,
            Operator::NotEq => ordering != Ordering::Equal,
            Operator::Gt => ordering == Ordering::Greater,
            Operator::Gte => ordering != Ordering::Less,
            Operator::Lt => ordering == Ordering::Less,
            Operator::Lte => ordering != Ordering::Greater,
        }
    }
}

/// One predicate fragment over a single column
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Simple {
        field: ColumnRef,
        operator: Operator,
        value: Value,
    },
    In {
        field: ColumnRef,
        values: Vec<Value>,
    },
    NotIn {
        field: ColumnRef,
        values: Vec<Value>,
    },
    IsNull {
        field: ColumnRef,
    },
    IsNotNull {
        field: ColumnRef,
    },
    /// Raw LIKE pattern; `%` and `_` inside the filter value are not escaped
    Like {
        field: ColumnRef,
        pattern: String,
    },
    NotLike {
        field: ColumnRef,
        pattern: String,
    },
}

impl Condition {
    pub fn field(&self) -> &ColumnRef {
        match self {
            Condition::Simple { field, .. }
            | Condition::In { field, .. }
            | Condition::NotIn { field, .. }
            | Condition::IsNull { field }
            | Condition::IsNotNull { field }
            | Condition::Like { field, .. }
            | Condition::NotLike { field, .. } => field,
        }
    }

    /// Convert condition to SQL string
    pub fn to_sql(&self) -> String {
        match self {
            Condition::Simple {
                field,
                operator,
                value,
            } => format!("{} {} {}", field.to_sql(), operator.to_sql(), value.to_sql()),
            Condition::In { values, .. } if values.is_empty() => "FALSE".to_string(),
            Condition::In { field, values } => {
                format!("{} IN ({})", field.to_sql(), value_list(values))
            }
            Condition::NotIn { values, .. } if values.is_empty() => "TRUE".to_string(),
            Condition::NotIn { field, values } => {
                format!("{} NOT IN ({})", field.to_sql(), value_list(values))
            }
            Condition::IsNull { field } => format!("{} IS NULL", field.to_sql()),
            Condition::IsNotNull { field } => format!("{} IS NOT NULL", field.to_sql()),
            Condition::Like { field, pattern } => format!(
                "{} LIKE {}",
                field.to_sql(),
                Value::Text(pattern.clone()).to_sql()
            ),
            Condition::NotLike { field, pattern } => format!(
                "{} NOT LIKE {}",
                field.to_sql(),
                Value::Text(pattern.clone()).to_sql()
            ),
        }
    }

    /// Evaluate with SQL semantics: anything compared against NULL does not match
    pub fn matches(&self, row: &dyn RowSource) -> bool {
        let current = row.lookup(self.field()).unwrap_or(&Value::Null);
        match self {
            Condition::Simple {
                operator, value, ..
            } => current
                .sql_cmp(value)
                .is_some_and(|ordering| operator.accepts(ordering)),
            Condition::In { values, .. } => values
                .iter()
                .any(|candidate| current.sql_eq(candidate) == Some(true)),
            Condition::NotIn { values, .. } if values.is_empty() => true,
            Condition::NotIn { values, .. } => values
                .iter()
                .all(|candidate| current.sql_eq(candidate) == Some(false)),
            Condition::IsNull { .. } => current.is_null(),
            Condition::IsNotNull { .. } => !current.is_null(),
            Condition::Like { pattern, .. } => current
                .as_str()
                .is_some_and(|text| like_matches(pattern, text)),
            Condition::NotLike { pattern, .. } => current
                .as_str()
                .is_some_and(|text| !like_matches(pattern, text)),
        }
    }
}

fn value_list(values: &[Value]) -> String {
    values
        .iter()
        .map(Value::to_sql)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum LikeToken {
    Any,
    One,
    Literal(char),
}

fn like_tokens(pattern: &str) -> Vec<LikeToken> {
    let mut tokens = Vec::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        tokens.push(match c {
            '%' => LikeToken::Any,
            '_' => LikeToken::One,
            '\\' => LikeToken::Literal(chars.next().unwrap_or('\\')),
            other => LikeToken::Literal(other),
        });
    }
    tokens
}

/// Case-sensitive SQL LIKE: `%` any run, `_` any single char, `\` escapes the next char.
///
/// Runs in O(pattern × text): on a mismatch only the most recent `%` is retried.
pub fn like_matches(pattern: &str, text: &str) -> bool {
    let tokens = like_tokens(pattern);
    let text: Vec<char> = text.chars().collect();

    let (mut p, mut t) = (0, 0);
    let mut last_any: Option<(usize, usize)> = None;
    while t < text.len() {
        match tokens.get(p) {
            Some(LikeToken::Any) => {
                last_any = Some((p, t));
                p += 1;
            }
            Some(LikeToken::One) => {
                p += 1;
                t += 1;
            }
            Some(LikeToken::Literal(c)) if *c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match last_any {
                Some((any_p, any_t)) => {
                    last_any = Some((any_p, any_t + 1));
                    p = any_p + 1;
                    t = any_t + 1;
                }
                None => return false,
            },
        }
    }
    tokens[p..].iter().all(|token| *token == LikeToken::Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Row(HashMap<&'static str, Value>);

    impl RowSource for Row {
        fn lookup(&self, column: &ColumnRef) -> Option<&Value> {
            self.0.get(column.column)
        }
    }

    fn code() -> ColumnRef {
        ColumnRef::new("invoice", "code")
    }

    fn row(value: Value) -> Row {
        Row(HashMap::from([("code", value)]))
    }

    #[test]
    fn test_simple_condition() {
        let condition = Condition::Simple {
            field: code(),
            operator: Operator::Eq,
            value: Value::from("INV-1"),
        };
        assert_eq!(condition.to_sql(), "invoice.code = 'INV-1'");
        assert!(condition.matches(&row(Value::from("INV-1"))));
        assert!(!condition.matches(&row(Value::from("INV-2"))));
    }

    #[test]
    fn test_not_equals_never_matches_null() {
        let condition = Condition::Simple {
            field: code(),
            operator: Operator::NotEq,
            value: Value::from("INV-1"),
        };
        assert_eq!(condition.to_sql(), "invoice.code <> 'INV-1'");
        assert!(condition.matches(&row(Value::from("INV-2"))));
        assert!(!condition.matches(&row(Value::Null)));
    }

    #[test]
    fn test_in_condition() {
        let condition = Condition::In {
            field: ColumnRef::new("invoice", "id"),
            values: vec![Value::Int(1), Value::Int(2), Value::Int(3)],
        };
        assert_eq!(condition.to_sql(), "invoice.id IN (1, 2, 3)");
    }

    #[test]
    fn test_empty_sets() {
        let empty_in = Condition::In {
            field: code(),
            values: vec![],
        };
        let empty_not_in = Condition::NotIn {
            field: code(),
            values: vec![],
        };
        assert_eq!(empty_in.to_sql(), "FALSE");
        assert_eq!(empty_not_in.to_sql(), "TRUE");
        assert!(!empty_in.matches(&row(Value::from("a"))));
        assert!(empty_not_in.matches(&row(Value::Null)));
    }

    #[test]
    fn test_not_in_excludes_null() {
        let condition = Condition::NotIn {
            field: code(),
            values: vec![Value::from("a")],
        };
        assert!(condition.matches(&row(Value::from("b"))));
        assert!(!condition.matches(&row(Value::from("a"))));
        assert!(!condition.matches(&row(Value::Null)));
    }

    #[test]
    fn test_like_rendering_and_matching() {
        let condition = Condition::Like {
            field: code(),
            pattern: "%Jo%".to_string(),
        };
        assert_eq!(condition.to_sql(), "invoice.code LIKE '%Jo%'");
        assert!(condition.matches(&row(Value::from("John"))));
        assert!(!condition.matches(&row(Value::from("john"))));
        assert!(!condition.matches(&row(Value::Null)));
    }

    #[test]
    fn test_like_wildcards() {
        assert!(like_matches("%a_c%", "xxabcxx"));
        assert!(!like_matches("%a_c%", "ac"));
        assert!(like_matches("a\\%b", "a%b"));
        assert!(!like_matches("a\\%b", "axb"));
        assert!(like_matches("%", ""));
        assert!(like_matches("%%b", "ab"));
        assert!(!like_matches("a_", "a"));
        assert!(like_matches("a\\", "a\\"));
    }

    #[test]
    fn test_like_many_wildcards_on_long_text() {
        let text = "a".repeat(400);
        let pattern = format!("%{}b%", "%a".repeat(30));
        let start = std::time::Instant::now();
        assert!(!like_matches(&pattern, &text));
        assert!(like_matches(&format!("%{}%", "%a".repeat(30)), &text));
        assert!(start.elapsed() < std::time::Duration::from_secs(1));
    }
}
