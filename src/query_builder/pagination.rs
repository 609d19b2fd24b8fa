use serde::{Deserialize, Serialize};

use crate::config::PaginationConfig;
use crate::error::{Result, StorefrontError};
use crate::schema::EntitySchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// One `ORDER BY` term over a column of the queried entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub property: String,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn asc(property: &str) -> Self {
        Self {
            property: property.to_string(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(property: &str) -> Self {
        Self {
            property: property.to_string(),
            direction: SortDirection::Desc,
        }
    }

    /// Parse a `sort` request parameter such as `code,desc` or `id`
    pub fn parse(raw: &str) -> Result<Self> {
        let mut parts = raw.split(',').map(str::trim);
        let property = parts
            .next()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| StorefrontError::validation(format!("empty sort parameter '{raw}'")))?;
        let direction = match parts.next().map(str::to_ascii_lowercase).as_deref() {
            None | Some("asc") => SortDirection::Asc,
            Some("desc") => SortDirection::Desc,
            Some(other) => {
                return Err(StorefrontError::validation(format!(
                    "unknown sort direction '{other}'"
                )))
            }
        };
        Ok(Self {
            property: property.to_string(),
            direction,
        })
    }
}

/// Page number (0-based), page size and ordering for a paged query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Vec<SortOrder>,
}

impl PageRequest {
    pub fn of(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            sort: Vec::new(),
        }
    }

    pub fn sorted_by(mut self, order: SortOrder) -> Self {
        self.sort.push(order);
        self
    }

    /// First page at the configured default size
    pub fn first(config: &PaginationConfig) -> Self {
        Self::of(0, config.default_page_size)
    }

    /// Clamp the page size into `1..=max_page_size`
    pub fn clamped(mut self, config: &PaginationConfig) -> Self {
        self.size = self.size.clamp(1, config.max_page_size);
        self
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    /// Reject sort properties that are not columns of the entity
    pub fn validate(&self, schema: &EntitySchema) -> Result<()> {
        if self.size == 0 {
            return Err(StorefrontError::validation("page size must be positive"));
        }
        for order in &self.sort {
            if !schema.has_column(&order.property) {
                return Err(StorefrontError::validation(format!(
                    "unknown sort property '{}' for {}",
                    order.property, schema.name
                )));
            }
        }
        Ok(())
    }

    /// Convert to SQL string
    pub fn to_sql(&self) -> String {
        format!(" LIMIT {} OFFSET {}", self.size, self.offset())
    }
}

/// One page of results plus the total number of matching rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: i64,
    pub page: u32,
    pub size: u32,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total_elements: i64, request: &PageRequest) -> Self {
        Self {
            content,
            total_elements,
            page: request.page,
            size: request.size,
        }
    }

    /// Calculate total pages given the total count
    pub fn total_pages(&self) -> u64 {
        let total = u64::try_from(self.total_elements).unwrap_or(0);
        if self.size == 0 {
            return 1;
        }
        total.div_ceil(u64::from(self.size))
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) + 1 < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            page: self.page,
            size: self.size,
        }
    }
}
