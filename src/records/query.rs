//! The parameters of record API fetches: which fields to return, how to filter
//! and how to order.

use serde::Serialize;
use serde_json::Value;

/// The field selection, filters and ordering of a fetch.
///
/// Filters combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FetchParams {
    pub fields: Vec<FieldSelection>,
    #[serde(rename = "where", skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Filter>,
    #[serde(rename = "orderBy", skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderBy>,
}

impl FetchParams {
    /// Select `fields` with no filters or ordering.
    pub fn new(fields: Vec<FieldSelection>) -> Self {
        Self {
            fields,
            ..Default::default()
        }
    }

    /// Add a filter. Filters combine with AND.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Add an ordering, applied after any orderings already added.
    pub fn order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by.push(order_by);
        self
    }

    /// The same field selection without any filters or ordering.
    pub fn fields_only(&self) -> Self {
        Self::new(self.fields.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldName {
    #[serde(rename = "Name")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceField {
    pub field: FieldName,
}

/// A field to return from a fetch.
///
/// Lookup fields may also ask for a field of the referenced record, e.g. the
/// name of a transaction's category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSelection {
    pub field: FieldName,
    #[serde(rename = "referenceField", skip_serializing_if = "Option::is_none")]
    pub reference_field: Option<ReferenceField>,
}

impl FieldSelection {
    pub fn new(name: &str) -> Self {
        Self {
            field: FieldName {
                name: name.to_owned(),
            },
            reference_field: None,
        }
    }

    /// Select the lookup field `name` along with `referenced` from the record it points to.
    pub fn lookup(name: &str, referenced: &str) -> Self {
        Self {
            reference_field: Some(ReferenceField {
                field: FieldName {
                    name: referenced.to_owned(),
                },
            }),
            ..Self::new(name)
        }
    }

    /// The name of the selected field.
    pub fn name(&self) -> &str {
        &self.field.name
    }
}

/// Select each of `names` as a plain field.
pub fn select(names: &[&str]) -> Vec<FieldSelection> {
    names.iter().map(|name| FieldSelection::new(name)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operator {
    EqualTo,
    GreaterThanOrEqualTo,
    LessThanOrEqualTo,
}

/// A condition a record's field must meet to be returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Filter {
    #[serde(rename = "FieldName")]
    pub field_name: String,
    #[serde(rename = "Operator")]
    pub operator: Operator,
    #[serde(rename = "Values")]
    pub values: Vec<Value>,
}

impl Filter {
    fn new(field_name: &str, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            field_name: field_name.to_owned(),
            operator,
            values: vec![value.into()],
        }
    }

    pub fn equal_to(field_name: &str, value: impl Into<Value>) -> Self {
        Self::new(field_name, Operator::EqualTo, value)
    }

    pub fn at_least(field_name: &str, value: impl Into<Value>) -> Self {
        Self::new(field_name, Operator::GreaterThanOrEqualTo, value)
    }

    pub fn at_most(field_name: &str, value: impl Into<Value>) -> Self {
        Self::new(field_name, Operator::LessThanOrEqualTo, value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortType {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderBy {
    #[serde(rename = "fieldName")]
    pub field_name: String,
    #[serde(rename = "sorttype")]
    pub sort_type: SortType,
}

impl OrderBy {
    pub fn ascending(field_name: &str) -> Self {
        Self {
            field_name: field_name.to_owned(),
            sort_type: SortType::Asc,
        }
    }

    pub fn descending(field_name: &str) -> Self {
        Self {
            field_name: field_name.to_owned(),
            sort_type: SortType::Desc,
        }
    }
}
