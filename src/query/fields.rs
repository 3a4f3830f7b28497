//! Per-resource tables of filterable fields
//!
//! Keyword filters are validated by table lookup: the field must be listed
//! for the resource and the operator must be one the field allows.

use super::filter::{to_camel_case, to_snake_case, Operator};
use crate::error::{Error, Result};

/// One filterable field and the operators it supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// snake_case name
    pub name: &'static str,
    pub operators: &'static [Operator],
}

impl FieldSpec {
    pub const fn new(name: &'static str, operators: &'static [Operator]) -> Self {
        Self { name, operators }
    }

    /// Server-side camelCase name
    pub fn wire_name(&self) -> String {
        to_camel_case(self.name)
    }

    pub fn supports(&self, operator: Operator) -> bool {
        self.operators.contains(&operator)
    }
}

/// A resource whose list endpoint accepts filters and sorts
pub trait Queryable {
    /// Resource name used in error messages
    const RESOURCE: &'static str;

    /// Filterable fields
    fn fields() -> &'static [FieldSpec];
}

/// Find a field by snake_case or camelCase name
pub fn lookup<'t>(table: &'t [FieldSpec], name: &str) -> Option<&'t FieldSpec> {
    let snake = to_snake_case(name);
    table.iter().find(|spec| spec.name == snake)
}

/// Resolve `field` + `operator` against a table, returning the spec
pub fn resolve<'t>(
    resource: &str,
    table: &'t [FieldSpec],
    field: &str,
    operator: Operator,
) -> Result<&'t FieldSpec> {
    let spec = lookup(table, field).ok_or_else(|| Error::InvalidFilterField {
        resource: resource.to_string(),
        field: field.to_string(),
    })?;
    if !spec.supports(operator) {
        return Err(Error::InvalidOperator {
            field: field.to_string(),
            operator: operator.as_str().to_string(),
        });
    }
    Ok(spec)
}

const EQ_IN: &[Operator] = &[Operator::Equals, Operator::In];
const COMPARABLE: &[Operator] = &[
    Operator::Equals,
    Operator::GreaterThan,
    Operator::GreaterThanOrEqual,
    Operator::LessThan,
    Operator::LessThanOrEqual,
];

/// Filterable user fields
///
/// Users carry no tags, so `has` is absent here.
pub const USER_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("domain_name", EQ_IN),
    FieldSpec::new("friendly_name", EQ_IN),
    FieldSpec::new("is_local", &[Operator::Equals]),
    FieldSpec::new("last_login", COMPARABLE),
    FieldSpec::new("luid", EQ_IN),
    FieldSpec::new(
        "name",
        &[Operator::Equals, Operator::In, Operator::CaseInsensitiveEquals],
    ),
    FieldSpec::new("site_role", EQ_IN),
];

/// Filterable group set fields
pub const GROUP_SET_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("name", EQ_IN),
    FieldSpec::new("group_count", COMPARABLE),
];
