//! Scope predicates for bulk queries.
//!
//! The level branching of [`crate::scope`] re-targeted at columns: instead of
//! answering for one entity, it produces a [`Predicate`] that a listing query
//! ANDs with its own filter. Each entity family describes where its scope
//! attributes live by implementing [`ScopedFilter`].
//!
//! ```ignore
//! struct OrderFilter { status: Option<String> }
//!
//! impl PathResolver for OrderFilter {}
//!
//! impl ScopedFilter for OrderFilter {
//!     type Column = OrderColumn;
//!     fn user_id(&self) -> OrderColumn { OrderColumn::CreatedBy }
//!     fn directorate_id(&self) -> OrderColumn { OrderColumn::DirectorateId }
//!     fn institution_id(&self) -> OrderColumn { OrderColumn::InstitutionId }
//!     fn structure_path(&self) -> OrderColumn { OrderColumn::StructurePath }
//!     fn use_only_path(&self) -> bool { true }
//! }
//!
//! let predicate = filter_with_permission(&ctx, &filter, Permission::OrderRead)?;
//! let sql = predicate.to_sql(1);
//! ```

use orgscope_core::{DirectorateId, InstitutionId, UserId};

use crate::context::SecurityContext;
use crate::permissions::{Permission, PermissionLevel};
use crate::scope::{AuthzError, PathResolver};

/// A value compared against a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Integer(i64),
    Text(String),
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<UserId> for FilterValue {
    fn from(value: UserId) -> Self {
        Self::Integer(value.get())
    }
}

impl From<DirectorateId> for FilterValue {
    fn from(value: DirectorateId) -> Self {
        Self::Integer(value.get())
    }
}

impl From<InstitutionId> for FilterValue {
    fn from(value: InstitutionId) -> Self {
        Self::Integer(i64::from(value.get()))
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Composable boolean condition over columns of type `C`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate<C> {
    /// No restriction (identity of AND).
    Always,
    Equals { column: C, value: FilterValue },
    /// Text column begins with `prefix`.
    StartsWith { column: C, prefix: String },
    And(Vec<Predicate<C>>),
}

impl<C> Predicate<C> {
    pub fn equals(column: C, value: impl Into<FilterValue>) -> Self {
        Self::Equals {
            column,
            value: value.into(),
        }
    }

    pub fn starts_with(column: C, prefix: impl Into<String>) -> Self {
        Self::StartsWith {
            column,
            prefix: prefix.into(),
        }
    }

    /// Logical AND; `Always` operands vanish and nested ANDs are flattened.
    pub fn and(self, other: Predicate<C>) -> Predicate<C> {
        let mut parts = Vec::new();
        for operand in [self, other] {
            match operand {
                Predicate::Always => {}
                Predicate::And(inner) => parts.extend(inner),
                leaf => parts.push(leaf),
            }
        }
        match parts.len() {
            0 => Predicate::Always,
            1 => parts.pop().unwrap_or(Predicate::Always),
            _ => Predicate::And(parts),
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        match self {
            Predicate::Always => true,
            Predicate::And(parts) => parts.iter().all(Predicate::is_unrestricted),
            Predicate::Equals { .. } | Predicate::StartsWith { .. } => false,
        }
    }

    /// Evaluate against an in-memory row.
    pub fn matches<R: FieldSource<C>>(&self, row: &R) -> bool {
        match self {
            Predicate::Always => true,
            Predicate::Equals { column, value } => row.field(column).as_ref() == Some(value),
            Predicate::StartsWith { column, prefix } => {
                matches!(row.field(column), Some(FilterValue::Text(text)) if text.starts_with(prefix.as_str()))
            }
            Predicate::And(parts) => parts.iter().all(|p| p.matches(row)),
        }
    }
}

/// Column naming for SQL rendering.
pub trait Column {
    fn name(&self) -> &str;
}

/// Read access to a row's columns for [`Predicate::matches`].
pub trait FieldSource<C> {
    fn field(&self, column: &C) -> Option<FilterValue>;
}

/// A rendered `WHERE` fragment with positional (`$n`) parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlFragment {
    pub clause: String,
    pub params: Vec<FilterValue>,
}

impl<C: Column> Predicate<C> {
    /// Render with placeholders numbered from `first_param`.
    pub fn to_sql(&self, first_param: usize) -> SqlFragment {
        let mut params = Vec::new();
        let clause = self.render(first_param, &mut params);
        SqlFragment { clause, params }
    }

    fn render(&self, first_param: usize, params: &mut Vec<FilterValue>) -> String {
        match self {
            Predicate::Always => "TRUE".to_string(),
            Predicate::Equals { column, value } => {
                params.push(value.clone());
                format!("{} = ${}", column.name(), first_param + params.len() - 1)
            }
            Predicate::StartsWith { column, prefix } => {
                params.push(FilterValue::Text(format!("{}%", escape_like(prefix))));
                format!("{} LIKE ${}", column.name(), first_param + params.len() - 1)
            }
            Predicate::And(parts) if parts.is_empty() => "TRUE".to_string(),
            Predicate::And(parts) => parts
                .iter()
                .map(|p| format!("({})", p.render(first_param, params)))
                .collect::<Vec<_>>()
                .join(" AND "),
        }
    }
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Where an entity family keeps its scope attributes.
pub trait ScopedFilter: PathResolver {
    type Column: Clone;

    fn user_id(&self) -> Self::Column;
    fn directorate_id(&self) -> Self::Column;
    fn institution_id(&self) -> Self::Column;
    fn structure_path(&self) -> Self::Column;

    /// Scope institution/directorate levels by path instead of by id.
    fn use_only_path(&self) -> bool;

    /// The family's own (non-permission) filter, if any.
    fn base_filter(&self) -> Option<Predicate<Self::Column>> {
        None
    }
}

/// Predicate restricting a listing to what the principal may see under
/// `permission`. Unauthenticated callers and missing grants are errors, never
/// an empty filter.
pub fn scope_predicate<F>(
    ctx: &SecurityContext,
    filter: &F,
    permission: Permission,
) -> Result<Predicate<F::Column>, AuthzError>
where
    F: ScopedFilter + ?Sized,
{
    let principal = ctx.principal().ok_or(AuthzError::Unauthenticated)?;
    let level = principal
        .permission_level(permission)
        .ok_or(AuthzError::NotGranted { permission })?;

    let predicate = match level {
        PermissionLevel::System => Predicate::Always,
        PermissionLevel::Institution => {
            let institution_id = principal.institution_id();
            if filter.use_only_path() {
                Predicate::starts_with(filter.structure_path(), filter.institution_path(institution_id))
            } else {
                Predicate::equals(filter.institution_id(), institution_id)
            }
        }
        PermissionLevel::Directorate => {
            let directorate_id = principal
                .directorate_id()
                .ok_or(AuthzError::OutOfScope { permission, level })?;
            if filter.use_only_path() {
                let path = filter.directorate_path(principal.institution_id(), directorate_id);
                Predicate::starts_with(filter.structure_path(), path)
            } else {
                Predicate::equals(filter.directorate_id(), directorate_id)
            }
        }
        PermissionLevel::Structure => {
            Predicate::starts_with(filter.structure_path(), principal.structure_path().as_str())
        }
        PermissionLevel::Personal => Predicate::equals(filter.user_id(), principal.id),
    };

    tracing::debug!(%permission, %level, "scope predicate built");
    Ok(predicate)
}

/// The family's base filter AND the permission scope.
pub fn filter_with_permission<F>(
    ctx: &SecurityContext,
    filter: &F,
    permission: Permission,
) -> Result<Predicate<F::Column>, AuthzError>
where
    F: ScopedFilter + ?Sized,
{
    let scope = scope_predicate(ctx, filter, permission)?;
    Ok(match filter.base_filter() {
        Some(base) => base.and(scope),
        None => scope,
    })
}
