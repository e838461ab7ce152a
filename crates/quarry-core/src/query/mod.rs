//! Query model.
//!
//! A [`Query`] collects the clauses of a SELECT. Builder calls append, except
//! [`Query::limit`] which replaces. Clause order in the compiled SQL is fixed
//! by the dialect, not by call order.
//!
//! ```rust
//! use quarry_core::expr::ExpressionOps;
//! use quarry_core::schema::Table;
//!
//! let mut cities = Table::new("Cities");
//! let id = cities.integer("id").add().unwrap();
//! let name = cities.varchar("name", 50).add().unwrap();
//!
//! let query = cities
//!     .select((&id, &name))
//!     .where_clause(id.gt(3))
//!     .order_by_desc(&name)
//!     .limit(10);
//! assert_eq!(query.selection().len(), 2);
//! ```

mod selection;

use std::sync::Arc;

use crate::dialect::DialectExtension;
use crate::expr::{Expr, Expression, IntoExpression};
use crate::name::Name;
use crate::schema::{Column, Table};

pub use selection::{IntoSelection, SelectionItem};

/// Anything that can appear in FROM or JOIN.
#[derive(Debug, Clone)]
pub enum CompoundElement {
    /// A table, by name.
    Table(Name),
    /// An element with a label, `element AS label`.
    Alias {
        /// The aliased element.
        element: Box<CompoundElement>,
        /// The label columns are qualified with.
        label: Name,
    },
    /// A query used as a table, `(SELECT ...)`.
    SubQuery(Box<Query>),
}

impl From<&Table> for CompoundElement {
    fn from(table: &Table) -> Self {
        Self::Table(table.name().clone())
    }
}

impl From<Query> for CompoundElement {
    fn from(query: Query) -> Self {
        Self::SubQuery(Box::new(query))
    }
}

impl From<&CompoundAlias> for CompoundElement {
    fn from(alias: &CompoundAlias) -> Self {
        Self::Alias {
            element: Box::new(alias.element.clone()),
            label: alias.label.clone(),
        }
    }
}

impl From<CompoundAlias> for CompoundElement {
    fn from(alias: CompoundAlias) -> Self {
        Self::Alias {
            element: Box::new(alias.element),
            label: alias.label,
        }
    }
}

/// A labelled compound element whose columns are re-qualified by the label.
#[derive(Debug, Clone)]
pub struct CompoundAlias {
    element: CompoundElement,
    label: Name,
}

impl CompoundAlias {
    /// Labels `element`.
    #[must_use]
    pub const fn new(element: CompoundElement, label: Name) -> Self {
        Self { element, label }
    }

    /// Returns the label.
    #[must_use]
    pub const fn label(&self) -> &Name {
        &self.label
    }

    /// References `column` through the label, `label.column`.
    #[must_use]
    pub fn column<T>(&self, column: &Column<T>) -> Expression<T> {
        Expression::from_expr(Expr::Named(Name::qualified(
            self.label.clone(),
            column.identifier(),
        )))
    }

    /// References an aliased expression selected by the labelled sub-query.
    #[must_use]
    pub fn field<T>(&self, alias: impl Into<String>) -> Expression<T> {
        Expression::from_expr(Expr::Named(Name::qualified(self.label.clone(), alias)))
    }
}

/// Join flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    /// INNER JOIN
    Inner,
    /// LEFT OUTER JOIN
    LeftOuter,
    /// RIGHT OUTER JOIN
    RightOuter,
}

impl JoinKind {
    /// Returns the SQL keyword sequence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::LeftOuter => "LEFT OUTER JOIN",
            Self::RightOuter => "RIGHT OUTER JOIN",
        }
    }
}

/// A join in the compound list.
#[derive(Debug, Clone)]
pub struct QueryJoin {
    /// Join flavour.
    pub kind: JoinKind,
    /// The joined element.
    pub element: CompoundElement,
    /// The ON condition.
    pub condition: Expr,
}

/// An ORDER BY entry.
#[derive(Debug, Clone)]
pub enum QueryOrder {
    /// Ascending order.
    Ascending(Expr),
    /// Descending order.
    Descending(Expr),
}

impl QueryOrder {
    /// Returns the ordered expression.
    #[must_use]
    pub const fn expression(&self) -> &Expr {
        match self {
            Self::Ascending(expr) | Self::Descending(expr) => expr,
        }
    }

    /// Returns whether the order is descending.
    #[must_use]
    pub const fn is_descending(&self) -> bool {
        matches!(self, Self::Descending(_))
    }
}

/// A trailing query modifier.
#[derive(Debug, Clone)]
pub enum QueryModifier {
    /// `LIMIT ?`, plus `OFFSET ?` when `offset` is not zero.
    Limit {
        /// Maximum row count.
        limit: u64,
        /// Rows skipped.
        offset: u64,
    },
    /// A dialect-specific modifier that renders itself.
    Extension(Arc<dyn DialectExtension>),
}

/// Set-operation flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnionKind {
    /// UNION DISTINCT
    Distinct,
    /// UNION ALL
    All,
}

/// A UNION clause.
#[derive(Debug, Clone)]
pub struct QueryUnion {
    /// Set-operation flavour.
    pub kind: UnionKind,
    /// The nested query.
    pub query: Query,
}

/// A SELECT query.
#[derive(Debug, Clone, Default)]
pub struct Query {
    selection: Vec<Expr>,
    from: Option<CompoundElement>,
    joins: Vec<QueryJoin>,
    filter: Vec<Expr>,
    grouping: Vec<Expr>,
    having: Vec<Expr>,
    order: Vec<QueryOrder>,
    modifiers: Vec<QueryModifier>,
    unions: Vec<QueryUnion>,
}

impl Query {
    /// Creates an empty query; without a selection it renders `SELECT *`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the FROM element.
    #[must_use]
    pub fn from(mut self, element: impl Into<CompoundElement>) -> Self {
        self.from = Some(element.into());
        self
    }

    /// Appends to the selection list.
    #[must_use]
    pub fn select(mut self, selection: impl IntoSelection) -> Self {
        self.selection.extend(selection.into_selection());
        self
    }

    /// Appends a filter predicate; predicates are AND-joined.
    #[must_use]
    pub fn where_clause(mut self, predicate: impl IntoExpression<bool>) -> Self {
        self.filter.push(predicate.into_expression().into_expr());
        self
    }

    /// Appends an `INNER JOIN element ON condition`.
    #[must_use]
    pub fn inner_join(
        self,
        element: impl Into<CompoundElement>,
        condition: impl IntoExpression<bool>,
    ) -> Self {
        self.join(JoinKind::Inner, element, condition)
    }

    /// Appends a `LEFT OUTER JOIN element ON condition`.
    #[must_use]
    pub fn left_join(
        self,
        element: impl Into<CompoundElement>,
        condition: impl IntoExpression<bool>,
    ) -> Self {
        self.join(JoinKind::LeftOuter, element, condition)
    }

    /// Appends a `RIGHT OUTER JOIN element ON condition`.
    #[must_use]
    pub fn right_join(
        self,
        element: impl Into<CompoundElement>,
        condition: impl IntoExpression<bool>,
    ) -> Self {
        self.join(JoinKind::RightOuter, element, condition)
    }

    /// Appends a join of the given kind.
    #[must_use]
    pub fn join(
        mut self,
        kind: JoinKind,
        element: impl Into<CompoundElement>,
        condition: impl IntoExpression<bool>,
    ) -> Self {
        self.joins.push(QueryJoin {
            kind,
            element: element.into(),
            condition: condition.into_expression().into_expr(),
        });
        self
    }

    /// Appends grouping expressions.
    #[must_use]
    pub fn group_by(mut self, grouping: impl IntoSelection) -> Self {
        self.grouping.extend(grouping.into_selection());
        self
    }

    /// Appends a HAVING predicate; predicates are AND-joined.
    #[must_use]
    pub fn having(mut self, predicate: impl IntoExpression<bool>) -> Self {
        self.having.push(predicate.into_expression().into_expr());
        self
    }

    /// Appends an ascending ORDER BY entry.
    #[must_use]
    pub fn order_by(mut self, item: impl SelectionItem) -> Self {
        self.order
            .push(QueryOrder::Ascending(item.into_selection_expr()));
        self
    }

    /// Appends a descending ORDER BY entry.
    #[must_use]
    pub fn order_by_desc(mut self, item: impl SelectionItem) -> Self {
        self.order
            .push(QueryOrder::Descending(item.into_selection_expr()));
        self
    }

    /// Sets the row limit, replacing any previous limit.
    #[must_use]
    pub fn limit(self, limit: u64) -> Self {
        self.limit_offset(limit, 0)
    }

    /// Sets the row limit and offset, replacing any previous limit.
    #[must_use]
    pub fn limit_offset(mut self, limit: u64, offset: u64) -> Self {
        self.modifiers
            .retain(|m| !matches!(m, QueryModifier::Limit { .. }));
        self.modifiers.push(QueryModifier::Limit { limit, offset });
        self
    }

    /// Appends a dialect-specific modifier.
    #[must_use]
    pub fn modifier(mut self, modifier: impl DialectExtension + 'static) -> Self {
        self.modifiers
            .push(QueryModifier::Extension(Arc::new(modifier)));
        self
    }

    /// Appends `UNION DISTINCT other`.
    #[must_use]
    pub fn union(mut self, other: Self) -> Self {
        self.unions.push(QueryUnion {
            kind: UnionKind::Distinct,
            query: other,
        });
        self
    }

    /// Appends `UNION ALL other`.
    #[must_use]
    pub fn union_all(mut self, other: Self) -> Self {
        self.unions.push(QueryUnion {
            kind: UnionKind::All,
            query: other,
        });
        self
    }

    /// Labels the query for use as a table, `(SELECT ...) AS label`.
    #[must_use]
    pub fn alias(self, label: impl Into<String>) -> CompoundAlias {
        CompoundAlias::new(self.into(), Name::identifier(label))
    }

    /// Returns the selection list; empty means all columns.
    #[must_use]
    pub fn selection(&self) -> &[Expr] {
        &self.selection
    }

    /// Returns the FROM element.
    #[must_use]
    pub const fn source(&self) -> Option<&CompoundElement> {
        self.from.as_ref()
    }

    /// Returns the joins in declaration order.
    #[must_use]
    pub fn joins(&self) -> &[QueryJoin] {
        &self.joins
    }

    /// Returns the filter predicates.
    #[must_use]
    pub fn filter(&self) -> &[Expr] {
        &self.filter
    }

    /// Returns the grouping expressions.
    #[must_use]
    pub fn grouping(&self) -> &[Expr] {
        &self.grouping
    }

    /// Returns the HAVING predicates.
    #[must_use]
    pub fn having_predicates(&self) -> &[Expr] {
        &self.having
    }

    /// Returns the ORDER BY entries.
    #[must_use]
    pub fn order(&self) -> &[QueryOrder] {
        &self.order
    }

    /// Returns the modifiers.
    #[must_use]
    pub fn modifiers(&self) -> &[QueryModifier] {
        &self.modifiers
    }

    /// Returns the UNION clauses.
    #[must_use]
    pub fn unions(&self) -> &[QueryUnion] {
        &self.unions
    }
}
