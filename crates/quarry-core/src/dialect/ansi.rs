//! ANSI rendering rules shared by every dialect.
//!
//! Each [`Dialect`] method defaults to the function of the same name in this
//! module. A dialect overriding a method can still call the function here to
//! reuse the standard behaviour for the cases it does not change.
//!
//! All functions dispatch recursive calls through the `dialect` argument, so
//! overrides apply to nested expressions too.

use crate::error::{CompileError, Result};
use crate::expr::{BinaryOp, CaseExpr, Expr, FunctionArg, FunctionCall};
use crate::name::Name;
use crate::query::{CompoundElement, Query, QueryModifier, QueryOrder, UnionKind};
use crate::schema::{ColumnDefinition, ColumnType};
use crate::statement::{Delete, InsertQuery, InsertValues, Statement, Update};
use crate::value::SqlValue;

use super::{Dialect, SqlBuilder, SqlStatement};

/// Wraps `id` in the dialect quote, doubling embedded quote characters.
pub fn quote_identifier(dialect: &dyn Dialect, id: &str) -> String {
    let quote = dialect.identifier_quote();
    let mut quoted = String::with_capacity(id.len() + 2);
    quoted.push(quote);
    for c in id.chars() {
        if c == quote {
            quoted.push(quote);
        }
        quoted.push(c);
    }
    quoted.push(quote);
    quoted
}

/// Returns whether `id` can be emitted without quotes.
pub fn is_sql_identifier(dialect: &dyn Dialect, id: &str) -> bool {
    let mut chars = id.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !dialect.is_reserved_word(id)
}

/// Renders a single identifier, quoted when necessary.
pub fn id_sql(dialect: &dyn Dialect, id: &str) -> String {
    if dialect.is_sql_identifier(id) {
        String::from(id)
    } else {
        dialect.quote_identifier(id)
    }
}

/// Renders a possibly qualified name, `parent.id`.
pub fn name_sql(dialect: &dyn Dialect, name: &Name) -> String {
    match name {
        Name::Identifier(id) => dialect.id_sql(id),
        Name::Qualified { parent, identifier } => {
            format!("{}.{}", dialect.name_sql(parent), dialect.id_sql(identifier))
        }
    }
}

/// Binds a value through a placeholder; `NULL` is written inline.
pub fn literal_sql(dialect: &dyn Dialect, builder: &mut SqlBuilder, value: &SqlValue) {
    if value.is_null() {
        builder.push_str("NULL");
    } else {
        builder
            .push_str(dialect.parameter_placeholder())
            .push_argument(value.clone());
    }
}

/// Renders one selection-list entry: `expr`, `expr AS alias` or `T.*`.
pub fn declaration_sql(dialect: &dyn Dialect, builder: &mut SqlBuilder, expr: &Expr) -> Result<()> {
    match expr {
        Expr::AllColumns(element) => {
            let name = match element {
                CompoundElement::Table(name) => name,
                CompoundElement::Alias { label, .. } => label,
                CompoundElement::SubQuery(_) => {
                    return Err(CompileError::unsupported(
                        dialect.name(),
                        "all columns of an unlabelled sub-query",
                    ));
                }
            };
            builder.push_str(&dialect.name_sql(name)).push_str(".*");
            Ok(())
        }
        Expr::Alias { expr, name } => {
            dialect.expression_sql(builder, expr)?;
            builder.push_str(" AS ").push_str(&dialect.name_sql(name));
            Ok(())
        }
        _ => dialect.expression_sql(builder, expr),
    }
}

/// Renders any expression node.
pub fn expression_sql(dialect: &dyn Dialect, builder: &mut SqlBuilder, expr: &Expr) -> Result<()> {
    match expr {
        Expr::Literal(value) => {
            dialect.literal_sql(builder, value);
            Ok(())
        }
        Expr::Named(name) | Expr::Alias { name, .. } => {
            builder.push_str(&dialect.name_sql(name));
            Ok(())
        }
        Expr::Binary { left, op, right } => dialect.binary_expression_sql(builder, left, *op, right),
        Expr::Not(operand) => {
            builder.push_str("NOT ");
            grouped_sql(dialect, builder, operand, !is_atomic(operand))
        }
        Expr::IsNull { operand, negated } => {
            grouped_sql(dialect, builder, operand, !is_atomic(operand))?;
            builder.push_str(if *negated { " IS NOT NULL" } else { " IS NULL" });
            Ok(())
        }
        Expr::InList {
            operand,
            values,
            negated,
        } => {
            if values.is_empty() {
                builder.push_str(if *negated { "1 = 1" } else { "1 = 0" });
                return Ok(());
            }
            grouped_sql(dialect, builder, operand, !is_atomic(operand))?;
            builder.push_str(if *negated { " NOT IN (" } else { " IN (" });
            for (index, value) in values.iter().enumerate() {
                if index > 0 {
                    builder.push_str(", ");
                }
                dialect.literal_sql(builder, value);
            }
            builder.push(')');
            Ok(())
        }
        Expr::InQuery {
            operand,
            query,
            negated,
        } => {
            grouped_sql(dialect, builder, operand, !is_atomic(operand))?;
            builder.push_str(if *negated { " NOT IN (" } else { " IN (" });
            dialect.select_sql(builder, query)?;
            builder.push(')');
            Ok(())
        }
        Expr::Function(function) => dialect.function_expression_sql(builder, function),
        Expr::Case(case) => dialect.case_expression_sql(builder, case),
        Expr::SubQuery(query) => {
            builder.push('(');
            dialect.select_sql(builder, query)?;
            builder.push(')');
            Ok(())
        }
        Expr::AllColumns(_) => Err(CompileError::unsupported(
            dialect.name(),
            "all-columns expression outside a selection list",
        )),
        Expr::Extension(extension) => extension.append_to(builder, dialect),
    }
}

fn grouped_sql(dialect: &dyn Dialect, builder: &mut SqlBuilder, expr: &Expr, group: bool) -> Result<()> {
    if group {
        builder.push('(');
        dialect.expression_sql(builder, expr)?;
        builder.push(')');
        Ok(())
    } else {
        dialect.expression_sql(builder, expr)
    }
}

/// Returns whether `expr` renders as a single term that never needs parentheses.
fn is_atomic(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Literal(_)
            | Expr::Named(_)
            | Expr::Alias { .. }
            | Expr::Function(_)
            | Expr::Case(_)
            | Expr::SubQuery(_)
            | Expr::AllColumns(_)
            | Expr::Extension(_)
    )
}

/// Returns whether `operand` needs parentheses as a child of `parent`.
///
/// AND/OR children are grouped exactly when their operator differs from the
/// parent's. Comparisons do not chain, so a comparison under another
/// comparison is always grouped. Other children are grouped when they bind
/// looser than the parent, or equally loose on the right of an operator that
/// does not reassociate.
fn needs_grouping(operand: &Expr, parent: BinaryOp, right_side: bool) -> bool {
    match operand {
        Expr::Binary { op, .. } => {
            if op.is_logical() && parent.is_logical() {
                return *op != parent;
            }
            if op.is_comparison() && parent.is_comparison() {
                return true;
            }
            op.precedence() < parent.precedence()
                || (right_side
                    && op.precedence() == parent.precedence()
                    && !(parent.is_associative() && *op == parent))
        }
        Expr::Not(_) | Expr::IsNull { .. } | Expr::InList { .. } | Expr::InQuery { .. } => {
            !parent.is_logical()
        }
        _ => false,
    }
}

/// Renders `left op right`, rewriting comparisons with `NULL` to `IS [NOT] NULL`.
pub fn binary_expression_sql(
    dialect: &dyn Dialect,
    builder: &mut SqlBuilder,
    left: &Expr,
    op: BinaryOp,
    right: &Expr,
) -> Result<()> {
    if right.is_null_literal() || left.is_null_literal() {
        let operand = if right.is_null_literal() { left } else { right };
        let test = match op {
            BinaryOp::Eq => " IS NULL",
            BinaryOp::NotEq => " IS NOT NULL",
            _ => {
                return Err(CompileError::unsupported(
                    dialect.name(),
                    format!("NULL comparison with operator '{}'", op.as_str()),
                ));
            }
        };
        grouped_sql(dialect, builder, operand, needs_grouping(operand, op, false))?;
        builder.push_str(test);
        return Ok(());
    }

    grouped_sql(dialect, builder, left, needs_grouping(left, op, false))?;
    builder
        .push(' ')
        .push_str(dialect.binary_operator_sql(op)?)
        .push(' ');
    grouped_sql(dialect, builder, right, needs_grouping(right, op, true))
}

/// Returns the spelling of a binary operator.
pub fn binary_operator_sql(_dialect: &dyn Dialect, op: BinaryOp) -> Result<&'static str> {
    Ok(op.as_str())
}

/// Renders `CASE [(target)] WHEN (x) THEN y ... [ELSE z] END`.
pub fn case_expression_sql(dialect: &dyn Dialect, builder: &mut SqlBuilder, case: &CaseExpr) -> Result<()> {
    match &case.target {
        Some(target) => {
            builder.push_str("CASE (");
            dialect.expression_sql(builder, target)?;
            builder.push(')');
        }
        None => {
            builder.push_str("CASE");
        }
    }
    for clause in &case.clauses {
        builder.push_str(" WHEN (");
        dialect.expression_sql(builder, &clause.when)?;
        builder.push_str(") THEN ");
        dialect.expression_sql(builder, &clause.then)?;
    }
    if let Some(otherwise) = &case.otherwise {
        builder.push_str(" ELSE ");
        dialect.expression_sql(builder, otherwise)?;
    }
    builder.push_str(" END");
    Ok(())
}

/// Renders a function call.
pub fn function_expression_sql(
    dialect: &dyn Dialect,
    builder: &mut SqlBuilder,
    function: &FunctionCall,
) -> Result<()> {
    match function {
        FunctionCall::Count(arg) | FunctionCall::CountDistinct(arg) => {
            builder.push_str(if matches!(function, FunctionCall::Count(_)) {
                "COUNT("
            } else {
                "COUNT(DISTINCT "
            });
            match arg {
                Some(arg) => dialect.expression_sql(builder, arg)?,
                None => {
                    builder.push('*');
                }
            }
            builder.push(')');
        }
        FunctionCall::Column { name, arg } => {
            builder.push_str(name).push('(');
            dialect.expression_sql(builder, arg)?;
            builder.push(')');
        }
        FunctionCall::General { name, args } => {
            builder.push_str(name).push('(');
            for (index, arg) in args.iter().enumerate() {
                if index > 0 {
                    builder.push_str(", ");
                }
                match arg {
                    FunctionArg::Expr(expr) => dialect.expression_sql(builder, expr)?,
                    FunctionArg::Value(value) => dialect.literal_sql(builder, value),
                }
            }
            builder.push(')');
        }
    }
    Ok(())
}

/// Renders `SELECT selection` followed by the query clauses.
pub fn select_sql(dialect: &dyn Dialect, builder: &mut SqlBuilder, query: &Query) -> Result<()> {
    builder.push_str("SELECT ");
    if query.selection().is_empty() {
        builder.push('*');
    } else {
        for (index, expr) in query.selection().iter().enumerate() {
            if index > 0 {
                builder.push_str(", ");
            }
            dialect.declaration_sql(builder, expr)?;
        }
    }
    dialect.query_sql(builder, query)
}

/// Renders the clauses after the selection list, in their fixed order.
pub fn query_sql(dialect: &dyn Dialect, builder: &mut SqlBuilder, query: &Query) -> Result<()> {
    dialect.compound_sql(builder, query)?;
    dialect.filter_sql(builder, query)?;
    dialect.grouping_sql(builder, query)?;
    dialect.having_sql(builder, query)?;
    dialect.order_sql(builder, query)?;
    dialect.modifiers_sql(builder, query)?;
    dialect.union_sql(builder, query)
}

/// Renders `FROM element` and the joins.
pub fn compound_sql(dialect: &dyn Dialect, builder: &mut SqlBuilder, query: &Query) -> Result<()> {
    let Some(from) = query.source() else {
        if query.joins().is_empty() {
            return Ok(());
        }
        return Err(CompileError::unsupported(dialect.name(), "JOIN without FROM"));
    };
    builder.push_str(" FROM ");
    dialect.compound_element_sql(builder, from)?;
    for join in query.joins() {
        builder.push(' ').push_str(join.kind.as_str()).push(' ');
        dialect.compound_element_sql(builder, &join.element)?;
        builder.push_str(" ON ");
        dialect.expression_sql(builder, &join.condition)?;
    }
    Ok(())
}

/// Renders a FROM/JOIN element.
pub fn compound_element_sql(
    dialect: &dyn Dialect,
    builder: &mut SqlBuilder,
    element: &CompoundElement,
) -> Result<()> {
    match element {
        CompoundElement::Table(name) => {
            builder.push_str(&dialect.name_sql(name));
        }
        CompoundElement::Alias { element, label } => {
            dialect.compound_element_sql(builder, element)?;
            builder.push_str(" AS ").push_str(&dialect.name_sql(label));
        }
        CompoundElement::SubQuery(query) => {
            builder.push('(');
            dialect.select_sql(builder, query)?;
            builder.push(')');
        }
    }
    Ok(())
}

fn predicates_sql(
    dialect: &dyn Dialect,
    builder: &mut SqlBuilder,
    keyword: &str,
    predicates: &[Expr],
) -> Result<()> {
    if predicates.is_empty() {
        return Ok(());
    }
    builder.push_str(keyword);
    let several = predicates.len() > 1;
    for (index, predicate) in predicates.iter().enumerate() {
        if index > 0 {
            builder.push_str(" AND ");
        }
        let group = several && needs_grouping(predicate, BinaryOp::And, index > 0);
        grouped_sql(dialect, builder, predicate, group)?;
    }
    Ok(())
}

/// Renders `WHERE p1 AND p2 ...`.
pub fn filter_sql(dialect: &dyn Dialect, builder: &mut SqlBuilder, query: &Query) -> Result<()> {
    predicates_sql(dialect, builder, " WHERE ", query.filter())
}

/// Renders `GROUP BY x, y ...`.
pub fn grouping_sql(dialect: &dyn Dialect, builder: &mut SqlBuilder, query: &Query) -> Result<()> {
    if query.grouping().is_empty() {
        return Ok(());
    }
    builder.push_str(" GROUP BY ");
    for (index, expr) in query.grouping().iter().enumerate() {
        if index > 0 {
            builder.push_str(", ");
        }
        dialect.expression_sql(builder, expr)?;
    }
    Ok(())
}

/// Renders `HAVING p1 AND p2 ...`.
pub fn having_sql(dialect: &dyn Dialect, builder: &mut SqlBuilder, query: &Query) -> Result<()> {
    predicates_sql(dialect, builder, " HAVING ", query.having_predicates())
}

/// Renders `ORDER BY ...`.
pub fn order_sql(dialect: &dyn Dialect, builder: &mut SqlBuilder, query: &Query) -> Result<()> {
    if query.order().is_empty() {
        return Ok(());
    }
    builder.push_str(" ORDER BY ");
    for (index, order) in query.order().iter().enumerate() {
        if index > 0 {
            builder.push_str(", ");
        }
        dialect.order_expression_sql(builder, order)?;
    }
    Ok(())
}

/// Renders one ORDER BY entry, `x [DESC] NULLS LAST`.
pub fn order_expression_sql(dialect: &dyn Dialect, builder: &mut SqlBuilder, order: &QueryOrder) -> Result<()> {
    dialect.expression_sql(builder, order.expression())?;
    if order.is_descending() {
        builder.push_str(" DESC");
    }
    builder.push_str(" NULLS LAST");
    Ok(())
}

/// Renders every modifier in order.
pub fn modifiers_sql(dialect: &dyn Dialect, builder: &mut SqlBuilder, query: &Query) -> Result<()> {
    for modifier in query.modifiers() {
        dialect.modifier_sql(builder, modifier)?;
    }
    Ok(())
}

/// Renders `LIMIT ?`, plus `OFFSET ?` for a non-zero offset.
pub fn modifier_sql(dialect: &dyn Dialect, builder: &mut SqlBuilder, modifier: &QueryModifier) -> Result<()> {
    match modifier {
        QueryModifier::Limit { limit, offset } => {
            builder.push_str(" LIMIT ");
            dialect.literal_sql(builder, &count_value(dialect, *limit)?);
            if *offset != 0 {
                builder.push_str(" OFFSET ");
                dialect.literal_sql(builder, &count_value(dialect, *offset)?);
            }
            Ok(())
        }
        QueryModifier::Extension(extension) => extension.append_to(builder, dialect),
    }
}

/// Converts a row count to a bound integer. Counts beyond `i64::MAX` are rejected.
fn count_value(dialect: &dyn Dialect, count: u64) -> Result<SqlValue> {
    i64::try_from(count).map(SqlValue::Int).map_err(|_| {
        CompileError::unsupported(dialect.name(), format!("row count {count} beyond the signed 64-bit range"))
    })
}

/// Renders each `UNION ALL|DISTINCT SELECT ...` clause.
pub fn union_sql(dialect: &dyn Dialect, builder: &mut SqlBuilder, query: &Query) -> Result<()> {
    for union in query.unions() {
        builder
            .push(' ')
            .push_str(dialect.union_operator_sql(union.kind))
            .push(' ');
        dialect.select_sql(builder, &union.query)?;
    }
    Ok(())
}

/// Returns the spelling of a set operation.
pub fn union_operator_sql(_dialect: &dyn Dialect, kind: UnionKind) -> &'static str {
    match kind {
        UnionKind::Distinct => "UNION DISTINCT",
        UnionKind::All => "UNION ALL",
    }
}

/// Compiles any statement and logs the result.
pub fn statement_sql(dialect: &dyn Dialect, statement: &Statement) -> Result<SqlStatement> {
    let mut builder = SqlBuilder::new();
    match statement {
        Statement::Query(query) => dialect.query_statement_sql(&mut builder, query)?,
        Statement::InsertValues(insert) => dialect.insert_values_sql(&mut builder, insert)?,
        Statement::InsertQuery(insert) => dialect.insert_query_sql(&mut builder, insert)?,
        Statement::Update(update) => dialect.update_sql(&mut builder, update)?,
        Statement::Delete(delete) => dialect.delete_sql(&mut builder, delete)?,
    }
    let compiled = builder.build();
    tracing::debug!(
        dialect = dialect.name(),
        sql = compiled.sql(),
        arguments = compiled.arguments().len(),
        "compiled statement"
    );
    Ok(compiled)
}

/// Renders a query statement.
pub fn query_statement_sql(dialect: &dyn Dialect, builder: &mut SqlBuilder, query: &Query) -> Result<()> {
    dialect.select_sql(builder, query)
}

fn assigned_column_sql(dialect: &dyn Dialect, table: &Name, column: &Name) -> Result<String> {
    if column.parent() != Some(table) {
        return Err(CompileError::unsupported(
            dialect.name(),
            format!("assignment to column '{column}' outside table '{table}'"),
        ));
    }
    Ok(dialect.id_sql(column.id()))
}

/// Renders `INSERT INTO t (a, b) VALUES (?, ?)`.
///
/// An insert without values renders `INSERT INTO t DEFAULT VALUES`.
pub fn insert_values_sql(dialect: &dyn Dialect, builder: &mut SqlBuilder, insert: &InsertValues) -> Result<()> {
    builder
        .push_str("INSERT INTO ")
        .push_str(&dialect.name_sql(insert.table()));
    if insert.values().is_empty() {
        builder.push_str(" DEFAULT VALUES");
        return Ok(());
    }
    builder.push_str(" (");
    for (index, (column, _)) in insert.values().iter().enumerate() {
        if index > 0 {
            builder.push_str(", ");
        }
        builder.push_str(&assigned_column_sql(dialect, insert.table(), column)?);
    }
    builder.push_str(") VALUES (");
    for (index, (_, value)) in insert.values().iter().enumerate() {
        if index > 0 {
            builder.push_str(", ");
        }
        dialect.literal_sql(builder, value);
    }
    builder.push(')');
    Ok(())
}

/// Renders `INSERT INTO t SELECT ...`.
pub fn insert_query_sql(dialect: &dyn Dialect, builder: &mut SqlBuilder, insert: &InsertQuery) -> Result<()> {
    builder
        .push_str("INSERT INTO ")
        .push_str(&dialect.name_sql(insert.table()))
        .push(' ');
    dialect.select_sql(builder, insert.query())
}

fn check_row_limit(dialect: &dyn Dialect, query: &Query, statement: &str) -> Result<()> {
    for modifier in query.modifiers() {
        if let QueryModifier::Limit { offset, .. } = modifier {
            if !dialect.supports_dml_limit() {
                return Err(CompileError::unsupported(
                    dialect.name(),
                    format!("LIMIT in {statement}"),
                ));
            }
            if *offset != 0 && !dialect.supports_dml_offset() {
                return Err(CompileError::unsupported(
                    dialect.name(),
                    format!("OFFSET in {statement}"),
                ));
            }
        }
    }
    Ok(())
}

/// Renders `UPDATE t SET a = x, ...` followed by the row-selecting clauses.
pub fn update_sql(dialect: &dyn Dialect, builder: &mut SqlBuilder, update: &Update) -> Result<()> {
    if update.values().is_empty() {
        return Err(CompileError::unsupported(dialect.name(), "UPDATE without assignments"));
    }
    check_row_limit(dialect, update.query(), "UPDATE")?;
    builder
        .push_str("UPDATE ")
        .push_str(&dialect.name_sql(update.table()))
        .push_str(" SET ");
    for (index, (column, value)) in update.values().iter().enumerate() {
        if index > 0 {
            builder.push_str(", ");
        }
        builder
            .push_str(&assigned_column_sql(dialect, update.table(), column)?)
            .push_str(" = ");
        dialect.expression_sql(builder, value)?;
    }
    dialect.query_sql(builder, update.query())
}

/// Renders `DELETE FROM t` followed by the row-selecting clauses.
pub fn delete_sql(dialect: &dyn Dialect, builder: &mut SqlBuilder, delete: &Delete) -> Result<()> {
    check_row_limit(dialect, delete.query(), "DELETE")?;
    builder
        .push_str("DELETE FROM ")
        .push_str(&dialect.name_sql(delete.table()));
    dialect.query_sql(builder, delete.query())
}

/// Maps a column type to its SQL type name.
pub fn column_type_sql(dialect: &dyn Dialect, column_type: &ColumnType) -> Result<String> {
    Ok(match column_type {
        ColumnType::Int | ColumnType::Enumeration => String::from("INT"),
        ColumnType::Long => String::from("BIGINT"),
        ColumnType::Decimal { precision, scale } => format!("DECIMAL({precision}, {scale})"),
        ColumnType::Varchar(length) => format!("VARCHAR({length})"),
        ColumnType::Char => String::from("CHAR"),
        ColumnType::Text => String::from("TEXT"),
        ColumnType::Bool => String::from("BOOLEAN"),
        ColumnType::Date => String::from("DATE"),
        ColumnType::DateTime => String::from("TIMESTAMP"),
        ColumnType::Time => String::from("TIME"),
        ColumnType::Uuid => String::from("UUID"),
        ColumnType::Binary(length) => format!("VARBINARY({length})"),
        ColumnType::Blob => String::from("BLOB"),
        ColumnType::Reference(inner) => return dialect.column_type_sql(inner),
    })
}

/// Maps the type of a generated id column to its declaration.
pub fn id_column_type_sql(dialect: &dyn Dialect, column_type: &ColumnType) -> Result<String> {
    match column_type {
        ColumnType::Int => Ok(String::from("INT NOT NULL GENERATED BY DEFAULT AS IDENTITY")),
        ColumnType::Long => Ok(String::from("BIGINT NOT NULL GENERATED BY DEFAULT AS IDENTITY")),
        other => Err(unsupported_id_column(dialect, other)),
    }
}

/// Creates the error for a type that cannot back a generated id column.
pub fn unsupported_id_column(dialect: &dyn Dialect, column_type: &ColumnType) -> CompileError {
    CompileError::UnsupportedIdColumnType {
        dialect: dialect.name(),
        column_type: column_type.to_string(),
    }
}

/// Renders the type declaration of a column, `TYPE [NOT NULL]`.
pub fn column_declaration_sql(dialect: &dyn Dialect, column: &ColumnDefinition) -> Result<String> {
    if column.is_auto_increment() {
        return dialect.id_column_type_sql(column.column_type());
    }
    let mut declaration = dialect.column_type_sql(column.column_type())?;
    if !column.is_nullable() {
        declaration.push_str(" NOT NULL");
    }
    Ok(declaration)
}
