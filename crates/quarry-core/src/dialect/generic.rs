//! Generic SQL dialect.

use super::Dialect;

/// A generic SQL dialect using ANSI SQL standards.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompileError;
    use crate::expr::{count_all, literal, not, null, ExpressionOps};
    use crate::name::Name;
    use crate::schema::{Column, ColumnType, Table};
    use crate::statement::{delete_from, insert_into, update};
    use crate::value::SqlValue;

    fn cities() -> (Table, Column<i32>, Column<String>) {
        let mut table = Table::new("Cities");
        let id = table.integer("id").auto_increment().primary_key().add().unwrap();
        let name = table.varchar("name", 50).add().unwrap();
        (table, id, name)
    }

    #[test]
    fn test_generic_dialect() {
        let dialect = GenericDialect::new();
        assert_eq!(dialect.name(), "generic");
        assert_eq!(dialect.identifier_quote(), '"');
        assert_eq!(dialect.parameter_placeholder(), "?");
        assert!(dialect.supports_dml_limit());
    }

    #[test]
    fn test_identifier_quoting() {
        let dialect = GenericDialect::new();
        assert_eq!(dialect.id_sql("name"), "name");
        assert_eq!(dialect.id_sql("city_id2"), "city_id2");
        assert_eq!(dialect.id_sql("date"), "\"date\"");
        assert_eq!(dialect.id_sql("first name"), "\"first name\"");
        assert_eq!(dialect.id_sql("2nd"), "\"2nd\"");
        assert_eq!(dialect.id_sql("a\"b"), "\"a\"\"b\"");
        assert_eq!(
            dialect.name_sql(&Name::qualified("Order".into(), "id")),
            "\"Order\".id"
        );
    }

    #[test]
    fn test_select_star() {
        let (cities, _, _) = cities();
        let stmt = GenericDialect.compile(cities.query()).unwrap();
        assert_eq!(stmt.sql(), "SELECT * FROM Cities");
        assert!(stmt.arguments().is_empty());
    }

    #[test]
    fn test_select_where_order() {
        let (cities, id, name) = cities();
        let query = cities
            .select(&name)
            .where_clause(id.eq(literal(5)))
            .order_by_desc(&name);
        let stmt = GenericDialect.compile(query).unwrap();
        assert_eq!(
            stmt.sql(),
            "SELECT Cities.name FROM Cities WHERE Cities.id = ? ORDER BY Cities.name DESC NULLS LAST"
        );
        assert_eq!(stmt.arguments(), &[SqlValue::Int(5)]);
    }

    #[test]
    fn test_null_comparisons() {
        let (cities, id, name) = cities();
        let dialect = GenericDialect::new();

        let stmt = dialect
            .compile(cities.query().where_clause(name.eq(null())))
            .unwrap();
        assert_eq!(stmt.sql(), "SELECT * FROM Cities WHERE Cities.name IS NULL");

        let stmt = dialect
            .compile(cities.query().where_clause(literal::<String>(null()).not_eq(&name)))
            .unwrap();
        assert_eq!(stmt.sql(), "SELECT * FROM Cities WHERE Cities.name IS NOT NULL");

        let err = dialect
            .compile(cities.query().where_clause(id.lt(null())))
            .unwrap_err();
        assert!(matches!(err, CompileError::Unsupported { dialect: "generic", .. }));
    }

    #[test]
    fn test_and_or_grouping() {
        let (cities, id, name) = cities();
        let dialect = GenericDialect::new();

        let and_in_or = id.eq(1).and(name.eq("a")).or(id.eq(2));
        let stmt = dialect.compile(cities.query().where_clause(and_in_or)).unwrap();
        assert_eq!(
            stmt.sql(),
            "SELECT * FROM Cities WHERE (Cities.id = ? AND Cities.name = ?) OR Cities.id = ?"
        );

        let or_in_and = id.eq(1).or(name.eq("a")).and(id.eq(2));
        let stmt = dialect.compile(cities.query().where_clause(or_in_and)).unwrap();
        assert_eq!(
            stmt.sql(),
            "SELECT * FROM Cities WHERE (Cities.id = ? OR Cities.name = ?) AND Cities.id = ?"
        );

        let and_in_and = id.eq(1).and(name.eq("a")).and(id.eq(2));
        let stmt = dialect.compile(cities.query().where_clause(and_in_and)).unwrap();
        assert_eq!(
            stmt.sql(),
            "SELECT * FROM Cities WHERE Cities.id = ? AND Cities.name = ? AND Cities.id = ?"
        );
    }

    #[test]
    fn test_where_predicates_group_or() {
        let (cities, id, name) = cities();
        let query = cities
            .query()
            .where_clause(id.eq(1).or(id.eq(2)))
            .where_clause(name.like("P%"));
        let stmt = GenericDialect.compile(query).unwrap();
        assert_eq!(
            stmt.sql(),
            "SELECT * FROM Cities WHERE (Cities.id = ? OR Cities.id = ?) AND Cities.name LIKE ?"
        );
    }

    #[test]
    fn test_arithmetic_grouping() {
        let (cities, id, _) = cities();
        let expr = id.minus(id.minus(1)).times(2);
        let stmt = GenericDialect.compile(cities.select(expr)).unwrap();
        assert_eq!(stmt.sql(), "SELECT (Cities.id - (Cities.id - ?)) * ? FROM Cities");
        assert_eq!(stmt.arguments(), &[SqlValue::Int(1), SqlValue::Int(2)]);
    }

    #[test]
    fn test_not_and_in() {
        let (cities, id, _) = cities();
        let dialect = GenericDialect::new();

        let stmt = dialect
            .compile(cities.query().where_clause(not(id.gt(3))))
            .unwrap();
        assert_eq!(stmt.sql(), "SELECT * FROM Cities WHERE NOT (Cities.id > ?)");

        let stmt = dialect
            .compile(cities.query().where_clause(id.in_list([1, 2])))
            .unwrap();
        assert_eq!(stmt.sql(), "SELECT * FROM Cities WHERE Cities.id IN (?, ?)");

        let stmt = dialect
            .compile(cities.query().where_clause(id.in_list(Vec::<i32>::new())))
            .unwrap();
        assert_eq!(stmt.sql(), "SELECT * FROM Cities WHERE 1 = 0");
    }

    #[test]
    fn test_count_all() {
        let (cities, _, _) = cities();
        let stmt = GenericDialect.compile(cities.select(count_all())).unwrap();
        assert_eq!(stmt.sql(), "SELECT COUNT(*) FROM Cities");
    }

    #[test]
    fn test_dml() {
        let (cities, id, name) = cities();
        let dialect = GenericDialect::new();

        let stmt = dialect
            .compile(insert_into(&cities).set(&name, "Paris"))
            .unwrap();
        assert_eq!(stmt.sql(), "INSERT INTO Cities (name) VALUES (?)");

        let stmt = dialect
            .compile(update(&cities).set(&name, "Lyon").where_clause(id.eq(2)))
            .unwrap();
        assert_eq!(stmt.sql(), "UPDATE Cities SET name = ? WHERE Cities.id = ?");

        let stmt = dialect.compile(delete_from(&cities)).unwrap();
        assert_eq!(stmt.sql(), "DELETE FROM Cities");
    }

    #[test]
    fn test_column_declarations() {
        let (cities, _, _) = cities();
        let dialect = GenericDialect::new();
        let declarations: Vec<String> = cities
            .columns()
            .map(|c| dialect.column_declaration_sql(c).unwrap())
            .collect();
        assert_eq!(
            declarations,
            [
                "INT NOT NULL GENERATED BY DEFAULT AS IDENTITY",
                "VARCHAR(50) NOT NULL"
            ]
        );
        assert_eq!(
            dialect.id_column_type_sql(&ColumnType::Text).unwrap_err(),
            CompileError::UnsupportedIdColumnType {
                dialect: "generic",
                column_type: String::from("TEXT"),
            }
        );
    }
}
