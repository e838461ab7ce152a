//! Tests executing compiled statements against an in-memory SQLite database.

mod common;

use chrono::NaiveDate;
use common::*;
use quarry_core::expr::{count_all, Case};
use quarry_core::statement::{delete_from, insert_into, update};
use quarry_core::{ExpressionOps, Table};
use sqlx::Row;

async fn seeded() -> (sqlx::SqlitePool, Cities, Citizens) {
    let cities = cities();
    let citizens = citizens(&cities);
    let pool = create_test_pool().await;
    create_tables(&pool, &[&cities.table, &citizens.table]).await;

    for name in ["Paris", "Lyon", "Marseille"] {
        execute(&pool, insert_into(&cities.table).set(&cities.name, name)).await;
    }
    let people = [
        ("a", "Ann", Some(1)),
        ("b", "Bob", Some(2)),
        ("c", "Cid", None),
        ("d", "Dee", Some(1)),
    ];
    for (id, name, city) in people {
        execute(
            &pool,
            insert_into(&citizens.table)
                .set(&citizens.id, id)
                .set(&citizens.name, name)
                .set(&citizens.city_id, city),
        )
        .await;
    }
    (pool, cities, citizens)
}

fn names(rows: &[sqlx::sqlite::SqliteRow]) -> Vec<String> {
    rows.iter().map(|row| row.get::<String, _>(0)).collect()
}

// ===================================================================
// Queries
// ===================================================================

#[tokio::test]
async fn select_with_filter_and_order() {
    let (pool, cities, _) = seeded().await;
    let rows = fetch_all(
        &pool,
        cities
            .table
            .select(&cities.name)
            .where_clause(cities.id.gt(1))
            .order_by_desc(&cities.name),
    )
    .await;
    assert_eq!(names(&rows), ["Marseille", "Lyon"]);
}

#[tokio::test]
async fn null_comparison_matches_missing_values() {
    let (pool, _, citizens) = seeded().await;
    let rows = fetch_all(
        &pool,
        citizens
            .table
            .select(&citizens.name)
            .where_clause(citizens.city_id.eq(None::<i32>)),
    )
    .await;
    assert_eq!(names(&rows), ["Cid"]);

    let rows = fetch_all(
        &pool,
        citizens
            .table
            .select(&citizens.name)
            .where_clause(citizens.city_id.not_eq(None::<i32>))
            .order_by(&citizens.name),
    )
    .await;
    assert_eq!(names(&rows), ["Ann", "Bob", "Dee"]);
}

#[tokio::test]
async fn nulls_sort_last() {
    let (pool, _, citizens) = seeded().await;
    let rows = fetch_all(
        &pool,
        citizens
            .table
            .select((&citizens.city_id, &citizens.name))
            .order_by(&citizens.city_id)
            .order_by(&citizens.name),
    )
    .await;
    let cities: Vec<Option<i64>> = rows.iter().map(|row| row.get(0)).collect();
    assert_eq!(cities, [Some(1), Some(1), Some(2), None]);
}

#[tokio::test]
async fn join_with_grouping() {
    let (pool, cities, citizens) = seeded().await;
    let query = cities
        .table
        .select((&cities.name, citizens.id.count()))
        .inner_join(&citizens.table, citizens.city_id.eq(&cities.id))
        .group_by(&cities.name)
        .having(citizens.id.count().gt(1));
    let rows = fetch_all(&pool, query).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get::<String, _>(0), "Paris");
    assert_eq!(rows[0].get::<i64, _>(1), 2);
}

#[tokio::test]
async fn subquery_and_in_lists() {
    let (pool, cities, citizens) = seeded().await;
    let inhabited = citizens.table.select(&citizens.city_id);
    let rows = fetch_all(
        &pool,
        cities
            .table
            .select(&cities.name)
            .where_clause(cities.id.not_in_query(inhabited.where_clause(citizens.city_id.is_not_null())))
            .order_by(&cities.name),
    )
    .await;
    assert_eq!(names(&rows), ["Marseille"]);

    let rows = fetch_all(
        &pool,
        cities
            .table
            .select(&cities.name)
            .where_clause(cities.id.in_list(Vec::<i32>::new())),
    )
    .await;
    assert!(rows.is_empty());

    let rows = fetch_all(
        &pool,
        cities
            .table
            .select(&cities.name)
            .where_clause(cities.name.in_list(["Lyon", "Nice"])),
    )
    .await;
    assert_eq!(names(&rows), ["Lyon"]);
}

#[tokio::test]
async fn union_removes_duplicates() {
    let (pool, cities, citizens) = seeded().await;
    let query = cities
        .table
        .select(&cities.id)
        .union(citizens.table.select(&citizens.city_id).where_clause(citizens.city_id.is_not_null()));
    let rows = fetch_all(&pool, query).await;
    assert_eq!(rows.len(), 3);
}

#[tokio::test]
async fn limit_and_offset() {
    let (pool, cities, _) = seeded().await;
    let rows = fetch_all(
        &pool,
        cities
            .table
            .select(&cities.name)
            .order_by(&cities.id)
            .limit_offset(1, 1),
    )
    .await;
    assert_eq!(names(&rows), ["Lyon"]);
}

#[tokio::test]
async fn case_and_count() {
    let (pool, cities, _) = seeded().await;
    let size = Case::<String>::new()
        .when(cities.id.lt(2), "first")
        .otherwise("other");
    let rows = fetch_all(&pool, cities.table.select(size).order_by(&cities.id)).await;
    assert_eq!(names(&rows), ["first", "other", "other"]);

    let rows = fetch_all(&pool, cities.table.select(count_all())).await;
    assert_eq!(rows[0].get::<i64, _>(0), 3);
}

// ===================================================================
// Statements
// ===================================================================

#[tokio::test]
async fn update_and_delete() {
    let (pool, cities, citizens) = seeded().await;

    let updated = execute(
        &pool,
        update(&cities.table)
            .set(&cities.name, "Lutetia")
            .where_clause(cities.name.eq("Paris")),
    )
    .await;
    assert_eq!(updated, 1);

    let updated = execute(
        &pool,
        update(&citizens.table)
            .set(&citizens.city_id, citizens.city_id.plus(10))
            .where_clause(citizens.city_id.is_not_null()),
    )
    .await;
    assert_eq!(updated, 3);

    let deleted = execute(
        &pool,
        delete_from(&citizens.table).where_clause(citizens.city_id.gt(11)),
    )
    .await;
    assert_eq!(deleted, 1);

    let rows = fetch_all(&pool, cities.table.select(&cities.name).where_clause(cities.id.eq(1))).await;
    assert_eq!(names(&rows), ["Lutetia"]);
}

#[tokio::test]
async fn insert_from_query_and_defaults() {
    let (pool, cities, _) = seeded().await;

    let mut archive = Table::new("Archive");
    let archived_id = archive.integer("id").add().unwrap();
    let archived_name = archive.varchar("name", 50).nullable().add().unwrap();
    create_tables(&pool, &[&archive]).await;

    let copied = execute(
        &pool,
        insert_into(&archive).query(
            cities
                .table
                .select((&cities.id, &cities.name))
                .where_clause(cities.id.lt_eq(2)),
        ),
    )
    .await;
    assert_eq!(copied, 2);

    let mut counters = Table::new("Counters");
    let counter_id = counters.integer("id").auto_increment().primary_key().add().unwrap();
    let _ = counters.integer("hits").nullable().add().unwrap();
    create_tables(&pool, &[&counters]).await;
    execute(&pool, insert_into(&counters)).await;
    execute(&pool, insert_into(&counters)).await;
    let rows = fetch_all(&pool, counters.select(counter_id.max())).await;
    assert_eq!(rows[0].get::<i64, _>(0), 2);

    let rows = fetch_all(
        &pool,
        archive
            .select(&archived_name)
            .where_clause(archived_id.eq(2)),
    )
    .await;
    assert_eq!(rows[0].get::<Option<String>, _>(0).as_deref(), Some("Lyon"));
}

#[tokio::test]
async fn temporal_values_are_bound() {
    let pool = create_test_pool().await;
    let mut events = Table::new("Events");
    let title = events.text("title").add().unwrap();
    let day = events.date("day").add().unwrap();
    create_tables(&pool, &[&events]).await;

    for (name, date) in [("launch", (2020, 5, 1)), ("review", (2021, 2, 3))] {
        let (y, m, d) = date;
        execute(
            &pool,
            insert_into(&events)
                .set(&title, name)
                .set(&day, NaiveDate::from_ymd_opt(y, m, d).unwrap()),
        )
        .await;
    }

    let cutoff = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
    let rows = fetch_all(&pool, events.select(&title).where_clause(day.gt(cutoff))).await;
    assert_eq!(names(&rows), ["review"]);
}
