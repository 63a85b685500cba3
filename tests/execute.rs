mod common;

use common::{Call, MockConnection, row};
use quarry::prelude::*;

#[tokio::test]
async fn get_runs_the_prepared_select() {
    let conn = MockConnection::new().with_rows(vec![row("name", "John"), row("name", "Jane")]);

    let rows = Query::from("users")
        .select(["name"])
        .where_eq("active", true)
        .get(&conn)
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].get("name"), Some(&Value::from("Jane")));
    assert_eq!(
        conn.last_call(),
        Call::FetchAll(
            "SELECT `name` FROM `users` WHERE `active` = ?".into(),
            vec![Value::from(true)]
        )
    );
}

#[tokio::test]
async fn first_limits_to_one_row() {
    let conn = MockConnection::new().with_rows(vec![row("id", 1)]);
    let query = Query::from("users").order_by_desc("id").limit(20);

    let first = query.first(&conn).await.unwrap();
    assert_eq!(first.and_then(|r| r.get("id").cloned()), Some(Value::from(1)));

    let call = conn.last_call();
    assert!(matches!(call, Call::FetchOne(..)));
    assert_eq!(call.sql(), "SELECT * FROM `users` ORDER BY `id` DESC LIMIT ?");
    assert_eq!(call.params(), &[Value::from(1)]);

    // the original query keeps its own limit
    assert_eq!(
        query.to_sql().unwrap(),
        "SELECT * FROM `users` ORDER BY `id` DESC LIMIT 20"
    );
}

#[tokio::test]
async fn find_by_id() {
    let conn = MockConnection::new();
    let found = Query::from("users").find(&conn, 42).await.unwrap();

    assert!(found.is_none());
    let call = conn.last_call();
    assert_eq!(call.sql(), "SELECT * FROM `users` WHERE `id` = ? LIMIT ?");
    assert_eq!(call.params(), &[Value::from(42), Value::from(1)]);
}

#[tokio::test]
async fn column_variants_extend_the_select_list() {
    let conn = MockConnection::new();
    let users = Query::from("users").select(["id"]);

    users.get_columns(&conn, ["name", "email"]).await.unwrap();
    assert_eq!(
        conn.last_call(),
        Call::FetchAll("SELECT `id`, `name`, `email` FROM `users`".into(), vec![])
    );

    users.first_columns(&conn, ["name"]).await.unwrap();
    assert_eq!(conn.last_call().sql(), "SELECT `id`, `name` FROM `users` LIMIT ?");

    Query::from("users")
        .find_columns(&conn, 7, ["name"])
        .await
        .unwrap();
    let call = conn.last_call();
    assert_eq!(call.sql(), "SELECT `name` FROM `users` WHERE `id` = ? LIMIT ?");
    assert_eq!(call.params(), &[Value::from(7), Value::from(1)]);

    // the receiver keeps its own select list
    assert_eq!(users.to_sql().unwrap(), "SELECT `id` FROM `users`");
}

#[tokio::test]
async fn count_wraps_the_query() {
    let conn = MockConnection::new().with_rows(vec![row("aggregate", 3)]);

    let count = Query::from("users")
        .select(["name"])
        .r#where("id", ">", 20)
        .unwrap()
        .count(&conn)
        .await
        .unwrap();

    assert_eq!(count, 3);
    let call = conn.last_call();
    assert_eq!(
        call.sql(),
        "SELECT COUNT(*) AS aggregate FROM (SELECT * FROM `users` WHERE `id` > ?) AS temp_table"
    );
    assert_eq!(call.params(), &[Value::from(20)]);
}

#[tokio::test]
async fn aggregates_keep_select_list_with_having() {
    let conn = MockConnection::new().with_rows(vec![row("aggregate", 2)]);

    let query = Query::from("orders")
        .select(["region"])
        .select_raw("SUM(total) as spent")
        .unwrap()
        .group_by(["region"])
        .having("spent", ">", 100)
        .unwrap();
    let count = query.count(&conn).await.unwrap();

    assert_eq!(count, 2);
    assert_eq!(
        conn.last_call().sql(),
        "SELECT COUNT(*) AS aggregate FROM (SELECT `region`, SUM(total) as spent FROM `orders` GROUP BY `region` HAVING `spent` > ?) AS temp_table"
    );
}

#[tokio::test]
async fn aggregate_columns() {
    let conn = MockConnection::new()
        .with_rows(vec![row("aggregate", 250.5)])
        .with_rows(vec![row("aggregate", 7)]);
    let orders = Query::from("orders").where_eq("status", "paid");

    let sum = orders.sum(&conn, "orders.total").await.unwrap();
    assert_eq!(sum, Value::from(250.5));
    assert_eq!(
        conn.last_call().sql(),
        "SELECT SUM(temp_table.`total`) AS aggregate FROM (SELECT * FROM `orders` WHERE `status` = ?) AS temp_table"
    );

    let distinct = orders.count_column(&conn, "customer_id").await.unwrap();
    assert_eq!(distinct, 7);
    assert!(conn.last_call().sql().starts_with("SELECT COUNT(temp_table.`customer_id`)"));

    let calls = conn.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|call| call.params() == [Value::from("paid")]));
}

#[tokio::test]
async fn aggregates_default_to_zero() {
    let conn = MockConnection::new()
        .with_rows(Vec::new())
        .with_rows(vec![row("aggregate", Value::Null)]);
    let orders = Query::from("orders");

    assert_eq!(orders.max(&conn, "total").await.unwrap(), Value::Integer(0));
    assert_eq!(orders.average(&conn, "total").await.unwrap(), Value::Integer(0));
    assert_eq!(orders.min(&conn, "total").await.unwrap(), Value::Integer(0));
    assert_eq!(orders.count(&conn).await.unwrap(), 0);
}

#[tokio::test]
async fn aggregate_requires_column() {
    let conn = MockConnection::new();
    let err = Query::from("orders").sum(&conn, "*").await.unwrap_err();

    assert!(matches!(
        err,
        QueryError::MissingArgument {
            class: "Aggregate",
            method: "sum"
        }
    ));
    assert!(conn.calls().is_empty());
}

#[tokio::test]
async fn exists_and_doesnt_exist() {
    let conn = MockConnection::new()
        .with_rows(vec![row("exists", 1)])
        .with_rows(vec![row("exists", 0)]);
    let query = Query::from("users").where_eq("email", "a@b.c");

    assert!(query.exists(&conn).await.unwrap());
    assert_eq!(
        conn.last_call().sql(),
        "SELECT EXISTS(SELECT * FROM `users` WHERE `email` = ?)"
    );
    assert!(query.doesnt_exist(&conn).await.unwrap());
}

#[tokio::test]
async fn insert_and_insert_get_id() {
    let conn = MockConnection::new();
    let users = Query::from("users");

    users.insert(&conn, [("name", "Ann")]).await.unwrap();
    let id = users
        .insert_get_id(&conn, [("name", "Bob")])
        .await
        .unwrap();

    assert_eq!(id, Some(2));
    assert_eq!(
        conn.calls(),
        vec![
            Call::Insert(
                "INSERT INTO `users` (`name`) VALUES (?)".into(),
                vec![Value::from("Ann")],
                false
            ),
            Call::Insert(
                "INSERT INTO `users` (`name`) VALUES (?)".into(),
                vec![Value::from("Bob")],
                true
            ),
        ]
    );
}

#[tokio::test]
async fn update_and_delete_report_affected_rows() {
    let conn = MockConnection::new().with_affected(3);
    let stale = Query::from("sessions").r#where("expires_at", "<", 100).unwrap();

    let updated = stale.update(&conn, [("active", false)]).await.unwrap();
    assert_eq!(updated, 3);
    assert_eq!(
        conn.last_call(),
        Call::UpdateOrDelete(
            "UPDATE `sessions` SET `active` = ? WHERE `expires_at` < ?".into(),
            vec![Value::from(false), Value::from(100)]
        )
    );

    let deleted = stale.delete(&conn).await.unwrap();
    assert_eq!(deleted, 3);
    assert_eq!(
        conn.last_call().sql(),
        "DELETE FROM `sessions` WHERE `expires_at` < ?"
    );
}

#[tokio::test]
async fn terminal_operations_need_a_table() {
    let conn = MockConnection::new();
    assert!(matches!(
        Query::new().get(&conn).await,
        Err(QueryError::TableNotSet)
    ));
    assert!(matches!(
        Query::new().count(&conn).await,
        Err(QueryError::TableNotSet)
    ));
    assert!(conn.calls().is_empty());
}
