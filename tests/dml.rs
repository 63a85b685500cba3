use quarry::prelude::*;

#[test]
fn insert_statement() {
    let prepared = Query::from("users")
        .prepare_insert([("name", Value::from("John")), ("age", Value::from(30))])
        .unwrap();

    assert_eq!(
        prepared.sql(),
        "INSERT INTO `users` (`name`, `age`) VALUES (?, ?)"
    );
    assert_eq!(prepared.params(), &[Value::from("John"), Value::from(30)]);
    assert_eq!(
        prepared.to_literal(),
        "INSERT INTO `users` (`name`, `age`) VALUES ('John', 30)"
    );
}

#[test]
fn insert_ignores_select_clauses() {
    let prepared = Query::from("users")
        .where_eq("id", 1)
        .limit(4)
        .prepare_insert([("name", "Ann")])
        .unwrap();
    assert_eq!(prepared.sql(), "INSERT INTO `users` (`name`) VALUES (?)");
    assert_eq!(prepared.params().len(), 1);
}

#[test]
fn update_statement() {
    let prepared = Query::from("users")
        .where_eq("id", 7)
        .or_where_null("email")
        .order_by_desc("created_at")
        .limit(1)
        .prepare_update([("name", Value::from("Jane")), ("email", Value::Null)])
        .unwrap();

    assert_eq!(
        prepared.sql(),
        "UPDATE `users` SET `name` = ?, `email` = ? WHERE `id` = ? OR `email` IS NULL ORDER BY `created_at` DESC LIMIT ?"
    );
    assert_eq!(
        prepared.params(),
        &[Value::from("Jane"), Value::Null, Value::from(7), Value::from(1)]
    );
    assert_eq!(
        prepared.to_literal(),
        "UPDATE `users` SET `name` = 'Jane', `email` = NULL WHERE `id` = 7 OR `email` IS NULL ORDER BY `created_at` DESC LIMIT 1"
    );
}

#[test]
fn update_without_filters_touches_every_row() {
    let sql = Query::from("users")
        .prepare_update([("active", false)])
        .unwrap()
        .to_literal();
    assert_eq!(sql, "UPDATE `users` SET `active` = FALSE");
}

#[test]
fn delete_statement() {
    let prepared = Query::from("sessions")
        .where_between("expires_at", [0, 1_700_000_000])
        .unwrap()
        .prepare_delete()
        .unwrap();

    assert_eq!(
        prepared.sql(),
        "DELETE FROM `sessions` WHERE `expires_at` BETWEEN ? AND ?"
    );
    assert_eq!(
        Query::from("sessions").prepare_delete().unwrap().sql(),
        "DELETE FROM `sessions`"
    );
}

#[test]
fn empty_field_sets_fail() {
    let fields: Vec<(&str, Value)> = Vec::new();

    let err = Query::from("users").prepare_insert(fields.clone()).unwrap_err();
    assert!(matches!(
        err,
        QueryError::MissingArgument {
            class: "Query",
            method: "insert"
        }
    ));

    let err = Query::from("users").prepare_update(fields).unwrap_err();
    assert!(matches!(
        err,
        QueryError::MissingArgument {
            method: "update",
            ..
        }
    ));
}

#[test]
fn dml_requires_table() {
    assert!(matches!(
        Query::new().prepare_insert([("a", 1)]),
        Err(QueryError::TableNotSet)
    ));
    assert!(matches!(
        Query::new().prepare_update([("a", 1)]),
        Err(QueryError::TableNotSet)
    ));
    assert!(matches!(
        Query::new().prepare_delete(),
        Err(QueryError::TableNotSet)
    ));
}

#[test]
fn qualified_column_names_are_quoted() {
    let sql = Query::from("app.users")
        .prepare_insert([("na`me", "x")])
        .unwrap()
        .to_literal();
    assert_eq!(sql, "INSERT INTO `app`.`users` (`na``me`) VALUES ('x')");
}
