#![cfg(feature = "sqlite")]

use sql_binder::prelude::*;
use tokio::runtime::Runtime;

async fn seeded_binder(path: &str) -> Result<QueryBinder, BinderError> {
    let binder = QueryBinder::connect(BinderConfig::new(path, "", "")).await?;
    binder
        .execute(
            "CREATE TABLE people (id INTEGER PRIMARY KEY, name TEXT NOT NULL)",
            &[],
        )
        .await?;
    for (id, name) in [(1i64, "x"), (2, "y")] {
        binder
            .execute(
                "INSERT INTO people (id, name) VALUES (:id, :name)",
                &[Bind::named("id", id), Bind::named("name", name)],
            )
            .await?;
    }
    Ok(binder)
}

#[test]
fn scope_defaults_apply_to_every_call() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let db = tempfile::NamedTempFile::new().unwrap();
        let binder = seeded_binder(db.path().to_str().unwrap()).await.unwrap();

        let mut scope = binder.scope();
        scope.set_defaults(vec![Bind::named("name", "x")]);

        // No per-call binds: the default supplies :name.
        let ids: Vec<i64> = scope
            .fetch("SELECT id FROM people WHERE name = :name", &[])
            .await
            .unwrap();
        assert_eq!(ids, vec![1]);

        // Still applied on the next call, until cleared.
        let n = scope
            .execute("UPDATE people SET name = name WHERE name = :name", &[])
            .await
            .unwrap();
        assert_eq!(n, 1);
    });
}

#[test]
fn per_call_binds_override_defaults() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let db = tempfile::NamedTempFile::new().unwrap();
        let binder = seeded_binder(db.path().to_str().unwrap()).await.unwrap();

        let mut scope = binder.scope();
        scope.set_defaults(vec![Bind::named("name", "x")]);

        let ids: Vec<i64> = scope
            .fetch(
                "SELECT id FROM people WHERE name = :name",
                &[Bind::named("name", "y")],
            )
            .await
            .unwrap();
        assert_eq!(ids, vec![2]);
    });
}

#[test]
fn set_defaults_replaces_the_previous_set() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let db = tempfile::NamedTempFile::new().unwrap();
        let binder = seeded_binder(db.path().to_str().unwrap()).await.unwrap();

        let mut scope = binder.scope();
        scope.set_defaults(vec![Bind::named("name", "x")]);
        scope.set_defaults(vec![Bind::named("name", "y")]);

        let ids: Vec<i64> = scope
            .fetch("SELECT id FROM people WHERE name = :name", &[])
            .await
            .unwrap();
        assert_eq!(ids, vec![2]);
    });
}

#[test]
fn cleared_scope_matches_a_fresh_one() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let db = tempfile::NamedTempFile::new().unwrap();
        let binder = seeded_binder(db.path().to_str().unwrap()).await.unwrap();

        let mut used = binder.scope();
        used.set_defaults(vec![Bind::named("name", "x")]);
        used.clear();
        // Idempotent.
        used.clear();

        let fresh = binder.scope();
        let sql = "SELECT id FROM people WHERE name = :name";

        // With :name unbound on both, the statement matches nothing; the two
        // scopes behave identically.
        let from_used: Vec<i64> = used.fetch(sql, &[]).await.unwrap();
        let from_fresh: Vec<i64> = fresh.fetch(sql, &[]).await.unwrap();
        assert_eq!(from_used, from_fresh);
        assert!(from_used.is_empty());

        // And both still honor per-call binds the same way.
        let from_used: Vec<i64> = used.fetch(sql, &[Bind::named("name", "x")]).await.unwrap();
        let from_fresh: Vec<i64> = fresh.fetch(sql, &[Bind::named("name", "x")]).await.unwrap();
        assert_eq!(from_used, from_fresh);
        assert_eq!(from_used, vec![1]);
    });
}

#[test]
fn scopes_are_independent() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let db = tempfile::NamedTempFile::new().unwrap();
        let binder = seeded_binder(db.path().to_str().unwrap()).await.unwrap();

        let mut a = binder.scope();
        let mut b = binder.scope();
        a.set_defaults(vec![Bind::named("name", "x")]);
        b.set_defaults(vec![Bind::named("name", "y")]);

        let sql = "SELECT id FROM people WHERE name = :name";
        let from_a: Vec<i64> = a.fetch(sql, &[]).await.unwrap();
        let from_b: Vec<i64> = b.fetch(sql, &[]).await.unwrap();
        assert_eq!(from_a, vec![1]);
        assert_eq!(from_b, vec![2]);
    });
}

#[test]
fn scope_fetch_one_uses_defaults() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let db = tempfile::NamedTempFile::new().unwrap();
        let binder = seeded_binder(db.path().to_str().unwrap()).await.unwrap();

        let mut scope = binder.scope();
        scope.set_defaults(vec![Bind::named("name", "x")]);

        let id: i64 = scope
            .fetch_one("SELECT id FROM people WHERE name = :name", &[], -1)
            .await
            .unwrap();
        assert_eq!(id, 1);

        scope.set_defaults(vec![Bind::named("name", "nobody")]);
        let id: i64 = scope
            .fetch_one("SELECT id FROM people WHERE name = :name", &[], -1)
            .await
            .unwrap();
        assert_eq!(id, -1);
    });
}
