use sqlite_dispatch::prelude::*;
use tokio::runtime::Runtime;

#[test]
fn null_values_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;

    rt.block_on(async {
        let client = SqliteClient::open(":memory:")?;
        client
            .execute(
                "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, age INTEGER)",
                &[],
            )
            .await?;
        client
            .execute(
                "INSERT INTO users (name, age) VALUES (?, ?)",
                &[RowValues::Text("Alice".into()), RowValues::Null],
            )
            .await?;

        let result = client.query("SELECT * FROM users", &[]).await?;
        assert_eq!(result.row_count(), 1);
        let row = result.first().expect("one row");

        assert_eq!(row.get_text("name"), Some("Alice"));
        assert_eq!(row.get("age"), Some(&RowValues::Null));
        assert!(row.get("age").is_some_and(RowValues::is_null));
        // A NULL is not readable through the typed getters
        assert!(row.get_int("age").is_none());
        assert!(row.get_text("age").is_none());

        client.close().await?;
        Ok::<(), Box<dyn std::error::Error>>(())
    })?;

    Ok(())
}

#[test]
fn absent_columns_and_type_mismatches_read_as_none() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;

    rt.block_on(async {
        let client = SqliteClient::open(":memory:")?;
        client
            .execute(
                "CREATE TABLE t (n INTEGER, s TEXT, r REAL, b BLOB)",
                &[],
            )
            .await?;
        client
            .execute(
                "INSERT INTO t (n, s, r, b) VALUES (?, ?, ?, ?)",
                &[
                    RowValues::Int(7),
                    RowValues::Text("seven".into()),
                    RowValues::Float(7.5),
                    RowValues::Blob(b"\x01\x02".to_vec()),
                ],
            )
            .await?;

        let result = client.query("SELECT * FROM t", &[]).await?;
        let row = result.first().expect("one row");

        assert!(row.get("missing").is_none());
        assert!(!row.has_column("missing"));
        assert!(row.has_column("n"));
        assert_eq!(row.column_names(), ["n", "s", "r", "b"]);

        assert_eq!(row.get_int("n"), Some(7));
        assert_eq!(row.get_text("s"), Some("seven"));
        assert_eq!(row.get_float("r"), Some(7.5));
        assert_eq!(
            row.get("b").and_then(RowValues::as_blob),
            Some(&b"\x01\x02"[..])
        );

        // Cross-type reads yield None rather than coercing
        assert!(row.get_text("n").is_none());
        assert!(row.get_int("s").is_none());
        assert!(row.get_float("n").is_none());
        assert!(row.get_bool("s").is_none());

        assert_eq!(row.get_by_index(0), Some(&RowValues::Int(7)));
        assert!(row.get_by_index(9).is_none());

        client.close().await?;
        Ok::<(), Box<dyn std::error::Error>>(())
    })?;

    Ok(())
}

#[test]
fn booleans_store_as_integers() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;

    rt.block_on(async {
        let client = SqliteClient::open(":memory:")?;
        client
            .execute("CREATE TABLE flags (active BOOLEAN, label TEXT)", &[])
            .await?;
        client
            .execute(
                "INSERT INTO flags (active, label) VALUES (?, ?)",
                &[RowValues::Bool(true), RowValues::Text("on".into())],
            )
            .await?;

        let result = client.query("SELECT * FROM flags", &[]).await?;
        let row = result.first().expect("one row");

        // SQLite stores the bound boolean as INTEGER 1
        assert_eq!(row.get("active"), Some(&RowValues::Int(1)));
        assert_eq!(row.get_bool("active"), Some(true));
        assert!(row.get_bool("label").is_none());

        client.close().await?;
        Ok::<(), Box<dyn std::error::Error>>(())
    })?;

    Ok(())
}
