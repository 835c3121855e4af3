// Schema bootstrap module
// Creates all tables on first start and seeds the fixed mood set.

use super::Store;

const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS moods (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    label   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS entries (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    concept TEXT NOT NULL,
    entry   TEXT NOT NULL,
    date    TEXT NOT NULL,
    mood_id INTEGER NOT NULL,
    FOREIGN KEY (mood_id) REFERENCES moods (id)
);

CREATE TABLE IF NOT EXISTS locations (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    name    TEXT NOT NULL,
    address TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS customers (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    name    TEXT NOT NULL,
    address TEXT NOT NULL,
    email   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS animals (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    breed       TEXT NOT NULL,
    status      TEXT NOT NULL,
    location_id INTEGER NOT NULL,
    customer_id INTEGER NOT NULL,
    FOREIGN KEY (location_id) REFERENCES locations (id),
    FOREIGN KEY (customer_id) REFERENCES customers (id)
);

CREATE TABLE IF NOT EXISTS employees (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    address     TEXT NOT NULL,
    location_id INTEGER NOT NULL,
    FOREIGN KEY (location_id) REFERENCES locations (id)
);
";

/// Mood labels are fixed reference data; inserted only into an empty table
const MOOD_SEED: [&str; 4] = ["happy", "sad", "angry", "ok"];

pub(crate) async fn ensure(store: &Store) -> Result<(), sqlx::Error> {
    let mut conn = store.connect().await?;

    sqlx::raw_sql(SCHEMA).execute(&mut conn).await?;

    let mood_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM moods")
        .fetch_one(&mut conn)
        .await?;
    if mood_count == 0 {
        for label in MOOD_SEED {
            sqlx::query("INSERT INTO moods (label) VALUES (?1)")
                .bind(label)
                .execute(&mut conn)
                .await?;
        }
    }

    Ok(())
}
