use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS operations (
            id TEXT PRIMARY KEY,
            owner_id TEXT NOT NULL,
            base TEXT NOT NULL,
            quote TEXT NOT NULL,
            price_buy REAL NOT NULL,
            price_sell REAL NOT NULL,
            profit REAL NOT NULL,
            exchange TEXT,
            note TEXT,
            trade_date TEXT,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS accounts (
            uid TEXT PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            salt TEXT NOT NULL,
            display_name TEXT,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS auth_state (
            slot INTEGER PRIMARY KEY CHECK (slot = 0),
            uid TEXT NOT NULL,
            signed_in_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_operations_owner ON operations(owner_id, created_at);
        ",
    )
    .map_err(|e| format!("Migration failed: {e}"))
}
