use crate::error::MinterError;
use crate::storage::models::IssuedCode;
use rusqlite::{params, Connection};

/// Durable backing for a code registry. Whatever `load_codes` returns is
/// fed to the generator at start-up so those codes are never reissued.
#[cfg_attr(test, mockall::automock)]
pub trait IssuedCodeStore: Send {
    fn init(&self) -> Result<(), MinterError>;
    fn load_codes(&self) -> Result<Vec<String>, MinterError>;
    fn record_code(&self, issued: &IssuedCode) -> Result<(), MinterError>;
}

pub struct SqliteCodeStore {
    conn: Connection,
}

impl SqliteCodeStore {
    pub fn new(path: &str) -> Result<Self, MinterError> {
        let conn = Connection::open(path)
            .map_err(|e| MinterError::Database(format!("Failed to open database: {}", e)))?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self {
            conn: Connection::open_in_memory().unwrap(),
        }
    }
}

impl IssuedCodeStore for SqliteCodeStore {
    fn init(&self) -> Result<(), MinterError> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS issued_codes (
                    seq INTEGER PRIMARY KEY AUTOINCREMENT,
                    id TEXT NOT NULL UNIQUE,
                    code TEXT NOT NULL UNIQUE,
                    issued_at TEXT NOT NULL
                )",
                [],
            )
            .map_err(|e| MinterError::Database(format!("Failed to create table: {}", e)))?;

        Ok(())
    }

    fn load_codes(&self) -> Result<Vec<String>, MinterError> {
        let mut stmt = self
            .conn
            .prepare("SELECT code FROM issued_codes ORDER BY seq")
            .map_err(|e| MinterError::Database(format!("Failed to prepare statement: {}", e)))?;

        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| MinterError::Database(format!("Query failed: {}", e)))?;

        let mut codes = Vec::new();
        for row in rows {
            codes.push(row.map_err(|e| MinterError::Database(format!("Row error: {}", e)))?);
        }

        Ok(codes)
    }

    fn record_code(&self, issued: &IssuedCode) -> Result<(), MinterError> {
        self.conn
            .execute(
                "INSERT INTO issued_codes (id, code, issued_at) VALUES (?1, ?2, ?3)",
                params![issued.id, issued.code, issued.issued_at],
            )
            .map_err(|e| MinterError::Database(format!("Failed to insert issued code: {}", e)))?;

        Ok(())
    }
}
