//! Read-only look at the service's SQLite file. Nothing here writes.

use anyhow::Context;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

pub struct PaletteDatabase {
    conn: Connection,
}

impl PaletteDatabase {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("open {} read-only", path.display()))?;
        Ok(Self { conn })
    }

    /// Number of rows in the `palettes` table.
    pub fn palette_count(&self) -> anyhow::Result<u64> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM palettes", [], |row| row.get(0))
            .context("count palettes")?;
        Ok(n.max(0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_counts_rows_without_writing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("palettes.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(
                r#"
CREATE TABLE palettes (id INTEGER PRIMARY KEY, input_text TEXT, colors TEXT);
INSERT INTO palettes(input_text, colors) VALUES ('a', '#111,#222');
INSERT INTO palettes(input_text, colors) VALUES ('b', '#333,#444');
"#,
            )
            .unwrap();
        }
        let size_before = std::fs::metadata(&path).unwrap().len();

        let db = PaletteDatabase::open(&path).unwrap();
        assert_eq!(db.palette_count().unwrap(), 2);
        assert!(db.conn.execute("DELETE FROM palettes", []).is_err());
        assert_eq!(std::fs::metadata(&path).unwrap().len(), size_before);
    }

    #[test]
    fn test_not_a_database() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("palettes.db");
        std::fs::write(&path, b"plain text, not sqlite").unwrap();
        let counted = PaletteDatabase::open(&path).and_then(|p| p.palette_count());
        assert!(counted.is_err());
    }
}
