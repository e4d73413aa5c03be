//! [`SqliteStore`] — the SQLite implementation of [`CaseStore`].

use std::path::Path;

use radicar_core::{case::Case, store::CaseStore};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use crate::{
  encode::{encode_uuid, RawCase},
  schema::SCHEMA,
  Result,
};

/// The fifteen `cases` columns in schema order; every query and write names
/// them through this list so the order stays in step with
/// [`RawCase::from_row`].
const CASE_COLUMNS: &str = "case_id, tracking_code, created_at, due_at, \
                            closed_at, case_type, department, status, \
                            technician, coordinator, title, description, \
                            requester, location, visit";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A case repository backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── CaseStore impl ──────────────────────────────────────────────────────────

impl CaseStore for SqliteStore {
  type Error = crate::Error;

  async fn get_all(&self) -> Result<Vec<Case>> {
    let raws: Vec<RawCase> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CASE_COLUMNS} FROM cases ORDER BY rowid DESC"
        ))?;
        let rows = stmt
          .query_map([], |row| RawCase::from_row(row))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCase::into_case).collect()
  }

  async fn get(&self, case_id: Uuid) -> Result<Option<Case>> {
    let id_str = encode_uuid(case_id);

    let raw: Option<RawCase> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {CASE_COLUMNS} FROM cases WHERE case_id = ?1"),
              rusqlite::params![id_str],
              |row| RawCase::from_row(row),
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCase::into_case).transpose()
  }

  async fn insert(&self, case: Case) -> Result<Case> {
    let raw = RawCase::from_case(&case)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          &format!(
            "INSERT INTO cases ({CASE_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                     ?14, ?15)"
          ),
          rusqlite::params![
            raw.case_id,
            raw.tracking_code,
            raw.created_at,
            raw.due_at,
            raw.closed_at,
            raw.case_type,
            raw.department,
            raw.status,
            raw.technician,
            raw.coordinator,
            raw.title,
            raw.description,
            raw.requester,
            raw.location,
            raw.visit,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(case)
  }

  async fn replace(&self, case_id: Uuid, case: Case) -> Result<Option<Case>> {
    let raw = RawCase::from_case(&case)?;
    let id_str = encode_uuid(case_id);

    // UPDATE keeps the rowid, so the case holds its position in get_all.
    let updated: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE cases SET
             tracking_code = ?2, created_at = ?3, due_at = ?4, closed_at = ?5,
             case_type = ?6, department = ?7, status = ?8, technician = ?9,
             coordinator = ?10, title = ?11, description = ?12,
             requester = ?13, location = ?14, visit = ?15
           WHERE case_id = ?1",
          rusqlite::params![
            id_str,
            raw.tracking_code,
            raw.created_at,
            raw.due_at,
            raw.closed_at,
            raw.case_type,
            raw.department,
            raw.status,
            raw.technician,
            raw.coordinator,
            raw.title,
            raw.description,
            raw.requester,
            raw.location,
            raw.visit,
          ],
        )?)
      })
      .await?;

    if updated == 0 {
      Ok(None)
    } else {
      Ok(Some(case))
    }
  }

  async fn allocate_sequence(&self) -> Result<u64> {
    let value: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row(
          "UPDATE counters SET value = value + 1
           WHERE name = 'tracking_sequence'
           RETURNING value",
          [],
          |row| row.get(0),
        )?)
      })
      .await?;

    Ok(value as u64)
  }
}
