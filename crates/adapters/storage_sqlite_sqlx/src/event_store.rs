//! `SQLite` implementation of [`EventStore`].
//!
//! One row per event. The `(location_id, sequence)` pair is unique, so two
//! writers racing on the same stream cannot both append the same sequence.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use wirelessmesh_app::ports::EventStore;
use wirelessmesh_domain::error::MeshError;
use wirelessmesh_domain::event::{LocationEvent, RecordedEvent};
use wirelessmesh_domain::id::{EventId, LocationId};

use crate::error::StorageError;

struct Wrapper(RecordedEvent);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: uuid::Uuid = row.try_get("id")?;
        let location_id: String = row.try_get("location_id")?;
        let sequence: i64 = row.try_get("sequence")?;
        let recorded_at: String = row.try_get("recorded_at")?;
        let payload: Vec<u8> = row.try_get("payload")?;

        let location_id: LocationId = location_id
            .parse()
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let sequence = u64::try_from(sequence).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let recorded_at = chrono::DateTime::parse_from_rfc3339(&recorded_at)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?
            .to_utc();
        let event =
            LocationEvent::from_bytes(&payload).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(RecordedEvent {
            id: EventId::from_uuid(id),
            location_id,
            sequence,
            recorded_at,
            event,
        }))
    }
}

const SELECT_HEAD: &str =
    "SELECT COALESCE(MAX(sequence), 0) AS head FROM location_events WHERE location_id = ?";

const INSERT: &str = r"
    INSERT INTO location_events (id, location_id, sequence, event_type, recorded_at, payload)
    VALUES (?, ?, ?, ?, ?, ?)
";

const SELECT_STREAM: &str =
    "SELECT * FROM location_events WHERE location_id = ? ORDER BY sequence ASC";

/// `SQLite`-backed event store.
#[derive(Clone)]
pub struct SqliteEventStore {
    pool: SqlitePool,
}

impl SqliteEventStore {
    /// Create a new event store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn insert(
        &self,
        location_id: &LocationId,
        expected_sequence: u64,
        event: LocationEvent,
    ) -> Result<Result<RecordedEvent, MeshError>, StorageError> {
        let sequence = expected_sequence + 1;
        let sequence_column =
            i64::try_from(sequence).map_err(|_| StorageError::SequenceOutOfRange(sequence))?;
        let conflict = || MeshError::Conflict {
            location_id: location_id.to_string(),
            expected: expected_sequence,
        };

        let mut tx = self.pool.begin().await?;

        let head: i64 = sqlx::query_scalar(SELECT_HEAD)
            .bind(location_id.as_str())
            .fetch_one(&mut *tx)
            .await?;
        if head != sequence_column - 1 {
            return Ok(Err(conflict()));
        }

        let recorded = RecordedEvent {
            id: EventId::new(),
            location_id: location_id.clone(),
            sequence,
            recorded_at: chrono::Utc::now(),
            event,
        };
        let payload = recorded.event.to_bytes()?;

        let inserted = sqlx::query(INSERT)
            .bind(recorded.id.as_uuid())
            .bind(location_id.as_str())
            .bind(sequence_column)
            .bind(recorded.event.event_type())
            .bind(recorded.recorded_at.to_rfc3339())
            .bind(payload)
            .execute(&mut *tx)
            .await;

        match inserted {
            Ok(_) => {}
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                return Ok(Err(conflict()));
            }
            Err(err) => return Err(err.into()),
        }

        tx.commit().await?;
        Ok(Ok(recorded))
    }
}

impl EventStore for SqliteEventStore {
    #[tracing::instrument(skip(self, event), fields(event_type = event.event_type()))]
    async fn append(
        &self,
        location_id: &LocationId,
        expected_sequence: u64,
        event: LocationEvent,
    ) -> Result<RecordedEvent, MeshError> {
        self.insert(location_id, expected_sequence, event).await?
    }

    async fn load(&self, location_id: &LocationId) -> Result<Vec<RecordedEvent>, MeshError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_STREAM)
            .bind(location_id.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}
