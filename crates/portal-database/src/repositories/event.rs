//! Event repository implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{FromRow, PgConnection, PgPool};

use portal_core::error::{AppError, ErrorKind};
use portal_core::result::AppResult;
use portal_core::types::EventId;
use portal_entity::event::{EventDraft, EventListing, EventWithStaff};
use portal_entity::subject::SubjectRef;

use crate::store::EventStore;

/// One event-subject link joined with the subject's display fields.
#[derive(Debug, FromRow)]
struct EventSubjectRow {
    event_id: EventId,
    #[sqlx(flatten)]
    subject: SubjectRef,
}

/// Repository for events and event-subject links.
#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Create a new event repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(e: sqlx::Error, context: &'static str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
            AppError::validation("Assigned staff member or subject does not exist")
        }
        sqlx::Error::Database(ref db_err) if db_err.is_check_violation() => {
            AppError::validation("Event fields violate a constraint")
        }
        _ => AppError::with_source(ErrorKind::Database, context, e),
    }
}

async fn insert_links(conn: &mut PgConnection, id: EventId, draft: &EventDraft) -> AppResult<()> {
    if draft.subject_ids.is_empty() {
        return Ok(());
    }
    let subject_ids: Vec<i64> = draft.subject_ids.iter().map(|s| s.get()).collect();
    sqlx::query(
        "INSERT INTO event_subjects (event_id, subject_id) \
         SELECT $1, UNNEST($2::BIGINT[]) \
         ON CONFLICT DO NOTHING",
    )
    .bind(id)
    .bind(subject_ids)
    .execute(conn)
    .await
    .map_err(|e| map_write_error(e, "Failed to link event subjects"))?;
    Ok(())
}

#[async_trait]
impl EventStore for EventRepository {
    async fn list(&self) -> AppResult<Vec<EventListing>> {
        let rows = sqlx::query_as::<_, EventWithStaff>(
            "SELECT e.*, s.firstname || ' ' || s.surname AS staff_name \
             FROM events e \
             LEFT JOIN staff s ON s.id = e.staff_assigned \
             ORDER BY e.start_time DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list events", e))?;

        let links = sqlx::query_as::<_, EventSubjectRow>(
            "SELECT es.event_id, s.id, s.name, s.code \
             FROM event_subjects es \
             JOIN subjects s ON s.id = es.subject_id \
             ORDER BY s.name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load event subjects", e)
        })?;

        let mut by_event: HashMap<EventId, Vec<SubjectRef>> = HashMap::new();
        for link in links {
            by_event.entry(link.event_id).or_default().push(link.subject);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let subjects = by_event.remove(&row.event.event_id).unwrap_or_default();
                EventListing::new(row, subjects)
            })
            .collect())
    }

    async fn create(&self, draft: &EventDraft) -> AppResult<EventId> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let id = sqlx::query_scalar::<_, EventId>(
            "INSERT INTO events (event_name, location, details_short, details_long, \
                                 staff_assigned, students_signed_up, total_spaces, \
                                 start_time, end_time) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING event_id",
        )
        .bind(&draft.event_name)
        .bind(&draft.location)
        .bind(&draft.details_short)
        .bind(&draft.details_long)
        .bind(draft.staff_id)
        .bind(draft.students_signed_up.unwrap_or(0))
        .bind(draft.total_spaces)
        .bind(draft.start_time)
        .bind(draft.end_time)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, "Failed to create event"))?;

        insert_links(&mut *tx, id, draft).await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit event", e)
        })?;
        Ok(id)
    }

    async fn update(&self, id: EventId, draft: &EventDraft) -> AppResult<bool> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let updated = sqlx::query(
            "UPDATE events SET event_name = $2, location = $3, details_short = $4, \
                               details_long = $5, staff_assigned = $6, \
                               students_signed_up = COALESCE($7, students_signed_up), \
                               total_spaces = $8, \
                               start_time = $9, end_time = $10, updated_at = NOW() \
             WHERE event_id = $1",
        )
        .bind(id)
        .bind(&draft.event_name)
        .bind(&draft.location)
        .bind(&draft.details_short)
        .bind(&draft.details_long)
        .bind(draft.staff_id)
        .bind(draft.students_signed_up)
        .bind(draft.total_spaces)
        .bind(draft.start_time)
        .bind(draft.end_time)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, "Failed to update event"))?;

        if updated.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query("DELETE FROM event_subjects WHERE event_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to clear event subjects", e)
            })?;

        insert_links(&mut *tx, id, draft).await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit event update", e)
        })?;
        Ok(true)
    }

    async fn delete(&self, id: EventId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM events WHERE event_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete event", e))?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use portal_core::types::{StaffId, SubjectId};
    use portal_entity::staff::{AccessLevel, NewStaff};
    use portal_entity::subject::NewSubject;

    use crate::repositories::{StaffRepository, SubjectRepository};
    use crate::store::{StaffStore, SubjectStore};

    struct Seeded {
        staff_id: StaffId,
        maths: SubjectId,
        physics: SubjectId,
    }

    async fn seed(pool: &PgPool) -> Seeded {
        let staff = StaffRepository::new(pool.clone())
            .create(&NewStaff {
                email: "jo@school.test".to_string(),
                firstname: "Jo".to_string(),
                surname: "Bloggs".to_string(),
                password_hash: "argon2-hash".to_string(),
                access_level: AccessLevel::Staff,
            })
            .await
            .unwrap();
        let subjects = SubjectRepository::new(pool.clone());
        let maths = add_subject(&subjects, "Maths", "MA101").await;
        let physics = add_subject(&subjects, "Physics", "PH101").await;
        Seeded {
            staff_id: staff.id,
            maths,
            physics,
        }
    }

    async fn add_subject(subjects: &SubjectRepository, name: &str, code: &str) -> SubjectId {
        let data = NewSubject {
            name: name.to_string(),
            code: code.to_string(),
            description: None,
        };
        subjects.create(&data).await.unwrap().id
    }

    fn draft(staff_id: StaffId, subject_ids: Vec<SubjectId>) -> EventDraft {
        let start = Utc::now() + Duration::days(1);
        EventDraft {
            event_name: "Open Day".to_string(),
            location: Some("Main Hall".to_string()),
            details_short: None,
            details_long: None,
            staff_id,
            students_signed_up: Some(5),
            total_spaces: 20,
            start_time: start,
            end_time: start + Duration::hours(2),
            subject_ids,
        }
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_update_replaces_subject_links(pool: PgPool) {
        let seeded = seed(&pool).await;
        let repo = EventRepository::new(pool);
        let id = repo
            .create(&draft(seeded.staff_id, vec![seeded.maths, seeded.physics]))
            .await
            .unwrap();

        let mut changed = draft(seeded.staff_id, vec![seeded.physics]);
        changed.event_name = "Science Fair".to_string();
        changed.students_signed_up = None;
        assert!(repo.update(id, &changed).await.unwrap());

        let events = repo.list().await.unwrap();
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.event_name, "Science Fair");
        assert_eq!(event.students_signed_up, 5);
        assert_eq!(event.sign_up_percentage, 25);
        assert_eq!(event.staff_name.as_deref(), Some("Jo Bloggs"));
        let linked: Vec<SubjectId> = event.subjects.iter().map(|s| s.id).collect();
        assert_eq!(linked, vec![seeded.physics]);
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_update_unknown_event_reports_missing(pool: PgPool) {
        let seeded = seed(&pool).await;
        let repo = EventRepository::new(pool);
        let updated = repo
            .update(EventId(9_999), &draft(seeded.staff_id, vec![]))
            .await
            .unwrap();
        assert!(!updated);
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_failed_update_rolls_back(pool: PgPool) {
        let seeded = seed(&pool).await;
        let repo = EventRepository::new(pool);
        let id = repo
            .create(&draft(seeded.staff_id, vec![seeded.maths]))
            .await
            .unwrap();

        let mut broken = draft(seeded.staff_id, vec![SubjectId(9_999)]);
        broken.event_name = "Renamed".to_string();
        let err = repo.update(id, &broken).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let events = repo.list().await.unwrap();
        assert_eq!(events[0].event_name, "Open Day");
        let linked: Vec<SubjectId> = events[0].subjects.iter().map(|s| s.id).collect();
        assert_eq!(linked, vec![seeded.maths]);
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_delete_cascades_links(pool: PgPool) {
        let seeded = seed(&pool).await;
        let repo = EventRepository::new(pool.clone());
        let id = repo
            .create(&draft(seeded.staff_id, vec![seeded.maths]))
            .await
            .unwrap();

        assert!(repo.delete(id).await.unwrap());
        assert!(!repo.delete(id).await.unwrap());

        let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM event_subjects")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(links, 0);
    }
}
