use std::str::FromStr;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::MySqlPool;

use super::{AttendanceStore, ConfigurationStore, DateRange, DirectoryLookup, Page, PageRequest};
use crate::error::StoreError;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus, NewAttendance};
use crate::model::configuration::DailyConfiguration;

/// MySQL-backed implementation of every storage trait.
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AttendanceRow {
    id: u64,
    person_id: u64,
    date: NaiveDate,
    arrival_time: NaiveTime,
    departure_time: Option<NaiveTime>,
    status: String,
}

impl TryFrom<AttendanceRow> for AttendanceRecord {
    type Error = StoreError;

    fn try_from(row: AttendanceRow) -> Result<Self, Self::Error> {
        let status = AttendanceStatus::from_str(&row.status).map_err(|_| {
            StoreError::Corrupt(format!("unknown status {:?} on attendance {}", row.status, row.id))
        })?;

        Ok(AttendanceRecord {
            id: row.id,
            person_id: row.person_id,
            date: row.date,
            arrival_time: row.arrival_time,
            departure_time: row.departure_time,
            status,
        })
    }
}

const SELECT_ATTENDANCE: &str = r#"
    SELECT id, person_id, date, arrival_time, departure_time, status
    FROM attendance
"#;

#[async_trait]
impl DirectoryLookup for MySqlStore {
    async fn resolve_by_document(&self, document: &str) -> Result<Option<u64>, StoreError> {
        let id = sqlx::query_scalar::<_, u64>("SELECT id FROM students WHERE document = ?")
            .bind(document)
            .fetch_optional(&self.pool)
            .await?;

        Ok(id)
    }
}

#[async_trait]
impl ConfigurationStore for MySqlStore {
    async fn active_configuration(&self) -> Result<Option<DailyConfiguration>, StoreError> {
        let config = sqlx::query_as::<_, DailyConfiguration>(
            r#"
            SELECT entry_time,
                   COALESCE(late_threshold_time, exit_time) AS late_threshold_time,
                   grace_minutes
            FROM daily_configuration
            ORDER BY id
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(config)
    }
}

#[async_trait]
impl AttendanceStore for MySqlStore {
    async fn find_by_person_and_date(
        &self,
        person_id: u64,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        let sql = format!("{SELECT_ATTENDANCE} WHERE person_id = ? AND date = ?");

        sqlx::query_as::<_, AttendanceRow>(&sql)
            .bind(person_id)
            .bind(date)
            .fetch_optional(&self.pool)
            .await?
            .map(AttendanceRecord::try_from)
            .transpose()
    }

    async fn insert(&self, record: NewAttendance) -> Result<AttendanceRecord, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO attendance (person_id, date, arrival_time, status)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(record.person_id)
        .bind(record.date)
        .bind(record.arrival_time)
        .bind(record.status.as_ref())
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(record.into_record(done.last_insert_id())),
            Err(e) => {
                // uq_attendance_person_date
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return Err(StoreError::Duplicate {
                            person_id: record.person_id,
                            date: record.date,
                        });
                    }
                    if db_err.is_foreign_key_violation() {
                        return Err(StoreError::UnknownPerson(record.person_id));
                    }
                }
                Err(e.into())
            }
        }
    }

    async fn set_departure(
        &self,
        id: u64,
        time: NaiveTime,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE attendance
            SET departure_time = ?
            WHERE id = ?
            AND departure_time IS NULL
            "#,
        )
        .bind(time)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let sql = format!("{SELECT_ATTENDANCE} WHERE id = ?");

        sqlx::query_as::<_, AttendanceRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(AttendanceRecord::try_from)
            .transpose()
    }

    async fn list_by_person(
        &self,
        person_id: u64,
        range: DateRange,
        page: PageRequest,
    ) -> Result<Page<AttendanceRecord>, StoreError> {
        let filter = r#"
            WHERE person_id = ?
            AND (? IS NULL OR date >= ?)
            AND (? IS NULL OR date <= ?)
        "#;

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM attendance {filter}"
        ))
        .bind(person_id)
        .bind(range.from)
        .bind(range.from)
        .bind(range.to)
        .bind(range.to)
        .fetch_one(&self.pool)
        .await?;

        let sql = format!("{SELECT_ATTENDANCE} {filter} ORDER BY date DESC LIMIT ? OFFSET ?");

        let rows = sqlx::query_as::<_, AttendanceRow>(&sql)
            .bind(person_id)
            .bind(range.from)
            .bind(range.from)
            .bind(range.to)
            .bind(range.to)
            .bind(page.per_page)
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let data = rows
            .into_iter()
            .map(AttendanceRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page { data, total })
    }
}
