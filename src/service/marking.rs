use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::error::{AttendanceError, StoreError};
use crate::model::attendance::{AttendanceRecord, MarkOutcome, NewAttendance, ScanKind};
use crate::model::configuration::DailyConfiguration;
use crate::service::classify::classify_arrival;
use crate::store::{AttendanceStore, ConfigurationStore};
use crate::utils::clock::{Clock, civil_moment};

/// Decides what a scan means for a person's attendance today and persists it.
///
/// Every call performs at most one write. Whether two racing first scans can
/// both create a record is decided by the store, not here.
#[derive(Clone)]
pub struct AttendanceEngine {
    configuration: Arc<dyn ConfigurationStore>,
    records: Arc<dyn AttendanceStore>,
    clock: Arc<dyn Clock>,
    zone: Tz,
}

impl AttendanceEngine {
    pub fn new(
        configuration: Arc<dyn ConfigurationStore>,
        records: Arc<dyn AttendanceStore>,
        clock: Arc<dyn Clock>,
        zone: Tz,
    ) -> Self {
        Self {
            configuration,
            records,
            clock,
            zone,
        }
    }

    pub async fn mark_now(&self, person_id: u64) -> Result<MarkOutcome, AttendanceError> {
        self.mark_attendance(person_id, self.clock.now()).await
    }

    #[instrument(
        name = "mark_attendance",
        skip(self, now),
        fields(scan_id = %Uuid::new_v4())
    )]
    pub async fn mark_attendance(
        &self,
        person_id: u64,
        now: DateTime<Utc>,
    ) -> Result<MarkOutcome, AttendanceError> {
        let (today, now_time) = civil_moment(now, self.zone);
        debug!(%today, %now_time, "Scan received");

        let config = self
            .configuration
            .active_configuration()
            .await
            .map_err(|e| storage_failure(e, "Failed to load attendance configuration"))?
            .ok_or_else(|| {
                error!("No attendance configuration present");
                AttendanceError::ConfigurationMissing
            })?;

        let existing = self
            .records
            .find_by_person_and_date(person_id, today)
            .await
            .map_err(|e| storage_failure(e, "Failed to look up today's attendance"))?;

        match existing {
            Some(record) => self.record_departure(record, now_time).await,
            None => self.record_arrival(person_id, today, now_time, &config).await,
        }
    }

    async fn record_arrival(
        &self,
        person_id: u64,
        today: NaiveDate,
        now_time: NaiveTime,
        config: &DailyConfiguration,
    ) -> Result<MarkOutcome, AttendanceError> {
        let status = classify_arrival(now_time, config);

        let new = NewAttendance {
            person_id,
            date: today,
            arrival_time: now_time,
            status,
        };

        match self.records.insert(new).await {
            Ok(record) => {
                info!(record_id = record.id, %status, "Arrival recorded");
                Ok(MarkOutcome {
                    kind: ScanKind::Arrival,
                    record,
                })
            }
            Err(StoreError::Duplicate { person_id, date }) => {
                info!("Arrival rejected, a record for today already exists");
                Err(AttendanceError::DuplicateArrival { person_id, date })
            }
            Err(StoreError::UnknownPerson(id)) => {
                info!("Arrival rejected, person is not registered");
                Err(AttendanceError::PersonNotFound(format!("id {id}")))
            }
            Err(e) => Err(storage_failure(e, "Failed to insert arrival")),
        }
    }

    async fn record_departure(
        &self,
        record: AttendanceRecord,
        now_time: NaiveTime,
    ) -> Result<MarkOutcome, AttendanceError> {
        let already_out = AttendanceError::AlreadyCheckedOut {
            person_id: record.person_id,
            date: record.date,
        };

        if record.departure_time.is_some() {
            info!(record_id = record.id, "Departure already recorded today");
            return Err(already_out);
        }

        let updated = self
            .records
            .set_departure(record.id, now_time)
            .await
            .map_err(|e| storage_failure(e, "Failed to record departure"))?;

        match updated {
            Some(record) => {
                info!(record_id = record.id, %now_time, "Departure recorded");
                Ok(MarkOutcome {
                    kind: ScanKind::Departure,
                    record,
                })
            }
            // a concurrent scan set it between our read and write
            None => {
                info!(record_id = record.id, "Departure set by a concurrent scan");
                Err(already_out)
            }
        }
    }
}

fn storage_failure(e: StoreError, context: &'static str) -> AttendanceError {
    error!(error = %e, "{}", context);
    AttendanceError::Storage(e)
}
