//! In-process store used by tests. Enforces the same uniqueness and
//! conditional-write rules as the MySQL schema.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

use super::{AttendanceStore, ConfigurationStore, DateRange, DirectoryLookup, Page, PageRequest};
use crate::error::StoreError;
use crate::model::attendance::{AttendanceRecord, NewAttendance};
use crate::model::configuration::DailyConfiguration;

#[derive(Default)]
pub struct MemoryStore {
    configuration: Mutex<Option<DailyConfiguration>>,
    students: Mutex<HashMap<String, u64>>,
    records: Mutex<Vec<AttendanceRecord>>,
    next_id: AtomicU64,
    writes: AtomicU64,
    unavailable: AtomicBool,
    /// Lookups miss every record, as if another scan raced this one.
    stale_reads: AtomicBool,
    /// Lookups return records without their departure, as if it was set after the read.
    stale_departures: AtomicBool,
}

impl MemoryStore {
    pub fn with_configuration(configuration: DailyConfiguration) -> Self {
        let store = Self::default();
        *store.configuration.lock().unwrap() = Some(configuration);
        store
    }

    pub fn add_student(&self, document: &str, person_id: u64) {
        self.students
            .lock()
            .unwrap()
            .insert(document.to_string(), person_id);
    }

    pub fn records(&self) -> Vec<AttendanceRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Number of successful inserts and updates.
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn set_stale_reads(&self, stale: bool) {
        self.stale_reads.store(stale, Ordering::SeqCst);
    }

    pub fn set_stale_departures(&self, stale: bool) {
        self.stale_departures.store(stale, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl DirectoryLookup for MemoryStore {
    async fn resolve_by_document(&self, document: &str) -> Result<Option<u64>, StoreError> {
        self.check_available()?;
        Ok(self.students.lock().unwrap().get(document).copied())
    }
}

#[async_trait]
impl ConfigurationStore for MemoryStore {
    async fn active_configuration(&self) -> Result<Option<DailyConfiguration>, StoreError> {
        self.check_available()?;
        Ok(self.configuration.lock().unwrap().clone())
    }
}

#[async_trait]
impl AttendanceStore for MemoryStore {
    async fn find_by_person_and_date(
        &self,
        person_id: u64,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        self.check_available()?;
        if self.stale_reads.load(Ordering::SeqCst) {
            return Ok(None);
        }

        let found = self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.person_id == person_id && r.date == date)
            .cloned();

        if self.stale_departures.load(Ordering::SeqCst) {
            return Ok(found.map(|r| AttendanceRecord {
                departure_time: None,
                ..r
            }));
        }
        Ok(found)
    }

    async fn insert(&self, record: NewAttendance) -> Result<AttendanceRecord, StoreError> {
        self.check_available()?;

        // foreign key onto students, once any are seeded
        {
            let students = self.students.lock().unwrap();
            if !students.is_empty() && !students.values().any(|id| *id == record.person_id) {
                return Err(StoreError::UnknownPerson(record.person_id));
            }
        }

        let mut records = self.records.lock().unwrap();

        if records
            .iter()
            .any(|r| r.person_id == record.person_id && r.date == record.date)
        {
            return Err(StoreError::Duplicate {
                person_id: record.person_id,
                date: record.date,
            });
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let created = record.into_record(id);
        records.push(created.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);

        Ok(created)
    }

    async fn set_departure(
        &self,
        id: u64,
        time: NaiveTime,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        self.check_available()?;
        let mut records = self.records.lock().unwrap();

        match records
            .iter_mut()
            .find(|r| r.id == id && r.departure_time.is_none())
        {
            Some(record) => {
                record.departure_time = Some(time);
                self.writes.fetch_add(1, Ordering::SeqCst);
                Ok(Some(record.clone()))
            }
            None => Ok(None),
        }
    }

    async fn list_by_person(
        &self,
        person_id: u64,
        range: DateRange,
        page: PageRequest,
    ) -> Result<Page<AttendanceRecord>, StoreError> {
        self.check_available()?;

        let mut matching: Vec<_> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.person_id == person_id && range.contains(r.date))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.date.cmp(&a.date));

        let total = matching.len() as i64;
        let data = matching
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(page.per_page as usize)
            .collect();

        Ok(Page { data, total })
    }
}
