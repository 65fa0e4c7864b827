//! Storage boundary of the attendance service.
//!
//! The engine only talks to these traits. The at-most-one-record-per-day rule
//! lives here: `AttendanceStore::insert` must reject a second record for the
//! same person and date, and `set_departure` must only write when no
//! departure is recorded yet.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

use crate::error::StoreError;
use crate::model::attendance::{AttendanceRecord, NewAttendance};
use crate::model::configuration::DailyConfiguration;

#[cfg(test)]
pub mod memory;
pub mod mysql;

/// Resolves a scanned student document to a person id.
#[async_trait]
pub trait DirectoryLookup: Send + Sync {
    async fn resolve_by_document(&self, document: &str) -> Result<Option<u64>, StoreError>;
}

#[async_trait]
pub trait ConfigurationStore: Send + Sync {
    async fn active_configuration(&self) -> Result<Option<DailyConfiguration>, StoreError>;
}

#[async_trait]
pub trait AttendanceStore: Send + Sync {
    async fn find_by_person_and_date(
        &self,
        person_id: u64,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, StoreError>;

    /// Fails with `StoreError::Duplicate` when the person already has a record for the date.
    async fn insert(&self, record: NewAttendance) -> Result<AttendanceRecord, StoreError>;

    /// Returns `None` when the record has a departure already (or does not exist).
    async fn set_departure(
        &self,
        id: u64,
        time: NaiveTime,
    ) -> Result<Option<AttendanceRecord>, StoreError>;

    async fn list_by_person(
        &self,
        person_id: u64,
        range: DateRange,
        page: PageRequest,
    ) -> Result<Page<AttendanceRecord>, StoreError>;
}

/// Inclusive date bounds; either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    #[cfg(test)]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page.unwrap_or(20).clamp(1, 100),
        }
    }

    /// Rows to skip. Widened so that any `page` a client sends is representable.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: i64,
}
