//! SessionsOnDateHandler - "classes happening on day D" query.

use std::sync::Arc;

use crate::domain::foundation::{parse_timezone, CalendarDate, DayRange, DomainError};
use crate::ports::{sort_chronologically, ScheduleReader, SessionView};

/// Query for the sessions on one calendar date, as seen from one timezone.
#[derive(Debug, Clone)]
pub struct SessionsOnDateQuery {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// IANA timezone name, e.g. `America/Bogota`.
    pub timezone: String,
}

/// Handler for date queries.
///
/// The stored date is a timezone-agnostic instant; which calendar day it
/// belongs to depends on the viewer. The handler turns the caller's
/// (date, timezone) into a half-open instant range and buckets stored
/// instants against it.
pub struct SessionsOnDateHandler {
    reader: Arc<dyn ScheduleReader>,
}

impl SessionsOnDateHandler {
    pub fn new(reader: Arc<dyn ScheduleReader>) -> Self {
        Self { reader }
    }

    /// Returns the matching sessions in chronological order; an empty vec
    /// when nothing falls on that day.
    pub async fn handle(
        &self,
        query: SessionsOnDateQuery,
    ) -> Result<Vec<SessionView>, DomainError> {
        let date = CalendarDate::parse(&query.date)?;
        let tz = parse_timezone(&query.timezone)?;
        let range = DayRange::of(date, tz);

        let mut sessions = self.reader.sessions_in_range(&range).await?;
        sort_chronologically(&mut sessions);

        tracing::debug!(
            date = %date,
            timezone = %query.timezone,
            matches = sessions.len(),
            "resolved sessions on date"
        );
        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{
        ClassSessionId, EmailAddress, ErrorCode, Timestamp, UserId, WallClockTime,
    };
    use crate::ports::{InstructorSummary, RosterEntry};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Reader over a fixed set of stored instants; filters with the
    /// range it receives, like the SQL adapter does.
    struct FixedReader {
        views: Vec<SessionView>,
        seen_ranges: Mutex<Vec<DayRange>>,
    }

    impl FixedReader {
        fn new(views: Vec<SessionView>) -> Self {
            Self {
                views,
                seen_ranges: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ScheduleReader for FixedReader {
        async fn sessions_in_range(
            &self,
            range: &DayRange,
        ) -> Result<Vec<SessionView>, DomainError> {
            self.seen_ranges.lock().unwrap().push(*range);
            Ok(self
                .views
                .iter()
                .filter(|v| range.contains(&v.date))
                .cloned()
                .collect())
        }

        async fn sessions_for_student(
            &self,
            _email: &EmailAddress,
        ) -> Result<Vec<SessionView>, DomainError> {
            Ok(vec![])
        }

        async fn roster_for_session(
            &self,
            _session_id: &ClassSessionId,
        ) -> Result<Vec<RosterEntry>, DomainError> {
            Ok(vec![])
        }
    }

    fn view(name: &str, stored: &str, start: &str) -> SessionView {
        SessionView {
            id: ClassSessionId::new(),
            name: name.to_string(),
            date: Timestamp::from_datetime(stored.parse().unwrap()),
            start_time: WallClockTime::parse(start).unwrap(),
            end_time: WallClockTime::parse("23:59").unwrap(),
            instructor: InstructorSummary {
                id: UserId::new(),
                name: "Ana".to_string(),
                email: EmailAddress::parse("ana@example.com").unwrap(),
            },
            roster: vec![],
        }
    }

    fn query(date: &str, timezone: &str) -> SessionsOnDateQuery {
        SessionsOnDateQuery {
            date: date.to_string(),
            timezone: timezone.to_string(),
        }
    }

    #[tokio::test]
    async fn late_bogota_session_found_in_bogota_but_not_utc() {
        // Stored at 23:30 Bogota on 2025-05-10 = 04:30 UTC on 2025-05-11.
        let reader = Arc::new(FixedReader::new(vec![view(
            "Salsa Nocturna",
            "2025-05-11T04:30:00Z",
            "23:30",
        )]));
        let handler = SessionsOnDateHandler::new(reader);

        let bogota = handler
            .handle(query("2025-05-10", "America/Bogota"))
            .await
            .unwrap();
        assert_eq!(bogota.len(), 1);

        let utc = handler.handle(query("2025-05-10", "UTC")).await.unwrap();
        assert!(utc.is_empty());

        // And the UTC view of 2025-05-11 picks it up instead.
        let next_utc = handler.handle(query("2025-05-11", "UTC")).await.unwrap();
        assert_eq!(next_utc.len(), 1);
    }

    #[tokio::test]
    async fn results_are_ordered_by_start_then_name() {
        let reader = Arc::new(FixedReader::new(vec![
            view("Tango", "2025-05-10T05:00:00Z", "10:00"),
            view("Bachata", "2025-05-10T05:00:00Z", "09:00"),
            view("Aerials", "2025-05-10T05:00:00Z", "09:00"),
        ]));
        let handler = SessionsOnDateHandler::new(reader);

        let sessions = handler
            .handle(query("2025-05-10", "America/Bogota"))
            .await
            .unwrap();
        let names: Vec<&str> = sessions.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Aerials", "Bachata", "Tango"]);
    }

    #[tokio::test]
    async fn empty_day_returns_empty_vec_not_error() {
        let reader = Arc::new(FixedReader::new(vec![]));
        let handler = SessionsOnDateHandler::new(reader);

        let sessions = handler
            .handle(query("2030-01-01", "America/Bogota"))
            .await
            .unwrap();
        assert!(sessions.is_empty());
    }

    #[tokio::test]
    async fn malformed_date_is_rejected_before_reading() {
        let reader = Arc::new(FixedReader::new(vec![]));
        let handler = SessionsOnDateHandler::new(reader.clone());

        let result = handler.handle(query("not-a-date", "UTC")).await;
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code, ErrorCode::InvalidFormat);
        assert!(reader.seen_ranges.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_timezone_is_rejected() {
        let reader = Arc::new(FixedReader::new(vec![]));
        let handler = SessionsOnDateHandler::new(reader);

        let result = handler.handle(query("2025-05-10", "Mars/Olympus")).await;
        assert_eq!(result.unwrap_err().code, ErrorCode::InvalidFormat);
    }
}
