//! Integration tests for the scheduling flows.
//!
//! These tests verify the end-to-end paths:
//! 1. CreateSessionHandler schedules a session with a seeded roster
//! 2. SessionsOnDateHandler buckets stored instants per viewer timezone
//! 3. EnrollStudentHandler adds a student exactly once
//! 4. RosterForSessionHandler distinguishes empty from missing
//!
//! Uses in-memory implementations to test the flows without external
//! dependencies. The in-memory store enforces the same unique constraints
//! the database schema does, so the lost-race path is covered too.

use async_trait::async_trait;
use chrono_tz::Tz;
use std::sync::Arc;
use tokio::sync::RwLock;

use class_scheduler::application::handlers::enrollment::{
    EnrollStudentCommand, EnrollStudentHandler, RosterForSessionHandler, RosterForSessionQuery,
};
use class_scheduler::application::handlers::schedule::{
    SessionsForStudentHandler, SessionsForStudentQuery, SessionsOnDateHandler, SessionsOnDateQuery,
};
use class_scheduler::application::handlers::session::{CreateSessionCommand, CreateSessionHandler};
use class_scheduler::domain::enrollment::{Enrollment, EnrollmentError};
use class_scheduler::domain::foundation::{
    ClassSessionId, DayRange, DomainError, EmailAddress, ErrorCode, Role, UserId,
};
use class_scheduler::domain::session::{ClassSession, SessionError, SessionKey};
use class_scheduler::ports::{
    EnrollmentRepository, InstructorSummary, RoleDirectory, RosterEntry, ScheduleReader,
    SessionRepository, SessionView, UserRecord,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Shared in-memory store backing all four ports.
///
/// Sessions and enrollments live in plain vectors; the save paths enforce
/// the natural-key and pair uniqueness the database constraints would.
struct InMemoryScheduler {
    reference_tz: Tz,
    users: RwLock<Vec<UserRecord>>,
    sessions: RwLock<Vec<ClassSession>>,
    enrollments: RwLock<Vec<Enrollment>>,
}

impl InMemoryScheduler {
    fn new() -> Self {
        Self {
            reference_tz: chrono_tz::America::Bogota,
            users: RwLock::new(Vec::new()),
            sessions: RwLock::new(Vec::new()),
            enrollments: RwLock::new(Vec::new()),
        }
    }

    async fn add_user(&self, name: &str, email: &str, role: Role) -> UserRecord {
        let record = UserRecord {
            id: UserId::new(),
            name: name.to_string(),
            email: EmailAddress::parse(email).unwrap(),
            role,
        };
        self.users.write().await.push(record.clone());
        record
    }

    async fn view_for(&self, session: &ClassSession) -> SessionView {
        let users = self.users.read().await;
        let instructor = users
            .iter()
            .find(|u| u.id == *session.instructor_id())
            .expect("instructor record");
        let enrollments = self.enrollments.read().await;
        let roster = enrollments
            .iter()
            .filter(|e| e.session_id() == session.id())
            .map(|e| {
                let student = users
                    .iter()
                    .find(|u| u.id == *e.student_id())
                    .expect("student record");
                RosterEntry {
                    student_id: student.id,
                    name: student.name.clone(),
                    email: student.email.clone(),
                }
            })
            .collect();
        SessionView {
            id: *session.id(),
            name: session.name().to_string(),
            date: session.date().midnight_in(self.reference_tz),
            start_time: session.start_time(),
            end_time: session.end_time(),
            instructor: InstructorSummary {
                id: instructor.id,
                name: instructor.name.clone(),
                email: instructor.email.clone(),
            },
            roster,
        }
    }
}

#[async_trait]
impl RoleDirectory for InMemoryScheduler {
    async fn resolve_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserRecord>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.email == *email)
            .cloned())
    }

    async fn resolve_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, DomainError> {
        Ok(self.users.read().await.iter().find(|u| u.id == *id).cloned())
    }
}

#[async_trait]
impl SessionRepository for InMemoryScheduler {
    async fn save_with_roster(
        &self,
        session: &ClassSession,
        roster: &[Enrollment],
    ) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        if sessions
            .iter()
            .any(|s| s.natural_key() == session.natural_key())
        {
            return Err(DomainError::new(
                ErrorCode::DuplicateSession,
                "natural key already taken",
            ));
        }
        let mut enrollments = self.enrollments.write().await;
        for entry in roster {
            if enrollments.iter().any(|e| e.pair() == entry.pair()) {
                return Err(DomainError::new(
                    ErrorCode::AlreadyEnrolled,
                    "pair already enrolled",
                ));
            }
            enrollments.push(entry.clone());
        }
        sessions.push(session.clone());
        Ok(())
    }

    async fn find_by_natural_key(
        &self,
        key: &SessionKey,
    ) -> Result<Option<ClassSession>, DomainError> {
        Ok(self
            .sessions
            .read()
            .await
            .iter()
            .find(|s| s.natural_key() == *key)
            .cloned())
    }

    async fn find_by_id(&self, id: &ClassSessionId) -> Result<Option<ClassSession>, DomainError> {
        Ok(self
            .sessions
            .read()
            .await
            .iter()
            .find(|s| s.id() == id)
            .cloned())
    }

    async fn exists(&self, id: &ClassSessionId) -> Result<bool, DomainError> {
        Ok(self.sessions.read().await.iter().any(|s| s.id() == id))
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryScheduler {
    async fn save(&self, enrollment: &Enrollment) -> Result<(), DomainError> {
        let mut enrollments = self.enrollments.write().await;
        if enrollments.iter().any(|e| e.pair() == enrollment.pair()) {
            return Err(DomainError::new(
                ErrorCode::AlreadyEnrolled,
                "pair already enrolled",
            ));
        }
        enrollments.push(enrollment.clone());
        Ok(())
    }

    async fn exists_for(
        &self,
        session_id: &ClassSessionId,
        student_id: &UserId,
    ) -> Result<bool, DomainError> {
        Ok(self
            .enrollments
            .read()
            .await
            .iter()
            .any(|e| e.session_id() == session_id && e.student_id() == student_id))
    }
}

#[async_trait]
impl ScheduleReader for InMemoryScheduler {
    async fn sessions_in_range(&self, range: &DayRange) -> Result<Vec<SessionView>, DomainError> {
        let sessions: Vec<ClassSession> = self.sessions.read().await.clone();
        let mut views = Vec::new();
        for session in &sessions {
            let instant = session.date().midnight_in(self.reference_tz);
            if range.contains(&instant) {
                views.push(self.view_for(session).await);
            }
        }
        Ok(views)
    }

    async fn sessions_for_student(
        &self,
        email: &EmailAddress,
    ) -> Result<Vec<SessionView>, DomainError> {
        let student = match self.resolve_by_email(email).await? {
            Some(user) if user.role.is_student() => user,
            _ => return Ok(Vec::new()),
        };
        let session_ids: Vec<ClassSessionId> = self
            .enrollments
            .read()
            .await
            .iter()
            .filter(|e| e.student_id() == &student.id)
            .map(|e| *e.session_id())
            .collect();
        let sessions: Vec<ClassSession> = self.sessions.read().await.clone();
        let mut views = Vec::new();
        for session in &sessions {
            if session_ids.contains(session.id()) {
                views.push(self.view_for(session).await);
            }
        }
        Ok(views)
    }

    async fn roster_for_session(
        &self,
        session_id: &ClassSessionId,
    ) -> Result<Vec<RosterEntry>, DomainError> {
        let session = match self.find_by_id(session_id).await? {
            Some(session) => session,
            None => return Ok(Vec::new()),
        };
        Ok(self.view_for(&session).await.roster)
    }
}

// =============================================================================
// Fixtures
// =============================================================================

struct Fixture {
    store: Arc<InMemoryScheduler>,
    create: CreateSessionHandler,
    enroll: EnrollStudentHandler,
    on_date: SessionsOnDateHandler,
    for_student: SessionsForStudentHandler,
    roster: RosterForSessionHandler,
}

fn fixture() -> Fixture {
    // RUST_LOG controls handler tracing during test runs.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let store = Arc::new(InMemoryScheduler::new());
    let sessions: Arc<dyn SessionRepository> = store.clone();
    let enrollments: Arc<dyn EnrollmentRepository> = store.clone();
    let directory: Arc<dyn RoleDirectory> = store.clone();
    let reader: Arc<dyn ScheduleReader> = store.clone();

    Fixture {
        create: CreateSessionHandler::new(sessions.clone(), directory.clone()),
        enroll: EnrollStudentHandler::new(sessions.clone(), enrollments, directory),
        on_date: SessionsOnDateHandler::new(reader.clone()),
        for_student: SessionsForStudentHandler::new(reader.clone()),
        roster: RosterForSessionHandler::new(sessions, reader),
        store,
    }
}

fn salsa_command(instructor: &UserRecord, students: &[&UserRecord]) -> CreateSessionCommand {
    CreateSessionCommand {
        name: "Salsa Basics".to_string(),
        date: "2025-05-10".to_string(),
        start_time: "18:00".to_string(),
        end_time: "19:30".to_string(),
        instructor_id: instructor.id,
        student_ids: students.iter().map(|s| s.id).collect(),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn creates_session_with_seeded_roster() {
    let fx = fixture();
    let ana = fx.store.add_user("Ana", "ana@example.com", Role::Instructor).await;
    let beto = fx.store.add_user("Beto", "beto@example.com", Role::Student).await;
    let cata = fx.store.add_user("Cata", "cata@example.com", Role::Student).await;

    let result = fx
        .create
        .handle(salsa_command(&ana, &[&beto, &cata]))
        .await
        .unwrap();

    assert_eq!(result.session.name(), "Salsa Basics");
    assert_eq!(result.instructor.id, ana.id);
    assert_eq!(result.enrolled.len(), 2);

    let roster = fx
        .roster
        .handle(RosterForSessionQuery {
            session_id: *result.session.id(),
        })
        .await
        .unwrap();
    let names: Vec<&str> = roster.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Beto", "Cata"]);
}

#[tokio::test]
async fn second_identical_create_is_a_duplicate() {
    let fx = fixture();
    let ana = fx.store.add_user("Ana", "ana@example.com", Role::Instructor).await;

    fx.create.handle(salsa_command(&ana, &[])).await.unwrap();
    let second = fx.create.handle(salsa_command(&ana, &[])).await;

    assert!(matches!(second, Err(SessionError::Duplicate)));
}

#[tokio::test]
async fn same_slot_under_other_instructor_is_fine() {
    let fx = fixture();
    let ana = fx.store.add_user("Ana", "ana@example.com", Role::Instructor).await;
    let dora = fx.store.add_user("Dora", "dora@example.com", Role::Instructor).await;

    fx.create.handle(salsa_command(&ana, &[])).await.unwrap();
    let result = fx.create.handle(salsa_command(&dora, &[])).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn lost_create_race_still_reports_duplicate() {
    let fx = fixture();
    let ana = fx.store.add_user("Ana", "ana@example.com", Role::Instructor).await;
    let created = fx.create.handle(salsa_command(&ana, &[])).await.unwrap();

    // A rival request that already passed its pre-check lands on the
    // store's unique constraint; the violation maps to the same error the
    // pre-check would have produced.
    let rival = ClassSession::new(
        ClassSessionId::new(),
        created.session.name().to_string(),
        created.session.date(),
        created.session.start_time(),
        created.session.end_time(),
        *created.session.instructor_id(),
    )
    .unwrap();
    let repo: &dyn SessionRepository = fx.store.as_ref();
    let violation = repo.save_with_roster(&rival, &[]).await.unwrap_err();

    assert!(matches!(
        SessionError::from(violation),
        SessionError::Duplicate
    ));
}

#[tokio::test]
async fn bucketing_follows_the_viewer_timezone() {
    let fx = fixture();
    let ana = fx.store.add_user("Ana", "ana@example.com", Role::Instructor).await;
    fx.create.handle(salsa_command(&ana, &[])).await.unwrap();

    // Stored as 2025-05-10T05:00:00Z (midnight in Bogota).
    let bogota = fx
        .on_date
        .handle(SessionsOnDateQuery {
            date: "2025-05-10".to_string(),
            timezone: "America/Bogota".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(bogota.len(), 1);

    // Honolulu is five hours behind Bogota, so the same instant still
    // belongs to May 9 there.
    let honolulu_ninth = fx
        .on_date
        .handle(SessionsOnDateQuery {
            date: "2025-05-09".to_string(),
            timezone: "Pacific/Honolulu".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(honolulu_ninth.len(), 1);

    let honolulu_tenth = fx
        .on_date
        .handle(SessionsOnDateQuery {
            date: "2025-05-10".to_string(),
            timezone: "Pacific/Honolulu".to_string(),
        })
        .await
        .unwrap();
    assert!(honolulu_tenth.is_empty());
}

#[tokio::test]
async fn date_results_come_back_in_chronological_order() {
    let fx = fixture();
    let ana = fx.store.add_user("Ana", "ana@example.com", Role::Instructor).await;

    for (name, start) in [("Tango", "20:00"), ("Salsa", "18:00"), ("Bachata", "18:00")] {
        fx.create
            .handle(CreateSessionCommand {
                name: name.to_string(),
                date: "2025-05-10".to_string(),
                start_time: start.to_string(),
                end_time: "21:00".to_string(),
                instructor_id: ana.id,
                student_ids: vec![],
            })
            .await
            .unwrap();
    }

    let sessions = fx
        .on_date
        .handle(SessionsOnDateQuery {
            date: "2025-05-10".to_string(),
            timezone: "America/Bogota".to_string(),
        })
        .await
        .unwrap();
    let names: Vec<&str> = sessions.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Bachata", "Salsa", "Tango"]);
}

#[tokio::test]
async fn enrolls_a_student_exactly_once() {
    let fx = fixture();
    let ana = fx.store.add_user("Ana", "ana@example.com", Role::Instructor).await;
    let beto = fx.store.add_user("Beto", "beto@example.com", Role::Student).await;
    let created = fx.create.handle(salsa_command(&ana, &[])).await.unwrap();

    let receipt = fx
        .enroll
        .handle(EnrollStudentCommand {
            session_id: *created.session.id(),
            student_email: "beto@example.com".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(receipt.student_id, beto.id);

    let again = fx
        .enroll
        .handle(EnrollStudentCommand {
            session_id: *created.session.id(),
            student_email: "beto@example.com".to_string(),
        })
        .await;
    assert!(matches!(again, Err(EnrollmentError::AlreadyEnrolled)));
}

#[tokio::test]
async fn enrolling_into_a_missing_session_fails() {
    let fx = fixture();
    fx.store.add_user("Beto", "beto@example.com", Role::Student).await;

    let ghost = ClassSessionId::new();
    let result = fx
        .enroll
        .handle(EnrollStudentCommand {
            session_id: ghost,
            student_email: "beto@example.com".to_string(),
        })
        .await;
    assert!(matches!(result, Err(EnrollmentError::SessionNotFound(id)) if id == ghost));
}

#[tokio::test]
async fn instructors_cannot_enroll_as_students() {
    let fx = fixture();
    let ana = fx.store.add_user("Ana", "ana@example.com", Role::Instructor).await;
    let created = fx.create.handle(salsa_command(&ana, &[])).await.unwrap();

    let result = fx
        .enroll
        .handle(EnrollStudentCommand {
            session_id: *created.session.id(),
            student_email: "ana@example.com".to_string(),
        })
        .await;
    assert!(matches!(result, Err(EnrollmentError::NotAStudent(_))));
}

#[tokio::test]
async fn student_schedule_reflects_both_seeding_and_later_enrollment() {
    let fx = fixture();
    let ana = fx.store.add_user("Ana", "ana@example.com", Role::Instructor).await;
    let beto = fx.store.add_user("Beto", "beto@example.com", Role::Student).await;

    let seeded = fx.create.handle(salsa_command(&ana, &[&beto])).await.unwrap();
    let later = fx
        .create
        .handle(CreateSessionCommand {
            name: "Bachata Footwork".to_string(),
            date: "2025-05-12".to_string(),
            start_time: "18:00".to_string(),
            end_time: "19:00".to_string(),
            instructor_id: ana.id,
            student_ids: vec![],
        })
        .await
        .unwrap();
    fx.enroll
        .handle(EnrollStudentCommand {
            session_id: *later.session.id(),
            student_email: "beto@example.com".to_string(),
        })
        .await
        .unwrap();

    let schedule = fx
        .for_student
        .handle(SessionsForStudentQuery {
            email: "beto@example.com".to_string(),
        })
        .await
        .unwrap();
    let ids: Vec<ClassSessionId> = schedule.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![*seeded.session.id(), *later.session.id()]);
}

#[tokio::test]
async fn empty_roster_and_missing_session_are_different_answers() {
    let fx = fixture();
    let ana = fx.store.add_user("Ana", "ana@example.com", Role::Instructor).await;
    let created = fx.create.handle(salsa_command(&ana, &[])).await.unwrap();

    let empty = fx
        .roster
        .handle(RosterForSessionQuery {
            session_id: *created.session.id(),
        })
        .await
        .unwrap();
    assert!(empty.is_empty());

    let missing = fx
        .roster
        .handle(RosterForSessionQuery {
            session_id: ClassSessionId::new(),
        })
        .await;
    assert!(matches!(missing, Err(EnrollmentError::SessionNotFound(_))));
}

#[tokio::test]
async fn roster_comes_back_sorted_by_name_then_email() {
    let fx = fixture();
    let ana = fx.store.add_user("Ana", "ana@example.com", Role::Instructor).await;
    let zoe = fx.store.add_user("Zoe", "zoe@example.com", Role::Student).await;
    let mia_b = fx.store.add_user("Mia", "mia.b@example.com", Role::Student).await;
    let mia_a = fx.store.add_user("Mia", "mia.a@example.com", Role::Student).await;

    let created = fx
        .create
        .handle(salsa_command(&ana, &[&zoe, &mia_b, &mia_a]))
        .await
        .unwrap();

    let roster = fx
        .roster
        .handle(RosterForSessionQuery {
            session_id: *created.session.id(),
        })
        .await
        .unwrap();
    let emails: Vec<&str> = roster.iter().map(|e| e.email.as_str()).collect();
    assert_eq!(
        emails,
        vec!["mia.a@example.com", "mia.b@example.com", "zoe@example.com"]
    );
}
