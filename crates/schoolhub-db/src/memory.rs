//! In-memory provider for tests.
//!
//! Mirrors the Postgres schema closely enough for the HTTP suite: defaults are
//! applied, NOT NULL columns are checked, joins are resolved on read and
//! orderings match the SQL. Foreign keys are not enforced; a dangling id simply
//! joins to nothing.

use std::cmp::Reverse;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use tokio::sync::RwLock;
use uuid::Uuid;

use schoolhub_core::AppError;
use schoolhub_models::assignments::{
    Assignment, AssignmentSummary, AssignmentWithRelations, CreateAssignmentDto,
};
use schoolhub_models::attendance::{
    Attendance, AttendanceStatus, AttendanceWithRelations, CreateAttendanceDto,
};
use schoolhub_models::auth::{AuthUser, SignUp};
use schoolhub_models::blog::{BlogPost, BlogPostWithAuthor, CreateBlogPostDto};
use schoolhub_models::classes::{
    Class, ClassName, ClassSubjectWithRelations, ClassWithTeacher, CreateClassDto, Subject,
};
use schoolhub_models::contact::{ContactMessage, NewContactMessage};
use schoolhub_models::dashboard::AdminStats;
use schoolhub_models::events::{CreateEventDto, Event, EventWithCreator};
use schoolhub_models::grades::{CreateGradeDto, Grade, GradeWithRelations, GradeWithSubject};
use schoolhub_models::parents::Parent;
use schoolhub_models::payments::{CreatePaymentDto, Payment, PaymentStatus, PaymentWithStudent};
use schoolhub_models::profiles::{PersonRef, Profile, ProfileContact, ProfileName};
use schoolhub_models::roles::UserRole;
use schoolhub_models::students::{
    CreateStudentDto, Student, StudentStatus, StudentWithClass, StudentWithProfile,
    StudentWithRelations,
};
use schoolhub_models::teachers::{
    CreateTeacherDto, Teacher, TeacherStatus, TeacherWithContact, TeacherWithProfile,
};

use crate::provider::{IdentityProvider, SchoolStore};

#[derive(Debug, Clone)]
struct ClassSubjectLink {
    class_id: Uuid,
    subject_id: Uuid,
    teacher_id: Option<Uuid>,
}

#[derive(Default)]
struct Tables {
    users: Vec<AuthUser>,
    profiles: Vec<Profile>,
    parents: Vec<Parent>,
    teachers: Vec<Teacher>,
    classes: Vec<Class>,
    subjects: Vec<Subject>,
    class_subjects: Vec<ClassSubjectLink>,
    students: Vec<Student>,
    assignments: Vec<Assignment>,
    grades: Vec<Grade>,
    attendance: Vec<Attendance>,
    payments: Vec<Payment>,
    events: Vec<Event>,
    posts: Vec<BlogPost>,
    contact_messages: Vec<ContactMessage>,
}

fn not_null(column: &str, relation: &str) -> AppError {
    AppError::database(anyhow::anyhow!(
        "null value in column \"{}\" of relation \"{}\" violates not-null constraint",
        column,
        relation
    ))
}

/// Newest first. Ties keep the most recent insert first, as a serial scan would.
fn newest_first<T: Clone>(rows: &[T], created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    let mut rows: Vec<T> = rows.iter().rev().cloned().collect();
    rows.sort_by_key(|row| Reverse(created_at(row)));
    rows
}

impl Tables {
    fn profile(&self, id: Option<Uuid>) -> Option<&Profile> {
        let id = id?;
        self.profiles.iter().find(|p| p.id == id)
    }

    fn profile_name(&self, id: Option<Uuid>) -> Option<ProfileName> {
        self.profile(id).map(ProfileName::from)
    }

    fn profile_contact(&self, id: Option<Uuid>) -> Option<ProfileContact> {
        self.profile(id).map(ProfileContact::from)
    }

    fn class(&self, id: Option<Uuid>) -> Option<&Class> {
        let id = id?;
        self.classes.iter().find(|c| c.id == id)
    }

    fn subject(&self, id: Option<Uuid>) -> Option<&Subject> {
        let id = id?;
        self.subjects.iter().find(|s| s.id == id)
    }

    fn student_ref(&self, id: Option<Uuid>) -> Option<PersonRef> {
        let id = id?;
        let student = self.students.iter().find(|s| s.id == id)?;
        Some(PersonRef {
            profiles: self.profile_name(student.user_id),
        })
    }

    fn teacher_ref(&self, id: Option<Uuid>) -> Option<PersonRef> {
        let id = id?;
        let teacher = self.teachers.iter().find(|t| t.id == id)?;
        Some(PersonRef {
            profiles: self.profile_name(teacher.user_id),
        })
    }

    fn student_with_relations(&self, student: &Student) -> StudentWithRelations {
        StudentWithRelations {
            student: student.clone(),
            profiles: self.profile_contact(student.user_id).map(Json),
            classes: self.class(student.class_id).map(|c| {
                Json(ClassName {
                    name: c.name.clone(),
                })
            }),
        }
    }

    fn payment_with_student(&self, payment: &Payment) -> PaymentWithStudent {
        PaymentWithStudent {
            payment: payment.clone(),
            students: self.student_ref(payment.student_id).map(Json),
        }
    }

    fn assignment_summary(&self, assignment: &Assignment, with_class: bool) -> AssignmentSummary {
        AssignmentSummary {
            assignment: assignment.clone(),
            classes: if with_class {
                self.class(assignment.class_id).cloned().map(Json)
            } else {
                None
            },
            subjects: self.subject(assignment.subject_id).cloned().map(Json),
        }
    }
}

/// Identity provider and school store backed by in-process tables.
#[derive(Default)]
pub struct MemoryProvider {
    tables: RwLock<Tables>,
    identity_unavailable: AtomicBool,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every identity call fail, as an unreachable provider would.
    pub fn set_identity_unavailable(&self, unavailable: bool) {
        self.identity_unavailable
            .store(unavailable, Ordering::SeqCst);
    }

    fn check_identity(&self) -> Result<(), AppError> {
        if self.identity_unavailable.load(Ordering::SeqCst) {
            return Err(AppError::database(anyhow::anyhow!(
                "identity provider unavailable"
            )));
        }
        Ok(())
    }

    /// Overwrites a profile's role. `None` models a legacy row without one.
    pub async fn set_profile_role(&self, user_id: Uuid, role: Option<UserRole>) {
        let mut tables = self.tables.write().await;
        if let Some(profile) = tables.profiles.iter_mut().find(|p| p.id == user_id) {
            profile.role = role;
        }
    }

    /// Removes a profile row, leaving the identity record in place.
    pub async fn remove_profile(&self, user_id: Uuid) {
        self.tables.write().await.profiles.retain(|p| p.id != user_id);
    }

    pub async fn add_subject(&self, name: &str, code: &str) -> Subject {
        let subject = Subject {
            id: Uuid::new_v4(),
            name: name.to_string(),
            code: Some(code.to_string()),
            created_at: Utc::now(),
        };
        self.tables.write().await.subjects.push(subject.clone());
        subject
    }

    pub async fn add_parent(&self, user_id: Uuid, phone: Option<&str>) -> Parent {
        let parent = Parent {
            id: Uuid::new_v4(),
            user_id: Some(user_id),
            phone: phone.map(str::to_string),
            occupation: None,
            created_at: Utc::now(),
        };
        self.tables.write().await.parents.push(parent.clone());
        parent
    }

    pub async fn link_class_subject(
        &self,
        class_id: Uuid,
        subject_id: Uuid,
        teacher_id: Option<Uuid>,
    ) {
        self.tables
            .write()
            .await
            .class_subjects
            .push(ClassSubjectLink {
                class_id,
                subject_id,
                teacher_id,
            });
    }

    pub async fn contact_messages(&self) -> Vec<ContactMessage> {
        self.tables.read().await.contact_messages.clone()
    }

    /// Sets a payment's status, e.g. to mark it completed after settlement.
    pub async fn set_payment_status(&self, payment_id: Uuid, status: PaymentStatus) {
        let mut tables = self.tables.write().await;
        if let Some(payment) = tables.payments.iter_mut().find(|p| p.id == payment_id) {
            payment.status = status;
        }
    }
}

#[async_trait::async_trait]
impl IdentityProvider for MemoryProvider {
    async fn sign_up(&self, new_user: SignUp) -> Result<AuthUser, AppError> {
        self.check_identity()?;
        let mut tables = self.tables.write().await;

        if tables
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&new_user.email))
        {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "User already registered"
            )));
        }

        let now = Utc::now();
        let user = AuthUser {
            id: Uuid::new_v4(),
            email: new_user.email.clone(),
            password_hash: new_user.password_hash,
            user_metadata: Json(new_user.metadata.clone()),
            created_at: now,
        };

        tables.profiles.push(Profile {
            id: user.id,
            email: new_user.email,
            first_name: new_user.metadata.first_name,
            last_name: new_user.metadata.last_name,
            role: Some(new_user.role),
            avatar_url: None,
            created_at: now,
        });
        tables.users.push(user.clone());

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AppError> {
        self.check_identity()?;
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<AuthUser>, AppError> {
        self.check_identity()?;
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn get_profile(&self, id: Uuid) -> Result<Option<Profile>, AppError> {
        self.check_identity()?;
        let tables = self.tables.read().await;
        Ok(tables.profile(Some(id)).cloned())
    }
}

#[async_trait::async_trait]
impl SchoolStore for MemoryProvider {
    async fn list_students(&self) -> Result<Vec<StudentWithRelations>, AppError> {
        let tables = self.tables.read().await;
        Ok(newest_first(&tables.students, |s| s.created_at)
            .iter()
            .map(|s| tables.student_with_relations(s))
            .collect())
    }

    async fn create_student(&self, dto: CreateStudentDto) -> Result<Vec<Student>, AppError> {
        let student = Student {
            id: Uuid::new_v4(),
            user_id: dto.user_id,
            admission_number: dto.admission_number,
            class_id: dto.class_id,
            parent_id: dto.parent_id,
            date_of_birth: dto.date_of_birth,
            status: StudentStatus::default(),
            created_at: Utc::now(),
        };
        self.tables.write().await.students.push(student.clone());
        Ok(vec![student])
    }

    async fn list_teachers(&self) -> Result<Vec<TeacherWithContact>, AppError> {
        let tables = self.tables.read().await;
        Ok(newest_first(&tables.teachers, |t| t.created_at)
            .into_iter()
            .map(|teacher| TeacherWithContact {
                profiles: tables.profile_contact(teacher.user_id).map(Json),
                teacher,
            })
            .collect())
    }

    async fn create_teacher(&self, dto: CreateTeacherDto) -> Result<Vec<Teacher>, AppError> {
        let teacher = Teacher {
            id: Uuid::new_v4(),
            user_id: dto.user_id,
            employee_id: dto.employee_id,
            specialization: dto.specialization,
            qualification: dto.qualification,
            status: TeacherStatus::default(),
            created_at: Utc::now(),
        };
        self.tables.write().await.teachers.push(teacher.clone());
        Ok(vec![teacher])
    }

    async fn list_classes(&self) -> Result<Vec<ClassWithTeacher>, AppError> {
        let tables = self.tables.read().await;
        let mut classes = tables.classes.clone();
        classes.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(classes
            .into_iter()
            .map(|class| ClassWithTeacher {
                teachers: tables.teacher_ref(class.class_teacher_id).map(Json),
                class,
            })
            .collect())
    }

    async fn create_class(&self, dto: CreateClassDto) -> Result<Vec<Class>, AppError> {
        let class = Class {
            id: Uuid::new_v4(),
            name: dto.name.ok_or_else(|| not_null("name", "classes"))?,
            level: dto.level,
            class_teacher_id: dto.class_teacher_id,
            capacity: dto.capacity,
            academic_year: dto.academic_year,
            created_at: Utc::now(),
        };
        self.tables.write().await.classes.push(class.clone());
        Ok(vec![class])
    }

    async fn list_assignments(&self) -> Result<Vec<AssignmentWithRelations>, AppError> {
        let tables = self.tables.read().await;
        let mut assignments = tables.assignments.clone();
        // NULLS LAST
        assignments.sort_by_key(|a| (a.due_date.is_none(), a.due_date));

        Ok(assignments
            .into_iter()
            .map(|assignment| AssignmentWithRelations {
                subjects: tables.subject(assignment.subject_id).cloned().map(Json),
                classes: tables.class(assignment.class_id).cloned().map(Json),
                teachers: tables.teacher_ref(assignment.teacher_id).map(Json),
                assignment,
            })
            .collect())
    }

    async fn create_assignment(
        &self,
        dto: CreateAssignmentDto,
    ) -> Result<Vec<Assignment>, AppError> {
        let assignment = Assignment {
            id: Uuid::new_v4(),
            title: dto.title.ok_or_else(|| not_null("title", "assignments"))?,
            description: dto.description,
            subject_id: dto.subject_id,
            class_id: dto.class_id,
            teacher_id: dto.teacher_id,
            due_date: dto.due_date,
            file_url: dto.file_url,
            created_at: Utc::now(),
        };
        self.tables.write().await.assignments.push(assignment.clone());
        Ok(vec![assignment])
    }

    async fn list_grades(&self) -> Result<Vec<GradeWithRelations>, AppError> {
        let tables = self.tables.read().await;
        Ok(newest_first(&tables.grades, |g| g.created_at)
            .into_iter()
            .map(|grade| GradeWithRelations {
                students: tables.student_ref(grade.student_id).map(Json),
                subjects: tables.subject(grade.subject_id).cloned().map(Json),
                teachers: tables.teacher_ref(grade.teacher_id).map(Json),
                grade,
            })
            .collect())
    }

    async fn create_grade(&self, dto: CreateGradeDto) -> Result<Vec<Grade>, AppError> {
        let grade = Grade {
            id: Uuid::new_v4(),
            student_id: dto.student_id,
            subject_id: dto.subject_id,
            teacher_id: dto.teacher_id,
            term: dto.term,
            score: dto.score,
            grade: dto.grade,
            created_at: Utc::now(),
        };
        self.tables.write().await.grades.push(grade.clone());
        Ok(vec![grade])
    }

    async fn list_attendance(&self) -> Result<Vec<AttendanceWithRelations>, AppError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Attendance> = tables.attendance.iter().rev().cloned().collect();
        rows.sort_by_key(|a| Reverse(a.date));

        Ok(rows
            .into_iter()
            .map(|attendance| AttendanceWithRelations {
                students: tables.student_ref(attendance.student_id).map(Json),
                classes: tables.class(attendance.class_id).map(|c| {
                    Json(ClassName {
                        name: c.name.clone(),
                    })
                }),
                attendance,
            })
            .collect())
    }

    async fn create_attendance(
        &self,
        dto: CreateAttendanceDto,
    ) -> Result<Vec<Attendance>, AppError> {
        let now = Utc::now();
        let attendance = Attendance {
            id: Uuid::new_v4(),
            student_id: dto.student_id,
            class_id: dto.class_id,
            date: dto.date.unwrap_or_else(|| now.date_naive()),
            status: dto.status.unwrap_or(AttendanceStatus::Present),
            remarks: dto.remarks,
            created_at: now,
        };
        self.tables.write().await.attendance.push(attendance.clone());
        Ok(vec![attendance])
    }

    async fn list_payments(&self) -> Result<Vec<PaymentWithStudent>, AppError> {
        let tables = self.tables.read().await;
        Ok(newest_first(&tables.payments, |p| p.created_at)
            .iter()
            .map(|p| tables.payment_with_student(p))
            .collect())
    }

    async fn create_payment(&self, dto: CreatePaymentDto) -> Result<Vec<Payment>, AppError> {
        let payment = Payment {
            id: Uuid::new_v4(),
            student_id: dto.student_id,
            amount: dto.amount.ok_or_else(|| not_null("amount", "payments"))?,
            description: dto.description,
            reference_number: dto.reference_number,
            status: PaymentStatus::Pending,
            created_at: Utc::now(),
        };
        self.tables.write().await.payments.push(payment.clone());
        Ok(vec![payment])
    }

    async fn list_events(&self) -> Result<Vec<EventWithCreator>, AppError> {
        let tables = self.tables.read().await;
        let mut events = tables.events.clone();
        events.sort_by_key(|e| (e.event_date.is_none(), e.event_date));

        Ok(events
            .into_iter()
            .map(|event| EventWithCreator {
                creator: tables.profile_name(event.created_by).map(Json),
                event,
            })
            .collect())
    }

    async fn create_event(
        &self,
        dto: CreateEventDto,
        created_by: Uuid,
    ) -> Result<Vec<Event>, AppError> {
        let event = Event {
            id: Uuid::new_v4(),
            title: dto.title.ok_or_else(|| not_null("title", "events"))?,
            description: dto.description,
            event_date: dto.event_date,
            location: dto.location,
            image_url: dto.image_url,
            created_by: Some(created_by),
            created_at: Utc::now(),
        };
        self.tables.write().await.events.push(event.clone());
        Ok(vec![event])
    }

    async fn list_published_posts(&self) -> Result<Vec<BlogPostWithAuthor>, AppError> {
        let tables = self.tables.read().await;
        let published: Vec<BlogPost> = tables.posts.iter().filter(|p| p.published).cloned().collect();

        Ok(newest_first(&published, |p| p.created_at)
            .into_iter()
            .map(|post| BlogPostWithAuthor {
                author: tables.profile_name(post.author_id).map(Json),
                post,
            })
            .collect())
    }

    async fn create_post(
        &self,
        dto: CreateBlogPostDto,
        author_id: Uuid,
    ) -> Result<Vec<BlogPost>, AppError> {
        let post = BlogPost {
            id: Uuid::new_v4(),
            title: dto.title.ok_or_else(|| not_null("title", "blog_posts"))?,
            content: dto.content,
            featured_image_url: dto.featured_image_url,
            published: dto.published.unwrap_or(false),
            author_id: Some(author_id),
            created_at: Utc::now(),
        };
        self.tables.write().await.posts.push(post.clone());
        Ok(vec![post])
    }

    async fn create_contact_message(
        &self,
        message: NewContactMessage,
    ) -> Result<Vec<ContactMessage>, AppError> {
        let row = ContactMessage {
            id: Uuid::new_v4(),
            name: message.name,
            email: message.email,
            subject: message.subject,
            message: message.message,
            created_at: Utc::now(),
        };
        self.tables.write().await.contact_messages.push(row.clone());
        Ok(vec![row])
    }

    async fn admin_stats(&self) -> Result<AdminStats, AppError> {
        let tables = self.tables.read().await;
        Ok(AdminStats {
            students: tables.students.len() as i64,
            teachers: tables.teachers.len() as i64,
            classes: tables.classes.len() as i64,
        })
    }

    async fn recent_students(&self, limit: i64) -> Result<Vec<StudentWithProfile>, AppError> {
        let tables = self.tables.read().await;
        Ok(newest_first(&tables.students, |s| s.created_at)
            .into_iter()
            .take(limit.max(0) as usize)
            .map(|student| StudentWithProfile {
                profiles: tables.profile(student.user_id).cloned().map(Json),
                student,
            })
            .collect())
    }

    async fn recent_teachers(&self, limit: i64) -> Result<Vec<TeacherWithProfile>, AppError> {
        let tables = self.tables.read().await;
        Ok(newest_first(&tables.teachers, |t| t.created_at)
            .into_iter()
            .take(limit.max(0) as usize)
            .map(|teacher| TeacherWithProfile {
                profiles: tables.profile(teacher.user_id).cloned().map(Json),
                teacher,
            })
            .collect())
    }

    async fn student_for_user(&self, user_id: Uuid) -> Result<Option<StudentWithClass>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .students
            .iter()
            .find(|s| s.user_id == Some(user_id))
            .map(|student| StudentWithClass {
                classes: tables.class(student.class_id).cloned().map(Json),
                student: student.clone(),
            }))
    }

    async fn assignments_for_class(
        &self,
        class_id: Uuid,
    ) -> Result<Vec<AssignmentSummary>, AppError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<&Assignment> = tables
            .assignments
            .iter()
            .filter(|a| a.class_id == Some(class_id))
            .collect();
        rows.sort_by_key(|a| (a.due_date.is_none(), a.due_date));

        Ok(rows
            .into_iter()
            .map(|a| tables.assignment_summary(a, false))
            .collect())
    }

    async fn grades_for_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<GradeWithSubject>, AppError> {
        let tables = self.tables.read().await;
        let grades: Vec<Grade> = tables
            .grades
            .iter()
            .filter(|g| g.student_id == Some(student_id))
            .cloned()
            .collect();

        Ok(newest_first(&grades, |g| g.created_at)
            .into_iter()
            .map(|grade| GradeWithSubject {
                subjects: tables.subject(grade.subject_id).cloned().map(Json),
                grade,
            })
            .collect())
    }

    async fn attendance_for_student(
        &self,
        student_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Attendance>, AppError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Attendance> = tables
            .attendance
            .iter()
            .rev()
            .filter(|a| a.student_id == Some(student_id))
            .cloned()
            .collect();
        rows.sort_by_key(|a| Reverse(a.date));
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }

    async fn teacher_for_user(&self, user_id: Uuid) -> Result<Option<Teacher>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .teachers
            .iter()
            .find(|t| t.user_id == Some(user_id))
            .cloned())
    }

    async fn class_subjects_for_teacher(
        &self,
        teacher_id: Uuid,
    ) -> Result<Vec<ClassSubjectWithRelations>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .class_subjects
            .iter()
            .filter(|link| link.teacher_id == Some(teacher_id))
            .map(|link| ClassSubjectWithRelations {
                classes: tables.class(Some(link.class_id)).cloned().map(Json),
                subjects: tables.subject(Some(link.subject_id)).cloned().map(Json),
            })
            .collect())
    }

    async fn assignments_for_teacher(
        &self,
        teacher_id: Uuid,
        limit: i64,
    ) -> Result<Vec<AssignmentSummary>, AppError> {
        let tables = self.tables.read().await;
        let own: Vec<Assignment> = tables
            .assignments
            .iter()
            .filter(|a| a.teacher_id == Some(teacher_id))
            .cloned()
            .collect();

        Ok(newest_first(&own, |a| a.created_at)
            .iter()
            .take(limit.max(0) as usize)
            .map(|a| tables.assignment_summary(a, true))
            .collect())
    }

    async fn parent_for_user(&self, user_id: Uuid) -> Result<Option<Parent>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .parents
            .iter()
            .find(|p| p.user_id == Some(user_id))
            .cloned())
    }

    async fn children_of_parent(
        &self,
        parent_id: Uuid,
    ) -> Result<Vec<StudentWithRelations>, AppError> {
        let tables = self.tables.read().await;
        let children: Vec<Student> = tables
            .students
            .iter()
            .filter(|s| s.parent_id == Some(parent_id))
            .cloned()
            .collect();

        Ok(newest_first(&children, |s| s.created_at)
            .iter()
            .map(|s| tables.student_with_relations(s))
            .collect())
    }

    async fn payments_for_students(
        &self,
        student_ids: &[Uuid],
    ) -> Result<Vec<PaymentWithStudent>, AppError> {
        let tables = self.tables.read().await;
        let payments: Vec<Payment> = tables
            .payments
            .iter()
            .filter(|p| p.student_id.is_some_and(|id| student_ids.contains(&id)))
            .cloned()
            .collect();

        Ok(newest_first(&payments, |p| p.created_at)
            .iter()
            .map(|p| tables.payment_with_student(p))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use schoolhub_models::auth::UserMetadata;

    fn sign_up(email: &str, role: UserRole) -> SignUp {
        SignUp {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            metadata: UserMetadata {
                first_name: Some("Test".to_string()),
                last_name: Some("User".to_string()),
                role: Some(role.to_string()),
            },
            role,
        }
    }

    #[tokio::test]
    async fn test_sign_up_creates_profile() {
        let provider = MemoryProvider::new();
        let user = provider
            .sign_up(sign_up("t@example.com", UserRole::Teacher))
            .await
            .unwrap();

        let profile = provider.get_profile(user.id).await.unwrap().unwrap();
        assert_eq!(profile.role, Some(UserRole::Teacher));
        assert_eq!(profile.email, "t@example.com");
    }

    #[tokio::test]
    async fn test_duplicate_sign_up_is_bad_request() {
        let provider = MemoryProvider::new();
        provider
            .sign_up(sign_up("dup@example.com", UserRole::Student))
            .await
            .unwrap();

        let err = provider
            .sign_up(sign_up("dup@example.com", UserRole::Student))
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 400);
    }

    #[tokio::test]
    async fn test_email_lookup_ignores_case() {
        let provider = MemoryProvider::new();
        let user = provider
            .sign_up(sign_up("Mixed@Example.com", UserRole::Parent))
            .await
            .unwrap();

        let found = provider.find_user_by_email("mixed@example.com").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(user.id));

        let err = provider
            .sign_up(sign_up("MIXED@example.COM", UserRole::Parent))
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 400);
    }

    #[tokio::test]
    async fn test_unavailable_identity_fails() {
        let provider = MemoryProvider::new();
        provider.set_identity_unavailable(true);
        assert!(provider.get_user(Uuid::new_v4()).await.is_err());
    }

    #[tokio::test]
    async fn test_classes_sorted_by_name_with_teacher() {
        let provider = MemoryProvider::new();
        let user = provider
            .sign_up(sign_up("teach@example.com", UserRole::Teacher))
            .await
            .unwrap();
        let teacher = provider
            .create_teacher(CreateTeacherDto {
                user_id: Some(user.id),
                ..Default::default()
            })
            .await
            .unwrap()
            .remove(0);

        for name in ["JSS 3", "JSS 1"] {
            provider
                .create_class(CreateClassDto {
                    name: Some(name.to_string()),
                    class_teacher_id: Some(teacher.id),
                    ..Default::default()
                })
                .await
                .unwrap();
        }

        let classes = provider.list_classes().await.unwrap();
        assert_eq!(classes[0].class.name, "JSS 1");
        let teacher_name = classes[0].teachers.as_ref().unwrap().profiles.clone().unwrap();
        assert_eq!(teacher_name.first_name.as_deref(), Some("Test"));
    }

    #[tokio::test]
    async fn test_class_without_name_violates_not_null() {
        let provider = MemoryProvider::new();
        let err = provider
            .create_class(CreateClassDto::default())
            .await
            .unwrap_err();
        assert!(err.message().contains("not-null"));
    }

    #[tokio::test]
    async fn test_only_published_posts_listed() {
        let provider = MemoryProvider::new();
        let author = Uuid::new_v4();
        for (title, published) in [("Draft", false), ("Live", true)] {
            provider
                .create_post(
                    CreateBlogPostDto {
                        title: Some(title.to_string()),
                        published: Some(published),
                        ..Default::default()
                    },
                    author,
                )
                .await
                .unwrap();
        }

        let posts = provider.list_published_posts().await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].post.title, "Live");
    }

    #[tokio::test]
    async fn test_attendance_limit_and_order() {
        let provider = MemoryProvider::new();
        let student_id = Uuid::new_v4();
        for day in 1..=5 {
            provider
                .create_attendance(CreateAttendanceDto {
                    student_id: Some(student_id),
                    date: NaiveDate::from_ymd_opt(2024, 1, day),
                    ..Default::default()
                })
                .await
                .unwrap();
        }

        let rows = provider.attendance_for_student(student_id, 3).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(rows[0].status, AttendanceStatus::Present);
    }
}
