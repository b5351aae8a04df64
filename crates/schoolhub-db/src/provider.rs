//! Provider traits.
//!
//! Handlers only ever hold `Arc<dyn IdentityProvider>` and `Arc<dyn SchoolStore>`.
//! Create methods return the inserted rows the way the store hands them back:
//! a one-element `Vec`.

use uuid::Uuid;

use schoolhub_core::AppError;
use schoolhub_models::assignments::{
    Assignment, AssignmentSummary, AssignmentWithRelations, CreateAssignmentDto,
};
use schoolhub_models::attendance::{Attendance, AttendanceWithRelations, CreateAttendanceDto};
use schoolhub_models::auth::{AuthUser, SignUp};
use schoolhub_models::blog::{BlogPost, BlogPostWithAuthor, CreateBlogPostDto};
use schoolhub_models::classes::{Class, ClassSubjectWithRelations, ClassWithTeacher, CreateClassDto};
use schoolhub_models::contact::{ContactMessage, NewContactMessage};
use schoolhub_models::dashboard::AdminStats;
use schoolhub_models::events::{CreateEventDto, Event, EventWithCreator};
use schoolhub_models::grades::{CreateGradeDto, Grade, GradeWithRelations, GradeWithSubject};
use schoolhub_models::parents::Parent;
use schoolhub_models::payments::{CreatePaymentDto, Payment, PaymentWithStudent};
use schoolhub_models::profiles::Profile;
use schoolhub_models::students::{
    CreateStudentDto, Student, StudentWithClass, StudentWithProfile, StudentWithRelations,
};
use schoolhub_models::teachers::{CreateTeacherDto, Teacher, TeacherWithContact, TeacherWithProfile};

#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Creates the identity record and its profile row together.
    ///
    /// Fails with 400 when the email is already registered.
    async fn sign_up(&self, new_user: SignUp) -> Result<AuthUser, AppError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AppError>;

    async fn get_user(&self, id: Uuid) -> Result<Option<AuthUser>, AppError>;

    async fn get_profile(&self, id: Uuid) -> Result<Option<Profile>, AppError>;
}

#[async_trait::async_trait]
pub trait SchoolStore: Send + Sync {
    async fn list_students(&self) -> Result<Vec<StudentWithRelations>, AppError>;
    async fn create_student(&self, dto: CreateStudentDto) -> Result<Vec<Student>, AppError>;

    async fn list_teachers(&self) -> Result<Vec<TeacherWithContact>, AppError>;
    async fn create_teacher(&self, dto: CreateTeacherDto) -> Result<Vec<Teacher>, AppError>;

    async fn list_classes(&self) -> Result<Vec<ClassWithTeacher>, AppError>;
    async fn create_class(&self, dto: CreateClassDto) -> Result<Vec<Class>, AppError>;

    async fn list_assignments(&self) -> Result<Vec<AssignmentWithRelations>, AppError>;
    async fn create_assignment(&self, dto: CreateAssignmentDto)
    -> Result<Vec<Assignment>, AppError>;

    async fn list_grades(&self) -> Result<Vec<GradeWithRelations>, AppError>;
    async fn create_grade(&self, dto: CreateGradeDto) -> Result<Vec<Grade>, AppError>;

    async fn list_attendance(&self) -> Result<Vec<AttendanceWithRelations>, AppError>;
    async fn create_attendance(&self, dto: CreateAttendanceDto)
    -> Result<Vec<Attendance>, AppError>;

    async fn list_payments(&self) -> Result<Vec<PaymentWithStudent>, AppError>;
    /// Stores the payment as `pending` regardless of input.
    async fn create_payment(&self, dto: CreatePaymentDto) -> Result<Vec<Payment>, AppError>;

    async fn list_events(&self) -> Result<Vec<EventWithCreator>, AppError>;
    async fn create_event(
        &self,
        dto: CreateEventDto,
        created_by: Uuid,
    ) -> Result<Vec<Event>, AppError>;

    /// Published posts only.
    async fn list_published_posts(&self) -> Result<Vec<BlogPostWithAuthor>, AppError>;
    async fn create_post(
        &self,
        dto: CreateBlogPostDto,
        author_id: Uuid,
    ) -> Result<Vec<BlogPost>, AppError>;

    async fn create_contact_message(
        &self,
        message: NewContactMessage,
    ) -> Result<Vec<ContactMessage>, AppError>;

    // Dashboard queries

    async fn admin_stats(&self) -> Result<AdminStats, AppError>;
    async fn recent_students(&self, limit: i64) -> Result<Vec<StudentWithProfile>, AppError>;
    async fn recent_teachers(&self, limit: i64) -> Result<Vec<TeacherWithProfile>, AppError>;

    async fn student_for_user(&self, user_id: Uuid) -> Result<Option<StudentWithClass>, AppError>;
    /// Assignments for a class with their subject, earliest due first.
    async fn assignments_for_class(
        &self,
        class_id: Uuid,
    ) -> Result<Vec<AssignmentSummary>, AppError>;
    async fn grades_for_student(&self, student_id: Uuid)
    -> Result<Vec<GradeWithSubject>, AppError>;
    async fn attendance_for_student(
        &self,
        student_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Attendance>, AppError>;

    async fn teacher_for_user(&self, user_id: Uuid) -> Result<Option<Teacher>, AppError>;
    async fn class_subjects_for_teacher(
        &self,
        teacher_id: Uuid,
    ) -> Result<Vec<ClassSubjectWithRelations>, AppError>;
    /// Newest first, with class and subject.
    async fn assignments_for_teacher(
        &self,
        teacher_id: Uuid,
        limit: i64,
    ) -> Result<Vec<AssignmentSummary>, AppError>;

    async fn parent_for_user(&self, user_id: Uuid) -> Result<Option<Parent>, AppError>;
    async fn children_of_parent(
        &self,
        parent_id: Uuid,
    ) -> Result<Vec<StudentWithRelations>, AppError>;
    async fn payments_for_students(
        &self,
        student_ids: &[Uuid],
    ) -> Result<Vec<PaymentWithStudent>, AppError>;
}
