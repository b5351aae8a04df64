use tracing::instrument;
use uuid::Uuid;

use schoolhub_core::AppError;
use schoolhub_models::assignments::{
    Assignment, AssignmentSummary, AssignmentWithRelations, CreateAssignmentDto,
};
use schoolhub_models::attendance::{Attendance, AttendanceWithRelations, CreateAttendanceDto};
use schoolhub_models::blog::{BlogPost, BlogPostWithAuthor, CreateBlogPostDto};
use schoolhub_models::classes::{Class, ClassSubjectWithRelations, ClassWithTeacher, CreateClassDto};
use schoolhub_models::contact::{ContactMessage, NewContactMessage};
use schoolhub_models::dashboard::AdminStats;
use schoolhub_models::events::{CreateEventDto, Event, EventWithCreator};
use schoolhub_models::grades::{CreateGradeDto, Grade, GradeWithRelations, GradeWithSubject};
use schoolhub_models::parents::Parent;
use schoolhub_models::payments::{CreatePaymentDto, Payment, PaymentWithStudent};
use schoolhub_models::students::{
    CreateStudentDto, Student, StudentWithClass, StudentWithProfile, StudentWithRelations,
};
use schoolhub_models::teachers::{CreateTeacherDto, Teacher, TeacherWithContact, TeacherWithProfile};

use super::PgProvider;
use crate::provider::SchoolStore;

/// Student rows with `profiles(first_name, last_name, email)` and `classes(name)`.
/// Callers append `WHERE` / `ORDER BY`.
const STUDENTS_WITH_RELATIONS: &str = r#"
    SELECT s.*,
           CASE WHEN p.id IS NULL THEN NULL ELSE jsonb_build_object(
               'first_name', p.first_name, 'last_name', p.last_name, 'email', p.email
           ) END AS profiles,
           CASE WHEN c.id IS NULL THEN NULL ELSE jsonb_build_object('name', c.name) END AS classes
    FROM students s
    LEFT JOIN profiles p ON p.id = s.user_id
    LEFT JOIN classes c ON c.id = s.class_id
"#;

/// Payment rows with `students(profiles(first_name, last_name))`.
const PAYMENTS_WITH_STUDENT: &str = r#"
    SELECT pay.*,
           CASE WHEN s.id IS NULL THEN NULL ELSE jsonb_build_object(
               'profiles', CASE WHEN sp.id IS NULL THEN NULL ELSE jsonb_build_object(
                   'first_name', sp.first_name, 'last_name', sp.last_name
               ) END
           ) END AS students
    FROM payments pay
    LEFT JOIN students s ON s.id = pay.student_id
    LEFT JOIN profiles sp ON sp.id = s.user_id
"#;

#[async_trait::async_trait]
impl SchoolStore for PgProvider {
    #[instrument(skip(self))]
    async fn list_students(&self) -> Result<Vec<StudentWithRelations>, AppError> {
        let sql = format!("{STUDENTS_WITH_RELATIONS} ORDER BY s.created_at DESC");
        let rows = sqlx::query_as::<_, StudentWithRelations>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    #[instrument(skip(self, dto))]
    async fn create_student(&self, dto: CreateStudentDto) -> Result<Vec<Student>, AppError> {
        let rows = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (user_id, admission_number, class_id, parent_id, date_of_birth)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(dto.user_id)
        .bind(dto.admission_number)
        .bind(dto.class_id)
        .bind(dto.parent_id)
        .bind(dto.date_of_birth)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn list_teachers(&self) -> Result<Vec<TeacherWithContact>, AppError> {
        let rows = sqlx::query_as::<_, TeacherWithContact>(
            r#"
            SELECT t.*,
                   CASE WHEN p.id IS NULL THEN NULL ELSE jsonb_build_object(
                       'first_name', p.first_name, 'last_name', p.last_name, 'email', p.email
                   ) END AS profiles
            FROM teachers t
            LEFT JOIN profiles p ON p.id = t.user_id
            ORDER BY t.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[instrument(skip(self, dto))]
    async fn create_teacher(&self, dto: CreateTeacherDto) -> Result<Vec<Teacher>, AppError> {
        let rows = sqlx::query_as::<_, Teacher>(
            r#"
            INSERT INTO teachers (user_id, employee_id, specialization, qualification)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(dto.user_id)
        .bind(dto.employee_id)
        .bind(dto.specialization)
        .bind(dto.qualification)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn list_classes(&self) -> Result<Vec<ClassWithTeacher>, AppError> {
        let rows = sqlx::query_as::<_, ClassWithTeacher>(
            r#"
            SELECT c.*,
                   CASE WHEN t.id IS NULL THEN NULL ELSE jsonb_build_object(
                       'profiles', CASE WHEN tp.id IS NULL THEN NULL ELSE jsonb_build_object(
                           'first_name', tp.first_name, 'last_name', tp.last_name
                       ) END
                   ) END AS teachers
            FROM classes c
            LEFT JOIN teachers t ON t.id = c.class_teacher_id
            LEFT JOIN profiles tp ON tp.id = t.user_id
            ORDER BY c.name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[instrument(skip(self, dto))]
    async fn create_class(&self, dto: CreateClassDto) -> Result<Vec<Class>, AppError> {
        let rows = sqlx::query_as::<_, Class>(
            r#"
            INSERT INTO classes (name, level, class_teacher_id, capacity, academic_year)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(dto.name)
        .bind(dto.level)
        .bind(dto.class_teacher_id)
        .bind(dto.capacity)
        .bind(dto.academic_year)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn list_assignments(&self) -> Result<Vec<AssignmentWithRelations>, AppError> {
        let rows = sqlx::query_as::<_, AssignmentWithRelations>(
            r#"
            SELECT a.*,
                   CASE WHEN sub.id IS NULL THEN NULL ELSE to_jsonb(sub.*) END AS subjects,
                   CASE WHEN c.id IS NULL THEN NULL ELSE to_jsonb(c.*) END AS classes,
                   CASE WHEN t.id IS NULL THEN NULL ELSE jsonb_build_object(
                       'profiles', CASE WHEN tp.id IS NULL THEN NULL ELSE jsonb_build_object(
                           'first_name', tp.first_name, 'last_name', tp.last_name
                       ) END
                   ) END AS teachers
            FROM assignments a
            LEFT JOIN subjects sub ON sub.id = a.subject_id
            LEFT JOIN classes c ON c.id = a.class_id
            LEFT JOIN teachers t ON t.id = a.teacher_id
            LEFT JOIN profiles tp ON tp.id = t.user_id
            ORDER BY a.due_date ASC NULLS LAST
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[instrument(skip(self, dto))]
    async fn create_assignment(
        &self,
        dto: CreateAssignmentDto,
    ) -> Result<Vec<Assignment>, AppError> {
        let rows = sqlx::query_as::<_, Assignment>(
            r#"
            INSERT INTO assignments (title, description, subject_id, class_id, teacher_id, due_date, file_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(dto.title)
        .bind(dto.description)
        .bind(dto.subject_id)
        .bind(dto.class_id)
        .bind(dto.teacher_id)
        .bind(dto.due_date)
        .bind(dto.file_url)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn list_grades(&self) -> Result<Vec<GradeWithRelations>, AppError> {
        let rows = sqlx::query_as::<_, GradeWithRelations>(
            r#"
            SELECT g.*,
                   CASE WHEN s.id IS NULL THEN NULL ELSE jsonb_build_object(
                       'profiles', CASE WHEN sp.id IS NULL THEN NULL ELSE jsonb_build_object(
                           'first_name', sp.first_name, 'last_name', sp.last_name
                       ) END
                   ) END AS students,
                   CASE WHEN sub.id IS NULL THEN NULL ELSE to_jsonb(sub.*) END AS subjects,
                   CASE WHEN t.id IS NULL THEN NULL ELSE jsonb_build_object(
                       'profiles', CASE WHEN tp.id IS NULL THEN NULL ELSE jsonb_build_object(
                           'first_name', tp.first_name, 'last_name', tp.last_name
                       ) END
                   ) END AS teachers
            FROM grades g
            LEFT JOIN students s ON s.id = g.student_id
            LEFT JOIN profiles sp ON sp.id = s.user_id
            LEFT JOIN subjects sub ON sub.id = g.subject_id
            LEFT JOIN teachers t ON t.id = g.teacher_id
            LEFT JOIN profiles tp ON tp.id = t.user_id
            ORDER BY g.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[instrument(skip(self, dto))]
    async fn create_grade(&self, dto: CreateGradeDto) -> Result<Vec<Grade>, AppError> {
        let rows = sqlx::query_as::<_, Grade>(
            r#"
            INSERT INTO grades (student_id, subject_id, teacher_id, term, score, grade)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(dto.student_id)
        .bind(dto.subject_id)
        .bind(dto.teacher_id)
        .bind(dto.term)
        .bind(dto.score)
        .bind(dto.grade)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn list_attendance(&self) -> Result<Vec<AttendanceWithRelations>, AppError> {
        let rows = sqlx::query_as::<_, AttendanceWithRelations>(
            r#"
            SELECT att.*,
                   CASE WHEN s.id IS NULL THEN NULL ELSE jsonb_build_object(
                       'profiles', CASE WHEN sp.id IS NULL THEN NULL ELSE jsonb_build_object(
                           'first_name', sp.first_name, 'last_name', sp.last_name
                       ) END
                   ) END AS students,
                   CASE WHEN c.id IS NULL THEN NULL ELSE jsonb_build_object('name', c.name) END AS classes
            FROM attendance att
            LEFT JOIN students s ON s.id = att.student_id
            LEFT JOIN profiles sp ON sp.id = s.user_id
            LEFT JOIN classes c ON c.id = att.class_id
            ORDER BY att.date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[instrument(skip(self, dto))]
    async fn create_attendance(
        &self,
        dto: CreateAttendanceDto,
    ) -> Result<Vec<Attendance>, AppError> {
        let rows = sqlx::query_as::<_, Attendance>(
            r#"
            INSERT INTO attendance (student_id, class_id, date, status, remarks)
            VALUES ($1, $2, COALESCE($3, CURRENT_DATE), COALESCE($4, 'present'::attendance_status), $5)
            RETURNING *
            "#,
        )
        .bind(dto.student_id)
        .bind(dto.class_id)
        .bind(dto.date)
        .bind(dto.status)
        .bind(dto.remarks)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn list_payments(&self) -> Result<Vec<PaymentWithStudent>, AppError> {
        let sql = format!("{PAYMENTS_WITH_STUDENT} ORDER BY pay.created_at DESC");
        let rows = sqlx::query_as::<_, PaymentWithStudent>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    #[instrument(skip(self, dto))]
    async fn create_payment(&self, dto: CreatePaymentDto) -> Result<Vec<Payment>, AppError> {
        let rows = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (student_id, amount, description, reference_number, status)
            VALUES ($1, $2, $3, $4, 'pending')
            RETURNING *
            "#,
        )
        .bind(dto.student_id)
        .bind(dto.amount)
        .bind(dto.description)
        .bind(dto.reference_number)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn list_events(&self) -> Result<Vec<EventWithCreator>, AppError> {
        let rows = sqlx::query_as::<_, EventWithCreator>(
            r#"
            SELECT e.*,
                   CASE WHEN p.id IS NULL THEN NULL ELSE jsonb_build_object(
                       'first_name', p.first_name, 'last_name', p.last_name
                   ) END AS creator
            FROM events e
            LEFT JOIN profiles p ON p.id = e.created_by
            ORDER BY e.event_date ASC NULLS LAST
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[instrument(skip(self, dto))]
    async fn create_event(
        &self,
        dto: CreateEventDto,
        created_by: Uuid,
    ) -> Result<Vec<Event>, AppError> {
        let rows = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (title, description, event_date, location, image_url, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(dto.title)
        .bind(dto.description)
        .bind(dto.event_date)
        .bind(dto.location)
        .bind(dto.image_url)
        .bind(created_by)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn list_published_posts(&self) -> Result<Vec<BlogPostWithAuthor>, AppError> {
        let rows = sqlx::query_as::<_, BlogPostWithAuthor>(
            r#"
            SELECT b.*,
                   CASE WHEN p.id IS NULL THEN NULL ELSE jsonb_build_object(
                       'first_name', p.first_name, 'last_name', p.last_name
                   ) END AS author
            FROM blog_posts b
            LEFT JOIN profiles p ON p.id = b.author_id
            WHERE b.published = TRUE
            ORDER BY b.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[instrument(skip(self, dto))]
    async fn create_post(
        &self,
        dto: CreateBlogPostDto,
        author_id: Uuid,
    ) -> Result<Vec<BlogPost>, AppError> {
        let rows = sqlx::query_as::<_, BlogPost>(
            r#"
            INSERT INTO blog_posts (title, content, featured_image_url, published, author_id)
            VALUES ($1, $2, $3, COALESCE($4, FALSE), $5)
            RETURNING *
            "#,
        )
        .bind(dto.title)
        .bind(dto.content)
        .bind(dto.featured_image_url)
        .bind(dto.published)
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[instrument(skip(self, message))]
    async fn create_contact_message(
        &self,
        message: NewContactMessage,
    ) -> Result<Vec<ContactMessage>, AppError> {
        let rows = sqlx::query_as::<_, ContactMessage>(
            r#"
            INSERT INTO contact_messages (name, email, subject, message)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(message.name)
        .bind(message.email)
        .bind(message.subject)
        .bind(message.message)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn admin_stats(&self) -> Result<AdminStats, AppError> {
        let (students, teachers, classes) = sqlx::query_as::<_, (i64, i64, i64)>(
            r#"
            SELECT (SELECT COUNT(*) FROM students),
                   (SELECT COUNT(*) FROM teachers),
                   (SELECT COUNT(*) FROM classes)
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(AdminStats {
            students,
            teachers,
            classes,
        })
    }

    async fn recent_students(&self, limit: i64) -> Result<Vec<StudentWithProfile>, AppError> {
        let rows = sqlx::query_as::<_, StudentWithProfile>(
            r#"
            SELECT s.*, CASE WHEN p.id IS NULL THEN NULL ELSE to_jsonb(p.*) END AS profiles
            FROM students s
            LEFT JOIN profiles p ON p.id = s.user_id
            ORDER BY s.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn recent_teachers(&self, limit: i64) -> Result<Vec<TeacherWithProfile>, AppError> {
        let rows = sqlx::query_as::<_, TeacherWithProfile>(
            r#"
            SELECT t.*, CASE WHEN p.id IS NULL THEN NULL ELSE to_jsonb(p.*) END AS profiles
            FROM teachers t
            LEFT JOIN profiles p ON p.id = t.user_id
            ORDER BY t.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn student_for_user(&self, user_id: Uuid) -> Result<Option<StudentWithClass>, AppError> {
        let row = sqlx::query_as::<_, StudentWithClass>(
            r#"
            SELECT s.*, CASE WHEN c.id IS NULL THEN NULL ELSE to_jsonb(c.*) END AS classes
            FROM students s
            LEFT JOIN classes c ON c.id = s.class_id
            WHERE s.user_id = $1
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn assignments_for_class(
        &self,
        class_id: Uuid,
    ) -> Result<Vec<AssignmentSummary>, AppError> {
        let rows = sqlx::query_as::<_, AssignmentSummary>(
            r#"
            SELECT a.*,
                   NULL::jsonb AS classes,
                   CASE WHEN sub.id IS NULL THEN NULL ELSE to_jsonb(sub.*) END AS subjects
            FROM assignments a
            LEFT JOIN subjects sub ON sub.id = a.subject_id
            WHERE a.class_id = $1
            ORDER BY a.due_date ASC NULLS LAST
            "#,
        )
        .bind(class_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn grades_for_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<GradeWithSubject>, AppError> {
        let rows = sqlx::query_as::<_, GradeWithSubject>(
            r#"
            SELECT g.*, CASE WHEN sub.id IS NULL THEN NULL ELSE to_jsonb(sub.*) END AS subjects
            FROM grades g
            LEFT JOIN subjects sub ON sub.id = g.subject_id
            WHERE g.student_id = $1
            ORDER BY g.created_at DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn attendance_for_student(
        &self,
        student_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Attendance>, AppError> {
        let rows = sqlx::query_as::<_, Attendance>(
            "SELECT * FROM attendance WHERE student_id = $1 ORDER BY date DESC LIMIT $2",
        )
        .bind(student_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn teacher_for_user(&self, user_id: Uuid) -> Result<Option<Teacher>, AppError> {
        let row = sqlx::query_as::<_, Teacher>("SELECT * FROM teachers WHERE user_id = $1 LIMIT 1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn class_subjects_for_teacher(
        &self,
        teacher_id: Uuid,
    ) -> Result<Vec<ClassSubjectWithRelations>, AppError> {
        let rows = sqlx::query_as::<_, ClassSubjectWithRelations>(
            r#"
            SELECT CASE WHEN c.id IS NULL THEN NULL ELSE to_jsonb(c.*) END AS classes,
                   CASE WHEN sub.id IS NULL THEN NULL ELSE to_jsonb(sub.*) END AS subjects
            FROM class_subjects cs
            LEFT JOIN classes c ON c.id = cs.class_id
            LEFT JOIN subjects sub ON sub.id = cs.subject_id
            WHERE cs.teacher_id = $1
            "#,
        )
        .bind(teacher_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn assignments_for_teacher(
        &self,
        teacher_id: Uuid,
        limit: i64,
    ) -> Result<Vec<AssignmentSummary>, AppError> {
        let rows = sqlx::query_as::<_, AssignmentSummary>(
            r#"
            SELECT a.*,
                   CASE WHEN c.id IS NULL THEN NULL ELSE to_jsonb(c.*) END AS classes,
                   CASE WHEN sub.id IS NULL THEN NULL ELSE to_jsonb(sub.*) END AS subjects
            FROM assignments a
            LEFT JOIN classes c ON c.id = a.class_id
            LEFT JOIN subjects sub ON sub.id = a.subject_id
            WHERE a.teacher_id = $1
            ORDER BY a.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(teacher_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn parent_for_user(&self, user_id: Uuid) -> Result<Option<Parent>, AppError> {
        let row = sqlx::query_as::<_, Parent>("SELECT * FROM parents WHERE user_id = $1 LIMIT 1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn children_of_parent(
        &self,
        parent_id: Uuid,
    ) -> Result<Vec<StudentWithRelations>, AppError> {
        let sql = format!("{STUDENTS_WITH_RELATIONS} WHERE s.parent_id = $1 ORDER BY s.created_at DESC");
        let rows = sqlx::query_as::<_, StudentWithRelations>(&sql)
            .bind(parent_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn payments_for_students(
        &self,
        student_ids: &[Uuid],
    ) -> Result<Vec<PaymentWithStudent>, AppError> {
        let sql = format!(
            "{PAYMENTS_WITH_STUDENT} WHERE pay.student_id = ANY($1) ORDER BY pay.created_at DESC"
        );
        let rows = sqlx::query_as::<_, PaymentWithStudent>(&sql)
            .bind(student_ids.to_vec())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}
