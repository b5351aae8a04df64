use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use schoolhub_models::assignments::{Assignment, AssignmentWithRelations, CreateAssignmentDto};
use schoolhub_models::attendance::{
    Attendance, AttendanceStatus, AttendanceWithRelations, CreateAttendanceDto,
};
use schoolhub_models::auth::{
    LoginRequest, LoginResponse, LogoutResponse, RegisterRequest, RegisterResponse,
    SessionResponse, SessionUser,
};
use schoolhub_models::blog::{BlogPost, BlogPostWithAuthor, CreateBlogPostDto};
use schoolhub_models::classes::{Class, ClassWithTeacher, CreateClassDto, Subject};
use schoolhub_models::contact::{ContactMessage, ContactMessageDto, ContactResponse};
use schoolhub_models::dashboard::{
    AdminDashboard, AdminStats, DashboardPage, ParentDashboard, PublicPage, SidebarLink,
    StudentDashboard, TeacherDashboard,
};
use schoolhub_models::events::{CreateEventDto, Event, EventWithCreator};
use schoolhub_models::grades::{CreateGradeDto, Grade, GradeWithRelations};
use schoolhub_models::payments::{CreatePaymentDto, Payment, PaymentStatus, PaymentWithStudent};
use schoolhub_models::roles::UserRole;
use schoolhub_models::students::{CreateStudentDto, Student, StudentStatus, StudentWithRelations};
use schoolhub_models::teachers::{CreateTeacherDto, Teacher, TeacherStatus, TeacherWithContact};

use crate::modules::auth::controller::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::session,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::create_student,
        crate::modules::teachers::controller::get_teachers,
        crate::modules::teachers::controller::create_teacher,
        crate::modules::classes::controller::get_classes,
        crate::modules::classes::controller::create_class,
        crate::modules::assignments::controller::get_assignments,
        crate::modules::assignments::controller::create_assignment,
        crate::modules::grades::controller::get_grades,
        crate::modules::grades::controller::create_grade,
        crate::modules::attendance::controller::get_attendance,
        crate::modules::attendance::controller::create_attendance,
        crate::modules::payments::controller::get_payments,
        crate::modules::payments::controller::create_payment,
        crate::modules::events::controller::get_events,
        crate::modules::events::controller::create_event,
        crate::modules::blog::controller::get_posts,
        crate::modules::blog::controller::create_post,
        crate::modules::contact::controller::submit_contact,
        crate::modules::dashboard::controller::admin_dashboard,
        crate::modules::dashboard::controller::student_dashboard,
        crate::modules::dashboard::controller::teacher_dashboard,
        crate::modules::dashboard::controller::parent_dashboard,
        crate::modules::pages::controller::public_page,
        crate::modules::pages::controller::dashboard_page,
        crate::modules::pages::controller::dashboard_section,
    ),
    components(
        schemas(
            ErrorResponse,
            UserRole,
            SessionUser,
            LoginRequest,
            LoginResponse,
            RegisterRequest,
            RegisterResponse,
            LogoutResponse,
            SessionResponse,
            Student,
            StudentStatus,
            StudentWithRelations,
            CreateStudentDto,
            Teacher,
            TeacherStatus,
            TeacherWithContact,
            CreateTeacherDto,
            Class,
            ClassWithTeacher,
            CreateClassDto,
            Subject,
            Assignment,
            AssignmentWithRelations,
            CreateAssignmentDto,
            Grade,
            GradeWithRelations,
            CreateGradeDto,
            Attendance,
            AttendanceStatus,
            AttendanceWithRelations,
            CreateAttendanceDto,
            Payment,
            PaymentStatus,
            PaymentWithStudent,
            CreatePaymentDto,
            Event,
            EventWithCreator,
            CreateEventDto,
            BlogPost,
            BlogPostWithAuthor,
            CreateBlogPostDto,
            ContactMessage,
            ContactMessageDto,
            ContactResponse,
            AdminStats,
            AdminDashboard,
            StudentDashboard,
            TeacherDashboard,
            ParentDashboard,
            DashboardPage,
            SidebarLink,
            PublicPage,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login, registration and the session snapshot"),
        (name = "Students", description = "Student records"),
        (name = "Teachers", description = "Teacher records"),
        (name = "Classes", description = "Classes and their class teachers"),
        (name = "Assignments", description = "Assignments per class and subject"),
        (name = "Grades", description = "Grades, with letters derived from scores"),
        (name = "Attendance", description = "Daily attendance"),
        (name = "Payments", description = "Fee payments"),
        (name = "Events", description = "School events"),
        (name = "Blog", description = "Published posts"),
        (name = "Contact", description = "Public contact form"),
        (name = "Dashboard", description = "Per-role dashboard data"),
        (name = "Pages", description = "Page views and dashboard navigation")
    ),
    info(
        title = "SchoolHub API",
        version = "0.1.0",
        description = "School management backend: role dashboards, records and session handling, built with Rust, Axum and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
