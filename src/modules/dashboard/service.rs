//! Per-role dashboard aggregates.
//!
//! Each dashboard is keyed by the caller's user id. A caller with no matching
//! student, teacher or parent row gets the record as `null` and empty lists.

use tracing::instrument;
use uuid::Uuid;

use schoolhub_core::AppError;
use schoolhub_db::SchoolStore;
use schoolhub_models::dashboard::{
    AdminDashboard, ParentDashboard, StudentDashboard, TeacherDashboard,
};

const RECENT_LIMIT: i64 = 10;
const ATTENDANCE_LIMIT: i64 = 30;

pub struct DashboardService;

impl DashboardService {
    #[instrument(skip(store))]
    pub async fn admin(store: &dyn SchoolStore) -> Result<AdminDashboard, AppError> {
        let stats = store.admin_stats().await?;
        let recent_students = store.recent_students(RECENT_LIMIT).await?;
        let recent_teachers = store.recent_teachers(RECENT_LIMIT).await?;

        Ok(AdminDashboard {
            stats,
            recent_students,
            recent_teachers,
        })
    }

    #[instrument(skip(store))]
    pub async fn student(
        store: &dyn SchoolStore,
        user_id: Uuid,
    ) -> Result<StudentDashboard, AppError> {
        let Some(student) = store.student_for_user(user_id).await? else {
            return Ok(StudentDashboard {
                student: None,
                assignments: Vec::new(),
                grades: Vec::new(),
                attendance: Vec::new(),
            });
        };

        let assignments = match student.student.class_id {
            Some(class_id) => store.assignments_for_class(class_id).await?,
            None => Vec::new(),
        };
        let grades = store.grades_for_student(student.student.id).await?;
        let attendance = store
            .attendance_for_student(student.student.id, ATTENDANCE_LIMIT)
            .await?;

        Ok(StudentDashboard {
            student: Some(student),
            assignments,
            grades,
            attendance,
        })
    }

    #[instrument(skip(store))]
    pub async fn teacher(
        store: &dyn SchoolStore,
        user_id: Uuid,
    ) -> Result<TeacherDashboard, AppError> {
        let Some(teacher) = store.teacher_for_user(user_id).await? else {
            return Ok(TeacherDashboard {
                teacher: None,
                classes: Vec::new(),
                assignments: Vec::new(),
            });
        };

        let classes = store.class_subjects_for_teacher(teacher.id).await?;
        let assignments = store
            .assignments_for_teacher(teacher.id, RECENT_LIMIT)
            .await?;

        Ok(TeacherDashboard {
            teacher: Some(teacher),
            classes,
            assignments,
        })
    }

    #[instrument(skip(store))]
    pub async fn parent(
        store: &dyn SchoolStore,
        user_id: Uuid,
    ) -> Result<ParentDashboard, AppError> {
        let Some(parent) = store.parent_for_user(user_id).await? else {
            return Ok(ParentDashboard {
                parent: None,
                children: Vec::new(),
                payments: Vec::new(),
            });
        };

        let children = store.children_of_parent(parent.id).await?;
        let student_ids: Vec<Uuid> = children.iter().map(|c| c.student.id).collect();
        let payments = if student_ids.is_empty() {
            Vec::new()
        } else {
            store.payments_for_students(&student_ids).await?
        };

        Ok(ParentDashboard {
            parent: Some(parent),
            children,
            payments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolhub_db::MemoryProvider;
    use schoolhub_models::classes::CreateClassDto;
    use schoolhub_models::payments::CreatePaymentDto;
    use schoolhub_models::students::CreateStudentDto;
    use schoolhub_models::teachers::CreateTeacherDto;

    #[tokio::test]
    async fn test_missing_rows_give_empty_dashboards() {
        let store = MemoryProvider::new();
        let user_id = Uuid::new_v4();

        let student = DashboardService::student(&store, user_id).await.unwrap();
        assert!(student.student.is_none());
        assert!(student.grades.is_empty());

        let teacher = DashboardService::teacher(&store, user_id).await.unwrap();
        assert!(teacher.teacher.is_none());

        let parent = DashboardService::parent(&store, user_id).await.unwrap();
        assert!(parent.parent.is_none());
        assert!(parent.payments.is_empty());
    }

    #[tokio::test]
    async fn test_admin_counts() {
        let store = MemoryProvider::new();
        store
            .create_class(CreateClassDto {
                name: Some("JSS 1A".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        store
            .create_teacher(CreateTeacherDto::default())
            .await
            .unwrap();

        let dashboard = DashboardService::admin(&store).await.unwrap();
        assert_eq!(dashboard.stats.classes, 1);
        assert_eq!(dashboard.stats.teachers, 1);
        assert_eq!(dashboard.stats.students, 0);
        assert_eq!(dashboard.recent_teachers.len(), 1);
    }

    #[tokio::test]
    async fn test_parent_sees_children_payments() {
        let store = MemoryProvider::new();
        let user_id = Uuid::new_v4();
        let parent = store.add_parent(user_id, Some("0800")).await;

        let child = store
            .create_student(CreateStudentDto {
                parent_id: Some(parent.id),
                ..Default::default()
            })
            .await
            .unwrap()
            .remove(0);
        store
            .create_student(CreateStudentDto::default())
            .await
            .unwrap();
        store
            .create_payment(CreatePaymentDto {
                student_id: Some(child.id),
                amount: Some(1500.0),
                ..Default::default()
            })
            .await
            .unwrap();

        let dashboard = DashboardService::parent(&store, user_id).await.unwrap();
        assert_eq!(dashboard.children.len(), 1);
        assert_eq!(dashboard.payments.len(), 1);
        assert_eq!(dashboard.payments[0].payment.student_id, Some(child.id));
    }
}
