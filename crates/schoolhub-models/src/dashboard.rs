//! Aggregated dashboard payloads and page views.

use serde::Serialize;
use utoipa::ToSchema;

use crate::assignments::AssignmentSummary;
use crate::attendance::Attendance;
use crate::auth::SessionUser;
use crate::classes::ClassSubjectWithRelations;
use crate::grades::GradeWithSubject;
use crate::parents::Parent;
use crate::payments::PaymentWithStudent;
use crate::roles::UserRole;
use crate::students::{StudentWithClass, StudentWithProfile, StudentWithRelations};
use crate::teachers::{Teacher, TeacherWithProfile};

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct AdminStats {
    pub students: i64,
    pub teachers: i64,
    pub classes: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub stats: AdminStats,
    pub recent_students: Vec<StudentWithProfile>,
    pub recent_teachers: Vec<TeacherWithProfile>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentDashboard {
    pub student: Option<StudentWithClass>,
    pub assignments: Vec<AssignmentSummary>,
    pub grades: Vec<GradeWithSubject>,
    pub attendance: Vec<Attendance>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherDashboard {
    pub teacher: Option<Teacher>,
    pub classes: Vec<ClassSubjectWithRelations>,
    pub assignments: Vec<AssignmentSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ParentDashboard {
    pub parent: Option<Parent>,
    pub children: Vec<StudentWithRelations>,
    pub payments: Vec<PaymentWithStudent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SidebarLink {
    pub href: String,
    pub label: String,
}

/// A role dashboard page: who is looking and where they can go next.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardPage {
    pub role: UserRole,
    pub title: String,
    pub user: SessionUser,
    pub sidebar: Vec<SidebarLink>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PublicPage {
    pub path: String,
    pub title: String,
}

/// Sections of each role's dashboard, overview first.
pub fn sidebar_for(role: UserRole) -> Vec<SidebarLink> {
    let sections: &[(&str, &str)] = match role {
        UserRole::Student => &[
            ("", "Overview"),
            ("classes", "My Classes"),
            ("assignments", "Assignments"),
            ("results", "Results"),
            ("attendance", "Attendance"),
        ],
        UserRole::Teacher => &[
            ("", "Overview"),
            ("classes", "My Classes"),
            ("grading", "Grading"),
        ],
        UserRole::Parent => &[
            ("", "Overview"),
            ("children", "My Children"),
            ("payments", "Payments"),
        ],
        UserRole::Admin => &[
            ("", "Overview"),
            ("teachers", "Teachers"),
            ("classes", "Classes"),
            ("analytics", "Analytics"),
        ],
    };

    let root = role.dashboard_path();
    sections
        .iter()
        .map(|(segment, label)| SidebarLink {
            href: if segment.is_empty() {
                root.clone()
            } else {
                format!("{}/{}", root, segment)
            },
            label: label.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidebar_starts_at_dashboard_root() {
        for role in UserRole::ALL {
            let links = sidebar_for(role);
            assert_eq!(links[0].href, role.dashboard_path());
            assert!(links.iter().all(|l| l.href.starts_with(&role.dashboard_path())));
        }
    }

    #[test]
    fn test_parent_sidebar() {
        let hrefs: Vec<_> = sidebar_for(UserRole::Parent)
            .into_iter()
            .map(|l| l.href)
            .collect();
        assert_eq!(
            hrefs,
            vec![
                "/dashboard/parent",
                "/dashboard/parent/children",
                "/dashboard/parent/payments"
            ]
        );
    }
}
