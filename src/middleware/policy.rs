//! Access policy for the API.
//!
//! Every handler asks one question: may this caller perform this operation on
//! this resource? The answer comes from [`access_for`], and the extractors
//! generated by [`require_access!`](crate::require_access) enforce it before
//! the request body is read.
//!
//! | Resource | Read | Create |
//! |---|---|---|
//! | students | admin, teacher | admin |
//! | teachers | admin | admin |
//! | classes | authenticated | admin |
//! | assignments, grades, attendance | authenticated | teacher, admin |
//! | payments | authenticated | authenticated |
//! | events, blog | public | admin |
//! | contact | nobody | public |
//! | dashboard/{role} | that role | nobody |

use tracing::debug;

use schoolhub_core::AppError;
use schoolhub_models::roles::UserRole;

use crate::metrics::track_authorization_check;
use crate::middleware::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Students,
    Teachers,
    Classes,
    Assignments,
    Grades,
    Attendance,
    Payments,
    Events,
    Blog,
    Contact,
    Dashboard(UserRole),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Create,
}

use Operation::{Create, Read};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Roles(&'static [UserRole]),
}

const ADMIN: &[UserRole] = &[UserRole::Admin];
const STAFF: &[UserRole] = &[UserRole::Admin, UserRole::Teacher];
const NOBODY: &[UserRole] = &[];

fn only(role: UserRole) -> &'static [UserRole] {
    match role {
        UserRole::Student => &[UserRole::Student],
        UserRole::Teacher => &[UserRole::Teacher],
        UserRole::Parent => &[UserRole::Parent],
        UserRole::Admin => &[UserRole::Admin],
    }
}

pub fn access_for(resource: Resource, operation: Operation) -> Access {
    match (resource, operation) {
        (Resource::Students, Read) => Access::Roles(STAFF),
        (Resource::Students, Create) => Access::Roles(ADMIN),
        (Resource::Teachers, _) => Access::Roles(ADMIN),
        (Resource::Classes, Read) => Access::Authenticated,
        (Resource::Classes, Create) => Access::Roles(ADMIN),
        (Resource::Assignments | Resource::Grades | Resource::Attendance, Read) => {
            Access::Authenticated
        }
        (Resource::Assignments | Resource::Grades | Resource::Attendance, Create) => {
            Access::Roles(STAFF)
        }
        (Resource::Payments, _) => Access::Authenticated,
        (Resource::Events | Resource::Blog, Read) => Access::Public,
        (Resource::Events | Resource::Blog, Create) => Access::Roles(ADMIN),
        (Resource::Contact, Create) => Access::Public,
        (Resource::Contact, Read) => Access::Roles(NOBODY),
        (Resource::Dashboard(role), Read) => Access::Roles(only(role)),
        (Resource::Dashboard(_), Create) => Access::Roles(NOBODY),
    }
}

/// 401 without a session where one is needed, 403 when the role is not allowed.
pub fn authorize(
    session: Option<&Session>,
    resource: Resource,
    operation: Operation,
) -> Result<(), AppError> {
    let roles = match access_for(resource, operation) {
        Access::Public => return Ok(()),
        Access::Authenticated if session.is_some() => return Ok(()),
        Access::Authenticated => &[][..],
        Access::Roles(roles) => roles,
    };

    let Some(session) = session else {
        debug!(?resource, ?operation, "Rejected unauthenticated request");
        return Err(AppError::unauthorized("Unauthorized".to_string()));
    };

    let allowed = roles.contains(&session.role);
    track_authorization_check(allowed, session.role.as_str());

    if !allowed {
        debug!(
            user_id = %session.user_id,
            role = %session.role,
            ?resource,
            ?operation,
            "Rejected request for role"
        );
        return Err(AppError::forbidden("Forbidden".to_string()));
    }

    Ok(())
}

/// Declares an extractor that enforces [`access_for`] for one resource and
/// operation, keeping the caller's session (if any) for the handler.
#[macro_export]
macro_rules! require_access {
    ($name:ident, $resource:expr, $operation:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub Option<$crate::middleware::session::Session>);

        impl $name {
            pub fn session(&self) -> Option<&$crate::middleware::session::Session> {
                self.0.as_ref()
            }

            pub fn into_session(
                self,
            ) -> Result<$crate::middleware::session::Session, schoolhub_core::AppError> {
                $crate::middleware::session::require_session(self.0)
            }
        }

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = schoolhub_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                _state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let session = parts
                    .extensions
                    .get::<$crate::middleware::session::Session>()
                    .cloned();

                $crate::middleware::policy::authorize(session.as_ref(), $resource, $operation)?;

                Ok($name(session))
            }
        }
    };
}

require_access!(ReadStudents, Resource::Students, Read);
require_access!(CreateStudents, Resource::Students, Create);

require_access!(ReadTeachers, Resource::Teachers, Read);
require_access!(CreateTeachers, Resource::Teachers, Create);

require_access!(ReadClasses, Resource::Classes, Read);
require_access!(CreateClasses, Resource::Classes, Create);

require_access!(ReadAssignments, Resource::Assignments, Read);
require_access!(CreateAssignments, Resource::Assignments, Create);

require_access!(ReadGrades, Resource::Grades, Read);
require_access!(CreateGrades, Resource::Grades, Create);

require_access!(ReadAttendance, Resource::Attendance, Read);
require_access!(CreateAttendance, Resource::Attendance, Create);

require_access!(ReadPayments, Resource::Payments, Read);
require_access!(CreatePayments, Resource::Payments, Create);

require_access!(ReadEvents, Resource::Events, Read);
require_access!(CreateEvents, Resource::Events, Create);

require_access!(ReadBlog, Resource::Blog, Read);
require_access!(CreateBlog, Resource::Blog, Create);

require_access!(SubmitContact, Resource::Contact, Create);

require_access!(ReadStudentDashboard, Resource::Dashboard(UserRole::Student), Read);
require_access!(ReadTeacherDashboard, Resource::Dashboard(UserRole::Teacher), Read);
require_access!(ReadParentDashboard, Resource::Dashboard(UserRole::Parent), Read);
require_access!(ReadAdminDashboard, Resource::Dashboard(UserRole::Admin), Read);

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use schoolhub_models::auth::SessionUser;
    use uuid::Uuid;

    fn session(role: UserRole) -> Session {
        Session::from(SessionUser {
            id: Uuid::new_v4(),
            email: format!("{}@example.com", role),
            first_name: None,
            last_name: None,
            role,
            avatar_url: None,
        })
    }

    fn status(session: Option<&Session>, resource: Resource, operation: Operation) -> u16 {
        match authorize(session, resource, operation) {
            Ok(()) => 200,
            Err(e) => e.status.as_u16(),
        }
    }

    #[test]
    fn test_missing_session_is_unauthorized() {
        for resource in [
            Resource::Students,
            Resource::Teachers,
            Resource::Classes,
            Resource::Grades,
            Resource::Payments,
        ] {
            let err = authorize(None, resource, Create).unwrap_err();
            assert_eq!(err.status, StatusCode::UNAUTHORIZED);
            assert_eq!(err.message(), "Unauthorized");
        }
    }

    #[test]
    fn test_public_resources() {
        assert_eq!(status(None, Resource::Events, Read), 200);
        assert_eq!(status(None, Resource::Blog, Read), 200);
        assert_eq!(status(None, Resource::Contact, Create), 200);
        assert_eq!(status(None, Resource::Events, Create), 401);
    }

    #[test]
    fn test_staff_only_creates() {
        let teacher = session(UserRole::Teacher);
        let student = session(UserRole::Student);
        let admin = session(UserRole::Admin);

        assert_eq!(status(Some(&teacher), Resource::Grades, Create), 200);
        assert_eq!(status(Some(&admin), Resource::Attendance, Create), 200);
        assert_eq!(status(Some(&student), Resource::Assignments, Create), 403);
        assert_eq!(status(Some(&teacher), Resource::Classes, Create), 403);
        assert_eq!(status(Some(&teacher), Resource::Teachers, Read), 403);
        assert_eq!(status(Some(&teacher), Resource::Students, Read), 200);
        assert_eq!(status(Some(&teacher), Resource::Students, Create), 403);
    }

    #[test]
    fn test_any_session_may_read_and_pay() {
        let parent = session(UserRole::Parent);
        assert_eq!(status(Some(&parent), Resource::Classes, Read), 200);
        assert_eq!(status(Some(&parent), Resource::Payments, Create), 200);
        assert_eq!(status(Some(&parent), Resource::Students, Read), 403);
    }

    #[test]
    fn test_forbidden_message() {
        let parent = session(UserRole::Parent);
        let err = authorize(Some(&parent), Resource::Blog, Create).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.message(), "Forbidden");
    }

    #[test]
    fn test_dashboard_is_role_scoped() {
        for role in UserRole::ALL {
            let caller = session(role);
            for target in UserRole::ALL {
                let expected = if role == target { 200 } else { 403 };
                assert_eq!(
                    status(Some(&caller), Resource::Dashboard(target), Read),
                    expected
                );
            }
        }
    }

    #[test]
    fn test_nobody_reads_contact_messages() {
        let admin = session(UserRole::Admin);
        assert_eq!(status(Some(&admin), Resource::Contact, Read), 403);
    }
}
