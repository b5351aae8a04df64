//! Provider tests against a real database. Run with
//! `cargo test -- --ignored` and `DATABASE_URL` pointing at PostgreSQL.

use sqlx::PgPool;

use schoolhub_db::{IdentityProvider, PgProvider, SchoolStore};
use schoolhub_models::auth::{SignUp, UserMetadata};
use schoolhub_models::classes::CreateClassDto;
use schoolhub_models::contact::NewContactMessage;
use schoolhub_models::grades::CreateGradeDto;
use schoolhub_models::payments::{CreatePaymentDto, PaymentStatus};
use schoolhub_models::roles::UserRole;

fn sign_up(email: &str, role: UserRole) -> SignUp {
    SignUp {
        email: email.to_string(),
        password_hash: "not-a-real-hash".to_string(),
        metadata: UserMetadata {
            first_name: Some("Chidi".to_string()),
            last_name: Some("Okafor".to_string()),
            role: Some(role.as_str().to_string()),
        },
        role,
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_sign_up_writes_profile(pool: PgPool) {
    let provider = PgProvider::new(pool);

    let user = provider
        .sign_up(sign_up("chidi@example.com", UserRole::Teacher))
        .await
        .unwrap();
    assert_eq!(user.user_metadata.role.as_deref(), Some("teacher"));

    let profile = provider.get_profile(user.id).await.unwrap().unwrap();
    assert_eq!(profile.role, Some(UserRole::Teacher));
    assert_eq!(profile.first_name.as_deref(), Some("Chidi"));

    let found = provider
        .find_user_by_email("chidi@example.com")
        .await
        .unwrap();
    assert_eq!(found.map(|u| u.id), Some(user.id));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_duplicate_sign_up_is_bad_request(pool: PgPool) {
    let provider = PgProvider::new(pool);

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

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_email_lookup_and_uniqueness_ignore_case(pool: PgPool) {
    let provider = PgProvider::new(pool);

    let user = provider
        .sign_up(sign_up("Amaka@Example.com", UserRole::Parent))
        .await
        .unwrap();

    let found = provider
        .find_user_by_email("amaka@example.com")
        .await
        .unwrap();
    assert_eq!(found.map(|u| u.id), Some(user.id));

    let err = provider
        .sign_up(sign_up("amaka@example.com", UserRole::Parent))
        .await
        .unwrap_err();
    assert_eq!(err.status.as_u16(), 400);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_classes_sorted_by_name(pool: PgPool) {
    let provider = PgProvider::new(pool);

    for name in ["SSS 2 A", "JSS 3 B", "JSS 1 A"] {
        provider
            .create_class(CreateClassDto {
                name: Some(name.to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    let names: Vec<String> = provider
        .list_classes()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.class.name)
        .collect();
    assert_eq!(names, vec!["JSS 1 A", "JSS 3 B", "SSS 2 A"]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_class_without_name_is_server_error(pool: PgPool) {
    let provider = PgProvider::new(pool);

    let err = provider
        .create_class(CreateClassDto::default())
        .await
        .unwrap_err();

    assert_eq!(err.status.as_u16(), 500);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_grade_and_payment_defaults(pool: PgPool) {
    let provider = PgProvider::new(pool);

    let grades = provider
        .create_grade(CreateGradeDto {
            term: Some("Second Term".to_string()),
            score: Some(64.0),
            grade: Some("D".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(grades.len(), 1);
    assert_eq!(grades[0].grade.as_deref(), Some("D"));

    let payments = provider
        .create_payment(CreatePaymentDto {
            amount: Some(12500.0),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(payments[0].status, PaymentStatus::Pending);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_contact_message_round_trip(pool: PgPool) {
    let provider = PgProvider::new(pool.clone());

    let rows = provider
        .create_contact_message(NewContactMessage {
            name: "Amaka".to_string(),
            email: "amaka@example.com".to_string(),
            subject: "Fees".to_string(),
            message: "Is there a discount for siblings?".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(rows[0].subject, "Fees");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contact_messages")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}
