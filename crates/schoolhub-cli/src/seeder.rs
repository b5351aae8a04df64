//! Fake school data for development databases.
//!
//! Every seeded account uses the email domain [`SEED_EMAIL_DOMAIN`] and the
//! password [`SEED_PASSWORD`], and every seeded subject code starts with
//! `SEED-`, so [`clear_seeded_data`] can remove exactly what was seeded.

use std::time::Instant;

use bcrypt::hash;
use chrono::NaiveDate;
use fake::Fake;
use fake::faker::company::en::Profession;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use rayon::prelude::*;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

use schoolhub_models::auth::UserMetadata;
use schoolhub_models::roles::UserRole;

pub const SEED_EMAIL_DOMAIN: &str = "seed.schoolhub.test";
pub const SEED_PASSWORD: &str = "password123";

const CLASS_LEVELS: [&str; 6] = ["JSS 1", "JSS 2", "JSS 3", "SSS 1", "SSS 2", "SSS 3"];
const SUBJECTS: [(&str, &str); 6] = [
    ("Mathematics", "SEED-MTH"),
    ("English Language", "SEED-ENG"),
    ("Basic Science", "SEED-BSC"),
    ("Social Studies", "SEED-SOS"),
    ("Computer Studies", "SEED-CMP"),
    ("Civic Education", "SEED-CVE"),
];
const ACADEMIC_YEAR: &str = "2025/2026";

// 5 params per row, well under the 65535 bind limit
const BATCH_SIZE: usize = 1000;

#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub teachers: usize,
    pub parents: usize,
    pub classes: usize,
    pub students_per_class: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            teachers: 8,
            parents: 40,
            classes: 6,
            students_per_class: 20,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub teachers: usize,
    pub parents: usize,
    pub classes: usize,
    pub subjects: usize,
    pub students: usize,
}

#[derive(Debug, Clone)]
pub struct PersonSeed {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: UserRole,
}

/// Generates `count` people for one role across all cores.
pub fn generate_people(role: UserRole, count: usize) -> Vec<PersonSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let email = format!(
                "{}.{}+{}{}@{}",
                slug(&first_name),
                slug(&last_name),
                role.as_str(),
                idx,
                SEED_EMAIL_DOMAIN
            );

            PersonSeed {
                first_name,
                last_name,
                email,
                role,
            }
        })
        .collect()
}

fn slug(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

/// `JSS 1 A`, `JSS 2 A`, ... then `JSS 1 B` once every level has an arm.
pub fn class_name(idx: usize) -> String {
    let level = CLASS_LEVELS[idx % CLASS_LEVELS.len()];
    let arm = (b'A' + (idx / CLASS_LEVELS.len() % 26) as u8) as char;
    format!("{} {}", level, arm)
}

fn date_of_birth(idx: usize) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(
        2009 + (idx % 7) as i32,
        1 + (idx % 12) as u32,
        1 + (idx % 28) as u32,
    )
}

/// Seeds teachers, parents, classes, subjects and students in one transaction.
pub async fn seed_all(db: &PgPool, config: SeedConfig) -> anyhow::Result<SeedSummary> {
    let start_time = Instant::now();

    println!("🌱 Starting database seeding...");
    println!(
        "   - {} teachers, {} parents, {} classes x {} students",
        config.teachers, config.parents, config.classes, config.students_per_class
    );

    // One cheap hash shared by every seeded account
    let password_hash = hash(SEED_PASSWORD, 4)?;

    let gen_start = Instant::now();
    let teachers = generate_people(UserRole::Teacher, config.teachers);
    let parents = generate_people(UserRole::Parent, config.parents);
    let students = generate_people(UserRole::Student, config.classes * config.students_per_class);
    println!(
        "   ✓ Generated {} people in {:?}",
        teachers.len() + parents.len() + students.len(),
        gen_start.elapsed()
    );

    let mut tx = db.begin().await?;

    let teacher_user_ids = insert_people(&mut tx, &teachers, &password_hash).await?;
    let parent_user_ids = insert_people(&mut tx, &parents, &password_hash).await?;
    let student_user_ids = insert_people(&mut tx, &students, &password_hash).await?;

    let teacher_ids = insert_teachers(&mut tx, &teacher_user_ids).await?;
    let parent_ids = insert_parents(&mut tx, &parent_user_ids).await?;
    let subject_ids = upsert_subjects(&mut tx).await?;
    let class_ids = insert_classes(&mut tx, config.classes, &teacher_ids).await?;
    link_class_subjects(&mut tx, &class_ids, &subject_ids, &teacher_ids).await?;
    let student_ids = insert_students(
        &mut tx,
        &student_user_ids,
        &class_ids,
        config.students_per_class,
        &parent_ids,
    )
    .await?;

    tx.commit().await?;

    let summary = SeedSummary {
        teachers: teacher_ids.len(),
        parents: parent_ids.len(),
        classes: class_ids.len(),
        subjects: subject_ids.len(),
        students: student_ids.len(),
    };

    println!("\n✅ Seeding complete in {:?}", start_time.elapsed());
    println!("   {:?}", summary);
    println!("\n📝 Password for all seeded users: {}", SEED_PASSWORD);

    Ok(summary)
}

/// Inserts identity records and their profile rows, in input order.
async fn insert_people(
    tx: &mut Transaction<'_, Postgres>,
    people: &[PersonSeed],
    password_hash: &str,
) -> Result<Vec<Uuid>, sqlx::Error> {
    let mut all_ids = Vec::with_capacity(people.len());

    for chunk in people.chunks(BATCH_SIZE) {
        let mut users = QueryBuilder::<Postgres>::new(
            "INSERT INTO auth_users (email, password_hash, user_metadata) ",
        );
        users.push_values(chunk, |mut row, person| {
            row.push_bind(&person.email)
                .push_bind(password_hash)
                .push_bind(Json(UserMetadata {
                    first_name: Some(person.first_name.clone()),
                    last_name: Some(person.last_name.clone()),
                    role: Some(person.role.as_str().to_string()),
                }));
        });
        users.push(" RETURNING id");
        let ids: Vec<Uuid> = users
            .build_query_scalar()
            .fetch_all(&mut **tx)
            .await?;

        let mut profiles = QueryBuilder::<Postgres>::new(
            "INSERT INTO profiles (id, email, first_name, last_name, role) ",
        );
        profiles.push_values(ids.iter().zip(chunk), |mut row, (id, person)| {
            row.push_bind(*id)
                .push_bind(&person.email)
                .push_bind(&person.first_name)
                .push_bind(&person.last_name)
                .push_bind(person.role);
        });
        profiles.build().execute(&mut **tx).await?;

        all_ids.extend(ids);
    }

    Ok(all_ids)
}

async fn insert_teachers(
    tx: &mut Transaction<'_, Postgres>,
    user_ids: &[Uuid],
) -> Result<Vec<Uuid>, sqlx::Error> {
    if user_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = QueryBuilder::<Postgres>::new(
        "INSERT INTO teachers (user_id, employee_id, specialization, qualification) ",
    );
    query.push_values(user_ids.iter().enumerate(), |mut row, (idx, user_id)| {
        let (subject, _) = SUBJECTS[idx % SUBJECTS.len()];
        row.push_bind(*user_id)
            .push_bind(format!("SEED-EMP-{}", &user_id.simple().to_string()[..8]))
            .push_bind(subject)
            .push_bind("B.Ed");
    });
    query.push(" RETURNING id");

    query.build_query_scalar().fetch_all(&mut **tx).await
}

async fn insert_parents(
    tx: &mut Transaction<'_, Postgres>,
    user_ids: &[Uuid],
) -> Result<Vec<Uuid>, sqlx::Error> {
    if user_ids.is_empty() {
        return Ok(Vec::new());
    }

    let details: Vec<(String, String)> = user_ids
        .par_iter()
        .map(|_| (PhoneNumber().fake(), Profession().fake()))
        .collect();

    let mut query = QueryBuilder::<Postgres>::new(
        "INSERT INTO parents (user_id, phone, occupation) ",
    );
    query.push_values(user_ids.iter().zip(details), |mut row, (user_id, (phone, occupation))| {
        row.push_bind(*user_id).push_bind(phone).push_bind(occupation);
    });
    query.push(" RETURNING id");

    query.build_query_scalar().fetch_all(&mut **tx).await
}

async fn upsert_subjects(tx: &mut Transaction<'_, Postgres>) -> Result<Vec<Uuid>, sqlx::Error> {
    let mut query = QueryBuilder::<Postgres>::new("INSERT INTO subjects (name, code) ");
    query.push_values(SUBJECTS, |mut row, (name, code)| {
        row.push_bind(name).push_bind(code);
    });
    query.push(" ON CONFLICT (code) DO UPDATE SET name = EXCLUDED.name RETURNING id");

    query.build_query_scalar().fetch_all(&mut **tx).await
}

async fn insert_classes(
    tx: &mut Transaction<'_, Postgres>,
    count: usize,
    teacher_ids: &[Uuid],
) -> Result<Vec<Uuid>, sqlx::Error> {
    if count == 0 {
        return Ok(Vec::new());
    }

    let mut query = QueryBuilder::<Postgres>::new(
        "INSERT INTO classes (name, level, class_teacher_id, capacity, academic_year) ",
    );
    query.push_values(0..count, |mut row, idx| {
        let class_teacher = (!teacher_ids.is_empty()).then(|| teacher_ids[idx % teacher_ids.len()]);
        row.push_bind(class_name(idx))
            .push_bind(CLASS_LEVELS[idx % CLASS_LEVELS.len()])
            .push_bind(class_teacher)
            .push_bind(40_i32)
            .push_bind(ACADEMIC_YEAR);
    });
    query.push(" RETURNING id");

    query.build_query_scalar().fetch_all(&mut **tx).await
}

async fn link_class_subjects(
    tx: &mut Transaction<'_, Postgres>,
    class_ids: &[Uuid],
    subject_ids: &[Uuid],
    teacher_ids: &[Uuid],
) -> Result<(), sqlx::Error> {
    let links: Vec<(Uuid, Uuid, Option<Uuid>)> = class_ids
        .iter()
        .enumerate()
        .flat_map(|(class_idx, class_id)| {
            subject_ids
                .iter()
                .enumerate()
                .map(move |(subject_idx, subject_id)| {
                    let teacher = (!teacher_ids.is_empty())
                        .then(|| teacher_ids[(class_idx + subject_idx) % teacher_ids.len()]);
                    (*class_id, *subject_id, teacher)
                })
        })
        .collect();

    for chunk in links.chunks(BATCH_SIZE) {
        let mut query = QueryBuilder::<Postgres>::new(
            "INSERT INTO class_subjects (class_id, subject_id, teacher_id) ",
        );
        query.push_values(chunk, |mut row, (class_id, subject_id, teacher_id)| {
            row.push_bind(*class_id)
                .push_bind(*subject_id)
                .push_bind(*teacher_id);
        });
        query.push(" ON CONFLICT (class_id, subject_id) DO NOTHING");
        query.build().execute(&mut **tx).await?;
    }

    Ok(())
}

async fn insert_students(
    tx: &mut Transaction<'_, Postgres>,
    user_ids: &[Uuid],
    class_ids: &[Uuid],
    per_class: usize,
    parent_ids: &[Uuid],
) -> Result<Vec<Uuid>, sqlx::Error> {
    let mut all_ids = Vec::with_capacity(user_ids.len());

    for (chunk_idx, chunk) in user_ids.chunks(BATCH_SIZE).enumerate() {
        let mut query = QueryBuilder::<Postgres>::new(
            "INSERT INTO students (user_id, admission_number, class_id, parent_id, date_of_birth) ",
        );
        query.push_values(chunk.iter().enumerate(), |mut row, (offset, user_id)| {
            let idx = chunk_idx * BATCH_SIZE + offset;
            let class_id = class_ids.get(idx / per_class.max(1)).copied();
            let parent_id = (!parent_ids.is_empty()).then(|| parent_ids[idx % parent_ids.len()]);

            row.push_bind(*user_id)
                .push_bind(format!("SEED-ADM-{}", &user_id.simple().to_string()[..8]))
                .push_bind(class_id)
                .push_bind(parent_id)
                .push_bind(date_of_birth(idx));
        });
        query.push(" RETURNING id");

        let ids: Vec<Uuid> = query.build_query_scalar().fetch_all(&mut **tx).await?;
        all_ids.extend(ids);
    }

    Ok(all_ids)
}

/// Removes seeded accounts (cascading to their teacher, parent and student
/// rows), the classes they taught and the seeded subjects.
pub async fn clear_seeded_data(db: &PgPool) -> anyhow::Result<u64> {
    let domain = format!("%@{}", SEED_EMAIL_DOMAIN);
    let mut tx = db.begin().await?;

    sqlx::query(
        r#"DELETE FROM classes WHERE class_teacher_id IN (
               SELECT t.id FROM teachers t
               JOIN auth_users u ON u.id = t.user_id
               WHERE u.email LIKE $1
           )"#,
    )
    .bind(&domain)
    .execute(&mut *tx)
    .await?;

    let users = sqlx::query("DELETE FROM auth_users WHERE email LIKE $1")
        .bind(&domain)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    sqlx::query("DELETE FROM subjects WHERE code LIKE 'SEED-%'")
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(users)
}
