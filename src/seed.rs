//! Demo fixtures for the primary store and the primary-to-sandbox copy.

use crate::error::AppError;
use crate::models::{Account, Assignment, Comment, Course, Enrollment, Role};
use crate::password::make_password;
use crate::{sandbox, store};
use sqlx::sqlite::SqlitePool;
use std::path::Path;

struct DemoAccount {
    username: &'static str,
    password: &'static str,
    email: &'static str,
    role: Role,
    ssn: &'static str,
    credit_card: &'static str,
    phone: &'static str,
    staff: bool,
}

const DEMO_ACCOUNTS: &[DemoAccount] = &[
    DemoAccount {
        username: "admin",
        password: "admin123",
        email: "admin@edulearn.com",
        role: Role::Admin,
        ssn: "123-45-6789",
        credit_card: "4532-1111-2222-3333",
        phone: "+1-555-0001",
        staff: true,
    },
    DemoAccount {
        username: "john.doe",
        password: "john123",
        email: "john@example.com",
        role: Role::Student,
        ssn: "987-65-4321",
        credit_card: "5425-4444-5555-6666",
        phone: "+1-555-0002",
        staff: false,
    },
    DemoAccount {
        username: "jane.smith",
        password: "jane456",
        email: "jane@example.com",
        role: Role::Instructor,
        ssn: "555-12-3456",
        credit_card: "3782-8224-6310-005",
        phone: "+1-555-0003",
        staff: false,
    },
];

struct DemoCourse {
    title: &'static str,
    description: &'static str,
    instructor: &'static str,
    price: f64,
    rating: f64,
    students_count: i64,
    duration: &'static str,
    image_url: &'static str,
    owner: &'static str,
}

const DEMO_COURSES: &[DemoCourse] = &[
    DemoCourse {
        title: "Complete Web Development Bootcamp",
        description: "Master HTML, CSS, JavaScript, React, Node.js",
        instructor: "Dr. Sarah Johnson",
        price: 89.99,
        rating: 4.8,
        students_count: 15420,
        duration: "42 hours",
        image_url: "🌐",
        owner: "jane.smith",
    },
    DemoCourse {
        title: "Data Science with Python",
        description: "Learn Python, Pandas, NumPy, Machine Learning",
        instructor: "Prof. Michael Chen",
        price: 79.99,
        rating: 4.9,
        students_count: 12300,
        duration: "38 hours",
        image_url: "📊",
        owner: "jane.smith",
    },
    DemoCourse {
        title: "Cybersecurity Fundamentals",
        description: "Network Security, Encryption, Ethical Hacking",
        instructor: "Dr. James Miller",
        price: 94.99,
        rating: 4.9,
        students_count: 8500,
        duration: "35 hours",
        image_url: "🔒",
        owner: "admin",
    },
    DemoCourse {
        title: "Digital Marketing Masterclass",
        description: "SEO, Social Media, Content Marketing, Analytics",
        instructor: "Emma Williams",
        price: 69.99,
        rating: 4.7,
        students_count: 9800,
        duration: "28 hours",
        image_url: "📱",
        owner: "admin",
    },
];

pub const DEMO_ACCOUNT_COUNT: usize = DEMO_ACCOUNTS.len();
pub const DEMO_COURSE_COUNT: usize = DEMO_COURSES.len();

/// Get-or-create the demo accounts and courses. Passwords are re-hashed on every run.
pub async fn seed_demo_data(pool: &SqlitePool) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    for a in DEMO_ACCOUNTS {
        sqlx::query(
            "INSERT OR IGNORE INTO users (username, password, email, role, ssn, credit_card, phone, is_staff, is_superuser) \
             VALUES (?, '', ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(a.username)
        .bind(a.email)
        .bind(a.role.as_str())
        .bind(a.ssn)
        .bind(a.credit_card)
        .bind(a.phone)
        .bind(a.staff)
        .bind(a.staff)
        .execute(&mut *tx)
        .await?;
        sqlx::query("UPDATE users SET password = ? WHERE username = ?")
            .bind(make_password(a.password))
            .bind(a.username)
            .execute(&mut *tx)
            .await?;
    }
    tracing::info!(count = DEMO_ACCOUNTS.len(), "demo accounts ready");

    for c in DEMO_COURSES {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM api_course WHERE title = ?)")
            .bind(c.title)
            .fetch_one(&mut *tx)
            .await?;
        if exists {
            continue;
        }
        sqlx::query(
            "INSERT INTO api_course (title, description, instructor, price, rating, students_count, duration, image_url, owner_id) \
             SELECT ?, ?, ?, ?, ?, ?, ?, ?, id FROM users WHERE username = ?",
        )
        .bind(c.title)
        .bind(c.description)
        .bind(c.instructor)
        .bind(c.price)
        .bind(c.rating)
        .bind(c.students_count)
        .bind(c.duration)
        .bind(c.image_url)
        .bind(c.owner)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    tracing::info!(count = DEMO_COURSES.len(), "demo courses ready");
    Ok(())
}

/// Per-table row counts copied by [`sync_sandbox`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub users: usize,
    pub courses: usize,
    pub enrollments: usize,
    pub assignments: usize,
    pub comments: usize,
}

/// Reset the sandbox file and copy every primary row into it, keeping ids.
pub async fn sync_sandbox(primary: &SqlitePool, sandbox_path: &Path) -> Result<SyncReport, AppError> {
    let target = sandbox::recreate(sandbox_path).await?;
    let mut report = SyncReport::default();
    let mut tx = target.begin().await?;

    let users: Vec<Account> = sqlx::query_as("SELECT * FROM users ORDER BY id").fetch_all(primary).await?;
    for u in &users {
        sqlx::query(
            "INSERT OR IGNORE INTO users (id, password, last_login, is_superuser, username, first_name, last_name, \
             email, is_staff, is_active, date_joined, ssn, credit_card, phone, role) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(u.id)
        .bind(&u.password)
        .bind(&u.last_login)
        .bind(u.is_superuser)
        .bind(&u.username)
        .bind(&u.first_name)
        .bind(&u.last_name)
        .bind(&u.email)
        .bind(u.is_staff)
        .bind(u.is_active)
        .bind(&u.date_joined)
        .bind(&u.ssn)
        .bind(&u.credit_card)
        .bind(&u.phone)
        .bind(&u.role)
        .execute(&mut *tx)
        .await?;
    }
    report.users = users.len();

    let courses: Vec<Course> = sqlx::query_as("SELECT * FROM api_course ORDER BY id").fetch_all(primary).await?;
    for c in &courses {
        sqlx::query(
            "INSERT OR IGNORE INTO api_course (id, title, description, instructor, price, rating, students_count, \
             duration, image_url, owner_id, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(c.id)
        .bind(&c.title)
        .bind(&c.description)
        .bind(&c.instructor)
        .bind(c.price)
        .bind(c.rating)
        .bind(c.students_count)
        .bind(&c.duration)
        .bind(&c.image_url)
        .bind(c.owner_id)
        .bind(&c.created_at)
        .execute(&mut *tx)
        .await?;
    }
    report.courses = courses.len();

    let enrollments: Vec<Enrollment> = sqlx::query_as("SELECT * FROM api_enrollment ORDER BY id")
        .fetch_all(primary)
        .await?;
    for e in &enrollments {
        sqlx::query(
            "INSERT OR IGNORE INTO api_enrollment (id, user_id, course_id, enrolled_at, progress) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(e.id)
        .bind(e.user_id)
        .bind(e.course_id)
        .bind(&e.enrolled_at)
        .bind(e.progress)
        .execute(&mut *tx)
        .await?;
    }
    report.enrollments = enrollments.len();

    let assignments: Vec<Assignment> = sqlx::query_as("SELECT * FROM api_assignment ORDER BY id")
        .fetch_all(primary)
        .await?;
    for a in &assignments {
        sqlx::query(
            "INSERT OR IGNORE INTO api_assignment (id, course_id, student_id, title, file, submitted_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(a.id)
        .bind(a.course_id)
        .bind(a.student_id)
        .bind(&a.title)
        .bind(&a.file)
        .bind(&a.submitted_at)
        .execute(&mut *tx)
        .await?;
    }
    report.assignments = assignments.len();

    let comments: Vec<Comment> = sqlx::query_as("SELECT * FROM api_comment ORDER BY id")
        .fetch_all(primary)
        .await?;
    for c in &comments {
        sqlx::query(
            "INSERT OR IGNORE INTO api_comment (id, course_id, user_id, content, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(c.id)
        .bind(c.course_id)
        .bind(c.user_id)
        .bind(&c.content)
        .bind(&c.created_at)
        .execute(&mut *tx)
        .await?;
    }
    report.comments = comments.len();

    tx.commit().await?;
    target.close().await;
    tracing::info!(?report, path = %sandbox_path.display(), "sandbox synced");
    Ok(report)
}

/// Create the primary tables and seed demo data in one step.
pub async fn prepare_primary(pool: &SqlitePool) -> Result<(), AppError> {
    store::ensure_tables(pool).await?;
    seed_demo_data(pool).await
}
