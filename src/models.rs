//! Row types for the primary tables and the JSON views handed out by the API.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Instructor,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Instructor => "instructor",
            Role::Admin => "admin",
        }
    }
}

/// Full `users` row. PII columns are stored in plaintext.
#[derive(Clone, Debug, FromRow, Serialize)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub ssn: Option<String>,
    pub credit_card: Option<String>,
    pub phone: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_active: bool,
    pub date_joined: NaiveDateTime,
    pub last_login: Option<NaiveDateTime>,
}

/// Profile shape returned by registration, profile lookup and user listing.
#[derive(Clone, Debug, Serialize)]
pub struct AccountView {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub ssn: Option<String>,
    pub credit_card: Option<String>,
    pub phone: Option<String>,
}

impl From<Account> for AccountView {
    fn from(a: Account) -> Self {
        Self {
            id: a.id,
            username: a.username,
            email: a.email,
            role: a.role,
            ssn: a.ssn,
            credit_card: a.credit_card,
            phone: a.phone,
        }
    }
}

/// Bulk export record; includes the stored password hash.
#[derive(Clone, Debug, Serialize)]
pub struct ExportRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub ssn: Option<String>,
    pub credit_card: Option<String>,
}

impl From<Account> for ExportRecord {
    fn from(a: Account) -> Self {
        Self {
            id: a.id,
            username: a.username,
            email: a.email,
            password: a.password,
            ssn: a.ssn,
            credit_card: a.credit_card,
        }
    }
}

#[derive(Clone, Debug, FromRow, Serialize)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub price: f64,
    pub rating: f64,
    pub students_count: i64,
    pub duration: String,
    pub image_url: String,
    #[serde(rename = "owner")]
    pub owner_id: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, FromRow, Serialize)]
pub struct Enrollment {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub enrolled_at: NaiveDateTime,
    pub progress: i64,
}

#[derive(Clone, Debug, FromRow, Serialize)]
pub struct Assignment {
    pub id: i64,
    pub course_id: i64,
    pub student_id: i64,
    pub title: String,
    pub file: String,
    pub submitted_at: NaiveDateTime,
}

#[derive(Clone, Debug, FromRow, Serialize)]
pub struct Comment {
    pub id: i64,
    pub course_id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: NaiveDateTime,
}

/// Comment joined with its author's username.
#[derive(Clone, Debug, FromRow, Serialize)]
pub struct CommentView {
    pub id: i64,
    pub user: String,
    pub content: String,
}

/// Enrollment joined with the course title.
#[derive(Clone, Debug, FromRow, Serialize)]
pub struct EnrollmentView {
    pub id: i64,
    pub course_id: i64,
    pub course_title: String,
    pub progress: i64,
    pub enrolled_at: NaiveDateTime,
}
