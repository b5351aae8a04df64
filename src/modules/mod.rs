pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod blog;
pub mod classes;
pub mod contact;
pub mod dashboard;
pub mod events;
pub mod grades;
pub mod pages;
pub mod payments;
pub mod students;
pub mod teachers;
