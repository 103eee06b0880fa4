pub mod about;
pub mod admin;
pub mod blog;
pub mod contact;
pub mod health;
pub mod projects;
pub mod site_content;
