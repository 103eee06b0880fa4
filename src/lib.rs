//! Craftfolio: a textile-crafts portfolio with a public project showcase,
//! a blog and an admin dashboard for editing projects and the About page.

pub mod errors;
pub mod models;
pub mod server;
pub mod services;
