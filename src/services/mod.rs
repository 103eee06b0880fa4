pub mod auth_service;
pub mod catalog_service;
pub mod categories;
pub mod config_service;
pub mod contact_service;
pub mod content_store;
pub mod dashboard;
pub mod file_service;
pub mod project_editor;
pub mod project_repository;
pub mod seed;
