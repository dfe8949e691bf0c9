pub mod projects;
pub mod static_files;
pub mod system;
