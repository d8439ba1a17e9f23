pub mod profile;
pub mod template;
pub mod trace_file;
