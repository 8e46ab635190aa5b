pub mod path_error;
pub mod source_file_path;
