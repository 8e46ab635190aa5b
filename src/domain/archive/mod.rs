pub mod zip_archive;
