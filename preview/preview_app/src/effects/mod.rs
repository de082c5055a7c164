pub mod editor;
pub mod layout;
pub mod manual_edits_file;
pub mod runner;
