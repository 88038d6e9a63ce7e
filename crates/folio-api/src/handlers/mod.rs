pub mod extract_text;
pub mod health;
pub mod parse_resume;
