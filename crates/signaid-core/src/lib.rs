pub mod fingerspell;
pub mod matcher;
pub mod preprocess;
pub mod vocabulary;
