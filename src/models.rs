// src/models.rs

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub timestamp: String, // stored as "YYYY-MM-DD HH:MM:SS"
    pub message: String,
}
