use std::fmt;

#[derive(Debug, Clone)]
pub enum AchievementsError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Template(String),
    FileOperation(String),
    Validation(String),
    NotFound(String),
    Serialization(String),
}

impl AchievementsError {
    /// Stable error code, used in logs and API payloads.
    pub fn code(&self) -> &'static str {
        match self {
            AchievementsError::DatabaseConfig(_) => "E001",
            AchievementsError::DatabaseConnection(_) => "E002",
            AchievementsError::DatabaseOperation(_) => "E003",
            AchievementsError::Template(_) => "E004",
            AchievementsError::FileOperation(_) => "E005",
            AchievementsError::Validation(_) => "E006",
            AchievementsError::NotFound(_) => "E007",
            AchievementsError::Serialization(_) => "E008",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            AchievementsError::DatabaseConfig(_) => "Database Configuration Error",
            AchievementsError::DatabaseConnection(_) => "Database Connection Error",
            AchievementsError::DatabaseOperation(_) => "Database Operation Error",
            AchievementsError::Template(_) => "Template Rendering Error",
            AchievementsError::FileOperation(_) => "File Operation Error",
            AchievementsError::Validation(_) => "Validation Error",
            AchievementsError::NotFound(_) => "Resource Not Found",
            AchievementsError::Serialization(_) => "Serialization Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AchievementsError::DatabaseConfig(msg) => msg,
            AchievementsError::DatabaseConnection(msg) => msg,
            AchievementsError::DatabaseOperation(msg) => msg,
            AchievementsError::Template(msg) => msg,
            AchievementsError::FileOperation(msg) => msg,
            AchievementsError::Validation(msg) => msg,
            AchievementsError::NotFound(msg) => msg,
            AchievementsError::Serialization(msg) => msg,
        }
    }
}

impl fmt::Display for AchievementsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type(), self.message())
    }
}

impl std::error::Error for AchievementsError {}

impl AchievementsError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        AchievementsError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        AchievementsError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        AchievementsError::DatabaseOperation(msg.into())
    }

    pub fn template<T: Into<String>>(msg: T) -> Self {
        AchievementsError::Template(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        AchievementsError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        AchievementsError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        AchievementsError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        AchievementsError::Serialization(msg.into())
    }
}

impl From<sea_orm::DbErr> for AchievementsError {
    fn from(err: sea_orm::DbErr) -> Self {
        AchievementsError::DatabaseOperation(err.to_string())
    }
}

impl From<askama::Error> for AchievementsError {
    fn from(err: askama::Error) -> Self {
        AchievementsError::Template(err.to_string())
    }
}

impl From<std::io::Error> for AchievementsError {
    fn from(err: std::io::Error) -> Self {
        AchievementsError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for AchievementsError {
    fn from(err: serde_json::Error) -> Self {
        AchievementsError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AchievementsError>;
