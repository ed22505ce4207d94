use envconfig::Envconfig;
use std::fmt::{Display, Formatter};

#[derive(Envconfig, Clone)] // Intentionally no Debug so the url is not printed
pub struct DatabaseConfig {
    #[envconfig(from = "DATABASE_URL", default = "mongodb://localhost:27017")]
    pub db_url: String,
    #[envconfig(from = "DATABASE_NAME", default = "recordsync")]
    pub db_name: String,
}

impl DatabaseConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            db_url: "mongodb://localhost:27017".to_owned(),
            db_name: "recordsync".to_owned(),
        }
    }
}

impl Display for DatabaseConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "DATABASE_URL: ****")?;
        writeln!(f, "DATABASE_NAME: {}", self.db_name)
    }
}
