use std::fmt;

pub const DEFAULT_HOST: &str = "github.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: u64,
    pub login: String,
    pub host: String,
}

impl Account {
    pub fn new(id: u64, login: impl Into<String>) -> Self {
        Self {
            id,
            login: login.into(),
            host: DEFAULT_HOST.to_string(),
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn is_dotcom(&self) -> bool {
        self.host.eq_ignore_ascii_case(DEFAULT_HOST)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dotcom() {
            write!(f, "{}", self.login)
        } else {
            write!(f, "{}@{}", self.login, self.host)
        }
    }
}
