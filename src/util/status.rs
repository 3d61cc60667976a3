use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Code {
    Ok,
    /// A garbage-collection rule violated a construction invariant
    /// (zero version count, sub-millisecond age, empty combinator).
    InvalidRule,
    /// A rule descriptor could not be decoded (unknown kind, missing
    /// required parameter).
    MalformedRule,
    NotFound,
    AlreadyExists,
    InvalidArgument,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    code: Code,
    message: Option<String>,
}

impl Status {
    pub fn ok() -> Self {
        Status {
            code: Code::Ok,
            message: None,
        }
    }

    pub fn invalid_rule(msg: impl Into<String>) -> Self {
        Status {
            code: Code::InvalidRule,
            message: Some(msg.into()),
        }
    }

    pub fn malformed_rule(msg: impl Into<String>) -> Self {
        Status {
            code: Code::MalformedRule,
            message: Some(msg.into()),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Status {
            code: Code::NotFound,
            message: Some(msg.into()),
        }
    }

    pub fn already_exists(msg: impl Into<String>) -> Self {
        Status {
            code: Code::AlreadyExists,
            message: Some(msg.into()),
        }
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Status {
            code: Code::InvalidArgument,
            message: Some(msg.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == Code::Ok
    }

    pub fn is_invalid_rule(&self) -> bool {
        self.code == Code::InvalidRule
    }

    pub fn is_malformed_rule(&self) -> bool {
        self.code == Code::MalformedRule
    }

    pub fn is_not_found(&self) -> bool {
        self.code == Code::NotFound
    }

    pub fn is_already_exists(&self) -> bool {
        self.code == Code::AlreadyExists
    }

    pub fn is_invalid_argument(&self) -> bool {
        self.code == Code::InvalidArgument
    }

    pub fn code(&self) -> &Code {
        &self.code
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{:?}: {}", self.code, msg),
            None => write!(f, "{:?}", self.code),
        }
    }
}

impl std::error::Error for Status {}

impl From<serde_json::Error> for Status {
    fn from(err: serde_json::Error) -> Self {
        Status::malformed_rule(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Status>;
