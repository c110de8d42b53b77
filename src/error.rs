pub type Result<T> = core::result::Result<T, Error>;

pub struct Error {
    pub inner: Box<ErrorKind>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Error {
        Error {
            inner: Box::new(kind),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.inner
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self.inner)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error::new(kind)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Error {
        Error::new(ErrorKind::ReqwestError(e))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::new(ErrorKind::SerdeJsonError(e))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::new(ErrorKind::StdIoError(e))
    }
}

pub enum ErrorKind {
    ReqwestError(reqwest::Error),
    SerdeJsonError(serde_json::Error),
    StdIoError(std::io::Error),
    ParseError(String),
    ValidationError(String),
    DuplicateEmail(String),
    InvalidCredentials,
    WorkshopFull(String),
    WorkshopCancelled(String),
    WorkshopNotFound(u32),
    ServerError(String),
}

impl std::fmt::Debug for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            ErrorKind::ReqwestError(ref e) => write!(f, "ReqwestError: {e:?}"),
            ErrorKind::SerdeJsonError(ref e) => write!(f, "SerdeJsonError: {e:?}"),
            ErrorKind::StdIoError(ref e) => write!(f, "StdIoError: {e:?}"),
            ErrorKind::ParseError(ref e) => write!(f, "ParseError: {e:?}"),
            ErrorKind::ValidationError(ref e) => write!(f, "ValidationError: {e:?}"),
            ErrorKind::DuplicateEmail(ref e) => write!(f, "DuplicateEmail: {e:?}"),
            ErrorKind::InvalidCredentials => write!(f, "InvalidCredentials"),
            ErrorKind::WorkshopFull(ref e) => write!(f, "WorkshopFull: {e:?}"),
            ErrorKind::WorkshopCancelled(ref e) => write!(f, "WorkshopCancelled: {e:?}"),
            ErrorKind::WorkshopNotFound(id) => write!(f, "WorkshopNotFound: {id}"),
            ErrorKind::ServerError(ref e) => write!(f, "ServerError: {e:?}"),
        }
    }
}

// Display strings are what the view shows the user after a failed action,
// so they read as messages rather than as wrapped debug output.
impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            ErrorKind::ReqwestError(ref e) => write!(f, "network error: {e}"),
            ErrorKind::SerdeJsonError(ref e) => write!(f, "malformed data: {e}"),
            ErrorKind::StdIoError(ref e) => write!(f, "storage error: {e}"),
            ErrorKind::ParseError(ref e) => write!(f, "{e}"),
            ErrorKind::ValidationError(ref e) => write!(f, "{e}"),
            ErrorKind::DuplicateEmail(ref e) => write!(f, "{e} is already registered"),
            ErrorKind::InvalidCredentials => write!(f, "invalid email or password"),
            ErrorKind::WorkshopFull(ref e) => write!(f, "no seats left in {e}"),
            ErrorKind::WorkshopCancelled(ref e) => write!(f, "{e} has been cancelled"),
            ErrorKind::WorkshopNotFound(id) => write!(f, "workshop {id} not found"),
            ErrorKind::ServerError(ref e) => write!(f, "{e}"),
        }
    }
}
