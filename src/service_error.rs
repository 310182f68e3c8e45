use serde_json::Value;
use thiserror::Error;

/// Fallback text for boundary failures that carry no usable message.
pub const FALLBACK_MESSAGE: &str = "request failed";

/// Uniform error shape for everything that crosses the host-service boundary.
///
/// An unbound capability is a wiring defect (the host has not registered the
/// service yet), distinct from a bound call that fails. Both are cloneable so
/// a single-flight operation can broadcast the same failure to every joined
/// caller.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{capability} is not bound, restart the application")]
    Unbound { capability: &'static str },
    #[error("{message}")]
    Call { message: String },
}

impl ServiceError {
    pub fn unbound(capability: &'static str) -> Self {
        Self::Unbound { capability }
    }

    pub fn call(message: impl Into<String>) -> Self {
        Self::Call {
            message: message.into(),
        }
    }

    /// Collapses a raw boundary failure into one message-bearing error.
    ///
    /// The host bridge reports failures as arbitrary JSON: a bare string, an
    /// object with a `message` field, or anything else. The first two keep
    /// their message; the rest get [`FALLBACK_MESSAGE`].
    pub fn normalize(raw: Value) -> Self {
        match raw {
            Value::String(message) => Self::Call { message },
            Value::Object(mut fields) => match fields.remove("message") {
                Some(Value::String(message)) => Self::Call { message },
                _ => Self::call(FALLBACK_MESSAGE),
            },
            _ => Self::call(FALLBACK_MESSAGE),
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(error: std::io::Error) -> Self {
        Self::call(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_failure_keeps_its_message() {
        let error = ServiceError::normalize(json!("disk full"));
        assert_eq!(error, ServiceError::call("disk full"));
        assert_eq!(error.message(), "disk full");
    }

    #[test]
    fn object_with_message_field_is_unwrapped() {
        let error = ServiceError::normalize(json!({ "message": "sha256 mismatch", "code": 7 }));
        assert_eq!(error.message(), "sha256 mismatch");
    }

    #[test]
    fn object_with_non_string_message_falls_back() {
        let error = ServiceError::normalize(json!({ "message": 42 }));
        assert_eq!(error.message(), FALLBACK_MESSAGE);
    }

    #[test]
    fn arbitrary_values_fall_back() {
        assert_eq!(ServiceError::normalize(json!({})).message(), FALLBACK_MESSAGE);
        assert_eq!(ServiceError::normalize(json!([1, 2])).message(), FALLBACK_MESSAGE);
        assert_eq!(ServiceError::normalize(Value::Null).message(), FALLBACK_MESSAGE);
    }

    #[test]
    fn native_error_passes_message_through() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "binary is read-only");
        let error: ServiceError = io.into();
        assert_eq!(error.message(), "binary is read-only");
    }

    #[test]
    fn unbound_mentions_restart() {
        let error = ServiceError::unbound("install service");
        assert!(error.message().contains("restart"));
        assert_ne!(error, ServiceError::call("install service"));
    }
}
