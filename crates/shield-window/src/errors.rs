#[derive(Debug, thiserror::Error)]
pub enum ShieldError {
    #[error("window server connection error: {0}")]
    Connection(String),

    #[error("space error: {0}")]
    Space(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_error_display() {
        let err = ShieldError::Connection("no session".into());
        assert_eq!(
            err.to_string(),
            "window server connection error: no session"
        );
    }

    #[test]
    fn space_error_display() {
        let err = ShieldError::Space("create returned 0".into());
        assert_eq!(err.to_string(), "space error: create returned 0");
    }
}
