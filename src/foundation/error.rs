pub type RepoverseResult<T> = Result<T, RepoverseError>;

#[derive(thiserror::Error, Debug)]
pub enum RepoverseError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RepoverseError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            RepoverseError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            RepoverseError::serde("x")
                .to_string()
                .contains("serialization error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = RepoverseError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
