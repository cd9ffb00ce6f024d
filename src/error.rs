use thiserror::Error;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("item has no price marker: {line:?}")]
    MissingPrice { line: String },

    #[error("item price is not a number: {line:?}")]
    UnreadablePrice { line: String },

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("failed to parse config file: {0}")]
    ConfigFile(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MenuError {
    pub fn config(message: impl Into<String>) -> Self {
        MenuError::Config {
            message: message.into(),
        }
    }

    /// Per-item defects that leave the rest of the document usable.
    pub fn is_malformed_item(&self) -> bool {
        matches!(
            self,
            MenuError::MissingPrice { .. } | MenuError::UnreadablePrice { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, MenuError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_item_classification() {
        let missing = MenuError::MissingPrice {
            line: "Soup of the day\n".into(),
        };
        assert!(missing.is_malformed_item());
        assert!(missing.to_string().contains("Soup of the day"));
        assert!(!MenuError::config("bad port").is_malformed_item());
    }
}
