use std::fmt;
use std::path::PathBuf;

/// Where the record file lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl DataSource {
    /// `http://` and `https://` locations are URLs; anything else is a path.
    #[must_use]
    pub fn parse(location: &str) -> Self {
        let lowered = location.to_ascii_lowercase();
        if lowered.starts_with("http://") || lowered.starts_with("https://") {
            DataSource::Url(location.to_owned())
        } else {
            DataSource::File(PathBuf::from(location))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{url}"),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}
