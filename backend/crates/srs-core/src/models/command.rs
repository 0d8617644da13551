use serde::{Deserialize, Serialize};

/// Request body for `POST /exec`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub name: String,
    /// Positional arguments, in order. Older clients send this as `args`.
    #[serde(default, alias = "args")]
    pub arguments: Vec<String>,
}

impl Command {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    pub fn with_arguments<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments = arguments.into_iter().map(Into::into).collect();
        self
    }
}
