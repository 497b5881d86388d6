use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Where the query text comes from. Inline text wins over a path.
pub struct QueryInput {
    pub path: Option<PathBuf>,
    pub text: Option<String>,
}

impl QueryInput {
    pub fn new(path: Option<PathBuf>, text: Option<String>) -> Self {
        Self { path, text }
    }
}

/// Loaded query text and the name to show in diagnostics.
#[derive(Debug)]
pub struct QuerySource {
    pub text: String,
    pub name: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("query is required: use positional argument, `-` for stdin, or -q/--query")]
    Missing,

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("failed to read '{path}': {source}")]
    File {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("query cannot be empty")]
    Empty,
}

pub fn load_query_source(input: &QueryInput) -> Result<QuerySource, LoadError> {
    let source = match (&input.text, &input.path) {
        (Some(text), _) => QuerySource {
            text: text.clone(),
            name: None,
        },
        (None, Some(path)) if path.as_os_str() == "-" => load_stdin()?,
        (None, Some(path)) => load_file(path)?,
        (None, None) => return Err(LoadError::Missing),
    };

    if source.text.trim().is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(source)
}

fn load_stdin() -> Result<QuerySource, LoadError> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(LoadError::Stdin)?;
    Ok(QuerySource {
        text: buf,
        name: Some("<stdin>".to_string()),
    })
}

fn load_file(path: &Path) -> Result<QuerySource, LoadError> {
    let name = path.to_string_lossy().into_owned();
    let text = fs::read_to_string(path).map_err(|source| LoadError::File {
        path: name.clone(),
        source,
    })?;
    Ok(QuerySource {
        text,
        name: Some(name),
    })
}
