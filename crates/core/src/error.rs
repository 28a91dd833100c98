use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Error with sub process `{}`: {}", .program, .original)]
    SubProcess {
        program: String,
        original: std::io::Error,
    },

    #[error("Could not open terminal device `{}`: {}", .path, .original)]
    Terminal {
        path: String,
        original: std::io::Error,
    },

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),

    #[error("Unknown shell `{}`: expected one of `zsh` or `bash`", .0)]
    UnknownShell(String),

    #[error("Invalid keybinding `{}`: {}", .0, .1)]
    InvalidKeybinding(String, &'static str),

    #[error("Invalid program: program may not be empty")]
    EmptyProgram,
}

impl Error {
    pub fn sub_process(program: &str, original: std::io::Error) -> Self {
        Self::SubProcess {
            program: program.to_string(),
            original,
        }
    }

    pub fn terminal(path: &str, original: std::io::Error) -> Self {
        Self::Terminal {
            path: path.to_string(),
            original,
        }
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }
}
