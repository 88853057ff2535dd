use failure::Fail;

#[derive(Debug, Fail)]
pub enum DstDatagenError {
    #[fail(display = "Missing resource file '{}'", _0)]
    MissingResource(String),
    #[fail(
        display = "Mismatched vocab format version: file is {} but runner is {}",
        file, runner
    )]
    WrongVocabVersion { file: String, runner: &'static str },
    #[fail(display = "Conflicting value sources: {}", _0)]
    ConfigurationConflict(String),
    #[fail(display = "Internal error: {}", _0)]
    InternalError(String),
}

pub type Result<T> = ::std::result::Result<T, ::failure::Error>;
