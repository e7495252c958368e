//! The error taxonomy.
//!
//! Every problem any stage reports is a [`PlackError`]: the fields shared
//! by all errors plus an [`ErrorKind`] naming the phase that found it and
//! carrying that phase's extra context. Handlers receive errors through a
//! single entry point and match on the kind where they care.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::panic::Location;

use plack_ir::{SourceCodeRef, SourceLocation};

use crate::messages::MessageFormatter;
use crate::{ErrorKey, ErrorSeverityLevel};

/// Which phase raised an error, plus phase-specific context.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A source could not be read.
    Read,
    /// External data the processor depends on is unusable. Always fatal.
    ExternalData,
    Tokenizing,
    Parsing,
    Documentation,
    /// A declared constraint was violated.
    Validation { constraint: String },
    Semantic,
    CodeGeneration,
    /// Configuration or environment problem.
    Compiler,
    Runtime,
    /// A defect in the framework itself.
    Internal {
        /// Name of the component that detected the defect, if known.
        origin: Option<String>,
        /// Where the error was constructed.
        call_site: &'static Location<'static>,
    },
}

impl ErrorKind {
    /// Short phase name used in logs and terse output.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::Read => "read error",
            ErrorKind::ExternalData => "external data error",
            ErrorKind::Tokenizing => "tokenizing error",
            ErrorKind::Parsing => "parsing error",
            ErrorKind::Documentation => "documentation error",
            ErrorKind::Validation { .. } => "validation error",
            ErrorKind::Semantic => "semantic error",
            ErrorKind::CodeGeneration => "code generation error",
            ErrorKind::Compiler => "compiler error",
            ErrorKind::Runtime => "runtime error",
            ErrorKind::Internal { .. } => "internal error",
        }
    }

    /// Kinds that conventionally carry an [`ErrorKey`].
    pub fn is_key_bearing(&self) -> bool {
        matches!(
            self,
            ErrorKind::Validation { .. } | ErrorKind::Semantic | ErrorKind::Runtime
        )
    }
}

/// A reported problem.
///
/// Equality: when both errors carry a key, they are equal exactly when
/// the keys are. Otherwise every field takes part.
#[derive(Clone, Debug)]
pub struct PlackError {
    kind: ErrorKind,
    level: ErrorSeverityLevel,
    description: String,
    source_code: Option<SourceCodeRef>,
    location: Option<SourceLocation>,
    key: Option<ErrorKey>,
}

impl PlackError {
    /// Create an error of `kind`.
    ///
    /// `ExternalData` errors are always raised at `Fatal`, whatever `level` says.
    pub fn new(kind: ErrorKind, level: ErrorSeverityLevel, description: impl Into<String>) -> Self {
        let level = if kind == ErrorKind::ExternalData {
            ErrorSeverityLevel::Fatal
        } else {
            level
        };
        PlackError {
            kind,
            level,
            description: description.into(),
            source_code: None,
            location: None,
            key: None,
        }
    }

    pub fn read(level: ErrorSeverityLevel, description: impl Into<String>) -> Self {
        Self::new(ErrorKind::Read, level, description)
    }

    pub fn external_data(description: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExternalData, ErrorSeverityLevel::Fatal, description)
    }

    pub fn tokenizing(level: ErrorSeverityLevel, description: impl Into<String>) -> Self {
        Self::new(ErrorKind::Tokenizing, level, description)
    }

    pub fn parsing(level: ErrorSeverityLevel, description: impl Into<String>) -> Self {
        Self::new(ErrorKind::Parsing, level, description)
    }

    pub fn documentation(level: ErrorSeverityLevel, description: impl Into<String>) -> Self {
        Self::new(ErrorKind::Documentation, level, description)
    }

    pub fn validation(
        level: ErrorSeverityLevel,
        constraint: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let kind = ErrorKind::Validation {
            constraint: constraint.into(),
        };
        Self::new(kind, level, description)
    }

    pub fn semantic(level: ErrorSeverityLevel, description: impl Into<String>) -> Self {
        Self::new(ErrorKind::Semantic, level, description)
    }

    pub fn code_generation(level: ErrorSeverityLevel, description: impl Into<String>) -> Self {
        Self::new(ErrorKind::CodeGeneration, level, description)
    }

    pub fn compiler(level: ErrorSeverityLevel, description: impl Into<String>) -> Self {
        Self::new(ErrorKind::Compiler, level, description)
    }

    pub fn runtime(level: ErrorSeverityLevel, description: impl Into<String>) -> Self {
        Self::new(ErrorKind::Runtime, level, description)
    }

    /// A framework defect, recording the caller's location.
    #[track_caller]
    pub fn internal(level: ErrorSeverityLevel, description: impl Into<String>) -> Self {
        let kind = ErrorKind::Internal {
            origin: None,
            call_site: Location::caller(),
        };
        Self::new(kind, level, description)
    }

    /// Name the component an internal error came from. No effect on other kinds.
    #[must_use]
    pub fn with_origin(mut self, name: impl Into<String>) -> Self {
        if let ErrorKind::Internal { origin, .. } = &mut self.kind {
            *origin = Some(name.into());
        }
        self
    }

    /// Attach the source and location the error refers to.
    #[must_use]
    pub fn at(mut self, source_code: SourceCodeRef, location: SourceLocation) -> Self {
        self.source_code = Some(source_code);
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn in_source(mut self, source_code: SourceCodeRef) -> Self {
        self.source_code = Some(source_code);
        self
    }

    #[must_use]
    pub fn located(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn with_key(mut self, key: ErrorKey) -> Self {
        self.key = Some(key);
        self
    }

    /// Bind a key created before this error existed.
    pub fn set_key(&mut self, key: ErrorKey) {
        self.key = Some(key);
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn level(&self) -> ErrorSeverityLevel {
        self.level
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn source_code(&self) -> Option<&SourceCodeRef> {
        self.source_code.as_ref()
    }

    pub fn location(&self) -> Option<SourceLocation> {
        self.location
    }

    pub fn key(&self) -> Option<&ErrorKey> {
        self.key.as_ref()
    }

    #[inline]
    pub fn is_fatal(&self) -> bool {
        self.level.is_fatal()
    }

    /// Display name of this error's level, resolved through `messages`.
    pub fn level_name(&self, messages: &dyn MessageFormatter) -> String {
        messages.format_optional(self.level.message_key(), &[])
    }
}

impl PartialEq for PlackError {
    fn eq(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (&self.key, &other.key) {
            return a == b;
        }
        self.kind == other.kind
            && self.level == other.level
            && self.description == other.description
            && self.source_code == other.source_code
            && self.location == other.location
            && self.key == other.key
    }
}

impl Eq for PlackError {}

impl Hash for PlackError {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if let Some(key) = &self.key {
            key.hash(state);
            return;
        }
        self.kind.hash(state);
        self.level.hash(state);
        self.description.hash(state);
        self.source_code.hash(state);
        self.location.hash(state);
    }
}

impl fmt::Display for PlackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.source_code, self.location) {
            (Some(source), Some(location)) => write!(
                f,
                "{}:{}: {}: {}",
                source.full_name(),
                location.start_position(),
                self.level,
                self.description
            ),
            (Some(source), None) => {
                write!(f, "{}: {}: {}", source.full_name(), self.level, self.description)
            }
            _ => write!(f, "{}: {}", self.level, self.description),
        }
    }
}
