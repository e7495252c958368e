//! Named filter stages and pipeline configuration.
//!
//! A pipeline is described by an ordered list of stage names. The
//! registry maps each name to a factory, so an unknown name is caught when
//! the pipeline is built, before any token is read.

use std::sync::Arc;

use plack_diagnostic::{ErrorHandler, ErrorSeverityLevel, MessageFormatter, Messages, PlackError};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{FilterTokenizer, NullFilter, PrintFilter, RemoveInvalidCharacters, Shell};

/// What a stage factory may hand to the stage it builds.
#[derive(Clone)]
pub struct StageContext {
    pub handler: Arc<dyn ErrorHandler>,
    pub messages: Arc<dyn MessageFormatter>,
}

impl StageContext {
    /// Context reporting to `handler` with the English messages.
    pub fn new(handler: Arc<dyn ErrorHandler>) -> Self {
        StageContext {
            handler,
            messages: Arc::new(Messages::english()),
        }
    }
}

/// Pipeline configuration rejected before tokenizing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StageConfigError {
    #[error("unknown tokenizer stage `{name}`")]
    UnknownStage { name: String },
}

impl StageConfigError {
    /// The error as a framework defect for an [`ErrorHandler`].
    ///
    /// Stage configuration is part of the program, so a bad name is an
    /// internal error rather than a problem in the user's source.
    #[track_caller]
    pub fn into_internal_error(self, messages: &dyn MessageFormatter) -> PlackError {
        match self {
            StageConfigError::UnknownStage { name } => PlackError::internal(
                ErrorSeverityLevel::Fatal,
                messages.format_optional("pipeline.unknown-stage", &[&name]),
            )
            .with_origin("StageRegistry"),
        }
    }
}

type StageFactory = Box<dyn Fn(&StageContext) -> Box<dyn FilterTokenizer> + Send + Sync>;

/// Name to factory map for filter stages.
#[derive(Default)]
pub struct StageRegistry {
    factories: FxHashMap<String, StageFactory>,
}

impl StageRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        StageRegistry::default()
    }

    /// `null`, `remove-invalid-characters` and `print`.
    pub fn standard() -> Self {
        let mut registry = StageRegistry::new();
        registry.register("null", |_| Box::new(NullFilter::pass_through()));
        registry.register("remove-invalid-characters", |context| {
            Box::new(RemoveInvalidCharacters::with_messages(
                Arc::clone(&context.handler),
                Arc::clone(&context.messages),
            ))
        });
        registry.register("print", |_| Box::new(PrintFilter::stdout()));
        registry
    }

    /// Register `factory` under `name`, replacing any earlier one.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&StageContext) -> Box<dyn FilterTokenizer> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Check that every name in `names` is registered.
    pub fn validate<S: AsRef<str>>(&self, names: &[S]) -> Result<(), StageConfigError> {
        match names.iter().find(|name| !self.contains(name.as_ref())) {
            Some(name) => Err(StageConfigError::UnknownStage {
                name: name.as_ref().to_owned(),
            }),
            None => Ok(()),
        }
    }

    /// Build the stages named in `names`, in order.
    ///
    /// Nothing is built unless every name is registered.
    pub fn build_stages<S: AsRef<str>>(
        &self,
        names: &[S],
        context: &StageContext,
    ) -> Result<Vec<Box<dyn FilterTokenizer>>, StageConfigError> {
        self.validate(names)?;
        Ok(names
            .iter()
            .filter_map(|name| self.factories.get(name.as_ref()))
            .map(|factory| factory(context))
            .collect())
    }

    /// An uninitialized [`Shell`] over the stages named in `names`.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn build_shell<S: AsRef<str>>(
        &self,
        names: &[S],
        context: &StageContext,
    ) -> Result<Shell, StageConfigError> {
        let stages = self.build_stages(names, context)?;
        debug!(
            stages = ?names.iter().map(|name| name.as_ref()).collect::<Vec<&str>>(),
            "built tokenizer pipeline"
        );
        Ok(Shell::new(stages))
    }
}

/// Ordered filter stages of a tokenizer pipeline, by registry name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PipelineConfig {
    pub stages: Vec<String>,
}

impl PipelineConfig {
    pub fn new(stages: impl IntoIterator<Item = impl Into<String>>) -> Self {
        PipelineConfig {
            stages: stages.into_iter().map(Into::into).collect(),
        }
    }

    pub fn validate(&self, registry: &StageRegistry) -> Result<(), StageConfigError> {
        registry.validate(&self.stages)
    }

    pub fn build_shell(
        &self,
        registry: &StageRegistry,
        context: &StageContext,
    ) -> Result<Shell, StageConfigError> {
        registry.build_shell(&self.stages, context)
    }
}
