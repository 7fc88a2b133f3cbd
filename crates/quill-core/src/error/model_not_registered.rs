use super::Error;

/// Error when a model name cannot be resolved through the registry.
#[derive(Debug)]
pub(super) struct ModelNotRegistered {
    name: Box<str>,
}

impl std::error::Error for ModelNotRegistered {}

impl core::fmt::Display for ModelNotRegistered {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "model `{}` is not registered", self.name)
    }
}

impl Error {
    pub fn model_not_registered(name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ModelNotRegistered(ModelNotRegistered {
            name: name.into().into(),
        }))
    }

    pub fn is_model_not_registered(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::ModelNotRegistered(_)))
    }
}
