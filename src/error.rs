use thiserror::Error;

/// Fatal wiring mistakes.
///
/// These surface on first use of a misconfigured connector or combiner
/// and are never retried. The call site has to be fixed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error(
        "Namespace '{connector}' has no state slice. \
         Register its reducer with combine_namespaced_reducers before connecting"
    )]
    MissingNamespace { connector: String },

    #[error(
        "Invalid first argument to combine_connectors: pass each connector entry \
         as its own argument instead of one nested list"
    )]
    InvalidFirstArgument,

    #[error(
        "Invalid argument {index} to combine_connectors: expected a connector entry, \
         got a nested list"
    )]
    InvalidArgument { index: usize },

    #[error(
        "check_config_prerequisite_satisfied needs connector, prop and config names \
         (got connector '{connector}', prop '{prop}', required config '{required}')"
    )]
    MissingPrerequisiteParameter {
        connector: String,
        prop: String,
        required: String,
    },

    #[error(
        "Connector '{connector}' prop '{prop}' requires config value '{required}' to be a string"
    )]
    InvalidConfig {
        connector: String,
        prop: String,
        required: String,
    },

    #[error("Override for prop '{prop}' failed: {message}")]
    Override { prop: String, message: String },
}

impl ConnectError {
    /// Error for prop overrides that reject their inputs.
    pub fn override_failed(prop: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Override {
            prop: prop.into(),
            message: message.into(),
        }
    }
}
