use crate::controller::Characteristic;

/// All error types that can occur when talking to the lighting daemon or
/// handling a bridge characteristic request.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The bus could not be reached for the current call. Fatal for the
    /// operation; callers decide whether to retry.
    #[error("bus transport error during {action}: {message}")]
    Transport { action: String, message: String },

    /// The remote object does not speak the expected interface, or replied
    /// with something the interface does not allow.
    #[error("protocol error at {path} ({interface}): {message}")]
    Protocol {
        path: String,
        interface: String,
        message: String,
    },

    /// The serial is not (or no longer) registered with the daemon.
    #[error("device {0} is not registered with the daemon")]
    DeviceNotFound(String),

    /// A bridge-side characteristic value was of the wrong kind or outside
    /// its valid range.
    #[error("invalid value for {characteristic}: {value}")]
    InvalidValue {
        characteristic: Characteristic,
        value: String,
    },
}

impl Error {
    /// Create a new transport error
    pub fn transport(action: &str, message: impl ToString) -> Self {
        Error::Transport {
            action: action.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a new protocol error
    pub fn protocol(path: &str, interface: &str, message: impl ToString) -> Self {
        Error::Protocol {
            path: path.to_string(),
            interface: interface.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a new invalid value error
    pub fn invalid_value(characteristic: Characteristic, value: impl ToString) -> Self {
        Error::InvalidValue {
            characteristic,
            value: value.to_string(),
        }
    }
}

/// Hacky implementation of PartialEq for testing
#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}
