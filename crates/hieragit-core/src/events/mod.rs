use tracing::{error, info, warn};

use crate::errors::HieraError;

pub fn log_app_startup() {
    info!(
        event = "core.app.startup_completed",
        version = env!("CARGO_PKG_VERSION")
    );
}

/// Record a failure that ends the command. User-fixable errors are logged
/// at warn level.
pub fn log_app_error(error: &dyn HieraError) {
    if error.is_user_error() {
        warn!(
            event = "core.app.error_occurred",
            error = %error,
            error_code = error.error_code(),
            user_error = true
        );
    } else {
        error!(
            event = "core.app.error_occurred",
            error = %error,
            error_code = error.error_code(),
            user_error = false
        );
    }
}
