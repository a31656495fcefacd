//! Canonical operation-boundary macros
//!
//! Field names come from `goaltrack_core_types::schema`, so callers need
//! `goaltrack-core-types` as a dependency next to `goaltrack-core`.

/// Log the start of an operation
///
/// ```
/// # use goaltrack_core::log_op_start;
/// log_op_start!("mark_complete");
/// log_op_start!("mark_complete", user_id = 42_i64);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = goaltrack_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = goaltrack_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use goaltrack_core::log_op_end;
/// log_op_end!("get_by_date", duration_ms = 3);
/// log_op_end!("get_by_date", duration_ms = 3, row_count = 2_u64);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = goaltrack_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = goaltrack_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// Accepts anything convertible into `ExError`. Errors caused by user input
/// are logged at `warn`; everything else at `error`.
///
/// ```
/// # use goaltrack_core::{log_op_error, GoalTrackError};
/// let err = GoalTrackError::UnregisteredUser { user_id: 7 };
/// log_op_error!("mark_complete", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {
        $crate::log_op_error!($op, $err, duration_ms = $duration,)
    };
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        if ex_err.kind().is_user_error() {
            tracing::warn!(
                component = module_path!(),
                op = $op,
                event = goaltrack_core_types::schema::EVENT_END_ERROR,
                duration_ms = $duration,
                err_kind = ?ex_err.kind(),
                err_code = ex_err.code(),
                err_message = ex_err.message(),
                $($field)*
            );
        } else {
            tracing::error!(
                component = module_path!(),
                op = $op,
                event = goaltrack_core_types::schema::EVENT_END_ERROR,
                duration_ms = $duration,
                err_kind = ?ex_err.kind(),
                err_code = ex_err.code(),
                err_message = ex_err.message(),
                $($field)*
            );
        }
    }};
}
