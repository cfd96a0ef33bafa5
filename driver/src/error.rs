use error_stack::Report;
use sea_orm::{DbErr, RuntimeErr};
use sqlx::migrate::MigrateError;

use kernel::KernelError;

pub(crate) trait ConvertError {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, KernelError>;
}

/// A write against an owner that no longer exists trips the `books.owner_id`
/// foreign key, which is the same as not finding the owner.
fn classify(error: &sqlx::Error) -> KernelError {
    match error {
        sqlx::Error::RowNotFound => KernelError::NotFound,
        sqlx::Error::Database(e) if e.is_foreign_key_violation() => KernelError::NotFound,
        _ => KernelError::StorageFailure,
    }
}

impl<T> ConvertError for Result<T, sqlx::Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            let context = classify(&error);
            let timed_out = matches!(error, sqlx::Error::PoolTimedOut);
            let report = Report::from(error).change_context(context);
            if timed_out {
                report.attach_printable("Timed out while waiting for a pooled connection")
            } else {
                report
            }
        })
    }
}

impl<T> ConvertError for Result<T, DbErr> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            let context = match &error {
                DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => KernelError::NotFound,
                DbErr::Conn(RuntimeErr::SqlxError(e))
                | DbErr::Exec(RuntimeErr::SqlxError(e))
                | DbErr::Query(RuntimeErr::SqlxError(e)) => classify(e),
                _ => KernelError::StorageFailure,
            };
            Report::from(error).change_context(context)
        })
    }
}

impl<T> ConvertError for Result<T, MigrateError> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| Report::from(error).change_context(KernelError::StorageFailure))
    }
}

impl<T> ConvertError for Result<T, dotenvy::Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| Report::from(error).change_context(KernelError::StorageFailure))
    }
}
