use std::str::FromStr;

use sea_orm::DbErr;

use crate::server::error::internal::InternalError;

/// Parses a stored snake_case enumeration column into its typed variant.
///
/// Used by `from_entity` conversions at the repository boundary. Values that match no
/// variant indicate corrupted data and surface as `DbErr::Custom`.
///
/// # Arguments
/// - `column` - Column name, reported in the error
/// - `value` - Stored string value
///
/// # Returns
/// - `Ok(T)` - Parsed variant
/// - `Err(DbErr::Custom)` - Value matches no variant of `T`
pub fn parse_enum<T: FromStr>(column: &'static str, value: &str) -> Result<T, DbErr> {
    value.parse::<T>().map_err(|_| {
        DbErr::Custom(
            InternalError::ParseEnum {
                column,
                value: value.to_string(),
            }
            .to_string(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::billing::InvoiceStatus;

    #[test]
    fn parses_snake_case_values() {
        let status: InvoiceStatus = parse_enum("status", "partially_paid").unwrap();
        assert_eq!(status, InvoiceStatus::PartiallyPaid);
    }

    #[test]
    fn rejects_unknown_values() {
        let result = parse_enum::<InvoiceStatus>("status", "refunded");
        match result {
            Err(DbErr::Custom(msg)) => assert!(msg.contains("refunded")),
            other => panic!("Expected DbErr::Custom, got: {:?}", other),
        }
    }
}
