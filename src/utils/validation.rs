use crate::utils::error::{DrawError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(DrawError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(DrawError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Fails when a `${VAR}` placeholder survived environment substitution.
pub fn validate_no_placeholder(field_name: &str, value: &str) -> Result<()> {
    let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| DrawError::ConfigError {
        message: format!("invalid placeholder pattern: {}", e),
    })?;

    if let Some(caps) = re.captures(value) {
        return Err(DrawError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("environment variable {} is not set", &caps[1]),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| DrawError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DrawError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(DrawError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(DrawError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Allowed values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("pool.source", "./participants.csv").is_ok());
        assert!(validate_path("pool.source", "").is_err());
        assert!(validate_path("pool.source", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_no_placeholder() {
        assert!(validate_no_placeholder("pool.source", "/srv/pool.csv").is_ok());
        let err = validate_no_placeholder("pool.source", "${RAFFLE_POOL_SOURCE}").unwrap_err();
        assert!(err.to_string().contains("RAFFLE_POOL_SOURCE is not set"));
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("draw.max_manual_slots", 10, 1, 100).is_ok());
        assert!(validate_range("draw.max_manual_slots", 101, 1, 100).is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("pool.format", "csv", &["csv", "json", "lines"]).is_ok());
        let err = validate_one_of("pool.format", "xml", &["csv", "json", "lines"]).unwrap_err();
        assert!(err.to_string().contains("csv, json, lines"));
    }

    #[test]
    fn test_validate_required_field() {
        let seed: Option<u64> = Some(7);
        assert_eq!(*validate_required_field("draw.seed", &seed).unwrap(), 7);
        let missing: Option<u64> = None;
        assert!(validate_required_field("draw.seed", &missing).is_err());
    }
}
