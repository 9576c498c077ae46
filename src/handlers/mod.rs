pub mod auth;
pub mod cabs;
pub mod dashboard;
pub mod enquiry;
pub mod health;
pub mod packages;
pub mod tickets;

use validator::ValidationError;

// Telefone indiano de 10 dígitos, com tolerância a espaços, hífens e +91.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits: String = phone
        .trim()
        .trim_start_matches("+91")
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();

    if digits.len() != 10 {
        let mut err = ValidationError::new("phone");
        err.message = Some("Phone number must have 10 digits.".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ten_digit_numbers() {
        assert!(validate_phone("9876543210").is_ok());
        assert!(validate_phone("+91 98765 43210").is_ok());
        assert!(validate_phone("98765-43210").is_ok());
    }

    #[test]
    fn rejects_short_or_garbled_numbers() {
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("").is_err());
        assert!(validate_phone("98765432101").is_err());
    }
}
