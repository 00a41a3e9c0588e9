pub mod claims;
pub mod extractors;
pub mod guards;
pub mod middleware;

pub use claims::{AuthUser, Claims};

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use util::config;

/// Generates a JWT for an account and returns it with its RFC 3339 expiry.
pub fn generate_jwt(
    account_id: i64,
    admin: bool,
) -> Result<(String, String), jsonwebtoken::errors::Error> {
    let expiry = Utc::now() + Duration::minutes(config::jwt_duration_minutes() as i64);

    let claims = Claims {
        sub: account_id,
        admin,
        exp: expiry.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config::jwt_secret().as_bytes()),
    )?;

    Ok((token, expiry.to_rfc3339()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
    use serial_test::serial;

    #[test]
    #[serial]
    fn token_round_trips_claims() {
        config::AppConfig::set_jwt_secret("unit-test-secret");
        let (token, expiry) = generate_jwt(42, true).unwrap();

        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"unit-test-secret"),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap();
        assert_eq!(data.claims.sub, 42);
        assert!(data.claims.admin);
        assert!(chrono::DateTime::parse_from_rfc3339(&expiry).is_ok());
    }
}
