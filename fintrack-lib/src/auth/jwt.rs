use crate::user::UserId;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::Deserialize;
use serde::Serialize;
use std::time::UNIX_EPOCH;

#[derive(Clone)]
pub struct JWTAuth {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_seconds: u64,
}

#[derive(Serialize, Deserialize)]
struct Claims {
    exp: usize,
    sub: String,
}

impl JWTAuth {
    pub fn new(secret: Vec<u8>, ttl_seconds: u64) -> JWTAuth {
        JWTAuth {
            encoding_key: EncodingKey::from_secret(&secret),
            decoding_key: DecodingKey::from_secret(&secret),
            ttl_seconds,
        }
    }

    pub fn create_token(&self, user_id: UserId) -> String {
        let claims = Claims {
            exp: self.generate_exp(),
            sub: user_id.to_string(),
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key).unwrap()
    }

    pub fn validate_token(&self, token: &str) -> Result<UserId, jsonwebtoken::errors::Error> {
        let claim =
            jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        claim
            .claims
            .sub
            .parse()
            .map_err(|_| ErrorKind::InvalidSubject.into())
    }

    fn generate_exp(&self) -> usize {
        (std::time::SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
            + self.ttl_seconds) as usize
    }
}

#[cfg(test)]
mod tests {
    use crate::auth::jwt::JWTAuth;
    use base64::Engine;

    const TTL: u64 = 60 * 60;

    #[test]
    async fn valid_token() {
        let secret: [u8; 32] = rand::random();
        let jwt_auth = JWTAuth::new(secret.to_vec(), TTL);

        let token = jwt_auth.create_token(17);
        assert_eq!(jwt_auth.validate_token(&token).unwrap(), 17);
    }

    #[test]
    async fn invalid_token() {
        let secret: [u8; 32] = rand::random();
        let jwt_auth = JWTAuth::new(secret.to_vec(), TTL);

        let token_bytes: [u8; 32] = rand::random();
        let base64_engine = base64::engine::general_purpose::STANDARD;
        let token = base64_engine.encode(token_bytes);
        assert!(jwt_auth.validate_token(&token).is_err())
    }

    #[test]
    async fn token_signed_with_other_secret() {
        let secret: [u8; 32] = rand::random();
        let other_secret: [u8; 32] = rand::random();
        let jwt_auth = JWTAuth::new(secret.to_vec(), TTL);
        let other_auth = JWTAuth::new(other_secret.to_vec(), TTL);

        let token = other_auth.create_token(17);
        assert!(jwt_auth.validate_token(&token).is_err())
    }
}
