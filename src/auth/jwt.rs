use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};

use crate::auth::CryptResult;
use crate::model::UserRole;

/// Claims of the `SID` cookie. Accounts live elsewhere; the token only
/// carries who the actor is and which role they act in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub role: String,
    pub exp: i64,
}

impl UserClaims {
    pub fn new<S: Into<String>>(sub: S, role: UserRole, ttl: Duration) -> Self {
        Self {
            sub: sub.into(),
            role: role.to_string(),
            exp: (Utc::now() + ttl).timestamp(),
        }
    }

    pub fn role(&self) -> UserRole {
        UserRole::from(self.role.as_str())
    }
}

pub fn generate_token<K: AsRef<[u8]>>(
    claims: UserClaims,
    key: K,
) -> CryptResult<String> {
    let header = Header::default();
    let key = EncodingKey::from_secret(key.as_ref());

    let token = jsonwebtoken::encode(&header, &claims, &key)?;
    Ok(token)
}

pub fn process_token<K: AsRef<[u8]>>(
    token: &str,
    key: K,
) -> CryptResult<TokenData<UserClaims>> {
    let validation = Validation::default();
    let key = DecodingKey::from_secret(key.as_ref());

    let claims = jsonwebtoken::decode::<UserClaims>(token, &key, &validation)?;
    Ok(claims)
}
