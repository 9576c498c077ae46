// src/services/auth.rs

use bcrypt::verify;

use crate::{common::error::AppError, models::auth::AuthResponse};

// Conta única do dono da agência. A credencial e o token vêm da configuração
// (nunca de literais no código) e o token é um segredo compartilhado estático:
// a checagem é igualdade exata de string, sem sessão nem expiração.
#[derive(Clone)]
pub struct AuthService {
    admin_email: String,
    password_hash: String,
    token: String,
}

impl AuthService {
    pub fn new(admin_email: String, password_hash: String, token: String) -> Self {
        Self {
            admin_email,
            password_hash,
            token,
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        if email != self.admin_email {
            // Mensagem genérica: não revelar qual parte estava errada
            return Err(AppError::InvalidCredentials);
        }

        let password = password.to_owned();
        let hash = self.password_hash.clone();

        // bcrypt é caro; roda fora do executor
        let is_valid = tokio::task::spawn_blocking(move || verify(&password, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_valid {
            return Err(AppError::InvalidCredentials);
        }

        Ok(AuthResponse {
            token: self.token.clone(),
            email: email.to_string(),
        })
    }

    /// Checagem do bearer token das rotas admin: igualdade exata.
    pub fn verify_token(&self, token: &str) -> bool {
        token == self.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        // custo 4 só para o teste não demorar
        let hash = bcrypt::hash("admin@1234", 4).unwrap();
        AuthService::new(
            "admin@gmail.com".to_string(),
            hash,
            "test-admin-token".to_string(),
        )
    }

    #[tokio::test]
    async fn login_with_correct_credentials_returns_token() {
        let auth = service();
        let resp = auth.login("admin@gmail.com", "admin@1234").await.unwrap();
        assert_eq!(resp.token, "test-admin-token");
        assert_eq!(resp.email, "admin@gmail.com");
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_rejected() {
        let auth = service();
        let err = auth.login("admin@gmail.com", "wrong").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_with_unknown_email_is_rejected() {
        let auth = service();
        let err = auth.login("other@gmail.com", "admin@1234").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[test]
    fn token_check_is_exact_match() {
        let auth = service();
        assert!(auth.verify_token("test-admin-token"));
        assert!(!auth.verify_token("test-admin-token "));
        assert!(!auth.verify_token("TEST-ADMIN-TOKEN"));
        assert!(!auth.verify_token(""));
    }
}
