// src/config.rs

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{LeadRepository, PackageRepository},
    services::{
        auth::AuthService,
        lead_service::LeadService,
        notifier::{EmailConfig, Notifier},
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub lead_service: LeadService,
    pub package_repo: PackageRepository,
    pub notifier: Notifier,
    pub port: u16,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;

        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .context("PORT deve ser um número de porta válido")?;

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Credenciais do admin ---
        let admin_email = env::var("ADMIN_EMAIL").context("ADMIN_EMAIL deve ser definido")?;
        let admin_token = env::var("ADMIN_TOKEN").context("ADMIN_TOKEN deve ser definido")?;

        // Preferimos o hash pronto; ADMIN_PASSWORD em texto é aceito para
        // desenvolvimento e vira hash na subida.
        let password_hash = match env::var("ADMIN_PASSWORD_HASH") {
            Ok(hash) => hash,
            Err(_) => {
                let password = env::var("ADMIN_PASSWORD")
                    .context("Defina ADMIN_PASSWORD_HASH ou ADMIN_PASSWORD")?;
                tokio::task::spawn_blocking(move || {
                    bcrypt::hash(&password, bcrypt::DEFAULT_COST)
                })
                .await
                .context("Falha na task de hash da senha do admin")??
            }
        };

        // --- Transporte de e-mail (opcional) ---
        let email_config = match env::var("BREVO_API_KEY") {
            Ok(api_key) if !api_key.is_empty() => Some(EmailConfig {
                api_key,
                api_url: env::var("BREVO_API_URL")
                    .unwrap_or_else(|_| "https://api.brevo.com/v3".to_string()),
                sender_name: env::var("NOTIFY_SENDER_NAME")
                    .unwrap_or_else(|_| "GoTravio".to_string()),
                sender_email: env::var("NOTIFY_SENDER_EMAIL")
                    .context("NOTIFY_SENDER_EMAIL deve acompanhar BREVO_API_KEY")?,
                owner_email: env::var("NOTIFY_OWNER_EMAIL")
                    .unwrap_or_else(|_| admin_email.clone()),
            }),
            _ => None,
        };
        let notifier = Notifier::new(email_config)?;

        // --- Monta o gráfico de dependências ---
        let auth_service = AuthService::new(admin_email, password_hash, admin_token);
        let lead_repo = LeadRepository::new(db_pool.clone());
        let lead_service = LeadService::new(lead_repo, notifier.clone());
        let package_repo = PackageRepository::new(db_pool.clone());

        Ok(Self {
            db_pool,
            auth_service,
            lead_service,
            package_repo,
            notifier,
            port,
        })
    }
}
