// src/models/package.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Mapeia o CREATE TYPE package_tag do banco (taxonomia de marketing fixa)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "package_tag")]
pub enum PackageTag {
    Domestic,
    International,
    Honeymoon,
    Adventure,
    Family,
    Beach,
    Wellness,
    Heritage,
    Luxury,
    Popular,
}

// Item de catálogo: sem ciclo de triagem, sem status.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub days: i32,
    pub price_from: Decimal,
    pub description: String,
    pub tag: PackageTag,
    pub category: PackageTag,
    pub image_url: String,
    pub images: Vec<String>,
    pub highlights: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Package {
    /// Versão pública do pacote com os aliases que o frontend antigo espera
    /// (destination/duration/price/image espelham os campos canônicos).
    pub fn to_public_json(&self) -> Value {
        let mut value = serde_json::to_value(self).unwrap_or_else(|_| json!({}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("destination".into(), json!(self.location));
            obj.insert("duration".into(), json!(self.days));
            obj.insert("price".into(), json!(self.price_from));
            obj.insert("image".into(), json!(self.image_url));
        }
        value
    }
}

// Pacote novo já normalizado (defaults aplicados pelo handler)
#[derive(Debug, Clone)]
pub struct NewPackage {
    pub title: String,
    pub location: String,
    pub days: i32,
    pub price_from: Decimal,
    pub description: String,
    pub tag: PackageTag,
    pub category: PackageTag,
    pub image_url: Option<String>,
    pub images: Vec<String>,
    pub highlights: Vec<String>,
}

// Atualização parcial: campo ausente = mantém o valor atual
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackagePatch {
    pub title: Option<String>,
    pub location: Option<String>,
    pub days: Option<i32>,
    pub price_from: Option<Decimal>,
    pub description: Option<String>,
    pub tag: Option<PackageTag>,
    pub category: Option<PackageTag>,
    pub image_url: Option<String>,
    pub images: Option<Vec<String>>,
    pub highlights: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_json_carries_compat_aliases() {
        let pkg = Package {
            id: Uuid::new_v4(),
            title: "Goa Getaway".into(),
            location: "Goa".into(),
            days: 4,
            price_from: Decimal::from(12999),
            description: String::new(),
            tag: PackageTag::Beach,
            category: PackageTag::Popular,
            image_url: "https://example.com/goa.jpg".into(),
            images: vec![],
            highlights: vec!["Beach".into()],
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = pkg.to_public_json();
        assert_eq!(json["destination"], "Goa");
        assert_eq!(json["duration"], 4);
        assert_eq!(json["price"], json["priceFrom"]);
        assert_eq!(json["image"], "https://example.com/goa.jpg");
        assert_eq!(json["tag"], "Beach");
    }
}
