use serde::{Deserialize, Serialize};

use crate::model::{CatalogPriceModel, CatalogSkuModel};

#[derive(Serialize)]
pub(super) struct ListByProductQuery<'a> {
    pub product: &'a str,
    pub active: bool,
    pub limit: u16,
}

#[derive(Deserialize)]
pub(super) struct ListObject<T> {
    pub data: Vec<T>,
    #[allow(dead_code)]
    pub has_more: bool,
}

#[derive(Deserialize)]
pub(super) struct Sku {
    pub id: String,
    pub price: i64, // in the smallest currency unit
    pub currency: String,
}

#[derive(Deserialize)]
pub(super) struct Price {
    pub id: String,
    pub unit_amount: Option<i64>,
    pub currency: String,
}

#[derive(Deserialize)]
pub(super) struct StripeErrorDetail {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: Option<String>,
}

#[derive(Deserialize)]
pub(super) struct StripeErrorBody {
    pub error: StripeErrorDetail,
}

impl From<Sku> for CatalogSkuModel {
    fn from(value: Sku) -> Self {
        Self {
            id: value.id,
            price: value.price,
            currency: value.currency,
        }
    }
}

impl From<Price> for CatalogPriceModel {
    fn from(value: Price) -> Self {
        Self {
            id: value.id,
            unit_amount: value.unit_amount,
            currency: value.currency,
        }
    }
}

impl ToString for StripeErrorBody {
    fn to_string(&self) -> String {
        let msg = self.error.message.as_deref().unwrap_or("");
        format!("{}, {}", self.error.kind, msg)
    }
}
