use rust_decimal::Decimal;

use crate::config::AppCustomsCfg;
use crate::constant::shipping::CUSTOMS_ORIGIN_COUNTRY;

use super::{OrderLineModel, ParcelModel, ProductKind};

#[derive(Debug, Clone)]
pub struct CatalogSkuModel {
    pub id: String,
    pub price: i64, // in minor currency unit
    pub currency: String,
}

#[derive(Debug, Clone)]
pub struct CatalogPriceModel {
    pub id: String,
    // absent in tiered or custom-amount prices
    pub unit_amount: Option<i64>,
    pub currency: String,
}

/// unit price of a product in whole currency unit, used only for
/// declared value of customs items
#[derive(Debug, Clone, PartialEq)]
pub struct UnitPriceModel(pub Decimal);

impl UnitPriceModel {
    fn from_minor(amount: i64) -> Self {
        Self(Decimal::new(amount, 2))
    }

    pub fn from_first_sku(skus: &[CatalogSkuModel]) -> Option<Self> {
        skus.first().map(|s| Self::from_minor(s.price))
    }

    pub fn from_first_price(prices: &[CatalogPriceModel]) -> Option<Self> {
        prices
            .iter()
            .find_map(|p| p.unit_amount)
            .map(Self::from_minor)
    }

    /// only physical goods are sold by SKU in the catalog, other kinds of
    /// products always go straight to the price list
    pub fn should_lookup_sku(kind: &ProductKind) -> bool {
        matches!(kind, ProductKind::Good)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomsItemModel {
    pub quantity: u32,
    pub description: String,
    pub value: Decimal,
    pub weight: f64,
    pub code: String,
    pub origin_country: String,
    pub hs_tariff_number: Option<String>,
}

impl CustomsItemModel {
    /// the weight is taken from the order line itself, not the
    /// aggregate weight of the whole package
    pub fn new(line: &OrderLineModel, parcel: &ParcelModel, price: UnitPriceModel) -> Self {
        let prod = &line.product;
        Self {
            quantity: line.quantity,
            description: prod.description.clone(),
            value: price.0,
            weight: parcel.weight,
            code: prod.id.clone(),
            origin_country: CUSTOMS_ORIGIN_COUNTRY.to_string(),
            hs_tariff_number: prod.hs_tariff_number(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CustomsInfoModel {
    pub item_ids: Vec<String>,
    pub defaults: AppCustomsCfg,
}
