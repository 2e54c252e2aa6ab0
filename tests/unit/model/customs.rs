use rust_decimal::Decimal;
use shipping::model::{
    CatalogPriceModel, CatalogSkuModel, CustomsItemModel, ParcelModel, ProductKind,
    UnitPriceModel,
};

use super::{ut_oline, ut_product};

fn ut_sku(id: &str, price: i64) -> CatalogSkuModel {
    CatalogSkuModel {
        id: id.to_string(),
        price,
        currency: "usd".to_string(),
    }
}

fn ut_price(id: &str, unit_amount: Option<i64>) -> CatalogPriceModel {
    CatalogPriceModel {
        id: id.to_string(),
        unit_amount,
        currency: "usd".to_string(),
    }
}

#[test]
fn unit_price_from_sku() {
    let skus = [ut_sku("sku_1", 1999), ut_sku("sku_2", 2599)];
    let price = UnitPriceModel::from_first_sku(&skus).unwrap();
    assert_eq!(price.0, Decimal::new(1999, 2));
    assert!(UnitPriceModel::from_first_sku(&[]).is_none());
}

#[test]
fn unit_price_from_price_list() {
    let prices = [
        ut_price("price_1", None),
        ut_price("price_2", Some(450)),
        ut_price("price_3", Some(990)),
    ];
    let price = UnitPriceModel::from_first_price(&prices).unwrap();
    assert_eq!(price.0, Decimal::new(450, 2));
    let prices = [ut_price("price_4", None)];
    assert!(UnitPriceModel::from_first_price(&prices).is_none());
    assert!(UnitPriceModel::from_first_price(&[]).is_none());
}

#[test]
fn lookup_sku_only_for_goods() {
    assert!(UnitPriceModel::should_lookup_sku(&ProductKind::Good));
    assert!(!UnitPriceModel::should_lookup_sku(&ProductKind::Other));
    assert_eq!(ProductKind::from("good"), ProductKind::Good);
    assert_eq!(ProductKind::from("service"), ProductKind::Other);
}

#[test]
fn customs_item_from_line() {
    let mut line = ut_oline("prod_x", 3, ["2", "14.5", "3", "4"]);
    line.product
        .metadata
        .insert("hs_tariff_number".to_string(), "6109.10".to_string());
    let parcel = ParcelModel::try_from(&line.product).unwrap();
    let item = CustomsItemModel::new(&line, &parcel, UnitPriceModel(Decimal::new(2500, 2)));
    assert_eq!(item.quantity, 3);
    assert_eq!(item.weight, 14.5);
    assert_eq!(item.value, Decimal::new(25, 0));
    assert_eq!(item.code.as_str(), "prod_x");
    assert_eq!(item.origin_country.as_str(), "US");
    assert_eq!(item.description.as_str(), "description of prod_x");
    assert_eq!(item.hs_tariff_number.as_deref(), Some("6109.10"));
}

#[test]
fn missing_dimension_fields() {
    let prod = ut_product("prod_y", ProductKind::Good, &[("weight", "3"), ("width", "1")]);
    assert_eq!(prod.missing_dimension_fields(), vec!["height", "length"]);
    let line = ut_oline("prod_z", 1, ["1", "1", "1", "1"]);
    assert!(line.product.missing_dimension_fields().is_empty());
    assert!(line.product.hs_tariff_number().is_none());
}
