use rust_decimal::Decimal;
use shipping::model::{RateModel, ShipmentModel, ShipmentModelError, ShippingQuoteModel};

pub(crate) fn ut_rate(id: &str, amount: &str) -> RateModel {
    RateModel {
        id: id.to_string(),
        rate: amount.to_string(),
        currency: "USD".to_string(),
        carrier: "USPS".to_string(),
        service: "Priority".to_string(),
    }
}

pub(crate) fn ut_shipment(id: &str, rates: Vec<RateModel>) -> ShipmentModel {
    ShipmentModel {
        id: id.to_string(),
        rates,
        tracking_code: None,
        tracker_url: None,
        label_url: None,
    }
}

#[test]
fn rate_amount_round_up() {
    let cases = [
        ("4.001", 401i64),
        ("4.00", 400),
        ("4", 400),
        ("4.10", 410),
        ("0.001", 1),
        (" 12.345 ", 1235),
    ];
    for (raw, expect) in cases {
        let rate = ut_rate("rate_0", raw);
        let actual = rate.amount_minor().unwrap();
        assert_eq!(actual, expect);
    }
}

#[test]
fn rate_amount_corrupted() {
    let rate = ut_rate("rate_1", "four dollars");
    let result = rate.amount_minor();
    assert_eq!(
        result,
        Err(ShipmentModelError::CorruptedRate(
            "rate_1".to_string(),
            "four dollars".to_string()
        ))
    );
}

#[test]
fn lowest_rate_ok() {
    let shipment = ut_shipment(
        "shp_1",
        vec![
            ut_rate("rate_a", "9.31"),
            ut_rate("rate_b", "7.58"),
            ut_rate("rate_c", "15.02"),
        ],
    );
    let rate = shipment.lowest_rate().unwrap();
    assert_eq!(rate.id.as_str(), "rate_b");
    assert_eq!(rate.amount().unwrap(), Decimal::new(758, 2));
}

#[test]
fn lowest_rate_tie_first_wins() {
    let shipment = ut_shipment(
        "shp_2",
        vec![
            ut_rate("rate_a", "8.00"),
            ut_rate("rate_b", "5.5"),
            ut_rate("rate_c", "5.50"),
        ],
    );
    let rate = shipment.lowest_rate().unwrap();
    assert_eq!(rate.id.as_str(), "rate_b");
    // deterministic for the same shipment state
    let rate2 = shipment.lowest_rate().unwrap();
    assert_eq!(rate, rate2);
}

#[test]
fn lowest_rate_none() {
    let shipment = ut_shipment("shp_3", Vec::new());
    let result = ShippingQuoteModel::try_from_lowest(&shipment);
    assert_eq!(
        result,
        Err(ShipmentModelError::NoRateAvailable("shp_3".to_string()))
    );
}

#[test]
fn quote_from_lowest() {
    let shipment = ut_shipment(
        "shp_4",
        vec![ut_rate("rate_a", "6.205"), ut_rate("rate_b", "11.9")],
    );
    let quote = ShippingQuoteModel::try_from_lowest(&shipment).unwrap();
    assert_eq!(quote.amount, 621);
    assert_eq!(quote.shipment_id.as_str(), "shp_4");
    assert_eq!(quote.rate_id.as_str(), "rate_a");
}

#[test]
fn find_rate() {
    let shipment = ut_shipment(
        "shp_5",
        vec![ut_rate("rate_a", "6.2"), ut_rate("rate_b", "11.9")],
    );
    let rate = shipment.find_rate("rate_b").unwrap();
    assert_eq!(rate.rate.as_str(), "11.9");
    let result = shipment.find_rate("rate_z");
    assert_eq!(
        result,
        Err(ShipmentModelError::RateNotFound("rate_z".to_string()))
    );
}

#[test]
fn tracking_state() {
    let mut shipment = ut_shipment("shp_6", Vec::new());
    shipment.tracker_url = Some("https://track.easypost.com/djE6dHJr".to_string());
    assert_eq!(shipment.tracking_state(), (false, None));
    shipment.tracking_code = Some(String::new());
    assert_eq!(shipment.tracking_state(), (false, None));
    shipment.tracking_code = Some("9400100000000000000000".to_string());
    let (assigned, url) = shipment.tracking_state();
    assert!(assigned);
    assert_eq!(url.as_deref(), Some("https://track.easypost.com/djE6dHJr"));
}

#[test]
fn rate_amount_overflow() {
    let rate = ut_rate("rate_huge", "79228162514264337593543950335");
    let result = rate.amount_minor();
    assert_eq!(result, Err(ShipmentModelError::AmountOverflow(Decimal::MAX)));
    let rate = ut_rate("rate_big", "79228162514264337593543950");
    let result = rate.amount_minor();
    assert!(matches!(result, Err(ShipmentModelError::AmountOverflow(_))));
}

#[test]
fn lowest_rate_skip_corrupted() {
    let shipment = ut_shipment(
        "shp_7",
        vec![
            ut_rate("rate_a", "12.40"),
            ut_rate("rate_b", "N/A"),
            ut_rate("rate_c", "6.80"),
        ],
    );
    let rate = shipment.lowest_rate().unwrap();
    assert_eq!(rate.id.as_str(), "rate_c");
    let corrupted = shipment.corrupted_rates();
    assert_eq!(corrupted.len(), 1);
    assert_eq!(corrupted[0].id.as_str(), "rate_b");

    let shipment = ut_shipment("shp_8", vec![ut_rate("rate_x", ""), ut_rate("rate_y", "abc")]);
    let result = shipment.lowest_rate();
    assert_eq!(
        result,
        Err(ShipmentModelError::NoRateAvailable("shp_8".to_string()))
    );
}

#[test]
fn tracking_state_without_tracker() {
    let mut shipment = ut_shipment("shp_9", Vec::new());
    shipment.tracking_code = Some("TRK".to_string());
    assert_eq!(shipment.tracking_state(), (false, None));
    shipment.tracker_url = Some(String::new());
    assert_eq!(shipment.tracking_state(), (false, None));
    shipment.tracker_url = Some("https://track.easypost.com/djE6dHJrXzk5".to_string());
    assert_eq!(
        shipment.tracking_state(),
        (
            true,
            Some("https://track.easypost.com/djE6dHJrXzk5".to_string())
        )
    );
}
