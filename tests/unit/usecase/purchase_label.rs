use std::sync::Arc;

use shipping::adapter::thirdparty::{AppCarrierError, AppCarrierErrorReason, AppCarrierFnLabel};
use shipping::model::ShipmentModel;
use shipping::usecase::{PurchaseUcError, ShipmentPurchaseUseCase};

use super::{ut_wrap_carrier, MockCarrierRecord, MockCarrierService};
use crate::model::{ut_rate, ut_shipment};
use crate::ut_setup_logctx;

fn ut_saved_shipment() -> ShipmentModel {
    let rates = vec![
        ut_rate("rate_express", "23.40"),
        ut_rate("rate_ground", "6.95"),
        ut_rate("rate_priority", "9.10"),
    ];
    ut_shipment("shp_7788", rates)
}

fn ut_purchased_shipment(label: Option<&str>, tracker: Option<&str>) -> ShipmentModel {
    let mut s = ut_saved_shipment();
    s.tracking_code = Some("EZ1000000001".to_string());
    s.label_url = label.map(String::from);
    s.tracker_url = tracker.map(String::from);
    s
}

fn ut_setup_usecase(
    retrieve_result: Result<ShipmentModel, AppCarrierError>,
    buy_result: Option<Result<ShipmentModel, AppCarrierError>>,
) -> (ShipmentPurchaseUseCase, Arc<MockCarrierRecord>) {
    let record = Arc::new(MockCarrierRecord::default());
    let carrier = MockCarrierService {
        _record: record.clone(),
        ..Default::default()
    };
    let _ = carrier
        ._retrieve_shipment_result
        .lock()
        .unwrap()
        .replace(retrieve_result);
    *carrier._buy_shipment_result.lock().unwrap() = buy_result;
    let uc = ShipmentPurchaseUseCase {
        carrier: ut_wrap_carrier(carrier),
        logctx: ut_setup_logctx(),
    };
    (uc, record)
}

#[tokio::test]
async fn buy_quoted_rate_ok() {
    let purchased = ut_purchased_shipment(
        Some("https://easypost-files.s3.amazonaws.com/files/postage_label/label.png"),
        Some("https://track.easypost.com/djE6dHJrXzk"),
    );
    let (uc, record) = ut_setup_usecase(Ok(ut_saved_shipment()), Some(Ok(purchased)));
    let result = uc
        .execute("shp_7788".to_string(), Some("rate_priority".to_string()))
        .await;
    assert!(result.is_ok());
    let label = result.unwrap();
    assert!(label.label_url.ends_with("label.png"));
    assert_eq!(
        label.tracking_url.as_str(),
        "https://track.easypost.com/djE6dHJrXzk"
    );
    let bought = record.bought.lock().unwrap().clone();
    assert_eq!(
        bought,
        Some(("shp_7788".to_string(), "rate_priority".to_string()))
    );
    let retrieved = record.retrieved.lock().unwrap().clone();
    assert_eq!(retrieved, vec!["shp_7788"]);
}

#[tokio::test]
async fn buy_lowest_rate_without_quote() {
    let purchased = ut_purchased_shipment(Some("https://x.io/l.png"), Some("https://x.io/t"));
    let (uc, record) = ut_setup_usecase(Ok(ut_saved_shipment()), Some(Ok(purchased)));
    let result = uc.execute("shp_7788".to_string(), None).await;
    assert!(result.is_ok());
    let bought = record.bought.lock().unwrap().clone();
    assert_eq!(
        bought,
        Some(("shp_7788".to_string(), "rate_ground".to_string()))
    );
}

#[tokio::test]
async fn buy_lowest_rate_skip_corrupted() {
    let mut saved = ut_saved_shipment();
    saved.rates.insert(0, ut_rate("rate_broken", "free"));
    let purchased = ut_purchased_shipment(Some("https://x.io/l.png"), Some("https://x.io/t"));
    let (uc, record) = ut_setup_usecase(Ok(saved), Some(Ok(purchased)));
    let result = uc.execute("shp_7788".to_string(), None).await;
    assert!(result.is_ok());
    let bought = record.bought.lock().unwrap().clone();
    assert_eq!(
        bought,
        Some(("shp_7788".to_string(), "rate_ground".to_string()))
    );
}

#[tokio::test]
async fn quoted_rate_vanished() {
    let (uc, record) = ut_setup_usecase(Ok(ut_saved_shipment()), None);
    let result = uc
        .execute("shp_7788".to_string(), Some("rate_from_yesterday".to_string()))
        .await;
    assert!(matches!(
        result,
        Err(PurchaseUcError::QuotedRateUnavailable(rid)) if rid.as_str() == "rate_from_yesterday"
    ));
    assert!(record.bought.lock().unwrap().is_none());
}

#[tokio::test]
async fn no_rate_to_buy() {
    let (uc, record) = ut_setup_usecase(Ok(ut_shipment("shp_0", Vec::new())), None);
    let result = uc.execute("shp_0".to_string(), None).await;
    assert!(matches!(result, Err(PurchaseUcError::NoRateAvailable(_))));
    assert!(record.bought.lock().unwrap().is_none());
}

#[tokio::test]
async fn purchased_without_label() {
    let purchased = ut_purchased_shipment(None, Some("https://x.io/t"));
    let (uc, _record) = ut_setup_usecase(Ok(ut_saved_shipment()), Some(Ok(purchased)));
    let result = uc
        .execute("shp_7788".to_string(), Some("rate_ground".to_string()))
        .await;
    assert!(matches!(
        result,
        Err(PurchaseUcError::CorruptedShipment(sid)) if sid.as_str() == "shp_7788"
    ));
}

#[tokio::test]
async fn carrier_rejects_purchase() {
    let buy_err = AppCarrierError {
        reason: AppCarrierErrorReason::RemoteRejected(
            422,
            "SHIPMENT.POSTAGE.EXISTS, postage already exists".to_string(),
        ),
        fn_label: AppCarrierFnLabel::BuyShipment,
    };
    let (uc, _record) = ut_setup_usecase(Ok(ut_saved_shipment()), Some(Err(buy_err)));
    let result = uc
        .execute("shp_7788".to_string(), Some("rate_ground".to_string()))
        .await;
    if let Err(PurchaseUcError::Carrier(e)) = result {
        assert!(matches!(e.fn_label, AppCarrierFnLabel::BuyShipment));
        assert!(matches!(e.reason, AppCarrierErrorReason::RemoteRejected(422, _)));
    } else {
        assert!(false);
    }
}
