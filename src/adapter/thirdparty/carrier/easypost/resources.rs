use serde::{Deserialize, Serialize};

use crate::config::AppCustomsCfg;
use crate::model::{
    CarrierAddressModel, CustomsInfoModel, CustomsItemModel, ParcelModel, RateModel,
    ShipmentModel, ShipmentReqModel,
};

#[derive(Serialize)]
pub(super) struct ObjectRef<'a> {
    pub id: &'a str,
}

#[derive(Deserialize)]
pub(super) struct CreatedObject {
    pub id: String,
}

#[derive(Serialize)]
pub(super) struct CustomsItemBody<'a> {
    pub description: &'a str,
    pub quantity: u32,
    pub value: String, // decimal number serialised as string, in whole currency unit
    pub weight: f64,
    pub code: &'a str,
    pub origin_country: &'a str,
    pub hs_tariff_number: Option<&'a str>,
}

#[derive(Serialize)]
pub(super) struct CreateCustomsItem<'a> {
    pub customs_item: CustomsItemBody<'a>,
}

#[derive(Serialize)]
pub(super) struct CustomsInfoBody<'a> {
    pub customs_items: Vec<ObjectRef<'a>>,
    pub contents_type: &'a str,
    pub contents_explanation: Option<&'a str>,
    pub customs_certify: bool,
    pub customs_signer: &'a str,
    pub eel_pfc: Option<&'a str>,
    pub non_delivery_option: Option<&'a str>,
    pub restriction_type: Option<&'a str>,
    pub restriction_comments: Option<&'a str>,
}

#[derive(Serialize)]
pub(super) struct CreateCustomsInfo<'a> {
    pub customs_info: CustomsInfoBody<'a>,
}

#[derive(Serialize)]
pub(super) struct AddressBody<'a> {
    pub name: &'a str,
    pub company: Option<&'a str>,
    pub street1: &'a str,
    pub street2: Option<&'a str>,
    pub city: &'a str,
    pub state: &'a str,
    pub zip: &'a str,
    pub country: &'a str,
    pub phone: Option<&'a str>,
    pub email: Option<&'a str>,
}

#[derive(Serialize)]
pub(super) struct ParcelBody {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub weight: f64,
}

#[derive(Serialize)]
pub(super) struct ShipmentBody<'a> {
    pub from_address: AddressBody<'a>,
    pub to_address: AddressBody<'a>,
    pub parcel: ParcelBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customs_info: Option<ObjectRef<'a>>,
}

#[derive(Serialize)]
pub(super) struct CreateShipment<'a> {
    pub shipment: ShipmentBody<'a>,
}

#[derive(Serialize)]
pub(super) struct BuyShipment<'a> {
    pub rate: ObjectRef<'a>,
}

#[derive(Deserialize)]
pub(super) struct Rate {
    pub id: String,
    pub rate: String,
    pub currency: String,
    pub carrier: String,
    pub service: String,
}

#[derive(Deserialize)]
pub(super) struct Tracker {
    pub public_url: Option<String>,
}

#[derive(Deserialize)]
pub(super) struct PostageLabel {
    pub label_url: Option<String>,
}

#[derive(Deserialize)]
pub(super) struct Shipment {
    pub id: String,
    #[serde(default)]
    pub rates: Vec<Rate>,
    pub tracking_code: Option<String>,
    pub tracker: Option<Tracker>,
    pub postage_label: Option<PostageLabel>,
}

#[derive(Deserialize)]
pub(super) struct EasyPostErrorDetail {
    pub code: String,
    pub message: String,
}

#[derive(Deserialize)]
pub(super) struct EasyPostErrorBody {
    pub error: EasyPostErrorDetail,
}

impl<'a> From<&'a CustomsItemModel> for CreateCustomsItem<'a> {
    fn from(value: &'a CustomsItemModel) -> Self {
        let customs_item = CustomsItemBody {
            description: value.description.as_str(),
            quantity: value.quantity,
            value: value.value.to_string(),
            weight: value.weight,
            code: value.code.as_str(),
            origin_country: value.origin_country.as_str(),
            hs_tariff_number: value.hs_tariff_number.as_deref(),
        };
        Self { customs_item }
    }
}

impl<'a> From<&'a CustomsInfoModel> for CreateCustomsInfo<'a> {
    fn from(value: &'a CustomsInfoModel) -> Self {
        let d: &'a AppCustomsCfg = &value.defaults;
        let customs_items = value
            .item_ids
            .iter()
            .map(|id| ObjectRef { id: id.as_str() })
            .collect();
        let customs_info = CustomsInfoBody {
            customs_items,
            contents_type: d.contents_type.as_str(),
            contents_explanation: d.contents_explanation.as_deref(),
            customs_certify: d.customs_certify,
            customs_signer: d.customs_signer.as_str(),
            eel_pfc: d.eel_pfc.as_deref(),
            non_delivery_option: d.non_delivery_option.as_deref(),
            restriction_type: d.restriction_type.as_deref(),
            restriction_comments: d.restriction_comments.as_deref(),
        };
        Self { customs_info }
    }
}

impl<'a> From<&'a CarrierAddressModel> for AddressBody<'a> {
    fn from(value: &'a CarrierAddressModel) -> Self {
        Self {
            name: value.name.as_str(),
            company: value.company.as_deref(),
            street1: value.street1.as_str(),
            street2: value.street2.as_deref(),
            city: value.city.as_str(),
            state: value.state.as_str(),
            zip: value.zip.as_str(),
            country: value.country.as_str(),
            phone: value.phone.as_deref(),
            email: value.email.as_deref(),
        }
    }
}

impl From<&ParcelModel> for ParcelBody {
    fn from(value: &ParcelModel) -> Self {
        Self {
            length: value.length,
            width: value.width,
            height: value.height,
            weight: value.weight,
        }
    }
}

impl<'a> From<&'a ShipmentReqModel> for CreateShipment<'a> {
    fn from(value: &'a ShipmentReqModel) -> Self {
        let shipment = ShipmentBody {
            from_address: AddressBody::from(&value.from),
            to_address: AddressBody::from(&value.to),
            parcel: ParcelBody::from(&value.parcel),
            customs_info: value
                .customs_info_id
                .as_ref()
                .map(|id| ObjectRef { id: id.as_str() }),
        };
        Self { shipment }
    }
}

impl From<Rate> for RateModel {
    fn from(value: Rate) -> Self {
        Self {
            id: value.id,
            rate: value.rate,
            currency: value.currency,
            carrier: value.carrier,
            service: value.service,
        }
    }
}

impl From<Shipment> for ShipmentModel {
    fn from(value: Shipment) -> Self {
        let Shipment {
            id,
            rates,
            tracking_code,
            tracker,
            postage_label,
        } = value;
        Self {
            id,
            rates: rates.into_iter().map(RateModel::from).collect(),
            tracking_code,
            tracker_url: tracker.and_then(|t| t.public_url),
            label_url: postage_label.and_then(|p| p.label_url),
        }
    }
}

impl ToString for EasyPostErrorBody {
    fn to_string(&self) -> String {
        format!("{}, {}", self.error.code, self.error.message)
    }
}
