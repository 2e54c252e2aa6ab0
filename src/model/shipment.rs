use std::result::Result;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::{CarrierAddressModel, ParcelModel};

#[derive(Debug, Clone, PartialEq)]
pub enum ShipmentModelError {
    NoRateAvailable(String), // shipment ID
    CorruptedRate(String, String), // rate ID, original amount
    RateNotFound(String),    // rate ID
    AmountOverflow(Decimal),
}

#[derive(Debug, Clone)]
pub struct ShipmentReqModel {
    pub from: CarrierAddressModel,
    pub to: CarrierAddressModel,
    pub parcel: ParcelModel,
    pub customs_info_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RateModel {
    pub id: String,
    pub rate: String, // decimal string quoted by carrier, e.g. `4.05`
    pub currency: String,
    pub carrier: String,
    pub service: String,
}

#[derive(Debug, Clone)]
pub struct ShipmentModel {
    pub id: String,
    pub rates: Vec<RateModel>,
    pub tracking_code: Option<String>,
    pub tracker_url: Option<String>,
    pub label_url: Option<String>,
}

/// price of the cheapest rate in minor currency unit, and the identity
/// of quoted rate which will be purchased later
#[derive(Debug, Clone, PartialEq)]
pub struct ShippingQuoteModel {
    pub amount: i64,
    pub shipment_id: String,
    pub rate_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentLabelModel {
    pub label_url: String,
    pub tracking_url: String,
}

impl RateModel {
    pub fn amount(&self) -> Result<Decimal, ShipmentModelError> {
        Decimal::from_str(self.rate.trim())
            .map_err(|_e| ShipmentModelError::CorruptedRate(self.id.clone(), self.rate.clone()))
    }

    /// round up to the next minor currency unit, so that the shop never
    /// undercharges the buyer
    pub fn amount_minor(&self) -> Result<i64, ShipmentModelError> {
        let amount = self.amount()?;
        let scaled = amount
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or(ShipmentModelError::AmountOverflow(amount))?
            .ceil();
        scaled
            .to_i64()
            .ok_or(ShipmentModelError::AmountOverflow(scaled))
    }
}

impl ShipmentModel {
    /// the first rate wins if several rates have the same lowest price,
    /// rates with unparseable amount are skipped
    pub fn lowest_rate(&self) -> Result<&RateModel, ShipmentModelError> {
        let mut found: Option<(&RateModel, Decimal)> = None;
        for r in self.rates.iter() {
            let amount = match r.amount() {
                Ok(v) => v,
                Err(_e) => continue,
            };
            let cheaper = found.as_ref().map_or(true, |(_, lowest)| amount < *lowest);
            if cheaper {
                found = Some((r, amount));
            }
        }
        found
            .map(|(r, _)| r)
            .ok_or(ShipmentModelError::NoRateAvailable(self.id.clone()))
    }

    pub fn corrupted_rates(&self) -> Vec<&RateModel> {
        self.rates.iter().filter(|r| r.amount().is_err()).collect()
    }

    pub fn find_rate(&self, rate_id: &str) -> Result<&RateModel, ShipmentModelError> {
        self.rates
            .iter()
            .find(|r| r.id.as_str() == rate_id)
            .ok_or(ShipmentModelError::RateNotFound(rate_id.to_string()))
    }

    /// the shipment is not considered as tracked until the carrier provides
    /// both of tracking code and public tracking URL
    pub fn tracking_state(&self) -> (bool, Option<String>) {
        let assigned = self
            .tracking_code
            .as_ref()
            .map_or(false, |c| !c.is_empty());
        match self.tracker_url.as_ref() {
            Some(url) if assigned && !url.is_empty() => (true, Some(url.clone())),
            _others => (false, None),
        }
    }
}

impl ShippingQuoteModel {
    pub fn try_from_lowest(shipment: &ShipmentModel) -> Result<Self, ShipmentModelError> {
        let rate = shipment.lowest_rate()?;
        Ok(Self {
            amount: rate.amount_minor()?,
            shipment_id: shipment.id.clone(),
            rate_id: rate.id.clone(),
        })
    }
}
