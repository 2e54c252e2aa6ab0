use crate::config::AppShippingOriginCfg;
use crate::constant::shipping::DOMESTIC_COUNTRY;

#[derive(Debug, Clone)]
pub struct PostalAddressModel {
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String, // ISO 3166-1 alpha-2
}

/// destination of an order, collected from buyer's checkout form
#[derive(Debug, Clone)]
pub struct AddressModel {
    pub name: String,
    pub address: PostalAddressModel,
}

/// address layout accepted by the carrier service
#[derive(Debug, Clone, PartialEq)]
pub struct CarrierAddressModel {
    pub name: String,
    pub company: Option<String>,
    pub street1: String,
    pub street2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl AddressModel {
    pub fn is_domestic(&self) -> bool {
        self.address.country.as_str() == DOMESTIC_COUNTRY
    }
}

impl From<&AddressModel> for CarrierAddressModel {
    fn from(value: &AddressModel) -> Self {
        let a = &value.address;
        Self {
            name: value.name.clone(),
            company: None,
            street1: a.line1.clone(),
            street2: a.line2.clone(),
            city: a.city.clone(),
            state: a.state.clone(),
            zip: a.postal_code.clone(),
            country: a.country.clone(),
            phone: None,
            email: None,
        }
    }
}

impl From<&AppShippingOriginCfg> for CarrierAddressModel {
    fn from(value: &AppShippingOriginCfg) -> Self {
        Self {
            name: value.name.clone(),
            company: value.company.clone(),
            street1: value.street1.clone(),
            street2: value.street2.clone(),
            city: value.city.clone(),
            state: value.state.clone(),
            zip: value.zip.clone(),
            country: value.country.clone(),
            phone: value.phone.clone(),
            email: value.email.clone(),
        }
    }
}
