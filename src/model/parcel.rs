use std::result::Result;

use super::ProductModel;

#[derive(Debug, Clone, PartialEq)]
pub enum ParcelModelError {
    // product ID, name of the metadata field
    MissingField(String, &'static str),
    // product ID, name of the metadata field, original value
    InvalidNumber(String, &'static str, String),
    EmptyLines,
}

/// Dimensions of a parcel, the unit of each field follows the carrier
/// service (inches and ounces for EasyPost)
#[derive(Debug, Clone, PartialEq)]
pub struct ParcelModel {
    pub height: f64,
    pub length: f64,
    pub width: f64,
    pub weight: f64,
}

impl TryFrom<&ProductModel> for ParcelModel {
    type Error = ParcelModelError;

    fn try_from(value: &ProductModel) -> Result<Self, Self::Error> {
        let extract = |field: &'static str| -> Result<f64, ParcelModelError> {
            let raw = value
                .metadata
                .get(field)
                .ok_or(ParcelModelError::MissingField(value.id.clone(), field))?;
            raw.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .ok_or(ParcelModelError::InvalidNumber(
                    value.id.clone(),
                    field,
                    raw.clone(),
                ))
        };
        Ok(Self {
            height: extract("height")?,
            weight: extract("weight")?,
            length: extract("length")?,
            width: extract("width")?,
        })
    }
}

impl ParcelModel {
    // width is deliberately excluded, the package size is approximated
    // without true bin-packing
    fn selection_key(&self) -> f64 {
        self.height * self.weight * self.length
    }

    /// Choose the parcel with maximum `height x weight x length` as the
    /// representative package, the first maximum wins if there are ties.
    /// Weight of the chosen parcel is replaced with total weight of all
    /// the given parcels. Quantity of each order line is not considered.
    pub fn representative(parcels: &[Self]) -> Result<Self, ParcelModelError> {
        let first = parcels.first().ok_or(ParcelModelError::EmptyLines)?;
        let chosen = parcels.iter().skip(1).fold(first, |curr, p| {
            if p.selection_key() > curr.selection_key() {
                p
            } else {
                curr
            }
        });
        let total_weight = parcels.iter().map(|p| p.weight).sum::<f64>();
        Ok(Self {
            weight: total_weight,
            ..chosen.clone()
        })
    }
}
