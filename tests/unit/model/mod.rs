mod customs;
mod shipment;

use std::collections::HashMap;

use shipping::model::{OrderLineModel, ProductKind, ProductModel};

pub(crate) use shipment::{ut_rate, ut_shipment};

pub(crate) fn ut_product(
    id: &str,
    kind: ProductKind,
    dimensions: &[(&str, &str)],
) -> ProductModel {
    let metadata = dimensions
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect::<HashMap<_, _>>();
    ProductModel {
        id: id.to_string(),
        name: format!("name-of-{id}"),
        description: format!("description of {id}"),
        kind,
        metadata,
    }
}

pub(crate) fn ut_oline(id: &str, quantity: u32, hwlw: [&str; 4]) -> OrderLineModel {
    let dimensions = [
        ("height", hwlw[0]),
        ("weight", hwlw[1]),
        ("length", hwlw[2]),
        ("width", hwlw[3]),
    ];
    OrderLineModel {
        product: ut_product(id, ProductKind::Good, &dimensions),
        quantity,
    }
}
