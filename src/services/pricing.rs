//! Price snapshot taken at order time.
//!
//! Unit prices are read from the catalog inside the caller's transaction and
//! never taken from client input or from an earlier read of the cart.

use std::collections::HashMap;

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect};

use crate::{
    entity::{
        cart_items::Model as CartModel,
        products::{Column as ProdCol, Entity as Products},
    },
    error::{AppError, AppResult},
};

/// One cart row priced at snapshot time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub product_id: i64,
    pub quantity: i32,
    pub unit_price: i64,
    pub total_price: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceSnapshot {
    pub lines: Vec<PricedLine>,
    pub total: i64,
}

/// Reads the current price of every product in `cart` and prices each row.
pub async fn snapshot_prices<C: ConnectionTrait>(
    db: &C,
    cart: &[CartModel],
) -> AppResult<PriceSnapshot> {
    let product_ids: Vec<i64> = cart.iter().map(|item| item.product_id).collect();

    let prices: HashMap<i64, i64> = Products::find()
        .select_only()
        .column(ProdCol::Id)
        .column(ProdCol::Price)
        .filter(ProdCol::Id.is_in(product_ids))
        .into_tuple::<(i64, i64)>()
        .all(db)
        .await?
        .into_iter()
        .collect();

    price_lines(
        cart.iter().map(|item| (item.product_id, item.quantity)),
        &prices,
    )
}

/// Prices `(product_id, quantity)` pairs against `prices`, keeping input order.
pub fn price_lines(
    entries: impl IntoIterator<Item = (i64, i32)>,
    prices: &HashMap<i64, i64>,
) -> AppResult<PriceSnapshot> {
    let mut lines = Vec::new();
    let mut total: i64 = 0;

    for (product_id, quantity) in entries {
        if quantity <= 0 {
            return Err(AppError::BadRequest("Cart has invalid quantity".into()));
        }
        let unit_price = *prices.get(&product_id).ok_or_else(|| {
            AppError::Conflict(format!("product {product_id} is no longer available"))
        })?;
        let total_price = line_total(unit_price, quantity)?;
        total = total
            .checked_add(total_price)
            .ok_or_else(|| AppError::BadRequest("order total is too large".into()))?;
        lines.push(PricedLine {
            product_id,
            quantity,
            unit_price,
            total_price,
        });
    }

    Ok(PriceSnapshot { lines, total })
}

pub fn line_total(unit_price: i64, quantity: i32) -> AppResult<i64> {
    unit_price
        .checked_mul(i64::from(quantity))
        .ok_or_else(|| AppError::BadRequest("line total is too large".into()))
}
