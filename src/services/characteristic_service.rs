//! Product characteristics: typed name/unit pairs with a per-product value.

use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde_json::json;

use crate::{
    audit,
    db::commit_or_rollback,
    dto::products::{
        CharacteristicTypeList, CharacteristicValue, CreateCharacteristicTypeRequest,
        ProductDetails, ReplaceCharacteristicsRequest,
    },
    entity::{
        categories::Entity as Categories,
        characteristic_types::{
            ActiveModel as TypeActive, Column as TypeCol, Entity as CharacteristicTypes,
            Model as TypeModel,
        },
        product_characteristics::{
            ActiveModel as CharacteristicActive, Column as CharacteristicCol,
            Entity as ProductCharacteristics, Model as CharacteristicModel,
        },
        products::Entity as Products,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{CharacteristicType, ProductCharacteristic},
    response::{ApiResponse, Meta},
    services::{category_service::category_from_entity, product_service::product_from_entity},
    state::AppState,
};

/// Product with its category and characteristics ordered by type name.
pub async fn get_product_details(
    state: &AppState,
    product_id: i64,
) -> AppResult<ApiResponse<ProductDetails>> {
    let (product, category) = Products::find_by_id(product_id)
        .find_also_related(Categories)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut characteristics: Vec<ProductCharacteristic> = ProductCharacteristics::find()
        .filter(CharacteristicCol::ProductId.eq(product.id))
        .order_by_asc(CharacteristicCol::Id)
        .find_also_related(CharacteristicTypes)
        .all(&state.orm)
        .await?
        .into_iter()
        .filter_map(|(value, kind)| kind.map(|kind| characteristic_from_entity(value, kind)))
        .collect();
    characteristics.sort_by(|a, b| a.characteristic_name.cmp(&b.characteristic_name));

    Ok(ApiResponse::success(
        "Product details",
        ProductDetails {
            product: product_from_entity(product),
            category: category.map(category_from_entity),
            characteristics,
        },
        Some(Meta::empty()),
    ))
}

pub async fn list_characteristic_types(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<CharacteristicTypeList>> {
    ensure_admin(user)?;
    let items = CharacteristicTypes::find()
        .order_by_asc(TypeCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(characteristic_type_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Characteristic types",
        CharacteristicTypeList { items },
        Some(Meta::empty()),
    ))
}

pub async fn create_characteristic_type(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCharacteristicTypeRequest,
) -> AppResult<ApiResponse<CharacteristicType>> {
    ensure_admin(user)?;
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("name is required".into()));
    }
    if let Some(category_id) = payload.category_id {
        if Categories::find_by_id(category_id).one(&state.orm).await?.is_none() {
            return Err(AppError::BadRequest("category not found".into()));
        }
    }

    let kind = TypeActive {
        id: NotSet,
        name: Set(name),
        unit: Set(payload.unit.filter(|u| !u.trim().is_empty())),
        category_id: Set(payload.category_id),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.orm,
        user.user_id,
        "characteristic_type_create",
        "characteristic_types",
        json!({ "characteristic_type_id": kind.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Characteristic type created",
        characteristic_type_from_entity(kind),
        Some(Meta::empty()),
    ))
}

/// Replaces every characteristic of a product in one transaction. An unknown
/// characteristic type fails the whole replacement and keeps the old set.
pub async fn replace_product_characteristics(
    state: &AppState,
    user: &AuthUser,
    product_id: i64,
    payload: ReplaceCharacteristicsRequest,
) -> AppResult<ApiResponse<ProductDetails>> {
    ensure_admin(user)?;
    validate_values(&payload.items)?;
    if Products::find_by_id(product_id).one(&state.orm).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let txn = state.orm.begin().await?;
    let outcome = write_characteristics(&txn, product_id, &payload.items).await;
    commit_or_rollback(txn, outcome).await?;

    audit::record(
        &state.orm,
        user.user_id,
        "product_characteristics_replace",
        "product_characteristics",
        json!({ "product_id": product_id, "count": payload.items.len() }),
    )
    .await;

    get_product_details(state, product_id).await
}

async fn write_characteristics(
    txn: &DatabaseTransaction,
    product_id: i64,
    items: &[CharacteristicValue],
) -> AppResult<()> {
    ProductCharacteristics::delete_many()
        .filter(CharacteristicCol::ProductId.eq(product_id))
        .exec(txn)
        .await?;

    for item in items {
        let kind = CharacteristicTypes::find_by_id(item.characteristic_type_id)
            .one(txn)
            .await?;
        if kind.is_none() {
            return Err(AppError::BadRequest(format!(
                "characteristic type {} not found",
                item.characteristic_type_id
            )));
        }
        CharacteristicActive {
            id: NotSet,
            product_id: Set(product_id),
            characteristic_type_id: Set(item.characteristic_type_id),
            value: Set(item.value.trim().to_string()),
        }
        .insert(txn)
        .await?;
    }
    Ok(())
}

/// Values must be non-blank and each type may appear once.
fn validate_values(items: &[CharacteristicValue]) -> AppResult<()> {
    let mut seen = std::collections::HashSet::new();
    for item in items {
        if item.value.trim().is_empty() {
            return Err(AppError::BadRequest("characteristic value is required".into()));
        }
        if !seen.insert(item.characteristic_type_id) {
            return Err(AppError::BadRequest(format!(
                "characteristic type {} given twice",
                item.characteristic_type_id
            )));
        }
    }
    Ok(())
}

fn characteristic_from_entity(value: CharacteristicModel, kind: TypeModel) -> ProductCharacteristic {
    ProductCharacteristic {
        id: value.id,
        characteristic_type_id: kind.id,
        characteristic_name: kind.name,
        characteristic_unit: kind.unit,
        value: value.value,
    }
}

fn characteristic_type_from_entity(model: TypeModel) -> CharacteristicType {
    CharacteristicType {
        id: model.id,
        name: model.name,
        unit: model.unit,
        category_id: model.category_id,
    }
}
