use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use storefront_api::{
    config::AppConfig,
    db::{DbConn, create_orm_conn, run_migrations},
    entity::{
        categories, characteristic_types, delivery_methods, product_characteristics, products,
        users,
    },
    services::auth_service::hash_password,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url, 1).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    let admin_id = ensure_user(&orm, "admin@example.com", "admin123", "admin").await?;
    let user_id = ensure_user(&orm, "user@example.com", "user123", "user").await?;
    let category_id = ensure_category(&orm, "Merchandise", "merchandise").await?;
    seed_products(&orm, category_id).await?;
    seed_characteristics(&orm).await?;
    seed_delivery_methods(&orm).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

async fn ensure_user(orm: &DbConn, email: &str, password: &str, role: &str) -> anyhow::Result<i64> {
    let existing = users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(orm)
        .await?;

    let user_id = match existing {
        Some(user) if user.role == role => user.id,
        Some(user) => {
            let mut active: users::ActiveModel = user.into();
            active.role = Set(role.to_string());
            active.update(orm).await?.id
        }
        None => {
            let password_hash = hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;
            users::ActiveModel {
                id: NotSet,
                email: Set(email.to_string()),
                password_hash: Set(password_hash),
                role: Set(role.to_string()),
                first_name: Set(None),
                last_name: Set(None),
                phone: Set(None),
                created_at: Set(Utc::now().into()),
            }
            .insert(orm)
            .await?
            .id
        }
    };

    println!("Ensured user {email} (role={role})");
    Ok(user_id)
}

async fn ensure_category(orm: &DbConn, name: &str, slug: &str) -> anyhow::Result<i64> {
    if let Some(existing) = categories::Entity::find()
        .filter(categories::Column::Name.eq(name))
        .one(orm)
        .await?
    {
        return Ok(existing.id);
    }

    let category = categories::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        description: Set(None),
        slug: Set(Some(slug.to_string())),
        parent_id: Set(None),
        created_at: Set(Utc::now().into()),
    }
    .insert(orm)
    .await?;
    Ok(category.id)
}

async fn seed_products(orm: &DbConn, category_id: i64) -> anyhow::Result<()> {
    let items = [
        ("Axum Hoodie", "Warm hoodie for Rustaceans", 5500),
        ("Ferris Mug", "Coffee tastes better with Ferris", 1200),
        ("Rust Sticker Pack", "Decorate your laptop", 500),
        ("E-book: Async Rust", "Learn async Rust patterns", 2500),
    ];

    let now = Utc::now();
    let rows = items.into_iter().map(|(name, desc, price)| products::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        description: Set(Some(desc.to_string())),
        price: Set(price),
        category_id: Set(Some(category_id)),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    });

    products::Entity::insert_many(rows)
        .on_conflict(OnConflict::column(products::Column::Name).do_nothing().to_owned())
        .exec_without_returning(orm)
        .await?;

    println!("Seeded products");
    Ok(())
}

async fn seed_characteristics(orm: &DbConn) -> anyhow::Result<()> {
    let kinds = [("Material", None), ("Weight", Some("g"))];
    let rows = kinds.into_iter().map(|(name, unit)| characteristic_types::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        unit: Set(unit.map(str::to_string)),
        category_id: Set(None),
    });
    characteristic_types::Entity::insert_many(rows)
        .on_conflict(OnConflict::column(characteristic_types::Column::Name).do_nothing().to_owned())
        .exec_without_returning(orm)
        .await?;

    let hoodie = products::Entity::find()
        .filter(products::Column::Name.eq("Axum Hoodie"))
        .one(orm)
        .await?;
    let material = characteristic_types::Entity::find()
        .filter(characteristic_types::Column::Name.eq("Material"))
        .one(orm)
        .await?;
    if let (Some(hoodie), Some(material)) = (hoodie, material) {
        product_characteristics::Entity::insert(product_characteristics::ActiveModel {
            id: NotSet,
            product_id: Set(hoodie.id),
            characteristic_type_id: Set(material.id),
            value: Set("Cotton".to_string()),
        })
        .on_conflict(
            OnConflict::columns([
                product_characteristics::Column::ProductId,
                product_characteristics::Column::CharacteristicTypeId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(orm)
        .await?;
    }

    println!("Seeded characteristics");
    Ok(())
}

async fn seed_delivery_methods(orm: &DbConn) -> anyhow::Result<()> {
    let methods = [
        ("Courier", "Door to door within the city", 500, Some(10000), Some(1)),
        ("Post", "National postal service", 300, None, Some(5)),
        ("Pickup", "Collect at the store", 0, None, None),
    ];

    let now = Utc::now();
    let rows = methods
        .into_iter()
        .map(|(name, desc, base_cost, free_threshold, days)| delivery_methods::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            description: Set(Some(desc.to_string())),
            base_cost: Set(base_cost),
            free_threshold: Set(free_threshold),
            estimated_days: Set(days),
            created_at: Set(now.into()),
        });

    delivery_methods::Entity::insert_many(rows)
        .on_conflict(OnConflict::column(delivery_methods::Column::Name).do_nothing().to_owned())
        .exec_without_returning(orm)
        .await?;

    println!("Seeded delivery methods");
    Ok(())
}
