pub mod audit_logs;
pub mod cart_items;
pub mod categories;
pub mod characteristic_types;
pub mod delivery_methods;
pub mod order_deliveries;
pub mod order_items;
pub mod orders;
pub mod product_characteristics;
pub mod products;
pub mod users;

pub use audit_logs::Entity as AuditLogs;
pub use cart_items::Entity as CartItems;
pub use categories::Entity as Categories;
pub use characteristic_types::Entity as CharacteristicTypes;
pub use delivery_methods::Entity as DeliveryMethods;
pub use order_deliveries::Entity as OrderDeliveries;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use product_characteristics::Entity as ProductCharacteristics;
pub use products::Entity as Products;
pub use users::Entity as Users;
