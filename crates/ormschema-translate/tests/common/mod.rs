#![allow(dead_code)]

use ormschema_core::{
    ColumnDescriptor, EntityCatalog, EntityDescriptor, PrimitiveType, RelationshipDescriptor,
};
use serde_json::{Value, json};

/// `User` and `Address`, back-populating each other.
pub fn user_address_catalog() -> EntityCatalog {
    let user = EntityDescriptor::new("User")
        .with_table("users")
        .with_column(ColumnDescriptor::new("id", PrimitiveType::Integer).primary_key())
        .with_column(
            ColumnDescriptor::new("name", PrimitiveType::String)
                .nullable()
                .max_length(32)
                .comment("name"),
        )
        .with_column(ColumnDescriptor::new("fullname", PrimitiveType::String).nullable())
        .with_column(ColumnDescriptor::new("nickname", PrimitiveType::String).nullable())
        .with_column(
            ColumnDescriptor::new("created", PrimitiveType::DateTime)
                .nullable()
                .with_default(),
        )
        .with_column(
            ColumnDescriptor::new("updated", PrimitiveType::DateTime)
                .nullable()
                .with_default(),
        )
        .with_relationship(RelationshipDescriptor::many("addresses", "Address"));

    let address = EntityDescriptor::new("Address")
        .with_table("addresses")
        .with_column(ColumnDescriptor::new("id", PrimitiveType::Integer).primary_key())
        .with_column(ColumnDescriptor::new("email_address", PrimitiveType::String))
        .with_column(ColumnDescriptor::new("user_id", PrimitiveType::Integer).nullable())
        .with_relationship(RelationshipDescriptor::one("user", "User"));

    EntityCatalog::new(vec![user, address])
}

pub fn user(catalog: &EntityCatalog) -> &EntityDescriptor {
    catalog.entity("User").expect("user entity")
}

pub fn address(catalog: &EntityCatalog) -> &EntityDescriptor {
    catalog.entity("Address").expect("address entity")
}

fn ed_columns() -> Value {
    json!({
        "id": 1,
        "name": "ed",
        "fullname": "Ed Jones",
        "nickname": "edsnickname",
        "created": "2024-05-01T10:00:00+00:00",
        "updated": "2024-05-01T10:00:00Z"
    })
}

fn address_columns(id: i64, email: &str) -> Value {
    json!({ "id": id, "email_address": email, "user_id": 1 })
}

fn with_field(mut object: Value, key: &str, value: Value) -> Value {
    if let Value::Object(map) = &mut object {
        map.insert(key.to_string(), value);
    }
    object
}

/// Loaded `ed` user with both addresses, each pointing back at `ed`.
pub fn ed_user() -> Value {
    let addresses = [(1, "ed@example.com"), (2, "eddy@example.com")]
        .into_iter()
        .map(|(id, email)| with_field(address_columns(id, email), "user", ed_columns()))
        .collect();
    with_field(ed_columns(), "addresses", Value::Array(addresses))
}

/// Loaded user without addresses.
pub fn user_without_addresses() -> Value {
    json!({
        "id": 2,
        "name": "noo",
        "fullname": "NoneAddress",
        "nickname": "NoneAddress",
        "created": "2024-05-02T08:30:00+00:00",
        "updated": "2024-05-02T08:30:00Z",
        "addresses": []
    })
}

/// Loaded addresses, each with its user and the user's addresses.
pub fn addresses() -> Vec<Value> {
    let flat = vec![
        address_columns(1, "ed@example.com"),
        address_columns(2, "eddy@example.com"),
    ];
    let user = with_field(ed_columns(), "addresses", Value::Array(flat.clone()));
    flat.into_iter()
        .map(|address| with_field(address, "user", user.clone()))
        .collect()
}

/// Drop the server-filled timestamp fields from a dumped user.
pub fn without_timestamps(mut value: Value) -> Value {
    if let Value::Object(map) = &mut value {
        assert!(map.remove("created").is_some(), "created missing");
        assert!(map.remove("updated").is_some(), "updated missing");
    }
    value
}
