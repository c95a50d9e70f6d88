use ormschema_core::{EntityCatalog, Multiplicity, PrimitiveType, validate_catalog};

const CATALOG: &str = r#"{
  "entities": [
    {
      "name": "User",
      "table": "users",
      "columns": [
        { "name": "id", "type": "integer", "primary_key": true },
        { "name": "name", "type": "string", "nullable": true, "max_length": 32, "comment": "name" }
      ],
      "relationships": [
        { "name": "addresses", "target": "Address", "multiplicity": "many" }
      ]
    },
    {
      "name": "Address",
      "columns": [
        { "name": "id", "type": "integer", "primary_key": true },
        { "name": "email_address", "type": "string" }
      ],
      "relationships": [
        { "name": "user", "target": "User", "multiplicity": "one" }
      ]
    }
  ]
}"#;

#[test]
fn parses_catalog_with_defaults() {
    let catalog: EntityCatalog = serde_json::from_str(CATALOG).expect("parse catalog");
    validate_catalog(&catalog).expect("valid catalog");

    assert_eq!(catalog.catalog_version, ormschema_core::CATALOG_VERSION);
    let user = catalog.entity("User").expect("user entity");
    assert_eq!(user.table.as_deref(), Some("users"));

    let name = user.column("name").expect("name column");
    assert_eq!(name.primitive, PrimitiveType::String);
    assert!(name.nullable);
    assert_eq!(name.max_length, Some(32));
    assert!(!name.has_default);

    let id = user.column("id").expect("id column");
    assert!(id.primary_key);
    assert!(!id.nullable);

    let addresses = user.relationship("addresses").expect("addresses relationship");
    assert_eq!(addresses.multiplicity, Multiplicity::Many);
    assert_eq!(catalog.target_of(addresses).expect("target").name, "Address");
}

#[test]
fn serializes_column_without_empty_options() {
    let catalog: EntityCatalog = serde_json::from_str(CATALOG).expect("parse catalog");
    let address = catalog.entity("Address").expect("address entity");
    let json = serde_json::to_value(address.column("email_address")).expect("serialize column");

    assert_eq!(
        json,
        serde_json::json!({
            "name": "email_address",
            "type": "string",
            "nullable": false,
            "has_default": false,
            "primary_key": false
        })
    );
}

#[test]
fn catalog_json_schema_describes_descriptors() {
    let schema = schemars::schema_for!(EntityCatalog);
    let json = serde_json::to_value(&schema).expect("serialize json schema");

    let definitions = json["definitions"].as_object().expect("definitions");
    for name in [
        "EntityDescriptor",
        "ColumnDescriptor",
        "RelationshipDescriptor",
        "PrimitiveType",
        "Multiplicity",
    ] {
        assert!(definitions.contains_key(name), "missing definition {name}");
    }
}
