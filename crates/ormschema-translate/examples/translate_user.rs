use ormschema_core::{
    ColumnDescriptor, EntityCatalog, EntityDescriptor, PrimitiveType, RelationshipDescriptor,
};
use ormschema_translate::{AliasGenerator, TranslationOptions, translate};

fn main() {
    let catalog = EntityCatalog::new(vec![
        EntityDescriptor::new("User")
            .with_column(ColumnDescriptor::new("id", PrimitiveType::Integer).primary_key())
            .with_column(
                ColumnDescriptor::new("name", PrimitiveType::String)
                    .nullable()
                    .max_length(32),
            )
            .with_relationship(RelationshipDescriptor::many("addresses", "Address")),
        EntityDescriptor::new("Address")
            .with_column(ColumnDescriptor::new("id", PrimitiveType::Integer).primary_key())
            .with_column(ColumnDescriptor::new("email_address", PrimitiveType::String))
            .with_relationship(RelationshipDescriptor::one("user", "User")),
    ]);

    let user = catalog.entity("User").expect("user entity");
    let options = TranslationOptions::named("UserSchema")
        .with_depth(1)
        .with_alias(AliasGenerator::Camel);
    let class = translate(&catalog, user, &options).expect("translate user");

    let json = serde_json::to_string_pretty(&class.json_schema()).expect("serialize json schema");
    println!("{json}");
}
