use pretty_assertions::assert_eq;
use zerogen_core::config::Config;
use zerogen_core::schema::{orm, zero, Builder};

fn schema(src: &str) -> orm::Schema {
    src.parse().expect("schema document should parse")
}

fn config(src: &str) -> Config {
    src.parse().expect("config should parse")
}

const SCHEMA: &str = r#"
    [[table]]
    name = "user"
    [[table.column]]
    name = "id"
    type = "text"
    primary_key = true
    [[table.column]]
    name = "email"
    type = "text"
    [[table.column]]
    name = "name"
    type = "text"
    nullable = true
    [[table.column]]
    name = "password"
    type = "text"
    [[table.column]]
    name = "joined_at"
    type = "timestamp"
    [[table.column]]
    name = "settings"
    type = "json"
    custom_type = "UserSettings"
    [[table.relation]]
    kind = "many"
    name = "posts"
    source_field = "id"
    dest_table = "post"
    dest_field = "author_id"

    [[table]]
    name = "post"
    [[table.column]]
    name = "id"
    type = "text"
    primary_key = true
    [[table.column]]
    name = "author_id"
    type = "text"
    references = { table = "user", column = "id" }
    [[table.relation]]
    kind = "one"
    name = "author"
    source_field = "author_id"
    dest_table = "user"
    dest_field = "id"
"#;

#[test]
fn column_order_follows_declaration_order() {
    // The allow-list is deliberately written out of declaration order.
    let resolved = Builder::new()
        .build(
            &schema(SCHEMA),
            &config(
                r#"
                schema = "schema.toml"

                [tables.user]
                settings = true
                name = true
                id = true
                email = true
            "#,
            ),
        )
        .unwrap();

    let user = resolved.table("user").unwrap();
    let names: Vec<_> = user.columns.keys().map(String::as_str).collect();
    assert_eq!(names, ["id", "email", "name", "settings"]);
}

#[test]
fn column_specs_carry_kind_nullability_and_custom_type() {
    let resolved = Builder::new()
        .build(
            &schema(SCHEMA),
            &config(
                r#"
                schema = "schema.toml"

                [tables]
                user = true
                post = true
            "#,
            ),
        )
        .unwrap();

    let user = resolved.table("user").unwrap();
    assert_eq!(
        user.column("joined_at").unwrap(),
        &zero::ColumnSpec {
            kind: zero::ValueKind::Number,
            optional: false,
            custom_type: None,
        }
    );
    assert_eq!(
        user.column("name").unwrap(),
        &zero::ColumnSpec {
            kind: zero::ValueKind::String,
            optional: true,
            custom_type: None,
        }
    );
    assert_eq!(
        user.column("settings").unwrap(),
        &zero::ColumnSpec {
            kind: zero::ValueKind::Json,
            optional: false,
            custom_type: Some("UserSettings".into()),
        }
    );
    assert_eq!(user.primary_key, vec!["id".to_string()]);
}

#[test]
fn excluding_a_table_drops_relations_pointing_at_it() {
    let resolved = Builder::new()
        .build(
            &schema(SCHEMA),
            &config(
                r#"
                schema = "schema.toml"

                [tables]
                user = true
            "#,
            ),
        )
        .unwrap();

    assert!(resolved.table("post").is_none());
    let user = resolved.table("user").unwrap();
    assert!(user.relationship("posts").is_none());
    assert!(user.relationships.is_empty());
}

#[test]
fn table_mapped_to_false_is_excluded() {
    let resolved = Builder::new()
        .build(
            &schema(SCHEMA),
            &config(
                r#"
                schema = "schema.toml"

                [tables]
                user = true
                post = false
            "#,
            ),
        )
        .unwrap();

    assert!(resolved.table("post").is_none());
    assert!(resolved.table("user").unwrap().relationship("posts").is_none());
}

#[test]
fn unknown_column_in_allow_list_is_an_error() {
    let err = Builder::new()
        .build(
            &schema(SCHEMA),
            &config(
                r#"
                schema = "schema.toml"

                [tables.user]
                id = true
                nickname = true
            "#,
            ),
        )
        .unwrap_err();

    assert!(err.is_invalid_config());
    assert!(err.to_string().contains("user.nickname"));
}

#[test]
fn unknown_column_mapped_to_false_is_an_error() {
    // A misspelled exclusion is just as wrong as a misspelled selection.
    let err = Builder::new()
        .build(
            &schema(SCHEMA),
            &config(
                r#"
                schema = "schema.toml"

                [tables.user]
                id = true
                passwrd = false
            "#,
            ),
        )
        .unwrap_err();

    assert!(err.is_invalid_config());
    assert!(err.to_string().contains("user.passwrd"));
}

#[test]
fn unknown_table_in_config_is_an_error() {
    let err = Builder::new()
        .build(
            &schema(SCHEMA),
            &config(
                r#"
                schema = "schema.toml"

                [tables]
                user = true
                comments = true
            "#,
            ),
        )
        .unwrap_err();

    assert!(err.is_invalid_config());
    assert!(err.to_string().contains("unknown table `comments`"));
}

#[test]
fn unselected_primary_key_is_an_error() {
    let err = Builder::new()
        .build(
            &schema(SCHEMA),
            &config(
                r#"
                schema = "schema.toml"

                [tables.user]
                email = true
                name = true
            "#,
            ),
        )
        .unwrap_err();

    assert!(err.is_invalid_config());
    assert!(err.to_string().contains("primary key column `user.id`"));
}

#[test]
fn version_defaults_to_one_and_can_be_overridden() {
    let source = schema(SCHEMA);

    let defaulted = Builder::new()
        .build(
            &source,
            &config(
                r#"
                schema = "schema.toml"

                [tables]
                user = true
            "#,
            ),
        )
        .unwrap();
    assert_eq!(defaulted.version, 1);

    let pinned = Builder::new()
        .build(
            &source,
            &config(
                r#"
                schema = "schema.toml"
                version = 7

                [tables]
                user = true
            "#,
            ),
        )
        .unwrap();
    assert_eq!(pinned.version, 7);
}

#[test]
fn excluded_junction_drops_the_many_to_many_relation() {
    let source = schema(
        r#"
        [[table]]
        name = "user"
        [[table.column]]
        name = "id"
        type = "text"
        primary_key = true
        [[table.relation]]
        kind = "many_to_many"
        name = "groups"
        dest_table = "group"
        junction = "users_to_group"

        [[table]]
        name = "group"
        [[table.column]]
        name = "id"
        type = "text"
        primary_key = true

        [[table]]
        name = "users_to_group"
        [[table.column]]
        name = "user_id"
        type = "text"
        primary_key = true
        references = { table = "user", column = "id" }
        [[table.column]]
        name = "group_id"
        type = "text"
        primary_key = true
        references = { table = "group", column = "id" }
    "#,
    );
    let resolved = Builder::new()
        .build(
            &source,
            &config(
                r#"
                schema = "schema.toml"

                [tables]
                user = true
                group = true
            "#,
            ),
        )
        .unwrap();

    assert!(resolved.table("user").unwrap().relationship("groups").is_none());
}

#[test]
fn duplicate_column_is_a_schema_error() {
    let source = schema(
        r#"
        [[table]]
        name = "user"
        [[table.column]]
        name = "id"
        type = "text"
        primary_key = true
        [[table.column]]
        name = "id"
        type = "text"
    "#,
    );
    let err = Builder::new()
        .build(
            &source,
            &config(
                r#"
                schema = "schema.toml"

                [tables]
                user = true
            "#,
            ),
        )
        .unwrap_err();

    assert!(err.is_invalid_schema());
    assert!(err.to_string().contains("more than once"));
}

#[test]
fn table_without_primary_key_is_a_schema_error() {
    let source = schema(
        r#"
        [[table]]
        name = "log"
        [[table.column]]
        name = "message"
        type = "text"
    "#,
    );
    let err = Builder::new()
        .build(
            &source,
            &config(
                r#"
                schema = "schema.toml"

                [tables]
                log = true
            "#,
            ),
        )
        .unwrap_err();

    assert!(err.is_invalid_schema());
    assert!(err.to_string().contains("no primary key"));
}
