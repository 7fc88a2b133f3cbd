use pretty_assertions::assert_eq;
use quill::{
    schema::{Cast, Field, Model},
    Db,
};
use quill_driver_sqlite::Sqlite;
use tests::{models, DriverOp, LoggingConnection, Test};

#[test]
fn push_schema_creates_every_table() {
    tests::init_tracing();

    let conn = LoggingConnection::new(Sqlite::in_memory().connect().unwrap());
    let ops = conn.ops_log_handle();

    let mut builder = Db::builder();
    for model in models::shop() {
        builder.register(model);
    }
    let mut db = builder.build(conn).unwrap();
    db.push_schema().unwrap();

    let tables: Vec<_> = ops
        .lock()
        .unwrap()
        .iter()
        .filter_map(|op| match op {
            DriverOp::CreateTable { table } => Some(table.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(tables, vec!["city", "address", "customer", "orders"]);
}

#[test]
fn drop_schema_is_repeatable() {
    let mut test = Test::new(models::blogging());

    test.db.drop_schema().unwrap();
    test.db.drop_schema().unwrap();

    let err = test.db.select_all("Blog").unwrap_err();
    assert!(err.is_driver_operation_failed());
    assert!(err.to_string().starts_with("select from `blog`: "));

    test.db.push_schema().unwrap();
    assert!(test.db.select_all("Blog").unwrap().is_empty());
}

#[test]
fn dangling_key_target_fails_the_build() {
    let mut builder = Db::builder();
    builder.register(models::order());

    let err = builder
        .build(Sqlite::in_memory().connect().unwrap())
        .unwrap_err();
    assert!(err.is_invalid_schema());
    assert!(err.is_model_not_registered());
}

#[test]
fn models_resolve_case_insensitively() {
    let test = Test::new(models::shop());

    let model = test.db.model("ORDER").unwrap();
    assert_eq!(model.name(), "Order");
    assert_eq!(model.table(), "orders");
    assert_eq!(test.db.registry().len(), 4);
}

#[test]
fn duplicate_models_are_rejected() {
    let mut builder = Db::builder();
    builder.register(models::city()).register(models::city());

    let err = builder
        .build(Sqlite::in_memory().connect().unwrap())
        .unwrap_err();
    assert!(err.is_invalid_schema());
}

#[test]
fn tables_accept_every_cast() {
    let gadget = Model::builder("Gadget")
        .field(Field::builder("gadget_id", Cast::Integer).primary_key().build().unwrap())
        .field(Field::builder("label", Cast::String).size(16).build().unwrap())
        .field(Field::builder("weight", Cast::Numeric).size(8).build().unwrap())
        .field(Field::builder("blob", Cast::Binary).build().unwrap())
        .field(Field::builder("made_on", Cast::Date).build().unwrap())
        .field(Field::builder("made_at", Cast::Time).build().unwrap())
        .field(Field::builder("seen_at", Cast::Timestamp).build().unwrap())
        .build()
        .unwrap();

    let mut test = Test::new([gadget]);

    test.db
        .insert(
            "Gadget",
            [tests::row!(
                "label" => "widget",
                "weight" => 1.5,
                "blob" => vec![1_u8],
                "made_on" => "2024-02-29",
                "made_at" => "2024-02-29 23:59:59",
                "seen_at" => 1_709_251_199_i64,
            )],
        )
        .unwrap();

    let gadget = test.db.select_by_id("Gadget", 1).unwrap().unwrap();
    assert_eq!(gadget.get("made_on").and_then(|v| v.as_i64()), Some(1_709_164_800));
    assert_eq!(gadget.get("made_at").and_then(|v| v.as_i64()), Some(1_709_251_199));
    assert_eq!(gadget.get("seen_at").and_then(|v| v.as_i64()), Some(1_709_251_199));
    assert_eq!(gadget.get("weight").and_then(|v| v.as_f64()), Some(1.5));
}
