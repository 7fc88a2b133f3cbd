use pretty_assertions::assert_eq;
use quill::stmt::{Row, Value};
use tests::{models, row, DriverOp, Test};

#[test]
fn insert_then_select_by_id() {
    let mut test = Test::new(models::shop());

    let ids = test
        .db
        .insert("Customer", [row!("name" => "Ada", "email" => "ada@example.com")])
        .unwrap();
    assert_eq!(ids, vec![Value::I64(1)]);

    let customer = test.db.select_by_id("Customer", 1).unwrap().unwrap();
    assert_eq!(customer.get("name"), Some(&Value::from("Ada")));
    assert_eq!(customer.get("email"), Some(&Value::from("ada@example.com")));
    assert_eq!(customer.get("photo"), Some(&Value::Null));

    assert!(test.db.select_by_id("Customer", 2).unwrap().is_none());
}

#[test]
fn generated_keys_come_from_the_model_sequence() {
    let mut test = Test::new(models::shop());

    let ids = test
        .db
        .insert("City", [row!("name" => "Springfield"), row!("name" => "Ogdenville")])
        .unwrap();
    assert_eq!(ids, vec![Value::I64(1), Value::I64(2)]);

    assert_eq!(
        test.log.pop(),
        DriverOp::NextSequenceValue {
            sequence: "city_seq".to_string()
        }
    );
}

#[test]
fn supplied_key_is_kept() {
    let mut test = Test::new(models::shop());

    let ids = test
        .db
        .insert("City", [row!("city_id" => 42, "name" => "Capital City")])
        .unwrap();
    assert_eq!(ids, vec![Value::I64(42)]);
    assert_eq!(test.log.count(|op| matches!(op, DriverOp::NextSequenceValue { .. })), 0);
}

#[test]
fn unknown_fields_are_ignored_on_insert() {
    let mut test = Test::new(models::shop());

    test.db
        .insert("City", [row!("city_id" => 1, "name" => "Springfield", "mayor" => "Quimby")])
        .unwrap();

    let city = test.db.select_by_id("City", 1).unwrap().unwrap();
    assert_eq!(city.get("mayor"), None);
}

#[test]
fn missing_required_value_is_rejected() {
    let mut test = Test::new(models::shop());

    let err = test
        .db
        .insert("Customer", [row!("email" => "nobody@example.com")])
        .unwrap_err();
    assert!(err.is_invalid_record());
    assert_eq!(
        err.to_string(),
        "insert row 0 into `Customer`: invalid record: field `name` requires a value"
    );

    // The empty string does not count as a value either.
    let err = test.db.insert("Customer", [row!("name" => "")]).unwrap_err();
    assert!(err.is_invalid_record());

    assert_eq!(test.log.executes(), 0);
}

#[test]
fn zero_counts_as_a_value() {
    let mut test = Test::new(models::shop());

    test.db
        .insert("Address", [row!("address_id" => 1, "city_id" => 0, "zipcode" => "00000")])
        .unwrap();

    let address = test.db.select_by_id("Address", 1).unwrap().unwrap();
    assert_eq!(address.get("city_id"), Some(&Value::I64(0)));
}

#[test]
fn defaults_fill_absent_values() {
    let mut test = Test::new(models::shop());

    test.db
        .insert(
            "Customer",
            [
                row!("customer_id" => 1, "name" => "Ada"),
                row!("customer_id" => 2, "name" => "Grace", "status" => ""),
                row!("customer_id" => 3, "name" => "Linus", "status" => "banned"),
            ],
        )
        .unwrap();

    let status = |test: &mut Test, id: i64| {
        let record = test.db.select_by_id("Customer", id).unwrap().unwrap();
        record.get("status").cloned()
    };

    assert_eq!(status(&mut test, 1), Some(Value::from("active")));
    assert_eq!(status(&mut test, 2), Some(Value::from("active")));
    assert_eq!(status(&mut test, 3), Some(Value::from("banned")));
}

#[test]
fn partial_update_leaves_other_fields() {
    let mut test = Test::new(models::shop());

    test.db
        .insert(
            "Customer",
            [row!("customer_id" => 7, "name" => "Ada", "email" => "ada@example.com")],
        )
        .unwrap();

    let count = test
        .db
        .update("Customer", [row!("customer_id" => 7, "email" => "countess@example.com")])
        .unwrap();
    assert_eq!(count, 1);

    let customer = test.db.select_by_id("Customer", 7).unwrap().unwrap();
    assert_eq!(customer.get("name"), Some(&Value::from("Ada")));
    assert_eq!(customer.get("email"), Some(&Value::from("countess@example.com")));
}

#[test]
fn update_round_trips_a_record() {
    let mut test = Test::new(models::shop());

    test.db
        .insert("City", [row!("city_id" => 1, "name" => "Springfield")])
        .unwrap();

    let city = test.db.select_by_id("City", 1).unwrap().unwrap();
    let row = city.to_row().set("name", "North Haverbrook");
    assert_eq!(test.db.update("City", [row]).unwrap(), 1);

    let city = test.db.select_by_id("City", 1).unwrap().unwrap();
    assert_eq!(city.get("name"), Some(&Value::from("North Haverbrook")));
}

#[test]
fn update_requires_the_primary_key() {
    let mut test = Test::new(models::shop());

    let err = test.db.update("City", [row!("name" => "Nowhere")]).unwrap_err();
    assert!(err.is_invalid_record());
    assert_eq!(
        err.to_string(),
        "update row 0 of `City`: invalid record: missing primary key `city_id`"
    );
}

#[test]
fn update_with_only_the_key_is_a_no_op() {
    let mut test = Test::new(models::shop());

    let count = test.db.update("City", [row!("city_id" => 1)]).unwrap();
    assert_eq!(count, 0);
    assert!(test.log.is_empty());
}

#[test]
fn update_of_missing_row_changes_nothing() {
    let mut test = Test::new(models::shop());

    let count = test
        .db
        .update("City", [row!("city_id" => 99, "name" => "Atlantis")])
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn delete_by_ids() {
    let mut test = Test::new(models::shop());

    test.db
        .insert(
            "City",
            (1..=3).map(|id| row!("city_id" => id, "name" => format!("city {id}"))),
        )
        .unwrap();

    assert_eq!(test.db.delete("City", [1, 3]).unwrap(), 2);
    assert_eq!(test.db.count_all("City").unwrap(), 1);

    test.log.clear();
    assert_eq!(test.db.delete("City", Vec::<i64>::new()).unwrap(), 0);
    assert!(test.log.is_empty());
}

#[test]
fn count_all() {
    let mut test = Test::new(models::shop());
    assert_eq!(test.db.count_all("City").unwrap(), 0);

    test.db
        .insert("City", [row!("name" => "Springfield"), row!("name" => "Shelbyville")])
        .unwrap();
    assert_eq!(test.db.count_all("city").unwrap(), 2);
}

#[test]
fn select_all_and_by_ids() {
    let mut test = Test::new(models::shop());

    test.db
        .insert(
            "City",
            (1..=4).map(|id| row!("city_id" => id, "name" => format!("city {id}"))),
        )
        .unwrap();

    assert_eq!(tests::ids(&test.db.select_all("City").unwrap()), vec![1, 2, 3, 4]);
    assert_eq!(
        tests::ids(&test.db.select_by_ids("City", [4, 2, 9]).unwrap()),
        vec![2, 4]
    );

    test.log.clear();
    assert!(test.db.select_by_ids("City", Vec::<i64>::new()).unwrap().is_empty());
    assert!(test.log.is_empty());
}

#[test]
fn dates_are_stored_as_text_and_read_as_seconds() {
    let mut test = Test::new(models::shop());

    test.db
        .insert(
            "Customer",
            [row!("customer_id" => 1, "name" => "Ada", "birthday" => "1815-12-10")],
        )
        .unwrap();

    let DriverOp::Execute { sql, params } = test.log.pop() else {
        panic!("expected an insert");
    };
    assert!(sql.starts_with("INSERT INTO"));
    assert!(params.contains(&Value::from("1815-12-10")));

    let customer = test.db.select_by_id("Customer", 1).unwrap().unwrap();
    assert_eq!(customer.get("birthday"), Some(&Value::I64(-4_861_728_000)));
}

#[test]
fn binary_values_round_trip() {
    let mut test = Test::new(models::shop());

    test.db
        .insert(
            "Customer",
            [row!("customer_id" => 1, "name" => "Ada", "photo" => vec![0xff_u8, 0x00, 0x7f])],
        )
        .unwrap();

    let customer = test.db.select_by_id("Customer", 1).unwrap().unwrap();
    assert_eq!(customer.get("photo"), Some(&Value::Bytes(vec![0xff, 0x00, 0x7f])));
}

#[test]
fn unregistered_model() {
    let mut test = Test::new(models::shop());

    let err = test.db.select_all("Invoice").unwrap_err();
    assert!(err.is_model_not_registered());

    let err = test.db.insert("Invoice", [Row::new()]).unwrap_err();
    assert!(err.is_model_not_registered());
}

#[test]
fn driver_errors_propagate() {
    let mut test = Test::new(models::shop());

    test.db
        .insert("City", [row!("city_id" => 1, "name" => "Springfield")])
        .unwrap();

    let err = test
        .db
        .insert("City", [row!("city_id" => 1, "name" => "Springfield again")])
        .unwrap_err();
    assert!(err.is_driver_operation_failed());
}

#[test]
fn blank_dates_are_stored_as_null() {
    let mut test = Test::new(models::shop());

    test.db
        .insert("Customer", [row!("customer_id" => 1, "name" => "Ada", "birthday" => "")])
        .unwrap();

    let customer = test.db.select_by_id("Customer", 1).unwrap().unwrap();
    assert_eq!(customer.get("birthday"), Some(&Value::Null));
}

#[test]
fn blank_date_update_clears_the_field() {
    let mut test = Test::new(models::shop());

    test.db
        .insert(
            "Customer",
            [row!("customer_id" => 1, "name" => "Ada", "birthday" => "1815-12-10")],
        )
        .unwrap();

    let count = test
        .db
        .update("Customer", [row!("customer_id" => 1, "birthday" => "")])
        .unwrap();
    assert_eq!(count, 1);

    let customer = test.db.select_by_id("Customer", 1).unwrap().unwrap();
    assert_eq!(customer.get("birthday"), Some(&Value::Null));
    assert_eq!(customer.get("name"), Some(&Value::from("Ada")));
}

#[test]
fn driver_errors_name_the_operation() {
    let mut test = Test::new(models::shop());
    test.db.drop_schema().unwrap();

    let err = test.db.delete("City", [1]).unwrap_err();
    assert!(err.is_driver_operation_failed());
    assert!(err.to_string().starts_with("delete from `city`: "));

    let err = test.db.count_all("City").unwrap_err();
    assert!(err.is_driver_operation_failed());
    assert!(err.to_string().starts_with("count rows of `city`: "));

    let err = test.db.select_all("City").unwrap_err();
    assert!(err.to_string().starts_with("select from `city`: "));
}
