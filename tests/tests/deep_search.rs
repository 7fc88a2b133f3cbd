use pretty_assertions::assert_eq;
use quill::{stmt::Value, Config};
use tests::{ids, models, row, seed_shop, Test};

fn shop() -> Test {
    let mut test = Test::new(models::shop());
    seed_shop(&mut test.db);
    test.log.clear();
    test
}

#[test]
fn orders_by_customer_address_zipcode() {
    let mut test = shop();

    let orders = test
        .db
        .deep_search("Order.customer_id.address_id.zipcode", ["01234", "4567"])
        .unwrap();

    // Orders 1 and 4 go to customer 1 (01234), order 2 to customer 2 (4567).
    assert_eq!(ids(&orders), vec![1, 2, 4]);

    // One query per hop, each on the whole id set.
    assert_eq!(test.log.queries(), 3);
}

#[test]
fn single_hop() {
    let mut test = shop();

    let orders = test.db.deep_search("Order.customer_id.name", ["customer 3"]).unwrap();
    assert_eq!(ids(&orders), vec![3]);
}

#[test]
fn direct_field_match() {
    let mut test = shop();

    let addresses = test.db.deep_search("Address.zipcode", ["99999"]).unwrap();
    assert_eq!(ids(&addresses), vec![3]);
}

#[test]
fn no_matching_leaf_stops_early() {
    let mut test = shop();

    let orders = test
        .db
        .deep_search("Order.customer_id.address_id.zipcode", ["00000"])
        .unwrap();
    assert!(orders.is_empty());
    assert_eq!(test.log.queries(), 1);
}

#[test]
fn empty_values_issue_no_query() {
    let mut test = shop();

    let orders = test
        .db
        .deep_search("Order.customer_id.address_id.zipcode", Vec::<Value>::new())
        .unwrap();
    assert!(orders.is_empty());
    assert!(test.log.is_empty());
}

#[test]
fn results_are_not_cached() {
    let mut test = shop();

    test.db.deep_search("Address.zipcode", ["4567"]).unwrap();
    test.db.deep_search("Address.zipcode", ["4567"]).unwrap();
    assert_eq!(test.log.queries(), 2);
}

#[test]
fn model_names_are_case_insensitive() {
    let mut test = shop();

    let orders = test.db.deep_search("order.customer_id.name", ["customer 2"]).unwrap();
    assert_eq!(ids(&orders), vec![2]);
}

#[test]
fn malformed_paths() {
    let mut test = shop();

    for path in ["Order", "Order..zipcode", ".customer_id", "Order.customer_id."] {
        let err = test.db.deep_search(path, ["x"]).unwrap_err();
        assert!(err.is_invalid_path(), "{path}: {err}");
    }

    let err = test
        .db
        .deep_search("Order.customer_id.shoe_size", ["x"])
        .unwrap_err();
    assert!(err.is_invalid_path());

    // `total` is not a key, so it cannot be traversed.
    let err = test.db.deep_search("Order.total.name", ["x"]).unwrap_err();
    assert!(err.is_invalid_path());

    let err = test.db.deep_search("Invoice.customer_id", ["x"]).unwrap_err();
    assert!(err.is_model_not_registered());

    assert!(test.log.is_empty());
}

#[test]
fn recursion_depth_is_bounded() {
    let mut test = Test::with(models::shop(), |builder| {
        builder.config(Config::default().max_search_depth(1));
    });
    seed_shop(&mut test.db);

    // Two hops fit.
    test.db.deep_search("Order.customer_id.name", ["customer 1"]).unwrap();

    let err = test
        .db
        .deep_search("Order.customer_id.address_id.zipcode", ["01234"])
        .unwrap_err();
    assert!(err.is_search_depth_exceeded());
}

#[test]
fn self_referencing_model_terminates() {
    let employee = quill::Model::builder("Employee")
        .field(
            quill::schema::Field::builder("employee_id", quill::schema::Cast::Integer)
                .primary_key()
                .build()
                .unwrap(),
        )
        .field(
            quill::schema::Field::builder("manager_id", quill::schema::Cast::Integer)
                .nullable()
                .foreign_key("Employee.employee_id")
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let mut test = Test::with([employee], |builder| {
        builder.config(Config::default().max_search_depth(3));
    });

    test.db
        .insert(
            "Employee",
            [
                row!("employee_id" => 1),
                row!("employee_id" => 2, "manager_id" => 1),
                row!("employee_id" => 3, "manager_id" => 2),
            ],
        )
        .unwrap();

    // Employees whose manager's manager is 1.
    let found = test
        .db
        .deep_search("Employee.manager_id.manager_id", [1])
        .unwrap();
    assert_eq!(ids(&found), vec![3]);

    let path = format!("Employee{}.employee_id", ".manager_id".repeat(8));
    let err = test.db.deep_search(&path, [1]).unwrap_err();
    assert!(err.is_search_depth_exceeded());
}
