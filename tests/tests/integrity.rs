use pretty_assertions::assert_eq;
use quill::{stmt::Value, Violation};
use tests::{ids, models, row, seed_shop, Test};

fn shop() -> Test {
    let mut test = Test::new(models::shop().into_iter().chain(models::blogging()));
    seed_shop(&mut test.db);
    test.log.clear();
    test
}

#[test]
fn referenced_row_is_reported() {
    let mut test = shop();

    let violation = test.db.verify_integrity("Customer", 1).unwrap();
    assert_eq!(
        violation,
        Some(Violation {
            model: "Order".to_string(),
            field: "customer_id".to_string(),
            id: Value::I64(1),
        })
    );
    assert_eq!(
        violation.unwrap().to_string(),
        "`1` is still referenced by `Order.customer_id`"
    );
}

#[test]
fn unreferenced_row_passes() {
    let mut test = shop();

    test.db
        .insert("Customer", [row!("customer_id" => 9, "name" => "Loner")])
        .unwrap();

    assert_eq!(test.db.verify_integrity("Customer", 9).unwrap(), None);

    // Orders are referenced by nothing.
    assert_eq!(test.db.verify_integrity("Order", 1).unwrap(), None);
}

#[test]
fn every_referencing_model_is_checked() {
    let mut test = shop();

    // City 3 is referenced by address 3.
    let violation = test.db.verify_integrity("City", 3).unwrap().unwrap();
    assert_eq!(violation.model, "Address");
    assert_eq!(violation.field, "city_id");
}

#[test]
fn scope_is_the_model_module() {
    let mut test = shop();

    test.db
        .insert("Tag", [row!("tag_id" => 1, "name" => "rust")])
        .unwrap();
    test.log.clear();

    // Nothing in the blog module references tags except the association.
    assert_eq!(test.db.verify_integrity("Tag", 1).unwrap(), None);
    assert_eq!(test.log.queries(), 0);
}

#[test]
fn delete_unreferenced_refuses_referenced_rows() {
    let mut test = shop();

    let violation = test.db.delete_unreferenced("Customer", [3, 1]).unwrap();
    assert_eq!(violation.map(|violation| violation.id), Some(Value::I64(3)));

    // Nothing was deleted, not even rows checked before the violation.
    assert_eq!(test.db.count_all("Customer").unwrap(), 3);
    assert_eq!(test.log.executes(), 0);
}

#[test]
fn delete_unreferenced_deletes_free_rows() {
    let mut test = shop();

    test.db.delete("Order", [3]).unwrap();

    assert_eq!(test.db.delete_unreferenced("Customer", [3]).unwrap(), None);
    assert_eq!(ids(&test.db.select_all("Customer").unwrap()), vec![1, 2]);
}

#[test]
fn plain_delete_does_not_check() {
    let mut test = shop();

    assert_eq!(test.db.delete("Customer", [1]).unwrap(), 1);
    assert_eq!(test.db.count_all("Customer").unwrap(), 2);
}
