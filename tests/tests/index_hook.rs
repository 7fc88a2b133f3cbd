use pretty_assertions::assert_eq;
use quill::{
    stmt::{Example, Value},
    BatchMode, Config,
};
use std::sync::Arc;
use tests::{models, row, IndexEvent, IndexLog, Test};

fn indexed(hook: &Arc<IndexLog>, mode: BatchMode) -> Test {
    Test::with(models::shop(), |builder| {
        builder
            .index_hook(hook.clone())
            .config(Config::default().batch_mode(mode));
    })
}

fn insert(id: i64) -> IndexEvent {
    IndexEvent::Insert {
        module: "shop".to_string(),
        id: Value::I64(id),
    }
}

fn delete(id: i64) -> IndexEvent {
    IndexEvent::Delete {
        module: "shop".to_string(),
        model: "Customer".to_string(),
        id: Value::I64(id),
    }
}

#[test]
fn writes_to_indexable_models_notify() {
    let hook = Arc::new(IndexLog::new());
    let mut test = indexed(&hook, BatchMode::PerRow);

    test.db
        .insert("Customer", [row!("name" => "Ada"), row!("name" => "Grace")])
        .unwrap();
    test.db
        .update("Customer", [row!("customer_id" => 2, "email" => "grace@example.com")])
        .unwrap();
    test.db.delete("Customer", [1]).unwrap();

    assert_eq!(
        hook.events(),
        vec![
            insert(1),
            insert(2),
            IndexEvent::Update {
                module: "shop".to_string(),
                id: Value::I64(2),
            },
            delete(1),
        ]
    );
}

#[test]
fn other_models_are_not_indexed() {
    let hook = Arc::new(IndexLog::new());
    let mut test = indexed(&hook, BatchMode::PerRow);

    test.db
        .insert("City", [row!("city_id" => 1, "name" => "Springfield")])
        .unwrap();
    test.db.delete("City", [1]).unwrap();

    assert!(hook.events().is_empty());
}

#[test]
fn updates_that_change_nothing_are_not_indexed() {
    let hook = Arc::new(IndexLog::new());
    let mut test = indexed(&hook, BatchMode::PerRow);

    test.db
        .update("Customer", [row!("customer_id" => 5, "name" => "Nobody")])
        .unwrap();

    assert!(hook.events().is_empty());
}

#[test]
fn delete_by_example_notifies_each_row() {
    let hook = Arc::new(IndexLog::new());
    let mut test = indexed(&hook, BatchMode::PerRow);

    test.db
        .insert(
            "Customer",
            [
                row!("name" => "Ada", "status" => "retired"),
                row!("name" => "Grace"),
                row!("name" => "Linus", "status" => "retired"),
            ],
        )
        .unwrap();

    let example = Example::new().eq("status", "retired");
    assert_eq!(test.db.delete_by_example("Customer", &example).unwrap(), 2);

    let deletes: Vec<_> = hook
        .events()
        .into_iter()
        .filter(|event| matches!(event, IndexEvent::Delete { .. }))
        .collect();
    assert_eq!(deletes, vec![delete(1), delete(3)]);
}

#[test]
fn per_row_failure_indexes_the_written_rows() {
    let hook = Arc::new(IndexLog::new());
    let mut test = indexed(&hook, BatchMode::PerRow);

    test.db
        .insert("Customer", [row!("name" => "Ada"), row!("email" => "anonymous")])
        .unwrap_err();

    assert_eq!(hook.events(), vec![insert(1)]);
}

#[test]
fn atomic_rollback_indexes_nothing() {
    let hook = Arc::new(IndexLog::new());
    let mut test = indexed(&hook, BatchMode::Atomic);

    test.db
        .insert("Customer", [row!("name" => "Ada"), row!("email" => "anonymous")])
        .unwrap_err();

    assert!(hook.events().is_empty());
    assert_eq!(test.db.count_all("Customer").unwrap(), 0);
}

#[test]
fn hook_failures_do_not_fail_the_write() {
    let hook = Arc::new(IndexLog::failing());
    let mut test = indexed(&hook, BatchMode::PerRow);

    let ids = test.db.insert("Customer", [row!("name" => "Ada")]).unwrap();
    assert_eq!(ids, vec![Value::I64(1)]);
    assert_eq!(test.db.delete("Customer", ids).unwrap(), 1);

    assert_eq!(hook.events(), vec![insert(1), delete(1)]);
}
