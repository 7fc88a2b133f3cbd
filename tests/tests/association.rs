use pretty_assertions::assert_eq;
use quill::stmt::Value;
use tests::{ids, models, row, Test};

fn blogging() -> Test {
    let mut test = Test::new(models::blogging());

    test.db
        .insert(
            "Blog",
            [
                row!("blog_id" => 1, "title" => "Rust"),
                row!("blog_id" => 2, "title" => "Cooking"),
            ],
        )
        .unwrap();

    test.db
        .insert(
            "Tag",
            [
                row!("tag_id" => 10, "name" => "systems"),
                row!("tag_id" => 11, "name" => "async"),
                row!("tag_id" => 12, "name" => "pasta"),
            ],
        )
        .unwrap();

    let ids = test
        .db
        .insert(
            "Blog2Tag",
            [
                row!("blog_id" => 1, "tag_id" => 10),
                row!("blog_id" => 1, "tag_id" => 11),
                row!("blog_id" => 2, "tag_id" => 12),
            ],
        )
        .unwrap();
    assert_eq!(ids, vec![Value::Null; 3]);

    test.log.clear();
    test
}

#[test]
fn linked_follows_the_association() {
    let mut test = blogging();

    let tags = test.db.linked("Blog", "tags", 1).unwrap();
    assert_eq!(ids(&tags), vec![10, 11]);

    let tags = test.db.linked("Blog", "tags", 2).unwrap();
    assert_eq!(ids(&tags), vec![12]);
}

#[test]
fn linked_with_no_links() {
    let mut test = blogging();

    let tags = test.db.linked("Blog", "tags", 3).unwrap();
    assert!(tags.is_empty());

    // Only the association was read.
    assert_eq!(test.log.queries(), 1);
}

#[test]
fn associable_is_the_complement() {
    let mut test = blogging();

    let tags = test.db.associable("Blog", "tags", 1).unwrap();
    assert_eq!(ids(&tags), vec![12]);

    let tags = test.db.associable("Blog", "tags", 3).unwrap();
    assert_eq!(ids(&tags), vec![10, 11, 12]);
}

#[test]
fn linking_more_rows_shows_up() {
    let mut test = blogging();

    assert_eq!(ids(&test.db.linked("Blog", "tags", 2).unwrap()), vec![12]);

    test.db
        .insert("Blog2Tag", [row!("blog_id" => 2, "tag_id" => 10)])
        .unwrap();

    assert_eq!(ids(&test.db.linked("Blog", "tags", 2).unwrap()), vec![10, 12]);
    assert_eq!(ids(&test.db.associable("Blog", "tags", 2).unwrap()), vec![11]);
}

#[test]
fn only_associative_fields_link() {
    let mut test = blogging();

    let err = test.db.linked("Blog", "title", 1).unwrap_err();
    assert!(err.is_invalid_schema());
    assert_eq!(
        err.to_string(),
        "invalid schema: field `Blog.title` is not an associative key"
    );
}

#[test]
fn associative_fields_have_no_column() {
    let test = blogging();

    let blog = test.db.model("Blog").unwrap();
    assert_eq!(
        blog.columns().map(|field| field.name()).collect::<Vec<_>>(),
        vec!["blog_id", "title"]
    );
}

#[test]
fn deep_search_through_the_association() {
    let mut test = blogging();

    let blogs = test
        .db
        .deep_search("Blog.tags.Blog2Tag.tag_id.name", ["async", "pasta"])
        .unwrap();
    assert_eq!(ids(&blogs), vec![1, 2]);

    let blogs = test
        .db
        .deep_search("Blog.tags.Blog2Tag.tag_id.name", ["systems"])
        .unwrap();
    assert_eq!(ids(&blogs), vec![1]);
}

#[test]
fn associative_hop_needs_the_association_segment() {
    let mut test = blogging();

    let err = test.db.deep_search("Blog.tags.name", ["async"]).unwrap_err();
    assert!(err.is_invalid_path());

    let err = test.db.deep_search("Blog.tags", [10]).unwrap_err();
    assert!(err.is_invalid_path());
}
