use std::sync::Arc;

use trellis_collections::prelude::*;
use trellis_grid::{
    Cell, GridProps, GridStateCache, Row, TableColumn, TableHeader, columns_from_header,
};
use trellis_selection::{MultipleSelectionState, SelectionConfig, SelectionMode, SelectionStore};

fn init_logger() {
    let _ = simplelog::TestLogger::init(simplelog::LevelFilter::Trace, simplelog::Config::default());
}

#[derive(Debug, Clone, PartialEq)]
struct Person {
    id: i64,
    name: &'static str,
    age: u32,
    city: &'static str,
}

impl Person {
    fn field(&self, key: &Key) -> String {
        match key.as_str() {
            Some("name") => self.name.to_string(),
            Some("age") => self.age.to_string(),
            Some("city") => self.city.to_string(),
            _ => String::new(),
        }
    }
}

fn people() -> Content<Person> {
    let people = vec![
        Person { id: 1, name: "Ada", age: 36, city: "London" },
        Person { id: 2, name: "Grace", age: 85, city: "Arlington" },
        Person { id: 3, name: "Alan", age: 41, city: "Wilmslow" },
    ];
    Content::from_items(people, |person: &Person| {
        let person = person.clone();
        Element::new(Row::mapped(move |column| Element::new(Cell::new(person.field(&column.key)))))
    })
}

fn columns() -> Vec<Column> {
    vec![Column::new("name"), Column::new("age"), Column::new("city")]
}

fn keys<T>(collection: &TreeCollection<T>) -> Vec<String> {
    collection.keys().map(|k| k.to_string()).collect()
}

fn store() -> MultipleSelectionState {
    MultipleSelectionState::new(SelectionConfig::new(SelectionMode::Multiple))
}

// ============================================================================
// Rows and Cells
// ============================================================================

#[test]
fn test_mapped_cells_cross_columns() {
    init_logger();
    let collection = CollectionBuilder::new()
        .columns(columns())
        .item_key(|p: &Person| Key::from(p.id))
        .build(&people())
        .unwrap();

    let cells: Vec<_> = collection.child_nodes(&Key::from(1)).collect();
    assert_eq!(cells.len(), 3);
    for (i, (cell, column)) in cells.iter().zip(["name", "age", "city"]).enumerate() {
        assert_eq!(cell.node_type, NodeType::Cell);
        assert_eq!(cell.index, i);
        assert_eq!(cell.level, 1);
        assert_eq!(cell.key, Key::scoped(&Key::from(1), &Key::from(column)));
        assert_eq!(cell.key.to_string(), format!("1:{column}"));
    }
    assert_eq!(cells[0].text_value, "Ada");
    assert_eq!(cells[1].text_value, "36");

    let row = collection.get_item(&Key::from(2)).unwrap();
    assert_eq!(row.node_type, NodeType::Item);
    assert_eq!(row.value.as_ref().map(|p| p.name), Some("Grace"));
    assert_eq!(collection.size(), 12);
}

#[test]
fn test_mapped_cells_need_columns() {
    let err = CollectionBuilder::new()
        .item_key(|p: &Person| Key::from(p.id))
        .build(&people())
        .unwrap_err();
    assert!(matches!(err, CollectionError::MissingDependency { .. }));
}

#[test]
fn test_cell_keys_stay_distinct_across_lookalike_rows() {
    let row = || Row::mapped(|column: &Column| Element::new(Cell::new(column.key.to_string())));
    let content = Content::<()>::from_elements([
        Element::new(row()).with_key(1i64),
        Element::new(row()).with_key("1"),
        Element::new(row()).with_key("r"),
        Element::new(Item::new("explicit")).with_key("r:name"),
    ]);
    let collection = CollectionBuilder::new()
        .columns(vec![Column::new("name")])
        .build(&content)
        .unwrap();

    assert_eq!(collection.size(), 7);
    let int_cell = Key::scoped(&Key::from(1), &Key::from("name"));
    let str_cell = Key::scoped(&Key::from("1"), &Key::from("name"));
    assert_eq!(collection.parent(&int_cell).unwrap().key, Key::from(1));
    assert_eq!(collection.parent(&str_cell).unwrap().key, Key::from("1"));
    assert_eq!(collection.get_item(&Key::from("r:name")).unwrap().level, 0);
}

#[test]
fn test_static_cells_and_nested_rows() {
    let content = Content::<()>::from_elements([Element::new(
        Row::new(vec![Element::new(Cell::new("parent"))]).child_items(Content::from_elements([
            Element::new(Row::new(vec![Element::new(Cell::new("child"))])).with_key("child"),
        ])),
    )
    .with_key("parent")]);

    let expanded = CollectionBuilder::new().build(&content).unwrap();
    assert_eq!(keys(&expanded), vec!["parent", "parent.0", "child", "child.0"]);
    let child = expanded.get_item(&Key::from("child")).unwrap();
    assert_eq!(child.level, 1);
    assert_eq!(child.index, 0);
    assert_eq!(expanded.get_item(&Key::child_position(&Key::from("child"), 0)).unwrap().level, 2);

    let collapsed = CollectionBuilder::new()
        .expansion(Expansion::Keys(Default::default()))
        .build(&content)
        .unwrap();
    assert_eq!(keys(&collapsed), vec!["parent", "parent.0"]);
    assert!(collapsed.get_item(&Key::from("parent")).unwrap().has_child_nodes);
}

#[test]
fn test_row_rejects_items_as_cells() {
    let content = Content::<()>::from_elements([Element::new(Row::new(vec![Element::new(
        Item::new("not a cell"),
    )]))]);
    let err = CollectionBuilder::new().build(&content).unwrap_err();
    assert_eq!(
        err,
        CollectionError::UnsupportedType {
            found: NodeType::Item,
            parent: "item".to_string(),
            expected: NodeType::Cell,
        }
    );
}

// ============================================================================
// Header
// ============================================================================

#[derive(Debug, Clone)]
struct Field {
    id: &'static str,
    label: &'static str,
}

fn fields() -> Vec<Field> {
    vec![
        Field { id: "name", label: "Name" },
        Field { id: "age", label: "Age" },
    ]
}

#[test]
fn test_static_header_with_groups() {
    let header = TableHeader::<()>::new(vec![
        Element::new(TableColumn::new("Name")).with_key("name"),
        Element::new(TableColumn::new("Contact").child_columns(Content::from_elements([
            Element::new(TableColumn::new("Email")).with_key("email"),
            Element::new(TableColumn::new("Phone")).with_key("phone"),
        ])))
        .with_key("contact"),
    ]);
    let collection = CollectionBuilder::new().build(&header).unwrap();

    assert_eq!(keys(&collection), vec!["name", "contact", "email", "phone"]);
    let phone = collection.get_item(&Key::from("phone")).unwrap();
    assert_eq!(phone.node_type, NodeType::Column);
    assert_eq!(phone.level, 1);
    assert_eq!(phone.index, 1);
    assert_eq!(phone.parent_key, Some(Key::from("contact")));

    assert_eq!(
        columns_from_header(&collection),
        vec![
            Column::new("name").text_value("Name"),
            Column::new("email").text_value("Email"),
            Column::new("phone").text_value("Phone"),
        ]
    );
}

#[test]
fn test_mapped_header_uses_column_key() {
    let header = TableHeader::mapped(Some(fields()), |field: &Field| {
        Element::new(TableColumn::new(field.label))
    })
    .column_key(|field: &Field| Key::from(field.id));
    let collection = CollectionBuilder::new().build(&header).unwrap();

    assert_eq!(keys(&collection), vec!["name", "age"]);
    let age = collection.get_item(&Key::from("age")).unwrap();
    assert_eq!(age.text_value, "Age");
    assert_eq!(age.index, 1);
    assert_eq!(age.value.as_ref().map(|f| f.label), Some("Age"));
}

#[test]
fn test_mapped_header_without_column_key_synthesizes() {
    let header = TableHeader::mapped(Some(fields()), |field: &Field| {
        Element::new(TableColumn::new(field.label))
    });
    let collection = CollectionBuilder::new().build(&header).unwrap();
    assert_eq!(keys(&collection), vec!["$.0", "$.1"]);
}

#[test]
fn test_mapped_header_needs_columns() {
    let header = TableHeader::mapped(None, |field: &Field| Element::new(TableColumn::new(field.label)));
    let err = CollectionBuilder::new().build(&header).unwrap_err();
    assert!(matches!(err, CollectionError::MissingDependency { .. }));
}

#[test]
fn test_header_columns_drive_rows() {
    let header = TableHeader::<()>::new(vec![
        Element::new(TableColumn::new("Name")).with_key("name"),
        Element::new(TableColumn::new("City")).with_key("city"),
    ]);
    let columns = columns_from_header(&CollectionBuilder::new().build(&header).unwrap());

    let collection = CollectionBuilder::new()
        .columns(columns)
        .item_key(|p: &Person| Key::from(p.id))
        .build(&people())
        .unwrap();
    let cells: Vec<_> = collection
        .child_nodes(&Key::from(3))
        .map(|cell| cell.text_value.clone())
        .collect();
    assert_eq!(cells, vec!["Alan", "Wilmslow"]);
}

// ============================================================================
// Grid State
// ============================================================================

#[test]
fn test_cache_reuses_collection() {
    init_logger();
    let props = GridProps::new(people(), columns()).item_key(|p: &Person| Key::from(p.id));
    let store = store();
    let mut cache = GridStateCache::new();

    let first = cache.state(&props, &store).unwrap();
    let second = cache.state(&props, &store).unwrap();
    assert!(Arc::ptr_eq(first.collection(), second.collection()));

    let third = cache.state(&props.clone(), &store).unwrap();
    assert!(Arc::ptr_eq(first.collection(), third.collection()));
}

#[test]
fn test_cache_rebuilds_on_selection_change() {
    let props = GridProps::new(people(), columns()).item_key(|p: &Person| Key::from(p.id));
    let mut store = store();
    let mut cache = GridStateCache::new();

    let before = cache.state(&props, &store).unwrap();
    before.selection_manager(&mut store).toggle_selection(&Key::from(2));

    let after = cache.state(&props, &store).unwrap();
    assert!(!Arc::ptr_eq(before.collection(), after.collection()));
    assert!(!before.collection().get_item(&Key::from(2)).unwrap().is_selected());
    assert!(after.collection().get_item(&Key::from(2)).unwrap().is_selected());
    assert!(!after.collection().get_item(&Key::from(1)).unwrap().is_selected());
}

#[test]
fn test_cache_rebuilds_on_focus_and_disabled_change() {
    let props = GridProps::new(people(), columns()).item_key(|p: &Person| Key::from(p.id));
    let mut store = store();
    let mut cache = GridStateCache::new();

    let first = cache.state(&props, &store).unwrap();
    store.set_focused_key(Some(Key::from(3)));
    let focused = cache.state(&props, &store).unwrap();
    assert!(!Arc::ptr_eq(first.collection(), focused.collection()));
    assert!(focused.collection().get_item(&Key::from(3)).unwrap().is_focused());

    store.set_disabled_keys([1i64]);
    let disabled = cache.state(&props, &store).unwrap();
    assert!(!Arc::ptr_eq(focused.collection(), disabled.collection()));
    assert!(disabled.collection().get_item(&Key::from(1)).unwrap().is_disabled());
}

#[test]
fn test_cache_rebuilds_on_new_content_or_expansion() {
    let props = GridProps::new(people(), columns()).item_key(|p: &Person| Key::from(p.id));
    let store = store();
    let mut cache = GridStateCache::new();

    let first = cache.state(&props, &store).unwrap();
    let replaced = GridProps::new(people(), columns()).item_key(|p: &Person| Key::from(p.id));
    let second = cache.state(&replaced, &store).unwrap();
    assert!(!Arc::ptr_eq(first.collection(), second.collection()));
    assert_eq!(keys(first.collection()), keys(second.collection()));

    let expanded = replaced.clone().expanded_keys([1i64]);
    let third = cache.state(&expanded, &store).unwrap();
    assert!(!Arc::ptr_eq(second.collection(), third.collection()));
    assert!(third.collection().get_item(&Key::from(1)).unwrap().is_expanded());
    assert!(!third.collection().get_item(&Key::from(2)).unwrap().is_expanded());
}

#[test]
fn test_failed_build_keeps_previous_collection() {
    let props = GridProps::new(people(), columns()).item_key(|p: &Person| Key::from(p.id));
    let store = store();
    let mut cache = GridStateCache::new();
    let first = cache.state(&props, &store).unwrap();

    let clashing = GridProps::new(people(), columns()).item_key(|_: &Person| Key::from("same"));
    let err = cache.state(&clashing, &store).unwrap_err();
    assert_eq!(err, CollectionError::DuplicateKey(Key::from("same")));

    let again = cache.state(&props, &store).unwrap();
    assert!(Arc::ptr_eq(first.collection(), again.collection()));
}

#[test]
fn test_grid_selection_skips_cells() {
    let props = GridProps::new(people(), columns()).item_key(|p: &Person| Key::from(p.id));
    let mut store = store();
    let mut cache = GridStateCache::new();
    let grid = cache.state(&props, &store).unwrap();

    let mut manager = grid.selection_manager(&mut store);
    manager.toggle_selection(&Key::from(1));
    manager.extend_selection_to(&Key::from(3));
    assert_eq!(
        manager.selected_keys(),
        vec![Key::from(1), Key::from(2), Key::from(3)]
    );

    manager.select_all();
    assert!(manager.is_select_all());
    assert_eq!(manager.selected_keys().len(), 3);
}
