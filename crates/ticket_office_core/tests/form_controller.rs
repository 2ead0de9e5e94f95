use std::cell::Cell;
use ticket_office_core::db::open_db_in_memory;
use ticket_office_core::{
    ControllerError, Document, EntityKind, Fields, FieldInput, FormController, FormError, Post,
    RecordId, RecordStore, RepoError, RepoResult, SqliteRecordStore, Station, Ticket,
};
use uuid::Uuid;

fn store() -> SqliteRecordStore {
    let conn = open_db_in_memory().unwrap();
    SqliteRecordStore::bootstrap(conn, &EntityKind::collection_names()).unwrap()
}

fn controller() -> FormController<SqliteRecordStore> {
    FormController::new(store()).unwrap()
}

#[test]
fn starts_on_stations_with_empty_text_fields() {
    let controller = controller();
    assert_eq!(controller.selected_kind(), EntityKind::Station);
    assert_eq!(controller.kinds(), &EntityKind::ALL);
    assert!(controller.rows().is_empty());
    assert_eq!(controller.form().values(), vec!["", "", ""]);
}

#[test]
fn station_post_ticket_scenario() {
    let mut controller = controller();

    let form = controller.form_mut();
    form.set_text(0, "Central").unwrap();
    form.set_text(1, "4").unwrap();
    form.set_text(2, "12").unwrap();
    let station_id = controller.submit().unwrap();

    let stations: Vec<Station> = controller.store().list().unwrap();
    assert_eq!(
        stations,
        vec![Station {
            id: station_id,
            name: "Central".to_string(),
            railways: 4,
            staff: 12,
        }]
    );
    assert_eq!(controller.rows().len(), 1);
    assert_eq!(controller.rows()[0].id, station_id);

    controller.select_kind(EntityKind::Post).unwrap();
    assert_eq!(controller.form().fields()[1].options(), ["Central"]);
    let form = controller.form_mut();
    form.set_text(0, "Alice").unwrap();
    form.select_value(1, "Central").unwrap();
    controller.submit().unwrap();

    let posts: Vec<Post> = controller.store().list().unwrap();
    assert_eq!(posts[0].cashier, "Alice");
    assert_eq!(posts[0].station, "Central");

    controller.select_kind(EntityKind::Station).unwrap();
    controller.form_mut().set_text(0, "North").unwrap();
    controller.submit().unwrap();

    controller.select_kind(EntityKind::Ticket).unwrap();
    assert_eq!(controller.form().fields()[0].options(), ["Alice"]);
    assert_eq!(controller.form().fields()[2].options(), ["Central", "North"]);
    let form = controller.form_mut();
    form.select_value(0, "Alice").unwrap();
    form.select_value(1, "Central").unwrap();
    form.select_value(2, "North").unwrap();
    controller.submit().unwrap();

    let tickets: Vec<Ticket> = controller.store().list().unwrap();
    assert_eq!(tickets[0].cashier, "Alice");
    assert_eq!(tickets[0].from, "Central");
    assert_eq!(tickets[0].to, "North");
}

#[test]
fn non_numeric_integer_input_is_stored_as_zero() {
    let mut controller = controller();
    let form = controller.form_mut();
    form.set_text(0, "Central").unwrap();
    form.set_text(1, "abc").unwrap();
    form.set_text(2, "7").unwrap();
    controller.submit().unwrap();

    let stations: Vec<Station> = controller.store().list().unwrap();
    assert_eq!(stations[0].railways, 0);
    assert_eq!(stations[0].staff, 7);
}

#[test]
fn empty_choice_source_yields_no_options_and_empty_reference() {
    let mut controller = controller();
    controller.select_kind(EntityKind::Train).unwrap();

    let path_field = &controller.form().fields()[2];
    assert_eq!(
        path_field.input,
        FieldInput::Choice {
            options: Vec::new(),
            selected: None,
        }
    );

    controller.form_mut().set_text(0, "Ivan").unwrap();
    assert!(matches!(
        controller.form_mut().select_option(2, 0),
        Err(FormError::OptionOutOfRange { len: 0, .. })
    ));
    controller.submit().unwrap();

    let rows = controller.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get_str("Driver"), Some("Ivan"));
    assert_eq!(rows[0].get_i64("Length"), Some(0));
    assert_eq!(rows[0].get_str("PathCode"), Some(""));
}

#[test]
fn choice_lists_refresh_after_each_insert() {
    let mut controller = controller();
    controller.select_kind(EntityKind::Route).unwrap();
    controller.form_mut().set_text(0, "R1").unwrap();
    controller.submit().unwrap();
    controller.form_mut().set_text(0, "R2").unwrap();
    controller.submit().unwrap();

    controller.select_kind(EntityKind::Train).unwrap();
    assert_eq!(controller.form().fields()[2].options(), ["R1", "R2"]);
}

#[test]
fn submit_resets_form_input() {
    let mut controller = controller();
    controller.form_mut().set_text(0, "Central").unwrap();
    controller.submit().unwrap();
    assert_eq!(controller.form().values(), vec!["", "", ""]);
}

#[test]
fn switching_kinds_discards_unsaved_input() {
    let mut controller = controller();
    controller.form_mut().set_text(0, "Half typed").unwrap();

    controller.select_kind(EntityKind::Route).unwrap();
    controller.select_kind(EntityKind::Station).unwrap();

    assert_eq!(controller.form().values(), vec!["", "", ""]);
    assert!(controller.rows().is_empty());
}

#[test]
fn select_collection_resolves_names_and_ignores_empty_text() {
    let mut controller = controller();
    controller.select_collection("Paths").unwrap();
    assert_eq!(controller.selected_kind(), EntityKind::Route);

    controller.select_collection("").unwrap();
    assert_eq!(controller.selected_kind(), EntityKind::Route);

    let err = controller.select_collection("Depots").unwrap_err();
    assert!(matches!(err, ControllerError::UnknownCollection(name) if name == "Depots"));
    assert_eq!(controller.selected_kind(), EntityKind::Route);
}

#[test]
fn form_rejects_mismatched_edits() {
    let mut controller = controller();
    controller.select_kind(EntityKind::Post).unwrap();
    let form = controller.form_mut();

    assert!(matches!(
        form.set_text(1, "Central"),
        Err(FormError::NotEditableText { key: "Station" })
    ));
    assert!(matches!(
        form.select_option(0, 0),
        Err(FormError::NotAChoice { key: "Cashier" })
    ));
    assert!(matches!(
        form.set_text(5, "x"),
        Err(FormError::FieldOutOfRange { index: 5, len: 2 })
    ));
}

#[test]
fn clear_selection_submits_empty_reference() {
    let mut controller = controller();
    controller.form_mut().set_text(0, "Central").unwrap();
    controller.submit().unwrap();

    controller.select_kind(EntityKind::Post).unwrap();
    let form = controller.form_mut();
    form.set_text(0, "Bob").unwrap();
    form.select_option(1, 0).unwrap();
    form.clear_selection(1).unwrap();
    controller.submit().unwrap();

    assert_eq!(controller.rows()[0].get_str("Station"), Some(""));
}

#[test]
fn delete_row_removes_record_and_refreshes() {
    let mut controller = controller();
    controller.form_mut().set_text(0, "Central").unwrap();
    let central = controller.submit().unwrap();
    controller.form_mut().set_text(0, "North").unwrap();
    let north = controller.submit().unwrap();

    assert!(controller.delete_row(central));
    let ids: Vec<RecordId> = controller.rows().iter().map(|row| row.id).collect();
    assert_eq!(ids, vec![north]);
}

#[test]
fn delete_unknown_row_is_silent() {
    let mut controller = controller();
    controller.form_mut().set_text(0, "Central").unwrap();
    controller.submit().unwrap();

    assert!(controller.delete_row(Uuid::new_v4()));
    assert_eq!(controller.rows().len(), 1);
}

/// Store wrapper whose deletes can be made to fail.
struct FlakyStore {
    inner: SqliteRecordStore,
    fail_deletes: Cell<bool>,
}

impl RecordStore for FlakyStore {
    fn collection_names(&self) -> RepoResult<Vec<String>> {
        self.inner.collection_names()
    }

    fn list_documents(&self, collection: &str) -> RepoResult<Vec<Document>> {
        self.inner.list_documents(collection)
    }

    fn insert_document(&self, collection: &str, fields: &Fields) -> RepoResult<RecordId> {
        self.inner.insert_document(collection, fields)
    }

    fn delete_document(&self, collection: &str, id: RecordId) -> RepoResult<()> {
        if self.fail_deletes.get() {
            return Err(RepoError::InvalidData("connection lost".to_string()));
        }
        self.inner.delete_document(collection, id)
    }
}

#[test]
fn failed_delete_is_swallowed_and_view_is_kept() {
    let mut controller = FormController::new(FlakyStore {
        inner: store(),
        fail_deletes: Cell::new(false),
    })
    .unwrap();
    controller.form_mut().set_text(0, "Central").unwrap();
    let id = controller.submit().unwrap();
    controller.form_mut().set_text(0, "typed but unsaved").unwrap();

    controller.store().fail_deletes.set(true);
    assert!(!controller.delete_row(id));

    assert_eq!(controller.rows().len(), 1);
    assert_eq!(controller.form().values()[0], "typed but unsaved");
    assert_eq!(controller.store().list_documents("Stations").unwrap().len(), 1);
}
