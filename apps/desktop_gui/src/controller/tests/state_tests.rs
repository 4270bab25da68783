use super::*;
use crate::controller::events::UiErrorContext;
use client_core::ClientError;
use shared::{domain::PackId, error::ApiError};

fn product(id: &str, name: &str) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
    }
}

fn pack(id: &str, product_id: &str, size: u64) -> PackSize {
    PackSize {
        id: PackId::new(id),
        product_id: ProductId::new(product_id),
        size,
    }
}

fn api_error(context: UiErrorContext, status: u16, body: &str) -> UiError {
    UiError::from_client_error(
        context,
        &ClientError::Api(ApiError::from_response(status, body)),
    )
}

fn ticket_of(command: &BackendCommand) -> RequestTicket {
    match command {
        BackendCommand::LoadPackSizes { ticket, .. }
        | BackendCommand::ReplacePackSizes { ticket, .. }
        | BackendCommand::Fulfill { ticket, .. } => *ticket,
        BackendCommand::LoadCatalog => panic!("catalog loads carry no ticket"),
    }
}

#[test]
fn ticket_issuer_is_monotonic() {
    let mut issuer = TicketIssuer::default();
    let first = issuer.issue();
    let second = issuer.issue();
    assert!(second.0 > first.0);
}

#[test]
fn catalog_start_issues_a_single_load() {
    let mut catalog = CatalogLoader::default();
    assert!(catalog.is_loading());
    assert_eq!(catalog.start(), Some(BackendCommand::LoadCatalog));
    assert_eq!(catalog.start(), None);
    assert!(catalog.is_loading());
}

#[test]
fn catalog_load_selects_first_product() {
    let mut catalog = CatalogLoader::default();
    catalog.start();
    let first = catalog.apply_loaded(vec![product("p1", "Sugar"), product("p2", "Salt")]);
    assert_eq!(first, Some(ProductId::new("p1")));
    assert_eq!(catalog.products().len(), 2);
    assert!(!catalog.is_loading());
}

#[test]
fn catalog_failure_settles_with_empty_list() {
    let mut catalog = CatalogLoader::default();
    catalog.start();
    catalog.apply_failed(&UiError::from_message(
        UiErrorContext::CatalogLoad,
        "connection refused",
    ));
    assert!(!catalog.is_loading());
    assert!(catalog.products().is_empty());
    assert_eq!(catalog.start(), None);
}

#[test]
fn empty_selection_clears_packs_without_a_request() {
    let mut loader = PackSetLoader::default();
    let product_id = ProductId::new("p1");
    let command = loader.on_selection_changed(Some(&product_id)).expect("load issued");
    assert!(loader.apply_loaded(ticket_of(&command), &product_id, vec![pack("k1", "p1", 250)]));

    assert_eq!(loader.on_selection_changed(None), None);
    assert!(loader.packs().is_empty());
    assert!(!loader.is_loading());
    assert_eq!(loader.view(), PackSetView::Empty);
}

#[test]
fn stale_pack_response_is_discarded() {
    let mut loader = PackSetLoader::default();
    let a = ProductId::new("a");
    let b = ProductId::new("b");
    let first = loader.on_selection_changed(Some(&a)).expect("load a");
    let second = loader.on_selection_changed(Some(&b)).expect("load b");

    assert!(loader.apply_loaded(ticket_of(&second), &b, vec![pack("k2", "b", 12)]));
    assert!(!loader.apply_loaded(ticket_of(&first), &a, vec![pack("k1", "a", 5)]));
    assert_eq!(loader.packs(), &[pack("k2", "b", 12)]);
}

#[test]
fn pack_view_reports_loading_until_the_current_response_lands() {
    let mut loader = PackSetLoader::default();
    let product_id = ProductId::new("p1");
    let command = loader.on_selection_changed(Some(&product_id)).expect("load issued");
    assert_eq!(loader.view(), PackSetView::Loading);

    loader.apply_loaded(ticket_of(&command), &product_id, vec![pack("k1", "p1", 500)]);
    assert_eq!(loader.view(), PackSetView::Sizes(&[pack("k1", "p1", 500)]));
}

#[test]
fn pack_load_failure_keeps_previous_set() {
    let mut loader = PackSetLoader::default();
    let product_id = ProductId::new("p1");
    let first = loader.on_selection_changed(Some(&product_id)).expect("first load");
    loader.apply_loaded(ticket_of(&first), &product_id, vec![pack("k1", "p1", 250)]);

    let second = loader.on_selection_changed(Some(&product_id)).expect("second load");
    loader.apply_failed(
        ticket_of(&second),
        &product_id,
        &api_error(UiErrorContext::PackSetLoad, 500, ""),
    );
    assert!(!loader.is_loading());
    assert_eq!(loader.packs(), &[pack("k1", "p1", 250)]);
}

#[test]
fn replace_supersedes_an_in_flight_load_for_the_same_product() {
    let mut loader = PackSetLoader::default();
    let product_id = ProductId::new("p1");
    let load = loader.on_selection_changed(Some(&product_id)).expect("load issued");

    loader.replace(&product_id, vec![pack("n1", "p1", 1000)]);
    assert!(!loader.is_loading());
    assert!(!loader.apply_loaded(ticket_of(&load), &product_id, vec![pack("old", "p1", 5)]));
    assert_eq!(loader.packs(), &[pack("n1", "p1", 1000)]);
}

#[test]
fn editor_text_follows_authoritative_set() {
    let mut editor = PackSetEditor::default();
    editor.sync_from(&[pack("k1", "p1", 500), pack("k2", "p1", 250)]);
    assert_eq!(editor.text(), "500, 250");

    editor.sync_from(&[]);
    assert_eq!(editor.text(), "");
}

#[test]
fn save_sends_parsed_sizes_in_typed_order() {
    let mut editor = PackSetEditor::default();
    *editor.text_mut() = "1000, abc, 250, -3".to_string();
    let product_id = ProductId::new("p1");

    let command = editor.begin_save(Some(&product_id)).expect("save issued");
    match command {
        BackendCommand::ReplacePackSizes {
            product_id: sent_to,
            sizes,
            ..
        } => {
            assert_eq!(sent_to, product_id);
            assert_eq!(sizes, vec![1000, 250]);
        }
        other => panic!("unexpected command {other:?}"),
    }
    assert!(editor.is_saving());
    assert!(!editor.can_save(false));
}

#[test]
fn save_without_selection_or_while_pending_is_refused() {
    let mut editor = PackSetEditor::default();
    assert_eq!(editor.begin_save(None), None);

    let product_id = ProductId::new("p1");
    assert!(editor.begin_save(Some(&product_id)).is_some());
    assert_eq!(editor.begin_save(Some(&product_id)), None);
}

#[test]
fn save_failure_keeps_text_and_surfaces_message() {
    let mut editor = PackSetEditor::default();
    *editor.text_mut() = "0".to_string();
    let product_id = ProductId::new("p1");
    let command = editor.begin_save(Some(&product_id)).expect("save issued");

    editor.apply_save_failed(
        ticket_of(&command),
        &product_id,
        &api_error(UiErrorContext::PackSetSave, 400, "at least one pack size is required\n"),
    );
    assert_eq!(editor.text(), "0");
    assert_eq!(editor.error(), Some("at least one pack size is required"));
    assert!(!editor.is_saving());
}

#[test]
fn new_save_clears_previous_error() {
    let mut editor = PackSetEditor::default();
    let product_id = ProductId::new("p1");
    let first = editor.begin_save(Some(&product_id)).expect("first save");
    editor.apply_save_failed(
        ticket_of(&first),
        &product_id,
        &api_error(UiErrorContext::PackSetSave, 500, ""),
    );
    assert_eq!(editor.error(), Some("Error: 500"));

    editor.begin_save(Some(&product_id)).expect("second save");
    assert_eq!(editor.error(), None);
}

#[test]
fn saving_is_blocked_while_packs_load() {
    let editor = PackSetEditor::default();
    assert!(editor.can_save(false));
    assert!(!editor.can_save(true));
}

#[test]
fn submit_without_product_sets_hint() {
    let mut form = FulfillmentOrchestrator::default();
    *form.quantity_input_mut() = "10".to_string();
    assert_eq!(form.submit(None), Err(SubmitRejection::NoProduct));
    assert_eq!(form.form_hint(), Some("Select a product first"));
    assert!(!form.is_loading());
}

#[test]
fn submit_rejects_non_positive_quantities() {
    let product_id = ProductId::new("p1");
    for (input, expected) in [
        ("", QuantityError::Missing),
        ("0", QuantityError::NotPositive),
        ("-4", QuantityError::NotPositive),
        ("lots", QuantityError::NotANumber),
    ] {
        let mut form = FulfillmentOrchestrator::default();
        *form.quantity_input_mut() = input.to_string();
        assert_eq!(
            form.submit(Some(&product_id)),
            Err(SubmitRejection::Quantity(expected)),
            "input {input:?}"
        );
        assert_eq!(form.form_hint(), Some("Enter a quantity of at least 1"));
    }
}

#[test]
fn accepted_submit_clears_previous_outcome() {
    let product_id = ProductId::new("p1");
    let mut form = FulfillmentOrchestrator::default();
    *form.quantity_input_mut() = "750".to_string();
    let first = form.submit(Some(&product_id)).expect("first submit");
    form.apply_failed(
        ticket_of(&first),
        &api_error(UiErrorContext::Fulfillment, 400, "bad"),
    );
    assert_eq!(form.error(), Some("bad"));

    let second = form.submit(Some(&product_id)).expect("second submit");
    assert_eq!(
        second,
        BackendCommand::Fulfill {
            ticket: ticket_of(&second),
            product_id,
            quantity: 750,
        }
    );
    assert_eq!(form.error(), None);
    assert!(form.view().is_none());
    assert_eq!(form.form_hint(), None);
    assert_eq!(form.requested_quantity(), 750);
    assert!(form.is_loading());
}

#[test]
fn superseded_fulfillment_response_is_ignored() {
    let product_id = ProductId::new("p1");
    let mut form = FulfillmentOrchestrator::default();
    *form.quantity_input_mut() = "1".to_string();
    let first = form.submit(Some(&product_id)).expect("first submit");
    *form.quantity_input_mut() = "2".to_string();
    let second = form.submit(Some(&product_id)).expect("second submit");

    let stale = FulfillmentResult {
        packs: [(250, 1)].into_iter().collect(),
        total_items: Some(250),
    };
    assert!(!form.apply_result(ticket_of(&first), stale));
    assert!(form.is_loading());

    let current = FulfillmentResult {
        packs: [(250, 1)].into_iter().collect(),
        total_items: Some(250),
    };
    assert!(form.apply_result(ticket_of(&second), current));
    let view = form.view().expect("current result");
    assert_eq!(view.requested_quantity, 2);
    assert_eq!(view.total_items, 250);
}

#[test]
fn superseded_fulfillment_failure_leaves_current_request_alone() {
    let product_id = ProductId::new("p1");
    let mut form = FulfillmentOrchestrator::default();
    *form.quantity_input_mut() = "1".to_string();
    let first = form.submit(Some(&product_id)).expect("first submit");
    let second = form.submit(Some(&product_id)).expect("second submit");
    form.apply_result(
        ticket_of(&second),
        FulfillmentResult {
            packs: [(250, 1)].into_iter().collect(),
            total_items: Some(250),
        },
    );

    assert!(!form.apply_failed(
        ticket_of(&first),
        &api_error(UiErrorContext::Fulfillment, 400, "quantity must be positive"),
    ));
    assert_eq!(form.error(), None);
    assert_eq!(form.view().map(|view| view.total_items), Some(250));

    let third = form.submit(Some(&product_id)).expect("third submit");
    assert!(!form.apply_failed(
        ticket_of(&second),
        &api_error(UiErrorContext::Fulfillment, 500, ""),
    ));
    assert_eq!(form.error(), None);
    assert!(form.is_loading());
    assert!(form.apply_failed(
        ticket_of(&third),
        &api_error(UiErrorContext::Fulfillment, 500, ""),
    ));
    assert_eq!(form.error(), Some("Error: 500"));
}

#[test]
fn superseded_save_failure_keeps_current_save_pending() {
    let mut editor = PackSetEditor::default();
    let product_id = ProductId::new("p1");
    let first = editor.begin_save(Some(&product_id)).expect("first save");
    assert!(editor.apply_saved(ticket_of(&first), &product_id));
    let second = editor.begin_save(Some(&product_id)).expect("second save");

    editor.apply_save_failed(
        ticket_of(&first),
        &product_id,
        &api_error(UiErrorContext::PackSetSave, 400, "stale"),
    );
    assert_eq!(editor.error(), None);
    assert!(editor.is_saving());

    editor.apply_save_failed(
        ticket_of(&second),
        &ProductId::new("other"),
        &api_error(UiErrorContext::PackSetSave, 400, "wrong product"),
    );
    assert_eq!(editor.error(), None);
    assert!(editor.is_saving());
}

#[test]
fn superseded_pack_load_failure_keeps_current_load_in_flight() {
    let mut loader = PackSetLoader::default();
    let a = ProductId::new("a");
    let b = ProductId::new("b");
    let first = loader.on_selection_changed(Some(&a)).expect("load a");
    loader.apply_loaded(ticket_of(&first), &a, vec![pack("ka", "a", 5)]);
    let stale = loader.on_selection_changed(Some(&a)).expect("reload a");
    let current = loader.on_selection_changed(Some(&b)).expect("load b");

    loader.apply_failed(
        ticket_of(&stale),
        &a,
        &api_error(UiErrorContext::PackSetLoad, 500, ""),
    );
    assert!(loader.is_loading());
    assert_eq!(loader.view(), PackSetView::Loading);
    assert_eq!(loader.packs(), &[pack("ka", "a", 5)]);

    assert!(loader.apply_loaded(ticket_of(&current), &b, vec![pack("kb", "b", 12)]));
    assert_eq!(loader.packs(), &[pack("kb", "b", 12)]);
}
