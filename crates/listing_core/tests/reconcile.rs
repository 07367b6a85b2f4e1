use std::sync::Once;

use listing_core::{Item, ItemId, ListError, PageResult, PagedList, Reconciliation};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(listing_logging::initialize_for_tests);
}

fn item(id: &str) -> Item {
    Item::new(id).with_field("name", format!("{id}.fq.gz"))
}

fn page(ids: &[&str], page: u32, page_count: u32) -> PageResult {
    PageResult::new(ids.iter().map(|id| item(id)).collect(), page, page_count)
}

fn master_ids(list: &PagedList) -> Vec<String> {
    list.entries()
        .iter()
        .map(|entry| entry.item.id.to_string())
        .collect()
}

fn visible_ids(list: &PagedList) -> Vec<String> {
    list.visible_items().map(|item| item.id.to_string()).collect()
}

#[test]
fn union_extends_then_refresh_folds_in_new_items() {
    init_logging();
    let mut list = PagedList::from_snapshot(page(&["A", "B"], 1, 3)).unwrap();

    let outcome = list.apply(page(&["C", "D"], 2, 3)).unwrap();
    assert_eq!(outcome, Reconciliation::Extend { added: 2 });
    assert_eq!(master_ids(&list), vec!["A", "B", "C", "D"]);
    assert_eq!(list.current_page(), 2);

    // D removed server-side and E added, page number unchanged.
    let outcome = list.apply(page(&["C", "E"], 2, 3)).unwrap();
    assert_eq!(outcome, Reconciliation::Refresh { added: 1, updated: 0 });
    assert_eq!(master_ids(&list), vec!["A", "B", "C", "D", "E"]);
    assert_eq!(list.current_page(), 2);
    assert_eq!(list.current_page_items(), &[item("C"), item("E")]);
}

#[test]
fn identical_page_twice_is_a_noop() {
    init_logging();
    let mut list = PagedList::from_snapshot(page(&["A", "B"], 1, 2)).unwrap();
    list.apply(page(&["C", "D"], 2, 2)).unwrap();
    let once = list.clone();

    let outcome = list.apply(page(&["C", "D"], 2, 2)).unwrap();

    assert_eq!(outcome, Reconciliation::Unchanged);
    assert_eq!(list, once);
}

#[test]
fn structurally_equal_items_count_as_unchanged() {
    init_logging();
    let mut list = PagedList::from_snapshot(page(&["A"], 1, 2)).unwrap();
    list.apply(PageResult::new(
        vec![Item::new("B").with_field("size", 10)],
        2,
        2,
    ))
    .unwrap();

    let fresh = PageResult::new(vec![Item::new("B").with_field("size", 10)], 2, 2);
    assert_eq!(list.apply(fresh).unwrap(), Reconciliation::Unchanged);
}

#[test]
fn forward_pagination_never_loses_ids() {
    init_logging();
    let mut list = PagedList::from_snapshot(page(&["a", "b"], 1, 5)).unwrap();
    let pages: [&[&str]; 4] = [&["c", "d"], &["b", "e"], &["f"], &["a", "g", "h"]];

    let mut previous = master_ids(&list);
    for (offset, ids) in pages.iter().enumerate() {
        list.apply(page(ids, offset as u32 + 2, 5)).unwrap();
        let current = master_ids(&list);
        assert!(current.len() >= previous.len());
        assert_eq!(&current[..previous.len()], &previous[..]);
        previous = current;
    }

    assert_eq!(previous, vec!["a", "b", "c", "d", "e", "f", "g", "h"]);
    assert_eq!(list.current_page(), 5);
    assert!(!list.has_next_page());
}

#[test]
fn page_one_resets_regardless_of_prior_state() {
    init_logging();
    let mut list = PagedList::from_snapshot(page(&["A", "B"], 1, 3)).unwrap();
    list.apply(page(&["C", "D"], 2, 3)).unwrap();
    list.apply(page(&["E"], 3, 3)).unwrap();
    assert!(list.mark_removed(&ItemId::from("A")));

    let outcome = list.apply(page(&["X", "A"], 1, 1)).unwrap();

    assert_eq!(outcome, Reconciliation::Reset);
    assert_eq!(master_ids(&list), vec!["X", "A"]);
    assert_eq!(visible_ids(&list), vec!["X", "A"]);
    assert_eq!(list.current_page(), 1);
    assert_eq!(list.page_count(), 1);
}

#[test]
fn stale_page_after_reset_is_merged_without_truncating() {
    init_logging();
    let mut list = PagedList::from_snapshot(page(&["A", "B"], 1, 2)).unwrap();
    // A new query's page 1 wins first; the old query's page 2 lands late.
    list.apply(page(&["Q"], 1, 2)).unwrap();
    list.apply(page(&["C"], 2, 2)).unwrap();

    assert_eq!(master_ids(&list), vec!["Q", "C"]);
    assert_eq!(list.current_page(), 2);
}

#[test]
fn reversed_forward_pages_keep_the_highest_page() {
    init_logging();
    let mut list = PagedList::from_snapshot(page(&["A"], 1, 3)).unwrap();
    list.apply(page(&["C"], 3, 3)).unwrap();
    let outcome = list.apply(page(&["B"], 2, 3)).unwrap();

    assert_eq!(outcome, Reconciliation::Refresh { added: 1, updated: 0 });
    assert_eq!(master_ids(&list), vec!["A", "C", "B"]);
    assert_eq!(list.current_page(), 3);
}

#[test]
fn refresh_updates_payload_in_place() {
    init_logging();
    let mut list = PagedList::from_snapshot(page(&["A", "B"], 1, 2)).unwrap();
    list.apply(page(&["C"], 2, 2)).unwrap();

    let renamed = PageResult::new(
        vec![Item::new("C").with_field("name", "renamed.fq.gz")],
        2,
        2,
    );
    let outcome = list.apply(renamed).unwrap();

    assert_eq!(outcome, Reconciliation::Refresh { added: 0, updated: 1 });
    assert_eq!(master_ids(&list), vec!["A", "B", "C"]);
    assert_eq!(
        list.visible_row(2).and_then(|item| item.field("name")),
        Some(&serde_json::Value::from("renamed.fq.gz"))
    );
}

#[test]
fn removal_hides_row_without_shifting_indices() {
    init_logging();
    let mut list = PagedList::from_snapshot(page(&["A", "B", "C"], 1, 1)).unwrap();

    assert!(list.mark_removed(&ItemId::from("B")));

    assert_eq!(visible_ids(&list), vec!["A", "C"]);
    assert_eq!(list.total_known_count(), 3);
    assert!(list.contains(&ItemId::from("B")));
    assert_eq!(list.visible_row(1), None);
    assert_eq!(list.visible_row(2).map(|item| item.id.as_str()), Some("C"));
    assert!(list.entry(1).unwrap().is_pending_removal());
}

#[test]
fn removal_survives_unrelated_pages_and_refreshes() {
    init_logging();
    let mut list = PagedList::from_snapshot(page(&["A", "B"], 1, 3)).unwrap();
    list.mark_removed(&ItemId::from("A"));

    list.apply(page(&["C"], 2, 3)).unwrap();
    list.apply(page(&["C", "D"], 2, 3)).unwrap();
    assert_eq!(list.visible_row(0), None);

    // Even a page that carries the hidden id again keeps it hidden.
    list.apply(page(&["A", "E"], 3, 3)).unwrap();
    assert_eq!(visible_ids(&list), vec!["B", "C", "D", "E"]);
    assert_eq!(list.total_known_count(), 5);
}

#[test]
fn removal_of_unknown_or_hidden_id_is_ignored() {
    init_logging();
    let mut list = PagedList::from_snapshot(page(&["A"], 1, 1)).unwrap();
    let before = list.clone();

    assert!(!list.mark_removed(&ItemId::from("missing")));
    assert_eq!(list, before);

    assert!(list.mark_removed(&ItemId::from("A")));
    assert!(!list.mark_removed(&ItemId::from("A")));
}

#[test]
fn page_zero_is_rejected_and_state_is_untouched() {
    init_logging();
    let mut list = PagedList::from_snapshot(page(&["A", "B"], 1, 2)).unwrap();
    let before = list.clone();

    let err = list.apply(page(&["Z"], 0, 2)).unwrap_err();

    assert!(matches!(err, ListError::InvalidPageResult(_)));
    assert_eq!(list, before);
}

#[test]
fn duplicate_or_missing_ids_are_rejected() {
    init_logging();
    let mut list = PagedList::from_snapshot(page(&["A"], 1, 2)).unwrap();
    let before = list.clone();

    assert!(list.apply(page(&["B", "B"], 2, 2)).is_err());
    assert!(list.apply(page(&["B", ""], 2, 2)).is_err());
    assert_eq!(list, before);
    assert!(PagedList::from_snapshot(page(&["A", "A"], 1, 1)).is_err());
}

#[test]
fn counts_and_next_page_follow_latest_result() {
    init_logging();
    let mut list =
        PagedList::from_snapshot(page(&["A", "B"], 1, 2).with_counts(3, 10)).unwrap();
    assert!(list.has_next_page());
    assert_eq!(list.found_count(), 3);
    assert_eq!(list.total_count(), 10);

    list.apply(page(&["C"], 2, 2).with_counts(3, 10)).unwrap();
    assert!(!list.has_next_page());
    assert_eq!(list.total_known_count(), 3);
}

#[test]
fn empty_result_set_has_no_pages() {
    init_logging();
    let list = PagedList::from_snapshot(page(&[], 1, 0)).unwrap();
    assert_eq!(list.total_known_count(), 0);
    assert!(!list.has_next_page());
}

#[test]
fn unchanged_page_still_takes_latest_counts() {
    init_logging();
    let mut list = PagedList::from_snapshot(page(&["A", "B"], 1, 2)).unwrap();
    list.apply(page(&["C", "D"], 2, 2).with_counts(4, 4)).unwrap();
    assert!(!list.has_next_page());
    let before = master_ids(&list);

    // The server grew: same items on page 2, but a third page now exists.
    let outcome = list
        .apply(page(&["C", "D"], 2, 3).with_counts(6, 6))
        .unwrap();

    assert_eq!(outcome, Reconciliation::Unchanged);
    assert_eq!(master_ids(&list), before);
    assert_eq!(list.current_page(), 2);
    assert_eq!(list.page_count(), 3);
    assert_eq!(list.found_count(), 6);
    assert_eq!(list.total_count(), 6);
    assert!(list.has_next_page());
}
