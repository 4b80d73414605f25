//! Tests for Catalog
//!
//! These tests verify:
//! - Smallest-free id assignment
//! - Add/delete/find/list behavior and ordering
//! - Status changes, including rejected values
//! - Command execution and outcomes
//! - Persistence through the file backend

use std::fs;

use shelfmark::{
    Book, BookStatus, Catalog, CatalogError, Command, Config, MemoryStorage, Outcome,
    StatusChange, Storage, SyncStrategy,
};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_memory_catalog() -> Catalog<MemoryStorage> {
    Catalog::with_storage(MemoryStorage::new())
}

fn setup_temp_catalog() -> (TempDir, Catalog) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .data_file(temp_dir.path().join("library.json"))
        .sync_strategy(SyncStrategy::EveryWrite)
        .build();
    let catalog = Catalog::open(&config);
    (temp_dir, catalog)
}

fn seed(catalog: &Catalog<MemoryStorage>) {
    catalog.add("Dune", "Frank Herbert", 1965).unwrap();
    catalog.add("The Smith Family", "Jane Doe", 1999).unwrap();
    catalog.add("Notes", "Adam Smithson", 1999).unwrap();
    catalog.add("Emma", "Austen", 1815).unwrap();
}

// =============================================================================
// Id Assignment Tests
// =============================================================================

#[test]
fn test_add_on_empty_store() {
    let catalog = setup_memory_catalog();

    let book = catalog.add("Dune", "Herrington", 1965).unwrap();

    assert_eq!(book.id, 1);
    assert_eq!(book.status, BookStatus::Available);
    assert_eq!(catalog.list().unwrap(), vec![book]);
}

#[test]
fn test_ids_are_sequential() {
    let catalog = setup_memory_catalog();

    let ids: Vec<u64> = (0..4)
        .map(|i| catalog.add(&format!("Book {}", i), "Author", 2000).unwrap().id)
        .collect();

    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[test]
fn test_add_reuses_smallest_free_id() {
    let catalog = setup_memory_catalog();
    seed(&catalog);

    catalog.delete(2).unwrap();
    let book = catalog.add("Solaris", "Lem", 1961).unwrap();

    assert_eq!(book.id, 2);
    // Appended, not inserted into the gap
    let ids: Vec<u64> = catalog.list().unwrap().iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![1, 3, 4, 2]);
}

#[test]
fn test_generate_id_with_gaps() {
    let catalog = Catalog::with_storage(MemoryStorage::with_books(vec![
        Book::new(3, "C", "c", 2000),
        Book::new(1, "A", "a", 2000),
        Book::new(4, "D", "d", 2000),
    ]));

    assert_eq!(catalog.generate_id().unwrap(), 2);
}

#[test]
fn test_generate_id_empty_store() {
    let catalog = setup_memory_catalog();

    assert_eq!(catalog.generate_id().unwrap(), 1);
}

// =============================================================================
// Load / Save Tests
// =============================================================================

#[test]
fn test_load_rejects_duplicate_ids() {
    let catalog = Catalog::with_storage(MemoryStorage::with_books(vec![
        Book::new(1, "A", "a", 2000),
        Book::new(1, "B", "b", 2001),
    ]));

    assert!(matches!(catalog.load(), Err(CatalogError::DuplicateId(1))));
    assert!(matches!(catalog.add("C", "c", 2002), Err(CatalogError::DuplicateId(1))));
}

#[test]
fn test_save_load_round_trip() {
    let catalog = setup_memory_catalog();
    seed(&catalog);
    catalog.change_status(3, "LOANED").unwrap();
    let before = catalog.load().unwrap();

    catalog.save(&before).unwrap();

    assert_eq!(catalog.load().unwrap(), before);
}

// =============================================================================
// Delete Tests
// =============================================================================

#[test]
fn test_delete_then_find_is_empty() {
    let catalog = setup_memory_catalog();
    seed(&catalog);

    let removed = catalog.delete(1).unwrap();

    assert_eq!(removed.map(|b| b.title), Some("Dune".to_string()));
    assert!(catalog.find("Dune").unwrap().is_empty());
    assert_eq!(catalog.get(1).unwrap(), None);
}

#[test]
fn test_delete_only_book_leaves_empty_list() {
    let catalog = setup_memory_catalog();
    let book = catalog.add("Dune", "Herrington", 1965).unwrap();

    catalog.delete(book.id).unwrap();

    assert!(catalog.list().unwrap().is_empty());
}

#[test]
fn test_delete_unknown_id_is_noop() {
    let catalog = setup_memory_catalog();
    seed(&catalog);
    let before = catalog.list().unwrap();

    assert_eq!(catalog.delete(42).unwrap(), None);
    assert_eq!(catalog.list().unwrap(), before);
}

#[test]
fn test_delete_preserves_order_of_remaining() {
    let catalog = setup_memory_catalog();
    seed(&catalog);

    catalog.delete(2).unwrap();

    let titles: Vec<String> = catalog.list().unwrap().into_iter().map(|b| b.title).collect();
    assert_eq!(titles, vec!["Dune", "Notes", "Emma"]);
}

// =============================================================================
// Find Tests
// =============================================================================

#[test]
fn test_find_by_year_matches_only_that_year() {
    let catalog = setup_memory_catalog();
    seed(&catalog);

    let found = catalog.find("1999").unwrap();

    let ids: Vec<u64> = found.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![2, 3]);
    assert!(found.iter().all(|b| b.year == 1999));
}

#[test]
fn test_find_substring_case_insensitive() {
    let catalog = setup_memory_catalog();
    seed(&catalog);

    let found = catalog.find("smith").unwrap();

    // Title "The Smith Family" and author "Adam Smithson", in store order
    let ids: Vec<u64> = found.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![2, 3]);
}

#[test]
fn test_find_no_matches() {
    let catalog = setup_memory_catalog();
    seed(&catalog);

    assert!(catalog.find("tolkien").unwrap().is_empty());
    assert!(catalog.find("2024").unwrap().is_empty());
}

#[test]
fn test_find_on_empty_store() {
    let catalog = setup_memory_catalog();

    assert!(catalog.find("anything").unwrap().is_empty());
}

// =============================================================================
// Status Tests
// =============================================================================

#[test]
fn test_change_status_to_loaned() {
    let catalog = setup_memory_catalog();
    seed(&catalog);

    let change = catalog.change_status(1, "LOANED").unwrap();

    match change {
        StatusChange::Changed { book, previous } => {
            assert_eq!(book.id, 1);
            assert_eq!(book.status, BookStatus::Loaned);
            assert_eq!(previous, BookStatus::Available);
        }
        other => panic!("Expected Changed, got {:?}", other),
    }
    assert_eq!(catalog.get(1).unwrap().unwrap().status, BookStatus::Loaned);
}

#[test]
fn test_change_status_keeps_position() {
    let catalog = setup_memory_catalog();
    seed(&catalog);
    let order_before: Vec<u64> = catalog.list().unwrap().iter().map(|b| b.id).collect();

    catalog.change_status(2, "LOANED").unwrap();

    let order_after: Vec<u64> = catalog.list().unwrap().iter().map(|b| b.id).collect();
    assert_eq!(order_before, order_after);
}

#[test]
fn test_change_status_rejects_invalid_value_without_mutation() {
    let catalog = setup_memory_catalog();
    seed(&catalog);
    let before = catalog.list().unwrap();

    for raw in ["lost", "loaned", "", "AVAILABLE!"] {
        let change = catalog.change_status(1, raw).unwrap();
        assert_eq!(change, StatusChange::InvalidStatus(raw.to_string()));
    }

    assert_eq!(catalog.list().unwrap(), before);
}

#[test]
fn test_change_status_unknown_id_wins_over_invalid_value() {
    let catalog = Catalog::with_storage(MemoryStorage::with_books(vec![Book::new(
        1, "Dune", "Herbert", 1965,
    )]));

    let change = catalog.change_status(42, "lost").unwrap();

    assert_eq!(change, StatusChange::NotFound);
    assert_eq!(catalog.get(1).unwrap().unwrap().status, BookStatus::Available);
}

#[test]
fn test_change_status_invalid_value_for_known_id() {
    let catalog = Catalog::with_storage(MemoryStorage::with_books(vec![Book::new(
        1, "Dune", "Herbert", 1965,
    )]));

    let change = catalog.change_status(1, "lost").unwrap();

    assert_eq!(change, StatusChange::InvalidStatus("lost".to_string()));
    assert_eq!(catalog.get(1).unwrap().unwrap().status, BookStatus::Available);
}

#[test]
fn test_change_status_unknown_id() {
    let catalog = setup_memory_catalog();
    seed(&catalog);
    let before = catalog.list().unwrap();

    assert_eq!(catalog.change_status(42, "LOANED").unwrap(), StatusChange::NotFound);
    assert_eq!(catalog.list().unwrap(), before);
}

#[test]
fn test_set_status_back_to_available() {
    let catalog = setup_memory_catalog();
    seed(&catalog);
    catalog.set_status(4, BookStatus::Loaned).unwrap();

    let change = catalog.set_status(4, BookStatus::Available).unwrap();

    assert!(matches!(
        change,
        StatusChange::Changed { previous: BookStatus::Loaned, .. }
    ));
    assert_eq!(catalog.get(4).unwrap().unwrap().status, BookStatus::Available);
}

// =============================================================================
// Command Execution Tests
// =============================================================================

#[test]
fn test_execute_add_and_list() {
    let catalog = setup_memory_catalog();

    let outcome = catalog
        .execute(Command::Add {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            year: 1965,
        })
        .unwrap();

    assert_eq!(outcome, Outcome::Added(Book::new(1, "Dune", "Herbert", 1965)));
    assert_eq!(
        catalog.execute(Command::List).unwrap(),
        Outcome::Books(vec![Book::new(1, "Dune", "Herbert", 1965)])
    );
}

#[test]
fn test_execute_reports_not_found() {
    let catalog = setup_memory_catalog();

    let delete = catalog.execute(Command::Delete { id: 5 }).unwrap();
    let status = catalog
        .execute(Command::ChangeStatus {
            id: 5,
            status: "LOANED".to_string(),
        })
        .unwrap();

    assert_eq!(delete, Outcome::NotFound(5));
    assert_eq!(status, Outcome::NotFound(5));
    assert!(!delete.is_success());
}

#[test]
fn test_execute_reports_invalid_status() {
    let catalog = setup_memory_catalog();
    seed(&catalog);

    let outcome = catalog
        .execute(Command::ChangeStatus {
            id: 1,
            status: "gone".to_string(),
        })
        .unwrap();

    assert_eq!(outcome, Outcome::InvalidStatus("gone".to_string()));
    assert!(!outcome.is_success());
}

#[test]
fn test_execute_find_and_delete() {
    let catalog = setup_memory_catalog();
    seed(&catalog);

    let found = catalog
        .execute(Command::Find {
            keyword: "EMMA".to_string(),
        })
        .unwrap();
    let deleted = catalog.execute(Command::Delete { id: 4 }).unwrap();

    assert_eq!(found, Outcome::Books(vec![Book::new(4, "Emma", "Austen", 1815)]));
    assert_eq!(deleted, Outcome::Deleted(Book::new(4, "Emma", "Austen", 1815)));
    assert!(deleted.is_success());
}

// =============================================================================
// File-Backed Tests
// =============================================================================

#[test]
fn test_file_catalog_persists_across_reopen() {
    let (temp, catalog) = setup_temp_catalog();
    catalog.add("Dune", "Herbert", 1965).unwrap();
    catalog.add("Emma", "Austen", 1815).unwrap();
    catalog.change_status(2, "LOANED").unwrap();
    drop(catalog);

    let reopened = Catalog::open_path(&temp.path().join("library.json"));

    let books = reopened.list().unwrap();
    assert_eq!(books.len(), 2);
    assert_eq!(books[1].status, BookStatus::Loaned);
}

#[test]
fn test_file_catalog_missing_file_is_empty() {
    let (_temp, catalog) = setup_temp_catalog();

    assert!(catalog.list().unwrap().is_empty());
    assert!(!catalog.data_file().exists());
}

#[test]
fn test_file_catalog_add_appends_without_rewrite() {
    let (_temp, catalog) = setup_temp_catalog();
    catalog.add("Dune", "Herbert", 1965).unwrap();
    let first_line = fs::read_to_string(catalog.data_file()).unwrap();

    catalog.add("Emma", "Austen", 1815).unwrap();

    let contents = fs::read_to_string(catalog.data_file()).unwrap();
    assert!(contents.starts_with(&first_line));
    assert_eq!(contents.lines().count(), 2);
}

#[test]
fn test_file_catalog_delete_rewrites_file() {
    let (_temp, catalog) = setup_temp_catalog();
    catalog.add("Dune", "Herbert", 1965).unwrap();
    catalog.add("Emma", "Austen", 1815).unwrap();

    catalog.delete(1).unwrap();

    let contents = fs::read_to_string(catalog.data_file()).unwrap();
    assert_eq!(contents.lines().count(), 1);
    assert!(contents.contains("\"Emma\""));
}

#[test]
fn test_file_catalog_malformed_file_fails_operations() {
    let (_temp, catalog) = setup_temp_catalog();
    fs::write(catalog.data_file(), "{broken\n").unwrap();

    assert!(matches!(
        catalog.list(),
        Err(CatalogError::MalformedRecord { line: 1, .. })
    ));
    assert!(catalog.add("Dune", "Herbert", 1965).is_err());
    // Failed add must not append to the file
    assert_eq!(fs::read_to_string(catalog.data_file()).unwrap(), "{broken\n");
}

#[test]
fn test_catalog_over_borrowed_storage() {
    let storage = MemoryStorage::new();
    let catalog = Catalog::with_storage(&storage);

    catalog.add("Dune", "Herbert", 1965).unwrap();

    assert_eq!(storage.len(), 1);
    assert_eq!(storage.load().unwrap()[0].title, "Dune");
    assert_eq!(catalog.storage().len(), 1);
}

#[test]
fn test_storage_accessor_exposes_backend() {
    let catalog = setup_memory_catalog();
    assert!(catalog.storage().is_empty());

    catalog.add("Dune", "Herbert", 1965).unwrap();
    catalog.add("Emma", "Austen", 1815).unwrap();

    assert_eq!(catalog.storage().len(), 2);
    assert_eq!(catalog.storage().load().unwrap(), catalog.list().unwrap());
}
