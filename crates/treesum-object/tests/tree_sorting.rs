use std::cmp::Ordering;

use bstr::BString;
use proptest::prelude::*;
use treesum_hash::ObjectId;
use treesum_object::{base_name_compare, FileMode, TreeEntry};

fn entry(name: &str, mode: FileMode) -> TreeEntry {
    TreeEntry {
        mode,
        name: BString::from(name),
        oid: ObjectId::NULL,
    }
}

fn file(name: &str) -> TreeEntry {
    entry(name, FileMode::Regular)
}

fn dir(name: &str) -> TreeEntry {
    entry(name, FileMode::Tree)
}

fn exe(name: &str) -> TreeEntry {
    entry(name, FileMode::Executable)
}

fn link(name: &str) -> TreeEntry {
    entry(name, FileMode::Symlink)
}

#[test]
fn dir_sorts_as_if_trailing_slash() {
    // "foo" (dir) → "foo/" vs "foo.c" (file) → "foo.c"
    // '/' (0x2F) > '.' (0x2E), so dir sorts AFTER "foo.c"
    assert_eq!(
        TreeEntry::cmp_entries(&dir("foo"), &file("foo.c")),
        Ordering::Greater
    );
}

#[test]
fn dir_sorts_after_hyphenated() {
    // '/' (0x2F) > '-' (0x2D), so dir "foo" sorts AFTER "foo-bar"
    assert_eq!(
        TreeEntry::cmp_entries(&dir("foo"), &file("foo-bar")),
        Ordering::Greater
    );
}

#[test]
fn dir_sorts_before_zero() {
    // '/' (0x2F) < '0' (0x30), so dir "foo" sorts BEFORE "foo0"
    assert_eq!(
        TreeEntry::cmp_entries(&dir("foo"), &file("foo0")),
        Ordering::Less
    );
}

#[test]
fn same_name_file_vs_dir() {
    // Both exhaust the name, then the file gets 0x00 and the dir '/' (0x2F)
    assert_eq!(
        TreeEntry::cmp_entries(&file("abc"), &dir("abc")),
        Ordering::Less
    );
}

#[test]
fn identical_files_are_equal() {
    assert_eq!(
        TreeEntry::cmp_entries(&file("README"), &file("README")),
        Ordering::Equal
    );
}

#[test]
fn alphabetical_files() {
    assert_eq!(TreeEntry::cmp_entries(&file("a"), &file("b")), Ordering::Less);
    assert_eq!(
        TreeEntry::cmp_entries(&file("z"), &file("a")),
        Ordering::Greater
    );
}

#[test]
fn executable_sorts_same_as_regular() {
    // Both are non-tree entries, compared byte-by-byte without trailing slash
    assert_eq!(
        TreeEntry::cmp_entries(&file("run.sh"), &exe("run.sh")),
        Ordering::Equal
    );
}

#[test]
fn symlink_sorts_same_as_regular() {
    assert_eq!(
        TreeEntry::cmp_entries(&file("link"), &link("link")),
        Ordering::Equal
    );
}

#[test]
fn prefix_relationship() {
    // After the common prefix "ab", file "ab" gets 0x00, file "abc" gets 'c'
    assert_eq!(
        TreeEntry::cmp_entries(&file("ab"), &file("abc")),
        Ordering::Less
    );
}

#[test]
fn dir_prefix_of_file() {
    // After "ab", dir gets '/' (0x2F), file gets 'c' (0x63): dir sorts BEFORE
    assert_eq!(
        TreeEntry::cmp_entries(&dir("ab"), &file("abc")),
        Ordering::Less
    );
}

#[test]
fn special_chars_in_names() {
    // space (0x20) < '-' (0x2D), plain byte comparison
    assert_eq!(
        TreeEntry::cmp_entries(&file("a b"), &file("a-b")),
        Ordering::Less
    );
}

#[test]
fn mixed_dirs_and_files_complex_sort() {
    // Reproduces a real git ordering with mixed types:
    // "foo-bar" (0x2D) < "foo.c" (0x2E) < "foo"/ (0x2F) < "foo0" (0x30)
    let mut entries = vec![file("foo.c"), dir("foo"), file("foo-bar"), file("foo0")];
    entries.sort();
    let names: Vec<&str> = entries
        .iter()
        .map(|e| std::str::from_utf8(&e.name).unwrap())
        .collect();
    assert_eq!(names, ["foo-bar", "foo.c", "foo", "foo0"]);
}

// ── Model equivalence ───────────────────────────────────────────────
// The comparator must behave exactly like: append '/' to directory
// names, compare as raw bytes, strip the suffix again.

fn model_cmp(name1: &[u8], is_dir1: bool, name2: &[u8], is_dir2: bool) -> Ordering {
    let mut a = name1.to_vec();
    if is_dir1 {
        a.push(b'/');
    }
    let mut b = name2.to_vec();
    if is_dir2 {
        b.push(b'/');
    }
    a.cmp(&b)
}

proptest! {
    #[test]
    fn comparator_matches_trailing_slash_model(
        name1 in proptest::collection::vec(1u8..=255, 1..12),
        name2 in proptest::collection::vec(1u8..=255, 1..12),
        is_dir1: bool,
        is_dir2: bool,
    ) {
        // '/' never appears inside a single path component.
        let name1: Vec<u8> = name1.into_iter().filter(|&b| b != b'/').collect();
        let name2: Vec<u8> = name2.into_iter().filter(|&b| b != b'/').collect();
        prop_assume!(!name1.is_empty() && !name2.is_empty());

        prop_assert_eq!(
            base_name_compare(&name1, is_dir1, &name2, is_dir2),
            model_cmp(&name1, is_dir1, &name2, is_dir2)
        );
    }
}
