//! Shared proptest generators.

use proptest::prelude::*;

/// Generate resource ids in UUID text form.
pub fn resource_id_strategy() -> impl Strategy<Value = String> {
    "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}"
}

/// Generate versioned type names such as `os.nova.server-1.0`.
pub fn type_name_strategy() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("os"), Just("senlin")],
        "[a-z]{3,8}",
        "[a-z]{3,12}",
        0u8..3,
    )
        .prop_map(|(vendor, group, kind, minor)| format!("{vendor}.{group}.{kind}-1.{minor}"))
}

/// Generate a distinct list of type names.
pub fn type_catalog_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set(type_name_strategy(), 0..8)
        .prop_map(|names| names.into_iter().collect())
}

/// Generate HTTP error statuses (4xx and 5xx).
pub fn error_status_strategy() -> impl Strategy<Value = u16> {
    400u16..600
}
