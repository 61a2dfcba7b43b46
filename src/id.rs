use uuid::Uuid;

/// Random (v4) UUID in its hyphenated lowercase form.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
