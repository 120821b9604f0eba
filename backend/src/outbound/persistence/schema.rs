//! Diesel table definitions for the PostgreSQL schema.
//!
//! The schema is provisioned outside this service. The repository test
//! suites apply the reference DDL in `tests/fixtures/migrations`; keep both in
//! step with the live database.

diesel::table! {
    /// Student complaints submitted through the public form.
    complaints (id) {
        id -> Uuid,
        reporter_name -> Text,
        class_name -> Text,
        category -> Text,
        detail -> Text,
        reporter_email -> Nullable<Text>,
        /// Free-form status; `Baru`, `Diproses` and `Selesai` are the known values.
        status -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Conduct violations recorded by admins.
    violations (id) {
        id -> Uuid,
        student_name -> Text,
        class_name -> Text,
        category -> Text,
        note -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Notification configuration singleton.
    ///
    /// A check constraint pins `id` to 1 so at most one row exists.
    notification_settings (id) {
        id -> Int2,
        recipients -> Array<Text>,
        notify_on_complaint -> Bool,
        notify_on_violation -> Bool,
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(complaints, violations, notification_settings);
