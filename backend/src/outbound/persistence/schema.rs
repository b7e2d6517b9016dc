//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the statements in [`super::setup`] exactly.
//! Diesel uses them for compile-time query validation and type-safe SQL
//! generation.

diesel::table! {
    /// Sentiment notes captured after the grounding exercise.
    ///
    /// Multiple rows per `ip` are allowed; the service enforces the rolling
    /// 2-hour gap between them.
    sentiment_feedbacks (id) {
        /// Primary key, serial.
        id -> Int4,
        /// Submitted feedback text.
        content -> Text,
        /// Submitter network address.
        ip -> Text,
        /// Insertion timestamp, defaulted by the database.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// App-improvement suggestions, at most one per `ip`.
    ///
    /// The unique constraint on `ip` is the authoritative duplicate guard.
    app_feedbacks (id) {
        /// Primary key, serial.
        id -> Int4,
        /// Submitted suggestion text.
        content -> Text,
        /// Submitter network address, unique.
        ip -> Text,
        /// Insertion timestamp, defaulted by the database.
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(sentiment_feedbacks, app_feedbacks);
