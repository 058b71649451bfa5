//! Diesel table definitions mirroring `migrations/`.
//!
//! Internal to the persistence layer; the domain never sees these types.

diesel::table! {
    /// Identity records mirrored from the external auth service.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        /// One of `student`, `alumni`, `admin`.
        role -> Varchar,
        /// Sparse profile document (camelCase keys).
        profile -> Jsonb,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Postings with their ordered applicant references.
    opportunities (id) {
        id -> Uuid,
        owner_id -> Uuid,
        project_title -> Varchar,
        category -> Varchar,
        budget -> Int8,
        payment_type -> Varchar,
        experience_level -> Varchar,
        project_description -> Text,
        required_skills -> Array<Text>,
        /// Application order; appended to, never reordered.
        applicant_ids -> Array<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Review decisions keyed by (opportunity, student). No foreign keys.
    application_statuses (opportunity_id, student_id) {
        opportunity_id -> Uuid,
        student_id -> Uuid,
        status -> Varchar,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(opportunities -> users (owner_id));

diesel::allow_tables_to_appear_in_same_query!(users, opportunities, application_statuses);
